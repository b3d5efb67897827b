//! Typed writes into a destination.
//!
//! The parser never touches caller data directly. It converts each raw
//! value and hands it to a [`Destination`], which decides how to store it.
//! [`ParsedValues`] is the built-in dynamic destination.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::convert::convert_field;
use crate::error::{DestinationError, Result};
use crate::resolve::Assignment;
use crate::schema::Schema;
use crate::types::{FieldSchema, Value};

/// Receives converted values.
///
/// Implement this for a plain struct to populate it without reflection:
///
/// ```
/// use argbind_core::*;
///
/// #[derive(Default)]
/// struct Opts {
///     count: i64,
///     files: Vec<String>,
/// }
///
/// impl Destination for Opts {
///     fn set_scalar(&mut self, field: &FieldSchema, value: Value) -> Result<(), DestinationError> {
///         match (field.name.as_str(), value) {
///             ("count", Value::Int(n)) => self.count = n,
///             (name, _) => return Err(DestinationError::UnknownField(name.to_string())),
///         }
///         Ok(())
///     }
///
///     fn append_collector(&mut self, field: &FieldSchema, value: Value) -> Result<(), DestinationError> {
///         match (field.name.as_str(), value) {
///             ("files", Value::String(s)) => self.files.push(s),
///             (name, _) => return Err(DestinationError::UnknownField(name.to_string())),
///         }
///         Ok(())
///     }
/// }
///
/// let schema = Schema::builder()
///     .field(FieldSchema::scalar("count", ValueType::Int).with_flag("-c"))
///     .field(FieldSchema::collector("files", ValueType::String))
///     .build()
///     .unwrap();
///
/// let mut opts = Opts::default();
/// parse(&schema, &["a", "-c3", "b"], &mut opts).unwrap();
/// assert_eq!(opts.count, 3);
/// assert_eq!(opts.files, vec!["a", "b"]);
/// ```
pub trait Destination {
    /// Overwrites a single-valued field.
    fn set_scalar(&mut self, field: &FieldSchema, value: Value) -> Result<(), DestinationError>;

    /// Appends to a repeatable field.
    fn append_collector(
        &mut self,
        field: &FieldSchema,
        value: Value,
    ) -> Result<(), DestinationError>;
}

/// Converts `raw` for `field` and writes it to `dest`.
///
/// An empty `raw` takes the field's default. Collectors append; every
/// other kind is overwritten, so the last write wins.
pub fn populate_field<D: Destination + ?Sized>(
    field: &FieldSchema,
    raw: &str,
    dest: &mut D,
) -> Result<()> {
    let value = convert_field(field, raw)?;
    if field.is_collector() {
        dest.append_collector(field, value)?;
    } else {
        dest.set_scalar(field, value)?;
    }
    Ok(())
}

/// Applies resolved flag assignments in order.
pub fn populate_options<D: Destination + ?Sized>(
    assignments: &[Assignment<'_>],
    dest: &mut D,
) -> Result<()> {
    for assignment in assignments {
        populate_field(assignment.field, &assignment.value, dest)?;
    }
    Ok(())
}

/// Writes defaults to every option field that is neither boolean nor a
/// collector and has a non-empty default.
pub fn populate_defaults<D: Destination + ?Sized>(schema: &Schema, dest: &mut D) -> Result<()> {
    for field in schema
        .option_fields()
        .filter(|field| !field.is_collector() && !field.is_boolean() && field.has_default())
    {
        populate_field(field, "", dest)?;
    }
    Ok(())
}

/// Contents of one slot in [`ParsedValues`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Slot {
    /// Value of a single-valued field.
    Scalar(Value),
    /// Values appended to a repeatable field, in order.
    Collector(Vec<Value>),
}

/// Dynamic destination keyed by field name.
///
/// Created from a schema, every non-collector field starts at its type's
/// zero value. Collectors are absent until first written.
///
/// # Examples
///
/// ```
/// use argbind_core::*;
///
/// let schema = Schema::builder()
///     .field(FieldSchema::collector("verbose", ValueType::Bool).with_flag("-v"))
///     .field(FieldSchema::scalar("level", ValueType::Int).with_flag("-l"))
///     .build()
///     .unwrap();
///
/// let values = parse_values(&schema, &["-vvv"], ParseMode::Standard).unwrap();
/// assert_eq!(values.get_all("verbose").map(<[Value]>::len), Some(3));
/// assert_eq!(values.get_int("level"), Some(0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParsedValues {
    slots: BTreeMap<String, Slot>,
}

impl ParsedValues {
    /// Creates zero-initialized slots for every field of `schema`.
    pub fn new(schema: &Schema) -> Self {
        let slots = schema
            .fields()
            .iter()
            .filter(|field| !field.is_collector())
            .map(|field| (field.name.clone(), Slot::Scalar(field.value_type().zero())))
            .collect();
        Self { slots }
    }

    /// Returns the slot for `name`, if present.
    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.get(name)
    }

    /// Returns a scalar value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self.slots.get(name)? {
            Slot::Scalar(value) => Some(value),
            Slot::Collector(_) => None,
        }
    }

    /// Returns a collector's values, or `None` if it was never written.
    pub fn get_all(&self, name: &str) -> Option<&[Value]> {
        match self.slots.get(name)? {
            Slot::Collector(values) => Some(values),
            Slot::Scalar(_) => None,
        }
    }

    /// Returns a scalar boolean value, or `None` if absent or of another type.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name)?.as_bool()
    }

    /// Returns a scalar string value, or `None` if absent or of another type.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name)?.as_str()
    }

    /// Returns a scalar integer value, or `None` if absent or of another type.
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name)?.as_int()
    }

    /// Returns a scalar float value, or `None` if absent or of another type.
    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get(name)?.as_float()
    }

    /// Returns a scalar time value, or `None` if absent or of another type.
    pub fn get_time(&self, name: &str) -> Option<chrono::NaiveDateTime> {
        self.get(name)?.as_time()
    }

    /// Returns a scalar duration value, or `None` if absent or of another type.
    pub fn get_duration(&self, name: &str) -> Option<chrono::TimeDelta> {
        self.get(name)?.as_duration()
    }

    /// Iterates slots ordered by field name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Slot)> {
        self.slots.iter().map(|(name, slot)| (name.as_str(), slot))
    }
}

impl Destination for ParsedValues {
    fn set_scalar(&mut self, field: &FieldSchema, value: Value) -> Result<(), DestinationError> {
        if let Some(Slot::Collector(_)) = self.slots.get(&field.name) {
            return Err(DestinationError::TypeMismatch {
                field: field.name.clone(),
                found: value.value_type().to_string(),
            });
        }
        self.slots.insert(field.name.clone(), Slot::Scalar(value));
        Ok(())
    }

    fn append_collector(
        &mut self,
        field: &FieldSchema,
        value: Value,
    ) -> Result<(), DestinationError> {
        let slot = self
            .slots
            .entry(field.name.clone())
            .or_insert_with(|| Slot::Collector(Vec::new()));
        match slot {
            Slot::Collector(values) => {
                values.push(value);
                Ok(())
            }
            Slot::Scalar(_) => Err(DestinationError::TypeMismatch {
                field: field.name.clone(),
                found: format!("repeated {}", value.value_type()),
            }),
        }
    }
}
