//! Field and value type definitions.
//!
//! This module defines the data model shared by every stage of the parser:
//! the closed set of [`ValueType`]s a field may hold, how a field consumes
//! tokens ([`FieldKind`]), the static description of one destination slot
//! ([`FieldSchema`]), and the converted [`Value`]s written to a destination.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize, Serializer};

use crate::convert::format_duration;

/// Default `strftime` pattern for time-typed fields (no timezone).
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Element type of a field.
///
/// # Examples
///
/// ```
/// use argbind_core::ValueType;
///
/// assert_eq!(ValueType::Int.to_string(), "int");
/// assert_eq!(ValueType::Duration.zero().to_string(), "0s");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Presence flag; converts to `true` whenever assigned.
    Bool,
    /// Arbitrary string, including the empty string.
    String,
    /// Signed 64-bit integer.
    Int,
    /// 64-bit float.
    Float,
    /// Calendar date and time without timezone.
    Time,
    /// Signed duration such as `300ms` or `1h30m`.
    Duration,
}

impl ValueType {
    /// Returns the lowercase name used in usage text and schema files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Time => "time",
            Self::Duration => "duration",
        }
    }

    /// Returns the zero value a slot of this type holds before assignment.
    ///
    /// The zero time is `0001-01-01 00:00:00`.
    pub fn zero(self) -> Value {
        match self {
            Self::Bool => Value::Bool(false),
            Self::String => Value::String(String::new()),
            Self::Int => Value::Int(0),
            Self::Float => Value::Float(0.0),
            Self::Time => Value::Time(zero_time()),
            Self::Duration => Value::Duration(TimeDelta::zero()),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn zero_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// How a field consumes tokens.
///
/// `Bool` fields never take a value token. `Scalar` fields hold one value
/// and are overwritten by later assignments. `Collector` fields append every
/// assignment in encounter order.
///
/// # Examples
///
/// ```
/// use argbind_core::{FieldKind, ValueType};
///
/// assert!(FieldKind::Bool.is_boolean());
/// assert!(FieldKind::Collector(ValueType::Bool).is_boolean());
/// assert!(FieldKind::Collector(ValueType::Int).is_collector());
/// assert_eq!(FieldKind::Scalar(ValueType::Float).value_type(), ValueType::Float);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Single boolean flag.
    Bool,
    /// Single value of the given type.
    Scalar(ValueType),
    /// Repeatable slot accumulating values of the given type.
    Collector(ValueType),
}

impl FieldKind {
    /// Returns the element type.
    pub fn value_type(self) -> ValueType {
        match self {
            Self::Bool => ValueType::Bool,
            Self::Scalar(value_type) | Self::Collector(value_type) => value_type,
        }
    }

    /// Returns `true` if the element type is boolean.
    pub fn is_boolean(self) -> bool {
        self.value_type() == ValueType::Bool
    }

    /// Returns `true` for repeatable slots.
    pub fn is_collector(self) -> bool {
        matches!(self, Self::Collector(_))
    }
}

/// Parsing mode selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Flag values may be fused (`-c9`, `--count=9`) or in the next token.
    /// Option defaults are applied before any token is processed.
    #[default]
    Standard,
    /// Flag values must be fused. A flag without a fused value takes its
    /// default; an absent flag leaves the zero value.
    Fused,
}

/// Static description of one destination slot.
///
/// A field with no aliases is positional. All aliases of a field are
/// interchangeable.
///
/// # Examples
///
/// ```
/// use argbind_core::{FieldSchema, ValueType};
///
/// let count = FieldSchema::scalar("count", ValueType::Int)
///     .with_flags("-c --count")
///     .with_default("3")
///     .with_help("number of *N* repetitions");
/// assert!(!count.is_positional());
/// assert_eq!(count.default_str(), "3");
///
/// let files = FieldSchema::collector("files", ValueType::String);
/// assert!(files.is_positional());
/// assert!(files.is_collector());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Stable destination name.
    pub name: String,
    /// Token consumption and element type.
    pub kind: FieldKind,
    /// Flag spellings bound to this field (empty for positionals).
    pub aliases: Vec<String>,
    /// Raw default string, converted like a token when applied.
    pub default_value: Option<String>,
    /// Custom `strftime` pattern for time-typed fields.
    pub format: Option<String>,
    /// Help text for usage output.
    pub help: Option<String>,
    /// Ignored fields are neither parsed nor defaulted.
    pub ignored: bool,
}

impl FieldSchema {
    /// Creates a field of the given kind with no aliases.
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            aliases: Vec::new(),
            default_value: None,
            format: None,
            help: None,
            ignored: false,
        }
    }

    /// Creates a boolean field.
    pub fn boolean(name: &str) -> Self {
        Self::new(name, FieldKind::Bool)
    }

    /// Creates a single-valued field.
    pub fn scalar(name: &str, value_type: ValueType) -> Self {
        Self::new(name, FieldKind::Scalar(value_type))
    }

    /// Creates a repeatable field.
    pub fn collector(name: &str, value_type: ValueType) -> Self {
        Self::new(name, FieldKind::Collector(value_type))
    }

    /// Adds one flag spelling.
    pub fn with_flag(mut self, flag: &str) -> Self {
        self.aliases.push(flag.to_string());
        self
    }

    /// Adds whitespace-separated flag spellings, e.g. `"-v --verbose"`.
    pub fn with_flags(mut self, flags: &str) -> Self {
        self.aliases
            .extend(flags.split_whitespace().map(String::from));
        self
    }

    /// Sets the default string.
    pub fn with_default(mut self, default: &str) -> Self {
        self.default_value = Some(default.to_string());
        self
    }

    /// Sets the time format.
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    /// Sets the help text.
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    /// Marks the field as ignored.
    pub fn ignore(mut self) -> Self {
        self.ignored = true;
        self
    }

    /// Returns `true` if the field has no flag aliases.
    pub fn is_positional(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Returns `true` if the element type is boolean.
    pub fn is_boolean(&self) -> bool {
        self.kind.is_boolean()
    }

    /// Returns `true` for repeatable fields.
    pub fn is_collector(&self) -> bool {
        self.kind.is_collector()
    }

    /// Returns the element type.
    pub fn value_type(&self) -> ValueType {
        self.kind.value_type()
    }

    /// Returns the default string, or `""` when none is set.
    pub fn default_str(&self) -> &str {
        self.default_value.as_deref().unwrap_or("")
    }

    /// Returns `true` if a non-empty default is set.
    pub fn has_default(&self) -> bool {
        !self.default_str().is_empty()
    }

    /// Returns the custom format, if set and non-empty.
    pub fn format_str(&self) -> Option<&str> {
        self.format.as_deref().filter(|format| !format.is_empty())
    }
}

/// A converted value.
///
/// `Display` renders a string that converts back to an equal value
/// (times use [`DEFAULT_TIME_FORMAT`]).
///
/// # Examples
///
/// ```
/// use argbind_core::Value;
///
/// let v = Value::Int(42);
/// assert_eq!(v.as_int(), Some(42));
/// assert_eq!(v.to_string(), "42");
/// assert_eq!(v.as_str(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Presence of a boolean flag.
    Bool(bool),
    /// Raw text, unchanged.
    String(String),
    /// Signed 64-bit integer.
    Int(i64),
    /// 64-bit float.
    Float(f64),
    /// Date and time without a zone.
    Time(NaiveDateTime),
    /// Signed span of time.
    Duration(TimeDelta),
}

impl Value {
    /// Returns the type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Bool(_) => ValueType::Bool,
            Self::String(_) => ValueType::String,
            Self::Int(_) => ValueType::Int,
            Self::Float(_) => ValueType::Float,
            Self::Time(_) => ValueType::Time,
            Self::Duration(_) => ValueType::Duration,
        }
    }

    /// Returns the boolean if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the text if this is a [`Value::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is a [`Value::Int`].
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float if this is a [`Value::Float`].
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the timestamp if this is a [`Value::Time`].
    pub fn as_time(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Time(t) => Some(*t),
            _ => None,
        }
    }

    /// Returns the duration if this is a [`Value::Duration`].
    pub fn as_duration(&self) -> Option<TimeDelta> {
        match self {
            Self::Duration(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::String(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Time(t) => write!(f, "{}", t.format(DEFAULT_TIME_FORMAT)),
            Self::Duration(d) => f.write_str(&format_duration(*d)),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::String(s) => serializer.serialize_str(s),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::Time(_) | Self::Duration(_) => serializer.collect_str(self),
        }
    }
}
