//! Validated schema: option lookup table plus ordered positional slots.

use std::collections::HashMap;

use crate::types::FieldSchema;
use crate::validate::{SchemaError, validate_fields};

/// Immutable description of everything a parse can assign.
///
/// Built once from a list of [`FieldSchema`]s; ignored fields are dropped,
/// aliases are sorted (shortest first, then lexicographic), and every
/// invariant checked by [`validate_fields`] holds afterwards.
///
/// # Examples
///
/// ```
/// use argbind_core::{FieldSchema, Schema, ValueType};
///
/// let schema = Schema::builder()
///     .field(FieldSchema::boolean("all").with_flags("--all -a"))
///     .field(FieldSchema::scalar("target", ValueType::String))
///     .build()
///     .unwrap();
///
/// assert_eq!(schema.lookup_flag("--all").unwrap().name, "all");
/// assert_eq!(schema.field("all").unwrap().aliases, vec!["-a", "--all"]);
/// assert_eq!(schema.positionals().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldSchema>,
    options: HashMap<String, usize>,
    positionals: Vec<usize>,
}

impl Schema {
    /// Validates `fields` and builds a schema.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found by [`validate_fields`].
    pub fn new(fields: impl IntoIterator<Item = FieldSchema>) -> Result<Self, SchemaError> {
        let fields: Vec<FieldSchema> = fields
            .into_iter()
            .filter(|field| !field.ignored)
            .map(|mut field| {
                field.name = field.name.trim().to_string();
                field.aliases.sort_by(|a, b| a.len().cmp(&b.len()).then(a.cmp(b)));
                field
            })
            .collect();

        if let Some(err) = validate_fields(&fields).into_iter().next() {
            return Err(err);
        }

        let mut options = HashMap::new();
        let mut positionals = Vec::new();
        for (idx, field) in fields.iter().enumerate() {
            if field.is_positional() {
                positionals.push(idx);
            }
            for flag in &field.aliases {
                options.insert(flag.clone(), idx);
            }
        }

        Ok(Self {
            fields,
            options,
            positionals,
        })
    }

    /// Starts a builder.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// All fields in declaration order.
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Finds a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Finds the field bound to a flag spelling.
    pub fn lookup_flag(&self, flag: &str) -> Option<&FieldSchema> {
        self.options.get(flag).map(|&idx| &self.fields[idx])
    }

    /// Fields bound to at least one flag, in declaration order.
    pub fn option_fields(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields.iter().filter(|field| !field.is_positional())
    }

    /// Positional fields in declaration order.
    pub fn positionals(&self) -> Vec<&FieldSchema> {
        self.positionals.iter().map(|&idx| &self.fields[idx]).collect()
    }

    /// Number of distinct flag spellings.
    pub fn flag_count(&self) -> usize {
        self.options.len()
    }
}

/// Collects fields for [`Schema::new`].
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldSchema>,
}

impl SchemaBuilder {
    /// Appends a field.
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Validates and builds the schema.
    pub fn build(self) -> Result<Schema, SchemaError> {
        Schema::new(self.fields)
    }
}
