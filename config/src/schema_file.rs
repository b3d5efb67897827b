//! Declarative schema files.
//!
//! A schema file describes one command: its fields, their flags and
//! defaults, and the parse mode to use.
//!
//! # Example YAML
//!
//! ```yaml
//! name: tail
//! description: Print the last lines of files
//! mode: standard
//! fields:
//!   - name: follow
//!     type: bool
//!     flags: -f --follow
//!   - name: lines
//!     type: int
//!     flags: -n --lines
//!     default: "10"
//!     help: output the last *N* lines
//!   - name: files
//!     type: string
//!     repeatable: true
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use argbind_core::{FieldKind, FieldSchema, ParseMode, Schema, ValueType};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Result};

/// One field entry of a [`SchemaFile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Destination name.
    pub name: String,
    /// One of `bool`, `string`, `int`, `float`, `time`, `duration`.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Accumulate every value instead of keeping the last.
    #[serde(default, skip_serializing_if = "is_false")]
    pub repeatable: bool,
    /// Whitespace-separated flag spellings; empty for positionals.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub flags: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// `strftime` pattern for time fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub ignore: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl FieldSpec {
    /// Converts this entry to a core field.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownType`] if `type` is not supported.
    pub fn to_field(&self) -> Result<FieldSchema> {
        let value_type =
            parse_type_name(&self.type_name).ok_or_else(|| ConfigError::UnknownType {
                field: self.name.clone(),
                type_name: self.type_name.clone(),
            })?;

        let kind = match (value_type, self.repeatable) {
            (_, true) => FieldKind::Collector(value_type),
            (ValueType::Bool, false) => FieldKind::Bool,
            (_, false) => FieldKind::Scalar(value_type),
        };

        let mut field = FieldSchema::new(&self.name, kind).with_flags(&self.flags);
        field.default_value = self.default.clone();
        field.format = self.format.clone();
        field.help = self.help.clone();
        field.ignored = self.ignore;
        Ok(field)
    }

    /// Builds an entry from a core field.
    pub fn from_field(field: &FieldSchema) -> Self {
        Self {
            name: field.name.clone(),
            type_name: field.value_type().name().to_string(),
            repeatable: field.is_collector(),
            flags: field.aliases.join(" "),
            default: field.default_value.clone(),
            format: field.format.clone(),
            help: field.help.clone(),
            ignore: field.ignored,
        }
    }
}

fn parse_type_name(name: &str) -> Option<ValueType> {
    let value_type = match name.trim().to_ascii_lowercase().as_str() {
        "bool" => ValueType::Bool,
        "string" => ValueType::String,
        "int" => ValueType::Int,
        "float" => ValueType::Float,
        "time" => ValueType::Time,
        "duration" => ValueType::Duration,
        _ => return None,
    };
    Some(value_type)
}

/// A command description loaded from YAML or JSON.
///
/// # Examples
///
/// ```
/// use argbind_config::SchemaFile;
/// use argbind_core::ParseMode;
///
/// let file = SchemaFile::from_yaml_str(
///     "name: greet\nmode: fused\nfields:\n  - name: loud\n    type: bool\n    flags: -l\n",
/// )
/// .unwrap();
/// assert_eq!(file.mode, ParseMode::Fused);
///
/// let schema = file.to_schema().unwrap();
/// assert!(schema.lookup_flag("-l").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaFile {
    /// Command name, used in usage output.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub mode: ParseMode,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl SchemaFile {
    /// Creates an empty standard-mode schema file.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            mode: ParseMode::Standard,
            fields: Vec::new(),
        }
    }

    /// Builds a schema file describing an existing schema.
    pub fn from_schema(name: &str, schema: &Schema, mode: ParseMode) -> Self {
        Self {
            mode,
            fields: schema.fields().iter().map(FieldSpec::from_field).collect(),
            ..Self::new(name)
        }
    }

    /// Loads a schema file, choosing JSON for `.json` paths and YAML
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](ConfigError::Io) if the file cannot be read, or
    /// [`Json`](ConfigError::Json) / [`Yaml`](ConfigError::Yaml) if parsing
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(std::fs::File::open(path)?);
        let file: Self = if is_json(path) {
            serde_json::from_reader(reader)?
        } else {
            serde_yaml::from_reader(reader)?
        };
        debug!(
            path = %path.display(),
            name = %file.name,
            fields = file.fields.len(),
            "Loaded schema file"
        );
        Ok(file)
    }

    /// Saves the schema file, as JSON for `.json` paths and YAML otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](ConfigError::Io) if the file cannot be written, or a
    /// serialization error.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let writer = BufWriter::new(std::fs::File::create(path)?);
        if is_json(path) {
            serde_json::to_writer_pretty(writer, self)?;
        } else {
            serde_yaml::to_writer(writer, self)?;
        }
        debug!(path = %path.display(), name = %self.name, "Saved schema file");
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Converts every non-ignored field and builds a validated [`Schema`].
    ///
    /// # Errors
    ///
    /// Returns [`UnknownType`](ConfigError::UnknownType) for an unsupported
    /// type name, or [`Schema`](ConfigError::Schema) if validation fails.
    pub fn to_schema(&self) -> Result<Schema> {
        let fields = self
            .fields
            .iter()
            .filter(|spec| !spec.ignore)
            .map(FieldSpec::to_field)
            .collect::<Result<Vec<_>>>()?;
        Ok(Schema::new(fields)?)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
