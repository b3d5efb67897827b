//! Schema validation.
//!
//! Validates the structural invariants of a field list before it becomes a
//! [`Schema`](crate::Schema): flag spelling syntax, globally unique flags and
//! names, allowed field kinds, and at most one positional collector.
//!
//! # Examples
//!
//! ```
//! use argbind_core::*;
//!
//! let fields = vec![
//!     FieldSchema::boolean("verbose").with_flags("-v --verbose"),
//!     FieldSchema::collector("files", ValueType::String),
//! ];
//! assert!(validate_fields(&fields).is_empty());
//!
//! // Long flags need at least two characters after the prefix
//! let bad = vec![FieldSchema::boolean("b").with_flag("--b")];
//! assert_eq!(
//!     validate_fields(&bad),
//!     vec![SchemaError::MalformedFlag("--b".to_string())]
//! );
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::types::{FieldKind, FieldSchema, ValueType};

static SHORT_FLAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+][0-9A-Za-z]$").expect("static regex must compile"));
// The first character after `--` must not be a hyphen.
static LONG_FLAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^--[0-9A-Za-z][0-9A-Za-z-]+$").expect("static regex must compile")
});

/// Schema construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Flag spelling is neither `-x`/`+x` nor `--name`.
    #[error("malformed flag: {0}")]
    MalformedFlag(String),
    /// The same flag spelling is bound more than once.
    #[error("duplicate flag: {0}")]
    DuplicateFlag(String),
    /// Two fields share a name.
    #[error("duplicate field: {0}")]
    DuplicateField(String),
    /// A field name is empty or whitespace-only.
    #[error("field name cannot be empty")]
    EmptyFieldName,
    /// The field's kind or attributes are not permitted.
    #[error("field {field}: {reason}")]
    DisallowedKind { field: String, reason: String },
    /// More than one positional field is a collector.
    #[error("at most one positional field may be a collector: {first}, {second}")]
    MultipleCollectors { first: String, second: String },
}

/// Returns `true` if `flag` is a well-formed short or long flag.
///
/// # Examples
///
/// ```
/// use argbind_core::is_valid_flag;
///
/// assert!(is_valid_flag("-b"));
/// assert!(is_valid_flag("+1"));
/// assert!(is_valid_flag("--a-b"));
/// assert!(!is_valid_flag("-bbb"));
/// assert!(!is_valid_flag("---a"));
/// ```
pub fn is_valid_flag(flag: &str) -> bool {
    SHORT_FLAG_RE.is_match(flag) || LONG_FLAG_RE.is_match(flag)
}

/// Validates a field list. Ignored fields are skipped entirely.
///
/// Returns the first problem found, or an empty vector.
pub fn validate_fields(fields: &[FieldSchema]) -> Vec<SchemaError> {
    let mut errors = Vec::new();
    let mut names = HashSet::new();
    let mut flags = HashSet::new();
    let mut collector: Option<&str> = None;

    for field in fields.iter().filter(|field| !field.ignored) {
        let name = field.name.trim();
        if name.is_empty() {
            errors.push(SchemaError::EmptyFieldName);
            return errors;
        }
        if !names.insert(name) {
            errors.push(SchemaError::DuplicateField(name.to_string()));
            return errors;
        }

        if let Some(err) = validate_kind(field) {
            errors.push(err);
            return errors;
        }

        for flag in &field.aliases {
            if !is_valid_flag(flag) {
                errors.push(SchemaError::MalformedFlag(flag.clone()));
                return errors;
            }
            if !flags.insert(flag.as_str()) {
                errors.push(SchemaError::DuplicateFlag(flag.clone()));
                return errors;
            }
        }

        if field.is_positional() && field.is_collector() {
            if let Some(first) = collector {
                errors.push(SchemaError::MultipleCollectors {
                    first: first.to_string(),
                    second: name.to_string(),
                });
                return errors;
            }
            collector = Some(name);
        }
    }

    errors
}

fn validate_kind(field: &FieldSchema) -> Option<SchemaError> {
    let reason = match field.kind {
        FieldKind::Scalar(ValueType::Bool) => "single boolean fields must use the bool kind",
        _ if field.is_boolean() && field.format_str().is_some() => {
            "boolean fields cannot carry a format"
        }
        _ => return None,
    };
    Some(SchemaError::DisallowedKind {
        field: field.name.clone(),
        reason: reason.to_string(),
    })
}
