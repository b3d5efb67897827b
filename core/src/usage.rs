//! Usage and value rendering.
//!
//! Help text may mark the argument name between asterisks, e.g.
//! `"number of *lines* to show"` renders the argument as `lines` and the
//! help as `number of lines to show`.

use std::io::{self, Write};
use std::sync::LazyLock;

use regex::Regex;

use crate::assign::{ParsedValues, Slot};
use crate::schema::Schema;
use crate::types::FieldSchema;

static HELP_ARGUMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*.+?\*").expect("static regex must compile"));

/// Splits a field's help into display text and argument name.
///
/// The first `*term*` in the help becomes the argument name and every `*`
/// is removed from the text. Without a term, the argument name is the
/// value type name. With `use_name`, empty help falls back to the field
/// name.
///
/// # Examples
///
/// ```
/// use argbind_core::{FieldSchema, ValueType, format_help};
///
/// let field = FieldSchema::scalar("n", ValueType::Int).with_help("show *lines* of output");
/// assert_eq!(format_help(&field, false), ("show lines of output".to_string(), "lines".to_string()));
///
/// let bare = FieldSchema::scalar("n", ValueType::Int);
/// assert_eq!(format_help(&bare, true), ("n".to_string(), "int".to_string()));
/// ```
pub fn format_help(field: &FieldSchema, use_name: bool) -> (String, String) {
    let raw = field.help.as_deref().unwrap_or("");
    let (help, argname) = match HELP_ARGUMENT_RE.find(raw) {
        Some(term) => (
            raw.replace('*', ""),
            term.as_str().trim_matches('*').to_string(),
        ),
        None => (raw.to_string(), field.value_type().name().to_string()),
    };

    if help.is_empty() && use_name {
        return (field.name.clone(), argname);
    }
    (help, argname)
}

/// Option fields ordered by their first alias, shortest first.
fn sorted_options(schema: &Schema) -> Vec<&FieldSchema> {
    let mut options: Vec<&FieldSchema> = schema.option_fields().collect();
    options.sort_by(|a, b| {
        let (a, b) = (&a.aliases[0], &b.aliases[0]);
        a.len().cmp(&b.len()).then(a.cmp(b))
    });
    options
}

/// Writes a one-line synopsis.
///
/// # Examples
///
/// ```
/// use argbind_core::*;
///
/// let schema = Schema::builder()
///     .field(FieldSchema::boolean("all").with_flags("-a --all"))
///     .field(FieldSchema::collector("files", ValueType::String).with_help("input *file*"))
///     .build()
///     .unwrap();
///
/// assert_eq!(short_usage(&schema), "[-a|--all] [file]+ \n");
/// ```
pub fn write_short_usage<W: Write + ?Sized>(w: &mut W, schema: &Schema) -> io::Result<()> {
    for field in sorted_options(schema) {
        write!(w, "[{}", field.aliases.join("|"))?;
        if !field.is_boolean() {
            let (_, argname) = format_help(field, false);
            write!(w, " {argname}")?;
        }
        write!(w, "]{} ", repeat_marker(field))?;
    }

    for field in schema.positionals() {
        let (_, argname) = format_help(field, true);
        write!(w, "[{argname}]{} ", repeat_marker(field))?;
    }

    writeln!(w)
}

fn repeat_marker(field: &FieldSchema) -> &'static str {
    if field.is_collector() { "+" } else { "" }
}

/// Writes one entry per option and positional, with help text.
pub fn write_usage<W: Write + ?Sized>(w: &mut W, schema: &Schema) -> io::Result<()> {
    for field in sorted_options(schema) {
        write!(w, "    ")?;
        for flag in &field.aliases {
            write!(w, "{flag} ")?;
        }

        let (help, argname) = format_help(field, false);
        if !field.is_boolean() {
            match field.default_value.as_deref().filter(|d| !d.is_empty()) {
                Some(default) => write!(w, "[{argname}={default}]")?,
                None => write!(w, "[{argname}]")?,
            }
        }
        if field.is_collector() {
            write!(w, " (repeatable)")?;
        }
        if !help.is_empty() {
            write!(w, "\n       {help}")?;
        }
        writeln!(w)?;
    }

    for field in schema.positionals() {
        let (help, argname) = format_help(field, true);
        write!(w, "    [{argname}] ")?;
        if field.is_collector() {
            write!(w, "(repeatable) ")?;
        }
        writeln!(w, "{help}")?;
    }

    Ok(())
}

/// Renders [`write_short_usage`] to a string.
pub fn short_usage(schema: &Schema) -> String {
    let mut buf = Vec::new();
    // Writing to a Vec cannot fail.
    let _ = write_short_usage(&mut buf, schema);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Renders [`write_usage`] to a string.
pub fn usage(schema: &Schema) -> String {
    let mut buf = Vec::new();
    let _ = write_usage(&mut buf, schema);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Writes an aligned table of field name, type and current value.
///
/// Collectors print as `[a b c]`; a collector never written prints `[]`.
pub fn write_values<W: Write + ?Sized>(
    w: &mut W,
    schema: &Schema,
    values: &ParsedValues,
) -> io::Result<()> {
    write_value_rows(w, schema, values, false)
}

/// Like [`write_values`], with a fourth column listing each field's schema
/// attributes (`flags`, `default`, `format`, `help`).
///
/// # Examples
///
/// ```
/// use argbind_core::*;
///
/// let schema = Schema::builder()
///     .field(FieldSchema::scalar("n", ValueType::Int).with_flag("-n").with_default("3"))
///     .build()
///     .unwrap();
/// let values = parse_values(&schema, &["-n", "5"], ParseMode::Standard).unwrap();
///
/// let mut buf = Vec::new();
/// write_values_with_schema(&mut buf, &schema, &values).unwrap();
/// assert_eq!(String::from_utf8(buf).unwrap(), "n   int   5   flags=\"-n\" default=\"3\"\n");
/// ```
pub fn write_values_with_schema<W: Write + ?Sized>(
    w: &mut W,
    schema: &Schema,
    values: &ParsedValues,
) -> io::Result<()> {
    write_value_rows(w, schema, values, true)
}

fn write_value_rows<W: Write + ?Sized>(
    w: &mut W,
    schema: &Schema,
    values: &ParsedValues,
    with_schema: bool,
) -> io::Result<()> {
    let rows: Vec<(&FieldSchema, String, String)> = schema
        .fields()
        .iter()
        .map(|field| {
            let type_label = if field.is_collector() {
                format!("[]{}", field.value_type())
            } else {
                field.value_type().to_string()
            };
            let value = match values.slot(&field.name) {
                Some(Slot::Scalar(value)) => value.to_string(),
                Some(Slot::Collector(items)) => {
                    let items: Vec<String> = items.iter().map(ToString::to_string).collect();
                    format!("[{}]", items.join(" "))
                }
                None if field.is_collector() => "[]".to_string(),
                None => field.value_type().zero().to_string(),
            };
            (field, type_label, value)
        })
        .collect();

    let name_width = rows.iter().map(|row| row.0.name.len()).max().unwrap_or(0);
    let type_width = rows.iter().map(|row| row.1.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|row| row.2.chars().count()).max().unwrap_or(0);
    for (field, type_label, value) in rows {
        let name = &field.name;
        if with_schema {
            let attributes = schema_attributes(field);
            writeln!(
                w,
                "{name:<name_width$}   {type_label:<type_width$}   {value:<value_width$}   {attributes}"
            )?;
        } else {
            writeln!(w, "{name:<name_width$}   {type_label:<type_width$}   {value}")?;
        }
    }
    Ok(())
}

fn schema_attributes(field: &FieldSchema) -> String {
    let mut attributes = Vec::new();
    if !field.aliases.is_empty() {
        attributes.push(format!("flags={:?}", field.aliases.join(" ")));
    }
    if let Some(default) = &field.default_value {
        attributes.push(format!("default={default:?}"));
    }
    if let Some(format) = &field.format {
        attributes.push(format!("format={format:?}"));
    }
    if let Some(help) = &field.help {
        attributes.push(format!("help={help:?}"));
    }
    attributes.join(" ")
}
