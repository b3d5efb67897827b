//! Parse entry points.
//!
//! Each entry point runs the full pipeline: defaults (standard mode only),
//! flag resolution, option assignment, then positional distribution.

use crate::assign::{Destination, ParsedValues, populate_defaults, populate_options};
use crate::error::Result;
use crate::positional::populate_positionals;
use crate::resolve::process_tokens;
use crate::schema::Schema;
use crate::types::ParseMode;

/// Parses `tokens` into `dest` using the given mode.
///
/// On error, fields already written keep their values.
pub fn parse_with_mode<S, D>(
    schema: &Schema,
    tokens: &[S],
    mode: ParseMode,
    dest: &mut D,
) -> Result<()>
where
    S: AsRef<str>,
    D: Destination + ?Sized,
{
    if mode == ParseMode::Standard {
        populate_defaults(schema, dest)?;
    }

    let resolved = process_tokens(schema, tokens, mode)?;
    populate_options(&resolved.assignments, dest)?;
    populate_positionals(&schema.positionals(), &resolved.positionals, dest)
}

/// Parses `tokens` in standard mode.
pub fn parse<S, D>(schema: &Schema, tokens: &[S], dest: &mut D) -> Result<()>
where
    S: AsRef<str>,
    D: Destination + ?Sized,
{
    parse_with_mode(schema, tokens, ParseMode::Standard, dest)
}

/// Parses `tokens` in fused mode.
///
/// # Examples
///
/// ```
/// use argbind_core::*;
///
/// let schema = Schema::builder()
///     .field(FieldSchema::scalar("c", ValueType::Int).with_flag("+C").with_default("7"))
///     .build()
///     .unwrap();
///
/// let mut values = ParsedValues::new(&schema);
/// parse_fused(&schema, &["+C"], &mut values).unwrap();
/// assert_eq!(values.get_int("c"), Some(7));
///
/// // Standard mode wants the value in the next token.
/// let mut values = ParsedValues::new(&schema);
/// assert!(parse(&schema, &["+C"], &mut values).is_err());
/// ```
pub fn parse_fused<S, D>(schema: &Schema, tokens: &[S], dest: &mut D) -> Result<()>
where
    S: AsRef<str>,
    D: Destination + ?Sized,
{
    parse_with_mode(schema, tokens, ParseMode::Fused, dest)
}

/// Parses into a fresh [`ParsedValues`].
pub fn parse_values<S: AsRef<str>>(
    schema: &Schema,
    tokens: &[S],
    mode: ParseMode,
) -> Result<ParsedValues> {
    let mut values = ParsedValues::new(schema);
    parse_with_mode(schema, tokens, mode, &mut values)?;
    Ok(values)
}

/// Parses the process arguments (without the program name) in standard
/// mode. Non-UTF-8 arguments are converted lossily.
pub fn parse_env<D: Destination + ?Sized>(schema: &Schema, dest: &mut D) -> Result<()> {
    parse(schema, &env_tokens(), dest)
}

/// Parses the process arguments in fused mode.
pub fn parse_env_fused<D: Destination + ?Sized>(schema: &Schema, dest: &mut D) -> Result<()> {
    parse_fused(schema, &env_tokens(), dest)
}

fn env_tokens() -> Vec<String> {
    std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::types::{FieldSchema, Value, ValueType};

    fn schema() -> Schema {
        Schema::builder()
            .field(FieldSchema::boolean("all").with_flags("-a --all"))
            .field(
                FieldSchema::scalar("count", ValueType::Int)
                    .with_flags("+c --count")
                    .with_default("3"),
            )
            .field(FieldSchema::collector("verbose", ValueType::Bool).with_flag("-v"))
            .field(FieldSchema::collector("tag", ValueType::String).with_flag("-t"))
            .field(FieldSchema::scalar("first", ValueType::String))
            .field(FieldSchema::collector("rest", ValueType::Int))
            .build()
            .unwrap()
    }

    #[test]
    fn test_standard_mode_applies_defaults() {
        let values = parse_values(&schema(), &["x"], ParseMode::Standard).unwrap();
        assert_eq!(values.get_int("count"), Some(3));
        assert_eq!(values.get_bool("all"), Some(false));
        assert_eq!(values.get_str("first"), Some("x"));
        assert!(values.get_all("rest").is_none());
        assert!(values.get_all("tag").is_none());
    }

    #[test]
    fn test_fused_mode_leaves_absent_flags_zero() {
        let values = parse_values(&schema(), &["x"], ParseMode::Fused).unwrap();
        assert_eq!(values.get_int("count"), Some(0));

        let values = parse_values(&schema(), &["+c", "x"], ParseMode::Fused).unwrap();
        assert_eq!(values.get_int("count"), Some(3));
    }

    #[test]
    fn test_last_flag_wins() {
        let tokens = ["+c", "7", "+c", "9", "x"];
        let values = parse_values(&schema(), &tokens, ParseMode::Standard).unwrap();
        assert_eq!(values.get_int("count"), Some(9));
    }

    #[test]
    fn test_verbosity_counting() {
        let values = parse_values(&schema(), &["-v", "-vav", "x"], ParseMode::Standard).unwrap();
        assert_eq!(values.get_all("verbose").map(<[Value]>::len), Some(3));
        assert_eq!(values.get_bool("all"), Some(true));
    }

    #[test]
    fn test_full_command_line() {
        let tokens = ["-t", "a", "--count=5", "x", "1", "-t", "b", "--", "-2", "--all"];
        let result = parse_values(&schema(), &tokens, ParseMode::Standard);
        // "--all" after the marker is positional and not an int.
        assert!(matches!(result, Err(ParseError::Conversion(_))));

        let tokens = ["-t", "a", "--count=5", "x", "1", "-t", "b", "--", "-2"];
        let values = parse_values(&schema(), &tokens, ParseMode::Standard).unwrap();
        assert_eq!(values.get_int("count"), Some(5));
        assert_eq!(values.get_str("first"), Some("x"));
        assert_eq!(
            values.get_all("tag"),
            Some(&[Value::String("a".into()), Value::String("b".into())][..])
        );
        assert_eq!(values.get_all("rest"), Some(&[Value::Int(1), Value::Int(-2)][..]));
    }

    #[test]
    fn test_missing_positional_is_arity_error() {
        let err = parse_values(&schema(), &["-a"], ParseMode::Standard).unwrap_err();
        assert_eq!(
            err,
            ParseError::ArityMismatch {
                expected: 1,
                variadic: true,
                found: 0,
            }
        );
    }

    #[test]
    fn test_compound_matches_separate_tokens() {
        let schema = Schema::builder()
            .field(FieldSchema::boolean("a").with_flag("-a"))
            .field(FieldSchema::boolean("b").with_flag("-b"))
            .field(FieldSchema::scalar("c", ValueType::Int).with_flag("-c"))
            .build()
            .unwrap();

        let compound = parse_values(&schema, &["-abc3"], ParseMode::Standard).unwrap();
        let separate = parse_values(&schema, &["-a", "-b", "-c3"], ParseMode::Standard).unwrap();
        assert_eq!(compound, separate);
        assert_eq!(compound.get_int("c"), Some(3));
    }
}
