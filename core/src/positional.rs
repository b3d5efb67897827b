//! Distribution of leftover tokens over positional slots.

use tracing::trace;

use crate::assign::{Destination, populate_field};
use crate::error::{ParseError, Result};
use crate::types::FieldSchema;
use crate::validate::SchemaError;

/// Assigns positional tokens to positional slots.
///
/// Without a collector the token count must equal the slot count. With a
/// collector at index `p`, the first `p` tokens fill the slots before it,
/// the last tokens fill the slots after it, and the collector takes
/// whatever is left in the middle (possibly nothing).
///
/// # Errors
///
/// - [`ParseError::Schema`] if more than one slot is a collector.
/// - [`ParseError::ArityMismatch`] if the tokens cannot fill the slots.
/// - Any conversion or destination error from a single assignment.
///
/// # Examples
///
/// ```
/// use argbind_core::*;
///
/// let first = FieldSchema::scalar("first", ValueType::Int);
/// let rest = FieldSchema::collector("rest", ValueType::Int);
/// let last = FieldSchema::scalar("last", ValueType::Int);
/// let tokens: Vec<String> = ["-1", "1", "2", "3", "7"].map(String::from).to_vec();
///
/// let mut values = ParsedValues::default();
/// populate_positionals(&[&first, &rest, &last], &tokens, &mut values).unwrap();
/// assert_eq!(values.get_int("first"), Some(-1));
/// assert_eq!(values.get_all("rest").map(<[Value]>::len), Some(3));
/// assert_eq!(values.get_int("last"), Some(7));
/// ```
pub fn populate_positionals<D: Destination + ?Sized>(
    positionals: &[&FieldSchema],
    tokens: &[String],
    dest: &mut D,
) -> Result<()> {
    let mut collectors = positionals
        .iter()
        .enumerate()
        .filter(|(_, field)| field.is_collector());
    let collector = collectors.next();
    if let (Some((_, first)), Some((_, second))) = (collector, collectors.next()) {
        return Err(SchemaError::MultipleCollectors {
            first: first.name.clone(),
            second: second.name.clone(),
        }
        .into());
    }

    let Some((pos, _)) = collector else {
        if positionals.len() != tokens.len() {
            return Err(ParseError::ArityMismatch {
                expected: positionals.len(),
                variadic: false,
                found: tokens.len(),
            });
        }
        for (field, token) in positionals.iter().zip(tokens) {
            populate_field(field, token, dest)?;
        }
        return Ok(());
    };

    let before = pos;
    let after = positionals.len() - pos - 1;
    let Some(middle) = tokens.len().checked_sub(before + after) else {
        return Err(ParseError::ArityMismatch {
            expected: before + after,
            variadic: true,
            found: tokens.len(),
        });
    };
    trace!(before, middle, after, "distributing positionals");

    for (field, token) in positionals[..pos].iter().zip(&tokens[..before]) {
        populate_field(field, token, dest)?;
    }
    for token in &tokens[before..before + middle] {
        populate_field(positionals[pos], token, dest)?;
    }
    for (field, token) in positionals[pos + 1..].iter().zip(&tokens[before + middle..]) {
        populate_field(field, token, dest)?;
    }
    Ok(())
}
