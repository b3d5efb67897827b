//! Flag/positional resolution.
//!
//! [`process_tokens`] splits the stream on the first end-of-options marker;
//! [`process_maybe_flags`] runs the resolver state machine over the part
//! before it.
//!
//! The resolver keeps a queue of unread tokens and a pending token. Each
//! step chops the pending token into key and remainder and looks the key
//! up:
//!
//! | boolean | remainder | outcome                                        |
//! |---------|-----------|------------------------------------------------|
//! | yes     | empty     | complete                                       |
//! | no      | non-empty | complete, remainder is the value               |
//! | yes     | non-empty | compound: `-` + remainder becomes pending      |
//! | no      | empty     | incomplete: value is the default (fused mode) or the next token |
//!
//! Within a compound chain every key must resolve; outside one, unknown
//! keys leave the whole token as a positional.

use tracing::trace;

use crate::classify::{END_OF_OPTIONS, chop_token};
use crate::error::{ParseError, Result};
use crate::schema::Schema;
use crate::types::{FieldSchema, ParseMode};

/// A flag matched to its field, with the raw value to convert.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment<'s> {
    /// Destination field.
    pub field: &'s FieldSchema,
    /// The flag spelling that matched.
    pub flag: String,
    /// Raw value; empty for booleans.
    pub value: String,
}

/// Output of flag resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolved<'s> {
    /// Flag assignments in encounter order.
    pub assignments: Vec<Assignment<'s>>,
    /// Tokens left for the positional fields, in order.
    pub positionals: Vec<String>,
}

/// Resolves a full token stream, honoring the end-of-options marker.
///
/// Tokens after the first `--` are appended to the positionals verbatim,
/// even if they look like flags. The marker itself is dropped.
///
/// # Examples
///
/// ```
/// use argbind_core::*;
///
/// let schema = Schema::builder()
///     .field(FieldSchema::scalar("count", ValueType::Int).with_flag("-c"))
///     .build()
///     .unwrap();
///
/// let resolved = process_tokens(&schema, &["-c", "3", "x", "--", "-c", "4"], ParseMode::Standard)
///     .unwrap();
/// assert_eq!(resolved.assignments.len(), 1);
/// assert_eq!(resolved.assignments[0].value, "3");
/// assert_eq!(resolved.positionals, vec!["x", "-c", "4"]);
/// ```
pub fn process_tokens<'s, S: AsRef<str>>(
    schema: &'s Schema,
    tokens: &[S],
    mode: ParseMode,
) -> Result<Resolved<'s>> {
    let end = tokens
        .iter()
        .position(|token| token.as_ref() == END_OF_OPTIONS)
        .unwrap_or(tokens.len());

    let mut resolved = process_maybe_flags(schema, &tokens[..end], mode)?;
    if let Some(rest) = tokens.get(end + 1..) {
        resolved
            .positionals
            .extend(rest.iter().map(|token| token.as_ref().to_string()));
    }
    Ok(resolved)
}

/// Resolves tokens that may be flags, flag values or positionals.
///
/// # Errors
///
/// - [`ParseError::UnknownCompoundFlag`] if a compound chain hits a key
///   that is not a known flag.
/// - [`ParseError::InsufficientTokens`] if, in standard mode, a flag needs
///   a value and no token is left.
pub fn process_maybe_flags<'s, S: AsRef<str>>(
    schema: &'s Schema,
    tokens: &[S],
    mode: ParseMode,
) -> Result<Resolved<'s>> {
    let mut resolved = Resolved::default();
    let mut queue = tokens.iter().map(S::as_ref);
    let mut pending: Option<String> = None;
    let mut in_compound = false;

    loop {
        let token = match pending.take() {
            Some(token) => token,
            None => match queue.next() {
                Some(token) => {
                    in_compound = false;
                    token.to_string()
                }
                None => break,
            },
        };

        let (key, rest) = chop_token(&token);
        let Some(field) = schema.lookup_flag(key) else {
            if in_compound {
                return Err(ParseError::UnknownCompoundFlag {
                    flag: key.to_string(),
                    token: token.clone(),
                });
            }
            trace!(token = %token, "positional token");
            resolved.positionals.push(token);
            continue;
        };

        let is_boolean = field.is_boolean();
        let value = if is_boolean == rest.is_empty() {
            rest.to_string()
        } else if is_boolean {
            // Peel one boolean off; the rest is always re-read as a short flag.
            pending = Some(format!("-{rest}"));
            in_compound = true;
            String::new()
        } else {
            match mode {
                ParseMode::Fused => field.default_str().to_string(),
                ParseMode::Standard => queue
                    .next()
                    .ok_or_else(|| ParseError::InsufficientTokens {
                        flag: key.to_string(),
                    })?
                    .to_string(),
            }
        };

        trace!(flag = key, field = %field.name, value = %value, "resolved flag");
        resolved.assignments.push(Assignment {
            field,
            flag: key.to_string(),
            value,
        });
    }

    Ok(resolved)
}
