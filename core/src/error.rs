//! Error types for token parsing.
//!
//! Every failure aborts the parse and is returned to the caller. Fields
//! written before the failing step keep their values; nothing is rolled back.

use thiserror::Error;

use crate::convert::ConversionError;
use crate::validate::SchemaError;

/// Errors that can occur while parsing a token stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The schema itself is invalid.
    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),

    /// A character group inside a compound short flag is not a known flag.
    #[error("unexpected {flag} in compound flag {token}")]
    UnknownCompoundFlag {
        /// The unresolved key.
        flag: String,
        /// The synthesized token it was chopped from.
        token: String,
    },

    /// A flag needs a value but the token stream is exhausted.
    #[error("not enough tokens: {flag} requires a value")]
    InsufficientTokens { flag: String },

    /// A token or default could not be converted.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// The positional token count does not fit the positional slots.
    #[error(
        "expected {}{expected} positional argument(s), found {found}",
        arity_prefix(.variadic)
    )]
    ArityMismatch {
        /// Number of non-collector positional slots.
        expected: usize,
        /// Whether a collector can absorb extra tokens.
        variadic: bool,
        /// Number of positional tokens left after flag resolution.
        found: usize,
    },

    /// The destination refused a write.
    #[error(transparent)]
    Destination(#[from] DestinationError),
}

fn arity_prefix(variadic: &bool) -> &'static str {
    if *variadic { "at least " } else { "" }
}

/// Errors raised by a [`Destination`](crate::Destination) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DestinationError {
    /// The destination has no slot with this name.
    #[error("unknown field: {0}")]
    UnknownField(String),
    /// The slot cannot hold the written value.
    #[error("field {field} cannot hold a {found} value")]
    TypeMismatch { field: String, found: String },
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T, E = ParseError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_messages() {
        let exact = ParseError::ArityMismatch {
            expected: 2,
            variadic: false,
            found: 3,
        };
        assert_eq!(exact.to_string(), "expected 2 positional argument(s), found 3");

        let variadic = ParseError::ArityMismatch {
            expected: 2,
            variadic: true,
            found: 1,
        };
        assert_eq!(
            variadic.to_string(),
            "expected at least 2 positional argument(s), found 1"
        );
    }
}
