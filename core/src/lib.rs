//! Declarative command-line token parsing.
//!
//! This crate turns a list of string tokens into typed field values,
//! driven by an explicit [`Schema`]:
//!
//! - [`FieldSchema`]: one destination slot with a name, a [`FieldKind`]
//!   (boolean, scalar or repeatable collector), flag aliases, an optional
//!   default, a time format and help text.
//! - [`Schema`]: a validated set of fields, split into options (fields with
//!   aliases) and ordered positionals.
//! - [`Destination`]: the sink that receives converted [`Value`]s.
//!   [`ParsedValues`] is a ready-made dynamic implementation.
//!
//! Parsing runs in one of two [`ParseMode`]s. In standard mode a flag's
//! value may be fused (`-c9`, `--count=9`) or given as the next token, and
//! option defaults are applied up front. In fused mode values must be
//! fused; a flag given alone takes its default.
//!
//! Short boolean flags may be combined (`-abc3` is `-a -b -c3`), and every
//! token after the first `--` is positional.
//!
//! # Example
//!
//! ```
//! use argbind_core::*;
//!
//! let schema = Schema::builder()
//!     .field(FieldSchema::boolean("verbose").with_flags("-v --verbose"))
//!     .field(FieldSchema::scalar("lines", ValueType::Int).with_flags("-n --lines").with_default("10"))
//!     .field(FieldSchema::scalar("source", ValueType::String))
//!     .field(FieldSchema::collector("files", ValueType::String))
//!     .build()
//!     .unwrap();
//!
//! let values = parse_values(&schema, &["-vn", "5", "in.txt", "a", "b"], ParseMode::Standard).unwrap();
//! assert_eq!(values.get_bool("verbose"), Some(true));
//! assert_eq!(values.get_int("lines"), Some(5));
//! assert_eq!(values.get_str("source"), Some("in.txt"));
//! assert_eq!(values.get_all("files").map(<[Value]>::len), Some(2));
//! ```

mod assign;
mod classify;
mod convert;
mod error;
mod parse;
mod positional;
mod resolve;
mod schema;
mod types;
mod usage;
mod validate;

pub use assign::{
    Destination, ParsedValues, Slot, populate_defaults, populate_field, populate_options,
};
pub use classify::{END_OF_OPTIONS, chop_token};
pub use convert::{
    ConversionError, convert, convert_field, format_duration, parse_duration, parse_time,
};
pub use error::{DestinationError, ParseError, Result};
pub use parse::{parse, parse_env, parse_env_fused, parse_fused, parse_values, parse_with_mode};
pub use positional::populate_positionals;
pub use resolve::{Assignment, Resolved, process_maybe_flags, process_tokens};
pub use schema::{Schema, SchemaBuilder};
pub use types::*;
pub use usage::{
    format_help, short_usage, usage, write_short_usage, write_usage, write_values,
    write_values_with_schema,
};
pub use validate::{SchemaError, is_valid_flag, validate_fields};
