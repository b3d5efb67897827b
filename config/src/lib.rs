//! Schema files for argbind.
//!
//! Loads command descriptions from YAML or JSON and turns them into a
//! validated [`argbind_core::Schema`].
//!
//! # Quick start
//!
//! ```no_run
//! use argbind_config::SchemaFile;
//! use argbind_core::parse_values;
//!
//! let file = SchemaFile::load("tail.yaml").unwrap();
//! let schema = file.to_schema().unwrap();
//! let values = parse_values(&schema, &["-n", "5", "log.txt"], file.mode).unwrap();
//! println!("{}", values.get_int("lines").unwrap_or_default());
//! ```

mod error;
mod schema_file;

pub use error::{ConfigError, Result};
pub use schema_file::{FieldSpec, SchemaFile};
