//! jsonflat - flatten nested JSON objects into ordered `(path, value)` pairs.
//!
//! Nested object keys are joined into one composite path (comma-delimited by
//! default) and every non-object leaf becomes one pair, in document order.
//!
//! # Architecture
//!
//! - [`json`] - Parsing, limits, and the object/scalar node view
//! - [`flatten`] - The flattening walk, path building, and options
//! - [`output`] - Line, JSON, and Tcl-list renderings of the result
//! - [`conformance`] - Golden-vector corpus runner
//! - [`error`] - Error codes
//!
//! # Example
//!
//! ```
//! use jsonflat::{flatten, FlattenError};
//!
//! let pairs = flatten(r#"{"user": {"name": "ada", "id": 7}}"#).unwrap();
//! assert_eq!(pairs[0].path, "user,name");
//! assert_eq!(pairs[1].value, "7");
//!
//! assert!(matches!(flatten("{not json"), Err(FlattenError::InvalidJson(_))));
//! ```

// Library code reports failures through FlattenError, never by panicking.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod conformance;
pub mod error;
pub mod flatten;
pub mod json;
pub mod output;

// Re-export commonly used types
pub use error::{FlattenError, FlattenResult};
pub use flatten::{flatten, flatten_value, flatten_with, FlatPair, FlattenOptions, Flattener};
pub use json::Limits;
pub use output::OutputFormat;
