//! JSON input side of the flattener.
//!
//! # Architecture
//!
//! - [`limits`] - Optional size and depth limits for untrusted input
//! - [`parser`] - `serde_json` parsing with document-ordered objects
//! - [`node`] - Object/scalar view over the parsed tree
//!
//! # Example
//!
//! ```
//! use jsonflat::json::{parse, JsonNode, NodeKind};
//!
//! let value = parse(r#"{"b": 2, "a": [1]}"#).unwrap();
//! let root = JsonNode::new(&value);
//! assert_eq!(root.kind(), NodeKind::Object);
//!
//! let rendered: Vec<(&str, String)> = root
//!     .children()
//!     .map(|(key, child)| (key, child.render("null")))
//!     .collect();
//! assert_eq!(rendered, vec![("b", "2".to_string()), ("a", "[1]".to_string())]);
//! ```

pub mod limits;
pub mod node;
pub mod parser;

// Re-export commonly used items
pub use limits::Limits;
pub use node::{Children, JsonNode, NodeKind};
pub use parser::{parse, parse_with_limits};
