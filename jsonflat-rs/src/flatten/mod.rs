//! Flattening of nested JSON objects into ordered `(path, value)` pairs.
//!
//! Every non-object value reachable from the root through objects becomes one
//! [`FlatPair`]. Objects only contribute path segments, so an empty object
//! produces nothing. Arrays are not descended into; they are emitted as their
//! compact JSON text. A root that is not an object yields an empty sequence.
//!
//! Pairs are emitted in pre-order depth-first order with object members in
//! document order. The walk itself keeps its frames on the heap; parsed input
//! is bounded by serde_json's nesting limit of 128, and by
//! [`Limits`](crate::json::Limits) when set.
//!
//! # Example
//!
//! ```
//! use jsonflat::{flatten, FlatPair};
//!
//! let pairs = flatten(r#"{"a": 1, "b": {"c": 2, "d": 3}}"#).unwrap();
//! assert_eq!(
//!     pairs,
//!     vec![
//!         FlatPair::new("a", "1"),
//!         FlatPair::new("b,c", "2"),
//!         FlatPair::new("b,d", "3"),
//!     ]
//! );
//! ```

pub mod options;
pub mod path;

pub use options::{FlattenOptions, DEFAULT_DELIMITER, DEFAULT_NULL_TEXT};
pub use path::PathKey;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::FlattenResult;
use crate::json::{parse_with_limits, Children, JsonNode};

/// One flattened leaf.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlatPair {
    /// Object keys from the root to the leaf, joined with the delimiter.
    pub path: String,
    /// Textual rendering of the leaf value.
    pub value: String,
}

impl FlatPair {
    /// Create a pair.
    pub fn new(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }
}

impl From<FlatPair> for (String, String) {
    fn from(pair: FlatPair) -> Self {
        (pair.path, pair.value)
    }
}

/// The alternating `path, value, path, value, ...` sequence used by
/// list-oriented hosts.
pub fn alternating(pairs: &[FlatPair]) -> impl Iterator<Item = &str> + '_ {
    pairs
        .iter()
        .flat_map(|pair| [pair.path.as_str(), pair.value.as_str()])
}

/// Reusable flattener bound to a set of options.
#[derive(Debug, Clone, Default)]
pub struct Flattener {
    options: FlattenOptions,
}

impl Flattener {
    /// Create a flattener with the given options.
    pub fn new(options: FlattenOptions) -> Self {
        Self { options }
    }

    /// Options in effect.
    pub fn options(&self) -> &FlattenOptions {
        &self.options
    }

    /// Parse `input` and flatten it.
    ///
    /// Fails with `InvalidJson` if the input does not parse; no partial output
    /// is ever returned.
    pub fn flatten(&self, input: &str) -> FlattenResult<Vec<FlatPair>> {
        flatten_with(input, &self.options)
    }
}

/// Flatten `input` with default options.
pub fn flatten(input: &str) -> FlattenResult<Vec<FlatPair>> {
    flatten_with(input, &FlattenOptions::default())
}

/// Flatten `input` with the given options.
pub fn flatten_with(input: &str, options: &FlattenOptions) -> FlattenResult<Vec<FlatPair>> {
    let value = parse_with_limits(input, options.limits)?;
    flatten_value(&value, options)
}

/// Flatten an already parsed tree with the given options.
pub fn flatten_value(value: &Value, options: &FlattenOptions) -> FlattenResult<Vec<FlatPair>> {
    let root = JsonNode::new(value);
    if !root.is_object() {
        debug!(kind = ?root.kind(), "root is not an object, nothing to flatten");
        return Ok(Vec::new());
    }

    let pairs = walk(root, options)?;
    debug!(pairs = pairs.len(), "flattened document");
    Ok(pairs)
}

/// One object being iterated, and the path length of its prefix.
struct Frame<'a> {
    children: Children<'a>,
    base: usize,
}

/// Pre-order walk over `root` using an explicit stack.
fn walk(root: JsonNode<'_>, options: &FlattenOptions) -> FlattenResult<Vec<FlatPair>> {
    let mut pairs = Vec::new();
    let mut path = PathKey::new();
    let mut stack = vec![Frame {
        children: root.children(),
        base: 0,
    }];
    options.limits.check_depth(stack.len())?;

    while let Some(frame) = stack.last_mut() {
        let base = frame.base;
        let Some((key, child)) = frame.children.next() else {
            stack.pop();
            continue;
        };

        path.truncate(base);
        path.push(key, &options.delimiter);

        match child {
            JsonNode::Object(_) => {
                stack.push(Frame {
                    children: child.children(),
                    base: path.len(),
                });
                options.limits.check_depth(stack.len())?;
                trace!(path = path.as_str(), depth = stack.len(), "entering object");
            }
            JsonNode::Scalar(_) => {
                pairs.push(FlatPair::new(
                    path.as_str(),
                    child.render(&options.null_text),
                ));
            }
        }
    }

    Ok(pairs)
}
