//! Read-only node view over a parsed JSON tree.
//!
//! The flattener only distinguishes two kinds of node: objects, which it
//! descends into, and everything else. Arrays, numbers, strings, booleans and
//! null all collapse into [`JsonNode::Scalar`] and are emitted through their
//! textual rendering.

use serde_json::{map, Map, Value};

/// Kind of a node as seen by the flattener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// JSON object: contributes path segments, never a value.
    Object,
    /// Any non-object value, arrays included.
    Scalar,
}

/// Borrowed view of one node in a parsed tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JsonNode<'a> {
    /// Object members in document order.
    Object(&'a Map<String, Value>),
    /// Any non-object value.
    Scalar(&'a Value),
}

impl<'a> JsonNode<'a> {
    /// Classify a parsed value.
    pub fn new(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => JsonNode::Object(map),
            other => JsonNode::Scalar(other),
        }
    }

    /// Returns the kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            JsonNode::Object(_) => NodeKind::Object,
            JsonNode::Scalar(_) => NodeKind::Scalar,
        }
    }

    /// Returns true if this is an object node.
    pub fn is_object(&self) -> bool {
        matches!(self, JsonNode::Object(_))
    }

    /// Object members as `(key, child)` in document order.
    ///
    /// Yields nothing for a scalar node.
    pub fn children(&self) -> Children<'a> {
        match self {
            JsonNode::Object(map) => Children {
                inner: Some(map.iter()),
            },
            JsonNode::Scalar(_) => Children { inner: None },
        }
    }

    /// Textual rendering of the node's value.
    ///
    /// Strings render as their raw content, numbers and booleans with
    /// `serde_json`'s formatting, null as `null_text`, and arrays as compact
    /// JSON. Objects are never rendered by the flattener; they fall back to
    /// compact JSON as well.
    pub fn render(&self, null_text: &str) -> String {
        match self {
            JsonNode::Scalar(Value::Null) => null_text.to_string(),
            JsonNode::Scalar(Value::Bool(b)) => b.to_string(),
            JsonNode::Scalar(Value::Number(n)) => n.to_string(),
            JsonNode::Scalar(Value::String(s)) => s.clone(),
            JsonNode::Scalar(value) => value.to_string(),
            JsonNode::Object(map) => serde_json::to_string(map).unwrap_or_default(),
        }
    }
}

/// Iterator over an object's members, see [`JsonNode::children`].
pub struct Children<'a> {
    inner: Option<map::Iter<'a>>,
}

impl<'a> Iterator for Children<'a> {
    type Item = (&'a str, JsonNode<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.inner.as_mut()?.next()?;
        Some((key.as_str(), JsonNode::new(value)))
    }
}
