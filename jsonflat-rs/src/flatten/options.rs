//! Flattening options.

use serde::{Deserialize, Serialize};

use crate::json::Limits;

/// Default path delimiter.
pub const DEFAULT_DELIMITER: &str = ",";

/// Default rendering of JSON `null`.
pub const DEFAULT_NULL_TEXT: &str = "null";

/// Options controlling a flatten call.
///
/// Deserializes from partial JSON; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenOptions {
    /// Separator placed between path segments.
    pub delimiter: String,
    /// Text emitted for a `null` leaf.
    pub null_text: String,
    /// Resource limits.
    pub limits: Limits,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            null_text: DEFAULT_NULL_TEXT.to_string(),
            limits: Limits::unbounded(),
        }
    }
}

impl FlattenOptions {
    /// Set the path delimiter.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Set the text emitted for `null` leaves.
    pub fn with_null_text(mut self, null_text: impl Into<String>) -> Self {
        self.null_text = null_text.into();
        self
    }

    /// Set resource limits.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }
}
