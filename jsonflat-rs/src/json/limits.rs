//! Resource limits for flattening untrusted input.
//!
//! Flattening is unbounded by default. Callers that accept attacker-controlled
//! documents can cap the input size and the object nesting depth; exceeding
//! either aborts the call with no partial output.
//!
//! - `InputTooLarge` (110): total input size limit
//! - `NestingTooDeep` (111): maximum object nesting depth

use serde::{Deserialize, Serialize};

use crate::error::{FlattenError, FlattenResult};

/// Limits applied to a single flatten call.
///
/// `None` disables the corresponding check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum total input size in bytes (E110)
    pub max_input_size: Option<u64>,
    /// Maximum nesting depth of objects, root object included (E111)
    pub max_nesting_depth: Option<u64>,
}

impl Limits {
    /// No limits. This is the default.
    pub const fn unbounded() -> Self {
        Self {
            max_input_size: None,
            max_nesting_depth: None,
        }
    }

    /// Limits for attacker-controlled input.
    pub const fn untrusted() -> Self {
        Self {
            max_input_size: Some(1024 * 1024), // 1 MiB
            max_nesting_depth: Some(64),       // 64 levels
        }
    }

    /// Reject input larger than `max_input_size`.
    pub fn check_input_size(&self, size: usize) -> FlattenResult<()> {
        match self.max_input_size {
            Some(limit) if size as u64 > limit => {
                Err(FlattenError::InputTooLarge(size as u64, limit))
            }
            _ => Ok(()),
        }
    }

    /// Reject an object nested `depth` levels deep if it exceeds `max_nesting_depth`.
    pub fn check_depth(&self, depth: usize) -> FlattenResult<()> {
        match self.max_nesting_depth {
            Some(limit) if depth as u64 > limit => {
                Err(FlattenError::NestingTooDeep(depth as u64, limit))
            }
            _ => Ok(()),
        }
    }
}
