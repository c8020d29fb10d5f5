//! Error handling for jsonflat.
//!
//! Every error carries a stable numeric code and name so front ends (the CLI,
//! the conformance corpus) can report and compare failures without matching on
//! message text.
//!
//! With default options only [`FlattenError::InvalidJson`] can occur. The
//! limit errors exist for callers that opt into [`Limits`](crate::json::Limits).

use thiserror::Error;

/// All errors produced while flattening a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum FlattenError {
    /// InvalidJson (code 100): the input text is not valid JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// InputTooLarge (code 110): input size in bytes exceeds the configured limit.
    #[error("input too large: {0} bytes exceeds limit of {1}")]
    InputTooLarge(/* size */ u64, /* limit */ u64),

    /// NestingTooDeep (code 111): object nesting exceeds the configured limit.
    #[error("nesting too deep: depth {0} exceeds limit of {1}")]
    NestingTooDeep(/* depth */ u64, /* limit */ u64),
}

impl FlattenError {
    /// Get the numeric error code.
    pub fn code(&self) -> u32 {
        match self {
            FlattenError::InvalidJson(_) => 100,
            FlattenError::InputTooLarge(_, _) => 110,
            FlattenError::NestingTooDeep(_, _) => 111,
        }
    }

    /// Get the error name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            FlattenError::InvalidJson(_) => "InvalidJson",
            FlattenError::InputTooLarge(_, _) => "InputTooLarge",
            FlattenError::NestingTooDeep(_, _) => "NestingTooDeep",
        }
    }
}

/// Result type for flattening operations.
pub type FlattenResult<T> = Result<T, FlattenError>;
