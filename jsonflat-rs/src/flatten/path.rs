//! Composite path keys.
//!
//! A path is the chain of object keys from the root to a leaf joined with a
//! delimiter. Delimiter characters inside keys are not escaped, so a key
//! containing the delimiter produces an ambiguous path.

/// Growable path buffer used during traversal.
///
/// Segments are appended with [`push`](PathKey::push) and removed again by
/// truncating back to a previously observed [`len`](PathKey::len).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathKey {
    buf: String,
}

impl PathKey {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment.
    ///
    /// The delimiter is only inserted when the buffer is non-empty, so an
    /// empty leading key does not produce a leading delimiter.
    pub fn push(&mut self, segment: &str, delimiter: &str) {
        if !self.buf.is_empty() {
            self.buf.push_str(delimiter);
        }
        self.buf.push_str(segment);
    }

    /// Drop everything after the first `len` bytes.
    pub fn truncate(&mut self, len: usize) {
        self.buf.truncate(len);
    }

    /// Length of the path in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no non-empty segment has been pushed.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.buf
    }
}
