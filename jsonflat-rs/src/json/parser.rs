//! JSON parsing entry points.
//!
//! Parsing is delegated to `serde_json` built with `preserve_order`, so object
//! members keep their document order. Any parse failure, including the
//! parser's own recursion limit, is reported as `InvalidJson`.

use serde_json::Value;
use tracing::debug;

use super::limits::Limits;
use crate::error::{FlattenError, FlattenResult};

/// Parse JSON text without limits.
pub fn parse(input: &str) -> FlattenResult<Value> {
    parse_with_limits(input, Limits::unbounded())
}

/// Parse JSON text, enforcing the input size limit first.
pub fn parse_with_limits(input: &str, limits: Limits) -> FlattenResult<Value> {
    limits.check_input_size(input.len())?;

    serde_json::from_str(input).map_err(|e| {
        debug!(error = %e, len = input.len(), "rejected malformed JSON");
        FlattenError::InvalidJson(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_keeps_document_order() {
        let value = parse(r#"{"b": 1, "a": 2, "c": 3}"#).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_parse_scalars() {
        assert_eq!(parse("null").unwrap(), Value::Null);
        assert_eq!(parse("true").unwrap(), Value::Bool(true));
        assert_eq!(parse(r#""5""#).unwrap(), Value::String("5".to_string()));
    }

    #[test]
    fn test_malformed_rejected() {
        for input in ["{not json", "", "{\"a\": 1,}", "[1, 2", "null extra", "NaN"] {
            let result = parse(input);
            assert!(
                matches!(result, Err(FlattenError::InvalidJson(_))),
                "expected InvalidJson for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_error_message_has_position() {
        let err = parse("{not json").unwrap_err();
        assert!(err.to_string().contains("line 1"), "got: {}", err);
    }

    #[test]
    fn test_input_too_large() {
        let limits = Limits {
            max_input_size: Some(4),
            ..Limits::unbounded()
        };
        assert_eq!(
            parse_with_limits(r#"{"a":1}"#, limits),
            Err(FlattenError::InputTooLarge(7, 4))
        );
    }

    #[test]
    fn test_size_checked_before_syntax() {
        let limits = Limits {
            max_input_size: Some(2),
            ..Limits::unbounded()
        };
        assert_eq!(
            parse_with_limits("{not json", limits).unwrap_err().code(),
            110
        );
    }
}
