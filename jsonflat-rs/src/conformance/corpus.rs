//! Golden-vector corpus runner.
//!
//! A corpus is a JSON file of flatten test vectors. Each vector holds raw JSON
//! input text, optional [`FlattenOptions`], and the expected outcome: either the
//! exact ordered pair list or an error code.
//!
//! ```json
//! {
//!   "version": "1",
//!   "vectors": [
//!     { "id": "nested", "input": "{\"a\":{\"b\":1}}", "expected": { "ok": [["a,b", "1"]] } },
//!     { "id": "bad", "input": "{", "expected": { "err": { "code": 100 } } }
//!   ]
//! }
//! ```

use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::flatten::{flatten_with, FlatPair, FlattenOptions};

/// A corpus containing test vectors.
#[derive(Debug, Deserialize)]
pub struct Corpus {
    /// Format version of the corpus file.
    pub version: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// List of test vectors.
    pub vectors: Vec<TestVector>,
}

/// A single test vector.
#[derive(Debug, Deserialize)]
pub struct TestVector {
    /// Unique identifier for the test.
    pub id: String,
    /// Raw JSON text handed to the flattener.
    pub input: String,
    /// Options for this vector; defaults when absent.
    #[serde(default)]
    pub options: Option<FlattenOptions>,
    /// Expected result (`{"ok": [[path, value], ...]}` or `{"err": {"code": n}}`).
    pub expected: Value,
}

/// Result of running a single test vector.
#[derive(Debug)]
pub enum TestResult {
    /// Test passed.
    Pass,
    /// Test failed with mismatch.
    Fail {
        /// Expected result from the corpus.
        expected: String,
        /// Actual result from the flattener.
        actual: String,
    },
    /// The vector itself is malformed.
    Error {
        /// Error message.
        message: String,
    },
}

impl TestResult {
    /// Returns true if this is a passing result.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns true if this is a failing result.
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail { .. })
    }
}

/// Results from running the corpus.
#[derive(Debug, Default)]
pub struct CorpusResults {
    /// Number of tests that passed.
    pub passed: usize,
    /// Number of tests that failed.
    pub failed: usize,
    /// Number of malformed vectors.
    pub errors: usize,
    /// Detailed results for each test.
    pub details: Vec<(String, TestResult)>,
}

impl CorpusResults {
    /// Create a new empty results container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a test result.
    pub fn record(&mut self, id: &str, result: TestResult) {
        match &result {
            TestResult::Pass => self.passed += 1,
            TestResult::Fail { .. } => self.failed += 1,
            TestResult::Error { .. } => self.errors += 1,
        }
        self.details.push((id.to_string(), result));
    }

    /// Get total number of tests run.
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.errors
    }

    /// Returns true if all tests passed (no failures or errors).
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }

    /// Get a summary string of the results.
    pub fn summary(&self) -> String {
        format!(
            "{} passed, {} failed, {} errors (total: {})",
            self.passed,
            self.failed,
            self.errors,
            self.total()
        )
    }

    /// Get failures only.
    pub fn failures(&self) -> Vec<&(String, TestResult)> {
        self.details
            .iter()
            .filter(|(_, r)| matches!(r, TestResult::Fail { .. }))
            .collect()
    }

    /// Get errors only.
    pub fn error_details(&self) -> Vec<&(String, TestResult)> {
        self.details
            .iter()
            .filter(|(_, r)| matches!(r, TestResult::Error { .. }))
            .collect()
    }
}

/// Corpus runner that executes test vectors.
pub struct CorpusRunner {
    corpus: Corpus,
}

impl CorpusRunner {
    /// Load corpus from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read corpus file: {}", e))?;
        Self::from_json(&content)
    }

    /// Load corpus from JSON text.
    pub fn from_json(content: &str) -> Result<Self, String> {
        let corpus: Corpus = serde_json::from_str(content)
            .map_err(|e| format!("Failed to parse corpus JSON: {}", e))?;
        Ok(Self { corpus })
    }

    /// Get the corpus.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Get the number of test vectors.
    pub fn vector_count(&self) -> usize {
        self.corpus.vectors.len()
    }

    /// Run all test vectors and return results.
    pub fn run_all(&self) -> CorpusResults {
        let mut results = CorpusResults::new();

        for vector in &self.corpus.vectors {
            let result = run_vector(vector);
            debug!(id = %vector.id, pass = result.is_pass(), "ran vector");
            results.record(&vector.id, result);
        }

        results
    }
}

/// Run a single test vector.
pub fn run_vector(vector: &TestVector) -> TestResult {
    let options = vector.options.clone().unwrap_or_default();
    let result = flatten_with(&vector.input, &options);

    if let Some(ok) = vector.expected.get("ok") {
        let expected = match expected_pairs(ok) {
            Ok(pairs) => pairs,
            Err(message) => return TestResult::Error { message },
        };
        match result {
            Ok(actual) if actual == expected => TestResult::Pass,
            Ok(actual) => TestResult::Fail {
                expected: format_pairs(&expected),
                actual: format_pairs(&actual),
            },
            Err(e) => TestResult::Fail {
                expected: format_pairs(&expected),
                actual: format!("err: E{} {}", e.code(), e),
            },
        }
    } else if let Some(err) = vector.expected.get("err") {
        let expected_code = match err.get("code").and_then(|v| v.as_u64()) {
            Some(code) => code,
            None => {
                return TestResult::Error {
                    message: "Missing 'code' in expected error".to_string(),
                }
            }
        };
        match result {
            Ok(actual) => TestResult::Fail {
                expected: format!("E{}", expected_code),
                actual: format!("ok: {}", format_pairs(&actual)),
            },
            Err(e) if u64::from(e.code()) == expected_code => TestResult::Pass,
            Err(e) => TestResult::Fail {
                expected: format!("E{}", expected_code),
                actual: format!("E{}", e.code()),
            },
        }
    } else {
        TestResult::Error {
            message: "Invalid expected format".to_string(),
        }
    }
}

/// Decode `[[path, value], ...]`.
fn expected_pairs(ok: &Value) -> Result<Vec<FlatPair>, String> {
    let items = ok
        .as_array()
        .ok_or_else(|| "Expected 'ok' to be an array of pairs".to_string())?;

    items
        .iter()
        .map(|item| match item.as_array().map(Vec::as_slice) {
            Some([Value::String(path), Value::String(value)]) => {
                Ok(FlatPair::new(path.as_str(), value.as_str()))
            }
            _ => Err(format!("Malformed expected pair: {}", item)),
        })
        .collect()
}

fn format_pairs(pairs: &[FlatPair]) -> String {
    let items: Vec<String> = pairs
        .iter()
        .map(|p| format!("({:?}, {:?})", p.path, p.value))
        .collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(input: &str, expected: Value) -> TestVector {
        TestVector {
            id: "v".to_string(),
            input: input.to_string(),
            options: None,
            expected,
        }
    }

    #[test]
    fn test_passing_vectors() {
        let ok = vector(
            r#"{"a": {"b": 1}}"#,
            serde_json::json!({"ok": [["a,b", "1"]]}),
        );
        assert!(run_vector(&ok).is_pass());

        let err = vector("{", serde_json::json!({"err": {"code": 100}}));
        assert!(run_vector(&err).is_pass());
    }

    #[test]
    fn test_mismatch_is_fail() {
        let wrong_order = vector(
            r#"{"a": 1, "b": 2}"#,
            serde_json::json!({"ok": [["b", "2"], ["a", "1"]]}),
        );
        assert!(run_vector(&wrong_order).is_fail());

        let unexpected_ok = vector("{}", serde_json::json!({"err": {"code": 100}}));
        assert!(run_vector(&unexpected_ok).is_fail());
    }

    #[test]
    fn test_malformed_vector_is_error() {
        let bad = vector("{}", serde_json::json!({"ok": [["only-path"]]}));
        assert!(matches!(run_vector(&bad), TestResult::Error { .. }));

        let neither = vector("{}", serde_json::json!({"maybe": true}));
        assert!(matches!(run_vector(&neither), TestResult::Error { .. }));
    }

    #[test]
    fn test_vector_options_applied() {
        let json = r#"{
            "version": "1",
            "vectors": [
                {
                    "id": "dot",
                    "input": "{\"a\": {\"b\": null}}",
                    "options": { "delimiter": ".", "null_text": "" },
                    "expected": { "ok": [["a.b", ""]] }
                }
            ]
        }"#;
        let runner = CorpusRunner::from_json(json).unwrap();
        assert_eq!(runner.vector_count(), 1);
        assert!(runner.run_all().all_passed());
    }

    #[test]
    fn test_corpus_results() {
        let mut results = CorpusResults::new();
        results.record("test1", TestResult::Pass);
        results.record("test2", TestResult::Pass);
        results.record(
            "test3",
            TestResult::Fail {
                expected: "a".to_string(),
                actual: "b".to_string(),
            },
        );
        results.record(
            "test4",
            TestResult::Error {
                message: "bad vector".to_string(),
            },
        );

        assert_eq!(results.passed, 2);
        assert_eq!(results.failed, 1);
        assert_eq!(results.errors, 1);
        assert_eq!(results.total(), 4);
        assert!(!results.all_passed());
        assert_eq!(results.failures().len(), 1);
        assert_eq!(results.error_details().len(), 1);
        assert_eq!(
            results.summary(),
            "2 passed, 1 failed, 1 errors (total: 4)"
        );
    }
}
