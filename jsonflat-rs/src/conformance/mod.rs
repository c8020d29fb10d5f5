//! Conformance testing against golden vectors.
//!
//! See [`corpus`] for the corpus file format.

pub mod corpus;

pub use corpus::{run_vector, Corpus, CorpusResults, CorpusRunner, TestResult, TestVector};
