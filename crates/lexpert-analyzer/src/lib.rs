//! Case analysis for expert-witness search.
//!
//! Sends a legal-matter description to the Anthropic Messages API and parses
//! the structured [`CaseAnalysis`] the model is instructed to return. The
//! client surfaces every failure as a typed error; callers that can degrade
//! (the search handler) decide whether to swallow it.

pub mod client;
pub mod error;
pub mod extract;
pub mod types;

pub use client::AnalyzerClient;
pub use error::AnalyzerError;
pub use extract::{extract_json_object, parse_case_analysis};
pub use types::CaseAnalysis;
