//! YAML validation and repair engine
//!
//! Two independent entry points: a two-stage lint pipeline (strict syntax
//! parse, then a style/quality rule set) and a best-effort structural repair
//! that re-serializes documents with normalized formatting. Both are pure,
//! in-memory, and stateless across calls.

pub mod lint;
pub mod repair;
pub mod rules;

pub use lint::{lint_yaml, YamlLinter};
pub use repair::repair_yaml;

use serde::Deserialize;

/// Parse every document in the input (multi-document supported).
pub(crate) fn parse_documents(content: &str) -> Result<Vec<serde_yaml::Value>, serde_yaml::Error> {
    serde_yaml::Deserializer::from_str(content)
        .map(serde_yaml::Value::deserialize)
        .collect()
}
