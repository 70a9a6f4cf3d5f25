//! YAML lint outcome types

use serde::Serialize;
use std::fmt;

/// Overall status of a lint run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LintStatus {
    /// Content failed the syntax stage; linting was skipped
    #[serde(rename = "INVALID_SYNTAX")]
    InvalidSyntax,
    /// Content parsed but the rule set reported problems
    #[serde(rename = "VALID_WITH_ISSUES")]
    ValidWithIssues,
    /// Content parsed and the rule set reported nothing
    #[serde(rename = "PERFECT")]
    Perfect,
}

/// Severity of a lint problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LintLevel {
    Warning,
    Error,
}

impl fmt::Display for LintLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintLevel::Warning => write!(f, "warning"),
            LintLevel::Error => write!(f, "error"),
        }
    }
}

/// A single problem reported by the rule set
#[derive(Debug, Clone, Serialize)]
pub struct LintProblem {
    /// 1-based line number
    pub line: usize,
    /// 1-based column number
    pub column: usize,
    pub level: LintLevel,
    pub message: String,
}

/// Result of the two-stage lint pipeline
#[derive(Debug, Clone, Serialize)]
pub struct YamlLintOutcome {
    pub status: LintStatus,
    /// Present only when status is `InvalidSyntax`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Document-ordered problems; empty for `Perfect`
    pub problems: Vec<LintProblem>,
}

impl YamlLintOutcome {
    /// Build an `InvalidSyntax` outcome with the given diagnostic
    pub fn invalid_syntax(message: impl Into<String>) -> Self {
        YamlLintOutcome {
            status: LintStatus::InvalidSyntax,
            error_message: Some(message.into()),
            problems: Vec::new(),
        }
    }

    /// Build a `Perfect` or `ValidWithIssues` outcome from collected problems
    pub fn from_problems(problems: Vec<LintProblem>) -> Self {
        let status = if problems.is_empty() {
            LintStatus::Perfect
        } else {
            LintStatus::ValidWithIssues
        };
        YamlLintOutcome {
            status,
            error_message: None,
            problems,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_problems() {
        assert_eq!(
            YamlLintOutcome::from_problems(Vec::new()).status,
            LintStatus::Perfect
        );

        let outcome = YamlLintOutcome::from_problems(vec![LintProblem {
            line: 1,
            column: 1,
            level: LintLevel::Warning,
            message: "something".to_string(),
        }]);
        assert_eq!(outcome.status, LintStatus::ValidWithIssues);
        assert!(outcome.error_message.is_none());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&LintStatus::InvalidSyntax).unwrap();
        assert_eq!(json, "\"INVALID_SYNTAX\"");
        let json = serde_json::to_string(&LintLevel::Error).unwrap();
        assert_eq!(json, "\"error\"");
    }
}
