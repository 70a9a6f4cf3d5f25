//! Two-stage YAML lint pipeline

use crate::config::LintSettings;
use crate::models::YamlLintOutcome;
use crate::yaml::{parse_documents, rules};
use tracing::warn;

/// YAML linter
pub struct YamlLinter {
    settings: LintSettings,
}

impl YamlLinter {
    /// Create a new linter with the given settings
    pub fn new(settings: LintSettings) -> Self {
        Self { settings }
    }

    /// Run the two-stage pipeline on the given content.
    ///
    /// Stage 1 parses every document; any parse failure short-circuits to
    /// `InvalidSyntax` and linting is skipped entirely. Stage 2 runs the
    /// style rule set and reports problems in document order.
    pub fn lint(&self, content: &str) -> YamlLintOutcome {
        if content.trim().is_empty() {
            return YamlLintOutcome::invalid_syntax("Content must not be empty.");
        }

        if let Err(e) = parse_documents(content) {
            warn!(error = %e, "invalid YAML syntax");
            return YamlLintOutcome::invalid_syntax(format!("YAML syntax error: {}", e));
        }

        let problems = rules::run_all(content, &self.settings);
        YamlLintOutcome::from_problems(problems)
    }
}

/// Lint content with default settings.
pub fn lint_yaml(content: &str) -> YamlLintOutcome {
    YamlLinter::new(LintSettings::default()).lint(content)
}
