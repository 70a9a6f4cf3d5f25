//! Data models for toolhub-core
//!
//! This module contains the result records returned by the analysis engines.

pub mod header_audit;
pub mod lint_outcome;
pub mod probe_result;

pub use header_audit::{HeaderAudit, HeaderCheck, HeaderCheckStatus};
pub use lint_outcome::{LintLevel, LintProblem, LintStatus, YamlLintOutcome};
pub use probe_result::{CertificateDetails, Grade, TlsProbeResult};
