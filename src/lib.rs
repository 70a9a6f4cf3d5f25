//! Toolhub Core Library
//!
//! Backend engines for a DevOps tools hub:
//! - TLS probing: certificate, protocol, and cipher inspection with a
//!   deterministic 0-100 score and letter grade
//! - HTTP security header auditing folded into the TLS score
//! - YAML linting: strict syntax validation plus a style/quality rule set
//! - YAML repair: best-effort structural re-serialization with normalized
//!   formatting
//!
//! # Usage
//!
//! ```rust,ignore
//! use toolhub_core::{lint_yaml, probe_tls, repair_yaml};
//!
//! #[tokio::main]
//! async fn main() {
//!     let report = probe_tls("example.com").await;
//!     println!("{} scored {} ({})", report.hostname, report.score, report.grade.as_str());
//!
//!     let outcome = lint_yaml("name: demo\n");
//!     let fixed = repair_yaml("name: demo\n");
//!     // Process results...
//! }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod probe;
pub mod yaml;

// Re-export commonly used types
pub use config::{LintSettings, ProbeSettings, Settings};
pub use error::{ProbeError, Result};
pub use models::{Grade, HeaderAudit, LintStatus, TlsProbeResult, YamlLintOutcome};
pub use probe::{probe_tls, TlsProber};
pub use yaml::{lint_yaml, repair_yaml, YamlLinter};
