//! Security header audit types

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Outcome of a single header check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderCheckStatus {
    /// Header present and counted towards the bonus
    Good,
    /// Security header absent
    Missing,
    /// Information-disclosure header present (no score impact)
    Warning,
}

impl fmt::Display for HeaderCheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderCheckStatus::Good => write!(f, "good"),
            HeaderCheckStatus::Missing => write!(f, "missing"),
            HeaderCheckStatus::Warning => write!(f, "warning"),
        }
    }
}

/// Per-check outcome within a header audit
#[derive(Debug, Clone, Serialize)]
pub struct HeaderCheck {
    /// Display label (e.g. "HSTS")
    pub name: String,
    /// Header key, lowercase (e.g. "strict-transport-security")
    pub header: String,
    /// Observed value, if the header was present
    pub value: Option<String>,
    /// What the header protects against
    pub desc: String,
    pub status: HeaderCheckStatus,
}

/// Result of the HTTPS security-header audit.
///
/// A failed fetch yields `score_bonus = 0` with `error` set; the audit itself
/// never fails.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HeaderAudit {
    /// All response headers as received (names lowercase)
    pub raw: BTreeMap<String, String>,
    /// Per-check outcomes, in check order
    pub details: Vec<HeaderCheck>,
    /// Sum of points for present security headers (0-40)
    pub score_bonus: u32,
    /// Set when the HTTP fetch itself failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
