//! TLS probe result types

use crate::models::HeaderAudit;
use serde::Serialize;
use std::fmt;

/// Letter grade for a TLS configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Get the display string for this grade
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    /// Calculate grade from a score (0-100).
    ///
    /// Only consulted when no critical failure occurred; a critical failure
    /// forces `Grade::F` regardless of score.
    pub fn from_score(score: u32) -> Self {
        match score {
            100 => Grade::APlus,
            85..=99 => Grade::A,
            70..=84 => Grade::B,
            55..=69 => Grade::C,
            40..=54 => Grade::D,
            _ => Grade::F,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Leaf certificate details extracted during the handshake
#[derive(Debug, Clone, Serialize)]
pub struct CertificateDetails {
    /// Subject common name
    pub common_name: Option<String>,
    /// Issuer organization, falling back to issuer CN
    pub issuer: Option<String>,
    /// Expiry date (YYYY-MM-DD)
    pub expiry_date: String,
    /// Whole days until expiry (negative if expired)
    pub days_left: i64,
    /// Negotiated protocol version (e.g. "TLSv1.3")
    pub protocol: String,
    /// Negotiated cipher suite name
    pub cipher_name: String,
    /// Cipher key strength in bits
    pub cipher_bits: u32,
    /// Certificate serial number (hex)
    pub serial_number: Option<String>,
    /// DNS Subject Alternative Names, capped at 10
    pub sans: Vec<String>,
}

/// Complete result of a TLS probe.
///
/// Constructed fresh per call and never mutated after being returned. Expected
/// failures populate `error` rather than surfacing as an `Err`.
#[derive(Debug, Clone, Serialize)]
pub struct TlsProbeResult {
    /// Cleaned target host (scheme/path/port stripped)
    pub hostname: String,
    /// True only if the handshake succeeded and a certificate was retrieved
    pub valid: bool,
    /// Letter grade; F is the default/failure value
    pub grade: Grade,
    /// Score 0-100
    pub score: u32,
    /// Set on any failure path (DNS, timeout, handshake, verification)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Certificate/cipher/protocol facts, absent on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<CertificateDetails>,
    /// Security header audit (empty on early failure)
    pub headers: HeaderAudit,
    /// Ordered scoring justifications
    pub reasons: Vec<String>,
}

impl TlsProbeResult {
    /// Build a failure result: score 0, grade F, no details.
    pub fn failed(hostname: String, error: String) -> Self {
        TlsProbeResult {
            hostname,
            valid: false,
            grade: Grade::F,
            score: 0,
            error: Some(error),
            details: None,
            headers: HeaderAudit::default(),
            reasons: Vec::new(),
        }
    }
}
