//! TLS grading engine
//!
//! Connects to a target, extracts certificate/cipher/protocol facts, audits
//! HTTP security headers, and combines everything into a deterministic 0-100
//! score and letter grade. Expected failures never escape: they are encoded
//! in the returned [`TlsProbeResult`].

pub mod cert;
pub mod handshake;
pub mod headers;
pub mod scoring;
pub mod target;

pub use scoring::{score_probe, ScoreCard};
pub use target::normalize_target;

use crate::config::ProbeSettings;
use crate::models::{CertificateDetails, TlsProbeResult};
use chrono::Utc;
use tracing::warn;

/// TLS prober
pub struct TlsProber {
    settings: ProbeSettings,
}

impl TlsProber {
    /// Create a new prober with the given settings
    pub fn new(settings: ProbeSettings) -> Self {
        Self { settings }
    }

    /// Probe a raw target (hostname, URL, or host:port).
    ///
    /// Each call is independent and stateless; two sequential bounded network
    /// operations are performed (handshake, then header GET), with no retries.
    pub async fn probe(&self, target: &str) -> TlsProbeResult {
        let hostname = match target::normalize_target(target) {
            Ok(h) => h,
            Err(e) => return TlsProbeResult::failed(String::new(), e.to_string()),
        };

        if let Err(e) = target::ensure_allowed(
            &hostname,
            self.settings.port,
            self.settings.allow_private_targets,
        )
        .await
        {
            warn!(hostname = %hostname, error = %e, "target refused by policy");
            return TlsProbeResult::failed(hostname, e.to_string());
        }

        let info = match handshake::connect(&hostname, &self.settings).await {
            Ok(info) => info,
            Err(e) => {
                warn!(hostname = %hostname, error = %e, "TLS probe failed");
                return TlsProbeResult::failed(hostname, e.to_string());
            }
        };

        let leaf = match cert::parse_leaf(&info.leaf_der) {
            Ok(leaf) => leaf,
            Err(e) => {
                warn!(hostname = %hostname, error = %e, "certificate parsing failed");
                return TlsProbeResult::failed(hostname, e.to_string());
            }
        };

        let days_left = cert::days_until(leaf.not_after, Utc::now());

        // Header audit runs only after a successful handshake; its own
        // failures degrade to a zero bonus rather than failing the probe.
        let headers = headers::audit_headers(&hostname, &self.settings).await;

        let card = scoring::score_probe(
            days_left,
            &info.protocol,
            info.cipher_bits,
            headers.score_bonus,
        );

        TlsProbeResult {
            hostname,
            valid: true,
            grade: card.grade,
            score: card.score,
            error: None,
            details: Some(CertificateDetails {
                common_name: leaf.common_name,
                issuer: leaf.issuer,
                expiry_date: leaf.not_after.format("%Y-%m-%d").to_string(),
                days_left,
                protocol: info.protocol,
                cipher_name: info.cipher_name,
                cipher_bits: info.cipher_bits,
                serial_number: Some(leaf.serial_number),
                sans: leaf.sans,
            }),
            headers,
            reasons: card.reasons,
        }
    }
}

/// Probe a target with default settings.
pub async fn probe_tls(target: &str) -> TlsProbeResult {
    TlsProber::new(ProbeSettings::default()).probe(target).await
}
