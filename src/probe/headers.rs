//! HTTPS security header audit
//!
//! Issues a single GET to `https://{hostname}` and evaluates the response
//! headers. Certificate verification is disabled by default for this fetch
//! since trust is evaluated separately by the handshake.

use crate::config::ProbeSettings;
use crate::models::{HeaderAudit, HeaderCheck, HeaderCheckStatus};
use std::collections::BTreeMap;
use tracing::warn;

// Browser-like User-Agent to avoid WAF/firewall blocking
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

struct HeaderRule {
    key: &'static str,
    label: &'static str,
    desc: &'static str,
    points: u32,
}

/// Scored security headers, 40 points maximum
const SCORED_HEADERS: [HeaderRule; 6] = [
    HeaderRule {
        key: "strict-transport-security",
        label: "HSTS",
        desc: "Prevents Man-in-the-Middle & enforces HTTPS.",
        points: 10,
    },
    HeaderRule {
        key: "content-security-policy",
        label: "CSP",
        desc: "Primary mitigation for XSS & Data Injection attacks.",
        points: 10,
    },
    HeaderRule {
        key: "x-frame-options",
        label: "X-Frame-Options",
        desc: "Prevents Clickjacking attacks.",
        points: 5,
    },
    HeaderRule {
        key: "x-content-type-options",
        label: "X-Content-Type",
        desc: "Prevents MIME-Sniffing (nosniff).",
        points: 5,
    },
    HeaderRule {
        key: "referrer-policy",
        label: "Referrer-Policy",
        desc: "Controls referrer data privacy.",
        points: 5,
    },
    HeaderRule {
        key: "permissions-policy",
        label: "Permissions-Policy",
        desc: "Controls browser features (camera, mic, etc).",
        points: 5,
    },
];

/// Information-disclosure headers, flagged as warnings with no score impact
const LEAK_HEADERS: [(&str, &str); 3] = [
    ("server", "Server Info Leak"),
    ("x-powered-by", "X-Powered-By Leak"),
    ("x-aspnet-version", "ASP.NET Version Leak"),
];

/// Run the header audit. Any fetch failure yields an audit with
/// `score_bonus = 0` and `error` set; this function never fails.
pub async fn audit_headers(hostname: &str, settings: &ProbeSettings) -> HeaderAudit {
    match fetch_headers(hostname, settings).await {
        Ok(raw) => evaluate(raw),
        Err(e) => {
            warn!(hostname, error = %e, "failed to fetch security headers");
            HeaderAudit {
                error: Some(e.to_string()),
                ..Default::default()
            }
        }
    }
}

async fn fetch_headers(
    hostname: &str,
    settings: &ProbeSettings,
) -> Result<BTreeMap<String, String>, reqwest::Error> {
    let client = reqwest::Client::builder()
        .timeout(settings.header_timeout())
        .danger_accept_invalid_certs(!settings.verify_header_fetch)
        .user_agent(USER_AGENT)
        .build()?;

    let response = client.get(format!("https://{}", hostname)).send().await?;

    // reqwest lowercases header names already
    Ok(response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect())
}

/// Evaluate raw response headers against the rule tables.
pub(crate) fn evaluate(raw: BTreeMap<String, String>) -> HeaderAudit {
    let mut details = Vec::new();
    let mut score_bonus = 0;

    for rule in &SCORED_HEADERS {
        let value = raw.get(rule.key).cloned();
        let status = if value.is_some() {
            score_bonus += rule.points;
            HeaderCheckStatus::Good
        } else {
            HeaderCheckStatus::Missing
        };

        details.push(HeaderCheck {
            name: rule.label.to_string(),
            header: rule.key.to_string(),
            value,
            desc: rule.desc.to_string(),
            status,
        });
    }

    for (key, label) in &LEAK_HEADERS {
        if let Some(value) = raw.get(*key) {
            details.push(HeaderCheck {
                name: label.to_string(),
                header: key.to_string(),
                value: Some(value.clone()),
                desc: "Potentially helps attackers identify the server version.".to_string(),
                status: HeaderCheckStatus::Warning,
            });
        }
    }

    HeaderAudit {
        raw,
        details,
        score_bonus,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_all_headers_present_scores_forty() {
        let audit = evaluate(headers(&[
            ("strict-transport-security", "max-age=31536000"),
            ("content-security-policy", "default-src 'self'"),
            ("x-frame-options", "DENY"),
            ("x-content-type-options", "nosniff"),
            ("referrer-policy", "no-referrer"),
            ("permissions-policy", "camera=()"),
        ]));

        assert_eq!(audit.score_bonus, 40);
        assert_eq!(audit.details.len(), 6);
        assert!(audit
            .details
            .iter()
            .all(|d| d.status == HeaderCheckStatus::Good));
    }

    #[test]
    fn test_no_headers_scores_zero() {
        let audit = evaluate(headers(&[("content-type", "text/html")]));

        assert_eq!(audit.score_bonus, 0);
        assert_eq!(audit.details.len(), 6);
        assert!(audit
            .details
            .iter()
            .all(|d| d.status == HeaderCheckStatus::Missing));
    }

    #[test]
    fn test_partial_headers() {
        let audit = evaluate(headers(&[
            ("strict-transport-security", "max-age=63072000"),
            ("x-content-type-options", "nosniff"),
        ]));

        assert_eq!(audit.score_bonus, 15);
    }

    #[test]
    fn test_leak_headers_warn_without_score_impact() {
        let audit = evaluate(headers(&[
            ("server", "nginx/1.25.3"),
            ("x-powered-by", "PHP/8.2"),
        ]));

        assert_eq!(audit.score_bonus, 0);
        let warnings: Vec<_> = audit
            .details
            .iter()
            .filter(|d| d.status == HeaderCheckStatus::Warning)
            .collect();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].value.as_deref(), Some("nginx/1.25.3"));
    }
}
