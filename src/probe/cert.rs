//! Leaf certificate parsing

use crate::error::ProbeError;
use chrono::{DateTime, TimeZone, Utc};
use x509_parser::prelude::*;

/// Maximum number of Subject Alternative Names reported
const MAX_SANS: usize = 10;

/// Fields extracted from the leaf certificate
#[derive(Debug, Clone)]
pub struct LeafCertificate {
    pub common_name: Option<String>,
    /// Issuer organization, falling back to issuer CN
    pub issuer: Option<String>,
    pub not_after: DateTime<Utc>,
    pub serial_number: String,
    /// DNS entries only, capped at `MAX_SANS`
    pub sans: Vec<String>,
}

/// Parse the leaf certificate from DER bytes.
pub fn parse_leaf(der: &[u8]) -> Result<LeafCertificate, ProbeError> {
    let (_, cert) = X509Certificate::from_der(der)
        .map_err(|e| ProbeError::Certificate(format!("Failed to parse certificate: {:?}", e)))?;

    let common_name = first_attr(cert.subject().iter_common_name());
    let issuer = first_attr(cert.issuer().iter_organization())
        .or_else(|| first_attr(cert.issuer().iter_common_name()));

    let not_after = asn1_time_to_datetime(cert.validity().not_after)?;
    let serial_number = cert.raw_serial_as_string();
    let sans = extract_dns_sans(&cert);

    Ok(LeafCertificate {
        common_name,
        issuer,
        not_after,
        serial_number,
        sans,
    })
}

/// Whole days until `not_after`, floored (negative once expired).
pub fn days_until(not_after: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (not_after - now).num_seconds().div_euclid(86_400)
}

fn first_attr<'a>(mut iter: impl Iterator<Item = &'a AttributeTypeAndValue<'a>>) -> Option<String> {
    iter.next()
        .and_then(|attr| attr.as_str().ok())
        .map(str::to_string)
}

fn extract_dns_sans(cert: &X509Certificate) -> Vec<String> {
    let mut sans = Vec::new();

    if let Ok(Some(san_ext)) = cert.subject_alternative_name() {
        for name in &san_ext.value.general_names {
            if let GeneralName::DNSName(dns) = name {
                sans.push(dns.to_string());
                if sans.len() == MAX_SANS {
                    break;
                }
            }
        }
    }

    sans
}

fn asn1_time_to_datetime(time: ASN1Time) -> Result<DateTime<Utc>, ProbeError> {
    let timestamp = time.timestamp();
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .ok_or_else(|| ProbeError::Certificate("Invalid certificate timestamp".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_days_until_floors() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();

        // 90 days and change ahead
        let future = now + Duration::days(90) + Duration::hours(6);
        assert_eq!(days_until(future, now), 90);

        // Less than a day ahead floors to 0
        let soon = now + Duration::hours(6);
        assert_eq!(days_until(soon, now), 0);

        // Expired 12 hours ago floors to -1, not 0
        let just_expired = now - Duration::hours(12);
        assert_eq!(days_until(just_expired, now), -1);

        let long_expired = now - Duration::days(30);
        assert_eq!(days_until(long_expired, now), -30);
    }
}
