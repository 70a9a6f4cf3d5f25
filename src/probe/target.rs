//! Target normalization and target policy
//!
//! Accepts bare hostnames, URLs with schemes, and host:port pairs; everything
//! is reduced to a bare hostname before the probe connects.

use crate::error::ProbeError;
use std::net::IpAddr;

/// Normalize a raw target into a bare hostname.
///
/// Strips any `scheme://` prefix, discards the path after the first `/` and
/// the port after the first `:`. No further syntax validation is performed.
pub fn normalize_target(raw: &str) -> Result<String, ProbeError> {
    let mut host = raw.trim();
    if let Some(idx) = host.find("://") {
        host = &host[idx + 3..];
    }
    if let Some(idx) = host.find('/') {
        host = &host[..idx];
    }
    if let Some(idx) = host.find(':') {
        host = &host[..idx];
    }
    if host.is_empty() {
        return Err(ProbeError::EmptyTarget);
    }
    Ok(host.to_string())
}

/// Enforce the private-address policy before connecting.
///
/// When `allow_private` is false the hostname is resolved and refused if any
/// address is loopback, private, or link-local.
pub async fn ensure_allowed(
    hostname: &str,
    port: u16,
    allow_private: bool,
) -> Result<(), ProbeError> {
    if allow_private {
        return Ok(());
    }

    let addrs = tokio::net::lookup_host((hostname, port))
        .await
        .map_err(|e| ProbeError::Connection(e.to_string()))?;

    for addr in addrs {
        if is_private_addr(addr.ip()) {
            return Err(ProbeError::RestrictedTarget(addr.ip().to_string()));
        }
    }

    Ok(())
}

fn is_private_addr(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_private() || v4.is_loopback() || v4.is_link_local() || v4.is_unspecified()
        }
        IpAddr::V6(v6) => {
            let segments = v6.segments();
            v6.is_loopback()
                || v6.is_unspecified()
                // fc00::/7 (unique local)
                || (segments[0] & 0xfe00) == 0xfc00
                // fe80::/10 (link local)
                || (segments[0] & 0xffc0) == 0xfe80
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_scheme_port_and_path() {
        assert_eq!(
            normalize_target("https://example.com:443/path").unwrap(),
            "example.com"
        );
        assert_eq!(normalize_target("example.com/path").unwrap(), "example.com");
        assert_eq!(normalize_target("example.com:8443").unwrap(), "example.com");
        assert_eq!(
            normalize_target("http://example.com").unwrap(),
            "example.com"
        );
        assert_eq!(normalize_target("  example.com  ").unwrap(), "example.com");
    }

    #[test]
    fn test_normalize_rejects_empty() {
        assert!(normalize_target("").is_err());
        assert!(normalize_target("https://").is_err());
        assert!(normalize_target("/path/only").is_err());
    }

    #[test]
    fn test_private_addr_detection() {
        assert!(is_private_addr("127.0.0.1".parse().unwrap()));
        assert!(is_private_addr("10.0.0.5".parse().unwrap()));
        assert!(is_private_addr("192.168.1.1".parse().unwrap()));
        assert!(is_private_addr("169.254.0.1".parse().unwrap()));
        assert!(is_private_addr("::1".parse().unwrap()));
        assert!(is_private_addr("fd00::1".parse().unwrap()));
        assert!(is_private_addr("fe80::1".parse().unwrap()));
        assert!(!is_private_addr("8.8.8.8".parse().unwrap()));
        assert!(!is_private_addr("2606:4700::1111".parse().unwrap()));
    }

    #[tokio::test]
    async fn test_policy_allows_private_by_default() {
        assert!(ensure_allowed("127.0.0.1", 443, true).await.is_ok());
    }

    #[tokio::test]
    async fn test_policy_refuses_private_when_disabled() {
        let err = ensure_allowed("127.0.0.1", 443, false).await.unwrap_err();
        assert!(err.to_string().contains("Restricted target"));
    }
}
