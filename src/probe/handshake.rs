//! TLS handshake against the target
//!
//! Performs a strictly-validated rustls handshake (webpki roots, no pinning)
//! and extracts the negotiated protocol, cipher suite, and leaf certificate.

use crate::config::ProbeSettings;
use crate::error::ProbeError;
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ProtocolVersion};
use std::sync::Arc;
use tokio::net::TcpStream;

/// Facts extracted from a successful handshake
#[derive(Debug, Clone)]
pub struct HandshakeInfo {
    /// Protocol version rendered as "TLSv1.3" / "TLSv1.2"
    pub protocol: String,
    pub cipher_name: String,
    pub cipher_bits: u32,
    /// Leaf certificate in DER form
    pub leaf_der: Vec<u8>,
}

/// Connect to `(hostname, port)` and perform a fully-validating handshake.
pub async fn connect(hostname: &str, settings: &ProbeSettings) -> Result<HandshakeInfo, ProbeError> {
    // Ensure a default crypto provider is installed (needed when multiple
    // providers are available, e.g. when reqwest enables both ring and aws-lc-rs)
    let _ = rustls::crypto::ring::default_provider().install_default();

    let root_store =
        rustls::RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();
    let connector = tokio_rustls::TlsConnector::from(Arc::new(config));

    let stream = tokio::time::timeout(
        settings.connect_timeout(),
        TcpStream::connect((hostname, settings.port)),
    )
    .await
    .map_err(|_| ProbeError::Timeout(settings.connect_timeout_secs))?
    .map_err(|e| ProbeError::Connection(e.to_string()))?;

    let server_name = ServerName::try_from(hostname.to_string())
        .map_err(|_| ProbeError::Handshake(format!("Invalid server name: {}", hostname)))?;

    let tls_stream = tokio::time::timeout(
        settings.handshake_timeout(),
        connector.connect(server_name, stream),
    )
    .await
    .map_err(|_| ProbeError::Timeout(settings.handshake_timeout_secs))?
    .map_err(classify_handshake_error)?;

    let (_, connection) = tls_stream.get_ref();

    let protocol = connection
        .protocol_version()
        .map(protocol_name)
        .unwrap_or_else(|| "Unknown".to_string());

    let cipher_name = connection
        .negotiated_cipher_suite()
        .map(|cs| format!("{:?}", cs.suite()))
        .unwrap_or_else(|| "Unknown".to_string());
    let cipher_bits = cipher_strength_bits(&cipher_name);

    let leaf_der = connection
        .peer_certificates()
        .and_then(|certs| certs.first())
        .map(|c| c.as_ref().to_vec())
        .ok_or_else(|| {
            ProbeError::Certificate("No certificates received from server".to_string())
        })?;

    Ok(HandshakeInfo {
        protocol,
        cipher_name,
        cipher_bits,
        leaf_der,
    })
}

fn protocol_name(version: ProtocolVersion) -> String {
    match version {
        ProtocolVersion::TLSv1_3 => "TLSv1.3".to_string(),
        ProtocolVersion::TLSv1_2 => "TLSv1.2".to_string(),
        other => format!("{:?}", other),
    }
}

/// Key strength in bits, derived from the rustls suite name.
/// All rustls suites are AEAD with at least 128-bit keys.
pub fn cipher_strength_bits(suite_name: &str) -> u32 {
    if suite_name.contains("AES_256") || suite_name.contains("CHACHA20") {
        256
    } else if suite_name.contains("AES_128") {
        128
    } else {
        0
    }
}

/// Map a handshake failure to a user-facing verification or handshake error.
/// rustls exposes the verification detail only through the error text, so this
/// matches on it the same way the trust fallback in most tooling does.
fn classify_handshake_error(err: std::io::Error) -> ProbeError {
    let msg = err.to_string();

    if msg.contains("Expired") || msg.contains("expired") {
        ProbeError::Verification("Certificate has EXPIRED".to_string())
    } else if msg.contains("UnknownIssuer")
        || msg.contains("SelfSigned")
        || msg.contains("self signed")
        || msg.contains("CaUsedAsEndEntity")
    {
        ProbeError::Verification("Self-signed certificate (Untrusted)".to_string())
    } else if msg.contains("NotValidForName") {
        ProbeError::Verification(format!("Certificate hostname mismatch: {}", msg))
    } else if msg.contains("InvalidCertificate") || msg.contains("certificate") {
        ProbeError::Verification(format!("SSL Verification Failed: {}", msg))
    } else {
        ProbeError::Handshake(msg)
    }
}
