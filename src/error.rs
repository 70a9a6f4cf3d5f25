//! Unified error types for toolhub-core
//!
//! The probe uses these internally; the public result records carry plain
//! error strings, so nothing here crosses the component boundary.

use thiserror::Error;

/// Errors raised while probing a TLS target
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Target must not be empty")]
    EmptyTarget,

    #[error("Restricted target (private/local address): {0}")]
    RestrictedTarget(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Connection timed out after {0} seconds")]
    Timeout(u64),

    #[error("TLS handshake failed: {0}")]
    Handshake(String),

    // Message is already user-facing ("Certificate has EXPIRED", etc.)
    #[error("{0}")]
    Verification(String),

    #[error("Certificate error: {0}")]
    Certificate(String),
}

pub type Result<T> = std::result::Result<T, ProbeError>;
