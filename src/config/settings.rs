//! Application settings configuration
//!
//! Runtime configuration for the TLS probe and the YAML linter. Settings are
//! passed explicitly into the engines; there is no process-wide state.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Configuration loading errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },
}

/// TLS probe settings
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeSettings {
    pub connect_timeout_secs: u64,
    pub handshake_timeout_secs: u64,
    pub header_timeout_secs: u64,
    pub port: u16,
    /// Whether targets resolving to private/loopback addresses are allowed.
    /// Defaults to true so internal network scanning keeps working.
    #[serde(default = "default_allow_private")]
    pub allow_private_targets: bool,
    /// Whether the header-audit fetch verifies the server certificate.
    /// Trust is evaluated separately by the handshake, so this defaults to
    /// false to allow auditing hosts with untrusted certificates.
    #[serde(default)]
    pub verify_header_fetch: bool,
}

fn default_allow_private() -> bool {
    true
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 5,
            handshake_timeout_secs: 5,
            header_timeout_secs: 10,
            port: 443,
            allow_private_targets: true,
            verify_header_fetch: false,
        }
    }
}

impl ProbeSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn handshake_timeout(&self) -> Duration {
        Duration::from_secs(self.handshake_timeout_secs)
    }

    pub fn header_timeout(&self) -> Duration {
        Duration::from_secs(self.header_timeout_secs)
    }
}

/// YAML lint settings
#[derive(Debug, Clone, Deserialize)]
pub struct LintSettings {
    pub max_line_length: usize,
    pub indent_size: usize,
    pub require_document_start: bool,
}

impl Default for LintSettings {
    fn default() -> Self {
        Self {
            max_line_length: 80,
            indent_size: 2,
            require_document_start: true,
        }
    }
}

/// Application settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub probe: ProbeSettings,
    #[serde(default)]
    pub lint: LintSettings,
}

impl Settings {
    /// Load settings from the default config file
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_path = Path::new("config/default.toml");
        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_source_timeouts() {
        let settings = ProbeSettings::default();
        assert_eq!(settings.connect_timeout(), Duration::from_secs(5));
        assert_eq!(settings.header_timeout(), Duration::from_secs(10));
        assert_eq!(settings.port, 443);
        assert!(settings.allow_private_targets);
        assert!(!settings.verify_header_fetch);
    }

    #[test]
    fn test_load_from_toml() {
        let settings: Settings = toml::from_str(
            r#"
            [probe]
            connect_timeout_secs = 3
            handshake_timeout_secs = 3
            header_timeout_secs = 8
            port = 8443
            allow_private_targets = false

            [lint]
            max_line_length = 120
            indent_size = 2
            require_document_start = false
            "#,
        )
        .unwrap();

        assert_eq!(settings.probe.port, 8443);
        assert!(!settings.probe.allow_private_targets);
        assert!(!settings.probe.verify_header_fetch);
        assert_eq!(settings.lint.max_line_length, 120);
    }
}
