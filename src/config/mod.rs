//! Configuration module for toolhub-core
//!
//! Handles loading and managing configuration from TOML files.

pub mod settings;

pub use settings::{ConfigError, LintSettings, ProbeSettings, Settings};
