//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default FHIR terminology server (CSIRO Ontoserver).
pub const DEFAULT_TX_SERVER: &str = "https://tx.ontoserver.csiro.au/fhir";

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// FHIR validator process configuration.
    pub validator: ValidatorConfig,

    /// Terminology server configuration.
    pub terminology: TerminologyConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration for the external FHIR validator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Java executable used to run the validator.
    pub java_path: PathBuf,

    /// Path to `validator_cli.jar`.
    /// Download it from https://github.com/hapifhir/org.hl7.fhir.core/releases
    pub jar_path: PathBuf,

    /// Terminology server the validator uses for code validation (`-tx`).
    pub tx_server: String,

    /// Maximum time a single validation run may take.
    pub timeout_secs: u64,
}

/// Configuration for the terminology lookup client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminologyConfig {
    /// Base URL of the FHIR terminology server.
    pub server_url: String,

    /// Request timeout.
    pub timeout_secs: u64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            java_path: PathBuf::from("java"),
            jar_path: PathBuf::from("bin/validator_cli.jar"),
            tx_server: DEFAULT_TX_SERVER.to_string(),
            // Cold starts download packages and can take minutes
            timeout_secs: 300,
        }
    }
}

impl Default for TerminologyConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_TX_SERVER.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "fhir-tools".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            validator: ValidatorConfig::default(),
            terminology: TerminologyConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`. `TX_SERVER` is also
    /// honoured for the terminology server URL.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(flag) = std::env::var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = !matches!(flag.to_lowercase().as_str(), "false" | "0");
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        // Validator
        if let Ok(java_path) = std::env::var("MCP_JAVA_PATH") {
            config.validator.java_path = PathBuf::from(java_path);
        }

        if let Ok(jar_path) = std::env::var("MCP_VALIDATOR_JAR") {
            config.validator.jar_path = PathBuf::from(jar_path);
        }

        if let Ok(tx) = std::env::var("MCP_VALIDATOR_TX") {
            config.validator.tx_server = tx;
        }

        if let Some(secs) = env_u64("MCP_VALIDATOR_TIMEOUT_SECS") {
            config.validator.timeout_secs = secs;
        }

        // Terminology
        if let Ok(url) = std::env::var("MCP_TX_SERVER").or_else(|_| std::env::var("TX_SERVER")) {
            config.terminology.server_url = url;
        }

        if let Some(secs) = env_u64("MCP_TX_TIMEOUT_SECS") {
            config.terminology.timeout_secs = secs;
        }

        config
    }

    /// Reject settings the tools cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.validator.timeout_secs == 0 {
            return Err(Error::config("validator timeout must be at least one second"));
        }
        if self.terminology.timeout_secs == 0 {
            return Err(Error::config("terminology timeout must be at least one second"));
        }
        for (name, url) in [
            ("terminology server", &self.terminology.server_url),
            ("validator terminology server", &self.validator.tx_server),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::config(format!("{} is not an http(s) URL: {:?}", name, url)));
            }
        }
        Ok(())
    }
}

/// Unparseable values fall back to the default.
fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok()?.parse().ok()
}
