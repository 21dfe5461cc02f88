//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching config.toml structure.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub discovery: DiscoverySection,
    pub moralis: MoralisSection,
    pub tracker: TrackerSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Wallet discovery configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverySection {
    /// Mint address of the token whose first buyers are discovered
    pub token_mint: String,
    /// Number of records to request per provider call
    pub fetch_limit: u32,
}

/// Moralis Solana gateway configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct MoralisSection {
    /// Moralis Solana gateway base URL
    pub base_url: String,
}

/// Solana Tracker data API configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerSection {
    /// Solana Tracker data API base URL
    pub base_url: String,
}

/// Logging configuration section (optional)
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.discovery.token_mint.is_empty() {
            return Err(ConfigError::ValidationError(
                "token_mint cannot be empty".to_string(),
            ));
        }

        if self.discovery.fetch_limit == 0 {
            return Err(ConfigError::ValidationError(format!(
                "fetch_limit must be > 0, got {}",
                self.discovery.fetch_limit
            )));
        }

        if self.moralis.base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "moralis base_url cannot be empty".to_string(),
            ));
        }

        if self.tracker.base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "tracker base_url cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
