//! Configuration Module
//!
//! Loads and validates configuration from TOML files.
//! Secrets (API keys, Supabase credentials) come from the environment.

pub mod loader;
pub mod settings;

pub use loader::{load_config, Config, ConfigError};
pub use settings::Secrets;
