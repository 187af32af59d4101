//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `VENTURE_FORGE` prefix and nested values use `__` as separator.
//!
//! # Example
//!
//! ```no_run
//! use venture_forge::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod distiller;
mod error;

pub use ai::AiConfig;
pub use distiller::DistillerConfig;
pub use error::{ConfigError, ValidationError};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Generative text service configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Progress distiller configuration
    #[serde(default)]
    pub distiller: DistillerConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `VENTURE_FORGE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `VENTURE_FORGE__AI__API_KEY=...` -> `ai.api_key = ...`
    /// - `VENTURE_FORGE__DISTILLER__DEBOUNCE_MS=2000` -> `distiller.debounce_ms = 2000`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("VENTURE_FORGE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.distiller.validate()?;
        Ok(())
    }
}
