//! Generative text service configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Configuration for the generative text service.
///
/// The gateway performs no retries; failed calls are re-triggered by the
/// user. The timeout is mandatory because the service is the single
/// external-latency dependency on every generation path.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// API key for the generative text service.
    pub api_key: Option<Secret<String>>,

    /// Model used for long-form document generation.
    #[serde(default = "default_document_model")]
    pub document_model: String,

    /// Model used for refinement turns and distillation passes.
    #[serde(default = "default_dialog_model")]
    pub dialog_model: String,

    /// Base URL for the API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("AI__API_KEY"));
        }

        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }

        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            document_model: default_document_model(),
            dialog_model: default_dialog_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_document_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_dialog_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_timeout() -> u64 {
    120
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.document_model, "gemini-3-pro-preview");
        assert_eq!(config.dialog_model, "gemini-3-flash-preview");
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn timeout_duration() {
        let config = AiConfig {
            timeout_secs: 60,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn validation_requires_api_key() {
        let config = AiConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_empty_api_key() {
        let config = AiConfig {
            api_key: Some(Secret::new(String::new())),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_zero_timeout() {
        let config = AiConfig {
            api_key: Some(Secret::new("key-xxx".to_string())),
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidTimeout)
        ));
    }

    #[test]
    fn validation_rejects_bad_base_url() {
        let config = AiConfig {
            api_key: Some(Secret::new("key-xxx".to_string())),
            base_url: "generativelanguage.googleapis.com".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidBaseUrl)
        ));
    }

    #[test]
    fn validation_accepts_complete_config() {
        let config = AiConfig {
            api_key: Some(Secret::new("key-xxx".to_string())),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
