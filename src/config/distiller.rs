//! Progress distiller configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Configuration for the transcript-to-progress distiller.
#[derive(Debug, Clone, Deserialize)]
pub struct DistillerConfig {
    /// Debounce window after the last qualifying transcript change, in
    /// milliseconds. Overlapping windows collapse into one distillation.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl DistillerConfig {
    /// Get the debounce window as Duration
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Validate distiller configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.debounce_ms == 0 {
            return Err(ValidationError::InvalidDebounceWindow);
        }
        Ok(())
    }
}

impl Default for DistillerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    1500
}
