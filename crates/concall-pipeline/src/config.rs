//! Configuration for the pipeline orchestrator

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest accepted inter-entry delay
const MAX_ENTRY_DELAY_MS: u64 = 3_600_000;

/// Configuration for the pipeline orchestrator
///
/// # Examples
///
/// ```
/// use concall_pipeline::PipelineConfig;
/// use std::time::Duration;
///
/// let config = PipelineConfig::default();
/// assert_eq!(config.entry_delay(), Duration::from_millis(1500));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Pause between consecutive entries (milliseconds)
    /// Default: 1500
    pub entry_delay_ms: u64,
}

impl PipelineConfig {
    /// Get the inter-entry delay as a Duration
    pub fn entry_delay(&self) -> Duration {
        Duration::from_millis(self.entry_delay_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.entry_delay_ms > MAX_ENTRY_DELAY_MS {
            return Err(format!(
                "entry_delay_ms must be at most {} (one hour)",
                MAX_ENTRY_DELAY_MS
            ));
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            entry_delay_ms: 1_500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_delay_is_valid() {
        let config = PipelineConfig { entry_delay_ms: 0 };
        assert!(config.validate().is_ok());
        assert_eq!(config.entry_delay(), Duration::ZERO);
    }

    #[test]
    fn test_excessive_delay_rejected() {
        let config = PipelineConfig {
            entry_delay_ms: MAX_ENTRY_DELAY_MS + 1,
        };
        assert!(config.validate().is_err());
    }
}
