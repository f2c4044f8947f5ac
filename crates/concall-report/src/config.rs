//! Configuration for the artifact writer and the sink

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Where local artifacts are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output directory, created on first write
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("final_output"),
        }
    }
}

impl ReportConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.output_dir.as_os_str().is_empty() {
            return Err("output_dir cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Downstream sink settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    /// Endpoint receiving records; forwarding is disabled when unset
    pub endpoint: Option<String>,

    /// Whole-request timeout (seconds)
    pub timeout_secs: u64,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: 30,
        }
    }
}

impl SinkConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("sink timeout_secs must be greater than 0".to_string());
        }
        if let Some(endpoint) = &self.endpoint {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(format!("sink endpoint must be an http(s) URL: {}", endpoint));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ReportConfig::default().validate().is_ok());
        assert!(SinkConfig::default().validate().is_ok());
        assert!(SinkConfig::default().endpoint.is_none());
    }

    #[test]
    fn test_sink_endpoint_must_be_http() {
        let config = SinkConfig {
            endpoint: Some("ftp://example.com".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
