//! Configuration for the content resolver

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the content resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Whole-request timeout for document downloads (seconds)
    pub document_timeout_secs: u64,

    /// Preferred caption language
    pub transcript_language: String,
}

impl ResolverConfig {
    /// Get the document download timeout as a Duration
    pub fn document_timeout(&self) -> Duration {
        Duration::from_secs(self.document_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.document_timeout_secs == 0 {
            return Err("document_timeout_secs must be greater than 0".to_string());
        }
        if self.transcript_language.trim().is_empty() {
            return Err("transcript_language cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            document_timeout_secs: 60,
            transcript_language: "en".to_string(),
        }
    }
}
