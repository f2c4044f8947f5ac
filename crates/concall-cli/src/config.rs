//! Configuration management for the CLI.
//!
//! One TOML file holds every section. Each section falls back to its defaults
//! when absent, so an empty file is a valid configuration.

use crate::error::{CliError, Result};
use concall_extractor::ExtractorConfig;
use concall_llm::chat::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use concall_pipeline::PipelineConfig;
use concall_report::{ReportConfig, SinkConfig};
use concall_resolver::ResolverConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Full application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcallConfig {
    /// Chat-completions endpoint and credentials
    pub llm: LlmSettings,

    /// Truncation, attempts and backoff for extraction
    pub extraction: ExtractorConfig,

    /// Transcript and document fetching
    pub resolver: ResolverConfig,

    /// Processed-set location
    pub store: StoreSettings,

    /// Artifact output directory
    pub report: ReportConfig,

    /// Optional downstream sink
    pub sink: SinkConfig,

    /// Pacing between entries
    pub pipeline: PipelineConfig,

    /// Terminal output preferences
    pub output: OutputSettings,
}

/// LLM service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Full chat-completions URL
    pub endpoint: String,

    /// Model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Bearer token; `--api-key` / `GROQ_API_KEY` take precedence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Processed-set settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// JSON array file of processed subjects
    pub processed_file: PathBuf,
}

/// Terminal output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Enable colored output
    pub color: bool,

    /// Default output format
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl ConcallConfig {
    /// Default configuration file path (`~/.concall/config.toml`).
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".concall").join("config.toml"))
    }

    /// Resolve the configuration to use.
    ///
    /// An explicit path must exist. Without one, the default path is read if
    /// present, otherwise built-in defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(CliError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_from(path);
        }

        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save configuration to a specific file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Copy with the API key masked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.llm.api_key.is_some() {
            copy.llm.api_key = Some("********".to_string());
        }
        copy
    }

    /// Check every section, naming the section that failed.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("llm", self.llm.validate()),
            ("extraction", self.extraction.validate()),
            ("resolver", self.resolver.validate()),
            ("store", self.store.validate()),
            ("report", self.report.validate()),
            ("sink", self.sink.validate()),
            ("pipeline", self.pipeline.validate()),
        ];

        for (section, check) in checks {
            check.map_err(|e| CliError::Config(format!("[{}] {}", section, e)))?;
        }
        Ok(())
    }

    /// Pick the API key: flag or environment first, then the config file.
    pub fn resolve_api_key(&self, from_cli: Option<&str>) -> Result<String> {
        from_cli
            .or(self.llm.api_key.as_deref())
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                CliError::Config(
                    "No API key; pass --api-key, set GROQ_API_KEY or add llm.api_key to the config"
                        .into(),
                )
            })
    }
}

impl LlmSettings {
    /// Reject an empty endpoint, an empty model or an out-of-range temperature.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(format!("endpoint must be an http(s) URL, got '{}'", self.endpoint));
        }
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!("temperature must be within 0.0..=2.0, got {}", self.temperature));
        }
        Ok(())
    }
}

impl StoreSettings {
    /// Reject an empty file path.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.processed_file.as_os_str().is_empty() {
            return Err("processed_file must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            api_key: None,
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            processed_file: PathBuf::from("processed.json"),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConcallConfig::default();
        assert_eq!(config.llm.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.extraction.max_attempts, 3);
        assert_eq!(config.store.processed_file, PathBuf::from("processed.json"));
        assert_eq!(config.report.output_dir, PathBuf::from("final_output"));
        assert_eq!(config.pipeline.entry_delay_ms, 1_500);
        assert!(config.sink.endpoint.is_none());
        assert!(config.output.color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: ConcallConfig = toml::from_str(
            r#"
            [extraction]
            max_attempts = 5

            [sink]
            endpoint = "https://example.com/wp-json/stock-analysis/v1/screener"
            "#,
        )
        .unwrap();

        assert_eq!(config.extraction.max_attempts, 5);
        assert_eq!(config.extraction.max_content_length, 12_000);
        assert_eq!(
            config.sink.endpoint.as_deref(),
            Some("https://example.com/wp-json/stock-analysis/v1/screener")
        );
        assert_eq!(config.llm.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = ConcallConfig::default();
        config.pipeline.entry_delay_ms = 250;
        config.output.format = OutputFormat::Json;
        config.save_to(&path).unwrap();

        let loaded = ConcallConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConcallConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_validate_names_section() {
        let mut config = ConcallConfig::default();
        config.extraction.max_attempts = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("[extraction]"));
    }

    #[test]
    fn test_validate_rejects_bad_temperature() {
        let mut config = ConcallConfig::default();
        config.llm.temperature = 3.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_precedence() {
        let mut config = ConcallConfig::default();
        assert!(config.resolve_api_key(None).is_err());

        config.llm.api_key = Some("from-file".to_string());
        assert_eq!(config.resolve_api_key(None).unwrap(), "from-file");
        assert_eq!(config.resolve_api_key(Some("from-flag")).unwrap(), "from-flag");
        assert!(config.resolve_api_key(Some("   ")).is_err());
    }

    #[test]
    fn test_redacted_hides_key() {
        let mut config = ConcallConfig::default();
        config.llm.api_key = Some("gsk_secret".to_string());
        let shown = config.redacted().to_toml().unwrap();
        assert!(!shown.contains("gsk_secret"));
    }
}
