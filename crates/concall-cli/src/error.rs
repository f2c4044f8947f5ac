//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// LLM provider could not be built
    #[error("LLM error: {0}")]
    Llm(#[from] concall_llm::LlmError),

    /// Resolver could not be built
    #[error("Resolver error: {0}")]
    Resolve(#[from] concall_resolver::ResolveError),

    /// Extractor could not be built
    #[error("Extractor error: {0}")]
    Extractor(#[from] concall_extractor::ExtractorError),

    /// Processed set could not be loaded or updated
    #[error("Processed set error: {0}")]
    Store(#[from] concall_store::StoreError),

    /// Output directory or sink could not be set up
    #[error("Report error: {0}")]
    Report(#[from] concall_report::ReportError),

    /// Entries could not be discovered
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] concall_pipeline::PipelineError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The run was interrupted before every entry was handled
    #[error("Interrupted; unfinished subjects will be retried on the next run")]
    Interrupted,
}
