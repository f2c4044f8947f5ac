//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractorError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// A single request exceeded the configured timeout
    #[error("Extraction timeout")]
    Timeout,

    /// The model's content could not be read as the expected JSON object
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Every attempt failed
    #[error("Extraction failed after {attempts} attempts: {last}")]
    ExtractionFailed {
        /// Number of attempts made
        attempts: u32,
        /// Failure of the final attempt
        last: Box<ExtractorError>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractorError {
    /// Short stable name of the failure kind, for summaries and logs
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractorError::Llm(_) => "llm",
            ExtractorError::Timeout => "timeout",
            ExtractorError::MalformedResponse(_) => "malformed_response",
            ExtractorError::ExtractionFailed { .. } => "extraction_failed",
            ExtractorError::Config(_) => "config",
        }
    }
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::MalformedResponse(e.to_string())
    }
}
