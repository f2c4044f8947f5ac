//! Error types for pipeline startup
//!
//! Per-entry failures never appear here; they become `EntryOutcome` values.

use thiserror::Error;

/// Errors that abort a run before any entry is processed
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The discovery collaborator could not supply entries
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// The processed set could not be opened
    #[error("Storage error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
