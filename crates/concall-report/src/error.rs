//! Error types for reporting

use thiserror::Error;

/// Errors that can occur while persisting or forwarding a record
#[derive(Error, Debug)]
pub enum ReportError {
    /// Writing the local artifact failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sink rejected the record or could not be reached
    #[error("Sink forward failed{}: {message}", .status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default())]
    SinkForward {
        /// HTTP status, when the sink answered
        status: Option<u16>,
        /// Response body or transport error
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ReportError {
    /// Short stable name of the failure kind, for summaries and logs
    pub fn kind(&self) -> &'static str {
        match self {
            ReportError::Io(_) => "io",
            ReportError::SinkForward { .. } => "sink_forward",
            ReportError::Config(_) => "config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_forward_message() {
        let with_status = ReportError::SinkForward {
            status: Some(502),
            message: "bad gateway".to_string(),
        };
        assert_eq!(with_status.to_string(), "Sink forward failed (HTTP 502): bad gateway");

        let transport = ReportError::SinkForward {
            status: None,
            message: "connection refused".to_string(),
        };
        assert_eq!(transport.to_string(), "Sink forward failed: connection refused");
    }
}
