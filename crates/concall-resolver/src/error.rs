//! Error types for content resolution

use thiserror::Error;

/// Errors that can occur while turning an entry's link into plain text
///
/// None of these are retried: a transcript either exists or it does not, and
/// a transient fetch failure simply leaves the entry for the next run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No 11-character video identifier in a video link
    #[error("No video id found in link: {0}")]
    LinkFormat(String),

    /// The video has no transcript (or it could not be read)
    #[error("Transcript unavailable for video {video_id}: {reason}")]
    TranscriptUnavailable {
        /// Video identifier
        video_id: String,
        /// Why the transcript could not be obtained
        reason: String,
    },

    /// Network failure or non-success status while downloading
    #[error("Fetch failed for {url}: {reason}")]
    Fetch {
        /// URL being fetched
        url: String,
        /// Status or transport error
        reason: String,
    },

    /// The downloaded document could not be parsed
    #[error("Document parse error: {0}")]
    DocumentParse(String),

    /// Resolution succeeded but produced no text
    #[error("Resolved content is empty")]
    EmptyContent,

    /// The link is neither a video nor a document
    #[error("Unsupported link kind: {0}")]
    UnsupportedLinkKind(String),

    /// HTTP client could not be constructed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ResolveError {
    /// Short stable name of the failure kind, for summaries and logs
    pub fn kind(&self) -> &'static str {
        match self {
            ResolveError::LinkFormat(_) => "link_format",
            ResolveError::TranscriptUnavailable { .. } => "transcript_unavailable",
            ResolveError::Fetch { .. } => "fetch",
            ResolveError::DocumentParse(_) => "document_parse",
            ResolveError::EmptyContent => "empty_content",
            ResolveError::UnsupportedLinkKind(_) => "unsupported_link",
            ResolveError::Config(_) => "config",
        }
    }
}
