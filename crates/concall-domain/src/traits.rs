//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates. Network-bound seams
//! return `Send` futures so the pipeline can drive them on a multi-threaded
//! tokio runtime.

use crate::{Entry, Record, TranscriptSegment};
use std::future::Future;

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (concall-llm). One call is one
/// request; retry policy belongs to the caller.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Name of the model answering the prompts
    fn model_name(&self) -> &str;

    /// Send a prompt in structured (JSON) response mode and return the raw
    /// message content
    fn generate_structured(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Trait for fetching a video transcript
///
/// Implemented by the infrastructure layer (concall-resolver)
pub trait TranscriptSource {
    /// Error type for transcript fetches
    type Error;

    /// Fetch the ordered, timed transcript of a video
    fn fetch_transcript(
        &self,
        video_id: &str,
    ) -> impl Future<Output = Result<Vec<TranscriptSegment>, Self::Error>> + Send;
}

/// Trait for downloading a binary document
///
/// Implemented by the infrastructure layer (concall-resolver)
pub trait DocumentFetcher {
    /// Error type for document fetches
    type Error;

    /// Fetch the raw bytes behind a URL
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, Self::Error>> + Send;
}

/// Trait for the durable set of processed subjects
///
/// Implemented by the infrastructure layer (concall-store)
pub trait ProcessedStore {
    /// Error type for store operations
    type Error;

    /// Whether the subject has already been completed
    fn contains(&self, subject_id: &str) -> bool;

    /// Record the subject as completed; idempotent
    fn mark_done(&mut self, subject_id: &str) -> Result<(), Self::Error>;
}

/// Trait for the downstream consumer of finished records
///
/// Implemented by the infrastructure layer (concall-report)
pub trait RecordSink {
    /// Error type for forwarding
    type Error;

    /// Whether forwarding does anything; a disabled sink accepts every record
    fn is_enabled(&self) -> bool {
        true
    }

    /// Forward one finished record
    fn forward(&self, record: &Record) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Trait for the discovery collaborator that supplies a batch of entries
///
/// Implemented by the application layer (concall-pipeline)
pub trait EntrySource {
    /// Error type for discovery
    type Error;

    /// Return the entries of one batch in discovery order
    fn discover(&self) -> Result<Vec<Entry>, Self::Error>;
}
