//! Concall Content Resolver
//!
//! Turns an [`Entry`] into plain text. The link decides the path:
//!
//! ```text
//! video link    → video id → transcript segments → newline-joined text
//! document link → GET bytes → PDF text layer     → text
//! anything else → UnsupportedLinkKind
//! ```
//!
//! Nothing here retries. Every failure is reported as a [`ResolveError`] and
//! the pipeline moves on to the next entry.

#![warn(missing_docs)]

mod config;
mod document;
mod error;
mod video;

pub use config::ResolverConfig;
pub use document::{extract_pdf_text, HttpDocumentFetcher};
pub use error::ResolveError;
pub use video::{extract_video_id, YoutubeTranscriptSource, DEFAULT_VIDEO_HOST};

use concall_domain::traits::{DocumentFetcher, TranscriptSource};
use concall_domain::{Entry, LinkKind, ResolvedContent};
use tracing::{debug, info};

/// Resolves entries into plain text through a transcript source and a
/// document fetcher
pub struct ContentResolver<T, D> {
    transcripts: T,
    documents: D,
}

impl ContentResolver<YoutubeTranscriptSource, HttpDocumentFetcher> {
    /// Build the network-backed resolver from configuration
    pub fn from_config(config: &ResolverConfig) -> Result<Self, ResolveError> {
        config.validate().map_err(ResolveError::Config)?;
        Ok(Self::new(
            YoutubeTranscriptSource::new(config.transcript_language.clone())?,
            HttpDocumentFetcher::new(config.document_timeout())?,
        ))
    }
}

impl<T, D> ContentResolver<T, D>
where
    T: TranscriptSource + Sync,
    D: DocumentFetcher + Sync,
    T::Error: Into<ResolveError>,
    D::Error: Into<ResolveError>,
{
    /// Create a resolver over the given collaborators
    pub fn new(transcripts: T, documents: D) -> Self {
        Self {
            transcripts,
            documents,
        }
    }

    /// Resolve an entry into plain text
    ///
    /// # Errors
    ///
    /// - `UnsupportedLinkKind` when the link is neither video nor document
    /// - `LinkFormat` / `TranscriptUnavailable` on the video path
    /// - `Fetch` / `DocumentParse` on the document path
    /// - `EmptyContent` when the resolved text is blank
    pub async fn resolve(&self, entry: &Entry) -> Result<ResolvedContent, ResolveError> {
        let kind = entry.link_kind();
        debug!("Resolving {} link for '{}'", kind, entry.subject_id);

        let content = match kind {
            LinkKind::Video => self.resolve_video(entry).await?,
            LinkKind::Document => self.resolve_document(entry).await?,
            LinkKind::Unsupported => {
                return Err(ResolveError::UnsupportedLinkKind(entry.link.clone()))
            }
        };

        if content.is_blank() {
            return Err(ResolveError::EmptyContent);
        }

        info!(
            "Resolved {} for '{}': {} chars",
            kind,
            entry.subject_id,
            content.text.chars().count()
        );
        Ok(content)
    }

    async fn resolve_video(&self, entry: &Entry) -> Result<ResolvedContent, ResolveError> {
        let video_id = extract_video_id(&entry.link)?;
        let segments = self
            .transcripts
            .fetch_transcript(&video_id)
            .await
            .map_err(Into::into)?;

        debug!("Transcript for {} has {} segments", video_id, segments.len());
        Ok(ResolvedContent::from_segments(&entry.subject_id, &segments))
    }

    async fn resolve_document(&self, entry: &Entry) -> Result<ResolvedContent, ResolveError> {
        let bytes = self
            .documents
            .fetch(&entry.link)
            .await
            .map_err(Into::into)?;

        debug!("Fetched {} bytes from {}", bytes.len(), entry.link);

        // pdf-extract is CPU-bound and may panic on hostile input; the blocking
        // pool keeps both away from the runtime.
        let text = tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
            .await
            .map_err(|e| ResolveError::DocumentParse(format!("PDF extraction aborted: {}", e)))??;

        Ok(ResolvedContent {
            subject_id: entry.subject_id.clone(),
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concall_domain::TranscriptSegment;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticTranscripts(Result<Vec<&'static str>, ResolveError>);

    impl TranscriptSource for StaticTranscripts {
        type Error = ResolveError;

        async fn fetch_transcript(&self, _video_id: &str) -> Result<Vec<TranscriptSegment>, ResolveError> {
            self.0.clone().map(|texts| {
                texts
                    .into_iter()
                    .enumerate()
                    .map(|(i, text)| TranscriptSegment {
                        text: text.to_string(),
                        offset_ms: i as u64 * 1_000,
                        duration_ms: 1_000,
                    })
                    .collect()
            })
        }
    }

    #[derive(Default)]
    struct StaticDocuments {
        bytes: Vec<u8>,
        calls: AtomicUsize,
    }

    impl DocumentFetcher for StaticDocuments {
        type Error = ResolveError;

        async fn fetch(&self, _url: &str) -> Result<Vec<u8>, ResolveError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.bytes.clone())
        }
    }

    fn resolver(
        transcripts: Result<Vec<&'static str>, ResolveError>,
        bytes: Vec<u8>,
    ) -> ContentResolver<StaticTranscripts, StaticDocuments> {
        ContentResolver::new(
            StaticTranscripts(transcripts),
            StaticDocuments {
                bytes,
                calls: AtomicUsize::new(0),
            },
        )
    }

    #[tokio::test]
    async fn test_resolve_video_joins_segments() {
        let resolver = resolver(Ok(vec!["Revenue grew 20%", "Profit grew 10%"]), Vec::new());
        let entry = Entry::new("AcmeCorp", "https://youtu.be/dQw4w9WgXcQ", "15 March 2024");

        let content = resolver.resolve(&entry).await.unwrap();
        assert_eq!(content.subject_id, "AcmeCorp");
        assert_eq!(content.text, "Revenue grew 20%\nProfit grew 10%");
    }

    #[tokio::test]
    async fn test_resolve_video_bad_link() {
        let resolver = resolver(Ok(vec!["unused"]), Vec::new());
        let entry = Entry::new("AcmeCorp", "https://youtube.com/short", "15 March 2024");

        let err = resolver.resolve(&entry).await.unwrap_err();
        assert!(matches!(err, ResolveError::LinkFormat(_)));
    }

    #[tokio::test]
    async fn test_resolve_video_without_transcript() {
        let unavailable = ResolveError::TranscriptUnavailable {
            video_id: "dQw4w9WgXcQ".to_string(),
            reason: "disabled".to_string(),
        };
        let resolver = resolver(Err(unavailable.clone()), Vec::new());
        let entry = Entry::new("AcmeCorp", "https://youtu.be/dQw4w9WgXcQ", "15 March 2024");

        let err = resolver.resolve(&entry).await.unwrap_err();
        assert_eq!(err, unavailable);
    }

    #[tokio::test]
    async fn test_resolve_empty_transcript_is_empty_content() {
        let resolver = resolver(Ok(vec!["", "  "]), Vec::new());
        let entry = Entry::new("AcmeCorp", "https://youtu.be/dQw4w9WgXcQ", "15 March 2024");

        let err = resolver.resolve(&entry).await.unwrap_err();
        assert_eq!(err, ResolveError::EmptyContent);
    }

    #[tokio::test]
    async fn test_resolve_document_with_invalid_bytes() {
        let resolver = resolver(Ok(vec![]), b"definitely not a pdf".to_vec());
        let entry = Entry::new("AcmeCorp", "https://example.com/q3.pdf", "15 March 2024");

        let err = resolver.resolve(&entry).await.unwrap_err();
        assert!(matches!(err, ResolveError::DocumentParse(_)));
        assert_eq!(resolver.documents.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_resolve_document_with_valid_pdf() {
        let pdf = document::tests::make_test_pdf("Revenue grew 20 percent");
        let resolver = resolver(Ok(vec![]), pdf);
        let entry = Entry::new("AcmeCorp", "https://example.com/q3.pdf", "15 March 2024");

        let content = resolver.resolve(&entry).await.unwrap();
        assert!(content.text.contains("Revenue") || content.text.contains("percent"));
    }

    #[tokio::test]
    async fn test_resolve_unsupported_link() {
        let resolver = resolver(Ok(vec!["unused"]), Vec::new());
        let entry = Entry::new("AcmeCorp", "https://example.com/announcement.html", "15 March 2024");

        let err = resolver.resolve(&entry).await.unwrap_err();
        assert!(matches!(err, ResolveError::UnsupportedLinkKind(_)));
        assert_eq!(resolver.documents.calls.load(Ordering::SeqCst), 0);
    }
}
