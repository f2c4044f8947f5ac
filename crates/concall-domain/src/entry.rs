//! Entry module - one discovered disclosure item and the text resolved from it

use std::fmt;

/// One discovered disclosure item
///
/// Produced by the discovery collaborator once per run and consumed exactly once
/// by the pipeline. The `subject_id` is the deduplication key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Business/company identifier, unique per subject
    pub subject_id: String,

    /// Link to the disclosure (video or document)
    pub link: String,

    /// Publication date as shown by the source (e.g. "15 March 2024")
    pub publication_date: String,
}

impl Entry {
    /// Create a new entry
    ///
    /// # Examples
    ///
    /// ```
    /// use concall_domain::{Entry, LinkKind};
    ///
    /// let entry = Entry::new("AcmeCorp", "https://youtu.be/dQw4w9WgXcQ", "15 March 2024");
    /// assert_eq!(entry.link_kind(), LinkKind::Video);
    /// ```
    pub fn new(
        subject_id: impl Into<String>,
        link: impl Into<String>,
        publication_date: impl Into<String>,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            link: link.into(),
            publication_date: publication_date.into(),
        }
    }

    /// Classify this entry's link
    pub fn link_kind(&self) -> LinkKind {
        LinkKind::classify(&self.link)
    }
}

/// The kind of content a link points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// A hosted video with a transcript (youtube.com / youtu.be)
    Video,
    /// A binary document (PDF)
    Document,
    /// Anything else; skipped by the pipeline
    Unsupported,
}

impl LinkKind {
    /// Classify a link by inspecting its text
    ///
    /// Video hosts win over the document suffix, so a video URL carrying
    /// `.pdf` in a query string is still treated as a video.
    pub fn classify(link: &str) -> Self {
        let lower = link.to_ascii_lowercase();
        if lower.contains("youtu.be") || lower.contains("youtube.com") {
            LinkKind::Video
        } else if lower.contains(".pdf") {
            LinkKind::Document
        } else {
            LinkKind::Unsupported
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LinkKind::Video => "video",
            LinkKind::Document => "document",
            LinkKind::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

/// One timed piece of a video transcript
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSegment {
    /// Spoken text of the segment
    pub text: String,

    /// Start offset from the beginning of the video (milliseconds)
    pub offset_ms: u64,

    /// Segment duration (milliseconds)
    pub duration_ms: u64,
}

/// Plain text derived from an entry
///
/// Not persisted. The text may be arbitrarily long; the extractor bounds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContent {
    /// Subject the text belongs to
    pub subject_id: String,

    /// Resolved plain text
    pub text: String,
}

impl ResolvedContent {
    /// Build resolved content from ordered transcript segments
    ///
    /// Segment texts are joined by newlines in their original order.
    pub fn from_segments(subject_id: impl Into<String>, segments: &[TranscriptSegment]) -> Self {
        let text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            subject_id: subject_id.into(),
            text,
        }
    }

    /// Whether the resolved text carries anything besides whitespace
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str, offset_ms: u64) -> TranscriptSegment {
        TranscriptSegment {
            text: text.to_string(),
            offset_ms,
            duration_ms: 1_000,
        }
    }

    #[test]
    fn test_classify_video_links() {
        assert_eq!(LinkKind::classify("https://youtu.be/dQw4w9WgXcQ"), LinkKind::Video);
        assert_eq!(
            LinkKind::classify("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            LinkKind::Video
        );
        assert_eq!(LinkKind::classify("https://WWW.YOUTUBE.COM/watch?v=x"), LinkKind::Video);
    }

    #[test]
    fn test_classify_document_links() {
        assert_eq!(
            LinkKind::classify("https://www.bseindia.com/xml-data/corpfiling/abc.pdf"),
            LinkKind::Document
        );
        assert_eq!(LinkKind::classify("https://example.com/Report.PDF"), LinkKind::Document);
    }

    #[test]
    fn test_classify_unsupported_links() {
        assert_eq!(LinkKind::classify("https://example.com/page.html"), LinkKind::Unsupported);
        assert_eq!(LinkKind::classify(""), LinkKind::Unsupported);
    }

    #[test]
    fn test_from_segments_preserves_order() {
        let segments = vec![segment("Revenue grew 20%", 0), segment("Profit grew 10%", 2_000)];
        let content = ResolvedContent::from_segments("AcmeCorp", &segments);
        assert_eq!(content.subject_id, "AcmeCorp");
        assert_eq!(content.text, "Revenue grew 20%\nProfit grew 10%");
    }

    #[test]
    fn test_blank_content() {
        let content = ResolvedContent::from_segments("AcmeCorp", &[]);
        assert!(content.is_blank());

        let content = ResolvedContent {
            subject_id: "AcmeCorp".to_string(),
            text: " \n\t".to_string(),
        };
        assert!(content.is_blank());
    }
}
