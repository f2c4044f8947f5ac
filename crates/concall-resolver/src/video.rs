//! Video path: video id extraction and transcript fetching
//!
//! The transcript source reads the caption-track list embedded in the video's
//! watch page, picks a track (preferring the configured language) and decodes
//! its timed-text XML into ordered segments.

use crate::error::ResolveError;
use concall_domain::traits::TranscriptSource;
use concall_domain::TranscriptSegment;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use tracing::debug;

/// Default host serving watch pages
pub const DEFAULT_VIDEO_HOST: &str = "https://www.youtube.com";

static VIDEO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:v=|/)([A-Za-z0-9_-]{11})").unwrap());

static TIMED_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<text start="([\d.]+)" dur="([\d.]+)"[^>]*>(.*?)</text>"#).unwrap()
});

static NUMERIC_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(x[0-9A-Fa-f]+|\d+);").unwrap());

/// Extract the 11-character video identifier from a video link
///
/// # Examples
///
/// ```
/// use concall_resolver::extract_video_id;
///
/// assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap(), "dQw4w9WgXcQ");
/// assert_eq!(
///     extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10").unwrap(),
///     "dQw4w9WgXcQ"
/// );
/// assert!(extract_video_id("https://www.youtube.com/").is_err());
/// ```
pub fn extract_video_id(link: &str) -> Result<String, ResolveError> {
    VIDEO_ID
        .captures(link)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ResolveError::LinkFormat(link.to_string()))
}

/// One caption track advertised by a watch page
#[derive(Debug, Clone, Deserialize)]
struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
    #[serde(rename = "languageCode", default)]
    language_code: String,
}

/// Transcript source backed by public video caption tracks
pub struct YoutubeTranscriptSource {
    client: reqwest::Client,
    host: String,
    language: String,
}

impl YoutubeTranscriptSource {
    /// Create a source preferring captions in `language` (e.g. "en")
    ///
    /// No request timeout is set; transcript fetches use the client default.
    pub fn new(language: impl Into<String>) -> Result<Self, ResolveError> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) concall/0.1")
            .build()
            .map_err(|e| ResolveError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            host: DEFAULT_VIDEO_HOST.to_string(),
            language: language.into(),
        })
    }

    /// Point the source at a different watch-page host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into().trim_end_matches('/').to_string();
        self
    }

    async fn get_text(&self, url: &str) -> Result<String, ResolveError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| ResolveError::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Fetch {
                url: url.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        response.text().await.map_err(|e| ResolveError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

impl TranscriptSource for YoutubeTranscriptSource {
    type Error = ResolveError;

    async fn fetch_transcript(&self, video_id: &str) -> Result<Vec<TranscriptSegment>, ResolveError> {
        let unavailable = |reason: String| ResolveError::TranscriptUnavailable {
            video_id: video_id.to_string(),
            reason,
        };

        let watch_url = format!("{}/watch?v={}", self.host, video_id);
        let html = self.get_text(&watch_url).await?;

        let tracks = caption_tracks(&html).map_err(unavailable)?;
        let track = pick_track(&tracks, &self.language)
            .ok_or_else(|| unavailable("no caption tracks".to_string()))?;

        debug!(
            "Fetching {} captions for video {}",
            if track.language_code.is_empty() { "default" } else { track.language_code.as_str() },
            video_id
        );

        let xml = self.get_text(&track.base_url).await?;
        let segments = parse_timed_text(&xml);
        if segments.is_empty() {
            return Err(unavailable("caption track is empty".to_string()));
        }

        Ok(segments)
    }
}

/// Read the caption-track list embedded in a watch page
fn caption_tracks(html: &str) -> Result<Vec<CaptionTrack>, String> {
    let (_, after) = html
        .split_once("\"captions\":")
        .ok_or_else(|| "transcripts are disabled for this video".to_string())?;
    let captions_json = after
        .split_once(",\"videoDetails")
        .map(|(json, _)| json)
        .ok_or_else(|| "malformed caption metadata".to_string())?;

    let captions: serde_json::Value = serde_json::from_str(captions_json)
        .map_err(|e| format!("malformed caption metadata: {}", e))?;

    let tracks = captions
        .get("playerCaptionsTracklistRenderer")
        .and_then(|renderer| renderer.get("captionTracks"))
        .cloned()
        .ok_or_else(|| "no caption tracks".to_string())?;

    serde_json::from_value(tracks).map_err(|e| format!("malformed caption track: {}", e))
}

/// Prefer a track in `language`, otherwise the first advertised one
fn pick_track<'a>(tracks: &'a [CaptionTrack], language: &str) -> Option<&'a CaptionTrack> {
    tracks
        .iter()
        .find(|t| t.language_code == language)
        .or_else(|| tracks.first())
}

/// Decode a timed-text XML document into segments, in document order
fn parse_timed_text(xml: &str) -> Vec<TranscriptSegment> {
    TIMED_TEXT
        .captures_iter(xml)
        .map(|caps| TranscriptSegment {
            offset_ms: seconds_to_ms(&caps[1]),
            duration_ms: seconds_to_ms(&caps[2]),
            text: decode_entities(&caps[3]),
        })
        .collect()
}

fn seconds_to_ms(value: &str) -> u64 {
    value
        .parse::<f64>()
        .map(|secs| (secs * 1000.0).round() as u64)
        .unwrap_or(0)
}

/// Unescape the HTML entities that caption XML carries
///
/// Caption text is frequently double-escaped (`&amp;#39;`), so `&amp;` is
/// collapsed first.
fn decode_entities(raw: &str) -> String {
    let text = raw
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'");

    NUMERIC_ENTITY
        .replace_all(&text, |caps: &regex::Captures| {
            let code = &caps[1];
            let value = match code.strip_prefix('x') {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => code.parse::<u32>().ok(),
            };
            value
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .trim()
        .to_string()
}
