//! Discovery boundary: where a run's entries come from
//!
//! The scraper that logs into the source site is an external collaborator; it
//! hands over a JSON array of entries:
//!
//! ```json
//! [
//!   {"companyName": "AcmeCorp", "link": "https://youtu.be/dQw4w9WgXcQ", "date": "15 March 2024"}
//! ]
//! ```

use crate::error::PipelineError;
use chrono::{Days, Local, NaiveDate};
use concall_domain::traits::EntrySource;
use concall_domain::Entry;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Date format used by the source listing ("15 March 2024")
pub const LISTING_DATE_FORMAT: &str = "%d %B %Y";

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(alias = "subjectId", alias = "subject_id", alias = "companyName", alias = "company_name")]
    subject: String,
    link: String,
    #[serde(alias = "publicationDate", alias = "publication_date", alias = "date", default)]
    published: String,
}

impl From<RawEntry> for Entry {
    fn from(raw: RawEntry) -> Self {
        Entry::new(raw.subject.trim(), raw.link.trim(), raw.published.trim())
    }
}

/// Entries read from a JSON file produced by the scraper
#[derive(Debug, Clone)]
pub struct JsonEntrySource {
    path: PathBuf,
}

impl JsonEntrySource {
    /// Read entries from `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File being read
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse entries from JSON text
    pub fn parse(json: &str) -> Result<Vec<Entry>, PipelineError> {
        let raw: Vec<RawEntry> = serde_json::from_str(json)
            .map_err(|e| PipelineError::Discovery(format!("Invalid entries JSON: {}", e)))?;

        let entries: Vec<Entry> = raw.into_iter().map(Entry::from).collect();
        if let Some(blank) = entries.iter().position(|e| e.subject_id.is_empty()) {
            return Err(PipelineError::Discovery(format!(
                "Entry {} has an empty subject",
                blank
            )));
        }
        Ok(entries)
    }
}

impl EntrySource for JsonEntrySource {
    type Error = PipelineError;

    fn discover(&self) -> Result<Vec<Entry>, PipelineError> {
        let json = fs::read_to_string(&self.path).map_err(|e| {
            PipelineError::Discovery(format!("Cannot read {}: {}", self.path.display(), e))
        })?;
        let entries = Self::parse(&json)?;
        info!("Discovered {} entries in {}", entries.len(), self.path.display());
        Ok(entries)
    }
}

/// Keep the entries published on `target_date`, preserving order
///
/// Dates compare after trimming, ignoring ASCII case.
pub fn filter_by_date(entries: Vec<Entry>, target_date: &str) -> Vec<Entry> {
    let target = target_date.trim();
    let before = entries.len();
    let kept: Vec<Entry> = entries
        .into_iter()
        .filter(|e| e.publication_date.trim().eq_ignore_ascii_case(target))
        .collect();
    debug!("{} of {} entries match date {}", kept.len(), before, target);
    kept
}

/// The listing date for the day before `today`
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use concall_pipeline::target_date_for;
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();
/// assert_eq!(target_date_for(today), "15 March 2024");
/// ```
pub fn target_date_for(today: NaiveDate) -> String {
    let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);
    yesterday.format(LISTING_DATE_FORMAT).to_string()
}

/// Yesterday's listing date in local time, the default target of a daily run
pub fn default_target_date() -> String {
    target_date_for(Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scraper_shape() {
        let entries = JsonEntrySource::parse(
            r#"[{"companyName": " AcmeCorp ", "link": "https://youtu.be/dQw4w9WgXcQ", "date": "15 March 2024"}]"#,
        )
        .unwrap();
        assert_eq!(
            entries,
            vec![Entry::new("AcmeCorp", "https://youtu.be/dQw4w9WgXcQ", "15 March 2024")]
        );
    }

    #[test]
    fn test_parse_domain_shape() {
        let entries = JsonEntrySource::parse(
            r#"[{"subjectId": "Globex", "link": "https://example.com/q3.pdf", "publicationDate": "15 March 2024"}]"#,
        )
        .unwrap();
        assert_eq!(entries[0].subject_id, "Globex");
        assert_eq!(entries[0].publication_date, "15 March 2024");
    }

    #[test]
    fn test_parse_rejects_blank_subject() {
        let result = JsonEntrySource::parse(r#"[{"companyName": "  ", "link": "x"}]"#);
        assert!(matches!(result, Err(PipelineError::Discovery(_))));
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(JsonEntrySource::parse(r#"{"companyName": "AcmeCorp"}"#).is_err());
    }

    #[test]
    fn test_discover_missing_file() {
        let source = JsonEntrySource::new("/nonexistent/entries.json");
        assert!(matches!(source.discover(), Err(PipelineError::Discovery(_))));
    }

    #[test]
    fn test_filter_by_date_keeps_order() {
        let entries = vec![
            Entry::new("A", "https://youtu.be/aaaaaaaaaaa", "15 March 2024"),
            Entry::new("B", "https://youtu.be/bbbbbbbbbbb", "14 March 2024"),
            Entry::new("C", "https://youtu.be/ccccccccccc", " 15 march 2024"),
        ];
        let kept = filter_by_date(entries, "15 March 2024");
        let names: Vec<_> = kept.iter().map(|e| e.subject_id.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_target_date_pads_day() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        assert_eq!(target_date_for(today), "05 March 2024");
    }

    #[test]
    fn test_target_date_crosses_year() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(target_date_for(today), "31 December 2023");
    }
}
