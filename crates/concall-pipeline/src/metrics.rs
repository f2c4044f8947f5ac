//! Per-entry outcomes and run summaries

use concall_extractor::ExtractorError;
use concall_report::ReportError;
use concall_resolver::ResolveError;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// What happened to the record after it was committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardStatus {
    /// The sink accepted the record
    Sent,
    /// The sink failed; the subject stays processed
    Failed(String),
    /// No sink configured
    Disabled,
}

/// Result of processing one entry
#[derive(Debug)]
pub enum EntryOutcome {
    /// Subject already in the processed set; nothing was done
    AlreadyProcessed,

    /// Link is neither a video nor a document
    Unsupported,

    /// Text could not be resolved
    ResolutionFailed(ResolveError),

    /// Every extraction attempt failed
    ExtractionFailed(ExtractorError),

    /// The local artifact could not be written
    PersistFailed(ReportError),

    /// Artifact written but the processed set could not be updated
    MarkFailed {
        /// Artifact that was written
        artifact: PathBuf,
        /// Store failure
        error: String,
    },

    /// Artifact written and subject marked processed
    Completed {
        /// Artifact location
        artifact: PathBuf,
        /// Downstream forwarding result
        forward: ForwardStatus,
    },
}

impl EntryOutcome {
    /// Short stable name of the outcome
    pub fn kind(&self) -> &'static str {
        match self {
            EntryOutcome::AlreadyProcessed => "already_processed",
            EntryOutcome::Unsupported => "unsupported",
            EntryOutcome::ResolutionFailed(_) => "resolution_failed",
            EntryOutcome::ExtractionFailed(_) => "extraction_failed",
            EntryOutcome::PersistFailed(_) => "persist_failed",
            EntryOutcome::MarkFailed { .. } => "mark_failed",
            EntryOutcome::Completed { .. } => "completed",
        }
    }

    /// Whether the subject ended up (or already was) processed
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            EntryOutcome::Completed { .. } | EntryOutcome::AlreadyProcessed
        )
    }

    /// Artifact written for this entry, if any
    pub fn artifact(&self) -> Option<&PathBuf> {
        match self {
            EntryOutcome::Completed { artifact, .. } | EntryOutcome::MarkFailed { artifact, .. } => {
                Some(artifact)
            }
            _ => None,
        }
    }
}

impl fmt::Display for EntryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryOutcome::AlreadyProcessed => write!(f, "already processed"),
            EntryOutcome::Unsupported => write!(f, "unsupported link kind"),
            EntryOutcome::ResolutionFailed(e) => write!(f, "resolution failed: {}", e),
            EntryOutcome::ExtractionFailed(e) => write!(f, "{}", e),
            EntryOutcome::PersistFailed(e) => write!(f, "artifact not written: {}", e),
            EntryOutcome::MarkFailed { artifact, error } => write!(
                f,
                "artifact {} written but not marked processed: {}",
                artifact.display(),
                error
            ),
            EntryOutcome::Completed { artifact, forward } => {
                write!(f, "saved {}", artifact.display())?;
                match forward {
                    ForwardStatus::Sent => write!(f, ", forwarded"),
                    ForwardStatus::Failed(e) => write!(f, ", forward failed: {}", e),
                    ForwardStatus::Disabled => Ok(()),
                }
            }
        }
    }
}

/// One entry's outcome, tagged with its subject
#[derive(Debug)]
pub struct EntryReport {
    /// Subject identifier
    pub subject_id: String,
    /// What happened
    pub outcome: EntryOutcome,
}

/// Counters and per-entry reports for one run
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Entries handled
    pub total: usize,
    /// Newly completed subjects
    pub completed: usize,
    /// Skipped because already processed
    pub already_processed: usize,
    /// Skipped because the link kind is unsupported
    pub unsupported: usize,
    /// Resolution failures
    pub resolution_failed: usize,
    /// Extraction failures
    pub extraction_failed: usize,
    /// Artifact write failures
    pub persist_failed: usize,
    /// Processed-set update failures
    pub mark_failed: usize,
    /// Completed subjects whose forward failed
    pub forward_failed: usize,
    /// Wall time of the run
    pub elapsed: Duration,
    /// Per-entry reports in processing order
    pub reports: Vec<EntryReport>,
}

impl RunSummary {
    /// Create an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one entry's outcome
    pub fn record(&mut self, subject_id: impl Into<String>, outcome: EntryOutcome) {
        self.total += 1;
        match &outcome {
            EntryOutcome::AlreadyProcessed => self.already_processed += 1,
            EntryOutcome::Unsupported => self.unsupported += 1,
            EntryOutcome::ResolutionFailed(_) => self.resolution_failed += 1,
            EntryOutcome::ExtractionFailed(_) => self.extraction_failed += 1,
            EntryOutcome::PersistFailed(_) => self.persist_failed += 1,
            EntryOutcome::MarkFailed { .. } => self.mark_failed += 1,
            EntryOutcome::Completed { forward, .. } => {
                self.completed += 1;
                if matches!(forward, ForwardStatus::Failed(_)) {
                    self.forward_failed += 1;
                }
            }
        }
        self.reports.push(EntryReport {
            subject_id: subject_id.into(),
            outcome,
        });
    }

    /// Entries that failed at any stage
    pub fn total_failed(&self) -> usize {
        self.resolution_failed + self.extraction_failed + self.persist_failed + self.mark_failed
    }

    /// Entries skipped without work
    pub fn total_skipped(&self) -> usize {
        self.already_processed + self.unsupported
    }

    /// One-line tally for logs
    pub fn tally(&self) -> String {
        format!(
            "{} entries: {} completed, {} skipped, {} failed",
            self.total,
            self.completed,
            self.total_skipped(),
            self.total_failed()
        )
    }

    /// Generate a summary report of the run
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Run Summary".to_string(),
            "===========".to_string(),
            format!("Entries: {}", self.total),
            format!("Elapsed: {:.1}s", self.elapsed.as_secs_f64()),
            String::new(),
            format!("Completed: {}", self.completed),
        ];

        if self.forward_failed > 0 {
            lines.push(format!("  Forward failed: {}", self.forward_failed));
        }

        lines.push(format!("Skipped: {}", self.total_skipped()));
        if self.total_skipped() > 0 {
            lines.push(format!("  Already processed: {}", self.already_processed));
            lines.push(format!("  Unsupported link: {}", self.unsupported));
        }

        lines.push(format!("Failed: {}", self.total_failed()));
        if self.total_failed() > 0 {
            lines.push(format!("  Resolution: {}", self.resolution_failed));
            lines.push(format!("  Extraction: {}", self.extraction_failed));
            lines.push(format!("  Persist: {}", self.persist_failed));
            lines.push(format!("  Mark processed: {}", self.mark_failed));
        }

        lines.join("\n")
    }
}
