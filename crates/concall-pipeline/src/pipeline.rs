//! Core orchestrator: one entry at a time, failures isolated per entry

use crate::config::PipelineConfig;
use crate::metrics::{EntryOutcome, ForwardStatus, RunSummary};
use concall_domain::traits::{
    DocumentFetcher, LlmProvider, ProcessedStore, RecordSink, TranscriptSource,
};
use concall_domain::Entry;
use concall_extractor::Extractor;
use concall_report::{format_record, ReportWriter};
use concall_resolver::{ContentResolver, ResolveError};
use std::fmt::Display;
use tokio::time::{sleep, Instant};
use tracing::{error, info, warn};

/// Sequences resolver → extractor → artifact → processed set → sink for each
/// entry of a batch
///
/// # Ordering
///
/// A subject is marked processed only after its artifact is on disk, and the
/// sink is called only after the mark. An interruption at any point leaves the
/// subject unmarked, so the next run picks it up again.
///
/// # Examples
///
/// ```no_run
/// use concall_domain::Entry;
/// use concall_extractor::{Extractor, ExtractorConfig};
/// use concall_llm::MockProvider;
/// use concall_pipeline::{Pipeline, PipelineConfig};
/// use concall_report::{HttpSink, ReportWriter};
/// use concall_resolver::{ContentResolver, ResolverConfig};
/// use concall_store::ProcessedSetStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut pipeline = Pipeline::new(
///     ContentResolver::from_config(&ResolverConfig::default())?,
///     Extractor::new(MockProvider::new("{}"), ExtractorConfig::default())?,
///     ProcessedSetStore::open("processed.json")?,
///     ReportWriter::new("final_output"),
///     HttpSink::disabled(),
///     PipelineConfig::default(),
/// );
///
/// let entries = vec![Entry::new("AcmeCorp", "https://youtu.be/dQw4w9WgXcQ", "15 March 2024")];
/// let summary = pipeline.run(&entries).await;
/// println!("{}", summary.summary());
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<T, D, L, S, K>
where
    L: LlmProvider,
{
    resolver: ContentResolver<T, D>,
    extractor: Extractor<L>,
    store: S,
    writer: ReportWriter,
    sink: K,
    config: PipelineConfig,
}

impl<T, D, L, S, K> Pipeline<T, D, L, S, K>
where
    T: TranscriptSource + Sync,
    D: DocumentFetcher + Sync,
    T::Error: Into<ResolveError>,
    D::Error: Into<ResolveError>,
    L: LlmProvider + Sync,
    L::Error: Display,
    S: ProcessedStore,
    S::Error: Display,
    K: RecordSink + Sync,
    K::Error: Display,
{
    /// Assemble a pipeline from its collaborators
    pub fn new(
        resolver: ContentResolver<T, D>,
        extractor: Extractor<L>,
        store: S,
        writer: ReportWriter,
        sink: K,
        config: PipelineConfig,
    ) -> Self {
        Self {
            resolver,
            extractor,
            store,
            writer,
            sink,
            config,
        }
    }

    /// The processed set
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the processed set
    pub fn into_store(self) -> S {
        self.store
    }

    /// Process every entry in discovery order
    ///
    /// Never aborts: each entry's failure is logged and recorded in the
    /// summary. Consecutive entries are separated by the configured delay,
    /// whatever the previous outcome.
    pub async fn run(&mut self, entries: &[Entry]) -> RunSummary {
        let start = Instant::now();
        let mut summary = RunSummary::new();

        info!("Processing {} entries", entries.len());

        for (idx, entry) in entries.iter().enumerate() {
            if idx > 0 {
                sleep(self.config.entry_delay()).await;
            }

            info!("Processing {} ({}/{})", entry.subject_id, idx + 1, entries.len());
            let outcome = self.process_entry(entry).await;
            log_outcome(&entry.subject_id, &outcome);
            summary.record(entry.subject_id.clone(), outcome);
        }

        summary.elapsed = start.elapsed();
        info!("Run complete: {}", summary.tally());
        summary
    }

    /// Process one entry
    ///
    /// 1. Skip if the subject is already processed
    /// 2. Resolve the link to text
    /// 3. Extract the canonical fields (retries live in the extractor)
    /// 4. Write the artifact, then mark the subject processed
    /// 5. Forward the record, best-effort
    pub async fn process_entry(&mut self, entry: &Entry) -> EntryOutcome {
        if self.store.contains(&entry.subject_id) {
            return EntryOutcome::AlreadyProcessed;
        }

        let content = match self.resolver.resolve(entry).await {
            Ok(content) => content,
            Err(ResolveError::UnsupportedLinkKind(_)) => return EntryOutcome::Unsupported,
            Err(e) => return EntryOutcome::ResolutionFailed(e),
        };

        let result = match self.extractor.extract(&entry.subject_id, &content.text).await {
            Ok(result) => result,
            Err(e) => return EntryOutcome::ExtractionFailed(e),
        };

        let record = format_record(entry, &result);

        let artifact = match self.writer.persist(&record) {
            Ok(path) => path,
            Err(e) => return EntryOutcome::PersistFailed(e),
        };

        if let Err(e) = self.store.mark_done(&entry.subject_id) {
            return EntryOutcome::MarkFailed {
                artifact,
                error: e.to_string(),
            };
        }

        let forward = if !self.sink.is_enabled() {
            ForwardStatus::Disabled
        } else {
            match self.sink.forward(&record).await {
                Ok(()) => ForwardStatus::Sent,
                Err(e) => ForwardStatus::Failed(e.to_string()),
            }
        };

        EntryOutcome::Completed { artifact, forward }
    }
}

fn log_outcome(subject_id: &str, outcome: &EntryOutcome) {
    match outcome {
        EntryOutcome::Completed {
            forward: ForwardStatus::Failed(_),
            ..
        } => warn!("{}: {}", subject_id, outcome),
        EntryOutcome::Completed { .. } => info!("{}: {}", subject_id, outcome),
        EntryOutcome::AlreadyProcessed => info!("Company {} already processed", subject_id),
        EntryOutcome::Unsupported => warn!("{}: {}", subject_id, outcome),
        EntryOutcome::ResolutionFailed(_)
        | EntryOutcome::ExtractionFailed(_)
        | EntryOutcome::PersistFailed(_)
        | EntryOutcome::MarkFailed { .. } => error!("{}: {}", subject_id, outcome),
    }
}
