//! Concall Pipeline
//!
//! Orchestrates a daily batch of disclosure entries through resolution,
//! extraction, reporting and the processed set.
//!
//! # Overview
//!
//! For each entry, in discovery order:
//!
//! ```text
//! ProcessedSet.contains? ──yes──▶ skip
//!        │ no
//!        ▼
//! ContentResolver ──err──▶ log, next entry
//!        ▼
//! Extractor (bounded retries) ──err──▶ log, next entry
//!        ▼
//! ReportWriter::persist ──▶ ProcessedSet.mark_done ──▶ sink (best-effort)
//! ```
//!
//! A single worker processes entries strictly one after another with a
//! fixed pause between them. No entry failure aborts the batch; a failure
//! before the batch starts (discovery, store) is fatal and surfaces as a
//! [`PipelineError`].
//!
//! # Configuration
//!
//! ```toml
//! [pipeline]
//! entry_delay_ms = 1500
//! ```

#![warn(missing_docs)]

mod config;
mod discovery;
mod error;
mod metrics;
mod pipeline;

pub use config::PipelineConfig;
pub use discovery::{
    default_target_date, filter_by_date, target_date_for, JsonEntrySource, LISTING_DATE_FORMAT,
};
pub use error::PipelineError;
pub use metrics::{EntryOutcome, EntryReport, ForwardStatus, RunSummary};
pub use pipeline::Pipeline;
