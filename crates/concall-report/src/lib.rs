//! Concall Report Layer
//!
//! Turns an extraction result into a [`Record`](concall_domain::Record), writes
//! the human-readable artifact and forwards the record downstream.
//!
//! # Architecture
//!
//! ```text
//! (Entry, ExtractionResult) → format_record → Record ─┬─▶ ReportWriter::persist → <name>_analysis_<ms>.txt
//!                                                     └─▶ HttpSink::forward      → POST JSON (best-effort)
//! ```

#![warn(missing_docs)]

mod artifact;
mod config;
mod error;
mod format;
mod sink;

pub use artifact::{sanitize_filename, ReportWriter, MAX_FILENAME_STEM};
pub use config::{ReportConfig, SinkConfig};
pub use error::ReportError;
pub use format::{format_record, render_bullets, report_text, BULLET};
pub use sink::{HttpSink, SinkPayload};
