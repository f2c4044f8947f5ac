//! Concall Domain Layer
//!
//! This crate contains the data model shared by every stage of the disclosure
//! pipeline. It has ZERO external dependencies and defines the value types and
//! trait interfaces that the infrastructure crates implement.
//!
//! ## Key Concepts
//!
//! - **Entry**: one discovered disclosure link for a subject (company) on a date
//! - **ResolvedContent**: plain text derived from an entry's link
//! - **ExtractionResult**: the six canonical financial fields produced by the LLM
//! - **Record**: an extraction result bound to its entry identity, ready to persist
//! - **ProcessedSet**: the durable ledger of subjects already completed
//!
//! ## Architecture
//!
//! ```text
//! Entry → Resolver → ResolvedContent → Extractor → ExtractionResult
//!       → Formatter → Record → (artifact, ProcessedSet, Sink)
//! ```
//!
//! Infrastructure implementations live in other crates; this crate only names
//! the seams between them.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entry;
pub mod extraction;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use entry::{Entry, LinkKind, ResolvedContent, TranscriptSegment};
pub use extraction::{
    ExtractionResult, MAX_LIST_ITEMS, NOT_AVAILABLE, NO_OPPORTUNITIES, NO_RISKS,
};
pub use record::Record;
