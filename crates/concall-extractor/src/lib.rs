//! Concall Extractor
//!
//! Turns resolved disclosure text into the six canonical financial fields using
//! an LLM.
//!
//! # Overview
//!
//! One call to [`Extractor::extract`] truncates the text to the configured
//! character budget, builds a single instruction prompt and asks the provider
//! for a JSON object. Failed attempts (timeout, provider error, unparseable
//! content) are retried a bounded number of times with a linearly growing
//! delay.
//!
//! # Architecture
//!
//! ```text
//! text → truncate → PromptBuilder → retry_with_backoff(LLM → parse) → ExtractionResult
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use concall_extractor::{Extractor, ExtractorConfig};
//! use concall_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(r#"{"NSE symbol": "ACME", "Revenue Growth": "20%"}"#);
//! let extractor = Extractor::new(llm, ExtractorConfig::default())?;
//!
//! let result = extractor.extract("AcmeCorp", "Revenue grew 20%").await?;
//! assert_eq!(result.nse_symbol, "ACME");
//! assert_eq!(result.profit_growth, "N/A");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
pub mod retry;

#[cfg(test)]
mod tests;

pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use parser::parse_extraction;
pub use prompt::{truncate_chars, PromptBuilder};
pub use retry::{retry_with_backoff, LinearBackoff, RetryError};
