//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_extraction;
use crate::prompt::{truncate_chars, PromptBuilder};
use crate::retry::{retry_with_backoff, RetryError};
use concall_domain::traits::LlmProvider;
use concall_domain::ExtractionResult;
use std::fmt::Display;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// The Extractor converts resolved text into the six canonical fields
pub struct Extractor<L>
where
    L: LlmProvider,
{
    llm_provider: L,
    config: ExtractorConfig,
}

impl<L> Extractor<L>
where
    L: LlmProvider + Sync,
    L::Error: Display,
{
    /// Create a new Extractor
    ///
    /// # Errors
    ///
    /// `Config` if the configuration does not validate.
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self {
            llm_provider,
            config,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Name of the model behind the provider
    pub fn model_name(&self) -> &str {
        self.llm_provider.model_name()
    }

    /// Extract the canonical fields from a subject's resolved text
    ///
    /// The text is cut to `max_content_length` characters before prompting.
    /// Each attempt is bounded by `request_timeout`; a timeout, provider error
    /// or unparseable answer is retried until `max_attempts` is spent.
    ///
    /// # Errors
    ///
    /// `ExtractionFailed` carrying the final attempt's error.
    pub async fn extract(
        &self,
        subject_id: &str,
        text: &str,
    ) -> Result<ExtractionResult, ExtractorError> {
        let content = truncate_chars(text, self.config.max_content_length);
        if content.len() < text.len() {
            debug!(
                "Truncated text for '{}' to {} characters",
                subject_id, self.config.max_content_length
            );
        }

        let prompt = PromptBuilder::new(content).with_subject(subject_id).build();

        info!(
            "Extracting fields for '{}' with {} (prompt {} chars)",
            subject_id,
            self.llm_provider.model_name(),
            prompt.len()
        );

        let outcome = retry_with_backoff(
            self.config.max_attempts,
            self.config.retry_base_delay(),
            |attempt| self.attempt(&prompt, attempt),
        )
        .await;

        match outcome {
            Ok(result) => {
                info!("Extraction complete for '{}': symbol {}", subject_id, result.nse_symbol);
                Ok(result)
            }
            Err(RetryError { attempts, last }) => {
                warn!("Extraction failed for '{}' after {} attempts", subject_id, attempts);
                Err(ExtractorError::ExtractionFailed {
                    attempts,
                    last: Box::new(last),
                })
            }
        }
    }

    /// One request plus parse
    async fn attempt(&self, prompt: &str, attempt: u32) -> Result<ExtractionResult, ExtractorError> {
        debug!("Extraction attempt {}/{}", attempt, self.config.max_attempts);

        let content = timeout(
            self.config.request_timeout(),
            self.llm_provider.generate_structured(prompt),
        )
        .await
        .map_err(|_| ExtractorError::Timeout)?
        .map_err(|e| ExtractorError::Llm(e.to_string()))?;

        debug!("LLM response length: {} chars", content.len());
        let result = parse_extraction(&content)?;
        result.validate().map_err(ExtractorError::MalformedResponse)?;
        Ok(result)
    }
}
