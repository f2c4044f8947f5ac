//! Concall LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `concall-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic, scriptable mock for testing
//! - `ChatCompletionProvider`: OpenAI-compatible chat-completions API (Groq by default)
//!
//! Providers make exactly one request per call. Retry and backoff live in the
//! extractor so that the attempt budget is owned by one place.
//!
//! # Examples
//!
//! ```
//! use concall_llm::MockProvider;
//! use concall_domain::traits::LlmProvider;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let provider = MockProvider::new(r#"{"NSE symbol": "ACME"}"#);
//! let result = provider.generate_structured("test prompt").await.unwrap();
//! assert_eq!(result, r#"{"NSE symbol": "ACME"}"#);
//! # }
//! ```

#![warn(missing_docs)]

pub mod chat;

use concall_domain::traits::LlmProvider as LlmProviderTrait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tokio::time::Instant;

pub use chat::ChatCompletionProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The request did not complete within the client timeout
    #[error("Request timed out")]
    Timeout,

    /// Non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Http {
        /// Status code returned by the service
        status: u16,
        /// Response body (possibly truncated)
        body: String,
    },

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Mock LLM provider for deterministic testing
///
/// Returns scripted outcomes without making any network calls. Queued outcomes
/// are consumed first (FIFO); once the queue is empty every call yields the
/// fallback outcome. Clones share state, so a test can keep a handle while the
/// extractor owns another.
///
/// # Examples
///
/// ```
/// use concall_llm::{LlmError, MockProvider};
/// use concall_domain::traits::LlmProvider;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let provider = MockProvider::new("{}");
/// provider.push_error(LlmError::Timeout);
///
/// assert!(provider.generate_structured("a").await.is_err());
/// assert_eq!(provider.generate_structured("b").await.unwrap(), "{}");
/// assert_eq!(provider.call_count(), 2);
/// assert_eq!(provider.prompts(), vec!["a".to_string(), "b".to_string()]);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    model_name: String,
    state: Arc<Mutex<MockState>>,
}

#[derive(Debug)]
struct MockState {
    fallback: Result<String, LlmError>,
    queued: VecDeque<Result<String, LlmError>>,
    prompts: Vec<String>,
    call_instants: Vec<Instant>,
}

impl MockProvider {
    /// Create a MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_fallback(Ok(response.into()))
    }

    /// Create a MockProvider whose every call fails with the given error
    pub fn failing(error: LlmError) -> Self {
        Self::with_fallback(Err(error))
    }

    fn with_fallback(fallback: Result<String, LlmError>) -> Self {
        Self {
            model_name: "mock".to_string(),
            state: Arc::new(Mutex::new(MockState {
                fallback,
                queued: VecDeque::new(),
                prompts: Vec::new(),
                call_instants: Vec::new(),
            })),
        }
    }

    /// Override the reported model name
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    /// Queue a successful response for the next unanswered call
    pub fn push_response(&self, response: impl Into<String>) {
        self.state().queued.push_back(Ok(response.into()));
    }

    /// Queue a failure for the next unanswered call
    pub fn push_error(&self, error: LlmError) {
        self.state().queued.push_back(Err(error));
    }

    /// Get the number of times the provider was called
    pub fn call_count(&self) -> usize {
        self.state().prompts.len()
    }

    /// Prompts received, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.state().prompts.clone()
    }

    /// Instants at which each call arrived (tokio clock, so paused time works)
    pub fn call_instants(&self) -> Vec<Instant> {
        self.state().call_instants.clone()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("{}")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn generate_structured(&self, prompt: &str) -> Result<String, Self::Error> {
        let mut state = self.state();
        state.prompts.push(prompt.to_string());
        state.call_instants.push(Instant::now());

        match state.queued.pop_front() {
            Some(outcome) => outcome,
            None => state.fallback.clone(),
        }
    }
}
