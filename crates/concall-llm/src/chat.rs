//! Chat-completions Provider Implementation
//!
//! Speaks the OpenAI-compatible `/chat/completions` contract used by Groq and
//! most hosted inference services.
//!
//! # Features
//!
//! - Single user message with a JSON-object response format
//! - Bearer-token authentication
//! - Client-side request timeout (30 seconds by default)
//! - HTTP status mapped onto `LlmError` variants
//!
//! # Examples
//!
//! ```no_run
//! use concall_llm::ChatCompletionProvider;
//! use std::time::Duration;
//!
//! let provider = ChatCompletionProvider::new(
//!     "https://api.groq.com/openai/v1/chat/completions",
//!     "deepseek-r1-distill-llama-70b",
//!     "gsk_...",
//!     Duration::from_secs(30),
//! )
//! .unwrap();
//! ```

use crate::LlmError;
use concall_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default chat-completions endpoint (Groq)
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default model
pub const DEFAULT_MODEL: &str = "deepseek-r1-distill-llama-70b";

/// Default timeout for LLM requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Longest error body kept in `LlmError::Http`
const MAX_ERROR_BODY: usize = 512;

/// Provider for OpenAI-compatible chat-completions endpoints
pub struct ChatCompletionProvider {
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
    client: reqwest::Client,
}

/// Request body for the chat-completions API
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Response from the chat-completions API
#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionProvider {
    /// Create a new provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: full chat-completions URL
    /// - `model`: model identifier
    /// - `api_key`: bearer token
    /// - `timeout`: whole-request timeout
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Other` if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            temperature: DEFAULT_TEMPERATURE,
            client,
        })
    }

    /// Override the sampling temperature (default `0.1`)
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Endpoint this provider posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one chat-completions request and return the message content
    ///
    /// # Errors
    ///
    /// - `Timeout` when the client timeout elapses
    /// - `Communication` on any other transport failure
    /// - `RateLimitExceeded` on HTTP 429
    /// - `Http` on any other non-2xx status
    /// - `InvalidResponse` when the body has no `choices[0].message.content`
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        debug!("POST {} (model {}, prompt {} chars)", self.endpoint, self.model, prompt.len());

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Http {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let chat_response = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
                }
            })?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                LlmError::InvalidResponse("Response has no choices[0].message.content".to_string())
            })
    }
}

fn map_transport_error(e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout
    } else {
        LlmError::Communication(format!("Request failed: {}", e))
    }
}

impl LlmProviderTrait for ChatCompletionProvider {
    type Error = LlmError;

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate_structured(&self, prompt: &str) -> Result<String, Self::Error> {
        self.complete(prompt).await
    }
}
