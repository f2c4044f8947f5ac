//! Document path: binary download and PDF text extraction

use crate::error::ResolveError;
use concall_domain::traits::DocumentFetcher;
use std::time::Duration;

/// Fetches documents with a plain HTTP GET
pub struct HttpDocumentFetcher {
    client: reqwest::Client,
}

impl HttpDocumentFetcher {
    /// Create a fetcher whose requests time out after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, ResolveError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ResolveError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl DocumentFetcher for HttpDocumentFetcher {
    type Error = ResolveError;

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ResolveError> {
        let fetch_error = |reason: String| ResolveError::Fetch {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("HTTP {}", status)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Extract the text layer of a PDF held in memory
///
/// Runs synchronously; callers on the async runtime should move it onto the
/// blocking pool.
pub fn extract_pdf_text(pdf_bytes: &[u8]) -> Result<String, ResolveError> {
    pdf_extract::extract_text_from_mem(pdf_bytes)
        .map_err(|e| ResolveError::DocumentParse(e.to_string()))
}
