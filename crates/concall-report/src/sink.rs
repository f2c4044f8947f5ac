//! HTTP forwarding of finished records

use crate::error::ReportError;
use concall_domain::traits::RecordSink;
use concall_domain::Record;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// JSON body posted to the sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SinkPayload<'a> {
    /// Subject name
    pub company_name: &'a str,
    /// NSE symbol
    pub nse_symbol: &'a str,
    /// Revenue growth
    pub revenue_growth: &'a str,
    /// Profit growth
    pub profit_growth: &'a str,
    /// Earnings report date
    pub earnings_report_date: &'a str,
    /// Rendered growth-opportunity bullets
    pub future_growth_opportunities: &'a str,
    /// Rendered key-risk bullets
    pub key_risks: &'a str,
}

impl<'a> From<&'a Record> for SinkPayload<'a> {
    fn from(record: &'a Record) -> Self {
        Self {
            company_name: &record.company_name,
            nse_symbol: &record.nse_symbol,
            revenue_growth: &record.revenue_growth,
            profit_growth: &record.profit_growth,
            earnings_report_date: &record.earnings_report_date,
            future_growth_opportunities: &record.future_growth_opportunities,
            key_risks: &record.key_risks,
        }
    }
}

/// Sink that POSTs each record as JSON
///
/// With no endpoint configured the sink is disabled and forwarding is a no-op.
pub struct HttpSink {
    endpoint: Option<String>,
    client: reqwest::Client,
}

impl HttpSink {
    /// Create a sink posting to `endpoint` with the given request timeout
    pub fn new(endpoint: Option<String>, timeout: Duration) -> Result<Self, ReportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ReportError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { endpoint, client })
    }

    /// A sink that forwards nothing
    pub fn disabled() -> Self {
        Self {
            endpoint: None,
            client: reqwest::Client::new(),
        }
    }
}

impl RecordSink for HttpSink {
    type Error = ReportError;

    fn is_enabled(&self) -> bool {
        self.endpoint.is_some()
    }

    async fn forward(&self, record: &Record) -> Result<(), ReportError> {
        let Some(endpoint) = &self.endpoint else {
            debug!("Sink disabled; not forwarding '{}'", record.company_name);
            return Ok(());
        };

        let response = self
            .client
            .post(endpoint)
            .json(&SinkPayload::from(record))
            .send()
            .await
            .map_err(|e| ReportError::SinkForward {
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReportError::SinkForward {
                status: Some(status.as_u16()),
                message: body.chars().take(512).collect(),
            });
        }

        info!("Data sent to sink for {}", record.company_name);
        Ok(())
    }
}
