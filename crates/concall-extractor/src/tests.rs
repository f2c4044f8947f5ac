//! Integration tests for the Extractor

#[cfg(test)]
mod tests {
    use crate::{Extractor, ExtractorConfig, ExtractorError};
    use concall_domain::traits::LlmProvider;
    use concall_llm::{LlmError, MockProvider};
    use std::time::Duration;

    const VALID: &str = r#"{
        "NSE symbol": "ACME",
        "Revenue Growth": "20%",
        "Profit Growth": "10%",
        "EARNINGS REPORT DATE": "14-03-2024",
        "Future growth opportunities": ["Exports"],
        "Key risks": []
    }"#;

    fn extractor(llm: MockProvider) -> Extractor<MockProvider> {
        Extractor::new(llm, ExtractorConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_full_extraction_flow() {
        let llm = MockProvider::new(VALID);
        let result = extractor(llm.clone())
            .extract("AcmeCorp", "Revenue grew 20%. Profit grew 10%.")
            .await
            .unwrap();

        assert_eq!(result.nse_symbol, "ACME");
        assert_eq!(result.earnings_report_date, "14-03-2024");
        assert_eq!(result.growth_opportunities, vec!["Exports"]);
        assert!(result.key_risks.is_empty());
        assert_eq!(llm.call_count(), 1);

        let prompt = &llm.prompts()[0];
        assert!(prompt.contains("Revenue grew 20%. Profit grew 10%."));
        assert!(prompt.contains("AcmeCorp"));
    }

    #[tokio::test]
    async fn test_untidy_response_yields_valid_result() {
        let llm = MockProvider::new(
            r#"{
                "NSE symbol": "  ",
                "Revenue Growth": null,
                "Profit Growth": -3,
                "Key risks": ["a", "b", "c", "d", "e", "f", "g"],
                "Future growth opportunities": "- Exports\n\n- New plant"
            }"#,
        );
        let result = extractor(llm.clone()).extract("AcmeCorp", "text").await.unwrap();

        assert!(result.validate().is_ok());
        assert_eq!(result.nse_symbol, "N/A");
        assert_eq!(result.profit_growth, "-3");
        assert_eq!(result.key_risks.len(), 5);
        assert_eq!(result.growth_opportunities, vec!["Exports", "New plant"]);
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_prompt_holds_exact_prefix() {
        let llm = MockProvider::new(VALID);
        let config = ExtractorConfig {
            max_content_length: 10,
            ..Default::default()
        };
        let extractor = Extractor::new(llm.clone(), config).unwrap();

        extractor
            .extract("AcmeCorp", "0123456789ABCDEFGHIJ")
            .await
            .unwrap();

        let prompt = &llm.prompts()[0];
        assert!(prompt.contains("---\n0123456789\n---"));
        assert!(!prompt.contains("0123456789A"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_persistent_failure_exhausts_attempts() {
        let llm = MockProvider::failing(LlmError::Http {
            status: 503,
            body: "overloaded".to_string(),
        });
        let start = tokio::time::Instant::now();

        let err = extractor(llm.clone())
            .extract("AcmeCorp", "text")
            .await
            .unwrap_err();

        match err {
            ExtractorError::ExtractionFailed { attempts, last } => {
                assert_eq!(attempts, 3);
                assert!(matches!(*last, ExtractorError::Llm(_)));
            }
            other => panic!("Expected ExtractionFailed, got {:?}", other),
        }
        assert_eq!(llm.call_count(), 3);

        let instants = llm.call_instants();
        assert_eq!(instants[1] - instants[0], Duration::from_secs(2));
        assert_eq!(instants[2] - instants[1], Duration::from_secs(4));
        assert_eq!(start.elapsed(), Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_after_transient_errors() {
        let llm = MockProvider::new(VALID);
        llm.push_error(LlmError::RateLimitExceeded);
        llm.push_error(LlmError::Timeout);

        let result = extractor(llm.clone()).extract("AcmeCorp", "text").await.unwrap();
        assert_eq!(result.nse_symbol, "ACME");
        assert_eq!(llm.call_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_content_is_retried() {
        let llm = MockProvider::new(VALID);
        llm.push_response("Sure! Here is the analysis you asked for.");

        let result = extractor(llm.clone()).extract("AcmeCorp", "text").await.unwrap();
        assert_eq!(result.revenue_growth, "20%");
        assert_eq!(llm.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_malformed_surfaces_last_error() {
        let llm = MockProvider::new("[1, 2, 3]");

        let err = extractor(llm.clone()).extract("AcmeCorp", "text").await.unwrap_err();
        match err {
            ExtractorError::ExtractionFailed { attempts, last } => {
                assert_eq!(attempts, 3);
                assert!(matches!(*last, ExtractorError::MalformedResponse(_)));
            }
            other => panic!("Expected ExtractionFailed, got {:?}", other),
        }
    }

    /// Provider that never answers within any sensible timeout
    struct StalledProvider;

    impl LlmProvider for StalledProvider {
        type Error = LlmError;

        fn model_name(&self) -> &str {
            "stalled"
        }

        async fn generate_structured(&self, _prompt: &str) -> Result<String, LlmError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok("{}".to_string())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_timeout_is_retried_then_fails() {
        let extractor = Extractor::new(StalledProvider, ExtractorConfig::default()).unwrap();
        let start = tokio::time::Instant::now();

        let err = extractor.extract("AcmeCorp", "text").await.unwrap_err();
        match err {
            ExtractorError::ExtractionFailed { attempts, last } => {
                assert_eq!(attempts, 3);
                assert_eq!(*last, ExtractorError::Timeout);
            }
            other => panic!("Expected ExtractionFailed, got {:?}", other),
        }
        // Three 30 s timeouts plus 2 s and 4 s of backoff
        assert_eq!(start.elapsed(), Duration::from_secs(96));
    }
}
