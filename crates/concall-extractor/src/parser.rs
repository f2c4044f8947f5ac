//! Parse model output into an ExtractionResult
//!
//! The conversion is total once the content is a JSON object: every missing,
//! null or oddly-typed field falls back to its placeholder. Only content that is
//! not a JSON object at all is rejected.

use crate::error::ExtractorError;
use concall_domain::{ExtractionResult, MAX_LIST_ITEMS, NOT_AVAILABLE};
use serde_json::{Map, Value};
use tracing::debug;

/// Parse the model's message content into an [`ExtractionResult`]
///
/// # Errors
///
/// `MalformedResponse` when the content is not valid JSON or is not an object.
///
/// # Examples
///
/// ```
/// use concall_extractor::parse_extraction;
///
/// let result = parse_extraction(r#"{"NSE symbol": "ACME", "Key risks": ["Input costs"]}"#).unwrap();
/// assert_eq!(result.nse_symbol, "ACME");
/// assert_eq!(result.revenue_growth, "N/A");
/// assert_eq!(result.key_risks, vec!["Input costs".to_string()]);
/// ```
pub fn parse_extraction(content: &str) -> Result<ExtractionResult, ExtractorError> {
    let json_str = extract_json(content)?;

    let value: Value = serde_json::from_str(json_str)?;
    let object = value.as_object().ok_or_else(|| {
        ExtractorError::MalformedResponse(format!("Expected JSON object, got {}", type_name(&value)))
    })?;

    let raw = RawExtraction::from_object(object);
    debug!("Parsed extraction object with {} keys", object.len());
    Ok(raw.into_result())
}

/// Extract the JSON text from a response
///
/// Reasoning models may emit a `<think>` block first, and some wrap the JSON
/// in a markdown code block.
fn extract_json(response: &str) -> Result<&str, ExtractorError> {
    let mut trimmed = response.trim();

    if let Some((_, after)) = trimmed.rsplit_once("</think>") {
        trimmed = after.trim();
    }

    if let Some(rest) = trimmed.strip_prefix("```") {
        // Drop the language tag (if any) and the closing fence; the tag need
        // not sit on its own line
        let body = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
        let body = body.trim_end();
        let body = body.strip_suffix("```").unwrap_or(body);
        trimmed = body.trim();
    }

    if trimmed.is_empty() {
        return Err(ExtractorError::MalformedResponse("Empty response".to_string()));
    }

    Ok(trimmed)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The model's object with every field optional
#[derive(Debug, Default)]
struct RawExtraction {
    nse_symbol: Option<Value>,
    revenue_growth: Option<Value>,
    profit_growth: Option<Value>,
    earnings_report_date: Option<Value>,
    growth_opportunities: Option<Value>,
    key_risks: Option<Value>,
}

impl RawExtraction {
    /// Pick fields by normalised key; the first matching key wins
    fn from_object(object: &Map<String, Value>) -> Self {
        let mut raw = RawExtraction::default();

        for (key, value) in object {
            let slot = match normalize_key(key).as_str() {
                "nsesymbol" | "symbol" | "nse" => &mut raw.nse_symbol,
                "revenuegrowth" => &mut raw.revenue_growth,
                "profitgrowth" => &mut raw.profit_growth,
                "earningsreportdate" | "earningsdate" | "reportdate" => {
                    &mut raw.earnings_report_date
                }
                "futuregrowthopportunities" | "growthopportunities" => {
                    &mut raw.growth_opportunities
                }
                "keyrisks" | "risks" => &mut raw.key_risks,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.clone());
            }
        }

        raw
    }

    fn into_result(self) -> ExtractionResult {
        ExtractionResult {
            nse_symbol: scalar(self.nse_symbol),
            revenue_growth: scalar(self.revenue_growth),
            profit_growth: scalar(self.profit_growth),
            earnings_report_date: scalar(self.earnings_report_date),
            growth_opportunities: list(self.growth_opportunities),
            key_risks: list(self.key_risks),
        }
    }
}

/// Lowercase and drop everything but ASCII alphanumerics
/// ("NSE symbol", "nse_symbol" and "nseSymbol" all become "nsesymbol")
fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn scalar(value: Option<Value>) -> String {
    let text = match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    };

    if text.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        text
    }
}

fn list(value: Option<Value>) -> Vec<String> {
    let items: Vec<String> = match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                other @ (Value::Object(_) | Value::Array(_)) => Some(other.to_string()),
                Value::Null => None,
            })
            .collect(),
        Some(Value::String(s)) => s.lines().map(|line| strip_bullet(line).to_string()).collect(),
        _ => Vec::new(),
    };

    items
        .into_iter()
        .filter(|item| !item.is_empty())
        .take(MAX_LIST_ITEMS)
        .collect()
}

/// Strip a leading bullet marker ("•", "-", "*", "1." or "1)") and
/// surrounding space
///
/// A marker only counts when whitespace follows it, so "-12% YoY" and
/// "3.5% decline" come back unchanged.
fn strip_bullet(line: &str) -> &str {
    let line = line.trim();
    let after_marker = line
        .strip_prefix('•')
        .or_else(|| line.strip_prefix('-'))
        .or_else(|| line.strip_prefix('*'))
        .or_else(|| {
            let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
            if rest.len() < line.len() {
                rest.strip_prefix('.').or_else(|| rest.strip_prefix(')'))
            } else {
                None
            }
        });

    match after_marker {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim(),
        _ => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concall_domain::ExtractionResult;

    const FULL: &str = r#"{
        "NSE symbol": "ACME",
        "Revenue Growth": "20%",
        "Profit Growth": "10%",
        "EARNINGS REPORT DATE": "14-03-2024",
        "Future growth opportunities": ["Export markets", "New plant"],
        "Key risks": ["Raw material prices"]
    }"#;

    #[test]
    fn test_parse_full_object() {
        let result = parse_extraction(FULL).unwrap();
        assert_eq!(result.nse_symbol, "ACME");
        assert_eq!(result.revenue_growth, "20%");
        assert_eq!(result.profit_growth, "10%");
        assert_eq!(result.earnings_report_date, "14-03-2024");
        assert_eq!(result.growth_opportunities, vec!["Export markets", "New plant"]);
        assert_eq!(result.key_risks, vec!["Raw material prices"]);
        assert!(result.validate().is_ok());
    }

    #[test]
    fn test_empty_object_is_all_placeholders() {
        let result = parse_extraction("{}").unwrap();
        assert_eq!(result, ExtractionResult::placeholder());
    }

    #[test]
    fn test_null_and_blank_become_placeholder() {
        let result =
            parse_extraction(r#"{"NSE symbol": null, "Revenue Growth": "  ", "Key risks": null}"#)
                .unwrap();
        assert_eq!(result.nse_symbol, "N/A");
        assert_eq!(result.revenue_growth, "N/A");
        assert!(result.key_risks.is_empty());
    }

    #[test]
    fn test_numbers_are_stringified() {
        let result = parse_extraction(r#"{"Revenue Growth": 20.5, "Profit Growth": -3}"#).unwrap();
        assert_eq!(result.revenue_growth, "20.5");
        assert_eq!(result.profit_growth, "-3");
    }

    #[test]
    fn test_alternate_key_spellings() {
        let result = parse_extraction(
            r#"{"nse_symbol": "ACME", "revenueGrowth": "5%", "key_risks": ["Currency"]}"#,
        )
        .unwrap();
        assert_eq!(result.nse_symbol, "ACME");
        assert_eq!(result.revenue_growth, "5%");
        assert_eq!(result.key_risks, vec!["Currency"]);
    }

    #[test]
    fn test_lists_capped_at_five() {
        let result = parse_extraction(
            r#"{"Key risks": ["a", "b", "", "c", "d", "e", "f", "g"]}"#,
        )
        .unwrap();
        assert_eq!(result.key_risks, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_list_as_bulleted_string() {
        let result = parse_extraction(
            r#"{"Future growth opportunities": "• Exports\n- New plant\n\n3. Capacity"}"#,
        )
        .unwrap();
        assert_eq!(result.growth_opportunities, vec!["Exports", "New plant", "Capacity"]);
    }

    #[test]
    fn test_list_of_wrong_type_is_empty() {
        let result = parse_extraction(r#"{"Key risks": 42}"#).unwrap();
        assert!(result.key_risks.is_empty());
    }

    #[test]
    fn test_code_fence_is_stripped() {
        let response = "```json\n{\"NSE symbol\": \"ACME\"}\n```";
        assert_eq!(parse_extraction(response).unwrap().nse_symbol, "ACME");
    }

    #[test]
    fn test_single_line_code_fence_is_stripped() {
        let response = "```json{\"NSE symbol\": \"ACME\"}```";
        assert_eq!(parse_extraction(response).unwrap().nse_symbol, "ACME");

        let response = "```{\"NSE symbol\": \"ACME\"}```";
        assert_eq!(parse_extraction(response).unwrap().nse_symbol, "ACME");
    }

    #[test]
    fn test_think_block_is_stripped() {
        let response = "<think>The symbol is probably ACME.</think>\n{\"NSE symbol\": \"ACME\"}";
        assert_eq!(parse_extraction(response).unwrap().nse_symbol, "ACME");
    }

    #[test]
    fn test_array_is_malformed() {
        let err = parse_extraction(r#"["ACME", "20%"]"#).unwrap_err();
        assert!(matches!(err, ExtractorError::MalformedResponse(_)));
    }

    #[test]
    fn test_not_json_is_malformed() {
        let err = parse_extraction("The company did well.").unwrap_err();
        assert!(matches!(err, ExtractorError::MalformedResponse(_)));
    }

    #[test]
    fn test_empty_is_malformed() {
        let err = parse_extraction("   ").unwrap_err();
        assert!(matches!(err, ExtractorError::MalformedResponse(_)));
    }

    #[test]
    fn test_strip_bullet() {
        assert_eq!(strip_bullet("  • Exports "), "Exports");
        assert_eq!(strip_bullet("12) Capacity"), "Capacity");
        assert_eq!(strip_bullet("2024 outlook"), "2024 outlook");
        assert_eq!(strip_bullet("3.5% decline"), "3.5% decline");
        assert_eq!(strip_bullet("-12% YoY"), "-12% YoY");
        assert_eq!(strip_bullet("*Exports"), "*Exports");
        assert_eq!(strip_bullet("-"), "-");
    }

    #[test]
    fn test_array_items_are_only_trimmed() {
        let result = parse_extraction(
            r#"{"Key risks": [" 3.5% decline in margins ", "-12% YoY drop in exports", "- Currency"]}"#,
        )
        .unwrap();
        assert_eq!(
            result.key_risks,
            vec!["3.5% decline in margins", "-12% YoY drop in exports", "- Currency"]
        );
    }

    #[test]
    fn test_bulleted_string_keeps_signed_figures() {
        let result = parse_extraction(
            r#"{"Key risks": "- -12% YoY drop in exports\n3.5% decline in margins"}"#,
        )
        .unwrap();
        assert_eq!(
            result.key_risks,
            vec!["-12% YoY drop in exports", "3.5% decline in margins"]
        );
    }
}
