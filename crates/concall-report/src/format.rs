//! Record construction and the human-readable report layout

use concall_domain::{Entry, ExtractionResult, Record, NO_OPPORTUNITIES, NO_RISKS};

/// Prefix of every rendered list item
pub const BULLET: &str = "• ";

/// Bind an extraction result to its entry, rendering both lists
///
/// Pure and deterministic.
///
/// # Examples
///
/// ```
/// use concall_domain::{Entry, ExtractionResult};
/// use concall_report::format_record;
///
/// let entry = Entry::new("AcmeCorp", "https://youtu.be/dQw4w9WgXcQ", "15 March 2024");
/// let mut result = ExtractionResult::placeholder();
/// result.key_risks = vec!["Input costs".to_string(), "Currency".to_string()];
///
/// let record = format_record(&entry, &result);
/// assert_eq!(record.key_risks, "• Input costs\n• Currency");
/// assert_eq!(record.future_growth_opportunities, "No opportunities listed");
/// ```
pub fn format_record(entry: &Entry, result: &ExtractionResult) -> Record {
    Record {
        company_name: entry.subject_id.clone(),
        link: entry.link.clone(),
        publication_date: entry.publication_date.clone(),
        nse_symbol: result.nse_symbol.clone(),
        revenue_growth: result.revenue_growth.clone(),
        profit_growth: result.profit_growth.clone(),
        earnings_report_date: result.earnings_report_date.clone(),
        future_growth_opportunities: render_bullets(&result.growth_opportunities, NO_OPPORTUNITIES),
        key_risks: render_bullets(&result.key_risks, NO_RISKS),
    }
}

/// One "• " line per item, newline-joined; `placeholder` when empty
pub fn render_bullets(items: &[String], placeholder: &str) -> String {
    if items.is_empty() {
        return placeholder.to_string();
    }
    items
        .iter()
        .map(|item| format!("{}{}", BULLET, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The text written to the local artifact
pub fn report_text(record: &Record) -> String {
    let mut lines = vec![
        String::new(),
        format!("Company Analysis Report: {}", record.company_name),
        "========================================".to_string(),
        String::new(),
        format!("Source: {}", record.link),
        format!("Published: {}", record.publication_date),
        String::new(),
        format!("NSE Symbol: {}", record.nse_symbol),
        format!("Revenue Growth: {}", record.revenue_growth),
        format!("Profit Growth: {}", record.profit_growth),
        format!("Earnings Report Date: {}", record.earnings_report_date),
        String::new(),
        "Future Growth Opportunities:".to_string(),
        "---------------------------".to_string(),
        record.future_growth_opportunities.clone(),
        String::new(),
        "Key Risks:".to_string(),
        "----------".to_string(),
        record.key_risks.clone(),
    ];
    lines.push(String::new());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Entry, ExtractionResult) {
        let entry = Entry::new("AcmeCorp", "https://example.com/q3.pdf", "15 March 2024");
        let result = ExtractionResult {
            nse_symbol: "ACME".to_string(),
            revenue_growth: "20%".to_string(),
            profit_growth: "10%".to_string(),
            earnings_report_date: "14-03-2024".to_string(),
            growth_opportunities: vec!["Exports".to_string(), "New plant".to_string()],
            key_risks: Vec::new(),
        };
        (entry, result)
    }

    #[test]
    fn test_format_record_copies_identity_and_fields() {
        let (entry, result) = sample();
        let record = format_record(&entry, &result);

        assert_eq!(record.company_name, "AcmeCorp");
        assert_eq!(record.link, "https://example.com/q3.pdf");
        assert_eq!(record.publication_date, "15 March 2024");
        assert_eq!(record.nse_symbol, "ACME");
        assert_eq!(record.future_growth_opportunities, "• Exports\n• New plant");
        assert_eq!(record.key_risks, "No risks listed");
    }

    #[test]
    fn test_format_record_is_deterministic() {
        let (entry, result) = sample();
        assert_eq!(format_record(&entry, &result), format_record(&entry, &result));
    }

    #[test]
    fn test_render_bullets_single() {
        assert_eq!(render_bullets(&["One".to_string()], "none"), "• One");
        assert_eq!(render_bullets(&[], "none"), "none");
    }

    #[test]
    fn test_report_text_layout() {
        let (entry, result) = sample();
        let text = report_text(&format_record(&entry, &result));

        assert!(text.starts_with("\nCompany Analysis Report: AcmeCorp\n====="));
        assert!(text.contains("NSE Symbol: ACME\n"));
        assert!(text.contains("Earnings Report Date: 14-03-2024\n"));
        assert!(text.contains("Future Growth Opportunities:\n---------------------------\n• Exports\n• New plant\n"));
        assert!(text.contains("Key Risks:\n----------\nNo risks listed\n"));
    }
}
