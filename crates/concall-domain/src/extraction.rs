//! Structured output of the LLM extraction step

/// Placeholder for a scalar field the model did not supply
pub const NOT_AVAILABLE: &str = "N/A";

/// Rendered placeholder for an empty growth-opportunity list
pub const NO_OPPORTUNITIES: &str = "No opportunities listed";

/// Rendered placeholder for an empty key-risk list
pub const NO_RISKS: &str = "No risks listed";

/// Maximum number of bullet points kept per list field
pub const MAX_LIST_ITEMS: usize = 5;

/// The six canonical financial fields extracted from a disclosure
///
/// Every field is always present: scalars fall back to [`NOT_AVAILABLE`] and
/// lists fall back to an empty sequence (rendered as "none listed").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    /// NSE ticker symbol
    pub nse_symbol: String,

    /// Revenue growth (percentage string)
    pub revenue_growth: String,

    /// Profit growth (percentage string)
    pub profit_growth: String,

    /// Earnings report date (DD-MM-YYYY)
    pub earnings_report_date: String,

    /// Future growth opportunities, at most [`MAX_LIST_ITEMS`]
    pub growth_opportunities: Vec<String>,

    /// Key risks, at most [`MAX_LIST_ITEMS`]
    pub key_risks: Vec<String>,
}

impl ExtractionResult {
    /// A result where every field holds its placeholder
    pub fn placeholder() -> Self {
        Self {
            nse_symbol: NOT_AVAILABLE.to_string(),
            revenue_growth: NOT_AVAILABLE.to_string(),
            profit_growth: NOT_AVAILABLE.to_string(),
            earnings_report_date: NOT_AVAILABLE.to_string(),
            growth_opportunities: Vec::new(),
            key_risks: Vec::new(),
        }
    }

    /// Check the canonical-field invariant
    ///
    /// Scalars must be non-empty (a real value or "N/A") and lists must not
    /// exceed [`MAX_LIST_ITEMS`].
    pub fn validate(&self) -> Result<(), String> {
        let scalars = [
            ("nse_symbol", &self.nse_symbol),
            ("revenue_growth", &self.revenue_growth),
            ("profit_growth", &self.profit_growth),
            ("earnings_report_date", &self.earnings_report_date),
        ];
        for (name, value) in scalars {
            if value.trim().is_empty() {
                return Err(format!("{} is empty", name));
            }
        }
        if self.growth_opportunities.len() > MAX_LIST_ITEMS {
            return Err(format!(
                "growth_opportunities has {} items (max {})",
                self.growth_opportunities.len(),
                MAX_LIST_ITEMS
            ));
        }
        if self.key_risks.len() > MAX_LIST_ITEMS {
            return Err(format!(
                "key_risks has {} items (max {})",
                self.key_risks.len(),
                MAX_LIST_ITEMS
            ));
        }
        Ok(())
    }
}

impl Default for ExtractionResult {
    fn default() -> Self {
        Self::placeholder()
    }
}
