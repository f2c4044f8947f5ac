//! Record module - the finished unit sent to the artifact and the sink

/// An extraction result bound to the identity of its entry
///
/// List fields are stored already rendered as "• " bullet lines (or their
/// "none listed" placeholder), which is the form both the local artifact and
/// the downstream sink consume. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Subject (company) the record describes
    pub company_name: String,

    /// Link the content was resolved from
    pub link: String,

    /// Publication date of the originating entry
    pub publication_date: String,

    /// NSE ticker symbol or "N/A"
    pub nse_symbol: String,

    /// Revenue growth or "N/A"
    pub revenue_growth: String,

    /// Profit growth or "N/A"
    pub profit_growth: String,

    /// Earnings report date or "N/A"
    pub earnings_report_date: String,

    /// Rendered growth-opportunity bullets
    pub future_growth_opportunities: String,

    /// Rendered key-risk bullets
    pub key_risks: String,
}
