//! Prompt construction for financial field extraction

/// JSON keys the model is asked to return, in prompt order
pub const FIELD_KEYS: [&str; 6] = [
    "NSE symbol",
    "Revenue Growth",
    "Profit Growth",
    "EARNINGS REPORT DATE",
    "Future growth opportunities",
    "Key risks",
];

/// Take the first `max_chars` characters of `text`
///
/// Counts Unicode scalar values, so a multi-byte character is never split.
///
/// # Examples
///
/// ```
/// use concall_extractor::truncate_chars;
///
/// assert_eq!(truncate_chars("₹10 crore", 3), "₹10");
/// assert_eq!(truncate_chars("short", 100), "short");
/// ```
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Builds the extraction prompt
pub struct PromptBuilder<'a> {
    content: &'a str,
    subject: Option<&'a str>,
}

impl<'a> PromptBuilder<'a> {
    /// Create a prompt over already-truncated content
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            subject: None,
        }
    }

    /// Name the company the content belongs to
    pub fn with_subject(mut self, subject: &'a str) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(
            EXTRACTION_INSTRUCTIONS.len() + OUTPUT_FORMAT_REMINDER.len() + self.content.len() + 64,
        );

        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        if let Some(subject) = self.subject {
            prompt.push_str(&format!("Company: {}\n\n", subject));
        }

        prompt.push_str("Transcript:\n");
        prompt.push_str("---\n");
        prompt.push_str(self.content);
        prompt.push_str("\n---\n\n");

        prompt.push_str(OUTPUT_FORMAT_REMINDER);
        prompt
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"Analyze the financial transcript below and extract:
1. NSE symbol (string)
2. Revenue Growth (percentage string)
3. Profit Growth (percentage string)
4. EARNINGS REPORT DATE (DD-MM-YYYY)
5. Future growth opportunities (5 bullet points)
6. Key risks (5 bullet points)

Use "N/A" for any value the transcript does not state."#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Output format (a single JSON object, no additional text):
{
  "NSE symbol": "string",
  "Revenue Growth": "percentage string",
  "Profit Growth": "percentage string",
  "EARNINGS REPORT DATE": "DD-MM-YYYY",
  "Future growth opportunities": ["point", "..."],
  "Key risks": ["point", "..."]
}"#;
