//! Prompt construction for remote extraction

use crate::config::DEFAULT_REMOTE_EXCERPT_CHARS;

/// Builds the verification and extraction prompt sent to the remote model
pub struct PromptBuilder<'a> {
    text: &'a str,
    excerpt_chars: usize,
}

impl<'a> PromptBuilder<'a> {
    /// Create a builder over the full document text
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            excerpt_chars: DEFAULT_REMOTE_EXCERPT_CHARS,
        }
    }

    /// Limit the number of document characters included
    pub fn with_excerpt_chars(mut self, excerpt_chars: usize) -> Self {
        self.excerpt_chars = excerpt_chars;
        self
    }

    /// Build the complete prompt
    pub fn build(&self) -> String {
        let excerpt = self.excerpt();
        let mut prompt = String::with_capacity(
            EXTRACTION_INSTRUCTIONS.len() + excerpt.len() + SCHEMA_HINT.len() + 64,
        );

        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\nInput Text (truncated):\n");
        prompt.push_str(excerpt);
        prompt.push_str("...\n\n");
        prompt.push_str(SCHEMA_HINT);

        prompt
    }

    /// Leading slice of the text, at most `excerpt_chars` characters
    fn excerpt(&self) -> &'a str {
        match self.text.char_indices().nth(self.excerpt_chars) {
            Some((end, _)) => &self.text[..end],
            None => self.text,
        }
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"You are a specialized financial verification AI. Your job is to analyze the text of a document and determine if it is a valid Loan Agreement or Credit Agreement.

If it IS a valid agreement, extract the structured data below.
If it is NOT (e.g., a recipe, a novel, random text), set "isValid" to false and provide a reason.

Required Data if Valid:
1. Borrower Name
2. Total Facility Amount (estimate if strictly not found, look for "Commitment" or "Total")
3. Interest Rate (e.g., "SOFR + 3.5%")
4. Maturity Date
5. Covenants: Extract 2-3 key financial covenants (Leverage Ratio, DSCR, etc.)
6. Flowchart: Create a logical flow of funds/process as nodes and edges.
   - Nodes should behave like: Borrower -> Payment -> Agent -> Lenders -> Check Covenants.
   - Assign colors: Borrower (#6366f1), Payment (#22c55e), Agent (#3b82f6), Covenants (#ef4444)."#;

const SCHEMA_HINT: &str = r##"Respond ONLY in valid JSON format matching this schema:
{
  "isValid": boolean,
  "reason": string (if invalid),
  "metadata": {
    "borrower": string,
    "facilityAmount": number (raw number),
    "interestType": string,
    "maturityDate": string (YYYY-MM-DD)
  },
  "covenants": [
    { "id": string, "name": string, "type": "Financial", "threshold": number, "currentValue": number (mock a realistic current value), "status": "healthy" | "warning" | "breach" }
  ],
  "flowchart": {
    "nodes": [ { "id": "1", "label": "Borrower", "color": "#6366f1" } ],
    "edges": [ { "id": "e1-2", "source": "1", "target": "2" } ]
  }
}"##;
