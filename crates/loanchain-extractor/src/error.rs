//! Error types for the Extractor

use loanchain_llm::LlmError;
use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractorError {
    /// The input document cannot be opened or parsed
    #[error("Document unreadable: {0}")]
    DocumentUnreadable(String),

    /// The remote extractor failed: transport error, non-2xx status, or a
    /// body that is not the expected JSON object
    #[error("Remote extraction failed{}: {detail}", fmt_status(.status))]
    RemoteExtractionFailed {
        /// HTTP status, when the endpoint answered at all
        status: Option<u16>,
        /// Response body or failure description
        detail: String,
    },

    /// The remote extractor judged the document not to be a loan agreement
    #[error("Document rejected: {0}")]
    DocumentRejected(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Background task or filesystem failure outside document parsing
    #[error("I/O error: {0}")]
    Io(String),
}

impl ExtractorError {
    /// Whether this is a user-facing rejection rather than a technical failure
    pub fn is_rejection(&self) -> bool {
        matches!(self, ExtractorError::DocumentRejected(_))
    }

    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        ExtractorError::RemoteExtractionFailed {
            status: None,
            detail: detail.into(),
        }
    }
}

fn fmt_status(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default()
}

impl From<LlmError> for ExtractorError {
    fn from(e: LlmError) -> Self {
        let status = e.status();
        let detail = match e {
            LlmError::Http { body, .. } => body,
            other => other.to_string(),
        };
        ExtractorError::RemoteExtractionFailed { status, detail }
    }
}
