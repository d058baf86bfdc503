//! Error types for the CLI application.

use loanchain_extractor::ExtractorError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Extraction failed for a technical reason
    #[error(transparent)]
    Extractor(ExtractorError),

    /// The remote extractor judged the document not to be a loan agreement
    #[error(transparent)]
    Rejected(ExtractorError),

    /// Remote provider setup error
    #[error("Provider error: {0}")]
    Llm(#[from] loanchain_llm::LlmError),

    /// Vault error
    #[error("Vault error: {0}")]
    Vault(#[from] loanchain_vault::VaultError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The user interrupted an extraction
    #[error("Extraction cancelled")]
    Cancelled,
}

impl CliError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Rejected(_) => 3,
            CliError::Cancelled => 130,
            _ => 1,
        }
    }

    /// Whether this is a technical failure rather than a rejection or an
    /// interruption the user already saw reported
    pub fn is_failure(&self) -> bool {
        !matches!(self, CliError::Rejected(_) | CliError::Cancelled)
    }
}

impl From<ExtractorError> for CliError {
    fn from(e: ExtractorError) -> Self {
        if e.is_rejection() {
            CliError::Rejected(e)
        } else {
            CliError::Extractor(e)
        }
    }
}
