//! Extraction router
//!
//! Sends a document down the local pattern path or the remote model path,
//! depending on the mode the caller passes in.

use crate::config::ExtractorConfig;
use crate::covenants::CovenantLocator;
use crate::error::ExtractorError;
use crate::normalize::normalize;
use crate::parser::parse_remote_response;
use crate::patterns::PatternEngine;
use crate::prompt::PromptBuilder;
use crate::text::TextExtractor;
use loanchain_domain::traits::LlmProvider;
use loanchain_domain::ExtractionResult;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// Which extractor handles an upload
#[derive(Clone, PartialEq, Eq)]
pub enum ExtractionMode {
    /// On-device pattern rules; never rejects a document
    Local,
    /// Remote model call authorised by a bearer credential
    Remote {
        /// Bearer credential for the remote endpoint
        credential: String,
    },
}

impl ExtractionMode {
    /// Remote mode with the given credential
    pub fn remote(credential: impl Into<String>) -> Self {
        ExtractionMode::Remote {
            credential: credential.into(),
        }
    }

    /// Short name for logs and output
    pub fn name(&self) -> &'static str {
        match self {
            ExtractionMode::Local => "local",
            ExtractionMode::Remote { .. } => "remote",
        }
    }
}

// Keeps credentials out of logs
impl fmt::Debug for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionMode::Local => f.write_str("Local"),
            ExtractionMode::Remote { .. } => f
                .debug_struct("Remote")
                .field("credential", &"<redacted>")
                .finish(),
        }
    }
}

/// Routes extraction requests to the local or remote extractor
pub struct ExtractionRouter<L>
where
    L: LlmProvider,
{
    provider: L,
    config: ExtractorConfig,
    patterns: PatternEngine,
    covenants: CovenantLocator,
}

impl<L> ExtractionRouter<L>
where
    L: LlmProvider + Send + Sync,
    L::Error: Into<ExtractorError>,
{
    /// Create a router over a remote provider
    ///
    /// # Errors
    ///
    /// Returns `Config` if the configuration does not validate.
    pub fn new(provider: L, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;

        Ok(Self {
            provider,
            config,
            patterns: PatternEngine::new(),
            covenants: CovenantLocator::new(),
        })
    }

    /// Read a PDF from disk and extract it in the given mode
    ///
    /// Page text is read on the blocking pool with the page cap for the mode.
    ///
    /// # Errors
    ///
    /// - `DocumentUnreadable` if the file is not a readable PDF
    /// - any error of [`route`](Self::route)
    pub async fn extract_document(
        &self,
        path: &Path,
        mode: &ExtractionMode,
    ) -> Result<ExtractionResult, ExtractorError> {
        let page_cap = match mode {
            ExtractionMode::Local => self.config.local_page_cap,
            ExtractionMode::Remote { .. } => self.config.remote_page_cap,
        };

        info!("Extracting {} ({} mode)", path.display(), mode.name());

        let reader = TextExtractor::new(page_cap);
        let owned_path = path.to_path_buf();
        let text = tokio::task::spawn_blocking(move || reader.extract_from_path(&owned_path))
            .await
            .map_err(|e| ExtractorError::Io(format!("Text extraction task failed: {}", e)))??;

        self.route(&text, mode).await
    }

    /// Extract already-flattened text in the given mode
    pub async fn route(
        &self,
        text: &str,
        mode: &ExtractionMode,
    ) -> Result<ExtractionResult, ExtractorError> {
        match mode {
            ExtractionMode::Local => Ok(self.extract_local(text)),
            ExtractionMode::Remote { credential } => self.extract_remote(text, credential).await,
        }
    }

    /// Run the pattern rules and the covenant locator
    ///
    /// The result is always valid: the local path has no notion of a
    /// rejected document. Participants are synthesized from the facility
    /// amount when the deal is assembled.
    pub fn extract_local(&self, text: &str) -> ExtractionResult {
        debug!("Local extraction over {} chars", text.len());

        let terms = self.patterns.extract(text);
        let covenants = self.covenants.locate(text);

        info!(
            "Local extraction: borrower '{}', {} covenants",
            terms.borrower,
            covenants.len()
        );

        ExtractionResult::accepted(terms.into(), covenants, None)
    }

    /// Ask the remote model to verify and extract the document
    ///
    /// Exactly one provider call is made.
    ///
    /// # Errors
    ///
    /// - `Config` if the credential is empty (no request is sent)
    /// - `RemoteExtractionFailed` on transport failure, non-2xx status, or
    ///   content that is not the expected JSON object
    pub async fn extract_remote(
        &self,
        text: &str,
        credential: &str,
    ) -> Result<ExtractionResult, ExtractorError> {
        if credential.trim().is_empty() {
            return Err(ExtractorError::Config(
                "Remote extraction requires an API key".to_string(),
            ));
        }

        let prompt = PromptBuilder::new(text)
            .with_excerpt_chars(self.config.remote_excerpt_chars)
            .build();

        info!("Remote extraction via {}", self.provider.model_name());
        debug!("Prompt length: {} chars", prompt.len());

        let content = match self.provider.generate_json(&prompt, credential).await {
            Ok(content) => content,
            Err(e) => {
                let err: ExtractorError = e.into();
                warn!("Remote extraction failed: {}", err);
                return Err(err);
            }
        };

        debug!("Response length: {} chars", content.len());

        let result = normalize(parse_remote_response(&content)?);
        if result.is_valid {
            info!("Remote extraction accepted, {} covenants", result.covenants.len());
        } else {
            info!("Remote extraction rejected the document");
        }

        Ok(result)
    }
}
