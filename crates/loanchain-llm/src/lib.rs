//! LoanChain LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `loanchain-domain`, used by
//! the remote extraction path.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GroqProvider`: OpenAI-compatible chat-completions endpoint (Groq by default)
//!
//! # Examples
//!
//! ```
//! use loanchain_llm::MockProvider;
//! use loanchain_domain::traits::LlmProvider;
//!
//! # async fn example() {
//! let provider = MockProvider::new(r#"{"isValid": true}"#);
//! let result = provider.generate_json("prompt", "key").await.unwrap();
//! assert_eq!(result, r#"{"isValid": true}"#);
//! # }
//! ```

#![warn(missing_docs)]

pub mod groq;

use loanchain_domain::traits::LlmProvider as LlmProviderTrait;
use std::future::Future;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use groq::{GroqConfig, GroqProvider};

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// Network or transport failure (no HTTP status was received)
    #[error("Communication error: {0}")]
    Communication(String),

    /// The endpoint answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body text
        body: String,
    },

    /// The endpoint answered 2xx but the envelope was not usable
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl LlmError {
    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            LlmError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Canned outcome for a [`MockProvider`]
#[derive(Debug, Clone)]
enum MockReply {
    Content(String),
    Failure(LlmError),
}

/// Mock LLM provider for deterministic testing
///
/// Returns a pre-configured reply without making any network calls, and
/// records every call so tests can assert on what was sent.
///
/// # Examples
///
/// ```
/// use loanchain_llm::{LlmError, MockProvider};
/// use loanchain_domain::traits::LlmProvider;
///
/// # async fn example() {
/// let provider = MockProvider::failing(LlmError::Http { status: 503, body: "down".into() });
/// assert!(provider.generate_json("prompt", "key").await.is_err());
/// assert_eq!(provider.call_count(), 1);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    reply: MockReply,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

/// A call recorded by [`MockProvider`]
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    /// Prompt that was sent
    pub prompt: String,
    /// Credential that was sent
    pub credential: String,
}

impl MockProvider {
    /// Create a MockProvider that answers every prompt with `content`
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            reply: MockReply::Content(content.into()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a MockProvider that fails every call with `error`
    pub fn failing(error: LlmError) -> Self {
        Self {
            reply: MockReply::Failure(error),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get the number of times generate_json was called
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Get every recorded call, oldest first
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn respond(&self, prompt: &str, credential: &str) -> Result<String, LlmError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(MockCall {
                prompt: prompt.to_string(),
                credential: credential.to_string(),
            });
        }

        match &self.reply {
            MockReply::Content(content) => Ok(content.clone()),
            MockReply::Failure(error) => Err(error.clone()),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(r#"{"isValid": false, "reason": "Default mock response"}"#)
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn model_name(&self) -> &str {
        "mock"
    }

    fn generate_json(
        &self,
        prompt: &str,
        credential: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send {
        std::future::ready(self.respond(prompt, credential))
    }
}
