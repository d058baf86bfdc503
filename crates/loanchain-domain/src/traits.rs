//! Trait definitions for external interactions
//!
//! These traits define the boundaries between extraction logic and
//! infrastructure. Implementations live in other crates.

use crate::DealRecord;
use std::future::Future;

/// Trait for remote language-model completions
///
/// Implemented by the infrastructure layer (loanchain-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Model identifier, used for logging
    fn model_name(&self) -> &str;

    /// Request a completion constrained to a single JSON object
    ///
    /// `credential` is the caller-supplied bearer token. Exactly one request is
    /// made; implementations do not retry.
    fn generate_json(
        &self,
        prompt: &str,
        credential: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Trait for persisting saved deals
///
/// Implemented by the infrastructure layer (loanchain-vault)
pub trait DealVault {
    /// Error type for vault operations
    type Error;

    /// Persist a record, returning the key it was stored under
    fn save(&self, record: &DealRecord) -> Result<String, Self::Error>;

    /// Read every stored record back, in no particular order
    fn load_all(&self) -> Result<Vec<DealRecord>, Self::Error>;
}
