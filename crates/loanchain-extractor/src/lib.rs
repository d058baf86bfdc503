//! LoanChain Extractor
//!
//! Turns a syndicated-loan PDF into structured deal terms.
//!
//! # Overview
//!
//! A document is flattened to plain text and then handled by one of two
//! extractors, chosen per call with an [`ExtractionMode`]:
//!
//! - **Local**: regex rules for borrower, facility amount, margin and
//!   maturity, plus a covenant section locator. Every rule defaults on a
//!   miss, so the local path never rejects a document.
//! - **Remote**: one chat-completions call that both verifies the document is
//!   a credit agreement and extracts the same terms plus a flow-of-funds graph.
//!
//! Either result becomes a deal through [`assemble_deal`], which also builds
//! the synthetic syndicate from the facility amount.
//!
//! # Architecture
//!
//! ```text
//! PDF → TextExtractor → ExtractionRouter ─┬─ PatternEngine + CovenantLocator
//!                                        └─ PromptBuilder → LlmProvider → parser → normalize
//!     → ExtractionResult → assemble_deal → UploadSession
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use loanchain_extractor::{
//!     assemble_deal, ExtractionMode, ExtractionRouter, ExtractorConfig, UploadSession,
//! };
//! use loanchain_llm::MockProvider;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let router = ExtractionRouter::new(MockProvider::default(), ExtractorConfig::default())?;
//! let mut session = UploadSession::new();
//!
//! let ticket = session.begin();
//! let result = router
//!     .extract_document(Path::new("agreement.pdf"), &ExtractionMode::Local)
//!     .await?;
//! session.apply(ticket, assemble_deal(result)?);
//!
//! println!("{}", session.current().unwrap().agreement.name);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod covenants;
mod deal;
mod error;
mod normalize;
mod parser;
mod participants;
mod patterns;
mod prompt;
mod router;
mod session;
mod text;


pub use config::{
    ExtractorConfig, DEFAULT_LOCAL_PAGE_CAP, DEFAULT_REMOTE_EXCERPT_CHARS, DEFAULT_REMOTE_PAGE_CAP,
};
pub use covenants::{CovenantLocator, COVENANT_WINDOW_CHARS};
pub use deal::{assemble_deal, assemble_deal_at, FALLBACK_BORROWER, FALLBACK_INTEREST_TYPE};
pub use error::ExtractorError;
pub use normalize::{normalize, DEFAULT_REJECTION_REASON};
pub use parser::{
    parse_remote_response, RawCovenant, RawExtraction, RawFlowEdge, RawFlowNode, RawFlowchart,
    RawMetadata,
};
pub use participants::synthesize_participants;
pub use patterns::{
    ExtractedTerms, PatternEngine, BORROWER_NAME_MAX_CHARS, DEFAULT_FACILITY_AMOUNT,
    DEFAULT_INTEREST_TYPE, DEFAULT_MATURITY_MONTHS, UNKNOWN_BORROWER,
};
pub use prompt::PromptBuilder;
pub use router::{ExtractionMode, ExtractionRouter};
pub use session::{UploadSession, UploadTicket};
pub use text::TextExtractor;
