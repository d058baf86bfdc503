//! LoanChain Domain Layer
//!
//! Core data model for syndicated-loan deal extraction. Every other crate in
//! the workspace depends on these types; this crate depends on nothing but
//! serialization and date primitives.
//!
//! ## Key Concepts
//!
//! - **Agreement**: the headline terms of one credit agreement
//! - **Covenant**: a financial test with a threshold and a reported status
//! - **Participant**: a placeholder holder of exposure in the syndicate
//! - **ExtractionResult**: the normalized output of either extraction path
//! - **Deal**: the records a session builds from an accepted extraction
//!
//! ## Architecture
//!
//! Infrastructure (HTTP providers, the on-disk vault) lives in other crates
//! and plugs in through the traits in [`traits`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod agreement;
pub mod covenant;
pub mod deal;
pub mod extraction;
pub mod participant;
pub mod traits;

// Re-exports for convenience
pub use agreement::{Agreement, AgreementId, AgreementMetadata};
pub use covenant::{Covenant, CovenantStatus, FINANCIAL_COVENANT_TYPE};
pub use deal::{Deal, DealRecord};
pub use extraction::{ExtractionResult, FlowEdge, FlowNode, Flowchart};
pub use participant::{Participant, ParticipantRole};
