//! Deal records built from an accepted extraction

use crate::{Agreement, Covenant, Flowchart, Participant, ParticipantRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything the session holds for the current agreement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    /// Headline terms
    pub agreement: Agreement,

    /// Covenants in extraction order
    pub covenants: Vec<Covenant>,

    /// Synthesized capital structure
    pub participants: Vec<Participant>,

    /// Flow-of-funds graph, if the extractor produced one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flowchart: Option<Flowchart>,
}

impl Deal {
    /// Participants with the given role, in list order
    pub fn participants_with_role(&self, role: ParticipantRole) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(move |p| p.role == role)
    }

    /// Sum of agent and lender exposure
    pub fn funded_exposure(&self) -> u64 {
        self.participants
            .iter()
            .filter(|p| p.role.is_funded())
            .map(|p| p.exposure)
            .sum()
    }
}

/// A deal as persisted in the vault
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealRecord {
    /// The saved deal
    pub deal: Deal,

    /// When the record was written
    pub saved_at: DateTime<Utc>,
}

impl DealRecord {
    /// Wrap a deal with the current time
    pub fn new(deal: Deal) -> Self {
        Self {
            deal,
            saved_at: Utc::now(),
        }
    }
}
