//! Participant module - holders of exposure in a syndicated facility

use serde::{Deserialize, Serialize};

/// Role a participant plays in the facility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    /// The obligor
    Borrower,

    /// A syndicate member holding a tranche
    Lender,

    /// Administrative agent / lead arranger
    Agent,

    /// Prospective buyer in a secondary trade
    Buyer,
}

impl ParticipantRole {
    /// Get the role name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantRole::Borrower => "borrower",
            ParticipantRole::Lender => "lender",
            ParticipantRole::Agent => "agent",
            ParticipantRole::Buyer => "buyer",
        }
    }

    /// Whether this role holds funded exposure in the facility
    pub fn is_funded(&self) -> bool {
        matches!(self, ParticipantRole::Lender | ParticipantRole::Agent)
    }
}

impl std::fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A holder of exposure in the facility
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Identifier, unique within one deal
    pub id: String,

    /// Display name
    pub name: String,

    /// Role in the facility
    pub role: ParticipantRole,

    /// Exposure in whole dollars
    pub exposure: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_funded_roles() {
        assert!(ParticipantRole::Lender.is_funded());
        assert!(ParticipantRole::Agent.is_funded());
        assert!(!ParticipantRole::Buyer.is_funded());
        assert!(!ParticipantRole::Borrower.is_funded());
    }

    #[test]
    fn test_role_wire_format() {
        let json = serde_json::to_string(&ParticipantRole::Agent).unwrap();
        assert_eq!(json, "\"agent\"");
    }
}
