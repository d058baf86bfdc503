//! Participant synthesizer
//!
//! Builds a placeholder syndicate from the facility amount: one agent at 20%,
//! two lender tranches at 40% each, and one buyer with no exposure. Lender B
//! takes the rounding remainder so funded exposure always equals the amount.

use loanchain_domain::{Participant, ParticipantRole};

/// Synthesize the standard four-party syndicate for a facility amount
pub fn synthesize_participants(facility_amount: u64) -> Vec<Participant> {
    let amount = u128::from(facility_amount);
    let agent = (amount / 5) as u64;
    let lender_a = (amount * 2 / 5) as u64;
    let lender_b = facility_amount - agent - lender_a;

    vec![
        participant("p1", "Lead Arranger", ParticipantRole::Agent, agent),
        participant("p2", "Syndicate Member A", ParticipantRole::Lender, lender_a),
        participant("p3", "Syndicate Member B", ParticipantRole::Lender, lender_b),
        participant("p4", "Institutional Investor X", ParticipantRole::Buyer, 0),
    ]
}

fn participant(id: &str, name: &str, role: ParticipantRole, exposure: u64) -> Participant {
    Participant {
        id: id.to_string(),
        name: name.to_string(),
        role,
        exposure,
    }
}
