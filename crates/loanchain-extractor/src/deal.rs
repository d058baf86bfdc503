//! Deal assembly from an accepted extraction

use crate::error::ExtractorError;
use crate::normalize::DEFAULT_REJECTION_REASON;
use crate::participants::synthesize_participants;
use chrono::{DateTime, Local, Utc};
use loanchain_domain::{Agreement, AgreementId, AgreementMetadata, Deal, ExtractionResult};

/// Borrower used when an accepted result names none
pub const FALLBACK_BORROWER: &str = "Unknown";

/// Rate description used when an accepted result gives none
pub const FALLBACK_INTEREST_TYPE: &str = "TBD";

/// Build the session's deal from an extraction result
///
/// # Errors
///
/// Returns `DocumentRejected` with the result's reason if the document was
/// judged not to be a loan agreement.
pub fn assemble_deal(extraction: ExtractionResult) -> Result<Deal, ExtractorError> {
    assemble_deal_at(extraction, Utc::now())
}

/// Build a deal with an explicit upload time
///
/// A missing maturity date falls back to the local calendar date of `now`.
pub fn assemble_deal_at(
    extraction: ExtractionResult,
    now: DateTime<Utc>,
) -> Result<Deal, ExtractorError> {
    if !extraction.is_valid {
        let reason = extraction
            .reason
            .unwrap_or_else(|| DEFAULT_REJECTION_REASON.to_string());
        return Err(ExtractorError::DocumentRejected(reason));
    }

    let metadata = extraction.metadata.unwrap_or_default();
    let AgreementMetadata {
        borrower,
        facility_amount,
        interest_type,
        maturity_date,
    } = metadata;

    let borrower = borrower.unwrap_or_else(|| FALLBACK_BORROWER.to_string());
    let facility_amount = facility_amount.unwrap_or(0);

    let agreement = Agreement {
        id: AgreementId::new(),
        name: format!("{} - Credit Agreement", borrower),
        borrower,
        facility_amount,
        interest_type: interest_type.unwrap_or_else(|| FALLBACK_INTEREST_TYPE.to_string()),
        maturity_date: maturity_date.unwrap_or_else(|| now.with_timezone(&Local).date_naive()),
        upload_date: now,
        parsed: true,
    };

    Ok(Deal {
        agreement,
        covenants: extraction.covenants,
        participants: synthesize_participants(facility_amount),
        flowchart: extraction.flowchart,
    })
}
