//! Agreement module - the headline terms of one credit agreement

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const ID_PREFIX: &str = "agreement-";

/// Unique identifier for an agreement based on UUIDv7
///
/// UUIDv7 keeps identifiers sortable by upload time, which is the order the
/// vault presents saved deals in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct AgreementId(u128);

impl AgreementId {
    /// Generate a new UUIDv7-based AgreementId
    ///
    /// # Examples
    ///
    /// ```
    /// use loanchain_domain::AgreementId;
    ///
    /// let id = AgreementId::new();
    /// assert!(id.to_string().starts_with("agreement-"));
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create an AgreementId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse an AgreementId from its display form (`agreement-<uuid>`)
    ///
    /// A bare UUID without the prefix is accepted as well.
    pub fn parse(s: &str) -> Result<Self, String> {
        let raw = s.strip_prefix(ID_PREFIX).unwrap_or(s);
        uuid::Uuid::parse_str(raw)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid agreement id '{}': {}", s, e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for AgreementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AgreementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ID_PREFIX, uuid::Uuid::from_u128(self.0))
    }
}

impl From<AgreementId> for String {
    fn from(id: AgreementId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for AgreementId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// The terms of one credit agreement, as extracted from its document
///
/// An Agreement is built once per accepted extraction and replaced wholesale by
/// the next one; it is never patched field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agreement {
    /// Unique identifier
    pub id: AgreementId,

    /// Display name of the agreement
    pub name: String,

    /// Borrower (obligor) named in the agreement
    pub borrower: String,

    /// Total committed facility, in whole dollars
    pub facility_amount: u64,

    /// Free-text rate description (e.g. "SOFR + 350bps")
    pub interest_type: String,

    /// Final maturity date
    pub maturity_date: NaiveDate,

    /// When the document was processed
    pub upload_date: DateTime<Utc>,

    /// Whether the terms came from an extraction rather than manual entry
    pub parsed: bool,
}

/// Agreement-shaped partial carried inside an [`ExtractionResult`]
///
/// Every field is optional because the remote extractor may omit any of them.
/// The local engine always fills every field (with defaults on a miss).
///
/// [`ExtractionResult`]: crate::ExtractionResult
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgreementMetadata {
    /// Borrower name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borrower: Option<String>,

    /// Facility amount in whole dollars
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility_amount: Option<u64>,

    /// Rate description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_type: Option<String>,

    /// Maturity date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agreement_id_ordering() {
        let id1 = AgreementId::from_value(1000);
        let id2 = AgreementId::from_value(2000);

        assert!(id1 < id2);
    }

    #[test]
    fn test_agreement_id_display_and_parse() {
        let id = AgreementId::new();
        let id_str = id.to_string();

        assert!(id_str.starts_with("agreement-"));
        assert_eq!(AgreementId::parse(&id_str).unwrap(), id);
    }

    #[test]
    fn test_agreement_id_parse_without_prefix() {
        let id = AgreementId::new();
        let bare = uuid::Uuid::from_u128(id.value()).to_string();
        assert_eq!(AgreementId::parse(&bare).unwrap(), id);
    }

    #[test]
    fn test_agreement_id_parse_invalid() {
        assert!(AgreementId::parse("agreement-not-a-uuid").is_err());
    }

    #[test]
    fn test_agreement_serializes_camel_case() {
        let agreement = Agreement {
            id: AgreementId::new(),
            name: "Orion - Credit Agreement".to_string(),
            borrower: "Orion Manufacturing Ltd.".to_string(),
            facility_amount: 250_000_000,
            interest_type: "SOFR + 450bps".to_string(),
            maturity_date: NaiveDate::from_ymd_opt(2029, 12, 31).unwrap(),
            upload_date: Utc::now(),
            parsed: true,
        };

        let json = serde_json::to_value(&agreement).unwrap();
        assert_eq!(json["facilityAmount"], 250_000_000);
        assert_eq!(json["maturityDate"], "2029-12-31");
        assert_eq!(json["interestType"], "SOFR + 450bps");
        assert!(json["id"].as_str().unwrap().starts_with("agreement-"));

        let back: Agreement = serde_json::from_value(json).unwrap();
        assert_eq!(back, agreement);
    }

    #[test]
    fn test_metadata_omits_missing_fields() {
        let metadata = AgreementMetadata {
            borrower: Some("Acme".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&metadata).unwrap();
        assert_eq!(json, r#"{"borrower":"Acme"}"#);
    }
}
