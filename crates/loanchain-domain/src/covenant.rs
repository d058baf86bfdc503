//! Covenant module - financial tests attached to an agreement

use serde::{Deserialize, Serialize};

/// The only covenant category the engine emits
pub const FINANCIAL_COVENANT_TYPE: &str = "Financial";

/// Reported compliance status of a covenant
///
/// Assigned by whichever extraction rule produced the covenant. It is not
/// recomputed from `threshold` and `current_value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CovenantStatus {
    /// Comfortably within the threshold
    Healthy,

    /// Close to the threshold
    Warning,

    /// Threshold breached
    Breach,
}

impl CovenantStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            CovenantStatus::Healthy => "healthy",
            CovenantStatus::Warning => "warning",
            CovenantStatus::Breach => "breach",
        }
    }

    /// Parse a status from a string, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "healthy" => Some(CovenantStatus::Healthy),
            "warning" => Some(CovenantStatus::Warning),
            "breach" => Some(CovenantStatus::Breach),
            _ => None,
        }
    }
}

impl std::str::FromStr for CovenantStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid covenant status: {}", s))
    }
}

impl std::fmt::Display for CovenantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contractual financial test the borrower must maintain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Covenant {
    /// Identifier, unique within one extraction
    pub id: String,

    /// Covenant name (e.g. "Leverage Ratio")
    pub name: String,

    /// Category tag, always [`FINANCIAL_COVENANT_TYPE`]
    #[serde(rename = "type")]
    pub covenant_type: String,

    /// Ratio the borrower must maintain
    pub threshold: f64,

    /// Most recently reported ratio
    pub current_value: f64,

    /// Compliance status
    pub status: CovenantStatus,
}

impl Covenant {
    /// Create a financial covenant
    pub fn financial(
        id: impl Into<String>,
        name: impl Into<String>,
        threshold: f64,
        current_value: f64,
        status: CovenantStatus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            covenant_type: FINANCIAL_COVENANT_TYPE.to_string(),
            threshold,
            current_value,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(CovenantStatus::parse("healthy"), Some(CovenantStatus::Healthy));
        assert_eq!(CovenantStatus::parse(" Warning "), Some(CovenantStatus::Warning));
        assert_eq!(CovenantStatus::parse("BREACH"), Some(CovenantStatus::Breach));
        assert_eq!(CovenantStatus::parse("compliant"), None);
    }

    #[test]
    fn test_status_from_str() {
        let status: CovenantStatus = "breach".parse().unwrap();
        assert_eq!(status, CovenantStatus::Breach);
        assert!("unknown".parse::<CovenantStatus>().is_err());
    }

    #[test]
    fn test_covenant_wire_format() {
        let covenant = Covenant::financial("cov-lev", "Leverage Ratio", 4.5, 4.2, CovenantStatus::Healthy);
        let json = serde_json::to_value(&covenant).unwrap();

        assert_eq!(json["type"], "Financial");
        assert_eq!(json["currentValue"], 4.2);
        assert_eq!(json["status"], "healthy");
    }
}
