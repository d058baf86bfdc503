//! Parse remote model output into the raw extraction shape
//!
//! The raw types mirror what the model is asked to produce but accept loose
//! typing: ids and numbers may arrive as JSON numbers or strings, and every
//! field except `isValid` may be absent or null. The normalizer turns this
//! into the canonical [`ExtractionResult`](loanchain_domain::ExtractionResult).

use crate::error::ExtractorError;
use serde::Deserialize;
use serde_json::Value;

/// Extraction as returned by the remote model
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExtraction {
    /// Whether the model judged the document to be a loan agreement
    pub is_valid: bool,
    /// Rejection reason
    #[serde(default)]
    pub reason: Option<String>,
    /// Headline terms
    #[serde(default)]
    pub metadata: Option<RawMetadata>,
    /// Covenants
    #[serde(default)]
    pub covenants: Option<Vec<RawCovenant>>,
    /// Flow-of-funds graph
    #[serde(default)]
    pub flowchart: Option<RawFlowchart>,
}

/// Headline terms as returned by the remote model
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMetadata {
    /// Borrower name
    #[serde(default)]
    pub borrower: Option<String>,
    /// Facility amount, a number or a numeric string
    #[serde(default)]
    pub facility_amount: Option<Value>,
    /// Rate description
    #[serde(default)]
    pub interest_type: Option<String>,
    /// Maturity date text
    #[serde(default)]
    pub maturity_date: Option<String>,
}

/// Covenant as returned by the remote model
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCovenant {
    /// Identifier, string or number
    #[serde(default)]
    pub id: Option<Value>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Threshold ratio
    #[serde(default)]
    pub threshold: Option<Value>,
    /// Current ratio
    #[serde(default)]
    pub current_value: Option<Value>,
    /// Status text
    #[serde(default)]
    pub status: Option<String>,
}

/// Flowchart as returned by the remote model
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFlowchart {
    /// Nodes
    #[serde(default)]
    pub nodes: Vec<RawFlowNode>,
    /// Edges
    #[serde(default)]
    pub edges: Vec<RawFlowEdge>,
}

/// Flowchart node as returned by the remote model
#[derive(Debug, Clone, Deserialize)]
pub struct RawFlowNode {
    /// Identifier, string or number
    pub id: Value,
    /// Display label
    #[serde(default)]
    pub label: Option<String>,
    /// Node category
    #[serde(default, rename = "type")]
    pub node_type: Option<String>,
    /// Display colour
    #[serde(default)]
    pub color: Option<String>,
}

/// Flowchart edge as returned by the remote model
#[derive(Debug, Clone, Deserialize)]
pub struct RawFlowEdge {
    /// Identifier, string or number
    #[serde(default)]
    pub id: Option<Value>,
    /// Source node id
    pub source: Value,
    /// Target node id
    pub target: Value,
    /// Edge label
    #[serde(default)]
    pub label: Option<String>,
}

/// Parse the model's message content
///
/// # Errors
///
/// Returns `RemoteExtractionFailed` (without a status) if the content is not
/// a JSON object carrying a boolean `isValid`.
pub fn parse_remote_response(response: &str) -> Result<RawExtraction, ExtractorError> {
    let json_str = extract_json(response)?;

    serde_json::from_str(json_str)
        .map_err(|e| ExtractorError::malformed(format!("JSON parse error: {}", e)))
}

/// Extract JSON from the response, handling markdown code blocks
fn extract_json(response: &str) -> Result<&str, ExtractorError> {
    let trimmed = response.trim();

    let Some(after_fence) = trimmed.strip_prefix("```") else {
        return Ok(trimmed);
    };

    // Skip the info string ("json") on the opening fence line
    let body = match after_fence.find('\n') {
        Some(newline) => &after_fence[newline + 1..],
        None => return Err(ExtractorError::malformed("Empty code block")),
    };

    Ok(body.trim_end().trim_end_matches("```").trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_response() {
        let response = r##"{
            "isValid": true,
            "metadata": {
                "borrower": "Acme Corp",
                "facilityAmount": 250000000,
                "interestType": "SOFR + 3.5%",
                "maturityDate": "2029-12-31"
            },
            "covenants": [
                { "id": "c1", "name": "Leverage Ratio", "type": "Financial",
                  "threshold": 4.5, "currentValue": 3.9, "status": "healthy" }
            ],
            "flowchart": {
                "nodes": [ { "id": "1", "label": "Borrower", "color": "#6366f1" } ],
                "edges": [ { "id": "e1-2", "source": "1", "target": "2" } ]
            }
        }"##;

        let raw = parse_remote_response(response).unwrap();
        assert!(raw.is_valid);
        let metadata = raw.metadata.unwrap();
        assert_eq!(metadata.borrower.as_deref(), Some("Acme Corp"));
        assert_eq!(metadata.facility_amount, Some(Value::from(250_000_000u64)));
        assert_eq!(raw.covenants.unwrap().len(), 1);
        let flowchart = raw.flowchart.unwrap();
        assert_eq!(flowchart.nodes.len(), 1);
        assert_eq!(flowchart.edges[0].source, Value::from("1"));
    }

    #[test]
    fn test_parse_rejection_only() {
        let raw = parse_remote_response(r#"{"isValid": false, "reason": "A recipe"}"#).unwrap();
        assert!(!raw.is_valid);
        assert_eq!(raw.reason.as_deref(), Some("A recipe"));
        assert!(raw.metadata.is_none());
        assert!(raw.covenants.is_none());
    }

    #[test]
    fn test_nulls_are_accepted() {
        let raw = parse_remote_response(
            r#"{"isValid": true, "reason": null, "metadata": null, "covenants": null, "flowchart": null}"#,
        )
        .unwrap();
        assert!(raw.is_valid);
        assert!(raw.metadata.is_none());
    }

    #[test]
    fn test_parse_json_in_code_block() {
        let response = "```json\n{\"isValid\": true}\n```";
        assert!(parse_remote_response(response).unwrap().is_valid);

        let response = "```\n{\"isValid\": false}\n```\n";
        assert!(!parse_remote_response(response).unwrap().is_valid);
    }

    #[test]
    fn test_missing_is_valid_is_malformed() {
        let err = parse_remote_response(r#"{"metadata": {}}"#).unwrap_err();
        assert!(matches!(err, ExtractorError::RemoteExtractionFailed { status: None, .. }));
    }

    #[test]
    fn test_non_json_is_malformed() {
        let err = parse_remote_response("I'm sorry, I cannot help with that.").unwrap_err();
        assert!(matches!(err, ExtractorError::RemoteExtractionFailed { status: None, .. }));
    }

    #[test]
    fn test_array_is_malformed() {
        assert!(parse_remote_response("[]").is_err());
    }

    #[test]
    fn test_empty_code_block() {
        assert!(parse_remote_response("```").is_err());
    }

    #[test]
    fn test_numeric_node_ids() {
        let raw = parse_remote_response(
            r#"{"isValid": true, "flowchart": {"nodes": [{"id": 1}], "edges": [{"source": 1, "target": 2}]}}"#,
        )
        .unwrap();
        let flowchart = raw.flowchart.unwrap();
        assert_eq!(flowchart.nodes[0].id, Value::from(1));
        assert!(flowchart.edges[0].id.is_none());
    }
}
