//! Normalized extraction output shared by the local and remote paths

use crate::{AgreementMetadata, Covenant};
use serde::{Deserialize, Serialize};

/// Canonical result of one extraction attempt
///
/// Both extraction paths produce this shape. `reason` is present exactly when
/// `is_valid` is false; use [`ExtractionResult::accepted`] and
/// [`ExtractionResult::rejected`] to keep that pairing intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Whether the document was judged to be a loan agreement
    pub is_valid: bool,

    /// Why the document was rejected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Extracted headline terms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AgreementMetadata>,

    /// Covenants in extraction order
    #[serde(default)]
    pub covenants: Vec<Covenant>,

    /// Flow-of-funds graph, when the extractor produced one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flowchart: Option<Flowchart>,
}

impl ExtractionResult {
    /// A result for a document that was accepted as a loan agreement
    pub fn accepted(
        metadata: AgreementMetadata,
        covenants: Vec<Covenant>,
        flowchart: Option<Flowchart>,
    ) -> Self {
        Self {
            is_valid: true,
            reason: None,
            metadata: Some(metadata),
            covenants,
            flowchart,
        }
    }

    /// A result for a document that was judged not to be a loan agreement
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            reason: Some(reason.into()),
            metadata: None,
            covenants: Vec::new(),
            flowchart: None,
        }
    }
}

/// Flow-of-funds graph of labeled nodes and edges
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flowchart {
    /// Graph nodes
    #[serde(default)]
    pub nodes: Vec<FlowNode>,

    /// Directed edges between nodes
    #[serde(default)]
    pub edges: Vec<FlowEdge>,
}

impl Flowchart {
    /// Whether a node with the given id exists
    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }
}

/// A node in the flow-of-funds graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    /// Node identifier
    pub id: String,

    /// Display label
    pub label: String,

    /// Optional node kind
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,

    /// Optional display colour (e.g. "#6366f1")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A directed edge in the flow-of-funds graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    /// Edge identifier
    pub id: String,

    /// Source node id
    pub source: String,

    /// Target node id
    pub target: String,

    /// Optional edge label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}
