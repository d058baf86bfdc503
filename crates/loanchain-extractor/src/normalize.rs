//! Normalization of remote output into the canonical extraction result

use crate::parser::{RawCovenant, RawExtraction, RawFlowchart, RawMetadata};
use crate::patterns::parse_long_date;
use chrono::NaiveDate;
use loanchain_domain::{
    AgreementMetadata, Covenant, CovenantStatus, ExtractionResult, FlowEdge, FlowNode, Flowchart,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use std::str::FromStr;
use tracing::{debug, warn};

/// Reason used when the remote rejects a document without saying why
pub const DEFAULT_REJECTION_REASON: &str =
    "The uploaded document does not appear to be a valid loan agreement.";

/// Name used for a covenant the remote left unnamed
const UNNAMED_COVENANT: &str = "Unnamed Covenant";

/// Convert the raw remote shape into an [`ExtractionResult`]
///
/// A rejected result carries only its reason. An accepted result never
/// carries one.
pub fn normalize(raw: RawExtraction) -> ExtractionResult {
    if !raw.is_valid {
        let reason = raw
            .reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_REJECTION_REASON.to_string());
        return ExtractionResult::rejected(reason);
    }

    let covenants = raw
        .covenants
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(idx, covenant)| normalize_covenant(idx + 1, covenant))
        .collect();

    ExtractionResult {
        is_valid: true,
        reason: None,
        metadata: raw.metadata.map(normalize_metadata),
        covenants,
        flowchart: raw.flowchart.map(normalize_flowchart),
    }
}

fn normalize_metadata(raw: RawMetadata) -> AgreementMetadata {
    AgreementMetadata {
        borrower: non_blank(raw.borrower),
        facility_amount: raw.facility_amount.as_ref().and_then(facility_amount_from),
        interest_type: non_blank(raw.interest_type),
        maturity_date: raw.maturity_date.as_deref().and_then(parse_maturity),
    }
}

fn normalize_covenant(position: usize, raw: RawCovenant) -> Covenant {
    let id = raw
        .id
        .as_ref()
        .and_then(id_from)
        .unwrap_or_else(|| format!("cov-{}", position));

    let status = match raw.status.as_deref() {
        Some(text) => CovenantStatus::parse(text).unwrap_or_else(|| {
            debug!("Unknown covenant status '{}', using warning", text);
            CovenantStatus::Warning
        }),
        None => CovenantStatus::Warning,
    };

    Covenant::financial(
        id,
        non_blank(raw.name).unwrap_or_else(|| UNNAMED_COVENANT.to_string()),
        ratio_from(raw.threshold.as_ref()),
        ratio_from(raw.current_value.as_ref()),
        status,
    )
}

fn normalize_flowchart(raw: RawFlowchart) -> Flowchart {
    let nodes: Vec<FlowNode> = raw
        .nodes
        .into_iter()
        .filter_map(|node| {
            let id = id_from(&node.id)?;
            let label = non_blank(node.label).unwrap_or_else(|| id.clone());
            Some(FlowNode {
                id,
                label,
                node_type: node.node_type,
                color: node.color,
            })
        })
        .collect();

    let mut flowchart = Flowchart {
        nodes,
        edges: Vec::new(),
    };

    for edge in raw.edges {
        let (Some(source), Some(target)) = (id_from(&edge.source), id_from(&edge.target)) else {
            warn!("Dropping flowchart edge with unusable endpoints");
            continue;
        };
        if !flowchart.has_node(&source) || !flowchart.has_node(&target) {
            warn!("Dropping flowchart edge {} -> {}: unknown node", source, target);
            continue;
        }
        let id = edge
            .id
            .as_ref()
            .and_then(id_from)
            .unwrap_or_else(|| format!("e{}-{}", source, target));
        flowchart.edges.push(FlowEdge {
            id,
            source,
            target,
            label: edge.label,
        });
    }

    flowchart
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

/// Ids arrive as strings or numbers
fn id_from(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Ratios clamp to zero when missing, negative, or not finite
fn ratio_from(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        _ => 0.0,
    }
}

/// Whole-dollar facility amount from a number or a numeric string
fn facility_amount_from(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => {
            if let Some(exact) = n.as_u64() {
                return Some(exact);
            }
            let v = n.as_f64()?;
            if !v.is_finite() || v < 0.0 || v > u64::MAX as f64 {
                return None;
            }
            Some(v.round() as u64)
        }
        Value::String(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| !matches!(c, '$' | ',' | '_') && !c.is_whitespace())
                .collect();
            let amount = Decimal::from_str(&cleaned).ok()?;
            if amount.is_sign_negative() {
                return None;
            }
            amount
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_u64()
        }
        _ => None,
    }
}

/// Maturity as ISO (`2029-12-31`) or long form (`December 31, 2029`)
fn parse_maturity(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_long_date(text))
}
