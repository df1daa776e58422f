//! Result schema declaration and structural validation
//!
//! The schema is sent to the model service as the required output shape.
//! Responses are checked locally for the four top-level objects and for
//! leaf types; value ranges and list lengths are left to the service.

use serde_json::{Value, json};

use crate::{AnalysisResult, Error, Result};

/// Top-level keys every analysis payload must carry
pub const REQUIRED_FIELDS: [&str; 4] = [
    "document_analysis",
    "risk_matrix",
    "action_chips",
    "governance_score",
];

/// Output shape declaration in the service's schema dialect
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "document_analysis": {
                "type": "OBJECT",
                "properties": {
                    "summary": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "A 3-bullet point executive summary in Plain English."
                    },
                    "tone_check": {
                        "type": "STRING",
                        "description": "Assessment of the document's tone (e.g., Aggressive, Neutral, Protective)."
                    },
                    "complexity_score": {
                        "type": "NUMBER",
                        "description": "A score from 1-10 indicating how difficult the document is to understand."
                    }
                },
                "required": ["summary", "tone_check", "complexity_score"]
            },
            "risk_matrix": {
                "type": "OBJECT",
                "properties": {
                    "high_priority": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "Critical risks requiring immediate attention."
                    },
                    "medium_priority": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "Significant risks that should be managed."
                    },
                    "low_priority": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "Minor risks or standard clauses."
                    }
                },
                "required": ["high_priority", "medium_priority", "low_priority"]
            },
            "action_chips": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "label": { "type": "STRING" },
                        "action": { "type": "STRING" }
                    }
                },
                "description": "3 immediate next steps for the client."
            },
            "governance_score": {
                "type": "OBJECT",
                "properties": {
                    "rating": {
                        "type": "NUMBER",
                        "description": "A score from 0-100 indicating alignment with ESG and corporate governance standards."
                    },
                    "esg_notes": {
                        "type": "STRING",
                        "description": "Specific notes on Environmental, Social, and Governance factors found."
                    }
                },
                "required": ["rating", "esg_notes"]
            }
        },
        "required": REQUIRED_FIELDS
    })
}

/// Parse a raw service payload into an [`AnalysisResult`].
///
/// Fails with [`Error::MalformedResponse`] when the payload is not JSON, is
/// not an object, lacks (or nulls) a required top-level key, or carries a
/// leaf of the wrong type.
pub fn parse_analysis(payload: &str) -> Result<AnalysisResult> {
    let value: Value = serde_json::from_str(payload)
        .map_err(|e| Error::MalformedResponse(format!("payload is not valid JSON: {}", e)))?;

    let object = value
        .as_object()
        .ok_or_else(|| Error::MalformedResponse("payload is not a JSON object".to_string()))?;

    if let Some(missing) = REQUIRED_FIELDS
        .iter()
        .find(|field| object.get(**field).map_or(true, Value::is_null))
    {
        return Err(Error::MalformedResponse(format!(
            "missing required field `{}`",
            missing
        )));
    }

    serde_json::from_value(value)
        .map_err(|e| Error::MalformedResponse(format!("unexpected field shape: {}", e)))
}
