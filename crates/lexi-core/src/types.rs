//! Analysis result value objects

use serde::{Deserialize, Serialize};

/// Structured output of one document analysis.
///
/// Constructed only by parsing a service response (see [`crate::schema::parse_analysis`])
/// and never mutated afterwards. Numeric fields are kept exactly as received;
/// consumers clamp them for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub document_analysis: DocumentAnalysis,
    pub risk_matrix: RiskMatrix,
    pub action_chips: Vec<ActionChip>,
    pub governance_score: GovernanceScore,
}

/// Plain-English reading of the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    /// Executive summary points, three expected
    pub summary: Vec<String>,
    pub tone_check: String,
    /// 1 (simple) to 10 (dense)
    pub complexity_score: f64,
}

/// Risks grouped by priority tier
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskMatrix {
    pub high_priority: Vec<String>,
    pub medium_priority: Vec<String>,
    pub low_priority: Vec<String>,
}

/// Recommended next step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionChip {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub action: String,
}

/// ESG and corporate governance alignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernanceScore {
    /// 0 to 100
    pub rating: f64,
    pub esg_notes: String,
}
