//! Derived dashboard statistics
//!
//! Everything here is a pure function of the latest [`AnalysisResult`] (or
//! of its absence, in which case the demo dataset is used).

use lexi_core::AnalysisResult;
use serde::Serialize;
use std::fmt;

/// Ratings strictly above this are reported as `Good`
pub const COMPLIANCE_GOOD_ABOVE: f64 = 80.0;

/// Ratings strictly above this trend upward on the ESG readiness card
pub const ESG_TREND_UP_ABOVE: f64 = 70.0;

/// Compliance label derived from the governance rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComplianceStatus {
    Good,
    Review,
}

impl ComplianceStatus {
    /// `Good` when `rating > 80`; 80 itself is `Review`
    pub fn from_rating(rating: f64) -> Self {
        if rating > COMPLIANCE_GOOD_ABOVE {
            ComplianceStatus::Good
        } else {
            ComplianceStatus::Review
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComplianceStatus::Good => "Good",
            ComplianceStatus::Review => "Review",
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Colour band of the governance gauge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GovernanceBand {
    Strong,
    Moderate,
    Weak,
}

impl GovernanceBand {
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 80.0 {
            GovernanceBand::Strong
        } else if rating >= 50.0 {
            GovernanceBand::Moderate
        } else {
            GovernanceBand::Weak
        }
    }
}

/// One card of the compliance overview
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub trend: String,
    pub trend_up: bool,
    pub subtext: String,
    pub highlight: bool,
}

impl StatCard {
    fn new(title: &str, value: impl Into<String>, trend: &str, trend_up: bool, subtext: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            value: value.into(),
            trend: trend.to_string(),
            trend_up,
            subtext: subtext.into(),
            highlight: false,
        }
    }

    fn highlighted(mut self) -> Self {
        self.highlight = true;
        self
    }
}

/// Fixed compliance heatmap row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatmapEntry {
    pub label: &'static str,
    pub value: u8,
}

pub const COMPLIANCE_HEATMAP: [HeatmapEntry; 4] = [
    HeatmapEntry { label: "Data Privacy (GDPR/DPA)", value: 92 },
    HeatmapEntry { label: "Labor Standards", value: 88 },
    HeatmapEntry { label: "Environmental Impact", value: 74 },
    HeatmapEntry { label: "Anti-Money Laundering", value: 98 },
];

/// Fixed regulatory calendar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Deadline {
    pub month: &'static str,
    pub day: &'static str,
    pub title: &'static str,
    pub subtext: &'static str,
}

pub const REGULATORY_DEADLINES: [Deadline; 3] = [
    Deadline {
        month: "Oct",
        day: "28",
        title: "Quarterly ESG Filing",
        subtext: "Mandatory for EDGE certification renewal.",
    },
    Deadline {
        month: "Nov",
        day: "05",
        title: "Data Protection Audit",
        subtext: "Internal review of customer data handling.",
    },
    Deadline {
        month: "Nov",
        day: "12",
        title: "Board Governance Review",
        subtext: "Annual self-assessment distribution.",
    },
];

/// High plus medium priority risks
pub fn risk_count(result: &AnalysisResult) -> usize {
    result.risk_matrix.high_priority.len() + result.risk_matrix.medium_priority.len()
}

pub fn compliance_status(result: &AnalysisResult) -> ComplianceStatus {
    ComplianceStatus::from_rating(result.governance_score.rating)
}

/// Stat cards for the compliance overview; demo data when `result` is `None`
pub fn dashboard_stats(result: Option<&AnalysisResult>) -> Vec<StatCard> {
    let Some(result) = result else {
        return demo_stats();
    };

    let rating = result.governance_score.rating;
    let high = result.risk_matrix.high_priority.len();

    vec![
        StatCard::new(
            "ESG Readiness",
            format!("{}%", format_number(rating)),
            "Live",
            rating > ESG_TREND_UP_ABOVE,
            "Based on latest analysis",
        )
        .highlighted(),
        StatCard::new(
            "Identified Risks",
            risk_count(result).to_string(),
            if high > 0 { "Critical" } else { "Stable" },
            high == 0,
            format!("{} high priority items", high),
        )
        .highlighted(),
        StatCard::new("Docs Reviewed", "1", "Just Now", true, "Session active"),
        StatCard::new(
            "Compliance Status",
            compliance_status(result).label(),
            "-",
            true,
            "Action required",
        ),
    ]
}

fn demo_stats() -> Vec<StatCard> {
    vec![
        StatCard::new("ESG Readiness", "85%", "+5%", true, "Industry avg: 80%"),
        StatCard::new("Active Risks", "12", "-2", true, "3 High priority"),
        StatCard::new("Docs Reviewed", "1,240", "+12%", true, "This quarter"),
        StatCard::new("Pending Audits", "2", "Urgent", false, "Due in 14 days"),
    ]
}

/// Render a number the way the service sent it: integers without a fraction
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_yaml_snapshot;
    use lexi_core::{ActionChip, DocumentAnalysis, GovernanceScore, RiskMatrix};

    fn result_with(rating: f64, high: &[&str], medium: &[&str]) -> AnalysisResult {
        AnalysisResult {
            document_analysis: DocumentAnalysis {
                summary: vec!["a".into(), "b".into(), "c".into()],
                tone_check: "Neutral".into(),
                complexity_score: 4.0,
            },
            risk_matrix: RiskMatrix {
                high_priority: high.iter().map(|s| s.to_string()).collect(),
                medium_priority: medium.iter().map(|s| s.to_string()).collect(),
                low_priority: vec!["Y".into()],
            },
            action_chips: vec![ActionChip {
                label: "Review".into(),
                action: "Escalate".into(),
            }],
            governance_score: GovernanceScore {
                rating,
                esg_notes: "Strong privacy clause".into(),
            },
        }
    }

    #[test]
    fn test_scenario_b_derived_values() {
        let result = result_with(82.0, &["X"], &[]);

        assert_eq!(risk_count(&result), 1);
        assert_eq!(compliance_status(&result), ComplianceStatus::Good);
    }

    #[test]
    fn test_compliance_boundary() {
        assert_eq!(ComplianceStatus::from_rating(79.0), ComplianceStatus::Review);
        assert_eq!(ComplianceStatus::from_rating(80.0), ComplianceStatus::Review);
        assert_eq!(ComplianceStatus::from_rating(80.5), ComplianceStatus::Good);
        assert_eq!(ComplianceStatus::from_rating(81.0), ComplianceStatus::Good);
    }

    #[test]
    fn test_governance_band_boundaries() {
        assert_eq!(GovernanceBand::from_rating(80.0), GovernanceBand::Strong);
        assert_eq!(GovernanceBand::from_rating(79.9), GovernanceBand::Moderate);
        assert_eq!(GovernanceBand::from_rating(50.0), GovernanceBand::Moderate);
        assert_eq!(GovernanceBand::from_rating(49.0), GovernanceBand::Weak);
        assert_eq!(GovernanceBand::from_rating(-5.0), GovernanceBand::Weak);
    }

    #[test]
    fn test_risk_count_ignores_low_priority() {
        let result = result_with(60.0, &["a", "b"], &["c", "d", "e"]);
        assert_eq!(risk_count(&result), 5);
    }

    #[test]
    fn test_live_stats() {
        let result = result_with(82.0, &["X"], &[]);
        let stats = dashboard_stats(Some(&result));

        assert_eq!(stats.len(), 4);
        assert_eq!(stats[0].value, "82%");
        assert!(stats[0].trend_up);
        assert!(stats[0].highlight);
        assert_eq!(stats[1].value, "1");
        assert_eq!(stats[1].trend, "Critical");
        assert!(!stats[1].trend_up);
        assert_eq!(stats[1].subtext, "1 high priority items");
        assert_eq!(stats[3].value, "Good");
    }

    #[test]
    fn test_esg_trend_boundary() {
        assert!(!dashboard_stats(Some(&result_with(70.0, &[], &[])))[0].trend_up);
        assert!(dashboard_stats(Some(&result_with(71.0, &[], &[])))[0].trend_up);
    }

    #[test]
    fn test_stable_when_no_high_priority() {
        let stats = dashboard_stats(Some(&result_with(50.0, &[], &["m"])));
        assert_eq!(stats[1].trend, "Stable");
        assert!(stats[1].trend_up);
        assert_eq!(stats[3].value, "Review");
    }

    #[test]
    fn test_stats_are_idempotent() {
        let result = result_with(64.5, &["X"], &["Y"]);
        assert_eq!(dashboard_stats(Some(&result)), dashboard_stats(Some(&result)));
        assert_eq!(dashboard_stats(None), dashboard_stats(None));
    }

    #[test]
    fn test_demo_stats_titles() {
        let titles: Vec<String> = dashboard_stats(None).into_iter().map(|s| s.title).collect();
        assert_yaml_snapshot!(titles, @r###"
        - ESG Readiness
        - Active Risks
        - Docs Reviewed
        - Pending Audits
        "###);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(82.0), "82");
        assert_eq!(format_number(82.5), "82.5");
        assert_eq!(format_number(-3.0), "-3");
    }
}
