//! Terminal views of an analysis

use colored::*;
use lexi_core::{ActionChip, AnalysisResult, AnalysisState, DocumentAnalysis, GovernanceScore, RiskMatrix};

use crate::stats::{
    COMPLIANCE_HEATMAP, GovernanceBand, REGULATORY_DEADLINES, StatCard, dashboard_stats, format_number,
};

pub const DISCLAIMER: &str = "Disclaimer: LexiGuard is an AI-powered tool. This analysis does not constitute legal advice. \
Please consult with qualified legal counsel for binding decisions.";

pub const EMPTY_TIER: &str = "No specific risks identified.";

const BAR_WIDTH: usize = 20;

/// Horizontal bar for a 0-100 value; out-of-range values are clamped
pub fn gauge_bar(value: f64, width: usize) -> String {
    let filled = ((value.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Render whatever the current attempt state calls for
pub fn render_state(state: &AnalysisState) -> String {
    match state {
        AnalysisState::Idle => format!(
            "{}",
            "Paste or load a document, then run `analyze`.".dimmed()
        ),
        AnalysisState::Analyzing => format!("{} Processing...", "⏳".yellow()),
        AnalysisState::Complete(result) => render_analysis(result),
        AnalysisState::Error(message) => render_error(message),
    }
}

/// Full report: summary, governance, risks, actions, disclaimer
pub fn render_analysis(result: &AnalysisResult) -> String {
    [
        render_summary(&result.document_analysis),
        render_governance(&result.governance_score),
        render_risk_matrix(&result.risk_matrix),
        render_action_chips(&result.action_chips),
        format!("{}", DISCLAIMER.dimmed()),
    ]
    .join("\n\n")
}

pub fn render_summary(analysis: &DocumentAnalysis) -> String {
    let mut lines = vec![
        format!(
            "{} {}",
            "Executive Summary".bold(),
            "(Plain English Translation)".dimmed()
        ),
        format!(
            "{}   {}",
            format!("Tone: {}", analysis.tone_check).blue(),
            format!("Complexity: {}/10", format_number(analysis.complexity_score)).magenta()
        ),
    ];

    for (i, point) in analysis.summary.iter().enumerate() {
        lines.push(format!("  {} {}", format!("{}.", i + 1).bold(), point));
    }

    lines.join("\n")
}

pub fn render_governance(score: &GovernanceScore) -> String {
    let bar = gauge_bar(score.rating, BAR_WIDTH);
    let rating = format_number(score.rating);
    let (bar, rating) = match GovernanceBand::from_rating(score.rating) {
        GovernanceBand::Strong => (bar.green(), rating.green().bold()),
        GovernanceBand::Moderate => (bar.yellow(), rating.yellow().bold()),
        GovernanceBand::Weak => (bar.red(), rating.red().bold()),
    };

    [
        format!("{}", "Governance & ESG".bold()),
        format!("  {} {} / 100", bar, rating),
        format!("  {}", score.esg_notes),
    ]
    .join("\n")
}

pub fn render_risk_matrix(risks: &RiskMatrix) -> String {
    let tiers = [
        ("HIGH PRIORITY", &risks.high_priority, Color::Red),
        ("MEDIUM PRIORITY", &risks.medium_priority, Color::Yellow),
        ("LOW PRIORITY", &risks.low_priority, Color::Blue),
    ];

    let mut lines = Vec::new();
    for (title, items, color) in tiers {
        lines.push(format!("{} {}", "●".color(color), title.color(color).bold()));
        if items.is_empty() {
            lines.push(format!("  {}", EMPTY_TIER.dimmed().italic()));
        } else {
            lines.extend(items.iter().map(|item| format!("  - {}", item)));
        }
    }

    lines.join("\n")
}

pub fn render_action_chips(chips: &[ActionChip]) -> String {
    let mut lines = vec![format!("{}", "Recommended Actions".bold())];
    for chip in chips {
        lines.push(format!(
            "  {} {} {}",
            chip.label.to_uppercase().dimmed(),
            "→".cyan(),
            chip.action
        ));
    }
    lines.join("\n")
}

/// Failure panel; the message is shown verbatim
pub fn render_error(message: &str) -> String {
    format!("{} {}\n  {}", "❌".red(), "Analysis Failed".red().bold(), message)
}

fn render_stat_card(card: &StatCard) -> String {
    let title = card.title.to_uppercase();
    let title = if card.highlight { title.yellow() } else { title.normal() };
    let trend = if card.trend_up { card.trend.green() } else { card.trend.red() };

    format!(
        "  {:<20} {:>8}  {}  {}",
        title,
        card.value.bold(),
        trend,
        card.subtext.dimmed()
    )
}

/// Compliance overview, live when `result` is present and demo otherwise
pub fn render_compliance_overview(result: Option<&AnalysisResult>) -> String {
    let badge = match result {
        Some(_) => " LIVE ANALYSIS ".on_green().black().bold(),
        None => " DEMO DATA ".on_white().black().bold(),
    };

    let mut lines = vec![
        format!("{} {}", "Regulatory Compliance Overview".bold(), badge),
        format!(
            "{}",
            "Real-time tracking of ESG and legal conformity metrics.".dimmed()
        ),
        String::new(),
    ];

    lines.extend(dashboard_stats(result).iter().map(render_stat_card));

    lines.push(String::new());
    lines.push(format!("{}", "Compliance Heatmap".bold()));
    for entry in &COMPLIANCE_HEATMAP {
        lines.push(format!(
            "  {:<26} {} {:>3}%",
            entry.label,
            gauge_bar(f64::from(entry.value), BAR_WIDTH).green(),
            entry.value
        ));
    }

    if let Some(result) = result {
        lines.push(String::new());
        lines.push(format!("  {}", "AI GOVERNANCE NOTES".dimmed().bold()));
        lines.push(format!(
            "  {}",
            format!("\"{}\"", result.governance_score.esg_notes).italic()
        ));
    }

    lines.push(String::new());
    lines.push(format!("{}", "Upcoming Regulatory Deadlines".bold()));
    for deadline in &REGULATORY_DEADLINES {
        lines.push(format!(
            "  {} {}  {}  {}",
            deadline.month.to_uppercase().dimmed(),
            deadline.day.bold(),
            deadline.title.bold(),
            deadline.subtext.dimmed()
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexi_core::{ActionChip, DocumentAnalysis, GovernanceScore, RiskMatrix};
    use std::sync::Arc;

    fn plain() {
        colored::control::set_override(false);
    }

    fn sample(rating: f64) -> AnalysisResult {
        AnalysisResult {
            document_analysis: DocumentAnalysis {
                summary: vec!["Mutual NDA".into(), "Two year term".into(), "Kenyan law".into()],
                tone_check: "Protective".into(),
                complexity_score: 6.0,
            },
            risk_matrix: RiskMatrix {
                high_priority: vec!["Unlimited liability".into()],
                medium_priority: vec![],
                low_priority: vec!["Standard notice clause".into()],
            },
            action_chips: vec![ActionChip {
                label: "Negotiate".into(),
                action: "Cap liability at fees paid".into(),
            }],
            governance_score: GovernanceScore {
                rating,
                esg_notes: "Strong privacy clause".into(),
            },
        }
    }

    #[test]
    fn test_gauge_bar_clamps() {
        assert_eq!(gauge_bar(50.0, 10), "█████░░░░░");
        assert_eq!(gauge_bar(150.0, 4), "████");
        assert_eq!(gauge_bar(-20.0, 4), "░░░░");
    }

    #[test]
    fn test_summary_numbers_points() {
        plain();
        let out = render_summary(&sample(82.0).document_analysis);

        assert!(out.contains("Tone: Protective"));
        assert!(out.contains("Complexity: 6/10"));
        assert!(out.contains("1. Mutual NDA"));
        assert!(out.contains("3. Kenyan law"));
    }

    #[test]
    fn test_empty_tier_placeholder() {
        plain();
        let out = render_risk_matrix(&sample(82.0).risk_matrix);

        assert!(out.contains("- Unlimited liability"));
        assert_eq!(out.matches(EMPTY_TIER).count(), 1);
    }

    #[test]
    fn test_governance_shows_rating() {
        plain();
        let out = render_governance(&sample(82.0).governance_score);
        assert!(out.contains("82 / 100"));
        assert!(out.contains("Strong privacy clause"));
    }

    #[test]
    fn test_error_panel_is_verbatim() {
        plain();
        let message = "Configuration error: GEMINI_API_KEY or API_KEY environment variable not found";
        let out = render_state(&AnalysisState::Error(message.to_string()));

        assert!(out.contains("Analysis Failed"));
        assert!(out.contains(message));
    }

    #[test]
    fn test_complete_state_renders_report() {
        plain();
        let out = render_state(&AnalysisState::Complete(Arc::new(sample(82.0))));

        assert!(out.contains("Executive Summary"));
        assert!(out.contains("NEGOTIATE"));
        assert!(out.contains(DISCLAIMER));
    }

    #[test]
    fn test_compliance_overview_demo_and_live() {
        plain();
        let demo = render_compliance_overview(None);
        assert!(demo.contains("DEMO DATA"));
        assert!(demo.contains("1,240"));
        assert!(!demo.contains("AI GOVERNANCE NOTES"));

        let result = sample(82.0);
        let live = render_compliance_overview(Some(&result));
        assert!(live.contains("LIVE ANALYSIS"));
        assert!(live.contains("82%"));
        assert!(live.contains("\"Strong privacy clause\""));
        assert!(live.contains("Board Governance Review"));
    }
}
