//! CSV and print exports of the compliance overview

use chrono::NaiveDate;
use lexi_core::{AnalysisResult, Result};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::stats::{COMPLIANCE_HEATMAP, REGULATORY_DEADLINES, dashboard_stats};

pub const CSV_HEADER: &str = "Category,Metric,Value,Notes";
pub const DEFAULT_CSV_FILE: &str = "lexiguard_compliance_report.csv";
pub const DEFAULT_PRINT_FILE: &str = "lexiguard_compliance_report.txt";

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Flat `Category,Metric,Value,Notes` table of the current statistics and
/// the fixed heatmap. Demo statistics are used when `result` is `None`.
pub fn compliance_csv(result: Option<&AnalysisResult>) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');

    for card in dashboard_stats(result) {
        csv.push_str(&format!(
            "Statistics,{},{},{}\n",
            card.title,
            quote(&card.value),
            quote(&card.subtext)
        ));
    }

    for entry in &COMPLIANCE_HEATMAP {
        csv.push_str(&format!("Compliance Score,{},{}%,\n", entry.label, entry.value));
    }

    csv
}

/// Plain-text report laid out for printing
pub fn print_report(result: Option<&AnalysisResult>, generated_on: NaiveDate) -> String {
    let mut lines = vec![
        "LexiGuard Compliance Report".to_string(),
        format!("Generated on {}", generated_on.format("%-m/%-d/%Y")),
        "=".repeat(60),
        String::new(),
    ];

    for card in dashboard_stats(result) {
        lines.push(format!("{:<20} {:>8}  {}", card.title, card.value, card.subtext));
    }

    lines.push(String::new());
    lines.push("Compliance Heatmap".to_string());
    for entry in &COMPLIANCE_HEATMAP {
        lines.push(format!("  {:<26} {:>3}%", entry.label, entry.value));
    }

    if let Some(result) = result {
        lines.push(String::new());
        lines.push("AI Governance Notes".to_string());
        lines.push(format!("  \"{}\"", result.governance_score.esg_notes));
    }

    lines.push(String::new());
    lines.push("Upcoming Regulatory Deadlines".to_string());
    for deadline in &REGULATORY_DEADLINES {
        lines.push(format!(
            "  {} {}  {} - {}",
            deadline.month, deadline.day, deadline.title, deadline.subtext
        ));
    }

    let mut report = lines.join("\n");
    report.push('\n');
    report
}

pub fn write_csv(path: &Path, result: Option<&AnalysisResult>) -> Result<()> {
    fs::write(path, compliance_csv(result))?;
    info!(path = %path.display(), live = result.is_some(), "Compliance CSV written");
    Ok(())
}

pub fn write_print_report(path: &Path, result: Option<&AnalysisResult>) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    fs::write(path, print_report(result, today))?;
    info!(path = %path.display(), live = result.is_some(), "Print report written");
    Ok(())
}
