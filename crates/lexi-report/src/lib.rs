//! Report rendering for LexiGuard
//!
//! Pure presentation of a completed analysis: derived dashboard statistics,
//! terminal views, and the CSV and print exports of the compliance overview.

pub mod export;
pub mod render;
pub mod stats;

pub use export::{
    CSV_HEADER, DEFAULT_CSV_FILE, DEFAULT_PRINT_FILE, compliance_csv, print_report, write_csv,
    write_print_report,
};
pub use render::{
    DISCLAIMER, gauge_bar, render_action_chips, render_analysis, render_compliance_overview,
    render_error, render_governance, render_risk_matrix, render_state, render_summary,
};
pub use stats::{
    COMPLIANCE_HEATMAP, ComplianceStatus, Deadline, GovernanceBand, HeatmapEntry,
    REGULATORY_DEADLINES, StatCard, compliance_status, dashboard_stats, format_number, risk_count,
};
