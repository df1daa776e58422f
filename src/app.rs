//! Application state for one LexiGuard session

use lexi_core::{
    AnalysisController, AnalysisResult, AnalysisState, DocumentAnalyzer, LatestAnalysis, Result,
};
use lexi_report::{
    DEFAULT_CSV_FILE, DEFAULT_PRINT_FILE, render_compliance_overview, render_state, write_csv,
    write_print_report,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Views of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Analysis,
    Compliance,
}

impl Page {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "analysis" | "dashboard" => Some(Page::Analysis),
            "compliance" => Some(Page::Compliance),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Print,
}

impl ExportFormat {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "print" | "pdf" | "txt" => Some(ExportFormat::Print),
            _ => None,
        }
    }

    pub fn default_path(&self) -> &'static Path {
        match self {
            ExportFormat::Csv => Path::new(DEFAULT_CSV_FILE),
            ExportFormat::Print => Path::new(DEFAULT_PRINT_FILE),
        }
    }
}

/// Root controller: current page, document buffer, and the analysis session
pub struct Dashboard {
    page: Page,
    input: String,
    controller: AnalysisController,
    latest: LatestAnalysis,
}

impl Dashboard {
    pub fn new(analyzer: Arc<dyn DocumentAnalyzer>) -> Self {
        let controller = AnalysisController::new(analyzer);
        let latest = controller.subscribe_latest();
        Self {
            page: Page::Analysis,
            input: String::new(),
            controller,
            latest,
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn navigate(&mut self, page: Page) {
        self.page = page;
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn model_id(&self) -> &str {
        self.controller.model_id()
    }

    pub fn state(&self) -> AnalysisState {
        self.controller.state()
    }

    /// Whether `analyze` would start a new attempt
    pub fn can_submit(&self) -> bool {
        !self.input.trim().is_empty() && !self.state().is_analyzing()
    }

    /// Analyze the current buffer and switch to the analysis page
    pub async fn analyze(&mut self) -> AnalysisState {
        self.page = Page::Analysis;
        self.controller.submit(&self.input).await
    }

    /// Most recent successful result, kept across later failures
    pub fn latest(&self) -> Option<Arc<AnalysisResult>> {
        self.latest.borrow().clone()
    }

    pub fn render_page(&self) -> String {
        match self.page {
            Page::Analysis => render_state(&self.state()),
            Page::Compliance => render_compliance_overview(self.latest().as_deref()),
        }
    }

    /// Write the compliance overview; returns the path written
    pub fn export(&self, format: ExportFormat, path: Option<&Path>) -> Result<PathBuf> {
        let path = path.unwrap_or_else(|| format.default_path()).to_path_buf();
        let latest = self.latest();
        match format {
            ExportFormat::Csv => write_csv(&path, latest.as_deref())?,
            ExportFormat::Print => write_print_report(&path, latest.as_deref())?,
        }
        Ok(path)
    }
}

/// One line of shell input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Load(PathBuf),
    Paste,
    Analyze,
    Report,
    Compliance,
    Export(ExportFormat, Option<PathBuf>),
    Page(Page),
    Help,
    Exit,
    Unknown(String),
}

impl ShellCommand {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let (verb, rest) = match input.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (input, ""),
        };

        match (verb.to_lowercase().as_str(), rest) {
            ("load", path) if !path.is_empty() => ShellCommand::Load(PathBuf::from(path)),
            ("paste", "") => ShellCommand::Paste,
            ("analyze", "") => ShellCommand::Analyze,
            ("report", "") => ShellCommand::Report,
            ("compliance", "") => ShellCommand::Compliance,
            ("export", args) => {
                let (format, path) = match args.split_once(char::is_whitespace) {
                    Some((format, path)) => (format, Some(PathBuf::from(path.trim()))),
                    None => (args, None),
                };
                match ExportFormat::parse(format) {
                    Some(format) => ShellCommand::Export(format, path),
                    None => ShellCommand::Unknown(input.to_string()),
                }
            }
            ("page", name) => match Page::parse(name) {
                Some(page) => ShellCommand::Page(page),
                None => ShellCommand::Unknown(input.to_string()),
            },
            ("help", "") => ShellCommand::Help,
            ("exit", "") | ("quit", "") => ShellCommand::Exit,
            _ => ShellCommand::Unknown(input.to_string()),
        }
    }
}
