use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::*;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use lexi_core::{AnalysisState, parse_analysis};
use lexi_gemini::GeminiClient;
use lexi_report::{
    render_analysis, render_compliance_overview, render_error, render_state, write_csv,
    write_print_report,
};

mod app;
mod document;
mod ui;

use app::{Dashboard, ExportFormat, Page, ShellCommand};
use document::load_document;

#[derive(Parser)]
#[command(name = "lexiguard")]
#[command(about = "AI-powered legal document analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a document and print the report
    Analyze {
        /// Text file to analyze; reads stdin when neither a file nor --text is given
        file: Option<PathBuf>,

        /// Document text given inline
        #[arg(short, long, conflicts_with = "file")]
        text: Option<String>,

        /// Print the raw analysis as JSON
        #[arg(long)]
        json: bool,

        /// Also write the compliance overview as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Also write the print-ready compliance report
        #[arg(long)]
        print: Option<PathBuf>,
    },
    /// Show the compliance overview (demo data unless --from is given)
    Compliance {
        /// Saved analysis JSON to report on
        #[arg(long)]
        from: Option<PathBuf>,

        #[arg(long)]
        csv: Option<PathBuf>,

        #[arg(long)]
        print: Option<PathBuf>,
    },
    /// Start the interactive shell (default)
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Analyze {
            file,
            text,
            json,
            csv,
            print,
        } => run_analyze(file, text, json, csv, print).await,
        Commands::Compliance { from, csv, print } => run_compliance(from, csv, print),
        Commands::Shell => run_shell().await,
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lexiguard=info,lexi_core=info,lexi_gemini=info".into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn new_dashboard() -> Result<Dashboard> {
    let client = GeminiClient::from_env().context("failed to build the analysis client")?;
    Ok(Dashboard::new(Arc::new(client)))
}

async fn run_analyze(
    file: Option<PathBuf>,
    text: Option<String>,
    json: bool,
    csv: Option<PathBuf>,
    print: Option<PathBuf>,
) -> Result<()> {
    let document = match (file, text) {
        (Some(path), _) => load_document(&path)?,
        (None, Some(text)) => text,
        (None, None) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    if document.trim().is_empty() {
        bail!("Nothing to analyze: the document is empty");
    }

    let mut dashboard = new_dashboard()?;
    dashboard.set_input(document);

    match dashboard.analyze().await {
        AnalysisState::Complete(result) => {
            if json {
                println!("{}", serde_json::to_string_pretty(result.as_ref())?);
            } else {
                println!("{}", render_analysis(&result));
            }
            if let Some(path) = csv {
                let path = dashboard.export(ExportFormat::Csv, Some(&path))?;
                eprintln!("{} CSV written to {}", "✅".green(), path.display());
            }
            if let Some(path) = print {
                let path = dashboard.export(ExportFormat::Print, Some(&path))?;
                eprintln!("{} Report written to {}", "✅".green(), path.display());
            }
            Ok(())
        }
        AnalysisState::Error(message) => {
            eprintln!("{}", render_error(&message));
            std::process::exit(1);
        }
        other => bail!("analysis ended in unexpected state {:?}", other.status()),
    }
}

fn run_compliance(from: Option<PathBuf>, csv: Option<PathBuf>, print: Option<PathBuf>) -> Result<()> {
    let result = match from {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Some(parse_analysis(&raw)?)
        }
        None => None,
    };

    println!("{}", render_compliance_overview(result.as_ref()));

    if let Some(path) = csv {
        write_csv(&path, result.as_ref())?;
        println!("{} CSV written to {}", "✅".green(), path.display());
    }
    if let Some(path) = print {
        write_print_report(&path, result.as_ref())?;
        println!("{} Report written to {}", "✅".green(), path.display());
    }
    Ok(())
}

async fn run_shell() -> Result<()> {
    let mut dashboard = new_dashboard()?;

    if io::stdin().is_terminal() {
        ui::display_banner(dashboard.model_id());
    }

    while let Some(input) = ui::read_command()? {
        if input.is_empty() {
            continue;
        }

        match ShellCommand::parse(&input) {
            ShellCommand::Exit => {
                println!("{}", "👋 Goodbye!".green());
                break;
            }
            ShellCommand::Help => ui::print_help(),
            ShellCommand::Load(path) => load_into(&mut dashboard, &path),
            ShellCommand::Paste => {
                let text = ui::read_pasted_document()?;
                println!("{} {} characters captured", "✅".green(), text.chars().count());
                dashboard.set_input(text);
            }
            ShellCommand::Analyze => {
                if !dashboard.can_submit() {
                    println!(
                        "{} Nothing to analyze. Use `load <file>` or `paste` first.",
                        "⚠️".yellow()
                    );
                    continue;
                }
                println!("{}", render_state(&AnalysisState::Analyzing));
                dashboard.analyze().await;
                println!("{}", dashboard.render_page());
            }
            ShellCommand::Report => {
                dashboard.navigate(Page::Analysis);
                println!("{}", dashboard.render_page());
            }
            ShellCommand::Compliance => {
                dashboard.navigate(Page::Compliance);
                println!("{}", dashboard.render_page());
            }
            ShellCommand::Page(page) => {
                dashboard.navigate(page);
                println!("{} {:?}", "→".green(), dashboard.page());
                println!("{}", dashboard.render_page());
            }
            ShellCommand::Export(format, path) => match dashboard.export(format, path.as_deref()) {
                Ok(path) => println!("{} Exported to {}", "✅".green(), path.display()),
                Err(e) => println!("{} Export failed: {}", "❌".red(), e),
            },
            ShellCommand::Unknown(command) => {
                println!("{} Unknown command: {}. Type 'help'.", "❓".cyan(), command);
            }
        }
    }

    Ok(())
}

fn load_into(dashboard: &mut Dashboard, path: &Path) {
    match load_document(path) {
        Ok(text) => {
            println!(
                "{} Loaded {} ({} characters)",
                "✅".green(),
                path.display(),
                text.chars().count()
            );
            dashboard.set_input(text);
        }
        Err(e) => println!("{} {}", "❌".red(), e),
    }
}
