//! UI utilities for the interactive shell

use colored::*;
use crossterm::terminal::size;
use std::io::{self, BufRead, Write};

/// Line that ends a pasted document
pub const PASTE_TERMINATOR: &str = ".";

/// Display startup banner
pub fn display_banner(model_id: &str) {
    let terminal_width = size().map(|(w, _)| w as usize).unwrap_or(80);
    let banner_width = std::cmp::min(67, terminal_width.saturating_sub(4)).max(40);
    let inner = banner_width - 2;

    println!();
    println!("{}", format!("┌{}┐", "─".repeat(inner)).blue());

    let lines = [
        "LexiGuard - Legal Intelligence Engine".to_string(),
        String::new(),
        "Risk assessment and ESG compliance for contracts,".to_string(),
        "NDAs and filings, in plain English.".to_string(),
        String::new(),
        format!("v{} • model {}", env!("CARGO_PKG_VERSION"), model_id),
    ];

    for line in &lines {
        let padding = inner.saturating_sub(line.chars().count() + 2);
        println!("{}", format!("│  {}{}│", line, " ".repeat(padding)).blue());
    }

    println!("{}", format!("└{}┘", "─".repeat(inner)).blue());
    println!();
    println!(
        "{}",
        "💡 Tip: `load <file>` or `paste` a document, then `analyze`. Type 'help' for commands".dimmed()
    );
    println!();
}

pub fn print_help() {
    println!("{}", "Available commands:".bold());
    println!("  {} - Load a text file as the document", "load <file>".green());
    println!(
        "  {} - Paste document text, end with a line containing only '{}'",
        "paste".green(),
        PASTE_TERMINATOR
    );
    println!("  {} - Analyze the current document", "analyze".green());
    println!("  {} - Show the latest analysis report", "report".green());
    println!("  {} - Show the compliance overview", "compliance".green());
    println!("  {} - Export the compliance overview", "export csv|print [path]".green());
    println!("  {} - Switch view", "page analysis|compliance".green());
    println!("  {} - Show this help message", "help".green());
    println!("  {} - Exit the application", "exit/quit".green());
}

/// Prompt and read one line; `None` at end of input
pub fn read_command() -> io::Result<Option<String>> {
    print!("{} ", "lexiguard>".green().bold());
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

/// Read pasted lines up to the terminator line or end of input
pub fn read_pasted_document() -> io::Result<String> {
    println!(
        "{} Paste your legal document text. Finish with a line containing only '{}'.",
        "📝".cyan(),
        PASTE_TERMINATOR
    );
    collect_pasted(io::stdin().lock())
}

fn collect_pasted(reader: impl BufRead) -> io::Result<String> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim_end() == PASTE_TERMINATOR {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}
