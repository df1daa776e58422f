//! Document import

use lexi_core::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Extensions offered by the file picker; anything else still loads
pub const SUGGESTED_EXTENSIONS: [&str; 4] = ["txt", "md", "json", "csv"];

/// Read a local file as raw document text.
///
/// Invalid UTF-8 sequences are replaced rather than rejected. No format is
/// parsed: a `.json` or `.csv` file is analyzed as the text it contains.
pub fn load_document(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(Error::InvalidInput(format!(
            "{} is not a readable file",
            path.display()
        )));
    }

    let suggested = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUGGESTED_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        });
    if !suggested {
        warn!(path = %path.display(), "Loading file with unexpected extension as raw text");
    }

    let bytes = fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes).into_owned();
    info!(path = %path.display(), bytes = bytes.len(), "Document loaded");
    Ok(text)
}
