//! Rendering search results for display

use crate::{Result, SearchResult};

/// Plain-text listing, one block per matching line
pub fn render_text(result: &SearchResult) -> String {
    let mut output = String::new();

    if result.is_empty() {
        output.push_str("No matching lines found.\n");
    }

    for m in &result.matches {
        output.push_str(&format!("File: {}\n", m.path.display()));
        output.push_str(&format!("Line {}: {}\n\n", m.line_number, m.line));
    }

    output.push_str(&format!(
        "{} matching lines in {} of {} files",
        result.matches.len(),
        result.files_with_matches(),
        result.files_scanned
    ));
    if result.skipped_files > 0 {
        output.push_str(&format!(" ({} unreadable)", result.skipped_files));
    }
    if result.truncated {
        output.push_str(" [stopped at limit]");
    }
    output.push('\n');

    output
}

/// The whole result as pretty-printed JSON
pub fn render_json(result: &SearchResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}
