//! # logfind - Text Log Search Library
//!
//! Search every text file beneath a folder for lines matching a query.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use logfind::LogFinder;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Lines where each token appears inside some word
//!     let result = LogFinder::search_dir("./logs")
//!         .approximate("john pay")
//!         .search()
//!         .await?;
//!
//!     println!("Scanned {} files, {} lines matched",
//!              result.files_scanned, result.matches.len());
//!
//!     Ok(())
//! }
//! ```

use serde::Serialize;
use std::path::{Path, PathBuf};

pub mod config;
pub mod error;
pub mod report;
pub mod search;

pub use config::{Config, ConfigStore};
pub use error::{LogFindError, Result};
pub use search::{DirectorySearch, MatchMode, Matcher};

/// Main entry point for folder searches
pub struct LogFinder;

impl LogFinder {
    /// Search the text files beneath `root`
    pub fn search_dir(root: impl AsRef<Path>) -> DirectorySearch {
        DirectorySearch::new(root.as_ref())
    }
}

/// Result of a folder search
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// Folder that was searched
    pub root: PathBuf,
    /// How the query was interpreted
    pub mode: MatchMode,
    /// Number of files that were read
    pub files_scanned: usize,
    /// Number of files that could not be opened
    pub skipped_files: usize,
    /// Whether the search stopped early at the match limit
    pub truncated: bool,
    /// Matching lines in walk order
    pub matches: Vec<LineMatch>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Number of distinct files with at least one match
    pub fn files_with_matches(&self) -> usize {
        let mut count = 0;
        let mut last: Option<&Path> = None;
        // matches are grouped by file, in walk order
        for m in &self.matches {
            if last != Some(m.path.as_path()) {
                count += 1;
                last = Some(m.path.as_path());
            }
        }
        count
    }
}

/// A single matching line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineMatch {
    /// File containing the line
    pub path: PathBuf,
    /// 1-based line number
    pub line_number: usize,
    /// Line text with surrounding whitespace trimmed
    pub line: String,
}
