//! Folder search: walking, matching and collecting lines

use crate::{LineMatch, LogFindError, Result, SearchResult};
use std::path::{Path, PathBuf};

mod matcher;
mod scanner;
mod walker;

pub use matcher::{MatchMode, Matcher, find_lines_with_keyword, is_approximate_match};
pub use scanner::FileScanner;
pub use walker::{DEFAULT_EXTENSIONS, FileWalker};

/// Builder for searching a folder
pub struct DirectorySearch {
    root: PathBuf,
    query: Option<String>,
    mode: MatchMode,
    case_sensitive: bool,
    extensions: Vec<String>,
    max_depth: Option<usize>,
    follow_links: bool,
    limit: Option<usize>,
}

impl DirectorySearch {
    /// Create a new search rooted at `root`
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            query: None,
            mode: MatchMode::Keyword,
            case_sensitive: true,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            max_depth: None,
            follow_links: false,
            limit: None,
        }
    }

    /// Match lines containing `keyword`
    pub fn keyword(self, keyword: &str) -> Self {
        self.query(keyword, MatchMode::Keyword)
    }

    /// Match lines where every token of `tokens` appears inside some word
    pub fn approximate(self, tokens: &str) -> Self {
        self.query(tokens, MatchMode::Approximate)
    }

    /// Match lines against a regular expression
    pub fn regex(self, pattern: &str) -> Self {
        self.query(pattern, MatchMode::Regex)
    }

    /// Set the query and how it is interpreted
    pub fn query(mut self, query: &str, mode: MatchMode) -> Self {
        self.query = Some(query.to_string());
        self.mode = mode;
        self
    }

    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    /// File extensions to search (default: `txt`)
    pub fn extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.extensions = extensions.iter().map(|e| e.as_ref().to_string()).collect();
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Stop after `limit` matching lines
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Execute the search
    pub async fn search(self) -> Result<SearchResult> {
        // 1. Compile the query
        let query = self.query.as_deref().ok_or(LogFindError::EmptyQuery)?;
        let matcher = Matcher::new(query, self.mode, self.case_sensitive)?;

        // 2. Walk and scan on the blocking pool
        tokio::task::spawn_blocking(move || self.run(&matcher)).await?
    }

    fn run(self, matcher: &Matcher) -> Result<SearchResult> {
        let files = FileWalker::new(&self.root)
            .extensions(&self.extensions)
            .follow_links(self.follow_links)
            .max_depth(self.max_depth)
            .collect()?;

        let scanner = FileScanner::new(matcher);
        let mut matches: Vec<LineMatch> = Vec::new();
        let mut files_scanned = 0;
        let mut skipped_files = 0;
        let mut truncated = false;

        for (index, path) in files.iter().enumerate() {
            let found = match scanner.scan_file(path) {
                Ok(found) => found,
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                    skipped_files += 1;
                    continue;
                }
            };
            files_scanned += 1;
            matches.extend(found);

            if let Some(limit) = self.limit {
                if matches.len() >= limit {
                    truncated = matches.len() > limit || index + 1 < files.len();
                    matches.truncate(limit);
                    break;
                }
            }
        }

        tracing::info!(
            "searched {} files under {}: {} matching lines",
            files_scanned,
            self.root.display(),
            matches.len()
        );

        Ok(SearchResult {
            root: self.root,
            mode: matcher.mode(),
            files_scanned,
            skipped_files,
            truncated,
            matches,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn search_without_query_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = tokio_test::block_on(DirectorySearch::new(dir.path()).search());
        assert!(matches!(result, Err(LogFindError::EmptyQuery)));
    }

    #[test]
    fn limit_truncates() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "hit 1\nhit 2\nhit 3\n").unwrap();
        fs::write(dir.path().join("b.txt"), "hit 4\n").unwrap();

        let result = tokio_test::block_on(
            DirectorySearch::new(dir.path()).keyword("hit").limit(2).search(),
        )
        .unwrap();

        assert_eq!(result.matches.len(), 2);
        assert!(result.truncated);
        assert_eq!(result.files_scanned, 1);
    }

    #[test]
    fn limit_not_reached() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "hit 1\nmiss\n").unwrap();

        let result = tokio_test::block_on(
            DirectorySearch::new(dir.path()).keyword("hit").limit(5).search(),
        )
        .unwrap();

        assert_eq!(result.matches.len(), 1);
        assert!(!result.truncated);
    }
}
