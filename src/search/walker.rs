//! Directory traversal

use crate::{LogFindError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Default extensions searched when none are configured
pub const DEFAULT_EXTENSIONS: &[&str] = &["txt"];

/// Collects the files beneath a folder that should be searched
pub struct FileWalker {
    root: PathBuf,
    extensions: Vec<String>,
    follow_links: bool,
    max_depth: Option<usize>,
}

impl FileWalker {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            follow_links: false,
            max_depth: None,
        }
    }

    /// Replace the extension filter. A leading dot is ignored.
    pub fn extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.extensions = extensions
            .iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect();
        self
    }

    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Walk the folder and return matching files in file-name order
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        if !self.root.exists() {
            return Err(LogFindError::FolderNotFound(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(LogFindError::NotADirectory(self.root.clone()));
        }

        let mut walker = WalkDir::new(&self.root)
            .follow_links(self.follow_links)
            .sort_by_file_name();
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    tracing::warn!("skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if is_file_like(&entry) && self.has_wanted_extension(entry.path()) {
                files.push(entry.into_path());
            }
        }

        tracing::debug!("found {} candidate files under {}", files.len(), self.root.display());
        Ok(files)
    }

    /// Suffix match on the file name, so a file called `.txt` counts too
    fn has_wanted_extension(&self, path: &Path) -> bool {
        path.file_name().is_some_and(|name| {
            let name = name.to_string_lossy();
            self.extensions
                .iter()
                .any(|wanted| name.ends_with(&format!(".{}", wanted)))
        })
    }
}

/// Regular files, plus symlinks that do not point at a directory.
///
/// Unfollowed symlinks are still opened when scanning. A dangling link is
/// kept so the scan reports it as unreadable.
fn is_file_like(entry: &walkdir::DirEntry) -> bool {
    if entry.file_type().is_file() {
        return true;
    }
    if !entry.path_is_symlink() {
        return false;
    }
    match std::fs::metadata(entry.path()) {
        Ok(meta) => meta.is_file(),
        Err(_) => true,
    }
}
