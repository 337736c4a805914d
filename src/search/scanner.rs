//! Reading files and collecting matching lines

use super::Matcher;
use crate::{LineMatch, Result};
use std::borrow::Cow;
use std::path::Path;

/// Scans file contents line by line against a matcher
pub struct FileScanner<'a> {
    matcher: &'a Matcher,
}

impl<'a> FileScanner<'a> {
    pub fn new(matcher: &'a Matcher) -> Self {
        Self { matcher }
    }

    /// Read a file and return its matching lines
    pub fn scan_file(&self, path: &Path) -> Result<Vec<LineMatch>> {
        let bytes = std::fs::read(path)?;
        let contents = match String::from_utf8_lossy(&bytes) {
            Cow::Borrowed(text) => Cow::Borrowed(text),
            Cow::Owned(text) => {
                tracing::warn!("{} is not valid UTF-8, decoding lossily", path.display());
                Cow::Owned(text)
            }
        };
        Ok(self.scan_str(path, &contents))
    }

    /// Return the matching lines of already-loaded contents
    pub fn scan_str(&self, path: &Path, contents: &str) -> Vec<LineMatch> {
        let mut matches = Vec::new();

        for (index, line) in split_lines(contents).enumerate() {
            if self.matcher.is_match(line) {
                matches.push(LineMatch {
                    path: path.to_path_buf(),
                    line_number: index + 1,
                    line: line.trim().to_string(),
                });
            }
        }

        matches
    }
}

/// Split on `\r\n`, `\n` or a lone `\r`. A trailing terminator does not
/// start another line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut pos = 0;

    std::iter::from_fn(move || {
        while pos < bytes.len() {
            let end = pos;
            match bytes[pos] {
                b'\n' => pos += 1,
                b'\r' if bytes.get(pos + 1) == Some(&b'\n') => pos += 2,
                b'\r' => pos += 1,
                _ => {
                    pos += 1;
                    continue;
                }
            }
            let line = &text[start..end];
            start = pos;
            return Some(line);
        }
        if start < bytes.len() {
            let line = &text[start..];
            start = bytes.len();
            return Some(line);
        }
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatchMode;

    #[test]
    fn numbers_lines_from_one() {
        let matcher = Matcher::new("needle", MatchMode::Keyword, true).unwrap();
        let scanner = FileScanner::new(&matcher);
        let found = scanner.scan_str(Path::new("log.txt"), "hay\n  needle here  \nhay\r\nneedle\r\n");

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].line_number, 2);
        assert_eq!(found[0].line, "needle here");
        assert_eq!(found[1].line_number, 4);
        assert_eq!(found[1].line, "needle");
        assert_eq!(found[1].path, Path::new("log.txt"));
    }

    #[test]
    fn carriage_return_ends_a_line() {
        let matcher = Matcher::new("John", MatchMode::Keyword, true).unwrap();
        let found = FileScanner::new(&matcher).scan_str(Path::new("old.txt"), "hay\rJohn here\rhay\r");

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line_number, 2);
        assert_eq!(found[0].line, "John here");
    }

    #[test]
    fn split_lines_mixed_endings() {
        let lines: Vec<&str> = split_lines("a\r\nb\rc\nd").collect();
        assert_eq!(lines, vec!["a", "b", "c", "d"]);

        let lines: Vec<&str> = split_lines("a\n\n\r\rb\n").collect();
        assert_eq!(lines, vec!["a", "", "", "", "b"]);

        assert_eq!(split_lines("").count(), 0);
    }

    #[test]
    fn lossy_decode_keeps_valid_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, b"caf\xe9 needle\nneedle two\n").unwrap();

        let matcher = Matcher::new("needle", MatchMode::Keyword, true).unwrap();
        let found = FileScanner::new(&matcher).scan_file(&path).unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].line, "caf\u{fffd} needle");
        assert_eq!(found[1].line_number, 2);
    }

    #[test]
    fn missing_file_is_an_error() {
        let matcher = Matcher::new("x", MatchMode::Keyword, true).unwrap();
        let result = FileScanner::new(&matcher).scan_file(Path::new("/definitely/not/here.txt"));
        assert!(result.is_err());
    }
}
