//! Line matching

use crate::{LogFindError, Result};
use regex::Regex;
use serde::Serialize;

/// How a query is compared against each line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Line contains the whole query as a substring
    #[default]
    Keyword,
    /// Every whitespace-separated token is a substring of some word on the line
    Approximate,
    /// Line matches the query as a regular expression
    Regex,
}

/// A compiled query
#[derive(Debug, Clone)]
pub struct Matcher {
    mode: MatchMode,
    case_sensitive: bool,
    kind: Kind,
}

#[derive(Debug, Clone)]
enum Kind {
    Keyword(String),
    Tokens(Vec<String>),
    Pattern(Regex),
}

impl Matcher {
    pub fn new(query: &str, mode: MatchMode, case_sensitive: bool) -> Result<Self> {
        if query.trim().is_empty() {
            return Err(LogFindError::EmptyQuery);
        }

        let fold = |s: &str| {
            if case_sensitive {
                s.to_string()
            } else {
                s.to_lowercase()
            }
        };

        let kind = match mode {
            MatchMode::Keyword => Kind::Keyword(fold(query)),
            MatchMode::Approximate => {
                Kind::Tokens(query.split_whitespace().map(fold).collect())
            }
            MatchMode::Regex => {
                let pattern = if case_sensitive {
                    Regex::new(query)?
                } else {
                    Regex::new(&format!("(?i){}", query))?
                };
                Kind::Pattern(pattern)
            }
        };

        Ok(Self {
            mode,
            case_sensitive,
            kind,
        })
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Test a single line (without its line terminator)
    pub fn is_match(&self, line: &str) -> bool {
        match &self.kind {
            Kind::Pattern(regex) => regex.is_match(line),
            Kind::Keyword(keyword) if self.case_sensitive => {
                find_lines_with_keyword(line, keyword)
            }
            Kind::Keyword(keyword) => find_lines_with_keyword(&line.to_lowercase(), keyword),
            Kind::Tokens(tokens) if self.case_sensitive => is_approximate_match(line, tokens),
            Kind::Tokens(tokens) => is_approximate_match(&line.to_lowercase(), tokens),
        }
    }
}

/// Whether `line` contains `keyword`
pub fn find_lines_with_keyword(line: &str, keyword: &str) -> bool {
    line.contains(keyword)
}

/// Whether every token is a substring of at least one word in `line`.
///
/// Words are the whitespace-separated pieces of the line, so a token
/// never matches across a space. An empty token list never matches.
pub fn is_approximate_match<S: AsRef<str>>(line: &str, tokens: &[S]) -> bool {
    if tokens.is_empty() {
        return false;
    }
    let words: Vec<&str> = line.split_whitespace().collect();
    tokens
        .iter()
        .all(|token| words.iter().any(|word| word.contains(token.as_ref())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_is_plain_substring() {
        assert!(find_lines_with_keyword("[12:01] John_Doe says: hi", "Doe says"));
        assert!(!find_lines_with_keyword("[12:01] John_Doe says: hi", "doe"));
    }

    #[test]
    fn approximate_needs_every_token() {
        let line = "[12:01] John_Doe paid $500 to Jane_Roe";
        assert!(is_approximate_match(line, &["John", "$5", "Roe"]));
        assert!(!is_approximate_match(line, &["John", "Smith"]));
    }

    #[test]
    fn approximate_tokens_stay_within_words() {
        let line = "John Doe";
        assert!(!is_approximate_match(line, &["n D"]));
        assert!(!is_approximate_match(line, &["JohnDoe"]));
        assert!(is_approximate_match(line, &["ohn", "oe"]));
    }

    #[test]
    fn approximate_empty_tokens_never_match() {
        let tokens: [&str; 0] = [];
        assert!(!is_approximate_match("anything", &tokens));
    }

    #[test]
    fn matcher_rejects_blank_query() {
        assert!(matches!(
            Matcher::new("   ", MatchMode::Keyword, true),
            Err(LogFindError::EmptyQuery)
        ));
    }

    #[test]
    fn matcher_rejects_bad_regex() {
        assert!(matches!(
            Matcher::new("([", MatchMode::Regex, true),
            Err(LogFindError::InvalidPattern(_))
        ));
    }

    #[test]
    fn matcher_case_insensitive() {
        let keyword = Matcher::new("JOHN", MatchMode::Keyword, false).unwrap();
        assert!(keyword.is_match("john doe"));

        let approx = Matcher::new("JOH DO", MatchMode::Approximate, false).unwrap();
        assert!(approx.is_match("John Doe"));

        let regex = Matcher::new(r"^\[\d+:\d+\] JOHN", MatchMode::Regex, false).unwrap();
        assert!(regex.is_match("[12:01] John shouts"));
    }

    #[test]
    fn matcher_keyword_keeps_spaces() {
        let m = Matcher::new("paid $500", MatchMode::Keyword, true).unwrap();
        assert!(m.is_match("John paid $500"));
        assert!(!m.is_match("John paid $50"));
        assert_eq!(m.mode(), MatchMode::Keyword);
    }
}
