//! Heuristic author-line parsing.
//!
//! An author line in an article preamble usually looks like
//! `Name - email - id - Institution`, in any order and with any of the
//! parts missing. The parser works on one line at a time:
//!
//! 1. take the first email-shaped token
//! 2. take the first standalone digit run that satisfies the [`IdPolicy`]
//! 3. drop labels (`Email:`, `E-mail`, `ID`) and leading numbering/bullets
//! 4. split the rest on `-`, `–` and `,`: the first segment is the name,
//!    the remaining segments form the institution

use lazy_static::lazy_static;
use regex::Regex;

use crate::model::Author;

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"\b[\w.\-]+@[\w.\-]+\.\w+\b").unwrap();
    static ref DIGIT_RUN: Regex = Regex::new(r"\b\d+\b").unwrap();
    static ref LABELS: Regex = Regex::new(r"(?i)\b(?:e-mail|email|id)\b\s*:?").unwrap();
    static ref LEADING_ARTIFACTS: Regex =
        Regex::new(r"^(?:[\s\-–—•*·.)]|\d{1,3}[.)])+").unwrap();
    static ref DEFAULT_PARSER: AuthorParser = AuthorParser::default();
}

/// Headings that close the author zone. A line starting with one of these
/// is never an author.
const ABSTRACT_MARKERS: &[&str] = &["resumo", "abstract"];

/// Which digit runs count as an author identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPolicy {
    /// Any standalone digit run.
    AnyDigits,
    /// Standalone digit runs of at least this many digits. Shorter runs
    /// (page numbers, footnote markers, "Escola 3") stay in the text.
    MinDigits(usize),
}

impl Default for IdPolicy {
    fn default() -> Self {
        IdPolicy::MinDigits(5)
    }
}

impl IdPolicy {
    /// Map a CLI-style digit count: 0 means any digits.
    pub fn from_min_digits(n: usize) -> Self {
        if n == 0 {
            IdPolicy::AnyDigits
        } else {
            IdPolicy::MinDigits(n)
        }
    }

    fn accepts(self, digits: &str) -> bool {
        match self {
            IdPolicy::AnyDigits => true,
            IdPolicy::MinDigits(n) => digits.chars().count() >= n,
        }
    }
}

/// Configuration for author parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserConfig {
    pub id_policy: IdPolicy,
}

/// Single-line author parser.
#[derive(Debug, Clone, Default)]
pub struct AuthorParser {
    config: ParserConfig,
}

impl AuthorParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse one line. Returns `None` when neither a name nor an email
    /// can be recovered, which is the expected result for non-author lines.
    pub fn parse(&self, line: &str) -> Option<Author> {
        let line = line.trim();
        if line.is_empty() || is_abstract_heading(line) {
            return None;
        }

        let mut rest = line.to_string();

        let email_match = EMAIL
            .find(&rest)
            .map(|m| (m.range(), m.as_str().to_string()));
        let email = email_match.map(|(range, email)| {
            rest.replace_range(range, " ");
            email
        });

        let id_match = DIGIT_RUN
            .find_iter(&rest)
            .find(|m| self.config.id_policy.accepts(m.as_str()))
            .map(|m| (m.range(), m.as_str().to_string()));
        let id = id_match.map(|(range, id)| {
            rest.replace_range(range, " ");
            id
        });

        let rest = LABELS.replace_all(&rest, " ");
        let rest = LEADING_ARTIFACTS.replace(rest.trim_start(), "");

        let mut segments = rest
            .split(['-', '–', ','])
            .map(clean_segment)
            .filter(|s| !s.is_empty());

        let name = segments.next().unwrap_or_default();
        let institution: Vec<String> = segments.collect();

        if name.is_empty() && email.is_none() {
            return None;
        }

        let author = Author {
            name,
            email,
            institution: (!institution.is_empty()).then(|| institution.join(" - ")),
            id,
        };
        log::trace!("author line {line:?} -> {author:?}");
        Some(author)
    }
}

/// Parse one line with the default configuration (identifiers need 5+ digits).
pub fn parse_author(line: &str) -> Option<Author> {
    DEFAULT_PARSER.parse(line)
}

/// Whether a block's text opens the abstract (`Resumo` / `Abstract`, any case).
pub fn is_abstract_heading(text: &str) -> bool {
    let text = text.trim_start();
    ABSTRACT_MARKERS.iter().any(|marker| {
        text.get(..marker.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(marker))
    })
}

fn clean_segment(segment: &str) -> String {
    let trimmed = segment.trim_matches(|c: char| {
        c.is_whitespace() || matches!(c, '(' | ')' | '[' | ']' | ':' | ';' | '|' | '.' | '/')
    });
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}
