//! Scheme grammar and line validation.
//!
//! A scheme line is a chain of tokens separated by `->`. Validation collects
//! every finding on a line instead of stopping at the first one.

use std::collections::BTreeSet;
use std::fmt;

/// Token separator within a scheme line.
pub const DELIMITER: &str = "->";

/// Sentinel line that terminates interactive scheme input.
pub const END_MARKER: &str = "end";

/// A problem found on one scheme line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SchemeFinding {
    /// The line is empty or whitespace only.
    Empty,
    /// A delimiter at the start or end of the line, or two delimiters with
    /// no token between them.
    UnexpectedDelimiter,
    /// A character outside the accepted token alphabet.
    UnexpectedSymbols,
    /// An index outside `[1, N]` for `N` known operations.
    IndexOutOfRange,
}

impl SchemeFinding {
    /// Returns a short human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Empty => "empty line",
            Self::UnexpectedDelimiter => "unexpected delimiter",
            Self::UnexpectedSymbols => "unexpected symbols",
            Self::IndexOutOfRange => "index out of range",
        }
    }
}

impl fmt::Display for SchemeFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// How scheme tokens name operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemeGrammar {
    /// Tokens are 1-based indices into a list of known operation ids.
    Indexed {
        /// Known operation ids, in the order they are numbered.
        ids: Vec<String>,
    },
    /// Tokens are operation ids written out (`[A-Za-z0-9_.]+`).
    Literal,
}

impl SchemeGrammar {
    /// Builds an indexed grammar over the given operation ids.
    pub fn indexed<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Indexed {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Validates one line, returning every finding on it.
    #[must_use]
    pub fn check_line(&self, line: &str) -> BTreeSet<SchemeFinding> {
        let mut findings = BTreeSet::new();
        let line = line.trim();
        if line.is_empty() {
            findings.insert(SchemeFinding::Empty);
            return findings;
        }

        let tokens: Vec<&str> = split_tokens(line).collect();
        if tokens.iter().any(|token| token.is_empty()) {
            findings.insert(SchemeFinding::UnexpectedDelimiter);
        }

        for token in tokens.into_iter().filter(|token| !token.is_empty()) {
            if let Some(finding) = self.check_token(token) {
                findings.insert(finding);
            }
        }
        findings
    }

    fn check_token(&self, token: &str) -> Option<SchemeFinding> {
        match self {
            Self::Indexed { ids } => {
                if !token.chars().all(|c| c.is_ascii_digit()) {
                    return Some(SchemeFinding::UnexpectedSymbols);
                }
                // digits only, so a parse failure is an overflow
                match token.parse::<usize>() {
                    Ok(index) if (1..=ids.len()).contains(&index) => None,
                    _ => Some(SchemeFinding::IndexOutOfRange),
                }
            }
            Self::Literal => {
                if token.chars().all(is_identifier_char) {
                    None
                } else {
                    Some(SchemeFinding::UnexpectedSymbols)
                }
            }
        }
    }

    /// Resolves a validated token to the operation id it names.
    #[must_use]
    pub fn resolve<'a>(&'a self, token: &'a str) -> Option<&'a str> {
        match self {
            Self::Indexed { ids } => token
                .parse::<usize>()
                .ok()
                .and_then(|index| index.checked_sub(1))
                .and_then(|index| ids.get(index))
                .map(String::as_str),
            Self::Literal => Some(token).filter(|t| !t.is_empty()),
        }
    }
}

/// Splits a line on the delimiter, trimming whitespace around each token.
pub fn split_tokens(line: &str) -> impl Iterator<Item = &str> {
    line.trim().split(DELIMITER).map(str::trim)
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// Findings for one rejected line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFindings {
    /// 1-based line number within the scheme.
    pub line: usize,
    /// Line text as entered.
    pub text: String,
    /// Every finding on the line.
    pub findings: BTreeSet<SchemeFinding>,
}

impl fmt::Display for LineFindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let findings: Vec<&str> = self.findings.iter().map(SchemeFinding::description).collect();
        write!(f, "line {} \"{}\": {}", self.line, self.text, findings.join(", "))
    }
}

/// Result of validating a whole scheme.
///
/// A scheme is accepted only when no line has a finding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemeReport {
    total_lines: usize,
    rejected: Vec<LineFindings>,
}

impl SchemeReport {
    pub(crate) fn new(total_lines: usize, rejected: Vec<LineFindings>) -> Self {
        Self {
            total_lines,
            rejected,
        }
    }

    /// Returns true if no line has a finding.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Returns the number of lines checked.
    #[must_use]
    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Returns the lines that have findings, in scheme order.
    #[must_use]
    pub fn rejected_lines(&self) -> &[LineFindings] {
        &self.rejected
    }

    /// Returns the findings for a 1-based line number (empty when clean).
    #[must_use]
    pub fn findings_for(&self, line: usize) -> BTreeSet<SchemeFinding> {
        self.rejected
            .iter()
            .find(|entry| entry.line == line)
            .map(|entry| entry.findings.clone())
            .unwrap_or_default()
    }

    /// Returns true if any line has the given finding.
    #[must_use]
    pub fn contains(&self, finding: SchemeFinding) -> bool {
        self.rejected
            .iter()
            .any(|entry| entry.findings.contains(&finding))
    }
}

impl fmt::Display for SchemeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "{} line(s), no findings", self.total_lines);
        }
        let lines: Vec<String> = self.rejected.iter().map(ToString::to_string).collect();
        f.write_str(&lines.join("; "))
    }
}

impl std::error::Error for SchemeReport {}
