//! Pattern location with quote and trivial-line exclusion.

use super::lines::{is_trivial_line, line_of_offset};
use super::quote::is_quoted;
use regex::Regex;

/// A search pattern: a compiled regular expression, or a literal substring when
/// the source failed to compile.
#[derive(Debug, Clone)]
pub enum Pattern {
    Regex(Regex),
    Literal(String),
}

/// Whether matches inside double-quoted strings are considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quotes {
    Exclude,
    Include,
}

/// Whether matches on trivial lines are considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lines {
    NonTrivial,
    Any,
}

/// A located match: byte offset of its start and zero-based line index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub offset: usize,
    pub line: usize,
}

impl Pattern {
    /// Compile `source` as a regular expression, falling back to a literal search.
    pub fn new(source: &str) -> Self {
        match Regex::new(source) {
            Ok(regex) => Self::Regex(regex),
            Err(e) => {
                tracing::debug!("Pattern {:?} is not a valid regex ({}), using literal search", source, e);
                Self::Literal(source.to_string())
            }
        }
    }

    /// Whole-identifier match for `word`.
    pub fn word(word: &str) -> Self {
        Self::new(&format!(r"\b{}\b", regex::escape(word)))
    }

    /// The pattern source text.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Regex(regex) => regex.as_str(),
            Self::Literal(literal) => literal,
        }
    }

    /// Start offsets of every match, in order.
    pub fn starts<'t>(&'t self, text: &'t str) -> Box<dyn Iterator<Item = usize> + 't> {
        match self {
            Self::Regex(regex) => Box::new(regex.find_iter(text).map(|m| m.start())),
            Self::Literal(literal) if literal.is_empty() => Box::new(std::iter::empty()),
            Self::Literal(literal) => Box::new(text.match_indices(literal.as_str()).map(|(i, _)| i)),
        }
    }

    /// First match that satisfies the quote and line policies.
    pub fn first(&self, text: &str, quotes: Quotes, lines: Lines) -> Option<Hit> {
        let all_lines: Vec<&str> = match lines {
            Lines::NonTrivial => text.lines().collect(),
            Lines::Any => Vec::new(),
        };

        self.starts(text).find_map(|offset| {
            if quotes == Quotes::Exclude && is_quoted(text, offset) {
                return None;
            }
            let line = line_of_offset(text, offset);
            if lines == Lines::NonTrivial
                && all_lines.get(line).is_none_or(|l| is_trivial_line(l))
            {
                return None;
            }
            Some(Hit { offset, line })
        })
    }

    /// True if any match lies outside double-quoted strings.
    pub fn is_unquoted_in(&self, text: &str) -> bool {
        self.first(text, Quotes::Exclude, Lines::Any).is_some()
    }

    /// True if any match lies outside quotes on a non-trivial line.
    pub fn is_used_in(&self, text: &str) -> bool {
        self.first(text, Quotes::Exclude, Lines::NonTrivial).is_some()
    }
}

/// True if `pattern` matches outside double-quoted strings.
///
/// Patterns that fail to compile are searched for literally.
pub fn find_unquoted(pattern: &str, text: &str) -> bool {
    Pattern::new(pattern).is_unquoted_in(text)
}

/// True if `word` appears as a whole identifier outside double-quoted strings.
pub fn find_unquoted_word(word: &str, text: &str) -> bool {
    Pattern::word(word).is_unquoted_in(text)
}

/// Like [`find_unquoted_word`], but ignores comments, directives, braces and guards.
pub fn find_unquoted_word_on_nontrivial_line(word: &str, text: &str) -> bool {
    Pattern::word(word).is_used_in(text)
}
