//! Snippet ranking.

use crate::catalog::SnippetResult;
use crate::text::{Hit, Lines, Pattern, Quotes};
use crate::usage::{UsageKind, UsageMatcher, split_scope};
use regex::Regex;
use std::sync::LazyLock;

/// An escape sequence, or an identifier, inside a pattern source.
static SOURCE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\.|([A-Za-z_][A-Za-z0-9_]*)").unwrap_or_else(|e| unreachable!("pattern token grammar: {e}"))
});

/// Shapes that count as an anchor being exercised in a snippet.
const ANCHOR_MEMBER_KINDS: &[UsageKind] = &[UsageKind::PointerAccess, UsageKind::MemberAccess, UsageKind::Call];
const ANCHOR_KINDS: &[UsageKind] = &[
    UsageKind::PointerAccess,
    UsageKind::MemberAccess,
    UsageKind::Call,
    UsageKind::SlotMacro,
];

/// Patterns that mark the canonical usage of a symbol.
///
/// A configured pattern only applies to queries naming its subject, the last
/// identifier in its source, so unrelated queries are not pulled towards it.
#[derive(Debug, Clone, Default)]
pub struct StrongPatterns {
    patterns: Vec<Pattern>,
}

impl StrongPatterns {
    /// The configured patterns whose subject is one of `names`.
    pub fn relevant(sources: &[String], names: &[String]) -> Self {
        let patterns = sources
            .iter()
            .filter(|source| subject(source).is_some_and(|subject| names.iter().any(|name| name == subject)))
            .map(|source| Pattern::new(source))
            .collect();
        Self { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// First unquoted match of any pattern on a non-trivial line.
    pub fn locate(&self, text: &str) -> Option<Hit> {
        self.patterns
            .iter()
            .find_map(|pattern| pattern.first(text, Quotes::Exclude, Lines::NonTrivial))
    }

    /// True if any pattern matches outside quotes.
    pub fn matches(&self, snippet: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_unquoted_in(snippet))
    }
}

/// The last identifier in a pattern source, skipping escapes such as `\b`.
///
/// `_new<\s*AForEachUI\b` marks usage of `AForEachUI`, not of `_new`.
fn subject(source: &str) -> Option<&str> {
    SOURCE_TOKEN
        .captures_iter(source)
        .filter_map(|captures| captures.get(1))
        .last()
        .map(|identifier| identifier.as_str())
}

/// Ranking key for a snippet; smaller is better.
///
/// Fields compare in order: strong-pattern presence, anchor match, unquoted
/// name presence, then snippet length in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SnippetScore {
    pub lacks_strong: bool,
    pub misses_anchor: bool,
    pub lacks_name: bool,
    pub length: usize,
}

impl SnippetScore {
    pub fn of(snippet: &str, strong: &StrongPatterns, anchors: &[String], names: &[String]) -> Self {
        let targets = if anchors.is_empty() { names } else { anchors };
        Self {
            lacks_strong: !strong.matches(snippet),
            misses_anchor: !snippet_matches_anchors(snippet, targets),
            lacks_name: !names
                .iter()
                .any(|name| Pattern::word(name).is_unquoted_in(snippet)),
            length: snippet.chars().count(),
        }
    }
}

/// True if any anchor is exercised in `snippet`.
///
/// A qualified anchor matches literally, or through its member being accessed
/// or called. A plain anchor matches when accessed, called or wrapped in the
/// slot macro.
pub fn snippet_matches_anchors(snippet: &str, anchors: &[String]) -> bool {
    anchors.iter().filter(|anchor| !anchor.is_empty()).any(|anchor| {
        match split_scope(anchor) {
            Some((_, member)) => {
                snippet.contains(anchor.as_str())
                    || UsageMatcher::new(member).has_any(snippet, ANCHOR_MEMBER_KINDS)
            }
            None => UsageMatcher::new(anchor).has_any(snippet, ANCHOR_KINDS),
        }
    })
}

/// Orders results best first. Ties keep their incoming order.
pub(crate) fn rank(
    mut results: Vec<SnippetResult>,
    strong: &StrongPatterns,
    anchors: &[String],
    names: &[String],
) -> Vec<SnippetResult> {
    results.sort_by_cached_key(|result| SnippetScore::of(&result.snippet, strong, anchors, names));
    results
}
