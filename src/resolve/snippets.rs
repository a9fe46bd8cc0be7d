//! Example lookup and snippet extraction.

use super::scoring::{self, StrongPatterns};
use super::{DISPLAY_AFTER, DISPLAY_BEFORE, LOCAL_AFTER, LOCAL_BEFORE, Resolver};
use crate::catalog::{Example, SnippetResult, dedupe};
use crate::error::Resolved;
use crate::text::{Hit, Lines, Pattern, Quotes, window};
use crate::usage::{UsageKind, UsageMatcher, bound_variables, member_reached_through, split_scope};
use ahash::AHashSet;
use std::path::Path;

/// Names compiled once per query.
struct Query {
    names: Vec<String>,
    patterns: Vec<Pattern>,
    anchors: Vec<String>,
    strong: StrongPatterns,
}

impl Query {
    /// Where the best occurrence of the query sits in `text`.
    ///
    /// Prefers a strong pattern, then a name on a non-trivial line, then any
    /// unquoted name, then any occurrence at all.
    fn locate(&self, text: &str) -> Option<Hit> {
        self.strong
            .locate(text)
            .or_else(|| self.first(text, Quotes::Exclude, Lines::NonTrivial))
            .or_else(|| self.first(text, Quotes::Exclude, Lines::Any))
            .or_else(|| self.first(text, Quotes::Include, Lines::Any))
    }

    fn first(&self, text: &str, quotes: Quotes, lines: Lines) -> Option<Hit> {
        self.patterns
            .iter()
            .find_map(|pattern| pattern.first(text, quotes, lines))
    }

    fn used_in(&self, text: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_used_in(text))
    }
}

/// `names` followed by the member part of every qualified name.
///
/// Qualified names rarely appear verbatim at call sites (`obj.bar()` for
/// `Foo::bar`), so the member is searched as well.
fn with_members(mut names: Vec<String>) -> Vec<String> {
    let members: Vec<String> = names
        .iter()
        .filter_map(|name| split_scope(name).map(|(_, member)| member.to_string()))
        .collect();
    for member in members {
        if !names.contains(&member) {
            names.push(member);
        }
    }
    names
}

impl<'a> Resolver<'a> {
    /// Examples demonstrating any of `names` or their aliases.
    ///
    /// Names are matched as given: `Foo::bar` needs the qualified spelling.
    /// Uses the token index when one is attached and it knows a name; otherwise
    /// scans every source for an unquoted whole-word occurrence. Each example
    /// appears once, in first-found order.
    pub fn resolve_symbol<S: AsRef<str>>(&self, names: &[S]) -> Resolved<Vec<&'a Example>> {
        let searched = self.search_names(names);
        let names = &searched.value;
        let mut found = self.indexed_examples(names);

        if found.is_empty() {
            let patterns: Vec<Pattern> = names.iter().map(|name| Pattern::word(name)).collect();
            found = self
                .catalog
                .examples()
                .filter(|example| {
                    example.srcs.iter().any(|src| {
                        self.sources
                            .read(src)
                            .is_some_and(|text| patterns.iter().any(|p| p.is_unquoted_in(&text)))
                    })
                })
                .collect();
        }

        tracing::debug!("Resolved {:?} to {} examples", names, found.len());
        searched.map(|_| found)
    }

    /// Ranked snippets showing any of `names`, optionally narrowed by `anchors`.
    ///
    /// One snippet is cut per `(example, source)` pair: a few lines around the
    /// best occurrence. Anchors (for instance a receiver variable or a
    /// `Type::member`) must be exercised near the occurrence. The configured
    /// self alias (`me`) additionally pulls in every source using `me::`.
    /// Sources where a name only shows up inside string literals or trivial
    /// lines are dropped whenever a stronger source exists.
    pub fn resolve_symbol_with_snippets<S: AsRef<str>, A: AsRef<str>>(
        &self,
        names: &[S],
        anchors: &[A],
    ) -> Resolved<Vec<SnippetResult>> {
        let searched = self.search_names(names);
        let names = with_members(searched.value.clone());
        let anchors: Vec<String> = anchors
            .iter()
            .map(|anchor| anchor.as_ref().trim().to_string())
            .filter(|anchor| !anchor.is_empty())
            .collect();

        let query = Query {
            patterns: names.iter().map(|name| Pattern::word(name)).collect(),
            strong: StrongPatterns::relevant(&self.heuristics.strong_patterns, &names),
            names,
            anchors,
        };

        let self_alias = self.heuristics.self_alias.as_str();
        let mut results = Vec::new();
        if !self_alias.is_empty()
            && query.names.iter().chain(&query.anchors).any(|name| name == self_alias)
        {
            results.extend(self.self_alias_snippets());
        }

        for (example, src) in self.candidates(&query.names) {
            if let Some(result) = self.extract(example, src, &query) {
                results.push(result);
            }
        }

        let results = dedupe(results);
        let results = scoring::rank(results, &query.strong, &query.anchors, &query.names);
        let results = self.prefer_used(results, &query);

        tracing::debug!(
            "Resolved {:?} (anchors {:?}) to {} snippets",
            query.names,
            query.anchors,
            results.len()
        );
        searched.map(|_| results)
    }

    /// Examples the attached index lists for any of `names`, each once.
    fn indexed_examples(&self, names: &[String]) -> Vec<&'a Example> {
        let Some(index) = self.index else {
            return Vec::new();
        };
        let mut seen = AHashSet::new();
        let mut examples = Vec::new();
        for name in names {
            for example in index.examples(name, self.catalog) {
                if seen.insert(example.id.as_str()) {
                    examples.push(example);
                }
            }
        }
        examples
    }

    /// `(example, source)` pairs worth cutting a snippet from.
    fn candidates(&self, names: &[String]) -> Vec<(&'a Example, &'a Path)> {
        let mut examples = self.indexed_examples(names);
        if examples.is_empty() {
            examples = self.catalog.examples().collect();
        }

        examples
            .into_iter()
            .flat_map(|example| example.srcs.iter().map(move |src| (example, src.as_path())))
            .collect()
    }

    fn extract(&self, example: &Example, src: &Path, query: &Query) -> Option<SnippetResult> {
        let text = self.sources.read(src)?;
        let hit = query.locate(&text)?;
        let lines: Vec<&str> = text.lines().collect();
        let snippet = window(&lines, hit.line, DISPLAY_BEFORE, DISPLAY_AFTER);

        if !query.anchors.is_empty() {
            let local = window(&lines, hit.line, LOCAL_BEFORE, LOCAL_AFTER);
            if !self.anchors_accept(&snippet, &local, &query.anchors) {
                tracing::trace!("{} ({}): anchors not exercised", example.id, src.display());
                return None;
            }
        }

        Some(SnippetResult::new(example, src, snippet))
    }

    /// True if the occurrence is tied to at least one anchor.
    fn anchors_accept(&self, snippet: &str, local: &str, anchors: &[String]) -> bool {
        let self_alias = self.heuristics.self_alias.as_str();
        let is_self = |anchor: &String| !self_alias.is_empty() && anchor == self_alias;

        if anchors.iter().any(is_self) {
            let scoped = format!("{self_alias}::");
            if !snippet.contains(&scoped) && !local.contains(&scoped) {
                return false;
            }
        }
        let mut others = anchors.iter().filter(|anchor| !is_self(anchor)).peekable();
        if others.peek().is_none() {
            return true;
        }

        others.any(|anchor| match split_scope(anchor) {
            Some((owner, member)) => {
                snippet.contains(anchor.as_str()) || member_reached_through(snippet, local, owner, member)
            }
            None => {
                let matcher = UsageMatcher::new(anchor);
                matcher.mentioned_in(snippet)
                    || matcher.has(local, UsageKind::Construct)
                    || bound_variables(local, anchor)
                        .iter()
                        .any(|var| UsageMatcher::new(var).has_any(local, UsageKind::ACCESS))
            }
        })
    }

    /// One snippet per source that reaches members through the self alias.
    fn self_alias_snippets(&self) -> Vec<SnippetResult> {
        let pattern = Pattern::new(&format!(r"\b{}::", regex::escape(&self.heuristics.self_alias)));
        let mut results = Vec::new();
        for example in self.catalog.examples() {
            for src in &example.srcs {
                let Some(text) = self.sources.read(src) else {
                    continue;
                };
                let Some(hit) = pattern.first(&text, Quotes::Include, Lines::Any) else {
                    continue;
                };
                let lines: Vec<&str> = text.lines().collect();
                let snippet = window(&lines, hit.line, DISPLAY_BEFORE, DISPLAY_AFTER);
                results.push(SnippetResult::new(example, src, snippet));
            }
        }
        tracing::trace!("Self alias matched {} sources", results.len());
        results
    }

    /// Drops results whose source never uses a name outside quotes on a
    /// non-trivial line, unless that would drop everything.
    fn prefer_used(&self, results: Vec<SnippetResult>, query: &Query) -> Vec<SnippetResult> {
        let used: Vec<bool> = results
            .iter()
            .map(|result| query.used_in(&self.sources.read_or_empty(&result.src)))
            .collect();
        if !used.contains(&true) {
            return results;
        }
        results
            .into_iter()
            .zip(used)
            .filter_map(|(result, used)| used.then_some(result))
            .collect()
    }
}
