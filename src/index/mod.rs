//! Reverse index from identifier tokens to the examples that mention them.

mod cache;

pub use cache::corpus_fingerprint;

use crate::catalog::{Example, ExampleCatalog};
use crate::source::SourceReader;
use crate::text::is_trivial_file;
use ahash::AHashSet;
use rapidfuzz::distance::jaro_winkler;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Identifier grammar. Identifiers may embed a scope qualifier (`Type::member`).
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z_][A-Za-z0-9_:]*\b").unwrap_or_else(|e| unreachable!("token grammar: {e}"))
});

/// Minimum Jaro-Winkler similarity for a token to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Token → example ids, in the order examples were first seen.
///
/// Every id appears at most once per token, and only examples with at least
/// one non-trivial source file are indexed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenIndex {
    tokens: HashMap<String, Vec<String>>,
}

impl TokenIndex {
    /// Ids of the examples mentioning `token`.
    pub fn lookup(&self, token: &str) -> &[String] {
        self.tokens.get(token).map(Vec::as_slice).unwrap_or_default()
    }

    /// Examples mentioning `token`, resolved against `catalog`.
    pub fn examples<'c>(
        &self,
        token: &str,
        catalog: &'c ExampleCatalog,
    ) -> impl Iterator<Item = &'c Example> {
        self.lookup(token).iter().filter_map(|id| catalog.get(id))
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains_key(token)
    }

    /// Number of distinct tokens.
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Number of distinct examples referenced by any token.
    pub fn example_count(&self) -> usize {
        self.tokens
            .values()
            .flatten()
            .collect::<AHashSet<_>>()
            .len()
    }

    /// Indexed tokens closest to `name`, best first.
    pub fn suggest(&self, name: &str, limit: usize) -> Vec<(String, f64)> {
        let mut scored: Vec<(String, f64)> = self
            .tokens
            .keys()
            .map(|token| {
                let score = jaro_winkler::similarity(name.chars(), token.chars());
                (token.clone(), score)
            })
            .filter(|(token, score)| *score >= SUGGESTION_THRESHOLD && token != name)
            .collect();

        scored.sort_by(|(a_token, a), (b_token, b)| b.total_cmp(a).then_with(|| a_token.cmp(b_token)));
        scored.truncate(limit);
        scored
    }

    fn add(&mut self, token: &str, example_id: &str) {
        let ids = self.tokens.entry(token.to_string()).or_default();
        if !ids.iter().any(|id| id == example_id) {
            ids.push(example_id.to_string());
        }
    }
}

/// Keys a raw token is indexed under: the token itself and, for a
/// scope-qualified token, each of its segments.
fn index_keys(token: &str) -> impl Iterator<Item = &str> {
    let segments = token
        .contains("::")
        .then(|| token.split("::").filter(|segment| !segment.is_empty()))
        .into_iter()
        .flatten();
    std::iter::once(token).chain(segments)
}

/// Builds the token index over every example source in `catalog`.
///
/// Files made only of comments, includes, `using` directives and preprocessor
/// lines are skipped, as are files that cannot be read.
pub fn build_index(catalog: &ExampleCatalog, sources: &SourceReader) -> TokenIndex {
    let start = std::time::Instant::now();
    let mut index = TokenIndex::default();
    let mut skipped = 0usize;

    for example in catalog.examples() {
        let mut seen: AHashSet<String> = AHashSet::new();
        for src in &example.srcs {
            let Some(text) = sources.read(src) else {
                continue;
            };
            if is_trivial_file(&text) {
                tracing::trace!("Skipping trivial source {}", src.display());
                skipped += 1;
                continue;
            }

            for token in TOKEN.find_iter(&text) {
                for key in index_keys(token.as_str()) {
                    if !seen.contains(key) {
                        seen.insert(key.to_string());
                        index.add(key, &example.id);
                    }
                }
            }
        }
    }

    tracing::info!(
        "Built token index: {} tokens over {} examples ({} trivial sources skipped) in {:?}",
        index.token_count(),
        index.example_count(),
        skipped,
        start.elapsed()
    );
    index
}
