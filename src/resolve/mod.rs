//! Symbol → example resolution.
//!
//! A [`Resolver`] borrows everything it needs explicitly: the example catalog,
//! a source reader, and optionally the token index and the documentation page
//! index. Callers build those once per corpus load and share them across
//! queries.

mod aliases;
mod highlight;
mod macros;
mod relevance;
mod scoring;
mod snippets;

pub use aliases::{expand_aliases, merge_alias_pairs};
pub use highlight::compute_highlight_lines;
pub use macros::collect_macro_usage_blocks;
pub use relevance::filter_by_relevance;
pub use scoring::{SnippetScore, StrongPatterns, snippet_matches_anchors};

use crate::catalog::ExampleCatalog;
use crate::collab::PageIndex;
use crate::config::Heuristics;
use crate::error::Resolved;
use crate::index::TokenIndex;
use crate::source::SourceReader;

/// Lines of context kept on each side of a match when checking scope and anchors.
pub(crate) const LOCAL_BEFORE: usize = 10;
pub(crate) const LOCAL_AFTER: usize = 11;

/// Lines shown before the matched line, and the matched line plus those after it.
pub(crate) const DISPLAY_BEFORE: usize = 4;
pub(crate) const DISPLAY_AFTER: usize = 6;

/// Resolves symbol names to examples and snippets.
pub struct Resolver<'a> {
    catalog: &'a ExampleCatalog,
    sources: &'a SourceReader,
    index: Option<&'a TokenIndex>,
    pages: Option<&'a dyn PageIndex>,
    heuristics: Heuristics,
}

impl std::fmt::Debug for Resolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("examples", &self.catalog.len())
            .field("has_index", &self.index.is_some())
            .field("has_pages", &self.pages.is_some())
            .field("heuristics", &self.heuristics)
            .finish()
    }
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a ExampleCatalog, sources: &'a SourceReader) -> Self {
        Self {
            catalog,
            sources,
            index: None,
            pages: None,
            heuristics: Heuristics::default(),
        }
    }

    /// Look candidates up in `index` instead of scanning the whole catalog.
    pub fn with_index(mut self, index: &'a TokenIndex) -> Self {
        self.index = Some(index);
        self
    }

    /// Expand requested names with the aliases known to `pages`.
    pub fn with_pages(mut self, pages: &'a dyn PageIndex) -> Self {
        self.pages = Some(pages);
        self
    }

    pub fn with_heuristics(mut self, heuristics: Heuristics) -> Self {
        self.heuristics = heuristics;
        self
    }

    pub fn catalog(&self) -> &'a ExampleCatalog {
        self.catalog
    }

    pub fn sources(&self) -> &'a SourceReader {
        self.sources
    }

    /// The names actually searched for: page-index aliases plus the fixed alias pairs.
    pub fn search_names<S: AsRef<str>>(&self, names: &[S]) -> Resolved<Vec<String>> {
        let mut expanded = expand_aliases(names, self.pages);
        merge_alias_pairs(&mut expanded.value, &self.heuristics.alias_pairs);
        expanded
    }
}
