pub mod catalog;
pub mod cli;
pub mod collab;
pub mod config;
pub mod error;
pub mod index;
pub mod render;
pub mod resolve;
pub mod source;
pub mod text;
pub mod tracing;
pub mod usage;

pub use catalog::{Example, ExampleCatalog, Manifest, SnippetResult, dedupe};
pub use collab::{MacroCatalog, MacroDecl, PageEntry, PageIndex, StaticPageIndex};
pub use config::Heuristics;
pub use error::{Diagnostic, LookupError, Resolved};
pub use index::{TokenIndex, build_index};
pub use resolve::{
    Resolver, collect_macro_usage_blocks, compute_highlight_lines, expand_aliases,
    filter_by_relevance,
};
pub use source::SourceReader;
pub use text::{find_unquoted, find_unquoted_word, find_unquoted_word_on_nontrivial_line, is_quoted};
