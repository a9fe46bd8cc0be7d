//! Example records, the category catalog, and snippet results.

use crate::collab::{MacroDecl, StaticPageIndex};
use crate::config::Heuristics;
use crate::error::ManifestError;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A curated example: metadata plus the source files that demonstrate usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub srcs: Vec<PathBuf>,
}

/// Examples grouped by category, in first-seen order.
///
/// Example ids are unique across the catalog; a later record reusing an id is
/// dropped.
#[derive(Debug, Clone, Default)]
pub struct ExampleCatalog {
    categories: Vec<(String, Vec<Example>)>,
    by_id: AHashMap<String, (usize, usize)>,
}

impl ExampleCatalog {
    pub fn from_examples(examples: impl IntoIterator<Item = Example>) -> Self {
        let mut catalog = Self::default();
        for example in examples {
            catalog.push(example);
        }
        catalog
    }

    /// Build from an explicit category → examples mapping.
    ///
    /// Each example's `category` is set to the category it is listed under.
    pub fn from_categories(categories: impl IntoIterator<Item = (String, Vec<Example>)>) -> Self {
        Self::from_examples(categories.into_iter().flat_map(|(category, examples)| {
            examples.into_iter().map(move |mut example| {
                example.category.clone_from(&category);
                example
            })
        }))
    }

    fn push(&mut self, example: Example) {
        if self.by_id.contains_key(&example.id) {
            tracing::warn!("Duplicate example id '{}', keeping the first record", example.id);
            return;
        }

        let slot = match self.categories.iter().position(|(name, _)| *name == example.category) {
            Some(slot) => slot,
            None => {
                self.categories.push((example.category.clone(), Vec::new()));
                self.categories.len() - 1
            }
        };
        let examples = &mut self.categories[slot].1;
        self.by_id.insert(example.id.clone(), (slot, examples.len()));
        examples.push(example);
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &[Example])> {
        self.categories
            .iter()
            .map(|(name, examples)| (name.as_str(), examples.as_slice()))
    }

    pub fn examples(&self) -> impl Iterator<Item = &Example> {
        self.categories.iter().flat_map(|(_, examples)| examples.iter())
    }

    pub fn get(&self, id: &str) -> Option<&Example> {
        let &(slot, position) = self.by_id.get(id)?;
        self.categories.get(slot)?.1.get(position)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// The best snippet found in one example source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnippetResult {
    pub title: String,
    pub id: String,
    pub description: String,
    pub src: PathBuf,
    pub snippet: String,
    pub category: Option<String>,
}

impl SnippetResult {
    pub fn new(example: &Example, src: &Path, snippet: String) -> Self {
        Self {
            title: example.title.clone(),
            id: example.id.clone(),
            description: example.description.clone(),
            src: src.to_path_buf(),
            snippet,
            category: (!example.category.is_empty()).then(|| example.category.clone()),
        }
    }

    /// Identity of a result: `(example id, source path)`.
    pub fn key(&self) -> (&str, &Path) {
        (&self.id, &self.src)
    }
}

/// Drop results whose `(id, src)` pair was already seen, keeping the first.
pub fn dedupe(results: Vec<SnippetResult>) -> Vec<SnippetResult> {
    let mut seen: AHashSet<(String, PathBuf)> = AHashSet::with_capacity(results.len());
    results
        .into_iter()
        .filter(|result| seen.insert((result.id.clone(), result.src.clone())))
        .collect()
}

/// A catalog manifest: examples plus the in-memory collaborators.
///
/// ```toml
/// [[examples]]
/// id = "hello_world"
/// title = "Hello World"
/// category = "basics"
/// srcs = ["hello_world/src/main.cpp"]
///
/// [pages.AForEachUI]
/// url = "AForEachUI.md"
/// title = "AForEachUI"
///
/// [[macros]]
/// name = "AUI_DECLARATIVE_FOR"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub examples: Vec<Example>,
    pub pages: StaticPageIndex,
    pub macros: Vec<MacroDecl>,
    pub heuristics: Heuristics,
    /// Directory relative sources resolve against (the manifest's directory).
    #[serde(skip)]
    pub root: Option<PathBuf>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut manifest: Self = toml::from_str(&text).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        manifest.root = path.parent().map(Path::to_path_buf);

        tracing::debug!(
            "Loaded manifest {}: {} examples, {} macros",
            path.display(),
            manifest.examples.len(),
            manifest.macros.len()
        );
        Ok(manifest)
    }

    pub fn catalog(&self) -> ExampleCatalog {
        ExampleCatalog::from_examples(self.examples.iter().cloned())
    }
}
