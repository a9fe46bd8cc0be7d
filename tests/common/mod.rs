//! Shared test fixtures and utilities for integration tests.
//!
//! Every test writes its own example corpus into a fresh temporary directory,
//! so source reads, index builds and index caches never leak between tests.
//!
//! # Available Fixtures
//!
//! - `corpus`: an empty [`Corpus`] to add examples to
//! - `for_each_corpus`: two examples exercising the `AForEachUI` /
//!   `AUI_DECLARATIVE_FOR` alias pair

use rstest::fixture;
use std::path::{Path, PathBuf};
use symbol_examples::{Example, ExampleCatalog, SourceReader};
use tempfile::TempDir;

/// A temporary workspace directory for test isolation.
///
/// Provides basic filesystem operations within a temp directory that is
/// automatically cleaned up when dropped.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    /// Creates a new empty temporary workspace.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    /// Returns the root path of this workspace.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates a file with the given content within this workspace.
    ///
    /// Parent directories are created automatically if they don't exist.
    ///
    /// # Panics
    /// Panics if file creation fails.
    pub fn create_file(&self, path: &str, content: &str) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// An example corpus on disk: source files plus the records describing them.
///
/// Sources live under `<id>/` inside the workspace and are recorded with
/// workspace-relative paths.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct Corpus {
    pub workspace: TempWorkspace,
    examples: Vec<Example>,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl Corpus {
    pub fn new() -> Self {
        Self {
            workspace: TempWorkspace::new(),
            examples: Vec::new(),
        }
    }

    /// Adds an example titled after its id with one `main.cpp` source.
    pub fn with_source(self, id: &str, body: &str) -> Self {
        self.with_example(id, id, &[("main.cpp", body)])
    }

    /// Adds an example with the given source files, named relative to `<id>/`.
    pub fn with_example(mut self, id: &str, title: &str, files: &[(&str, &str)]) -> Self {
        let srcs = files
            .iter()
            .map(|(name, body)| {
                let relative = format!("{id}/{name}");
                self.workspace.create_file(&relative, body);
                PathBuf::from(relative)
            })
            .collect();
        self.examples.push(Example {
            id: id.to_string(),
            title: title.to_string(),
            description: format!("{title} example"),
            category: "ui".to_string(),
            srcs,
        });
        self
    }

    pub fn catalog(&self) -> ExampleCatalog {
        ExampleCatalog::from_examples(self.examples.iter().cloned())
    }

    /// A reader rooted at the workspace, so recorded paths resolve.
    pub fn sources(&self) -> SourceReader {
        SourceReader::new(Some(self.workspace.path().to_path_buf()))
    }

    /// Writes `examples.toml` describing the corpus, followed by `extra` TOML.
    pub fn write_manifest(&self, extra: &str) -> PathBuf {
        let mut manifest = String::new();
        for example in &self.examples {
            let srcs: Vec<String> = example
                .srcs
                .iter()
                .map(|src| format!("{:?}", src.to_string_lossy()))
                .collect();
            manifest.push_str(&format!(
                "[[examples]]\nid = {:?}\ntitle = {:?}\ndescription = {:?}\ncategory = {:?}\nsrcs = [{}]\n\n",
                example.id,
                example.title,
                example.description,
                example.category,
                srcs.join(", ")
            ));
        }
        manifest.push_str(extra);
        self.workspace.create_file("examples.toml", &manifest);
        self.workspace.path().join("examples.toml")
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Self::new()
    }
}

#[fixture]
pub fn corpus() -> Corpus {
    Corpus::new()
}

#[fixture]
pub fn for_each_corpus() -> Corpus {
    Corpus::new()
        .with_example(
            "for_each",
            "For Each",
            &[(
                "main.cpp",
                "#include <AUI/View/AForEachUI.h>\n\nint main() {\n    auto list = _new<AForEachUI<AString>>(items);\n    return 0;\n}\n",
            )],
        )
        .with_example(
            "declarative",
            "Declarative Lists",
            &[(
                "main.cpp",
                "using namespace declarative;\n\nauto view() {\n    return AUI_DECLARATIVE_FOR(i, items, AVerticalLayout) {\n        return Label { i };\n    };\n}\n",
            )],
        )
}
