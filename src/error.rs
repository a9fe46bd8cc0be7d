//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for symbol-examples operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when loading a catalog manifest fails.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// Manifest file could not be read.
    #[error("Failed to read manifest at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Manifest file is not valid TOML or does not match the expected shape.
    #[error("Failed to parse manifest at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Error returned by an external collaborator (page index, macro catalog).
#[derive(Debug, Clone, thiserror::Error)]
#[error("{collaborator} unavailable: {message}")]
pub struct LookupError {
    pub collaborator: &'static str,
    pub message: String,
}

impl LookupError {
    pub fn new(collaborator: &'static str, message: impl Into<String>) -> Self {
        Self {
            collaborator,
            message: message.into(),
        }
    }
}

/// A non-fatal problem encountered while enriching a result.
///
/// Enrichment that fails falls back to the unenriched value; the diagnostic
/// records why.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Diagnostic {
    #[error("Alias lookup for '{name}' failed: {source}")]
    AliasLookupFailed {
        name: String,
        #[source]
        source: LookupError,
    },
    #[error("Macro catalog unavailable: {source}")]
    MacroCatalogUnavailable {
        #[source]
        source: LookupError,
    },
}

/// A value together with the diagnostics collected while producing it.
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Resolved<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_diagnostics(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self { value, diagnostics }
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolved<U> {
        Resolved {
            value: f(self.value),
            diagnostics: self.diagnostics,
        }
    }
}
