//! Seams to the external collaborators: the documentation page index and the
//! macro catalog.
//!
//! The resolver only reads through these traits. [`StaticPageIndex`] and
//! `Vec<MacroDecl>` are in-memory implementations backed by a manifest.

use crate::error::LookupError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A documentation page a symbol name resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEntry {
    pub url: String,
    pub title: String,
}

impl PageEntry {
    /// Two entries describe the same page when their URLs match or their
    /// titles match case-insensitively. Empty fields never match.
    pub fn same_page(&self, other: &Self) -> bool {
        (!self.url.is_empty() && self.url == other.url)
            || (!self.title.is_empty()
                && !other.title.is_empty()
                && self.title.to_lowercase() == other.title.to_lowercase())
    }
}

/// Read access to the documentation index.
pub trait PageIndex {
    /// The page `name` resolves to, if any.
    fn find_page(&self, name: &str) -> Result<Option<PageEntry>, LookupError>;

    /// Every name → page mapping known to the index.
    fn entries(&self) -> Result<Vec<(String, PageEntry)>, LookupError>;
}

/// A page index held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticPageIndex {
    pages: BTreeMap<String, PageEntry>,
}

impl StaticPageIndex {
    pub fn new(pages: BTreeMap<String, PageEntry>) -> Self {
        Self { pages }
    }

    pub fn insert(&mut self, name: impl Into<String>, entry: PageEntry) {
        self.pages.insert(name.into(), entry);
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl PageIndex for StaticPageIndex {
    fn find_page(&self, name: &str) -> Result<Option<PageEntry>, LookupError> {
        Ok(self.pages.get(name).cloned())
    }

    fn entries(&self) -> Result<Vec<(String, PageEntry)>, LookupError> {
        Ok(self
            .pages
            .iter()
            .map(|(name, entry)| (name.clone(), entry.clone()))
            .collect())
    }
}

/// A macro known to the declaration index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroDecl {
    pub name: String,
}

/// Read access to the macro declaration index.
pub trait MacroCatalog {
    fn macros(&self) -> Result<Vec<MacroDecl>, LookupError>;
}

impl MacroCatalog for Vec<MacroDecl> {
    fn macros(&self) -> Result<Vec<MacroDecl>, LookupError> {
        Ok(self.clone())
    }
}

impl MacroCatalog for [MacroDecl] {
    fn macros(&self) -> Result<Vec<MacroDecl>, LookupError> {
        Ok(self.to_vec())
    }
}
