//! Tunable resolution heuristics.

use serde::{Deserialize, Serialize};

/// Heuristics that steer snippet selection.
///
/// Loaded from the `[heuristics]` table of a catalog manifest; every field
/// falls back to the built-in defaults when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heuristics {
    /// Regular expressions that mark canonical usage. A snippet centered on one
    /// of these beats a snippet centered on a plain mention. Sources that fail
    /// to compile are matched literally.
    pub strong_patterns: Vec<String>,

    /// Names that are always searched together: requesting either side of a
    /// pair also searches the other.
    pub alias_pairs: Vec<(String, String)>,

    /// Generic self-reference alias (`me::member`) resolved by a dedicated
    /// corpus scan rather than by identifier lookup.
    pub self_alias: String,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            strong_patterns: vec![
                r"\bAUI_DECLARATIVE_FOR\s*\(".to_string(),
                r"_new<\s*AForEachUI\b".to_string(),
                r"\bAForEachUI\b".to_string(),
                r"AForEachUI::".to_string(),
            ],
            alias_pairs: vec![("AForEachUI".to_string(), "AUI_DECLARATIVE_FOR".to_string())],
            self_alias: "me".to_string(),
        }
    }
}
