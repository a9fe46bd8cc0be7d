//! Alias expansion through the documentation page index.

use crate::collab::{PageEntry, PageIndex};
use crate::error::{Diagnostic, Resolved};

/// Adds every name that resolves to the same documentation page as a requested name.
///
/// Two names share a page when the page URLs match or the titles match
/// case-insensitively. This recovers macro/class alias pairs without the caller
/// knowing them. Lookup failures leave the names unexpanded and are reported as
/// diagnostics.
pub fn expand_aliases<S: AsRef<str>>(
    names: &[S],
    pages: Option<&dyn PageIndex>,
) -> Resolved<Vec<String>> {
    let mut expanded: Vec<String> = Vec::with_capacity(names.len());
    for name in names.iter().map(AsRef::as_ref).filter(|name| !name.is_empty()) {
        if !expanded.iter().any(|known| known == name) {
            expanded.push(name.to_string());
        }
    }

    let Some(pages) = pages else {
        return Resolved::new(expanded);
    };

    let mut diagnostics = Vec::new();
    let mut mapping: Option<Vec<(String, PageEntry)>> = None;
    let requested = expanded.clone();

    for name in &requested {
        let entry = match pages.find_page(name) {
            Ok(Some(entry)) => entry,
            Ok(None) => continue,
            Err(source) => {
                tracing::warn!("Alias lookup for '{}' failed: {}", name, source);
                diagnostics.push(Diagnostic::AliasLookupFailed {
                    name: name.clone(),
                    source,
                });
                continue;
            }
        };

        if mapping.is_none() {
            match pages.entries() {
                Ok(entries) => mapping = Some(entries),
                Err(source) => {
                    tracing::warn!("Page index mapping unavailable: {}", source);
                    diagnostics.push(Diagnostic::AliasLookupFailed {
                        name: name.clone(),
                        source,
                    });
                    break;
                }
            }
        }
        let Some(entries) = mapping.as_ref() else {
            break;
        };

        for (alias, candidate) in entries {
            if candidate.same_page(&entry) && !expanded.contains(alias) {
                tracing::debug!("'{}' aliases '{}' ({})", alias, name, entry.url);
                expanded.push(alias.clone());
            }
        }
    }

    Resolved::with_diagnostics(expanded, diagnostics)
}

/// Adds the other half of every alias pair one of whose names is present.
pub fn merge_alias_pairs(names: &mut Vec<String>, pairs: &[(String, String)]) {
    for (left, right) in pairs {
        let has_left = names.contains(left);
        let has_right = names.contains(right);
        if has_left && !has_right {
            names.push(right.clone());
        } else if has_right && !has_left {
            names.push(left.clone());
        }
    }
}
