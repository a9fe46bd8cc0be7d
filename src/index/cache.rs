//! On-disk cache for the token index.
//!
//! The cache is tagged with a fingerprint of the corpus (example ids, source
//! paths and source contents). A cache whose fingerprint no longer matches is
//! rebuilt. Cache failures never fail the caller; they only cost a rebuild.

use super::{TokenIndex, build_index};
use crate::catalog::ExampleCatalog;
use crate::source::SourceReader;
use postcard::to_io;
use serde::{Deserialize, Serialize};
use std::path::Path;
use xxhash_rust::xxh3::Xxh3;

#[derive(Debug, Serialize, Deserialize)]
struct CachedIndex {
    fingerprint: u64,
    index: TokenIndex,
}

/// Hash of everything the token index is derived from.
pub fn corpus_fingerprint(catalog: &ExampleCatalog, sources: &SourceReader) -> u64 {
    let mut hasher = Xxh3::new();
    for example in catalog.examples() {
        hasher.update(example.id.as_bytes());
        hasher.update(&[0]);
        for src in &example.srcs {
            hasher.update(src.to_string_lossy().as_bytes());
            hasher.update(&[0]);
            match sources.read(src) {
                Some(text) => hasher.update(text.as_bytes()),
                None => hasher.update(&[0xff]),
            }
            hasher.update(&[0]);
        }
    }
    hasher.digest()
}

impl TokenIndex {
    /// Loads the cached index at `cache_path`, or builds and caches a fresh one
    /// when the cache is missing, unreadable or stale.
    pub fn load_or_build(
        catalog: &ExampleCatalog,
        sources: &SourceReader,
        cache_path: &Path,
    ) -> Self {
        let fingerprint = corpus_fingerprint(catalog, sources);

        if let Some(index) = load(cache_path, fingerprint) {
            tracing::debug!(
                "Loaded cached token index from {} ({} tokens)",
                cache_path.display(),
                index.token_count()
            );
            return index;
        }

        let index = build_index(catalog, sources);
        store(&index, fingerprint, cache_path);
        index
    }
}

/// Load a cached index if its fingerprint matches.
fn load(path: &Path, fingerprint: u64) -> Option<TokenIndex> {
    let bytes = std::fs::read(path).ok()?;
    match postcard::from_bytes::<CachedIndex>(&bytes) {
        Ok(cached) if cached.fingerprint == fingerprint => Some(cached.index),
        Ok(_) => {
            tracing::info!("Token index cache is stale, rebuilding (file: {})", path.display());
            None
        }
        Err(e) => {
            tracing::warn!("Failed to deserialize cached index at {}: {}", path.display(), e);
            None
        }
    }
}

/// Store an index to disk, replacing any previous cache.
fn store(index: &TokenIndex, fingerprint: u64, path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = std::fs::create_dir_all(parent)
    {
        tracing::warn!("Failed to create cache directory {}: {}", parent.display(), e);
        return;
    }

    let cached = CachedIndex {
        fingerprint,
        index: index.clone(),
    };
    match std::fs::File::create(path) {
        Ok(mut file) => {
            if let Err(e) = to_io(&cached, &mut file) {
                tracing::warn!("Failed to write token index to {}: {}", path.display(), e);
                let _ = std::fs::remove_file(path);
            } else {
                tracing::debug!("Cached token index to {}", path.display());
            }
        }
        Err(e) => {
            tracing::warn!("Failed to create index file {}: {}", path.display(), e);
        }
    }
}
