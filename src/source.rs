//! Permissive reading of example source files.

use lru::LruCache;
use std::cell::RefCell;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Maximum number of source texts kept in memory.
const SOURCE_CACHE_SIZE: NonZeroUsize = NonZeroUsize::new(256).unwrap();

/// Reads example sources as text.
///
/// Relative paths resolve against `root`. Invalid UTF-8 is replaced, and a
/// missing or unreadable file reads as `None`, which every caller treats as
/// "contributes nothing". Recently read texts are kept in an LRU cache since a
/// single resolution revisits the same files several times.
pub struct SourceReader {
    root: Option<PathBuf>,
    cache: RefCell<LruCache<PathBuf, Option<Rc<str>>>>,
}

impl std::fmt::Debug for SourceReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceReader")
            .field("root", &self.root)
            .field("cached", &self.cache.borrow().len())
            .finish()
    }
}

impl Default for SourceReader {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SourceReader {
    /// Create a reader; relative sources resolve against `root`, or the working directory.
    pub fn new(root: Option<PathBuf>) -> Self {
        Self {
            root,
            cache: RefCell::new(LruCache::new(SOURCE_CACHE_SIZE)),
        }
    }

    /// Absolute (or working-directory relative) location of `src`.
    pub fn resolve(&self, src: &Path) -> PathBuf {
        match &self.root {
            Some(root) if src.is_relative() => root.join(src),
            _ => src.to_path_buf(),
        }
    }

    /// Text of `src`, or `None` if it cannot be read.
    pub fn read(&self, src: &Path) -> Option<Rc<str>> {
        let path = self.resolve(src);
        if let Some(cached) = self.cache.borrow_mut().get(&path) {
            return cached.clone();
        }

        let text = match std::fs::read(&path) {
            Ok(bytes) => Some(Rc::from(String::from_utf8_lossy(&bytes).as_ref())),
            Err(e) => {
                tracing::debug!("Skipping unreadable source {}: {}", path.display(), e);
                None
            }
        };
        self.cache.borrow_mut().put(path, text.clone());
        text
    }

    /// Text of `src`, or the empty string if it cannot be read.
    pub fn read_or_empty(&self, src: &Path) -> Rc<str> {
        self.read(src).unwrap_or_else(|| Rc::from(""))
    }

    /// `src` relative to the current working directory when possible, for display.
    pub fn display_path(&self, src: &Path) -> PathBuf {
        let path = self.resolve(src);
        std::env::current_dir()
            .ok()
            .and_then(|cwd| path.strip_prefix(&cwd).ok().map(Path::to_path_buf))
            .unwrap_or(path)
    }
}
