//! Filesystem implementation of [`Loader`].

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::framework::{LoadError, Loader};

/// Reads files relative to a root directory.
///
/// Paths are canonicalized before reading and must stay in or below the
/// root, so `../` and symlinks cannot reach outside it.
#[derive(Debug, Clone)]
pub struct FileLoader {
    root: PathBuf,
}

impl FileLoader {
    /// Creates a loader rooted at `root`, which must be an existing directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, LoadError> {
        let root = root.as_ref();
        let root = root
            .canonicalize()
            .map_err(|e| LoadError::from_io(root, e))?;
        Ok(Self { root })
    }
}

impl Loader for FileLoader {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        let candidate = self.root.join(path);
        let resolved = candidate
            .canonicalize()
            .map_err(|e| LoadError::from_io(&candidate, e))?;
        if !resolved.starts_with(&self.root) {
            return Err(LoadError::OutsideRoot {
                path: resolved,
                root: self.root.clone(),
            });
        }
        let content = fs::read(&resolved).map_err(|e| LoadError::from_io(&resolved, e))?;
        debug!(path, bytes = content.len(), "Loaded");
        Ok(content)
    }
}
