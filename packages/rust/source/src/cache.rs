//! Flat-file document cache.
//!
//! Layout under the cache root:
//! ```text
//! <root>/
//! ├── 115_1.xml          (vote list)
//! └── 115_1_00054.xml    (vote record)
//! ```
//! A file that exists is a hit; there is no staleness or integrity check.

use std::path::{Path, PathBuf};

use rollcall_shared::{DocumentKey, Result, RollcallError};
use tracing::{debug, info};

/// Directory of cached LIS documents.
#[derive(Debug, Clone)]
pub struct DocumentCache {
    root: PathBuf,
}

impl DocumentCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File name a document is cached under.
    pub fn file_name(key: &DocumentKey) -> String {
        let (c, s) = (key.congress, key.session);
        match key.vote_number {
            None => format!("{c}_{s}.xml"),
            Some(n) => format!("{c}_{s}_{n:05}.xml"),
        }
    }

    pub fn path_for(&self, key: &DocumentKey) -> PathBuf {
        self.root.join(Self::file_name(key))
    }

    /// Read a cached document, `None` if it has not been stored.
    pub fn load(&self, key: &DocumentKey) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        match std::fs::read(&path) {
            Ok(bytes) => {
                debug!(path = %path.display(), "cache hit");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RollcallError::io(path, e)),
        }
    }

    /// Write a document into the cache, creating the root if needed.
    pub fn store(&self, key: &DocumentKey, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path_for(key);
        write_document(&path, bytes)?;
        Ok(path)
    }
}

/// Write `bytes` to `path`, creating parent directories first.
pub(crate) fn write_document(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| RollcallError::io(parent, e))?;
            info!(dir = %parent.display(), "created save directory");
        }
    }
    std::fs::write(path, bytes).map_err(|e| RollcallError::io(path, e))?;
    info!(path = %path.display(), bytes = bytes.len(), "saved document");
    Ok(())
}
