//! Context-analyzer interface
//!
//! Context retrieval runs on a search index whose format and query
//! logic are opaque; the engine owns only the handle over the index
//! directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::resource::Resource;

/// Search-index-backed context retrieval service.
pub trait ContextAnalyzer: Resource {}

/// Handle over the on-disk context index.
#[derive(Debug)]
pub struct IndexContextAnalyzer {
    path: PathBuf,
}

impl IndexContextAnalyzer {
    /// Open the index directory, verifying it exists.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let metadata = fs::metadata(&path)?;
        if !metadata.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a context index directory: {}", path.display()),
            ));
        }
        Ok(IndexContextAnalyzer { path })
    }

    /// Path of the index directory.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Resource for IndexContextAnalyzer {
    fn close(&self) -> io::Result<()> {
        Ok(())
    }
}

impl ContextAnalyzer for IndexContextAnalyzer {}
