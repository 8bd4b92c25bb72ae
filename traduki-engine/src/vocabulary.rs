//! Vocabulary interface
//!
//! The persistent key-value store behind the vocabulary is opaque; the
//! engine owns only the handle over its on-disk directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::resource::Resource;

/// Persistent token vocabulary shared by the pre- and postprocessor.
pub trait Vocabulary: Resource {}

/// Handle over the on-disk vocabulary store.
#[derive(Debug)]
pub struct StoreVocabulary {
    path: PathBuf,
}

impl StoreVocabulary {
    /// Open the store directory, verifying it exists.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let metadata = fs::metadata(&path)?;
        if !metadata.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a vocabulary store directory: {}", path.display()),
            ));
        }
        Ok(StoreVocabulary { path })
    }

    /// Path of the store directory.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Resource for StoreVocabulary {
    fn close(&self) -> io::Result<()> {
        Ok(())
    }
}

impl Vocabulary for StoreVocabulary {}
