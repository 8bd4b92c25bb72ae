//! Aligner interface and construction recipe
//!
//! An aligner is composed from two directional alignment models; the
//! model file format and the alignment algorithm are opaque here.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::resource::Resource;

/// Word-alignment service used during translation post-editing.
pub trait Aligner: Resource {}

/// One directional alignment model file.
#[derive(Debug)]
pub struct AlignmentModel {
    path: PathBuf,
}

impl AlignmentModel {
    /// Open a model file, verifying it exists.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let metadata = fs::metadata(&path)?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not an alignment model file: {}", path.display()),
            ));
        }
        Ok(AlignmentModel { path })
    }

    /// Path of the model file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// An aligner composing a forward and a backward model into one
/// symmetrized alignment.
#[derive(Debug)]
pub struct SymmetrizedAligner {
    forward: AlignmentModel,
    backward: AlignmentModel,
}

impl SymmetrizedAligner {
    /// Compose two directional models.
    pub fn new(forward: AlignmentModel, backward: AlignmentModel) -> Self {
        SymmetrizedAligner { forward, backward }
    }

    /// The forward-direction model.
    pub fn forward(&self) -> &AlignmentModel {
        &self.forward
    }

    /// The backward-direction model.
    pub fn backward(&self) -> &AlignmentModel {
        &self.backward
    }
}

impl Resource for SymmetrizedAligner {
    fn close(&self) -> io::Result<()> {
        Ok(())
    }
}

impl Aligner for SymmetrizedAligner {}
