//! On-disk layout of an engine
//!
//! All model paths are fixed relative to the engine root:
//!
//! ```text
//! <root>/engine.toml                            configuration
//! <root>/models/moses.ini                       decoder template
//! <root>/models/phrase_tables/model.align.fwd   forward alignment model
//! <root>/models/phrase_tables/model.align.bwd   backward alignment model
//! <root>/models/context/index                   context-analyzer index
//! <root>/models/vocabulary                      vocabulary store
//! ```
//!
//! A separate runtime root holds per-engine scratch space for
//! materialized configuration.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name of the engine configuration, relative to the engine root.
pub const ENGINE_CONFIG_FILE: &str = "engine.toml";

/// Resolved filesystem locations for one engine.
#[derive(Debug, Clone)]
pub struct EnginePaths {
    root: PathBuf,
    runtime: PathBuf,
}

impl EnginePaths {
    /// Create paths from an engine root and a runtime scratch root.
    pub fn new(root: impl Into<PathBuf>, runtime: impl Into<PathBuf>) -> Self {
        EnginePaths {
            root: root.into(),
            runtime: runtime.into(),
        }
    }

    /// Conventional layout: `<engines_dir>/<name>` for models and
    /// `<runtime_dir>/<name>` for scratch space.
    pub fn for_engine(engines_dir: &Path, runtime_dir: &Path, name: &str) -> Self {
        EnginePaths {
            root: engines_dir.join(name),
            runtime: runtime_dir.join(name),
        }
    }

    /// The engine root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `engine.toml` under the engine root.
    pub fn config_file(&self) -> PathBuf {
        self.root.join(ENGINE_CONFIG_FILE)
    }

    /// The decoder configuration template.
    pub fn decoder_template(&self) -> PathBuf {
        self.root.join("models").join("moses.ini")
    }

    /// Forward and backward alignment model files.
    pub fn alignment_models(&self) -> (PathBuf, PathBuf) {
        let dir = self.root.join("models").join("phrase_tables");
        (dir.join("model.align.fwd"), dir.join("model.align.bwd"))
    }

    /// The context-analyzer index directory.
    pub fn context_index(&self) -> PathBuf {
        self.root.join("models").join("context").join("index")
    }

    /// The vocabulary store directory.
    pub fn vocabulary_store(&self) -> PathBuf {
        self.root.join("models").join("vocabulary")
    }

    /// A named scratch folder under the runtime root.
    ///
    /// With `ensure` set the folder is cleared and recreated, so the
    /// caller always starts from an empty directory.
    pub fn runtime_folder(&self, name: &str, ensure: bool) -> io::Result<PathBuf> {
        let folder = self.runtime.join(name);

        if ensure {
            match fs::remove_dir_all(&folder) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
            fs::create_dir_all(&folder)?;
        }

        Ok(folder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_paths_follow_fixed_layout() {
        let paths = EnginePaths::new("/data/engines/base", "/data/runtime/base");

        assert_eq!(
            paths.decoder_template(),
            PathBuf::from("/data/engines/base/models/moses.ini")
        );
        let (fwd, bwd) = paths.alignment_models();
        assert!(fwd.ends_with("models/phrase_tables/model.align.fwd"));
        assert!(bwd.ends_with("models/phrase_tables/model.align.bwd"));
        assert!(paths.context_index().ends_with("models/context/index"));
        assert!(paths.vocabulary_store().ends_with("models/vocabulary"));
        assert!(paths.config_file().ends_with(ENGINE_CONFIG_FILE));
    }

    #[test]
    fn runtime_folder_is_cleared_when_ensured() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = EnginePaths::new(tmp.path().join("root"), tmp.path().join("runtime"));

        let folder = paths.runtime_folder("decoder", true).unwrap();
        fs::write(folder.join("stale"), b"x").unwrap();

        let folder = paths.runtime_folder("decoder", true).unwrap();
        assert!(folder.exists());
        assert!(!folder.join("stale").exists());

        // Without ensure, the path is returned untouched.
        fs::write(folder.join("keep"), b"x").unwrap();
        let folder = paths.runtime_folder("decoder", false).unwrap();
        assert!(folder.join("keep").exists());
    }
}
