//! The subsystem registry
//!
//! [`Engine`] owns six lazily-built resources behind one shared build
//! lock. A slot transitions from empty to built at most once; a failed
//! build leaves it empty so a later call can retry. After the first
//! successful build, reads go through an atomically published handle
//! and take no lock at all.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use tracing::{debug, warn};
use traduki_lang::LanguageTag;

use crate::aligner::Aligner;
use crate::config::EngineConfig;
use crate::context::ContextAnalyzer;
use crate::decoder::Decoder;
use crate::error::{EngineError, Result};
use crate::loader::{FsLoader, LoadContext, ResourceLoader};
use crate::paths::EnginePaths;
use crate::processing::{Postprocessor, Preprocessor};
use crate::vocabulary::Vocabulary;

/// A translation engine: configuration plus the lazy lifecycle of its
/// six sub-resources.
///
/// Construction is cheap; every resource is built on first demand.
/// All six cold starts serialize through one build lock (construction
/// happens once per engine lifetime, so the cold-start window is not
/// worth finer locking), while warm reads are lock-free.
pub struct Engine {
    config: EngineConfig,
    paths: EnginePaths,
    threads: usize,
    loader: Box<dyn ResourceLoader>,

    build_lock: Mutex<()>,
    closed: AtomicBool,

    decoder: OnceLock<Arc<dyn Decoder>>,
    aligner: OnceLock<Arc<dyn Aligner>>,
    preprocessor: OnceLock<Arc<dyn Preprocessor>>,
    postprocessor: OnceLock<Arc<dyn Postprocessor>>,
    context_analyzer: OnceLock<Arc<dyn ContextAnalyzer>>,
    vocabulary: OnceLock<Arc<dyn Vocabulary>>,
}

impl Engine {
    /// Create an engine over its on-disk layout, building resources
    /// with the production filesystem loader.
    pub fn new(config: EngineConfig, paths: EnginePaths, threads: usize) -> Self {
        Self::with_loader(config, paths, threads, Box::new(FsLoader))
    }

    /// Create an engine with a custom resource loader.
    pub fn with_loader(
        config: EngineConfig,
        paths: EnginePaths,
        threads: usize,
        loader: Box<dyn ResourceLoader>,
    ) -> Self {
        Engine {
            config,
            paths,
            threads,
            loader,
            build_lock: Mutex::new(()),
            closed: AtomicBool::new(false),
            decoder: OnceLock::new(),
            aligner: OnceLock::new(),
            preprocessor: OnceLock::new(),
            postprocessor: OnceLock::new(),
            context_analyzer: OnceLock::new(),
            vocabulary: OnceLock::new(),
        }
    }

    /// Read the configuration from the engine root and create the
    /// engine. A missing or malformed configuration is fatal.
    pub fn load(paths: EnginePaths, threads: usize) -> Result<Self> {
        let config = EngineConfig::load(&paths.config_file())?;
        Ok(Self::new(config, paths, threads))
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The engine's name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// The engine's on-disk layout.
    pub fn paths(&self) -> &EnginePaths {
        &self.paths
    }

    /// Source language the engine translates from.
    pub fn source_language(&self) -> &LanguageTag {
        &self.config.source
    }

    /// Target language the engine translates to.
    pub fn target_language(&self) -> &LanguageTag {
        &self.config.target
    }

    /// The decoder, built on first demand.
    pub fn decoder(&self) -> Result<Arc<dyn Decoder>> {
        self.get_or_build(&self.decoder, "decoder", || {
            self.loader
                .load_decoder(&self.load_context())
                .map_err(|e| EngineError::lazy("decoder", e))
        })
    }

    /// The aligner, built on first demand.
    pub fn aligner(&self) -> Result<Arc<dyn Aligner>> {
        self.get_or_build(&self.aligner, "aligner", || {
            self.loader
                .load_aligner(&self.load_context())
                .map_err(|e| EngineError::lazy("aligner", e))
        })
    }

    /// The preprocessor, built on first demand. Transitively builds
    /// the vocabulary under the already-held build lock.
    pub fn preprocessor(&self) -> Result<Arc<dyn Preprocessor>> {
        self.get_or_build(&self.preprocessor, "preprocessor", || {
            let vocabulary = self.vocabulary_locked()?;
            self.loader
                .load_preprocessor(&self.load_context(), vocabulary)
                .map_err(|e| EngineError::lazy("preprocessor", e))
        })
    }

    /// The postprocessor, built on first demand. Transitively builds
    /// the vocabulary under the already-held build lock.
    pub fn postprocessor(&self) -> Result<Arc<dyn Postprocessor>> {
        self.get_or_build(&self.postprocessor, "postprocessor", || {
            let vocabulary = self.vocabulary_locked()?;
            self.loader
                .load_postprocessor(&self.load_context(), vocabulary)
                .map_err(|e| EngineError::lazy("postprocessor", e))
        })
    }

    /// The context analyzer, built on first demand.
    pub fn context_analyzer(&self) -> Result<Arc<dyn ContextAnalyzer>> {
        self.get_or_build(&self.context_analyzer, "context analyzer", || {
            self.loader
                .load_context_analyzer(&self.load_context())
                .map_err(|e| EngineError::lazy("context analyzer", e))
        })
    }

    /// The vocabulary, built on first demand.
    pub fn vocabulary(&self) -> Result<Arc<dyn Vocabulary>> {
        if let Some(built) = self.vocabulary.get() {
            return Ok(Arc::clone(built));
        }
        let _guard = self.lock_builds();
        self.vocabulary_locked()
    }

    /// A named scratch folder under the engine's runtime root.
    pub fn runtime_folder(&self, name: &str, ensure: bool) -> Result<std::path::PathBuf> {
        Ok(self.paths.runtime_folder(name, ensure)?)
    }

    /// Release every built resource exactly once.
    ///
    /// Idempotent. Close failures are logged and do not stop the
    /// remaining closes; resources that were never built are left
    /// unconstructed.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        // Processors first, then the services they sit on.
        if let Some(r) = self.preprocessor.get() {
            close_quietly("preprocessor", r.close());
        }
        if let Some(r) = self.postprocessor.get() {
            close_quietly("postprocessor", r.close());
        }
        if let Some(r) = self.decoder.get() {
            close_quietly("decoder", r.close());
        }
        if let Some(r) = self.aligner.get() {
            close_quietly("aligner", r.close());
        }
        if let Some(r) = self.context_analyzer.get() {
            close_quietly("context analyzer", r.close());
        }
        if let Some(r) = self.vocabulary.get() {
            close_quietly("vocabulary", r.close());
        }
    }

    /// Double-checked lazy build shared by all slots: lock-free when
    /// already built, otherwise serialize on the build lock, re-check,
    /// build, publish. A failed build returns before publication and
    /// leaves the slot empty for a later retry.
    fn get_or_build<T: ?Sized>(
        &self,
        slot: &OnceLock<Arc<T>>,
        resource: &'static str,
        build: impl FnOnce() -> Result<Arc<T>>,
    ) -> Result<Arc<T>> {
        if let Some(built) = slot.get() {
            return Ok(Arc::clone(built));
        }

        let _guard = self.lock_builds();
        if let Some(built) = slot.get() {
            return Ok(Arc::clone(built));
        }

        debug!(engine = %self.config.name, resource, "building resource");
        let built = build()?;
        let _ = slot.set(Arc::clone(&built));
        debug!(engine = %self.config.name, resource, "resource ready");
        Ok(built)
    }

    /// Vocabulary build path. Must run with the build lock held; the
    /// pre/postprocessor recipes call this directly so their transitive
    /// vocabulary demand serializes through the same lock domain
    /// without deadlocking the requesting thread against itself.
    fn vocabulary_locked(&self) -> Result<Arc<dyn Vocabulary>> {
        if let Some(built) = self.vocabulary.get() {
            return Ok(Arc::clone(built));
        }

        debug!(engine = %self.config.name, resource = "vocabulary", "building resource");
        let built = self
            .loader
            .load_vocabulary(&self.load_context())
            .map_err(|e| EngineError::lazy("vocabulary", e))?;
        let _ = self.vocabulary.set(Arc::clone(&built));
        Ok(built)
    }

    fn lock_builds(&self) -> MutexGuard<'_, ()> {
        // A loader panic must not wedge later retries.
        self.build_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load_context(&self) -> LoadContext<'_> {
        LoadContext {
            config: &self.config,
            paths: &self.paths,
            threads: self.threads,
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.close();
    }
}

fn close_quietly(resource: &'static str, result: io::Result<()>) {
    if let Err(error) = result {
        warn!(resource, %error, "failed to close resource");
    }
}
