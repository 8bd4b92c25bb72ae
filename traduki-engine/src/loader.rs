//! Construction recipes for engine resources
//!
//! The recipes live behind [`ResourceLoader`] so the registry can be
//! exercised with substitute loaders; [`FsLoader`] is the production
//! implementation working off the engine's on-disk layout.

use std::fs;
use std::io;
use std::sync::Arc;

use crate::aligner::{Aligner, AlignmentModel, SymmetrizedAligner};
use crate::config::EngineConfig;
use crate::context::{ContextAnalyzer, IndexContextAnalyzer};
use crate::decoder::{Decoder, DecoderTemplate, StatisticalDecoder};
use crate::paths::EnginePaths;
use crate::processing::{Postprocessor, Preprocessor, TextPostprocessor, TextPreprocessor};
use crate::vocabulary::{StoreVocabulary, Vocabulary};

/// Everything a construction recipe may consult.
pub struct LoadContext<'a> {
    /// The engine's configuration.
    pub config: &'a EngineConfig,
    /// The engine's on-disk layout.
    pub paths: &'a EnginePaths,
    /// Decoder thread count, fixed at engine construction.
    pub threads: usize,
}

/// Construction recipes for the six engine resources.
///
/// The registry invokes at most one recipe at a time, under its build
/// lock; recipes must not call back into the registry. The vocabulary
/// dependency of the processors is passed in explicitly for the same
/// reason.
pub trait ResourceLoader: Send + Sync {
    /// Build the decoder.
    fn load_decoder(&self, cx: &LoadContext<'_>) -> io::Result<Arc<dyn Decoder>>;

    /// Build the aligner.
    fn load_aligner(&self, cx: &LoadContext<'_>) -> io::Result<Arc<dyn Aligner>>;

    /// Build the preprocessor over an already-built vocabulary.
    fn load_preprocessor(
        &self,
        cx: &LoadContext<'_>,
        vocabulary: Arc<dyn Vocabulary>,
    ) -> io::Result<Arc<dyn Preprocessor>>;

    /// Build the postprocessor over an already-built vocabulary.
    fn load_postprocessor(
        &self,
        cx: &LoadContext<'_>,
        vocabulary: Arc<dyn Vocabulary>,
    ) -> io::Result<Arc<dyn Postprocessor>>;

    /// Build the context analyzer.
    fn load_context_analyzer(&self, cx: &LoadContext<'_>) -> io::Result<Arc<dyn ContextAnalyzer>>;

    /// Build the vocabulary.
    fn load_vocabulary(&self, cx: &LoadContext<'_>) -> io::Result<Arc<dyn Vocabulary>>;
}

/// Production loader: every resource is built from the engine root.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl ResourceLoader for FsLoader {
    /// Merge the decoder template with the per-engine weight overrides
    /// and thread count, materialize the result into the runtime
    /// scratch space, and hand it to the decoding service.
    fn load_decoder(&self, cx: &LoadContext<'_>) -> io::Result<Arc<dyn Decoder>> {
        let mut template = DecoderTemplate::load(&cx.paths.decoder_template())?;
        if let Some(weights) = &cx.config.decoder.weights {
            template.set_weights(weights);
        }
        template.set_threads(cx.threads);

        let folder = cx.paths.runtime_folder("decoder", true)?;
        let config_path = folder.join("moses.ini");
        fs::write(&config_path, template.render())?;

        Ok(Arc::new(StatisticalDecoder::new(config_path)))
    }

    fn load_aligner(&self, cx: &LoadContext<'_>) -> io::Result<Arc<dyn Aligner>> {
        let (forward_path, backward_path) = cx.paths.alignment_models();
        let forward = AlignmentModel::open(forward_path)?;
        let backward = AlignmentModel::open(backward_path)?;
        Ok(Arc::new(SymmetrizedAligner::new(forward, backward)))
    }

    fn load_preprocessor(
        &self,
        cx: &LoadContext<'_>,
        vocabulary: Arc<dyn Vocabulary>,
    ) -> io::Result<Arc<dyn Preprocessor>> {
        Ok(Arc::new(TextPreprocessor::new(
            cx.config.source.clone(),
            cx.config.target.clone(),
            vocabulary,
        )))
    }

    fn load_postprocessor(
        &self,
        cx: &LoadContext<'_>,
        vocabulary: Arc<dyn Vocabulary>,
    ) -> io::Result<Arc<dyn Postprocessor>> {
        Ok(Arc::new(TextPostprocessor::new(
            cx.config.source.clone(),
            cx.config.target.clone(),
            vocabulary,
        )))
    }

    fn load_context_analyzer(&self, cx: &LoadContext<'_>) -> io::Result<Arc<dyn ContextAnalyzer>> {
        Ok(Arc::new(IndexContextAnalyzer::open(
            cx.paths.context_index(),
        )?))
    }

    fn load_vocabulary(&self, cx: &LoadContext<'_>) -> io::Result<Arc<dyn Vocabulary>> {
        Ok(Arc::new(StoreVocabulary::open(cx.paths.vocabulary_store())?))
    }
}
