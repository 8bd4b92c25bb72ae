//! Engine lifecycle for the traduki translation runtime
//!
//! This crate owns per-engine configuration, the on-disk model layout,
//! and the lazy subsystem registry that constructs and closes the six
//! heavyweight resources a resolved translation request needs: decoder,
//! aligner, preprocessor, postprocessor, context analyzer and
//! vocabulary. The algorithms behind those resources live elsewhere;
//! here they are opaque, closeable handles.

#![warn(missing_docs)]

pub mod aligner;
pub mod config;
pub mod context;
pub mod decoder;
pub mod engine;
pub mod error;
pub mod loader;
pub mod paths;
pub mod processing;
pub mod resource;
pub mod vocabulary;

// Re-export key types
pub use config::{DecoderConfig, EngineConfig};
pub use engine::Engine;
pub use error::{EngineError, Result};
pub use loader::{FsLoader, LoadContext, ResourceLoader};
pub use paths::EnginePaths;
pub use resource::Resource;

// Re-export the language types engines are configured with
pub use traduki_lang::{LanguagePair, LanguageTag};
