//! Engine error types

use std::io;
use thiserror::Error;

/// Engine-level errors.
#[derive(Error, Debug)]
pub enum EngineError {
    /// One-time construction of a lazily-built resource failed.
    ///
    /// The failure is surfaced to the triggering caller only; the slot
    /// stays empty, so a later call may retry and succeed once the
    /// underlying fault is fixed.
    #[error("failed to load {resource}: {source}")]
    LazyLoad {
        /// Which resource was being built.
        resource: &'static str,
        /// The underlying I/O or format error.
        #[source]
        source: io::Error,
    },

    /// The engine configuration file is missing or malformed. Fatal at
    /// engine startup.
    #[error("invalid engine configuration: {0}")]
    Config(String),

    /// I/O error outside resource construction
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl EngineError {
    pub(crate) fn lazy(resource: &'static str, source: io::Error) -> Self {
        EngineError::LazyLoad { resource, source }
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
