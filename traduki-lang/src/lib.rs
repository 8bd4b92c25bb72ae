//! Language model types and supported-pair resolution
//!
//! This crate owns the immutable language value types (tags and pairs)
//! and the resolver that maps an arbitrary requested pair onto one of a
//! fixed, build-time set of supported pairs.

#![warn(missing_docs)]

pub mod error;
pub mod resolver;
pub mod tag;

// Re-export key types
pub use error::{LanguageError, Result};
pub use resolver::{LanguageResolver, ResolverBuilder};
pub use tag::{LanguagePair, LanguageTag};
