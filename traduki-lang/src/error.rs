//! Error types for language handling

use crate::tag::LanguageTag;
use thiserror::Error;

/// Errors raised while parsing tags or building a resolver.
///
/// Note that a resolution miss is *not* an error: the resolver answers
/// unmapped queries with `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LanguageError {
    /// The string is not a well-formed language tag
    #[error("invalid language tag: '{0}'")]
    InvalidTag(String),

    /// A rule was keyed by a language tag carrying a region
    #[error("language region not supported for rule: {0}")]
    RegionInRule(LanguageTag),
}

/// Result type for language operations
pub type Result<T> = std::result::Result<T, LanguageError>;
