//! Pre- and postprocessor interfaces
//!
//! Both processors are built for the engine's resolved language pair
//! and share the vocabulary resource; the text pipelines themselves
//! are opaque.

use std::io;
use std::sync::Arc;

use traduki_lang::LanguageTag;

use crate::resource::Resource;
use crate::vocabulary::Vocabulary;

/// Source-text preparation pipeline.
pub trait Preprocessor: Resource {}

/// Target-text restoration pipeline.
pub trait Postprocessor: Resource {}

/// Preprocessor handle bound to a language direction and a vocabulary.
pub struct TextPreprocessor {
    source: LanguageTag,
    target: LanguageTag,
    vocabulary: Arc<dyn Vocabulary>,
}

impl TextPreprocessor {
    /// Bind a preprocessor to a direction and its vocabulary.
    pub fn new(source: LanguageTag, target: LanguageTag, vocabulary: Arc<dyn Vocabulary>) -> Self {
        TextPreprocessor {
            source,
            target,
            vocabulary,
        }
    }

    /// The (source, target) direction this processor serves.
    pub fn languages(&self) -> (&LanguageTag, &LanguageTag) {
        (&self.source, &self.target)
    }

    /// The vocabulary this processor tokenizes against.
    pub fn vocabulary(&self) -> &Arc<dyn Vocabulary> {
        &self.vocabulary
    }
}

impl Resource for TextPreprocessor {
    fn close(&self) -> io::Result<()> {
        Ok(())
    }
}

impl Preprocessor for TextPreprocessor {}

/// Postprocessor handle bound to a language direction and a vocabulary.
pub struct TextPostprocessor {
    source: LanguageTag,
    target: LanguageTag,
    vocabulary: Arc<dyn Vocabulary>,
}

impl TextPostprocessor {
    /// Bind a postprocessor to a direction and its vocabulary.
    pub fn new(source: LanguageTag, target: LanguageTag, vocabulary: Arc<dyn Vocabulary>) -> Self {
        TextPostprocessor {
            source,
            target,
            vocabulary,
        }
    }

    /// The (source, target) direction this processor serves.
    pub fn languages(&self) -> (&LanguageTag, &LanguageTag) {
        (&self.source, &self.target)
    }

    /// The vocabulary this processor detokenizes against.
    pub fn vocabulary(&self) -> &Arc<dyn Vocabulary> {
        &self.vocabulary
    }
}

impl Resource for TextPostprocessor {
    fn close(&self) -> io::Result<()> {
        Ok(())
    }
}

impl Postprocessor for TextPostprocessor {}
