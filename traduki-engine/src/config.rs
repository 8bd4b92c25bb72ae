//! Engine configuration
//!
//! Loaded from `engine.toml` at the engine root. The thread count is a
//! runtime argument, not configuration, and is passed to
//! [`Engine::new`](crate::Engine::new) by the caller.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use traduki_lang::{LanguagePair, LanguageTag};

use crate::error::{EngineError, Result};

/// Per-engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Engine name; also the directory name under the engines root.
    pub name: String,

    /// Source language the engine translates from.
    pub source: LanguageTag,

    /// Target language the engine translates to.
    pub target: LanguageTag,

    /// Decoder settings
    #[serde(default)]
    pub decoder: DecoderConfig,
}

/// Decoder-related configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DecoderConfig {
    /// Per-engine feature-weight overrides merged into the decoder
    /// template before the decoder is constructed.
    #[serde(default)]
    pub weights: Option<BTreeMap<String, Vec<f32>>>,
}

impl EngineConfig {
    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{}: {e}", path.display())))?;
        toml::from_str(&raw).map_err(|e| EngineError::Config(format!("{}: {e}", path.display())))
    }

    /// The translation direction this engine serves.
    pub fn language_pair(&self) -> LanguagePair {
        LanguagePair::new(self.source.clone(), self.target.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config() {
        let config: EngineConfig = toml::from_str(
            r#"
            name = "en-it-base"
            source = "en"
            target = "it"
            "#,
        )
        .unwrap();

        assert_eq!(config.name, "en-it-base");
        assert_eq!(config.source, LanguageTag::new("en"));
        assert_eq!(config.target, LanguageTag::new("it"));
        assert!(config.decoder.weights.is_none());
    }

    #[test]
    fn parses_weight_overrides() {
        let config: EngineConfig = toml::from_str(
            r#"
            name = "en-it-tuned"
            source = "en-US"
            target = "it"

            [decoder.weights]
            Distortion0 = [0.3]
            LM0 = [0.5, 0.2]
            "#,
        )
        .unwrap();

        let weights = config.decoder.weights.unwrap();
        assert_eq!(weights["Distortion0"], vec![0.3]);
        assert_eq!(weights["LM0"], vec![0.5, 0.2]);
        assert_eq!(config.source, LanguageTag::with_region("en", "US"));
    }

    #[test]
    fn rejects_bad_language_tag() {
        let err = toml::from_str::<EngineConfig>(
            r#"
            name = "broken"
            source = "123"
            target = "it"
            "#,
        );
        assert!(err.is_err());
    }
}
