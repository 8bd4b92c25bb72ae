//! Language tags and language pairs
//!
//! Immutable value types: a tag is a language code plus an optional
//! region (`en`, `en-US`); a pair is an ordered source/target tag pair
//! identifying a translation direction.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LanguageError;

/// A language code plus an optional region.
///
/// Equality is structural: `en` and `en-US` are distinct tags. The
/// language code is normalized to lowercase and the region to
/// uppercase on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageTag {
    language: String,
    region: Option<String>,
}

impl LanguageTag {
    /// Create a bare tag from a language code.
    pub fn new(language: impl Into<String>) -> Self {
        LanguageTag {
            language: language.into().to_ascii_lowercase(),
            region: None,
        }
    }

    /// Create a tag carrying a region.
    pub fn with_region(language: impl Into<String>, region: impl Into<String>) -> Self {
        LanguageTag {
            language: language.into().to_ascii_lowercase(),
            region: Some(region.into().to_ascii_uppercase()),
        }
    }

    /// The language code, e.g. `en`.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The region, e.g. `US`, if any.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// The same tag with its region dropped.
    pub fn bare(&self) -> LanguageTag {
        LanguageTag {
            language: self.language.clone(),
            region: None,
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => f.write_str(&self.language),
        }
    }
}

impl FromStr for LanguageTag {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, ['-', '_']);
        let language = parts.next().unwrap_or("");

        if !is_language_code(language) {
            return Err(LanguageError::InvalidTag(s.to_string()));
        }

        match parts.next() {
            None => Ok(LanguageTag::new(language)),
            Some(region) if is_region_code(region) => {
                Ok(LanguageTag::with_region(language, region))
            }
            Some(_) => Err(LanguageError::InvalidTag(s.to_string())),
        }
    }
}

impl Serialize for LanguageTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LanguageTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

fn is_language_code(s: &str) -> bool {
    (2..=8).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_region_code(s: &str) -> bool {
    (2..=4).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// An ordered source/target pair of language tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguagePair {
    /// Source language of the translation direction.
    pub source: LanguageTag,
    /// Target language of the translation direction.
    pub target: LanguageTag,
}

impl LanguagePair {
    /// Create a pair from source and target tags.
    pub fn new(source: LanguageTag, target: LanguageTag) -> Self {
        LanguagePair { source, target }
    }

    /// A new pair with source and target swapped.
    pub fn reversed(&self) -> LanguagePair {
        LanguagePair {
            source: self.target.clone(),
            target: self.source.clone(),
        }
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} > {}", self.source, self.target)
    }
}

impl Serialize for LanguagePair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LanguagePair {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let (source, target) = raw
            .split_once('>')
            .ok_or_else(|| de::Error::custom(LanguageError::InvalidTag(raw.clone())))?;
        let source = source.trim().parse().map_err(de::Error::custom)?;
        let target = target.trim().parse().map_err(de::Error::custom)?;
        Ok(LanguagePair { source, target })
    }
}

/// A pair reduced to bare language codes, used as a coarse index key.
///
/// Two pairs that differ only by region share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct BareKey {
    source: String,
    target: String,
}

impl From<&LanguagePair> for BareKey {
    fn from(pair: &LanguagePair) -> Self {
        BareKey {
            source: pair.source.language().to_string(),
            target: pair.target.language().to_string(),
        }
    }
}
