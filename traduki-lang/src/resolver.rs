//! Supported-pair resolution
//!
//! [`LanguageResolver`] maps an arbitrary requested language pair onto
//! one of a fixed set of supported pairs. Resolution first rewrites
//! each side of the request through per-language rules (or falls back
//! to stripping the region), then scans the registered entries sharing
//! the same bare source/target codes. Both rules and entries are
//! scanned in registration order and the first match wins; registration
//! order is therefore semantically significant.
//!
//! The resolver is built once and queried concurrently; successful
//! resolutions are memoized per exact requested pair, misses are
//! deliberately never cached.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::mapref::entry::Entry as SlotEntry;
use dashmap::DashMap;

use crate::error::{LanguageError, Result};
use crate::tag::{BareKey, LanguagePair, LanguageTag};

/// Per-side acceptance test for a registered pair or rule.
#[derive(Debug, Clone)]
enum Matcher {
    /// Accepts any tag of the language, whatever its region.
    Wildcard,
    /// Accepts only the exact tag, region included.
    Exact(LanguageTag),
}

impl Matcher {
    /// Wildcard for a bare tag, exact for a regioned one.
    fn for_tag(tag: &LanguageTag) -> Self {
        if tag.region().is_none() {
            Matcher::Wildcard
        } else {
            Matcher::Exact(tag.clone())
        }
    }

    fn matches(&self, tag: &LanguageTag) -> bool {
        match self {
            Matcher::Wildcard => true,
            Matcher::Exact(exact) => exact == tag,
        }
    }
}

/// A registered supported pair plus its per-side matchers.
#[derive(Debug, Clone)]
struct Entry {
    pair: LanguagePair,
    source: Matcher,
    target: Matcher,
}

impl Entry {
    fn from_pair(pair: LanguagePair) -> Self {
        let source = Matcher::for_tag(&pair.source);
        let target = Matcher::for_tag(&pair.target);
        Entry {
            pair,
            source,
            target,
        }
    }

    fn matches(&self, pair: &LanguagePair) -> bool {
        self.target.matches(&pair.target) && self.source.matches(&pair.source)
    }
}

/// A transformation rule: when the source-side matcher accepts a tag,
/// the rule's target tag is substituted for it.
#[derive(Debug, Clone)]
struct Rule {
    matcher: Matcher,
    to: LanguageTag,
}

/// A memoized resolution: the pair after rule transformation and the
/// literal registered pair it matched.
#[derive(Debug, Clone)]
struct CacheEntry {
    normalized: LanguagePair,
    masked: LanguagePair,
}

impl CacheEntry {
    fn pick(&self, masked: bool) -> LanguagePair {
        if masked {
            self.masked.clone()
        } else {
            self.normalized.clone()
        }
    }
}

/// Builder for [`LanguageResolver`].
///
/// The supported-pair set and the rule table are frozen at
/// [`build`](ResolverBuilder::build); all later state lives in the
/// resolution cache.
#[derive(Debug, Default)]
pub struct ResolverBuilder {
    pairs: Vec<LanguagePair>,
    rules: HashMap<String, Vec<Rule>>,
}

impl ResolverBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a supported pair. Duplicates are ignored; otherwise
    /// registration order is preserved exactly.
    pub fn add_pair(mut self, pair: LanguagePair) -> Self {
        if !self.pairs.contains(&pair) {
            self.pairs.push(pair);
        }
        self
    }

    /// Register a rule with no source-region filter: every tag of
    /// `language` is rewritten to `to`.
    pub fn add_wildcard_rule(self, language: LanguageTag, to: LanguageTag) -> Result<Self> {
        self.add_rule(language, None, to)
    }

    /// Register a rule for `language`: a tag accepted by `from` (or any
    /// tag of the language when `from` is `None`) is rewritten to `to`.
    ///
    /// Fails with [`LanguageError::RegionInRule`] when `language`
    /// carries a region; rules are keyed by bare codes only.
    pub fn add_rule(
        mut self,
        language: LanguageTag,
        from: Option<LanguageTag>,
        to: LanguageTag,
    ) -> Result<Self> {
        if language.region().is_some() {
            return Err(LanguageError::RegionInRule(language));
        }

        let matcher = match from {
            None => Matcher::Wildcard,
            Some(from) => Matcher::Exact(from),
        };
        self.rules
            .entry(language.language().to_string())
            .or_default()
            .push(Rule { matcher, to });

        Ok(self)
    }

    /// Freeze the builder into a resolver.
    pub fn build(self) -> LanguageResolver {
        let mut index: HashMap<BareKey, Vec<Entry>> = HashMap::new();
        let mut skip = HashSet::new();

        for pair in &self.pairs {
            index
                .entry(BareKey::from(pair))
                .or_default()
                .push(Entry::from_pair(pair.clone()));

            // Explicitly supported regioned tags are exempt from rule
            // transformation: two regional variants of the same pair
            // must stay distinguishable.
            if pair.source.region().is_some() {
                skip.insert(pair.source.clone());
            }
            if pair.target.region().is_some() {
                skip.insert(pair.target.clone());
            }
        }

        LanguageResolver {
            pairs: self.pairs,
            index,
            rules: self.rules,
            skip,
            cache: DashMap::new(),
            scans: AtomicUsize::new(0),
        }
    }
}

/// Maps requested language pairs onto the registered supported set.
///
/// Read-mostly after construction: the pair set, index, rule table and
/// skip set are immutable, the memoization cache grows monotonically.
pub struct LanguageResolver {
    pairs: Vec<LanguagePair>,
    index: HashMap<BareKey, Vec<Entry>>,
    rules: HashMap<String, Vec<Rule>>,
    skip: HashSet<LanguageTag>,
    cache: DashMap<LanguagePair, CacheEntry>,
    scans: AtomicUsize,
}

impl LanguageResolver {
    /// Start building a resolver.
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    /// The registered supported pairs, in registration order.
    pub fn supported_pairs(&self) -> &[LanguagePair] {
        &self.pairs
    }

    /// Number of registered pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True when no pair is registered.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The lone registered pair, if exactly one is registered.
    ///
    /// Single-pair engines use this to skip resolution entirely.
    pub fn as_single_pair(&self) -> Option<&LanguagePair> {
        match self.pairs.as_slice() {
            [single] => Some(single),
            _ => None,
        }
    }

    /// Map `pair` to a supported pair, adapting language and region
    /// where necessary.
    ///
    /// With `masked` set the result is the literal registered pair that
    /// matched; otherwise it is the request after rule transformation.
    /// Returns `None` when no supported pair matches; that is the only
    /// failure signal and means "unsupported language pair", not an
    /// internal error. This does not try the reversed direction; see
    /// [`resolve_ignoring_direction`](Self::resolve_ignoring_direction).
    pub fn resolve(&self, pair: &LanguagePair, masked: bool) -> Option<LanguagePair> {
        if let Some(hit) = self.cache.get(pair) {
            return Some(hit.pick(masked));
        }

        // Vacant-entry insertion keeps the computation single-flight:
        // concurrent first queries for the same pair search once. A
        // miss leaves the slot vacant so later queries re-run the scan.
        match self.cache.entry(pair.clone()) {
            SlotEntry::Occupied(hit) => Some(hit.get().pick(masked)),
            SlotEntry::Vacant(slot) => {
                let found = self.search(pair)?;
                let result = found.pick(masked);
                slot.insert(found);
                Some(result)
            }
        }
    }

    /// Like [`resolve`](Self::resolve), falling back to the reversed
    /// pair; a reversed match is returned re-reversed so the result
    /// keeps the requested orientation.
    pub fn resolve_ignoring_direction(
        &self,
        pair: &LanguagePair,
        masked: bool,
    ) -> Option<LanguagePair> {
        if let Some(hit) = self.cache.get(pair) {
            return Some(hit.pick(masked));
        }
        let reversed = pair.reversed();
        if let Some(hit) = self.cache.get(&reversed) {
            return Some(hit.pick(masked).reversed());
        }

        if let Some(found) = self.resolve(pair, masked) {
            return Some(found);
        }
        self.resolve(&reversed, masked)
            .map(|found| found.reversed())
    }

    /// Full transform-and-scan for one requested pair.
    fn search(&self, pair: &LanguagePair) -> Option<CacheEntry> {
        self.scans.fetch_add(1, Ordering::Relaxed);

        let transformed = self.transform_pair(pair);
        let entries = self.index.get(&BareKey::from(&transformed))?;

        entries
            .iter()
            .find(|entry| entry.matches(&transformed))
            .map(|entry| CacheEntry {
                normalized: transformed.clone(),
                masked: entry.pair.clone(),
            })
    }

    fn transform_pair(&self, pair: &LanguagePair) -> LanguagePair {
        LanguagePair::new(
            self.transform_tag(&pair.source),
            self.transform_tag(&pair.target),
        )
    }

    /// Rewrite one side of a request: skip-listed tags pass through,
    /// the first matching rule substitutes its target tag, and a
    /// regioned tag with no matching rule falls back to its bare code.
    fn transform_tag(&self, tag: &LanguageTag) -> LanguageTag {
        if self.skip.contains(tag) {
            return tag.clone();
        }

        if let Some(rules) = self.rules.get(tag.language()) {
            if let Some(rule) = rules.iter().find(|rule| rule.matcher.matches(tag)) {
                return rule.to.clone();
            }
        }

        if tag.region().is_some() {
            tag.bare()
        } else {
            tag.clone()
        }
    }

    /// How many full scans have run; misses are not cached, so repeated
    /// unsupported queries keep incrementing this.
    #[cfg(test)]
    fn scan_count(&self) -> usize {
        self.scans.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for LanguageResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageResolver")
            .field("pairs", &self.pairs)
            .field("cached", &self.cache.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(s: &str) -> LanguageTag {
        s.parse().unwrap()
    }

    fn pair(source: &str, target: &str) -> LanguagePair {
        LanguagePair::new(tag(source), tag(target))
    }

    #[test]
    fn matcher_for_tag() {
        assert!(matches!(Matcher::for_tag(&tag("en")), Matcher::Wildcard));
        assert!(matches!(Matcher::for_tag(&tag("en-US")), Matcher::Exact(_)));

        let exact = Matcher::for_tag(&tag("en-US"));
        assert!(exact.matches(&tag("en-US")));
        assert!(!exact.matches(&tag("en-GB")));
        assert!(!exact.matches(&tag("en")));
    }

    #[test]
    fn regioned_rule_language_is_rejected() {
        let err = ResolverBuilder::new()
            .add_rule(tag("en-US"), None, tag("en"))
            .unwrap_err();
        assert_eq!(err, LanguageError::RegionInRule(tag("en-US")));
    }

    #[test]
    fn successful_resolution_is_cached() {
        let resolver = LanguageResolver::builder()
            .add_pair(pair("en", "it"))
            .build();

        assert_eq!(resolver.resolve(&pair("en-CA", "it"), true), Some(pair("en", "it")));
        assert_eq!(resolver.scan_count(), 1);

        // Second identical query is served from the cache.
        assert_eq!(resolver.resolve(&pair("en-CA", "it"), false), Some(pair("en", "it")));
        assert_eq!(resolver.scan_count(), 1);
    }

    #[test]
    fn misses_are_never_cached() {
        let resolver = LanguageResolver::builder()
            .add_pair(pair("en", "it"))
            .build();

        assert_eq!(resolver.resolve(&pair("en", "fr"), true), None);
        assert_eq!(resolver.resolve(&pair("en", "fr"), true), None);
        // Each miss re-ran the full transform/match scan.
        assert_eq!(resolver.scan_count(), 2);
    }

    #[test]
    fn reversed_probe_reuses_forward_cache_entry() {
        let resolver = LanguageResolver::builder()
            .add_pair(pair("it", "en"))
            .build();

        assert_eq!(
            resolver.resolve_ignoring_direction(&pair("it", "en"), true),
            Some(pair("it", "en"))
        );
        let scans = resolver.scan_count();

        // The reversed query hits the cache under the reversed key and
        // does not trigger another scan.
        assert_eq!(
            resolver.resolve_ignoring_direction(&pair("en", "it"), true),
            Some(pair("en", "it"))
        );
        assert_eq!(resolver.scan_count(), scans);
    }

    #[test]
    fn skip_set_shields_supported_regional_variants() {
        // en-GB is explicitly supported, so the wildcard rule must not
        // rewrite it; plain en-US queries still go through the rule.
        let resolver = LanguageResolver::builder()
            .add_pair(pair("en-GB", "it"))
            .add_pair(pair("en-US", "it"))
            .add_wildcard_rule(tag("en"), tag("en-US"))
            .unwrap()
            .build();

        assert_eq!(
            resolver.resolve(&pair("en-GB", "it"), true),
            Some(pair("en-GB", "it"))
        );
        assert_eq!(
            resolver.resolve(&pair("en-AU", "it"), true),
            Some(pair("en-US", "it"))
        );
    }
}
