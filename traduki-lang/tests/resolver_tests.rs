//! Resolution behavior tests for traduki-lang

use traduki_lang::{LanguagePair, LanguageResolver, LanguageTag};

fn tag(s: &str) -> LanguageTag {
    s.parse().unwrap()
}

fn pair(source: &str, target: &str) -> LanguagePair {
    LanguagePair::new(tag(source), tag(target))
}

#[test]
fn registered_pairs_resolve_to_themselves() {
    let resolver = LanguageResolver::builder()
        .add_pair(pair("en", "it"))
        .add_pair(pair("en-US", "fr"))
        .add_pair(pair("zh", "en"))
        .build();

    for registered in resolver.supported_pairs().to_vec() {
        assert_eq!(resolver.resolve(&registered, true), Some(registered.clone()));
        assert_eq!(resolver.resolve(&registered, false), Some(registered.clone()));
    }
}

#[test]
fn single_pair_shortcut() {
    let single = LanguageResolver::builder().add_pair(pair("en", "it")).build();
    assert_eq!(single.as_single_pair(), Some(&pair("en", "it")));
    assert_eq!(single.len(), 1);

    let two = LanguageResolver::builder()
        .add_pair(pair("en", "it"))
        .add_pair(pair("en", "fr"))
        .build();
    assert_eq!(two.as_single_pair(), None);

    let empty = LanguageResolver::builder().build();
    assert!(empty.is_empty());
    assert_eq!(empty.as_single_pair(), None);
}

#[test]
fn reversed_direction_is_found_only_when_asked() {
    let resolver = LanguageResolver::builder().add_pair(pair("it", "en")).build();

    // Direct resolution never tries the reversed orientation.
    assert_eq!(resolver.resolve(&pair("en", "it"), true), None);

    // The direction-agnostic query matches the registered pair reversed
    // and reports it in the requested orientation.
    assert_eq!(
        resolver.resolve_ignoring_direction(&pair("en", "it"), true),
        Some(pair("en", "it"))
    );
}

#[test]
fn unsupported_pair_resolves_to_none() {
    let resolver = LanguageResolver::builder().add_pair(pair("en", "it")).build();

    assert_eq!(resolver.resolve(&pair("en", "fr"), true), None);
    assert_eq!(resolver.resolve(&pair("en", "fr"), true), None);
    assert_eq!(resolver.resolve_ignoring_direction(&pair("de", "ja"), false), None);
}

#[test]
fn wildcard_rule_substitutes_region() {
    let resolver = LanguageResolver::builder()
        .add_pair(pair("en-US", "it"))
        .add_wildcard_rule(tag("en"), tag("en-US"))
        .unwrap()
        .build();

    // en-GB is rewritten to en-US by the rule; normalized and masked
    // agree because the registered pair is the rewritten one.
    assert_eq!(
        resolver.resolve(&pair("en-GB", "it"), false),
        Some(pair("en-US", "it"))
    );
    assert_eq!(
        resolver.resolve(&pair("en-GB", "it"), true),
        Some(pair("en-US", "it"))
    );
}

#[test]
fn filtered_rule_applies_only_to_its_source_region() {
    // Only en-CA is rewritten to en-GB; other regions fall back to the
    // bare code, which no registered entry accepts.
    let resolver = LanguageResolver::builder()
        .add_pair(pair("en-GB", "it"))
        .add_rule(tag("en"), Some(tag("en-CA")), tag("en-GB"))
        .unwrap()
        .build();

    assert_eq!(
        resolver.resolve(&pair("en-CA", "it"), true),
        Some(pair("en-GB", "it"))
    );
    assert_eq!(resolver.resolve(&pair("en-AU", "it"), true), None);
}

#[test]
fn ambiguous_bare_query_with_no_rule_is_unsupported() {
    // Two regional variants and nothing to pick between them: a bare
    // `en` request cannot be routed.
    let resolver = LanguageResolver::builder()
        .add_pair(pair("en-US", "it"))
        .add_pair(pair("en-GB", "it"))
        .build();

    assert_eq!(resolver.resolve(&pair("en", "it"), true), None);
}

#[test]
fn unmatched_region_falls_back_to_bare_code() {
    let resolver = LanguageResolver::builder().add_pair(pair("en", "it")).build();

    assert_eq!(
        resolver.resolve(&pair("en-CA", "it"), true),
        Some(pair("en", "it"))
    );
    // The normalized result carries the stripped tag.
    assert_eq!(
        resolver.resolve(&pair("en-CA", "it"), false),
        Some(pair("en", "it"))
    );
}

#[test]
fn first_registered_entry_wins_over_more_specific_one() {
    // The wildcard entry is registered before the exact en-US entry;
    // an en-US query stops at the wildcard even though the later entry
    // is the more specific match.
    let resolver = LanguageResolver::builder()
        .add_pair(pair("en", "it"))
        .add_pair(pair("en-US", "it"))
        .build();

    assert_eq!(
        resolver.resolve(&pair("en-US", "it"), true),
        Some(pair("en", "it"))
    );
}

#[test]
fn first_registered_rule_wins() {
    let resolver = LanguageResolver::builder()
        .add_pair(pair("en-US", "it"))
        .add_pair(pair("en-GB", "it"))
        .add_wildcard_rule(tag("en"), tag("en-US"))
        .unwrap()
        .add_wildcard_rule(tag("en"), tag("en-GB"))
        .unwrap()
        .build();

    // Both rules accept en-AU; the first registered one supplies the
    // substitution.
    assert_eq!(
        resolver.resolve(&pair("en-AU", "it"), true),
        Some(pair("en-US", "it"))
    );
}

#[test]
fn concurrent_queries_agree() {
    let resolver = LanguageResolver::builder()
        .add_pair(pair("en", "it"))
        .add_wildcard_rule(tag("fr"), tag("en"))
        .unwrap()
        .build();

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..100 {
                    assert_eq!(
                        resolver.resolve(&pair("en-CA", "it"), true),
                        Some(pair("en", "it"))
                    );
                    assert_eq!(resolver.resolve(&pair("en", "de"), true), None);
                    assert_eq!(
                        resolver.resolve_ignoring_direction(&pair("it", "en"), false),
                        Some(pair("it", "en"))
                    );
                }
            });
        }
    });
}
