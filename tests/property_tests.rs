//! Property-based tests for tag filtering and loose version parsing.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use proptest::prelude::*;
use semver::Version;

use gitversioning::core::types::Oid;
use gitversioning::version::{parse_loose, DefaultTagFilter, TagFilter};

/// Strategy for a numeric core with one to three components.
fn version_core() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..10_000, 1..=3)
}

/// Strategy for an identifier run the default pattern accepts after `-`.
fn suffix_part() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9_-]{0,8}"
}

/// Strategy for version text as people write it in tags.
fn version_text() -> impl Strategy<Value = String> {
    (
        version_core(),
        prop::option::of((suffix_part(), prop::option::of(suffix_part()))),
    )
        .prop_map(|(core, suffix)| {
            let mut text = core
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(".");
            if let Some((pre, build)) = suffix {
                text.push('-');
                text.push_str(&pre);
                if let Some(build) = build {
                    text.push('+');
                    text.push_str(&build);
                }
            }
            text
        })
}

/// Strategy for tag prefixes that contain no digits.
fn tag_prefix() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("v".to_string()),
        Just("release-".to_string()),
        "[a-z]{1,6}/v",
    ]
}

proptest! {
    #[test]
    fn default_filter_extracts_version_text(prefix in tag_prefix(), text in version_text()) {
        let filter = DefaultTagFilter::new();
        let tag = format!("{}{}", prefix, text);
        prop_assert_eq!(filter.version(&tag).unwrap(), Some(text));
    }

    #[test]
    fn extracted_text_always_parses(prefix in tag_prefix(), text in version_text()) {
        let filter = DefaultTagFilter::new();
        let tag = format!("{}{}", prefix, text);
        let extracted = filter.version(&tag).unwrap().unwrap();
        prop_assert!(parse_loose(&extracted).is_ok(), "failed to parse {}", extracted);
    }

    #[test]
    fn prepend_composes(
        a in "[a-z]{0,4}",
        b in "[a-z]{0,4}",
        tag_prefix in "[a-z]{0,8}",
        text in version_text(),
    ) {
        let stepwise = DefaultTagFilter::new().prepend(&a).prepend(&b);
        let combined = DefaultTagFilter::new().prepend(&format!("{}{}", b, a));
        let tag = format!("{}{}", tag_prefix, text);
        prop_assert_eq!(stepwise.version(&tag).unwrap(), combined.version(&tag).unwrap());
    }

    #[test]
    fn prefixed_filter_requires_prefix(core in version_core()) {
        let text = core.iter().map(u64::to_string).collect::<Vec<_>>().join(".");
        let filter = DefaultTagFilter::new().prepend("v");
        prop_assert_eq!(filter.version(&format!("v{}", text)).unwrap(), Some(text.clone()));
        prop_assert_eq!(filter.version(&text).unwrap(), None);
    }

    #[test]
    fn missing_components_are_zero(core in version_core()) {
        let text = core.iter().map(u64::to_string).collect::<Vec<_>>().join(".");
        let expected = Version::new(
            core[0],
            core.get(1).copied().unwrap_or(0),
            core.get(2).copied().unwrap_or(0),
        );
        prop_assert_eq!(parse_loose(&text).unwrap(), expected);
    }

    #[test]
    fn ordering_is_numeric(a in version_core(), b in version_core()) {
        let pad = |core: &[u64]| {
            (
                core[0],
                core.get(1).copied().unwrap_or(0),
                core.get(2).copied().unwrap_or(0),
            )
        };
        let join = |core: &[u64]| core.iter().map(u64::to_string).collect::<Vec<_>>().join(".");

        let va = parse_loose(&join(&a)).unwrap();
        let vb = parse_loose(&join(&b)).unwrap();
        prop_assert_eq!(va.cmp(&vb), pad(&a).cmp(&pad(&b)));
    }

    #[test]
    fn release_beats_its_pre_releases(core in version_core(), pre in suffix_part()) {
        let release = core.iter().map(u64::to_string).collect::<Vec<_>>().join(".");
        let pre_release = format!("{}-{}", release, pre);
        prop_assert!(parse_loose(&release).unwrap() > parse_loose(&pre_release).unwrap());
    }

    #[test]
    fn oid_normalized_to_lowercase(hex in "[0-9a-fA-F]{40}") {
        let oid = Oid::new(hex.clone()).unwrap();
        prop_assert_eq!(oid.as_str(), hex.to_lowercase());
    }
}
