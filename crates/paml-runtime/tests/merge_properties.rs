/*
 * merge_properties.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Property-based tests for attribute merging.
 */

use paml_runtime::{AttrMap, AttrMerger, attr_priority, build_attr_str};
use proptest::prelude::*;

const KEY_POOL: &[&str] = &[
    "id", "_id", "class", "class_", "checked", "selected", "href", "title", "data-x", "alt",
    "_title_",
];

fn arb_source() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(
        (
            prop::sample::select(KEY_POOL).prop_map(str::to_string),
            "[a-z<>&\" ]{0,6}",
        ),
        0..6,
    )
}

/// Split a rendered attribute string back into `(key, escaped value)` pairs.
fn split_rendered(rendered: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut rest = rendered;
    while let Some(stripped) = rest.strip_prefix(' ') {
        let eq = stripped.find("=\"").expect("missing =\"");
        let key = &stripped[..eq];
        let after = &stripped[eq + 2..];
        let close = after.find('"').expect("missing closing quote");
        pairs.push((key.to_string(), after[..close].to_string()));
        rest = &after[close + 1..];
    }
    assert!(rest.is_empty(), "trailing garbage: {rest:?}");
    pairs
}

proptest! {
    #[test]
    fn keys_are_sorted_by_priority_then_name(sources in prop::collection::vec(arb_source(), 0..4)) {
        let mut merger = AttrMerger::new();
        for source in &sources {
            merger = merger.source(source.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        let keys: Vec<String> = merger.pairs().into_iter().map(|(k, _)| k).collect();

        for window in keys.windows(2) {
            let a = (attr_priority(&window[0]), &window[0]);
            let b = (attr_priority(&window[1]), &window[1]);
            prop_assert!(a < b, "{:?} should sort before {:?}", window[0], window[1]);
        }
    }

    #[test]
    fn keys_never_carry_edge_underscores(sources in prop::collection::vec(arb_source(), 0..4)) {
        let mut merger = AttrMerger::new();
        for source in &sources {
            merger = merger.source(source.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        for (key, _) in split_rendered(&merger.render()) {
            prop_assert!(!key.starts_with('_') && !key.ends_with('_'));
        }
    }

    #[test]
    fn rendered_values_contain_no_raw_specials(source in arb_source()) {
        let positional: AttrMap = source.into_iter().collect();
        let rendered = build_attr_str(&[positional], &AttrMap::new());
        for (_, value) in split_rendered(&rendered) {
            prop_assert!(!value.contains(['<', '>', '"']));
            // Every ampersand starts an entity produced by the escaper.
            for (idx, _) in value.match_indices('&') {
                let tail = &value[idx..];
                prop_assert!(
                    tail.starts_with("&amp;")
                        || tail.starts_with("&lt;")
                        || tail.starts_with("&gt;")
                        || tail.starts_with("&quot;")
                );
            }
        }
    }

    #[test]
    fn last_write_wins_per_normalized_key(source in arb_source(), value in "[a-z]{1,4}") {
        let merger = AttrMerger::new()
            .source(source.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .source([("_title_", value.as_str())]);
        let pairs = merger.pairs();
        let title = pairs.iter().find(|(k, _)| k == "title").map(|(_, v)| v.clone());
        prop_assert_eq!(title, Some(value));
    }
}
