/*
 * attrs.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Attribute merging.
//!
//! A tag's attributes can come from several places: the static `#id` and
//! `.class` shorthand, literal mappings, and keyword-style arguments. The
//! merger folds all of them into one canonical attribute string.
//!
//! Writes are recorded in order and resolved when rendering, so key
//! normalization (underscore stripping and optional camelCase adaptation)
//! never changes which write wins: the last write to a normalized key does.

use heck::ToKebabCase;
use indexmap::IndexMap;

use crate::escape::escape_html;

/// An ordered attribute mapping (key to unescaped value).
pub type AttrMap = IndexMap<String, String>;

/// Named-source control key that toggles camelCase adaptation.
///
/// `__adapt_camelcase=true` rewrites `dataValue` to `data-value`. The control
/// key itself is never emitted.
pub const ADAPT_CAMELCASE_KEY: &str = "__adapt_camelcase";

/// Keys with a non-zero sort priority. Every other key has priority 0.
pub const ATTR_PRIORITIES: &[(&str, i8)] = &[
    ("id", -2),
    ("class", -1),
    ("checked", 1),
    ("selected", 1),
];

/// Sort priority for an attribute key.
///
/// Lower sorts first; keys with equal priority sort lexicographically.
pub fn attr_priority(key: &str) -> i8 {
    ATTR_PRIORITIES
        .iter()
        .find(|(name, _)| *name == key)
        .map_or(0, |(_, priority)| *priority)
}

/// Merge attribute sources into an escaped attribute string.
///
/// `sources` are applied left to right, then `named` overrides all of them.
/// Each pair renders as ` key="value"`, so the result can be spliced directly
/// after a tag name. This is the function compiled templates import.
pub fn build_attr_str(sources: &[AttrMap], named: &AttrMap) -> String {
    let mut merger = AttrMerger::new();
    for source in sources {
        merger = merger.source(source);
    }
    merger.named(named).render()
}

/// Builder form of [`build_attr_str`] with options.
#[derive(Debug, Clone, Default)]
pub struct AttrMerger {
    positional: Vec<(String, String)>,
    named: Vec<(String, String)>,
    adapt_camelcase: Option<bool>,
}

impl AttrMerger {
    /// Create an empty merger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrite camelCase keys to kebab-case when rendering.
    ///
    /// Takes precedence over an [`ADAPT_CAMELCASE_KEY`] in the named source.
    pub fn adapt_camelcase(mut self, adapt: bool) -> Self {
        self.adapt_camelcase = Some(adapt);
        self
    }

    /// Append a positional source.
    pub fn source<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.positional.extend(
            pairs
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string())),
        );
        self
    }

    /// Append to the named source, which overrides every positional source
    /// regardless of call order.
    pub fn named<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.named.extend(
            pairs
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string())),
        );
        self
    }

    /// Resolve all writes into sorted `(key, unescaped value)` pairs.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let adapt = self.adapt_camelcase.unwrap_or_else(|| self.named_adapt_flag());

        let mut merged = AttrMap::new();
        let writes = self.positional.iter().chain(
            self.named
                .iter()
                .filter(|(key, _)| key.as_str() != ADAPT_CAMELCASE_KEY),
        );
        for (key, value) in writes {
            merged.insert(normalize_key(key, adapt), value.clone());
        }

        let mut pairs: Vec<(String, String)> = merged.into_iter().collect();
        pairs.sort_by(|(a, _), (b, _)| {
            attr_priority(a)
                .cmp(&attr_priority(b))
                .then_with(|| a.cmp(b))
        });
        pairs
    }

    /// Render the merged attributes as ` key="escaped"` pairs.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.pairs() {
            out.push(' ');
            out.push_str(&key);
            out.push_str("=\"");
            out.push_str(&escape_html(&value));
            out.push('"');
        }
        out
    }

    fn named_adapt_flag(&self) -> bool {
        self.named
            .iter()
            .rev()
            .find(|(key, _)| key.as_str() == ADAPT_CAMELCASE_KEY)
            .is_some_and(|(_, value)| is_truthy(value))
    }
}

/// Only `true` (any case) enables adaptation.
fn is_truthy(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

fn normalize_key(key: &str, adapt_camelcase: bool) -> String {
    let key = key.trim_matches('_');
    if adapt_camelcase {
        key.to_kebab_case()
    } else {
        key.to_string()
    }
}
