/*
 * escape.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! HTML escaping for attribute values.

use std::borrow::Cow;

/// Characters replaced by [`escape_html`], in replacement order.
pub const HTML_ESCAPES: &[(char, &str)] = &[
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
];

/// Escape `&`, `<`, `>` and `"` as HTML entities.
///
/// Borrows the input unchanged when nothing needs escaping. Escaping is not
/// idempotent: an already-escaped `&amp;` becomes `&amp;amp;`, so callers
/// escape exactly once, at merge time.
pub fn escape_html(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 16);
    for ch in value.chars() {
        match HTML_ESCAPES.iter().find(|(special, _)| *special == ch) {
            Some((_, entity)) => out.push_str(entity),
            None => out.push(ch),
        }
    }
    Cow::Owned(out)
}
