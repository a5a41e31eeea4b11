/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Runtime support for templates compiled by `paml`.
//!
//! Compiled templates defer attribute assembly to execution time whenever a
//! tag carries a dynamic attribute expression. This crate provides the one
//! helper those templates call, and the compiler reuses it to pre-render tags
//! whose attributes are fully static, so both paths produce identical output.
//!
//! - Sources are merged left to right, the named source last (last write wins).
//! - Leading/trailing underscores are stripped from keys (`class_` -> `class`).
//! - Keys are ordered `id`, `class`, everything else, then `checked`/`selected`.
//! - Values are HTML-escaped exactly once.
//!
//! # Example
//!
//! ```ignore
//! use paml_runtime::{AttrMap, build_attr_str};
//!
//! let mut positional = AttrMap::new();
//! positional.insert("id".to_string(), "x".to_string());
//!
//! let mut named = AttrMap::new();
//! named.insert("checked".to_string(), "yes".to_string());
//! named.insert("class_".to_string(), "y".to_string());
//!
//! assert_eq!(
//!     build_attr_str(&[positional], &named),
//!     r#" id="x" class="y" checked="yes""#
//! );
//! ```

pub mod attrs;
pub mod escape;

pub use attrs::{
    ADAPT_CAMELCASE_KEY, ATTR_PRIORITIES, AttrMap, AttrMerger, attr_priority, build_attr_str,
};
pub use escape::{HTML_ESCAPES, escape_html};
