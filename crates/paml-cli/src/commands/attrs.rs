//! Attrs command implementation.
//!
//! Runs the runtime attribute helper on JSON objects, which is handy for
//! checking what a compiled template will emit for a given set of sources.

use anyhow::{Context, Result};
use paml_runtime::{AttrMap, AttrMerger};

/// Execute the attrs command
pub fn execute(sources: &[String], named: Option<&str>, adapt_camelcase: bool) -> Result<()> {
    println!("{}", merge(sources, named, adapt_camelcase)?);
    Ok(())
}

/// Merge JSON attribute sources into an attribute string.
pub fn merge(sources: &[String], named: Option<&str>, adapt_camelcase: bool) -> Result<String> {
    let mut merger = AttrMerger::new();
    for (i, source) in sources.iter().enumerate() {
        merger = merger.source(&parse_source(source).with_context(|| {
            format!("Attribute source #{} is not a JSON object of strings", i + 1)
        })?);
    }
    if let Some(named) = named {
        merger = merger.named(
            &parse_source(named).context("Named source is not a JSON object of strings")?,
        );
    }
    if adapt_camelcase {
        merger = merger.adapt_camelcase(true);
    }
    Ok(merger.render())
}

fn parse_source(source: &str) -> Result<AttrMap> {
    Ok(serde_json::from_str(source)?)
}
