//! Command implementations for the PAML CLI
//!
//! Each command module handles the CLI interface and delegates to the
//! `paml` and `paml-runtime` crates for the actual work.

pub mod attrs;
pub mod compile;
pub mod runtime;

use std::path::Path;

use anyhow::{Context, Result};
use paml::CompilerOptions;
use tracing::debug;

/// Load compiler options from `config`, or the defaults when absent.
pub fn load_options(config: Option<&Path>) -> Result<CompilerOptions> {
    match config {
        Some(path) => {
            debug!("Loading compiler options from {}", path.display());
            CompilerOptions::from_file(path)
                .with_context(|| format!("Failed to load options from {}", path.display()))
        }
        None => Ok(CompilerOptions::default()),
    }
}
