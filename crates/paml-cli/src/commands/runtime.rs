//! Runtime command implementation.
//!
//! Prints the preamble compiled documents start with and, on request, writes
//! the helper module that preamble imports.

use std::path::Path;

use anyhow::{Context, Result};
use paml::{Compiler, helper_module, helper_module_path};
use tracing::info;

/// Execute the runtime command
pub fn execute(config: Option<&Path>, module_dir: Option<&Path>) -> Result<()> {
    let options = super::load_options(config)?;

    if let Some(dir) = module_dir {
        let path = dir.join(helper_module_path(&options)?);
        let source = helper_module(&options)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, source)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote runtime helper {}", path.display());
    }

    println!("{}", Compiler::new(options).start_document());
    Ok(())
}
