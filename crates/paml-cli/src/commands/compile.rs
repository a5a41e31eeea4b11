//! Compile command implementation.
//!
//! Reads a JSON node tree, renders it with the configured options, and writes
//! the template source to a file or stdout.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use paml::{Compiler, Node};
use tracing::info;

/// Arguments for the compile command
#[derive(Debug)]
pub struct CompileArgs {
    /// JSON node tree
    pub input: PathBuf,
    /// Output file path (stdout when absent)
    pub output: Option<PathBuf>,
    /// YAML compiler options
    pub config: Option<PathBuf>,
    /// Emit `depth<TAB>fragment` lines instead of template source
    pub lines: bool,
}

/// Execute the compile command
pub fn execute(args: CompileArgs) -> Result<()> {
    let options = super::load_options(args.config.as_deref())?;
    let tree = Node::from_file(&args.input)
        .with_context(|| format!("Failed to read node tree from {}", args.input.display()))?;

    let compiler = Compiler::new(options);
    let rendered = if args.lines {
        let mut out = String::new();
        for line in compiler.render_lines(&tree) {
            writeln!(out, "{}\t{}", line.depth, line.text)?;
        }
        out
    } else {
        compiler.render(&tree)
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(
                "Compiled {} -> {}",
                args.input.display(),
                path.display()
            );
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(rendered.as_bytes())
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}
