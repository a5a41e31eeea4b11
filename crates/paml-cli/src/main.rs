//! PAML CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "paml")]
#[command(version)]
#[command(about = "Compile PAML node trees to Mako templates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a JSON node tree to template source
    Compile {
        /// JSON node tree produced by the front-end parser
        input: PathBuf,

        /// Write output to FILE (defaults to stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// YAML compiler options
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        /// Print the depth of every fragment instead of indented output
        #[arg(long)]
        lines: bool,
    },

    /// Merge attribute sources the way compiled templates do at runtime
    Attrs {
        /// Positional sources, each a JSON object of string values
        sources: Vec<String>,

        /// Named source applied after all positional sources
        #[arg(long)]
        named: Option<String>,

        /// Rewrite camelCase keys to kebab-case
        #[arg(long)]
        adapt_camelcase: bool,
    },

    /// Print the runtime preamble compiled documents start with
    Runtime {
        /// YAML compiler options
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        /// Also write the helper module the preamble imports under DIR
        #[arg(long, value_name = "DIR")]
        module_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paml=info,paml_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            input,
            output,
            config,
            lines,
        } => commands::compile::execute(commands::compile::CompileArgs {
            input,
            output,
            config,
            lines,
        }),
        Commands::Attrs {
            sources,
            named,
            adapt_camelcase,
        } => commands::attrs::execute(&sources, named.as_deref(), adapt_camelcase),
        Commands::Runtime { config, module_dir } => {
            commands::runtime::execute(config.as_deref(), module_dir.as_deref())
        }
    }
}
