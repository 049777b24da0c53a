//! moshigen CLI - Moshi JSON adapter generator
//!
//! Commands:
//! - `moshigen generate` - Generate adapters and factories into a source tree
//! - `moshigen check` - Run generation without writing and report problems
//! - `moshigen inspect` - Print each type's decode plan

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod generate;
mod logging;
mod manifest;
mod source;

#[derive(Parser)]
#[command(name = "moshigen")]
#[command(
    author,
    version,
    about = "Generate Moshi JSON adapters for Java data classes",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Where target types come from
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// Path to a moshigen.toml model manifest
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// Path to a Rust source file with #[generate_moshi] structs
    #[arg(short, long)]
    pub source: Option<PathBuf>,
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Default Java package for types without one
    #[arg(short, long)]
    pub package: Option<String>,

    /// JSON generator configuration (source mode; manifests use [generator])
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate adapters and factories
    Generate {
        #[command(flatten)]
        common: CommonArgs,

        /// Output directory for generated Java sources
        #[arg(short, long, required_unless_present = "dry_run")]
        output: Option<PathBuf>,

        /// Print generated sources instead of writing them
        #[arg(long)]
        dry_run: bool,

        /// Log elapsed time per generation phase
        #[arg(long)]
        trace_performance: bool,
    },

    /// Run generation in memory and report failures and warnings
    Check {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Print the decode plan of every target type
    Inspect {
        #[command(flatten)]
        common: CommonArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Generate {
            common,
            output,
            dry_run,
            trace_performance,
        } => {
            generate::run(&common, output, dry_run, trace_performance)?;
        }
        Commands::Check { common } => {
            generate::check(&common)?;
        }
        Commands::Inspect { common } => {
            generate::inspect(&common)?;
        }
    }

    Ok(())
}
