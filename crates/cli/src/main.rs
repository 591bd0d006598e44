//! `opresult` CLI entry point.
//!
//! This binary is the composition root for the workspace. Responsibilities:
//!
//! 1. **Parse arguments** — `clap` derive, see [`Cli`].
//! 2. **Wire observability** — configure `tracing-subscriber` with an
//!    `EnvFilter` and either a text or a JSON layer. All `tracing` events
//!    emitted by the `pipeline` crate flow through this layer.
//! 3. **Run a command** — read resources from disk, drive an
//!    [`pipeline::OperationResult`] over them and print the projection.
//!
//! A pipeline that ends in failure is not a process error: the failing
//! outcome is printed and the exit status is zero.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod logging;

use commands::Shape;
use logging::LogFormat;

/// Run operation pipelines over FHIR-style JSON resources.
#[derive(Parser, Debug)]
#[command(name = "opresult")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a single resource and print its projection
    Classify {
        /// Resource JSON file
        file: PathBuf,

        /// Name for the resource (defaults to its lowercased type)
        #[arg(long)]
        name: Option<String>,

        /// Output document shape
        #[arg(long, value_enum, default_value_t = Shape::Parameters)]
        shape: Shape,
    },

    /// Chain resources, one step per file, and print the projection
    Chain {
        /// Resource JSON files, in step order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Keep only the last step instead of accumulating every step
        #[arg(long)]
        replace: bool,

        /// Output document shape
        #[arg(long, value_enum, default_value_t = Shape::Bundle)]
        shape: Shape,
    },

    /// Keep only the named slots of a Parameters document
    Filter {
        /// Parameters JSON file
        file: PathBuf,

        /// Slot names to keep
        #[arg(required = true)]
        names: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.log_format)?;

    let output = match cli.command {
        Commands::Classify { file, name, shape } => commands::classify(&file, name, shape)?,
        Commands::Chain {
            files,
            replace,
            shape,
        } => commands::chain(&files, replace, shape)?,
        Commands::Filter { file, names } => commands::filter(&file, &names)?,
    };

    println!("{output}");
    Ok(())
}
