//! routegen CLI - turn route trees into router entry templates.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "routegen")]
#[command(about = "Serialize route trees into require/dynamic-import templates")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to routegen.toml config file
    #[arg(short, long, default_value = "routegen.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        yes: bool,
    },

    /// Serialize a route tree
    Build {
        /// Route tree file (.json, .yaml or .yml)
        #[arg(short, long)]
        routes: PathBuf,

        /// Build environment (production, development, test, ...)
        #[arg(short, long, default_value = "production")]
        env: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Route paths already requested; enables compile-on-demand placeholders
        #[arg(long, value_delimiter = ',')]
        requested: Option<Vec<String>>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Keep stdout clean for the generated JSON
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes)?;
        }
        Commands::Build {
            routes,
            env,
            output,
            pretty,
            requested,
        } => {
            let args = commands::build::BuildArgs {
                routes,
                env,
                output,
                pretty,
                requested,
            };
            commands::build::run(&cli.config, args)?;
        }
    }

    Ok(())
}
