//! rastertile CLI - Command-line interface
//!
//! Inspects overlay files, resolves tile request URLs and fetches tiles
//! through the rastertile library.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rastertile::logging::{default_filter, init_logging};

use commands::common::TileArgs;
use commands::{fetch, info, resolve};
use error::CliError;

#[derive(Parser)]
#[command(name = "rastertile")]
#[command(version = rastertile::VERSION)]
#[command(about = "Resolve and fetch raster tiles from WMTS and URL-template services", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show projection, tiling scheme and request style of an overlay
    Info {
        /// Overlay file (defaults to ~/.rastertile/overlay.ini)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the request URL for a tile
    Resolve(TileArgs),

    /// Load a tile and print a summary
    Fetch {
        #[command(flatten)]
        tile: TileArgs,

        /// Write the image bytes to this file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { default_filter() };
    let _guard = match init_logging(filter, None) {
        Ok(guard) => guard,
        Err(e) => CliError::LoggingInit(e.to_string()).exit(),
    };

    let result = match cli.command {
        Commands::Info { config } => info::run(info::InfoArgs { config }),
        Commands::Resolve(tile) => resolve::run(tile),
        Commands::Fetch { tile, output, json } => {
            fetch::run(fetch::FetchArgs { tile, output, json })
        }
    };

    if let Err(e) = result {
        e.exit();
    }
}
