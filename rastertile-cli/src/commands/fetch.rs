//! Fetch command - load one tile through the overlay's tile service.

use std::path::PathBuf;
use std::time::Instant;

use rastertile::coord::TileCoord;
use rastertile::provider::{AsyncReqwestClient, LoadedTileResult, TileProviderFactory};
use serde::Serialize;

use super::common::{load_config, TileArgs};
use crate::error::CliError;

/// Arguments for the fetch command.
pub struct FetchArgs {
    pub tile: TileArgs,
    pub output: Option<PathBuf>,
    pub json: bool,
}

/// Machine-readable outcome of a fetch.
#[derive(Debug, Serialize)]
struct FetchSummary<'a> {
    overlay: &'a str,
    tile: TileCoord,
    url: Option<String>,
    bytes: usize,
    output: Option<String>,
    elapsed_ms: u64,
    result: &'a LoadedTileResult,
}

/// Run the fetch command.
pub fn run(args: FetchArgs) -> Result<(), CliError> {
    let config = load_config(args.tile.config.as_deref())?;
    let tile = args.tile.tile(&config.projection_context())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;

    let client = AsyncReqwestClient::new()?;
    let (provider, result, elapsed) = runtime.block_on(async {
        let provider = TileProviderFactory::new(client).create(&config).await?;
        let start = Instant::now();
        let result = provider.load_tile_image(tile).await;
        Ok::<_, CliError>((provider, result, start.elapsed()))
    })?;

    let output = match (&args.output, &result.image) {
        (Some(path), Some(image)) => {
            std::fs::write(path, image).map_err(|error| CliError::FileWrite {
                path: path.display().to_string(),
                error,
            })?;
            Some(path.display().to_string())
        }
        _ => None,
    };

    let summary = FetchSummary {
        overlay: provider.name(),
        tile,
        url: provider.resolve_url(&tile).ok(),
        bytes: result.image_len(),
        output,
        elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        result: &result,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    if result.is_loaded() {
        Ok(())
    } else {
        Err(CliError::TileFailed(result.errors.clone()))
    }
}

fn print_summary(summary: &FetchSummary<'_>) {
    println!("Overlay:  {}", summary.overlay);
    println!("Tile:     {}", summary.tile);
    if let Some(url) = &summary.url {
        println!("URL:      {}", url);
    }
    println!("Extent:   {}", summary.result.rectangle);
    println!(
        "Refine:   {}",
        if summary.result.more_detail_available {
            "more detail available"
        } else {
            "maximum level"
        }
    );
    if summary.result.is_loaded() {
        println!(
            "Loaded:   {} bytes in {} ms",
            summary.bytes, summary.elapsed_ms
        );
    }
    if let Some(path) = &summary.output {
        println!("Saved:    {}", path);
    }
}
