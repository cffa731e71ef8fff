//! Common types and utilities shared across CLI commands.

use std::path::{Path, PathBuf};

use clap::{ArgGroup, Args};
use rastertile::config::{config_file_path, OverlayConfig};
use rastertile::coord::{tile_at_degrees, ProjectionContext, TileCoord};

use crate::error::CliError;

/// Tile selection shared by `resolve` and `fetch`.
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("position").required(true).args(["x", "lon"])))]
pub struct TileArgs {
    /// Overlay file (defaults to ~/.rastertile/overlay.ini)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Tile level
    #[arg(long)]
    pub level: u32,

    /// Tile column
    #[arg(long, requires = "y")]
    pub x: Option<u32>,

    /// Tile row, counted from the south
    #[arg(long, requires = "x")]
    pub y: Option<u32>,

    /// Longitude in decimal degrees
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Latitude in decimal degrees
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,
}

impl TileArgs {
    /// Tile addressed by the arguments, either directly or by position.
    pub fn tile(&self, context: &ProjectionContext) -> Result<TileCoord, CliError> {
        if let (Some(x), Some(y)) = (self.x, self.y) {
            return Ok(TileCoord::new(self.level, x, y));
        }

        let lon = self.lon.unwrap_or_default();
        let lat = self.lat.unwrap_or_default();
        tile_at_degrees(context, lon, lat, self.level).ok_or(CliError::Position {
            lon,
            lat,
            level: self.level,
        })
    }
}

/// Load the overlay from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<OverlayConfig, CliError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(config_file_path);
    tracing::debug!(path = %path.display(), "Loading overlay file");
    Ok(OverlayConfig::load_from(&path)?)
}
