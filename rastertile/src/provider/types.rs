//! Provider types and traits

use serde::Serialize;
use thiserror::Error;

use crate::coord::{ProjectionContext, TileCoord, MAX_SUPPORTED_LEVEL};

/// Errors that can occur while building or serving tile requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The template uses `{s}` but no subdomains are configured
    #[error("URL '{url}' uses {{s}} but no subdomains are configured")]
    MissingSubdomains { url: String },

    /// The tile matrix label list has no entry for the requested level
    #[error("No tile matrix label for level {level} ({available} labels configured)")]
    MissingTileMatrixLabel { level: u64, available: usize },

    /// Level bias pushed the requested level below zero
    #[error("Level {level} with bias {bias} yields a negative level")]
    NegativeLevel { level: u32, bias: i32 },

    /// The tile does not exist in the tiling scheme
    #[error("Tile {tile} is outside the tiling scheme")]
    TileOutOfRange { tile: TileCoord },

    /// Invalid overlay configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The request produced no response
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The server answered with a non-success status
    #[error("Image response code {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// The server answered with an empty body
    #[error("Image response for {url} is empty")]
    EmptyResponse { url: String },
}

impl ProviderError {
    /// True for errors detected before any request is issued.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ProviderError::MissingSubdomains { .. }
                | ProviderError::MissingTileMatrixLabel { .. }
                | ProviderError::NegativeLevel { .. }
                | ProviderError::TileOutOfRange { .. }
                | ProviderError::InvalidConfig(_)
        )
    }
}

/// Applies a level bias, rejecting results below zero.
pub fn biased_level(level: u32, bias: i32) -> Result<u32, ProviderError> {
    let biased = i64::from(level) + i64::from(bias);
    u32::try_from(biased).map_err(|_| ProviderError::NegativeLevel { level, bias })
}

/// Rejects tiles deeper than [`MAX_SUPPORTED_LEVEL`].
pub fn check_level(tile: &TileCoord) -> Result<(), ProviderError> {
    if tile.level > MAX_SUPPORTED_LEVEL {
        return Err(ProviderError::TileOutOfRange { tile: *tile });
    }
    Ok(())
}

/// Attribution for an overlay's data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credit {
    pub text: String,
}

impl Credit {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Strategy that turns a tile coordinate into a request URL.
///
/// Implementations hold only immutable configuration, so one resolver can be
/// shared by any number of concurrent requests.
pub trait TileUrlResolver: Send + Sync {
    /// Builds the request URL for `tile`.
    ///
    /// Configuration problems (missing subdomains, missing tile matrix labels,
    /// negative biased levels) are returned as errors; no request is made.
    fn resolve_url(
        &self,
        tile: &TileCoord,
        context: &ProjectionContext,
    ) -> Result<String, ProviderError>;

    /// Short protocol name for logging.
    fn name(&self) -> &str;
}
