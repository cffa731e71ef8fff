//! Translation of fetch outcomes into [`LoadedTileResult`] values.

use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, warn};

use super::http::HttpResponse;
use super::types::{Credit, ProviderError};
use crate::coord::Rectangle;

/// Per-tile values that do not depend on the fetch outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileLoadOptions {
    /// Projected extent of the tile
    pub rectangle: Rectangle,
    /// Whether a deeper level exists below this tile
    pub more_detail_available: bool,
}

/// Outcome of loading one tile image.
///
/// A successful load carries `image`. A failed load has no image and at
/// least one entry in `errors`; `more_detail_available` is set either way so
/// the caller can decide whether to refine or fall back to a parent tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadedTileResult {
    #[serde(skip)]
    pub image: Option<Bytes>,
    pub rectangle: Rectangle,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    pub credits: Vec<Credit>,
    pub more_detail_available: bool,
}

impl LoadedTileResult {
    /// Successful load.
    pub fn loaded(image: Bytes, options: TileLoadOptions) -> Self {
        Self {
            image: Some(image),
            rectangle: options.rectangle,
            warnings: Vec::new(),
            errors: Vec::new(),
            credits: Vec::new(),
            more_detail_available: options.more_detail_available,
        }
    }

    /// Failed load carrying the reason.
    pub fn failed(error: &ProviderError, options: TileLoadOptions) -> Self {
        Self {
            image: None,
            rectangle: options.rectangle,
            warnings: Vec::new(),
            errors: vec![error.to_string()],
            credits: Vec::new(),
            more_detail_available: options.more_detail_available,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    /// Size of the image payload in bytes, zero when the load failed.
    pub fn image_len(&self) -> usize {
        self.image.as_ref().map_or(0, Bytes::len)
    }
}

/// Checks a fetch outcome and packages it.
///
/// No response, a status outside `200..=299` or an empty body produce a
/// failed result. Status 0 is accepted because non-HTTP transports (file and
/// data URLs) report no status.
pub fn translate_response(
    url: &str,
    outcome: Result<HttpResponse, ProviderError>,
    options: TileLoadOptions,
) -> LoadedTileResult {
    let response = match outcome {
        Ok(response) => response,
        Err(e) => {
            warn!(url = url, error = %e, "No response for tile image");
            let error = ProviderError::HttpError(format!("No response for {}: {}", url, e));
            return LoadedTileResult::failed(&error, options);
        }
    };

    if response.status != 0 && !(200..300).contains(&response.status) {
        let error = ProviderError::HttpStatus {
            status: response.status,
            url: url.to_string(),
        };
        warn!(url = url, status = response.status, "Tile image request rejected");
        return LoadedTileResult::failed(&error, options);
    }

    if response.body.is_empty() {
        let error = ProviderError::EmptyResponse {
            url: url.to_string(),
        };
        warn!(url = url, "Tile image response is empty");
        return LoadedTileResult::failed(&error, options);
    }

    debug!(url = url, bytes = response.body.len(), "Tile image loaded");
    LoadedTileResult::loaded(response.body, options)
}
