//! OGC Web Map Tile Service strategy.
//!
//! WMTS servers are called in one of two styles:
//!
//! - **KVP**: a base URL such as `https://wmts.example/service` receives a
//!   `GetTile` query string. A `{s}` subdomain placeholder is allowed in the
//!   host.
//! - **REST**: the URL is a path template such as
//!   `https://wmts.example/{Layer}/{Style}/{TileMatrixSet}/{TileMatrix}/{TileRow}/{TileCol}.png`.
//!
//! # Coordinate System
//!
//! WMTS numbers rows from the top of the tile matrix while tile coordinates
//! here count from the south, so the request row is `rows - y - 1`. Columns
//! are unchanged.

use std::fmt::{self, Write as _};

use tracing::{debug, trace, warn};
use url::Url;

use super::types::{biased_level, ProviderError, TileUrlResolver};
use crate::config::{OverlayConfig, WmtsParameters};
use crate::coord::{invert_row, ProjectionContext, TileCoord};
use crate::template::{has_placeholder, try_substitute, Subdomains};

/// WMTS calling convention, decided once from the configured URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStyle {
    /// Query parameters appended to a base URL
    Kvp,
    /// Placeholders in a path template
    Rest,
}

impl RequestStyle {
    /// Classifies a URL.
    ///
    /// No `{` at all, or a single `{` belonging to `{s}`, means KVP. Any other
    /// brace pattern means REST.
    pub fn detect(url: &str) -> Self {
        match url.matches('{').count() {
            0 => RequestStyle::Kvp,
            1 if url.contains("{s}") => RequestStyle::Kvp,
            _ => RequestStyle::Rest,
        }
    }
}

impl fmt::Display for RequestStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestStyle::Kvp => write!(f, "kvp"),
            RequestStyle::Rest => write!(f, "rest"),
        }
    }
}

/// Resolves WMTS `GetTile` URLs.
///
/// # Example
///
/// ```
/// use rastertile::config::OverlayConfig;
/// use rastertile::coord::{ProjectionContext, TileCoord};
/// use rastertile::provider::{RequestStyle, TileUrlResolver, WmtsResolver};
///
/// let config = OverlayConfig::wmts("demo", "https://wmts.example/service");
/// let resolver = WmtsResolver::new(&config).unwrap();
/// assert_eq!(resolver.request_style(), RequestStyle::Kvp);
///
/// let url = resolver
///     .resolve_url(&TileCoord::new(1, 0, 0), &ProjectionContext::default())
///     .unwrap();
/// assert!(url.ends_with("&tilematrix=1&tilerow=1&tilecol=0"));
/// ```
#[derive(Debug, Clone)]
pub struct WmtsResolver {
    url: String,
    request_style: RequestStyle,
    parameters: WmtsParameters,
    subdomains: Subdomains,
    tile_matrix_labels: Vec<String>,
    level_bias: i32,
}

impl WmtsResolver {
    /// Creates the resolver, detecting the request style.
    ///
    /// A KVP base URL that cannot be parsed is rejected here rather than on
    /// every request.
    pub fn new(config: &OverlayConfig) -> Result<Self, ProviderError> {
        let request_style = RequestStyle::detect(&config.url);

        if request_style == RequestStyle::Kvp {
            let probe = config
                .url
                .replace("{s}", config.subdomains.as_slice().first().map_or("s", String::as_str));
            Url::parse(&probe).map_err(|e| {
                ProviderError::InvalidConfig(format!(
                    "'{}' is not a valid WMTS base URL: {}",
                    config.url, e
                ))
            })?;
        }

        if config.subdomains.is_empty() && has_placeholder(&config.url, "s") {
            warn!(
                overlay = %config.name,
                url = %config.url,
                "WMTS URL uses {{s}} but no subdomains are configured; every tile will fail"
            );
        }

        debug!(
            overlay = %config.name,
            style = %request_style,
            labels = config.tile_matrix_labels.len(),
            "Configured WMTS resolver"
        );

        Ok(Self {
            url: config.url.clone(),
            request_style,
            parameters: config.wmts.normalized(),
            subdomains: config.subdomains.clone(),
            tile_matrix_labels: config.tile_matrix_labels.clone(),
            level_bias: config.level_bias,
        })
    }

    pub fn request_style(&self) -> RequestStyle {
        self.request_style
    }

    pub fn parameters(&self) -> &WmtsParameters {
        &self.parameters
    }

    /// Tile matrix identifier for a tile level.
    ///
    /// Fails when labels are configured but do not reach `level` or the
    /// biased level.
    pub fn tile_matrix_label(&self, level: u32) -> Result<String, ProviderError> {
        let available = self.tile_matrix_labels.len();
        if available > 0 && available <= level as usize {
            return Err(ProviderError::MissingTileMatrixLabel {
                level: u64::from(level),
                available,
            });
        }

        let labeled_level = biased_level(level, self.level_bias)?;
        if available == 0 {
            return Ok(labeled_level.to_string());
        }

        self.tile_matrix_labels
            .get(labeled_level as usize)
            .cloned()
            .ok_or(ProviderError::MissingTileMatrixLabel {
                level: u64::from(labeled_level),
                available,
            })
    }

    fn subdomain(&self, tile: &TileCoord) -> Result<String, ProviderError> {
        self.subdomains
            .select(tile)
            .map(str::to_string)
            .ok_or_else(|| ProviderError::MissingSubdomains {
                url: self.url.clone(),
            })
    }

    fn kvp_url(
        &self,
        tile: &TileCoord,
        label: &str,
        row: u32,
        col: u32,
    ) -> Result<String, ProviderError> {
        let base = try_substitute(&self.url, |key| match key {
            "s" => self.subdomain(tile),
            other => Ok(format!("{{{}}}", other)),
        })?;

        let p = &self.parameters;
        let mut query = format!(
            "?service=wmts&request=gettile&version={}&layer={}&style={}&tilematrixset={}&format={}&tilematrix={}&tilerow={}&tilecol={}",
            p.version, p.layer, p.style, p.tile_matrix_set, p.format, label, row, col
        );
        if let Some((name, value)) = &p.token {
            let _ = write!(query, "&{}={}", name, value);
        }

        // The GetTile query replaces any query or fragment on the base URL.
        let end = base.find(['?', '#']).unwrap_or(base.len());
        let mut url = String::with_capacity(end + query.len());
        url.push_str(&base[..end]);
        url.push_str(&query);

        Ok(url)
    }

    fn rest_url(
        &self,
        tile: &TileCoord,
        label: &str,
        row: u32,
        col: u32,
    ) -> Result<String, ProviderError> {
        let p = &self.parameters;
        try_substitute(&self.url, |key| {
            let value = match key.to_ascii_lowercase().as_str() {
                "layer" => p.layer.clone(),
                "style" => p.style.clone(),
                "tilematrixset" => p.tile_matrix_set.clone(),
                "tilematrix" => label.to_string(),
                "tilerow" => row.to_string(),
                "tilecol" => col.to_string(),
                "s" => self.subdomain(tile)?,
                _ => format!("{{{}}}", key),
            };
            trace!(key = key, value = %value, "Substituted WMTS placeholder");
            Ok(value)
        })
    }
}

impl TileUrlResolver for WmtsResolver {
    fn resolve_url(
        &self,
        tile: &TileCoord,
        context: &ProjectionContext,
    ) -> Result<String, ProviderError> {
        let label = self.tile_matrix_label(tile.level)?;

        let scheme = context.tiling_scheme();
        if !scheme.contains_tile(tile) {
            return Err(ProviderError::TileOutOfRange { tile: *tile });
        }
        let rows = scheme.number_of_y_tiles_at_level(tile.level);
        let row = invert_row(rows, tile.y).ok_or(ProviderError::TileOutOfRange { tile: *tile })?;
        let col = tile.x;

        let url = match self.request_style {
            RequestStyle::Kvp => self.kvp_url(tile, &label, row, col)?,
            RequestStyle::Rest => self.rest_url(tile, &label, row, col)?,
        };

        debug!(tile = %tile, url = %url, style = %self.request_style, "Resolved WMTS URL");
        Ok(url)
    }

    fn name(&self) -> &str {
        "wmts"
    }
}
