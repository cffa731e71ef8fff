//! Generic URL-template strategy.
//!
//! Serves any tile service whose request URL can be written as a template,
//! e.g. `https://{s}.tile.example/{z}/{x}/{y}.png`.
//!
//! # Placeholders
//!
//! | key        | value                                          | padded |
//! |------------|------------------------------------------------|--------|
//! | `x`        | column                                         | yes    |
//! | `y`        | row, or `2^level - 1 - y` with `flip_y`        | yes    |
//! | `z`        | level + level bias                             | yes    |
//! | `reverseX` | `columns - x - 1`                              | yes    |
//! | `reverseY` | `rows - y - 1`                                 | yes    |
//! | `reverseZ` | `maximum - level - 1`, or `level` at the maximum | yes  |
//! | `s`        | subdomain for the tile                         | no     |
//! | `width`    | tile width in pixels                           | no     |
//! | `height`   | tile height in pixels                          | no     |
//!
//! Any other key is rendered as its own name.

use tracing::{debug, trace, warn};

use super::types::{biased_level, ProviderError, TileUrlResolver};
use crate::config::OverlayConfig;
use crate::coord::{invert_row, ProjectionContext, TileCoord};
use crate::template::{has_placeholder, try_substitute, Subdomains, ZeroPadding};

/// Resolves tile URLs from a free-form template.
///
/// # Example
///
/// ```
/// use rastertile::config::OverlayConfig;
/// use rastertile::coord::{ProjectionContext, TileCoord};
/// use rastertile::provider::{TileUrlResolver, UrlTemplateResolver};
///
/// let config = OverlayConfig::url_template("demo", "https://tile.example/{z}/{x}/{y}.png");
/// let resolver = UrlTemplateResolver::new(&config).unwrap();
/// let url = resolver
///     .resolve_url(&TileCoord::new(3, 5, 2), &ProjectionContext::default())
///     .unwrap();
/// assert_eq!(url, "https://tile.example/3/5/2.png");
/// ```
#[derive(Debug, Clone)]
pub struct UrlTemplateResolver {
    template: String,
    subdomains: Subdomains,
    zero_padding: ZeroPadding,
    level_bias: i32,
    maximum_level: u32,
    tile_width: u32,
    tile_height: u32,
    flip_y: bool,
}

impl UrlTemplateResolver {
    /// Creates the resolver from an overlay configuration.
    ///
    /// Fails when `flip_y` is combined with a `{reverseY}` placeholder.
    pub fn new(config: &OverlayConfig) -> Result<Self, ProviderError> {
        if config.flip_y && has_placeholder(&config.url, "reverseY") {
            return Err(ProviderError::InvalidConfig(
                "flip_y cannot be combined with a {reverseY} placeholder".to_string(),
            ));
        }

        if config.subdomains.is_empty() && has_placeholder(&config.url, "s") {
            warn!(
                overlay = %config.name,
                url = %config.url,
                "Template uses {{s}} but no subdomains are configured; every tile will fail"
            );
        }

        Ok(Self {
            template: config.url.clone(),
            subdomains: config.subdomains.clone(),
            zero_padding: config.zero_padding.clone(),
            level_bias: config.level_bias,
            maximum_level: config.maximum_level,
            tile_width: config.tile_width,
            tile_height: config.tile_height,
            flip_y: config.flip_y,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// `reverseZ` value for a level.
    fn reverse_level(&self, level: u32) -> u32 {
        if level < self.maximum_level {
            self.maximum_level - level - 1
        } else {
            level
        }
    }

    fn render(
        &self,
        key: &str,
        tile: &TileCoord,
        context: &ProjectionContext,
    ) -> Result<String, ProviderError> {
        let scheme = context.tiling_scheme();
        let out_of_range = || ProviderError::TileOutOfRange { tile: *tile };

        let value = match key {
            "x" => self.zero_padding.pad(key, u64::from(tile.x)),
            "y" => {
                let y = if self.flip_y {
                    1u64.checked_shl(tile.level)
                        .and_then(|rows| rows.checked_sub(u64::from(tile.y) + 1))
                        .ok_or_else(out_of_range)?
                } else {
                    u64::from(tile.y)
                };
                self.zero_padding.pad(key, y)
            }
            "z" => {
                let level = biased_level(tile.level, self.level_bias)?;
                self.zero_padding.pad(key, u64::from(level))
            }
            "reverseX" => {
                let columns = scheme.number_of_x_tiles_at_level(tile.level);
                let x = invert_row(columns, tile.x).ok_or_else(out_of_range)?;
                self.zero_padding.pad(key, u64::from(x))
            }
            "reverseY" => {
                let rows = scheme.number_of_y_tiles_at_level(tile.level);
                let y = invert_row(rows, tile.y).ok_or_else(out_of_range)?;
                self.zero_padding.pad(key, u64::from(y))
            }
            "reverseZ" => self
                .zero_padding
                .pad(key, u64::from(self.reverse_level(tile.level))),
            "s" => self
                .subdomains
                .select(tile)
                .ok_or_else(|| ProviderError::MissingSubdomains {
                    url: self.template.clone(),
                })?
                .to_string(),
            "width" => self.tile_width.to_string(),
            "height" => self.tile_height.to_string(),
            other => other.to_string(),
        };

        trace!(key = key, value = %value, "Substituted placeholder");
        Ok(value)
    }
}

impl TileUrlResolver for UrlTemplateResolver {
    fn resolve_url(
        &self,
        tile: &TileCoord,
        context: &ProjectionContext,
    ) -> Result<String, ProviderError> {
        let url = try_substitute(&self.template, |key| self.render(key, tile, context))?;
        debug!(tile = %tile, url = %url, "Resolved template URL");
        Ok(url)
    }

    fn name(&self) -> &str {
        "url_template"
    }
}
