//! rastertile - raster tile request resolution
//!
//! Turns quadtree tile coordinates into requests against external raster tile
//! services and packages the fetched bytes as loaded tile results.
//!
//! - [`coord`] picks the projection and tiling scheme for an overlay
//! - [`template`] substitutes `{placeholder}` spans in URL templates
//! - [`provider`] holds the WMTS and URL-template strategies and the tile provider
//! - [`config`] loads overlay definitions from INI files
//!
//! # Example
//!
//! ```ignore
//! use rastertile::config::OverlayConfig;
//! use rastertile::coord::TileCoord;
//! use rastertile::provider::{AsyncReqwestClient, TileProviderFactory};
//!
//! let config = OverlayConfig::url_template("osm", "https://tile.example/{z}/{x}/{y}.png");
//! let provider = TileProviderFactory::new(AsyncReqwestClient::new()?)
//!     .create(&config)
//!     .await?;
//! let result = provider.load_tile_image(TileCoord::new(3, 5, 2)).await;
//! ```

pub mod config;
pub mod coord;
pub mod logging;
pub mod provider;
pub mod template;

/// Version of the rastertile library and CLI.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
