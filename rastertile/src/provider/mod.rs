//! Tile request providers
//!
//! Turns tile coordinates into request URLs and fetch outcomes into
//! [`LoadedTileResult`] values. Two URL strategies implement
//! [`TileUrlResolver`]:
//!
//! - [`UrlTemplateResolver`] for free-form `{z}/{x}/{y}` style templates
//! - [`WmtsResolver`] for WMTS KVP and REST services
//!
//! # Factory Pattern
//!
//! ```ignore
//! use rastertile::provider::{AsyncReqwestClient, TileProviderFactory};
//!
//! let factory = TileProviderFactory::new(AsyncReqwestClient::new()?);
//! let provider = factory.create(&config).await?;
//! ```

mod factory;
mod http;
mod result;
mod tile_provider;
mod types;
mod url_template;
mod wmts;

pub use factory::{create_resolver, TileProviderFactory};
pub use http::{AsyncHttpClient, AsyncReqwestClient, Header, HttpResponse, DEFAULT_TIMEOUT_SECS};
pub use result::{translate_response, LoadedTileResult, TileLoadOptions};
pub use tile_provider::TileProvider;
pub use types::{biased_level, check_level, Credit, ProviderError, TileUrlResolver};
pub use url_template::UrlTemplateResolver;
pub use wmts::{RequestStyle, WmtsResolver};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
