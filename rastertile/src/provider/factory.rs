//! Provider factory for centralized provider creation.
//!
//! Picks the URL strategy that matches an overlay's [`SourceKind`] and
//! assembles the [`TileProvider`].

use tracing::info;

use super::http::AsyncHttpClient;
use super::tile_provider::TileProvider;
use super::types::{ProviderError, TileUrlResolver};
use super::url_template::UrlTemplateResolver;
use super::wmts::WmtsResolver;
use crate::config::{OverlayConfig, SourceKind};

/// Builds the URL strategy for a configuration.
///
/// Validates the configuration first. Useful on its own when only URLs are
/// needed and no client exists.
pub fn create_resolver(config: &OverlayConfig) -> Result<Box<dyn TileUrlResolver>, ProviderError> {
    config.validate()?;
    let resolver: Box<dyn TileUrlResolver> = match config.source {
        SourceKind::UrlTemplate => Box::new(UrlTemplateResolver::new(config)?),
        SourceKind::Wmts => Box::new(WmtsResolver::new(config)?),
    };
    Ok(resolver)
}

/// Factory for creating tile providers.
///
/// # Example
///
/// ```ignore
/// use rastertile::config::OverlayConfig;
/// use rastertile::provider::{AsyncReqwestClient, TileProviderFactory};
///
/// let config = OverlayConfig::load_from(path)?;
/// let factory = TileProviderFactory::new(AsyncReqwestClient::new()?);
/// let provider = factory.create(&config).await?;
/// let result = provider.load_tile_image(tile).await;
/// ```
pub struct TileProviderFactory<C: AsyncHttpClient> {
    http_client: C,
}

impl<C: AsyncHttpClient> TileProviderFactory<C> {
    /// Create a new provider factory with the given HTTP client.
    pub fn new(http_client: C) -> Self {
        Self { http_client }
    }

    /// Create a provider from the given configuration.
    ///
    /// Completes without any network traffic; everything the provider needs
    /// is in the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidConfig`] when the configuration cannot
    /// describe a working overlay (empty URL, inverted level range, `flip_y`
    /// together with `{reverseY}`, unparseable WMTS base URL).
    pub async fn create(self, config: &OverlayConfig) -> Result<TileProvider<C>, ProviderError> {
        let resolver = create_resolver(config)?;
        let provider = TileProvider::new(config, resolver, self.http_client);

        info!(
            overlay = %provider.name(),
            strategy = provider.resolver_name(),
            projection = %provider.context().projection().kind(),
            minimum_level = provider.minimum_level(),
            maximum_level = provider.maximum_level(),
            "Tile provider ready"
        );

        Ok(provider)
    }
}
