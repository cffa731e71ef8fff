//! Tile provider: one overlay's URL strategy, projection context and client.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::http::{AsyncHttpClient, Header};
use super::result::{translate_response, LoadedTileResult, TileLoadOptions};
use super::types::{check_level, Credit, ProviderError, TileUrlResolver};
use crate::config::OverlayConfig;
use crate::coord::{ProjectionContext, TileCoord};

/// Loads tile images for one overlay.
///
/// Holds no mutable state. Any number of loads may run concurrently through
/// a shared reference or an `Arc`, and resolving the same tile twice always
/// yields the same URL.
pub struct TileProvider<C: AsyncHttpClient> {
    name: String,
    resolver: Box<dyn TileUrlResolver>,
    context: ProjectionContext,
    client: C,
    headers: Vec<Header>,
    credit: Option<Credit>,
    minimum_level: u32,
    maximum_level: u32,
    tile_width: u32,
    tile_height: u32,
}

impl<C: AsyncHttpClient> TileProvider<C> {
    /// Assembles a provider from a validated configuration and a strategy.
    ///
    /// Prefer [`TileProviderFactory`](super::TileProviderFactory), which
    /// validates the configuration and picks the strategy.
    pub fn new(config: &OverlayConfig, resolver: Box<dyn TileUrlResolver>, client: C) -> Self {
        Self {
            name: config.name.clone(),
            resolver,
            context: config.projection_context(),
            client,
            headers: config.headers.clone(),
            credit: config.credit.as_ref().map(Credit::new),
            minimum_level: config.minimum_level,
            maximum_level: config.maximum_level,
            tile_width: config.tile_width,
            tile_height: config.tile_height,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the URL strategy in use.
    pub fn resolver_name(&self) -> &str {
        self.resolver.name()
    }

    pub fn context(&self) -> &ProjectionContext {
        &self.context
    }

    /// Attribution, attached once per provider rather than per tile.
    pub fn credit(&self) -> Option<&Credit> {
        self.credit.as_ref()
    }

    pub fn minimum_level(&self) -> u32 {
        self.minimum_level
    }

    pub fn maximum_level(&self) -> u32 {
        self.maximum_level
    }

    pub fn tile_size(&self) -> (u32, u32) {
        (self.tile_width, self.tile_height)
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    /// Rectangle and refinement flag for a tile, independent of the protocol.
    pub fn load_options(&self, tile: &TileCoord) -> TileLoadOptions {
        TileLoadOptions {
            rectangle: self.context.tiling_scheme().tile_to_rectangle(tile),
            more_detail_available: tile.level < self.maximum_level,
        }
    }

    /// Request URL for a tile, or the configuration error that prevents one.
    pub fn resolve_url(&self, tile: &TileCoord) -> Result<String, ProviderError> {
        check_level(tile)?;
        self.resolver.resolve_url(tile, &self.context)
    }

    /// Loads one tile image.
    ///
    /// Never fails: configuration errors and transport failures come back as
    /// a failed [`LoadedTileResult`]. Configuration errors are detected before
    /// any request is made.
    pub async fn load_tile_image(&self, tile: TileCoord) -> LoadedTileResult {
        let options = self.load_options(&tile);

        let url = match self.resolve_url(&tile) {
            Ok(url) => url,
            Err(e) => {
                warn!(overlay = %self.name, tile = %tile, error = %e, "Cannot build tile request");
                return LoadedTileResult::failed(&e, options);
            }
        };

        debug!(overlay = %self.name, tile = %tile, url = %url, "Requesting tile image");
        let outcome = self.client.get(&url, &self.headers).await;
        translate_response(&url, outcome, options)
    }
}

impl<C: AsyncHttpClient + 'static> TileProvider<C> {
    /// Runs [`load_tile_image`](Self::load_tile_image) on the tokio runtime.
    pub fn spawn_load(self: &Arc<Self>, tile: TileCoord) -> JoinHandle<LoadedTileResult> {
        let provider = Arc::clone(self);
        tokio::spawn(async move { provider.load_tile_image(tile).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::{QuadtreeTilingScheme, Rectangle};
    use crate::provider::http::HttpResponse;
    use crate::provider::{MockAsyncHttpClient, UrlTemplateResolver, WmtsResolver};
    use crate::template::Subdomains;

    fn template_provider(
        config: OverlayConfig,
        client: MockAsyncHttpClient,
    ) -> TileProvider<MockAsyncHttpClient> {
        let resolver = UrlTemplateResolver::new(&config).unwrap();
        TileProvider::new(&config, Box::new(resolver), client)
    }

    #[tokio::test]
    async fn test_load_success() {
        let client = MockAsyncHttpClient::ok(&[0x89, 0x50, 0x4E, 0x47]);
        let config = OverlayConfig::url_template("t", "https://tile.example/{z}/{x}/{y}.png")
            .with_levels(0, 5)
            .with_header("Referer", "https://app.example");
        let provider = template_provider(config, client.clone());

        let result = provider.load_tile_image(TileCoord::new(3, 5, 2)).await;

        assert!(result.is_loaded());
        assert_eq!(result.image_len(), 4);
        assert!(result.more_detail_available);
        assert_eq!(
            result.rectangle,
            provider
                .context()
                .tiling_scheme()
                .tile_to_rectangle(&TileCoord::new(3, 5, 2))
        );
        assert_eq!(
            client.requested_urls(),
            vec!["https://tile.example/3/5/2.png"]
        );
        assert_eq!(
            client.requests.lock()[0].1,
            vec![("Referer".to_string(), "https://app.example".to_string())]
        );
    }

    #[tokio::test]
    async fn test_more_detail_at_maximum_level() {
        let client = MockAsyncHttpClient::ok(&[1]);
        let provider = template_provider(
            OverlayConfig::url_template("t", "https://t/{z}/{x}/{y}").with_levels(0, 3),
            client,
        );
        let result = provider.load_tile_image(TileCoord::new(3, 0, 0)).await;
        assert!(!result.more_detail_available);
    }

    #[tokio::test]
    async fn test_configuration_error_skips_request() {
        let client = MockAsyncHttpClient::ok(&[1]);
        let provider = template_provider(
            OverlayConfig::url_template("t", "https://{s}.t/{z}/{x}/{y}"),
            client.clone(),
        );

        let result = provider.load_tile_image(TileCoord::new(2, 1, 1)).await;

        assert!(!result.is_loaded());
        assert_eq!(result.errors.len(), 1);
        assert!(result.more_detail_available);
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_label_skips_request() {
        let client = MockAsyncHttpClient::ok(&[1]);
        let config = OverlayConfig::wmts("t", "https://tiles.example/wmts")
            .with_tile_matrix_labels(["0", "1"]);
        let resolver = WmtsResolver::new(&config).unwrap();
        let provider = TileProvider::new(&config, Box::new(resolver), client.clone());

        let result = provider.load_tile_image(TileCoord::new(2, 0, 0)).await;

        assert!(!result.is_loaded());
        assert_eq!(
            result.errors,
            vec!["No tile matrix label for level 2 (2 labels configured)".to_string()]
        );
        assert!(result.more_detail_available);
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_is_result() {
        let client = MockAsyncHttpClient::with_response(Err(ProviderError::HttpError(
            "connection reset".to_string(),
        )));
        let provider = template_provider(
            OverlayConfig::url_template("t", "https://t/{z}/{x}/{y}"),
            client.clone(),
        );

        let result = provider.load_tile_image(TileCoord::new(1, 0, 0)).await;

        assert!(!result.is_loaded());
        assert!(result.errors[0].contains("connection reset"));
        assert_eq!(client.request_count(), 1);
    }

    #[tokio::test]
    async fn test_error_status_is_result() {
        let client = MockAsyncHttpClient::with_response(Ok(HttpResponse::new(503, Vec::new())));
        let provider = template_provider(
            OverlayConfig::url_template("t", "https://t/{z}/{x}/{y}"),
            client,
        );
        let result = provider.load_tile_image(TileCoord::new(0, 0, 0)).await;
        assert_eq!(result.errors, vec!["Image response code 503 for https://t/0/0/0"]);
    }

    #[tokio::test]
    async fn test_credit_not_repeated_per_tile() {
        let client = MockAsyncHttpClient::ok(&[1]);
        let provider = template_provider(
            OverlayConfig::url_template("t", "https://t/{z}/{x}/{y}").with_credit("© Tiles"),
            client,
        );
        assert_eq!(provider.credit(), Some(&Credit::new("© Tiles")));
        let result = provider.load_tile_image(TileCoord::new(0, 0, 0)).await;
        assert!(result.credits.is_empty());
    }

    #[test]
    fn test_level_beyond_supported_maximum() {
        let provider = template_provider(
            OverlayConfig::url_template("t", "https://t/{z}/{x}/{y}"),
            MockAsyncHttpClient::ok(&[1]),
        );
        let tile = TileCoord::new(31, 0, 0);
        assert_eq!(
            provider.resolve_url(&tile),
            Err(ProviderError::TileOutOfRange { tile })
        );
    }

    #[test]
    fn test_load_options_use_tiling_scheme() {
        let scheme = QuadtreeTilingScheme::new(Rectangle::new(0.0, 0.0, 1.0, 1.0), 2, 1);
        let provider = template_provider(
            OverlayConfig::url_template("t", "https://t/{z}/{x}/{y}").with_tiling_scheme(scheme),
            MockAsyncHttpClient::ok(&[1]),
        );
        let options = provider.load_options(&TileCoord::new(0, 1, 0));
        assert_eq!(options.rectangle, Rectangle::new(0.5, 0.0, 1.0, 1.0));
        assert!(options.more_detail_available);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_spawned_loads() {
        let client = MockAsyncHttpClient::ok(&[1, 2, 3]);
        let provider = Arc::new(template_provider(
            OverlayConfig::url_template("t", "https://{s}.t/{z}/{x}/{y}")
                .with_subdomains(Subdomains::parse("abc")),
            client.clone(),
        ));

        let handles: Vec<_> = (0..8u32)
            .map(|x| provider.spawn_load(TileCoord::new(3, x, 1)))
            .collect();
        let results = futures::future::join_all(handles).await;

        for result in results {
            assert!(result.unwrap().is_loaded());
        }
        let mut urls = client.requested_urls();
        urls.sort();
        assert_eq!(urls.len(), 8);
        assert!(urls.contains(&"https://b.t/3/0/1".to_string()));
    }
}
