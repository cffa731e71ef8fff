//! Overlay configuration.
//!
//! [`OverlayConfig`] carries everything needed to build a tile provider for
//! one raster overlay. It is assembled once (in code with the `with_*`
//! builders or from an INI file) and never mutated afterwards.

use std::fmt;
use std::str::FromStr;

use super::defaults::*;
use crate::coord::{
    Ellipsoid, Projection, ProjectionContext, QuadtreeTilingScheme, Rectangle,
    MAX_SUPPORTED_LEVEL,
};
use crate::provider::{Header, ProviderError};
use crate::template::{has_placeholder, Subdomains, ZeroPadding};

/// Request convention of the tile service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceKind {
    /// Free-form URL template with `{x}`, `{y}`, `{z}` and friends.
    #[default]
    UrlTemplate,
    /// OGC Web Map Tile Service, KVP or REST.
    Wmts,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::UrlTemplate => write!(f, "url_template"),
            SourceKind::Wmts => write!(f, "wmts"),
        }
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "url_template" | "urltemplate" | "template" | "xyz" => Ok(SourceKind::UrlTemplate),
            "wmts" => Ok(SourceKind::Wmts),
            other => Err(format!("unknown overlay type '{}'", other)),
        }
    }
}

/// WMTS identity parameters as configured. `None` means "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WmtsOptions {
    pub layer: Option<String>,
    pub style: Option<String>,
    pub tile_matrix_set: Option<String>,
    pub format: Option<String>,
    pub version: Option<String>,
    pub token_name: Option<String>,
    pub token_value: Option<String>,
}

/// WMTS parameters after defaults have been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WmtsParameters {
    pub layer: String,
    pub style: String,
    pub tile_matrix_set: String,
    pub format: String,
    pub version: String,
    /// Authentication parameter appended to KVP requests.
    pub token: Option<(String, String)>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl WmtsOptions {
    /// Applies defaults. Absent and empty values are treated the same.
    pub fn normalized(&self) -> WmtsParameters {
        let token = match (non_empty(&self.token_name), non_empty(&self.token_value)) {
            (Some(name), Some(value)) => Some((name.to_string(), value.to_string())),
            _ => None,
        };

        WmtsParameters {
            layer: non_empty(&self.layer)
                .unwrap_or(DEFAULT_WMTS_LAYER)
                .to_string(),
            style: non_empty(&self.style)
                .unwrap_or(DEFAULT_WMTS_STYLE)
                .to_string(),
            tile_matrix_set: non_empty(&self.tile_matrix_set)
                .unwrap_or(DEFAULT_WMTS_TILE_MATRIX_SET)
                .to_string(),
            format: non_empty(&self.format)
                .unwrap_or(DEFAULT_WMTS_FORMAT)
                .to_string(),
            version: non_empty(&self.version)
                .unwrap_or(DEFAULT_WMTS_VERSION)
                .to_string(),
            token,
        }
    }
}

/// Static configuration of one raster overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    /// Name used in logs
    pub name: String,
    /// Request convention
    pub source: SourceKind,
    /// URL template (generic) or base URL / REST template (WMTS)
    pub url: String,
    /// Headers sent with every tile request
    pub headers: Vec<Header>,
    /// Attribution text
    pub credit: Option<String>,
    pub projection: Option<Projection>,
    pub tiling_scheme: Option<QuadtreeTilingScheme>,
    pub coverage_rectangle: Option<Rectangle>,
    /// Ellipsoid for the default projection; ignored when `projection` is set
    pub ellipsoid: Option<Ellipsoid>,
    pub tile_width: u32,
    pub tile_height: u32,
    pub minimum_level: u32,
    pub maximum_level: u32,
    /// Offset added to the level before it is written into a request
    pub level_bias: i32,
    /// Values rotated through by `{s}`
    pub subdomains: Subdomains,
    /// Pad templates for numeric placeholders
    pub zero_padding: ZeroPadding,
    /// Server tile matrix identifiers, one per level; empty means numeric labels
    pub tile_matrix_labels: Vec<String>,
    /// Legacy y inversion for URL templates, `{y}` becomes `2^level - 1 - y`
    pub flip_y: bool,
    pub wmts: WmtsOptions,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_OVERLAY_NAME.to_string(),
            source: SourceKind::default(),
            url: String::new(),
            headers: Vec::new(),
            credit: None,
            projection: None,
            tiling_scheme: None,
            coverage_rectangle: None,
            ellipsoid: None,
            tile_width: DEFAULT_TILE_WIDTH,
            tile_height: DEFAULT_TILE_HEIGHT,
            minimum_level: DEFAULT_MINIMUM_LEVEL,
            maximum_level: DEFAULT_MAXIMUM_LEVEL,
            level_bias: DEFAULT_LEVEL_BIAS,
            subdomains: Subdomains::default(),
            zero_padding: ZeroPadding::default(),
            tile_matrix_labels: Vec::new(),
            flip_y: false,
            wmts: WmtsOptions::default(),
        }
    }
}

impl OverlayConfig {
    /// Generic URL-template overlay.
    pub fn url_template(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: SourceKind::UrlTemplate,
            url: url.into(),
            ..Self::default()
        }
    }

    /// WMTS overlay; `url` is a KVP base URL or a REST template.
    pub fn wmts(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: SourceKind::Wmts,
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_credit(mut self, credit: impl Into<String>) -> Self {
        self.credit = Some(credit.into());
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }

    pub fn with_tiling_scheme(mut self, tiling_scheme: QuadtreeTilingScheme) -> Self {
        self.tiling_scheme = Some(tiling_scheme);
        self
    }

    pub fn with_coverage_rectangle(mut self, rectangle: Rectangle) -> Self {
        self.coverage_rectangle = Some(rectangle);
        self
    }

    pub fn with_ellipsoid(mut self, ellipsoid: Ellipsoid) -> Self {
        self.ellipsoid = Some(ellipsoid);
        self
    }

    pub fn with_tile_size(mut self, width: u32, height: u32) -> Self {
        self.tile_width = width;
        self.tile_height = height;
        self
    }

    pub fn with_levels(mut self, minimum_level: u32, maximum_level: u32) -> Self {
        self.minimum_level = minimum_level;
        self.maximum_level = maximum_level;
        self
    }

    pub fn with_level_bias(mut self, level_bias: i32) -> Self {
        self.level_bias = level_bias;
        self
    }

    pub fn with_subdomains(mut self, subdomains: Subdomains) -> Self {
        self.subdomains = subdomains;
        self
    }

    pub fn with_zero_padding(mut self, zero_padding: ZeroPadding) -> Self {
        self.zero_padding = zero_padding;
        self
    }

    pub fn with_tile_matrix_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tile_matrix_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_flip_y(mut self, flip_y: bool) -> Self {
        self.flip_y = flip_y;
        self
    }

    pub fn with_wmts(mut self, wmts: WmtsOptions) -> Self {
        self.wmts = wmts;
        self
    }

    /// Derives the projection context from the projection-related options.
    pub fn projection_context(&self) -> ProjectionContext {
        ProjectionContext::resolve(
            self.projection,
            self.tiling_scheme,
            self.coverage_rectangle,
            self.ellipsoid,
        )
    }

    /// Checks invariants that make the overlay unusable as a whole.
    ///
    /// Problems that only affect some tiles (a `{s}` placeholder without
    /// subdomains, too few tile matrix labels) are not rejected here; they
    /// surface as failed tile results.
    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.url.trim().is_empty() {
            return Err(ProviderError::InvalidConfig(format!(
                "overlay '{}' has no URL",
                self.name
            )));
        }
        if self.minimum_level > self.maximum_level {
            return Err(ProviderError::InvalidConfig(format!(
                "minimum level {} is greater than maximum level {}",
                self.minimum_level, self.maximum_level
            )));
        }
        if self.maximum_level > MAX_SUPPORTED_LEVEL {
            return Err(ProviderError::InvalidConfig(format!(
                "maximum level {} exceeds the supported maximum {}",
                self.maximum_level, MAX_SUPPORTED_LEVEL
            )));
        }
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(ProviderError::InvalidConfig(format!(
                "tile size {}x{} must be non-zero",
                self.tile_width, self.tile_height
            )));
        }
        if self.source == SourceKind::UrlTemplate
            && self.flip_y
            && has_placeholder(&self.url, "reverseY")
        {
            return Err(ProviderError::InvalidConfig(
                "flip_y cannot be combined with a {reverseY} placeholder".to_string(),
            ));
        }
        Ok(())
    }
}
