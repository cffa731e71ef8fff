//! Projection and tiling scheme selection for an overlay.

use tracing::debug;

use super::projection::{Ellipsoid, Projection};
use super::tiling::QuadtreeTilingScheme;
use super::types::Rectangle;

/// Projection, tiling scheme and coverage derived once per overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionContext {
    projection: Projection,
    root_tiles_x: u32,
    tiling_scheme: QuadtreeTilingScheme,
    coverage_rectangle: Rectangle,
}

impl ProjectionContext {
    /// Derives the context from optional overrides.
    ///
    /// Without a projection the geographic projection on `ellipsoid` (WGS84
    /// when `None`) is used. The root column count and the default extent
    /// follow from the projection kind; `tiling_scheme` and
    /// `coverage_rectangle` then replace the derived defaults independently.
    pub fn resolve(
        projection: Option<Projection>,
        tiling_scheme: Option<QuadtreeTilingScheme>,
        coverage_rectangle: Option<Rectangle>,
        ellipsoid: Option<Ellipsoid>,
    ) -> Self {
        let projection =
            projection.unwrap_or_else(|| Projection::geographic(ellipsoid.unwrap_or_default()));

        let root_tiles_x = projection.root_tiles_x();
        let default_rectangle =
            projection.project_rectangle_simple(&projection.maximum_globe_rectangle());

        let tiling_scheme = tiling_scheme
            .unwrap_or_else(|| QuadtreeTilingScheme::new(default_rectangle, root_tiles_x, 1));
        let coverage_rectangle = coverage_rectangle.unwrap_or(default_rectangle);

        debug!(
            projection = %projection.kind(),
            root_tiles_x,
            coverage = %coverage_rectangle,
            "Resolved projection context"
        );

        Self {
            projection,
            root_tiles_x,
            tiling_scheme,
            coverage_rectangle,
        }
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Root tile columns implied by the projection (2 geographic, 1 Web Mercator).
    pub fn root_tiles_x(&self) -> u32 {
        self.root_tiles_x
    }

    pub fn tiling_scheme(&self) -> &QuadtreeTilingScheme {
        &self.tiling_scheme
    }

    pub fn coverage_rectangle(&self) -> &Rectangle {
        &self.coverage_rectangle
    }
}

impl Default for ProjectionContext {
    fn default() -> Self {
        Self::resolve(None, None, None, None)
    }
}
