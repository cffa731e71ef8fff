//! Coordinate module
//!
//! Tile addressing, the two supported projections, quadtree tiling scheme
//! geometry and the per-overlay [`ProjectionContext`].

mod context;
mod projection;
mod tiling;
mod types;

pub use context::ProjectionContext;
pub use projection::{
    Ellipsoid, GeographicProjection, Projection, ProjectionKind, UnsupportedProjection,
    WebMercatorProjection,
};
pub use tiling::QuadtreeTilingScheme;
pub use types::{GlobeRectangle, Rectangle, TileCoord, MAX_SUPPORTED_LEVEL};

/// Finds the tile under a longitude/latitude given in degrees.
///
/// Returns `None` when the position is outside the tiling scheme.
pub fn tile_at_degrees(
    context: &ProjectionContext,
    longitude: f64,
    latitude: f64,
    level: u32,
) -> Option<TileCoord> {
    let (x, y) = context
        .projection()
        .project(longitude.to_radians(), latitude.to_radians());
    context.tiling_scheme().position_to_tile(x, y, level)
}

/// Inverts a row index between south-origin and north-origin numbering.
///
/// Returns `None` when `y` is not a row of a matrix with `rows` rows.
#[inline]
pub fn invert_row(rows: u32, y: u32) -> Option<u32> {
    rows.checked_sub(y)?.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_at_degrees_geographic() {
        let context = ProjectionContext::default();
        // New York, level 0: western root tile.
        assert_eq!(
            tile_at_degrees(&context, -74.006, 40.7128, 0),
            Some(TileCoord::new(0, 0, 0))
        );
        // Level 1 has 4x2 tiles, NYC sits in column 1, northern row 1.
        assert_eq!(
            tile_at_degrees(&context, -74.006, 40.7128, 1),
            Some(TileCoord::new(1, 1, 1))
        );
    }

    #[test]
    fn test_tile_at_degrees_web_mercator_clamps_poles() {
        let context = ProjectionContext::resolve(
            Some(Projection::web_mercator(Ellipsoid::WGS84)),
            None,
            None,
            None,
        );
        assert_eq!(
            tile_at_degrees(&context, 0.0, 89.9, 3),
            Some(TileCoord::new(3, 4, 7))
        );
    }

    #[test]
    fn test_invert_row() {
        assert_eq!(invert_row(4, 1), Some(2));
        assert_eq!(invert_row(4, 3), Some(0));
        assert_eq!(invert_row(4, 4), None);
        assert_eq!(invert_row(0, 0), None);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_row_inversion_is_involution(level in 0u32..=20, seed in any::<u32>()) {
                let rows = 1u32 << level;
                let y = seed % rows;
                let inverted = invert_row(rows, y).unwrap();
                prop_assert!(inverted < rows);
                prop_assert_eq!(invert_row(rows, inverted), Some(y));
            }

            #[test]
            fn test_position_lands_in_returned_tile(
                lon in -179.9..179.9_f64,
                lat in -89.9..89.9_f64,
                level in 0u32..=18
            ) {
                let context = ProjectionContext::default();
                let tile = tile_at_degrees(&context, lon, lat, level).unwrap();
                let rect = context.tiling_scheme().tile_to_rectangle(&tile);
                let (x, y) = context.projection().project(lon.to_radians(), lat.to_radians());
                let slack = 1e-6;
                prop_assert!(x >= rect.minimum_x - slack && x <= rect.maximum_x + slack);
                prop_assert!(y >= rect.minimum_y - slack && y <= rect.maximum_y + slack);
            }
        }
    }
}
