//! Quadtree tiling scheme geometry.
//!
//! A tiling scheme splits a projected rectangle into `root_tiles_x` by
//! `root_tiles_y` root tiles, each of which is subdivided into four children
//! per level. Tile rows are counted from the southern edge.

use super::types::{Rectangle, TileCoord};

#[inline]
fn tiles_at_level(root_tiles: u32, level: u32) -> u32 {
    u32::try_from(u64::from(root_tiles) << level.min(32)).unwrap_or(u32::MAX)
}

/// Quadtree subdivision of a projected rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadtreeTilingScheme {
    rectangle: Rectangle,
    root_tiles_x: u32,
    root_tiles_y: u32,
}

impl QuadtreeTilingScheme {
    /// Creates a tiling scheme. Root tile counts of zero are raised to one.
    pub fn new(rectangle: Rectangle, root_tiles_x: u32, root_tiles_y: u32) -> Self {
        Self {
            rectangle,
            root_tiles_x: root_tiles_x.max(1),
            root_tiles_y: root_tiles_y.max(1),
        }
    }

    pub fn rectangle(&self) -> &Rectangle {
        &self.rectangle
    }

    pub fn root_tiles_x(&self) -> u32 {
        self.root_tiles_x
    }

    pub fn root_tiles_y(&self) -> u32 {
        self.root_tiles_y
    }

    /// Number of tile columns at the given level, saturating at `u32::MAX`.
    #[inline]
    pub fn number_of_x_tiles_at_level(&self, level: u32) -> u32 {
        tiles_at_level(self.root_tiles_x, level)
    }

    /// Number of tile rows at the given level, saturating at `u32::MAX`.
    #[inline]
    pub fn number_of_y_tiles_at_level(&self, level: u32) -> u32 {
        tiles_at_level(self.root_tiles_y, level)
    }

    /// Returns true if the tile addresses a cell of this scheme.
    pub fn contains_tile(&self, tile: &TileCoord) -> bool {
        tile.x < self.number_of_x_tiles_at_level(tile.level)
            && tile.y < self.number_of_y_tiles_at_level(tile.level)
    }

    /// Projected extent of a tile.
    pub fn tile_to_rectangle(&self, tile: &TileCoord) -> Rectangle {
        let tile_width =
            self.rectangle.width() / f64::from(self.number_of_x_tiles_at_level(tile.level));
        let tile_height =
            self.rectangle.height() / f64::from(self.number_of_y_tiles_at_level(tile.level));

        let minimum_x = self.rectangle.minimum_x + f64::from(tile.x) * tile_width;
        let minimum_y = self.rectangle.minimum_y + f64::from(tile.y) * tile_height;

        Rectangle::new(
            minimum_x,
            minimum_y,
            minimum_x + tile_width,
            minimum_y + tile_height,
        )
    }

    /// Finds the tile containing a projected position at the given level.
    ///
    /// Positions on the eastern or northern edge belong to the last column
    /// or row. Returns `None` outside the scheme's rectangle.
    pub fn position_to_tile(&self, x: f64, y: f64, level: u32) -> Option<TileCoord> {
        if !self.rectangle.contains(x, y) {
            return None;
        }

        let x_tiles = self.number_of_x_tiles_at_level(level);
        let y_tiles = self.number_of_y_tiles_at_level(level);

        let tile_width = self.rectangle.width() / f64::from(x_tiles);
        let tile_height = self.rectangle.height() / f64::from(y_tiles);

        let column = (((x - self.rectangle.minimum_x) / tile_width) as u32).min(x_tiles - 1);
        let row = (((y - self.rectangle.minimum_y) / tile_height) as u32).min(y_tiles - 1);

        Some(TileCoord::new(level, column, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geographic_unit() -> QuadtreeTilingScheme {
        QuadtreeTilingScheme::new(Rectangle::new(-180.0, -90.0, 180.0, 90.0), 2, 1)
    }

    #[test]
    fn test_tile_counts_double_per_level() {
        let scheme = geographic_unit();
        assert_eq!(scheme.number_of_x_tiles_at_level(0), 2);
        assert_eq!(scheme.number_of_y_tiles_at_level(0), 1);
        assert_eq!(scheme.number_of_x_tiles_at_level(3), 16);
        assert_eq!(scheme.number_of_y_tiles_at_level(3), 8);
    }

    #[test]
    fn test_tile_counts_saturate() {
        let scheme = geographic_unit();
        assert_eq!(scheme.number_of_x_tiles_at_level(30), 1 << 31);
        assert_eq!(scheme.number_of_x_tiles_at_level(31), u32::MAX);
        assert_eq!(scheme.number_of_y_tiles_at_level(40), u32::MAX);
    }

    #[test]
    fn test_zero_root_tiles_raised_to_one() {
        let scheme = QuadtreeTilingScheme::new(Rectangle::new(0.0, 0.0, 1.0, 1.0), 0, 0);
        assert_eq!(scheme.root_tiles_x(), 1);
        assert_eq!(scheme.root_tiles_y(), 1);
    }

    #[test]
    fn test_root_tile_rectangles() {
        let scheme = geographic_unit();
        let west = scheme.tile_to_rectangle(&TileCoord::new(0, 0, 0));
        let east = scheme.tile_to_rectangle(&TileCoord::new(0, 1, 0));
        assert_eq!(west, Rectangle::new(-180.0, -90.0, 0.0, 90.0));
        assert_eq!(east, Rectangle::new(0.0, -90.0, 180.0, 90.0));
    }

    #[test]
    fn test_row_zero_is_south() {
        let scheme = geographic_unit();
        let rect = scheme.tile_to_rectangle(&TileCoord::new(1, 0, 0));
        assert_eq!(rect.minimum_y, -90.0);
        assert_eq!(rect.maximum_y, 0.0);
    }

    #[test]
    fn test_contains_tile() {
        let scheme = geographic_unit();
        assert!(scheme.contains_tile(&TileCoord::new(2, 7, 3)));
        assert!(!scheme.contains_tile(&TileCoord::new(2, 8, 0)));
        assert!(!scheme.contains_tile(&TileCoord::new(2, 0, 4)));
    }

    #[test]
    fn test_position_to_tile() {
        let scheme = geographic_unit();
        assert_eq!(
            scheme.position_to_tile(10.0, 10.0, 1),
            Some(TileCoord::new(1, 2, 1))
        );
        assert_eq!(
            scheme.position_to_tile(180.0, 90.0, 1),
            Some(TileCoord::new(1, 3, 1))
        );
        assert_eq!(scheme.position_to_tile(181.0, 0.0, 1), None);
    }

    #[test]
    fn test_position_maps_into_its_tile_rectangle() {
        let scheme = geographic_unit();
        let tile = scheme.position_to_tile(-73.9, 40.7, 9).unwrap();
        let rect = scheme.tile_to_rectangle(&tile);
        assert!(rect.contains(-73.9, 40.7));
    }
}
