//! Coordinate type definitions

use std::fmt;

use serde::Serialize;

/// Highest quadtree level accepted anywhere in the crate.
///
/// Column and row counts are `u32`; with two root columns level 30 is the
/// last level whose tile count still fits.
pub const MAX_SUPPORTED_LEVEL: u32 = 30;

/// Address of one quadtree cell.
///
/// `x` grows eastwards from the western edge of the tiling scheme, `y` grows
/// northwards from the southern edge (row 0 is the bottom row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TileCoord {
    /// Zoom level, 0 is the root level
    pub level: u32,
    /// Column, 0 at west
    pub x: u32,
    /// Row, 0 at south
    pub y: u32,
}

impl TileCoord {
    /// Creates a tile coordinate.
    #[inline]
    pub const fn new(level: u32, x: u32, y: u32) -> Self {
        Self { level, x, y }
    }

    /// Returns the parent tile one level up, or `None` for root tiles.
    #[inline]
    pub fn parent(&self) -> Option<TileCoord> {
        if self.level == 0 {
            return None;
        }
        Some(TileCoord {
            level: self.level - 1,
            x: self.x / 2,
            y: self.y / 2,
        })
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{} x={} y={}", self.level, self.x, self.y)
    }
}

/// Axis-aligned rectangle in projected coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rectangle {
    pub minimum_x: f64,
    pub minimum_y: f64,
    pub maximum_x: f64,
    pub maximum_y: f64,
}

impl Rectangle {
    pub const fn new(minimum_x: f64, minimum_y: f64, maximum_x: f64, maximum_y: f64) -> Self {
        Self {
            minimum_x,
            minimum_y,
            maximum_x,
            maximum_y,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.maximum_x - self.minimum_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.maximum_y - self.minimum_y
    }

    /// Returns true if the position lies inside or on the boundary.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.minimum_x && x <= self.maximum_x && y >= self.minimum_y && y <= self.maximum_y
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.3}, {:.3}] - [{:.3}, {:.3}]",
            self.minimum_x, self.minimum_y, self.maximum_x, self.maximum_y
        )
    }
}

/// Rectangle on the globe, all values in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobeRectangle {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl GlobeRectangle {
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Builds a rectangle from values in degrees.
    pub fn from_degrees(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west: west.to_radians(),
            south: south.to_radians(),
            east: east.to_radians(),
            north: north.to_radians(),
        }
    }
}
