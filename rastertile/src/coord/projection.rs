//! Map projections supported by the overlay tiling schemes.
//!
//! Only two projections exist: the equirectangular geographic projection and
//! the spherical Web Mercator projection. Both are variants of [`Projection`]
//! and every piece of code that depends on the projection matches on it
//! exhaustively, so adding a projection is a compile error everywhere it
//! matters.

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::types::{GlobeRectangle, Rectangle};

/// Ellipsoid described by its three radii in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    pub radius_x: f64,
    pub radius_y: f64,
    pub radius_z: f64,
}

impl Ellipsoid {
    /// The WGS84 reference ellipsoid.
    pub const WGS84: Ellipsoid = Ellipsoid {
        radius_x: 6_378_137.0,
        radius_y: 6_378_137.0,
        radius_z: 6_356_752.314_245_179,
    };

    /// Sphere of radius one.
    pub const UNIT_SPHERE: Ellipsoid = Ellipsoid {
        radius_x: 1.0,
        radius_y: 1.0,
        radius_z: 1.0,
    };

    pub const fn new(radius_x: f64, radius_y: f64, radius_z: f64) -> Self {
        Self {
            radius_x,
            radius_y,
            radius_z,
        }
    }

    /// Largest of the three radii, used as the semimajor axis.
    #[inline]
    pub fn maximum_radius(&self) -> f64 {
        self.radius_x.max(self.radius_y).max(self.radius_z)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Ellipsoid::WGS84
    }
}

/// Equirectangular projection: longitude and latitude scaled by the semimajor axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeographicProjection {
    ellipsoid: Ellipsoid,
}

impl GeographicProjection {
    /// Whole-globe extent covered by this projection.
    pub const MAXIMUM_GLOBE_RECTANGLE: GlobeRectangle =
        GlobeRectangle::new(-PI, -FRAC_PI_2, PI, FRAC_PI_2);

    pub fn new(ellipsoid: Ellipsoid) -> Self {
        Self { ellipsoid }
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    /// Projects longitude/latitude in radians.
    pub fn project(&self, longitude: f64, latitude: f64) -> (f64, f64) {
        let semimajor = self.ellipsoid.maximum_radius();
        (longitude * semimajor, latitude * semimajor)
    }
}

impl Default for GeographicProjection {
    fn default() -> Self {
        Self::new(Ellipsoid::WGS84)
    }
}

/// Spherical Web Mercator projection (EPSG:3857).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebMercatorProjection {
    ellipsoid: Ellipsoid,
}

impl WebMercatorProjection {
    /// Latitude at which the projected square ends, `atan(sinh(π))`.
    pub const MAXIMUM_LATITUDE: f64 = 1.484_422_229_745_332_4;

    /// Whole-globe extent covered by this projection.
    pub const MAXIMUM_GLOBE_RECTANGLE: GlobeRectangle =
        GlobeRectangle::new(-PI, -Self::MAXIMUM_LATITUDE, PI, Self::MAXIMUM_LATITUDE);

    pub fn new(ellipsoid: Ellipsoid) -> Self {
        Self { ellipsoid }
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    /// Converts a geodetic latitude to the Mercator angle, clamping to the
    /// valid latitude range.
    pub fn geodetic_latitude_to_mercator_angle(latitude: f64) -> f64 {
        let latitude = latitude.clamp(-Self::MAXIMUM_LATITUDE, Self::MAXIMUM_LATITUDE);
        let sin_latitude = latitude.sin();
        0.5 * ((1.0 + sin_latitude) / (1.0 - sin_latitude)).ln()
    }

    /// Inverse of [`Self::geodetic_latitude_to_mercator_angle`].
    pub fn mercator_angle_to_geodetic_latitude(angle: f64) -> f64 {
        FRAC_PI_2 - 2.0 * (-angle).exp().atan()
    }

    /// Projects longitude/latitude in radians.
    pub fn project(&self, longitude: f64, latitude: f64) -> (f64, f64) {
        let semimajor = self.ellipsoid.maximum_radius();
        (
            longitude * semimajor,
            Self::geodetic_latitude_to_mercator_angle(latitude) * semimajor,
        )
    }
}

impl Default for WebMercatorProjection {
    fn default() -> Self {
        Self::new(Ellipsoid::WGS84)
    }
}

/// The projection an overlay is tiled in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Equirectangular, two root tiles side by side.
    Geographic(GeographicProjection),
    /// Web Mercator, one square root tile.
    WebMercator(WebMercatorProjection),
}

impl Projection {
    /// Geographic projection on the given ellipsoid.
    pub fn geographic(ellipsoid: Ellipsoid) -> Self {
        Projection::Geographic(GeographicProjection::new(ellipsoid))
    }

    /// Web Mercator projection on the given ellipsoid.
    pub fn web_mercator(ellipsoid: Ellipsoid) -> Self {
        Projection::WebMercator(WebMercatorProjection::new(ellipsoid))
    }

    pub fn kind(&self) -> ProjectionKind {
        match self {
            Projection::Geographic(_) => ProjectionKind::Geographic,
            Projection::WebMercator(_) => ProjectionKind::WebMercator,
        }
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        match self {
            Projection::Geographic(p) => p.ellipsoid(),
            Projection::WebMercator(p) => p.ellipsoid(),
        }
    }

    /// Number of root tile columns of the global tiling convention.
    pub fn root_tiles_x(&self) -> u32 {
        match self {
            Projection::Geographic(_) => 2,
            Projection::WebMercator(_) => 1,
        }
    }

    /// Largest globe extent the projection can represent.
    pub fn maximum_globe_rectangle(&self) -> GlobeRectangle {
        match self {
            Projection::Geographic(_) => GeographicProjection::MAXIMUM_GLOBE_RECTANGLE,
            Projection::WebMercator(_) => WebMercatorProjection::MAXIMUM_GLOBE_RECTANGLE,
        }
    }

    /// Projects longitude/latitude in radians.
    pub fn project(&self, longitude: f64, latitude: f64) -> (f64, f64) {
        match self {
            Projection::Geographic(p) => p.project(longitude, latitude),
            Projection::WebMercator(p) => p.project(longitude, latitude),
        }
    }

    /// Projects the south-west and north-east corners of a globe rectangle.
    pub fn project_rectangle_simple(&self, rectangle: &GlobeRectangle) -> Rectangle {
        let (minimum_x, minimum_y) = self.project(rectangle.west, rectangle.south);
        let (maximum_x, maximum_y) = self.project(rectangle.east, rectangle.north);
        Rectangle::new(minimum_x, minimum_y, maximum_x, maximum_y)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Projection::Geographic(GeographicProjection::default())
    }
}

/// The two supported projection kinds, without parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectionKind {
    Geographic,
    WebMercator,
}

impl ProjectionKind {
    /// Instantiates the projection on an ellipsoid.
    pub fn with_ellipsoid(self, ellipsoid: Ellipsoid) -> Projection {
        match self {
            ProjectionKind::Geographic => Projection::geographic(ellipsoid),
            ProjectionKind::WebMercator => Projection::web_mercator(ellipsoid),
        }
    }
}

impl fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionKind::Geographic => write!(f, "geographic"),
            ProjectionKind::WebMercator => write!(f, "web_mercator"),
        }
    }
}

/// A projection name that names neither supported kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported projection '{0}': expected geographic (EPSG:4326) or web_mercator (EPSG:3857)")]
pub struct UnsupportedProjection(pub String);

impl FromStr for ProjectionKind {
    type Err = UnsupportedProjection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "geographic" | "wgs84" | "epsg:4326" | "crs:84" => Ok(ProjectionKind::Geographic),
            "web_mercator" | "webmercator" | "mercator" | "epsg:3857" | "epsg:900913" => {
                Ok(ProjectionKind::WebMercator)
            }
            _ => Err(UnsupportedProjection(s.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_tiles_per_kind() {
        assert_eq!(Projection::default().root_tiles_x(), 2);
        assert_eq!(Projection::web_mercator(Ellipsoid::WGS84).root_tiles_x(), 1);
    }

    #[test]
    fn test_geographic_projects_whole_globe() {
        let projection = Projection::geographic(Ellipsoid::UNIT_SPHERE);
        let rect =
            projection.project_rectangle_simple(&GeographicProjection::MAXIMUM_GLOBE_RECTANGLE);
        assert!((rect.minimum_x + PI).abs() < 1e-12);
        assert!((rect.maximum_y - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_web_mercator_extent_is_square() {
        let projection = Projection::web_mercator(Ellipsoid::WGS84);
        let rect =
            projection.project_rectangle_simple(&WebMercatorProjection::MAXIMUM_GLOBE_RECTANGLE);
        assert!((rect.width() - rect.height()).abs() < 1e-3);
        assert!((rect.maximum_x - 20_037_508.342_789_244).abs() < 1e-3);
    }

    #[test]
    fn test_mercator_angle_roundtrip() {
        let latitude = 0.7;
        let angle = WebMercatorProjection::geodetic_latitude_to_mercator_angle(latitude);
        let back = WebMercatorProjection::mercator_angle_to_geodetic_latitude(angle);
        assert!((back - latitude).abs() < 1e-12);
    }

    #[test]
    fn test_maximum_latitude_maps_to_pi() {
        let angle = WebMercatorProjection::geodetic_latitude_to_mercator_angle(
            WebMercatorProjection::MAXIMUM_LATITUDE,
        );
        assert!((angle - PI).abs() < 1e-9);
    }

    #[test]
    fn test_parse_projection_kind() {
        assert_eq!(
            "EPSG:4326".parse::<ProjectionKind>(),
            Ok(ProjectionKind::Geographic)
        );
        assert_eq!(
            " web_mercator ".parse::<ProjectionKind>(),
            Ok(ProjectionKind::WebMercator)
        );
        assert_eq!(
            "EPSG:2056".parse::<ProjectionKind>(),
            Err(UnsupportedProjection("EPSG:2056".to_string()))
        );
    }

    #[test]
    fn test_kind_roundtrips_through_display() {
        for kind in [ProjectionKind::Geographic, ProjectionKind::WebMercator] {
            assert_eq!(kind.to_string().parse::<ProjectionKind>(), Ok(kind));
        }
    }
}
