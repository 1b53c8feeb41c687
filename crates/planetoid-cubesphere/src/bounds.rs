//! Tile extents on the sphere: four-corner boxes and their axis-aligned hulls.

use serde::{Deserialize, Serialize};

use crate::GeoPoint;

/// The four corners of one tile, in radians.
///
/// The quadrilateral is generally not axis-aligned in longitude/latitude;
/// tiles near cube edges are skewed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBoxCoordinate {
    pub planetoid_id: i32,
    /// The tile's reference corner: lowest local `x` and `y`.
    pub lower_left: GeoPoint,
    /// One tile up from the reference corner.
    pub upper_left: GeoPoint,
    /// Diagonally opposite the reference corner.
    pub upper_right: GeoPoint,
    /// One tile right of the reference corner.
    pub lower_right: GeoPoint,
}

impl BoundingBoxCoordinate {
    /// Corners in the order lower left, upper left, upper right, lower right.
    #[must_use]
    pub fn corners(&self) -> [GeoPoint; 4] {
        [
            self.lower_left,
            self.upper_left,
            self.upper_right,
            self.lower_right,
        ]
    }
}

impl std::fmt::Display for BoundingBoxCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "P={}, LoLeft={}, UpLeft={}, UpRight={}, LoRight={}",
            self.planetoid_id, self.lower_left, self.upper_left, self.upper_right, self.lower_right
        )
    }
}

/// Longitude/latitude envelope of a tile, in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisAlignedBoundingBox {
    pub planetoid_id: i32,
    pub min_longitude: f64,
    pub max_longitude: f64,
    pub min_latitude: f64,
    pub max_latitude: f64,
}

impl AxisAlignedBoundingBox {
    /// Corners in the order lower left, upper left, upper right, lower right.
    #[must_use]
    pub fn corners(&self) -> [GeoPoint; 4] {
        [
            GeoPoint::new(self.min_longitude, self.min_latitude),
            GeoPoint::new(self.min_longitude, self.max_latitude),
            GeoPoint::new(self.max_longitude, self.max_latitude),
            GeoPoint::new(self.max_longitude, self.min_latitude),
        ]
    }

    /// `(min_lon, min_lat, max_lon, max_lat)` in degrees, for query layers
    /// that filter in degrees.
    #[must_use]
    pub fn to_degrees(&self) -> (f64, f64, f64, f64) {
        (
            self.min_longitude.to_degrees(),
            self.min_latitude.to_degrees(),
            self.max_longitude.to_degrees(),
            self.max_latitude.to_degrees(),
        )
    }

    /// Whether `point` lies inside or on the envelope.
    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        point.lon >= self.min_longitude
            && point.lon <= self.max_longitude
            && point.lat >= self.min_latitude
            && point.lat <= self.max_latitude
    }
}

impl From<&BoundingBoxCoordinate> for AxisAlignedBoundingBox {
    fn from(bbox: &BoundingBoxCoordinate) -> Self {
        let corners = bbox.corners();
        let mut aabb = Self {
            planetoid_id: bbox.planetoid_id,
            min_longitude: f64::MAX,
            max_longitude: f64::MIN,
            min_latitude: f64::MAX,
            max_latitude: f64::MIN,
        };
        for corner in corners {
            aabb.min_longitude = aabb.min_longitude.min(corner.lon);
            aabb.max_longitude = aabb.max_longitude.max(corner.lon);
            aabb.min_latitude = aabb.min_latitude.min(corner.lat);
            aabb.max_latitude = aabb.max_latitude.max(corner.lat);
        }
        aabb
    }
}

impl std::fmt::Display for AxisAlignedBoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (min_lon, min_lat, max_lon, max_lat) = self.to_degrees();
        write!(f, "({min_lat},{min_lon},{max_lat},{max_lon})")
    }
}
