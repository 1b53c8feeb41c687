//! Spherical, cubic and planar tile coordinates.
//!
//! All three are plain values: every conversion or navigation step returns
//! a new value and nothing is mutated in place.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use serde::{Deserialize, Serialize};

use crate::planar::{check_local, unpack_y};
use crate::{CoordError, FaceSide};

/// A point on the unit sphere of a planetoid at a zoom level.
///
/// Angles are radians. Longitude is conventionally in `[-π, π]` but
/// `[0, 2π)` is accepted; latitude is in `[-π/2, π/2]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphericalCoordinate {
    pub planetoid_id: i32,
    pub longitude: f64,
    pub latitude: f64,
    /// Zoom 0 covers a whole face with a single tile.
    pub zoom: i16,
}

impl SphericalCoordinate {
    #[must_use]
    pub fn new(planetoid_id: i32, longitude: f64, latitude: f64, zoom: i16) -> Self {
        Self {
            planetoid_id,
            longitude,
            latitude,
            zoom,
        }
    }

    /// Construct from degrees.
    #[must_use]
    pub fn from_degrees(planetoid_id: i32, longitude: f64, latitude: f64, zoom: i16) -> Self {
        Self::new(planetoid_id, longitude.to_radians(), latitude.to_radians(), zoom)
    }

    /// `(longitude, latitude)` in degrees.
    #[must_use]
    pub fn to_degrees(&self) -> (f64, f64) {
        (self.longitude.to_degrees(), self.latitude.to_degrees())
    }

    /// `(longitude, latitude)` in radians as a corner point.
    #[must_use]
    pub fn to_geo_point(&self) -> GeoPoint {
        GeoPoint::new(self.longitude, self.latitude)
    }

    /// Validate the angles and return the longitude wrapped into `[-π, π]`.
    pub fn normalized_longitude(&self) -> Result<f64, CoordError> {
        let (lon, lat) = (self.longitude, self.latitude);
        if !lat.is_finite() || !(-FRAC_PI_2..=FRAC_PI_2).contains(&lat) {
            return Err(CoordError::InvalidCoordinate(format!(
                "latitude {lat} is outside [-π/2, π/2]"
            )));
        }
        if !lon.is_finite() || !(-PI..=TAU).contains(&lon) {
            return Err(CoordError::InvalidCoordinate(format!(
                "longitude {lon} is outside [-π, 2π]"
            )));
        }
        Ok(if lon > PI { lon - TAU } else { lon })
    }
}

impl std::fmt::Display for SphericalCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "P={}, Zoom={}, Lat={}, Lon={}",
            self.planetoid_id, self.zoom, self.latitude, self.longitude
        )
    }
}

/// A point on one cube face, `x` and `y` in `[-1, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubicCoordinate {
    pub planetoid_id: i32,
    pub face: FaceSide,
    pub z: i16,
    pub x: f64,
    pub y: f64,
}

impl CubicCoordinate {
    #[must_use]
    pub fn new(planetoid_id: i32, face: FaceSide, z: i16, x: f64, y: f64) -> Self {
        Self {
            planetoid_id,
            face,
            z,
            x,
            y,
        }
    }

    /// Same face and zoom at different local coordinates.
    #[must_use]
    pub fn with_xy(&self, x: f64, y: f64) -> Self {
        Self { x, y, ..*self }
    }

    /// Check that `x` and `y` lie on the face.
    pub fn validate(&self) -> Result<(), CoordError> {
        check_local("x", self.x)?;
        check_local("y", self.y)
    }
}

impl std::fmt::Display for CubicCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "P={}, F={}, Z={}, X={}, Y={}",
            self.planetoid_id,
            self.face.index(),
            self.z,
            self.x,
            self.y
        )
    }
}

/// Integer tile key: `x` is the column, `y` packs `row * 6 + face`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlanarCoordinate {
    pub planetoid_id: i32,
    pub z: i16,
    pub x: i64,
    pub y: i64,
}

impl PlanarCoordinate {
    #[must_use]
    pub fn new(planetoid_id: i32, z: i16, x: i64, y: i64) -> Self {
        Self {
            planetoid_id,
            z,
            x,
            y,
        }
    }

    /// The face packed into `y`.
    #[must_use]
    pub fn face(&self) -> FaceSide {
        unpack_y(self.y).1
    }

    /// The row within the face packed into `y`.
    #[must_use]
    pub fn row(&self) -> i64 {
        unpack_y(self.y).0
    }
}

impl std::fmt::Display for PlanarCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "P={}, Z={}, X={}, Y={}",
            self.planetoid_id, self.z, self.x, self.y
        )
    }
}

/// A longitude/latitude pair in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    #[must_use]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// `(lon, lat)` in degrees.
    #[must_use]
    pub fn to_degrees(&self) -> (f64, f64) {
        (self.lon.to_degrees(), self.lat.to_degrees())
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "X={}, Y={}", self.lon, self.lat)
    }
}
