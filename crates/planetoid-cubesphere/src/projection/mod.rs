//! Sphere-to-cube projection strategies.
//!
//! Two interchangeable strategies are provided:
//! - **QSC**: the quadrilateralized spherical cube, closed-form in both
//!   directions.
//! - **Tangential**: gnomonic projection followed by a polynomial distortion
//!   correction; its inverse is a second polynomial, so round trips carry a
//!   small residual (about `2.5e-4` rad at worst).
//!
//! The strategies agree on which face a point lies on and on each face's
//! local axes (see [`FaceSide::tangent`] and [`FaceSide::bitangent`]), but
//! not on where tile boundaries fall inside a face.

mod qsc;
mod tangential;

use std::f64::consts::{PI, TAU};
use std::str::FromStr;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::planar::{check_local, dequantize, quantize};
use crate::{
    BoundingBoxCoordinate, CoordError, CoordinateMapping, CubicCoordinate, FaceSide,
    UnknownProjection,
};

pub use qsc::QscProjection;
pub use tangential::TangentialProjection;

/// A spherical ↔ cube-face mapping.
///
/// Implementations are stateless and may be shared between threads.
pub trait CubeProjection: Send + Sync {
    /// Short name used in logs and configuration.
    fn name(&self) -> &'static str;

    /// Project `(lon, lat)` in radians onto a face.
    ///
    /// Longitude may be given in `[-π, 2π]`; latitude must be in
    /// `[-π/2, π/2]`. Returned `x` and `y` are in `[-1, 1]`.
    fn forward(&self, lon: f64, lat: f64) -> (FaceSide, f64, f64);

    /// Recover `(lon, lat)` from face-local `x`, `y` in `[-1, 1]`.
    ///
    /// The returned longitude is in `[-π, π]`.
    fn inverse(&self, face: FaceSide, x: f64, y: f64) -> (f64, f64);

    /// Corner points of the tile containing `tile`.
    ///
    /// The tile is snapped to its reference corner `(x0, y0)`, the corner
    /// with the lowest local coordinates. With `s` the tile size the corners
    /// are `(x0, y0)`, `(x0, y0 + s)`, `(x0 + s, y0 + s)` and `(x0 + s, y0)`,
    /// each converted back to the sphere through `mapping`.
    fn to_bounding_box(
        &self,
        tile: &CubicCoordinate,
        mapping: &CoordinateMapping,
    ) -> Result<BoundingBoxCoordinate, CoordError> {
        check_local("x", tile.x)?;
        check_local("y", tile.y)?;
        let s = mapping.tile_size_cubic(tile.z)?;
        let x0 = dequantize(quantize(tile.x, tile.z)?, tile.z)?;
        let y0 = dequantize(quantize(tile.y, tile.z)?, tile.z)?;

        let corner = |x: f64, y: f64| {
            mapping
                .cubic_to_spherical(&tile.with_xy(x, y))
                .map(|c| c.to_geo_point())
        };

        Ok(BoundingBoxCoordinate {
            planetoid_id: tile.planetoid_id,
            lower_left: corner(x0, y0)?,
            upper_left: corner(x0, y0 + s)?,
            upper_right: corner(x0 + s, y0 + s)?,
            lower_right: corner(x0 + s, y0)?,
        })
    }
}

/// Selects a projection strategy by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionKind {
    /// Quadrilateralized spherical cube.
    #[default]
    Qsc,
    /// Gnomonic projection with polynomial distortion correction.
    Tangential,
}

impl ProjectionKind {
    /// Instantiate the strategy.
    #[must_use]
    pub fn build(self) -> Box<dyn CubeProjection> {
        match self {
            ProjectionKind::Qsc => Box::new(QscProjection),
            ProjectionKind::Tangential => Box::new(TangentialProjection),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectionKind::Qsc => "qsc",
            ProjectionKind::Tangential => "tangential",
        }
    }
}

impl FromStr for ProjectionKind {
    type Err = UnknownProjection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "qsc" => Ok(ProjectionKind::Qsc),
            "tangential" | "tan" => Ok(ProjectionKind::Tangential),
            _ => Err(UnknownProjection(s.to_string())),
        }
    }
}

impl std::fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit direction for `(lon, lat)`: `+X` at (0, 0), `+Y` at (π/2, 0),
/// `+Z` at the north pole.
#[must_use]
pub(crate) fn direction(lon: f64, lat: f64) -> DVec3 {
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();
    DVec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
}

/// The face whose outward axis has the largest component of `dir`.
///
/// Ties are broken in the order Top, Bottom, Front, Right, Left, Back.
#[must_use]
pub fn dominant_face(dir: DVec3) -> FaceSide {
    let candidates = [
        (FaceSide::Top, dir.z),
        (FaceSide::Bottom, -dir.z),
        (FaceSide::Front, dir.x),
        (FaceSide::Right, dir.y),
        (FaceSide::Left, -dir.y),
        (FaceSide::Back, -dir.x),
    ];
    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.1 > best.1 {
            best = *candidate;
        }
    }
    best.0
}

/// Wrap a longitude into `[-π, π]`. Values already in range are untouched.
#[must_use]
pub(crate) fn wrap_longitude(lon: f64) -> f64 {
    if (-PI..=PI).contains(&lon) {
        lon
    } else {
        (lon + PI).rem_euclid(TAU) - PI
    }
}

/// Pull a face-local value that overshot `±1` by rounding back onto the face.
#[inline]
#[must_use]
pub(crate) fn snap_unit(v: f64) -> f64 {
    v.clamp(-1.0, 1.0)
}
