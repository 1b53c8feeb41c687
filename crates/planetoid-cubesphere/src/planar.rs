//! Tile-grid arithmetic: tile counts, sizes, quantisation and face packing.
//!
//! A face at zoom `z` is divided into `2^z × 2^z` tiles. Local cube
//! coordinates in `[-1, 1]` quantise to integer column/row indices in
//! `[0, 2^z)`, and the planar `y` key packs the row together with the face
//! as `row * 6 + face`.

use std::f64::consts::PI;

use crate::{CoordError, FaceSide};

/// Largest supported zoom.
///
/// Tile centres `(i + 0.5) / 2^z * 2 - 1` stay exactly representable in
/// `f64` and `row * 6 + 5` fits in `i64` up to this level. This bounds the
/// cube and planar arithmetic only.
///
/// Spherical coordinates run out of precision much earlier. A zoom-`z` tile
/// spans roughly `π / 2^(z + 1)` rad, while an `f64` longitude near `±π`
/// resolves about `4.4e-16` rad, so at the deepest zooms a tile is only a
/// few longitude steps wide and neighbouring tiles near the antimeridian or
/// the poles can share one spherical point. Tiles stay distinct
/// through zoom 30; cap deeper spherical work with
/// [`CoordinateMapping::with_max_zoom`](crate::CoordinateMapping::with_max_zoom).
pub const MAX_ZOOM: i16 = 51;

/// Number of faces packed into a planar `y` key.
pub const FACE_COUNT: i64 = 6;

/// Check that `zoom` is in `0..=max_zoom` (and never above [`MAX_ZOOM`]).
pub fn check_zoom(zoom: i16, max_zoom: i16) -> Result<(), CoordError> {
    if zoom < 0 || zoom > max_zoom.min(MAX_ZOOM) {
        return Err(CoordError::ArithmeticOverflow(zoom));
    }
    Ok(())
}

/// Number of tiles along one face axis at `zoom`.
pub fn tile_count(zoom: i16) -> Result<i64, CoordError> {
    check_zoom(zoom, MAX_ZOOM)?;
    Ok(1_i64 << zoom)
}

/// Width of one tile in local cube units: `2 / 2^zoom`.
pub fn tile_size_cubic(zoom: i16) -> Result<f64, CoordError> {
    Ok(2.0 / tile_count(zoom)? as f64)
}

/// Approximate angular width of a tile: `π / 2^(zoom + 1)`.
///
/// Four faces span the equator, so this is exact only on the equator at
/// face centres. Use it as a size hint, not as a tile's true extent.
pub fn spherical_tile_size_radians(zoom: i16) -> Result<f64, CoordError> {
    Ok(PI / (2 * tile_count(zoom)?) as f64)
}

/// Check that a local cube coordinate is finite and inside `[-1, 1]`.
pub fn check_local(name: &str, v: f64) -> Result<(), CoordError> {
    if !v.is_finite() || !(-1.0..=1.0).contains(&v) {
        return Err(CoordError::InvalidCoordinate(format!(
            "{name}={v} is outside [-1, 1]"
        )));
    }
    Ok(())
}

/// Index of the tile containing local coordinate `v` at `zoom`.
///
/// `v = 1` belongs to the last tile so closed face edges stay addressable.
pub fn quantize(v: f64, zoom: i16) -> Result<i64, CoordError> {
    check_local("v", v)?;
    let count = tile_count(zoom)?;
    let index = ((v + 1.0) * 0.5 * count as f64).floor() as i64;
    Ok(index.min(count - 1))
}

/// Local coordinate of the lower edge of tile `index` at `zoom`.
pub fn dequantize(index: i64, zoom: i16) -> Result<f64, CoordError> {
    let count = tile_count(zoom)?;
    if !(0..count).contains(&index) {
        return Err(CoordError::InvalidCoordinate(format!(
            "tile index {index} is outside [0, {count})"
        )));
    }
    Ok(index as f64 / count as f64 * 2.0 - 1.0)
}

/// Local coordinate of the centre of the tile containing `v`.
pub fn tile_center(v: f64, zoom: i16) -> Result<f64, CoordError> {
    let index = quantize(v, zoom)?;
    let count = tile_count(zoom)? as f64;
    Ok((index as f64 + 0.5) / count * 2.0 - 1.0)
}

/// Pack a row and face into a planar `y` key.
#[must_use]
pub fn pack_y(row: i64, face: FaceSide) -> i64 {
    row * FACE_COUNT + face.index()
}

/// Split a planar `y` key into `(row, face)`.
///
/// # Panics
///
/// Panics only if `rem_euclid(6)` leaves `0..6`, which cannot happen.
#[must_use]
pub fn unpack_y(y: i64) -> (i64, FaceSide) {
    let face_index = y.rem_euclid(FACE_COUNT);
    let face = match FaceSide::from_index(face_index) {
        Some(face) => face,
        None => unreachable!("rem_euclid(6) produced {face_index}"),
    };
    ((y - face_index) / FACE_COUNT, face)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_count_doubles_per_zoom() {
        assert_eq!(tile_count(0).unwrap(), 1);
        assert_eq!(tile_count(1).unwrap(), 2);
        assert_eq!(tile_count(10).unwrap(), 1024);
        assert_eq!(tile_count(30).unwrap(), 1 << 30);
    }

    #[test]
    fn test_zoom_overflow_is_rejected() {
        assert_eq!(tile_count(-1), Err(CoordError::ArithmeticOverflow(-1)));
        assert_eq!(
            tile_count(MAX_ZOOM + 1),
            Err(CoordError::ArithmeticOverflow(MAX_ZOOM + 1))
        );
        assert!(tile_count(MAX_ZOOM).is_ok());
        assert_eq!(check_zoom(12, 10), Err(CoordError::ArithmeticOverflow(12)));
    }

    #[test]
    fn test_tile_sizes() {
        assert_eq!(tile_size_cubic(0).unwrap(), 2.0);
        assert_eq!(tile_size_cubic(4).unwrap(), 0.125);
        assert!((spherical_tile_size_radians(0).unwrap() - PI / 2.0).abs() < 1e-15);
        assert!((spherical_tile_size_radians(3).unwrap() - PI / 16.0).abs() < 1e-15);
    }

    #[test]
    fn test_quantize_face_edges() {
        assert_eq!(quantize(-1.0, 4).unwrap(), 0);
        assert_eq!(quantize(0.0, 4).unwrap(), 8);
        assert_eq!(quantize(1.0, 4).unwrap(), 15);
        assert_eq!(quantize(1.0, 0).unwrap(), 0);
    }

    #[test]
    fn test_quantize_rejects_out_of_range() {
        assert!(matches!(
            quantize(1.0000001, 4),
            Err(CoordError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            quantize(f64::NAN, 4),
            Err(CoordError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn test_dequantize_inverts_quantize() {
        for zoom in [0, 1, 5, 10, 20, 30, MAX_ZOOM] {
            let count = tile_count(zoom).unwrap();
            for index in [0, count / 3, count / 2, count - 1] {
                let v = dequantize(index, zoom).unwrap();
                assert_eq!(quantize(v, zoom).unwrap(), index, "zoom {zoom} index {index}");
            }
        }
        assert!(dequantize(16, 4).is_err());
        assert!(dequantize(-1, 4).is_err());
    }

    #[test]
    fn test_tile_center_is_inside_tile() {
        let zoom = 3;
        let size = tile_size_cubic(zoom).unwrap();
        let corner = dequantize(5, zoom).unwrap();
        let center = tile_center(corner, zoom).unwrap();
        assert_eq!(center, corner + size * 0.5);
        assert_eq!(tile_center(1.0, zoom).unwrap(), 1.0 - size * 0.5);
    }

    #[test]
    fn test_pack_unpack() {
        for face in FaceSide::ALL {
            for row in [0_i64, 1, 7, 1 << 40] {
                let y = pack_y(row, face);
                assert_eq!(unpack_y(y), (row, face));
            }
        }
        assert_eq!(pack_y(8, FaceSide::Front), 48);
        assert_eq!(pack_y(3, FaceSide::Bottom), 23);
    }
}
