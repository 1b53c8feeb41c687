//! The coordinate mapping service.
//!
//! [`CoordinateMapping`] ties a [`CubeProjection`] to the tile grid: it
//! converts between spherical, cubic and planar coordinates, sizes tiles,
//! finds neighbouring tiles and derives bounding boxes. Every method is a
//! pure function of its arguments and the configured strategy, so a single
//! mapping can be shared freely between threads.

use tracing::debug;

use crate::navigation::{self, RelativeTileDirection};
use crate::planar::{
    self, MAX_ZOOM, check_zoom, dequantize, pack_y, quantize, tile_center, unpack_y,
};
use crate::projection::{CubeProjection, ProjectionKind};
use crate::{
    AxisAlignedBoundingBox, BoundingBoxCoordinate, CoordError, CubicCoordinate, PlanarCoordinate,
    SphericalCoordinate,
};

/// Converts between coordinate representations with one projection strategy.
pub struct CoordinateMapping {
    projection: Box<dyn CubeProjection>,
    max_zoom: i16,
}

impl CoordinateMapping {
    /// Mapping over every supported zoom.
    #[must_use]
    pub fn new(projection: Box<dyn CubeProjection>) -> Self {
        debug!(projection = projection.name(), max_zoom = MAX_ZOOM, "coordinate mapping ready");
        Self {
            projection,
            max_zoom: MAX_ZOOM,
        }
    }

    /// Mapping that rejects zooms above `max_zoom`.
    pub fn with_max_zoom(
        projection: Box<dyn CubeProjection>,
        max_zoom: i16,
    ) -> Result<Self, CoordError> {
        check_zoom(max_zoom, MAX_ZOOM)?;
        debug!(projection = projection.name(), max_zoom, "coordinate mapping ready");
        Ok(Self {
            projection,
            max_zoom,
        })
    }

    #[must_use]
    pub fn from_kind(kind: ProjectionKind) -> Self {
        Self::new(kind.build())
    }

    #[must_use]
    pub fn projection(&self) -> &dyn CubeProjection {
        self.projection.as_ref()
    }

    #[must_use]
    pub fn max_zoom(&self) -> i16 {
        self.max_zoom
    }

    fn check_zoom(&self, zoom: i16) -> Result<(), CoordError> {
        check_zoom(zoom, self.max_zoom)
    }

    // -- conversions --

    pub fn spherical_to_cubic(
        &self,
        coord: &SphericalCoordinate,
    ) -> Result<CubicCoordinate, CoordError> {
        self.check_zoom(coord.zoom)?;
        let lon = coord.normalized_longitude()?;
        let (face, x, y) = self.projection.forward(lon, coord.latitude);
        Ok(CubicCoordinate::new(coord.planetoid_id, face, coord.zoom, x, y))
    }

    /// Reference corner of a planar tile. No projection is involved.
    pub fn planar_to_cubic(&self, coord: &PlanarCoordinate) -> Result<CubicCoordinate, CoordError> {
        self.check_zoom(coord.z)?;
        if coord.y < 0 {
            return Err(CoordError::InvalidCoordinate(format!(
                "planar y {} is negative",
                coord.y
            )));
        }
        let (row, face) = unpack_y(coord.y);
        let x = dequantize(coord.x, coord.z)?;
        let y = dequantize(row, coord.z)?;
        Ok(CubicCoordinate::new(coord.planetoid_id, face, coord.z, x, y))
    }

    pub fn cubic_to_planar(&self, coord: &CubicCoordinate) -> Result<PlanarCoordinate, CoordError> {
        self.check_zoom(coord.z)?;
        let column = quantize(coord.x, coord.z)?;
        let row = quantize(coord.y, coord.z)?;
        Ok(PlanarCoordinate::new(
            coord.planetoid_id,
            coord.z,
            column,
            pack_y(row, coord.face),
        ))
    }

    pub fn spherical_to_planar(
        &self,
        coord: &SphericalCoordinate,
    ) -> Result<PlanarCoordinate, CoordError> {
        self.cubic_to_planar(&self.spherical_to_cubic(coord)?)
    }

    pub fn cubic_to_spherical(
        &self,
        coord: &CubicCoordinate,
    ) -> Result<SphericalCoordinate, CoordError> {
        self.check_zoom(coord.z)?;
        coord.validate()?;
        let (lon, lat) = self.projection.inverse(coord.face, coord.x, coord.y);
        Ok(SphericalCoordinate::new(coord.planetoid_id, lon, lat, coord.z))
    }

    /// Spherical position of a planar tile's reference corner.
    pub fn planar_to_spherical(
        &self,
        coord: &PlanarCoordinate,
    ) -> Result<SphericalCoordinate, CoordError> {
        self.cubic_to_spherical(&self.planar_to_cubic(coord)?)
    }

    // -- tile sizes --

    /// Tile width in face-local units: `2 / 2^zoom`.
    pub fn tile_size_cubic(&self, zoom: i16) -> Result<f64, CoordError> {
        self.check_zoom(zoom)?;
        planar::tile_size_cubic(zoom)
    }

    /// Coarse angular tile size `π / 2^(zoom + 1)`. Real tiles near cube
    /// corners are smaller.
    pub fn spherical_tile_size_radians(&self, zoom: i16) -> Result<f64, CoordError> {
        self.check_zoom(zoom)?;
        planar::spherical_tile_size_radians(zoom)
    }

    // -- relative tiles --

    /// Centre of the tile one step from `coord` in `direction`.
    ///
    /// `Current` returns `coord` unchanged. Any other direction snaps to the
    /// centre of `coord`'s tile before stepping.
    pub fn relative_cubic(
        &self,
        coord: &CubicCoordinate,
        direction: RelativeTileDirection,
    ) -> Result<CubicCoordinate, CoordError> {
        self.check_zoom(coord.z)?;
        coord.validate()?;
        if direction == RelativeTileDirection::Current {
            return Ok(*coord);
        }
        let moved = self.step_from_centre(coord, direction)?;
        Ok(CubicCoordinate::new(
            coord.planetoid_id,
            moved.face,
            coord.z,
            moved.x,
            moved.y,
        ))
    }

    /// Spherical centre of the tile one step from `coord` in `direction`.
    pub fn relative_spherical(
        &self,
        coord: &SphericalCoordinate,
        direction: RelativeTileDirection,
    ) -> Result<SphericalCoordinate, CoordError> {
        if direction == RelativeTileDirection::Current {
            self.check_zoom(coord.zoom)?;
            coord.normalized_longitude()?;
            return Ok(*coord);
        }
        let cubic = self.spherical_to_cubic(coord)?;
        let moved = self.relative_cubic(&cubic, direction)?;
        self.cubic_to_spherical(&moved)
    }

    /// The planar tile one step from `coord` in `direction`.
    pub fn relative_planar(
        &self,
        coord: &PlanarCoordinate,
        direction: RelativeTileDirection,
    ) -> Result<PlanarCoordinate, CoordError> {
        let cubic = self.planar_to_cubic(coord)?;
        if direction == RelativeTileDirection::Current {
            return Ok(*coord);
        }
        let moved = self.relative_cubic(&cubic, direction)?;
        self.cubic_to_planar(&moved)
    }

    /// The four edge neighbours of a tile, in Up, Down, Left, Right order.
    ///
    /// At zoom 0 a face has a single tile and the four neighbours are the
    /// four adjacent faces.
    pub fn neighbors(&self, coord: &PlanarCoordinate) -> Result<[PlanarCoordinate; 4], CoordError> {
        let [up, down, left, right] = RelativeTileDirection::ALL_MOVES;
        Ok([
            self.relative_planar(coord, up)?,
            self.relative_planar(coord, down)?,
            self.relative_planar(coord, left)?,
            self.relative_planar(coord, right)?,
        ])
    }

    /// Edge neighbours followed by diagonal neighbours, without duplicates.
    ///
    /// A diagonal is a vertical step followed by a horizontal one, with the
    /// horizontal direction turned by however much the vertical step
    /// rotated the frame. Around the eight cube corners only three faces
    /// meet, so a corner tile has seven distinct neighbours instead of eight.
    pub fn neighbors8(&self, coord: &PlanarCoordinate) -> Result<Vec<PlanarCoordinate>, CoordError> {
        let mut out: Vec<PlanarCoordinate> = self.neighbors(coord)?.to_vec();
        let origin = self.planar_to_cubic(coord)?;
        let s = self.tile_size_cubic(coord.z)?;

        for vertical in [RelativeTileDirection::Up, RelativeTileDirection::Down] {
            let first = self.step_from_centre(&origin, vertical)?;
            let turn = quarter_turn_delta(vertical, first.heading);
            for horizontal in [RelativeTileDirection::Left, RelativeTileDirection::Right] {
                let second =
                    navigation::step(first.face, first.x, first.y, s, horizontal.rotated(turn));
                let diagonal = self.cubic_to_planar(&CubicCoordinate::new(
                    coord.planetoid_id,
                    second.face,
                    coord.z,
                    second.x,
                    second.y,
                ))?;
                if diagonal != *coord && !out.contains(&diagonal) {
                    out.push(diagonal);
                }
            }
        }
        Ok(out)
    }

    fn step_from_centre(
        &self,
        coord: &CubicCoordinate,
        direction: RelativeTileDirection,
    ) -> Result<navigation::Step, CoordError> {
        let s = self.tile_size_cubic(coord.z)?;
        let cx = tile_center(coord.x, coord.z)?;
        let cy = tile_center(coord.y, coord.z)?;
        Ok(navigation::step(coord.face, cx, cy, s, direction))
    }

    // -- bounding boxes --

    pub fn cubic_bounding_box(
        &self,
        coord: &CubicCoordinate,
    ) -> Result<BoundingBoxCoordinate, CoordError> {
        self.check_zoom(coord.z)?;
        self.projection.to_bounding_box(coord, self)
    }

    pub fn spherical_bounding_box(
        &self,
        coord: &SphericalCoordinate,
    ) -> Result<BoundingBoxCoordinate, CoordError> {
        self.cubic_bounding_box(&self.spherical_to_cubic(coord)?)
    }

    pub fn planar_bounding_box(
        &self,
        coord: &PlanarCoordinate,
    ) -> Result<BoundingBoxCoordinate, CoordError> {
        self.cubic_bounding_box(&self.planar_to_cubic(coord)?)
    }

    pub fn spherical_aabb(
        &self,
        coord: &SphericalCoordinate,
    ) -> Result<AxisAlignedBoundingBox, CoordError> {
        Ok(self.bounding_box_aabb(&self.spherical_bounding_box(coord)?))
    }

    #[must_use]
    pub fn bounding_box_aabb(&self, bbox: &BoundingBoxCoordinate) -> AxisAlignedBoundingBox {
        AxisAlignedBoundingBox::from(bbox)
    }
}

impl Default for CoordinateMapping {
    fn default() -> Self {
        Self::from_kind(ProjectionKind::default())
    }
}

impl std::fmt::Debug for CoordinateMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoordinateMapping")
            .field("projection", &self.projection.name())
            .field("max_zoom", &self.max_zoom)
            .finish()
    }
}

/// Clockwise quarter turns taking `from` onto `to`.
fn quarter_turn_delta(from: RelativeTileDirection, to: RelativeTileDirection) -> u8 {
    match (from.quarter_turns(), to.quarter_turns()) {
        (Some(a), Some(b)) => (b + 4 - a) % 4,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FaceSide;
    use std::f64::consts::FRAC_PI_2;

    fn mappings() -> [CoordinateMapping; 2] {
        [
            CoordinateMapping::from_kind(ProjectionKind::Qsc),
            CoordinateMapping::from_kind(ProjectionKind::Tangential),
        ]
    }

    #[test]
    fn test_origin_scenario() {
        for mapping in mappings() {
            let sph = SphericalCoordinate::new(0, 0.0, 0.0, 4);
            let cubic = mapping.spherical_to_cubic(&sph).unwrap();
            assert_eq!(cubic.face, FaceSide::Front);
            assert!(cubic.x.abs() < 1e-12 && cubic.y.abs() < 1e-12);

            let planar = mapping.spherical_to_planar(&sph).unwrap();
            assert_eq!(planar, PlanarCoordinate::new(0, 4, 8, 48));
            assert_eq!(planar.face(), FaceSide::Front);
            assert_eq!(planar.row(), 8);
        }
    }

    #[test]
    fn test_planar_to_cubic_recovers_reference_corner() {
        let mapping = CoordinateMapping::default();
        let planar = PlanarCoordinate::new(9, 2, 3, 6 + 5);
        let cubic = mapping.planar_to_cubic(&planar).unwrap();
        assert_eq!(cubic, CubicCoordinate::new(9, FaceSide::Bottom, 2, 0.5, -0.5));
        assert_eq!(mapping.cubic_to_planar(&cubic).unwrap(), planar);
    }

    #[test]
    fn test_invalid_planar_is_rejected() {
        let mapping = CoordinateMapping::default();
        for bad in [
            PlanarCoordinate::new(0, 2, 4, 0),
            PlanarCoordinate::new(0, 2, -1, 0),
            PlanarCoordinate::new(0, 2, 0, 4 * 6),
            PlanarCoordinate::new(0, 2, 0, -3),
        ] {
            assert!(
                matches!(mapping.planar_to_cubic(&bad), Err(CoordError::InvalidCoordinate(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_zoom_ceiling() {
        let mapping = CoordinateMapping::with_max_zoom(ProjectionKind::Qsc.build(), 10).unwrap();
        assert_eq!(mapping.max_zoom(), 10);
        let sph = SphericalCoordinate::new(0, 0.1, 0.1, 11);
        assert_eq!(
            mapping.spherical_to_planar(&sph),
            Err(CoordError::ArithmeticOverflow(11))
        );
        assert_eq!(mapping.tile_size_cubic(11), Err(CoordError::ArithmeticOverflow(11)));
        assert!(mapping.tile_size_cubic(10).is_ok());

        assert!(matches!(
            CoordinateMapping::with_max_zoom(ProjectionKind::Qsc.build(), MAX_ZOOM + 1),
            Err(CoordError::ArithmeticOverflow(_))
        ));
    }

    #[test]
    fn test_out_of_range_input_is_rejected_not_clamped() {
        let mapping = CoordinateMapping::default();
        let sph = SphericalCoordinate::new(0, 0.0, FRAC_PI_2 + 0.01, 3);
        assert!(matches!(
            mapping.spherical_to_cubic(&sph),
            Err(CoordError::InvalidCoordinate(_))
        ));
        let cubic = CubicCoordinate::new(0, FaceSide::Front, 3, 1.2, 0.0);
        assert!(matches!(
            mapping.cubic_to_planar(&cubic),
            Err(CoordError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            mapping.cubic_to_spherical(&cubic),
            Err(CoordError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn test_relative_current_is_unchanged_copy() {
        let mapping = CoordinateMapping::default();
        let sph = SphericalCoordinate::new(1, 0.123, -0.456, 7);
        assert_eq!(
            mapping.relative_spherical(&sph, RelativeTileDirection::Current).unwrap(),
            sph
        );
        let cubic = CubicCoordinate::new(1, FaceSide::Left, 7, 0.3, 0.9);
        assert_eq!(
            mapping.relative_cubic(&cubic, RelativeTileDirection::Current).unwrap(),
            cubic
        );
        let planar = PlanarCoordinate::new(1, 7, 5, 6 * 100 + 3);
        assert_eq!(
            mapping.relative_planar(&planar, RelativeTileDirection::Current).unwrap(),
            planar
        );
    }

    #[test]
    fn test_relative_cubic_moves_one_tile() {
        let mapping = CoordinateMapping::default();
        // Zoom 2: tiles are 0.5 wide, centres at ±0.25 and ±0.75.
        let cubic = CubicCoordinate::new(0, FaceSide::Front, 2, 0.1, 0.1);
        let up = mapping.relative_cubic(&cubic, RelativeTileDirection::Up).unwrap();
        assert_eq!(up, CubicCoordinate::new(0, FaceSide::Front, 2, 0.25, 0.75));
        let over = mapping.relative_cubic(&up, RelativeTileDirection::Up).unwrap();
        assert_eq!(over, CubicCoordinate::new(0, FaceSide::Top, 2, 0.25, -0.75));
    }

    #[test]
    fn test_relative_planar_interior_and_seam() {
        let mapping = CoordinateMapping::default();
        let tile = PlanarCoordinate::new(0, 4, 8, 48);
        let right = mapping.relative_planar(&tile, RelativeTileDirection::Right).unwrap();
        assert_eq!(right, PlanarCoordinate::new(0, 4, 9, 48));

        // Last column of Front steps onto the first column of Right.
        let edge = PlanarCoordinate::new(0, 4, 15, 8 * 6);
        let across = mapping.relative_planar(&edge, RelativeTileDirection::Right).unwrap();
        assert_eq!(across, PlanarCoordinate::new(0, 4, 0, 8 * 6 + 1));
    }

    #[test]
    fn test_relative_spherical_returns_neighbour_centre() {
        for mapping in mappings() {
            let sph = SphericalCoordinate::new(0, 0.0, 0.0, 3);
            let east = mapping.relative_spherical(&sph, RelativeTileDirection::Right).unwrap();
            assert!(east.longitude > 0.0, "{east}");
            assert_eq!(east.zoom, 3);
            let planar = mapping.spherical_to_planar(&east).unwrap();
            let origin = mapping.spherical_to_planar(&sph).unwrap();
            let expected = mapping
                .relative_planar(&origin, RelativeTileDirection::Right)
                .unwrap();
            assert_eq!(planar, expected);
        }
    }

    #[test]
    fn test_neighbors_order_and_count() {
        let mapping = CoordinateMapping::default();
        let tile = PlanarCoordinate::new(0, 3, 4, 4 * 6);
        let [up, down, left, right] = mapping.neighbors(&tile).unwrap();
        assert_eq!(up, PlanarCoordinate::new(0, 3, 4, 5 * 6));
        assert_eq!(down, PlanarCoordinate::new(0, 3, 4, 3 * 6));
        assert_eq!(left, PlanarCoordinate::new(0, 3, 3, 4 * 6));
        assert_eq!(right, PlanarCoordinate::new(0, 3, 5, 4 * 6));

        let all = mapping.neighbors8(&tile).unwrap();
        assert_eq!(all.len(), 8);
        assert!(all.contains(&PlanarCoordinate::new(0, 3, 5, 5 * 6)));
        assert!(all.contains(&PlanarCoordinate::new(0, 3, 3, 3 * 6)));
    }

    #[test]
    fn test_neighbors8_at_cube_corner() {
        let mapping = CoordinateMapping::default();
        // Top-right tile of Front touches the Front/Right/Top corner.
        let tile = PlanarCoordinate::new(0, 2, 3, 3 * 6);
        let all = mapping.neighbors8(&tile).unwrap();
        assert_eq!(all.len(), 7, "{all:?}");
        assert!(!all.contains(&tile));
        let faces: Vec<FaceSide> = all.iter().map(PlanarCoordinate::face).collect();
        assert!(faces.contains(&FaceSide::Top));
        assert!(faces.contains(&FaceSide::Right));
    }

    #[test]
    fn test_zoom_zero_neighbors_are_adjacent_faces() {
        let mapping = CoordinateMapping::default();
        let front = PlanarCoordinate::new(0, 0, 0, FaceSide::Front.index());
        let faces: Vec<FaceSide> = mapping
            .neighbors(&front)
            .unwrap()
            .iter()
            .map(PlanarCoordinate::face)
            .collect();
        assert_eq!(
            faces,
            vec![FaceSide::Top, FaceSide::Bottom, FaceSide::Left, FaceSide::Right]
        );
        assert_eq!(mapping.neighbors8(&front).unwrap().len(), 4);
    }

    #[test]
    fn test_bounding_box_corner_order_is_pinned() {
        let mapping = CoordinateMapping::default();
        let cubic = CubicCoordinate::new(4, FaceSide::Front, 1, 0.3, 0.6);
        let bbox = mapping.cubic_bounding_box(&cubic).unwrap();
        assert_eq!(bbox.planetoid_id, 4);

        // Zoom 1, tile (1, 1) of Front: reference corner at the face centre.
        let projection = mapping.projection();
        let expect = |x: f64, y: f64| {
            let (lon, lat) = projection.inverse(FaceSide::Front, x, y);
            crate::GeoPoint::new(lon, lat)
        };
        assert_eq!(bbox.lower_left, expect(0.0, 0.0));
        assert_eq!(bbox.upper_left, expect(0.0, 1.0));
        assert_eq!(bbox.upper_right, expect(1.0, 1.0));
        assert_eq!(bbox.lower_right, expect(1.0, 0.0));

        assert!(bbox.upper_left.lat > bbox.lower_left.lat);
        assert!(bbox.lower_right.lon > bbox.lower_left.lon);
    }

    #[test]
    fn test_spherical_aabb_covers_point() {
        for mapping in mappings() {
            let sph = SphericalCoordinate::from_degrees(0, 37.5497, 47.0946, 9);
            let aabb = mapping.spherical_aabb(&sph).unwrap();
            assert!(aabb.min_longitude <= aabb.max_longitude);
            assert!(aabb.min_latitude <= aabb.max_latitude);
            let slack = 1e-3;
            assert!(
                sph.longitude >= aabb.min_longitude - slack
                    && sph.longitude <= aabb.max_longitude + slack
                    && sph.latitude >= aabb.min_latitude - slack
                    && sph.latitude <= aabb.max_latitude + slack,
                "{} not in {aabb}",
                mapping.projection().name()
            );
        }
    }
}
