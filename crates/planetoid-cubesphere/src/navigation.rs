//! One-tile steps across the cube, including the twelve face seams.
//!
//! A step that stays on the face just moves `x` or `y` by one tile. A step
//! that leaves the face is remapped onto the neighbouring face by one of 24
//! rules (6 faces × 4 edges). Each rule is an axis swap and/or sign flip plus
//! a translation by `±2`, so tile centres land exactly on tile centres.
//!
//! The rules assume `(x, y)` is a tile centre. A point on an exact tile
//! corner can land on the boundary of the wrong tile when a rule flips an
//! axis.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::FaceSide;

/// Direction of a relative-tile move in the current face's frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelativeTileDirection {
    /// No move.
    Current,
    /// Toward `+y`.
    Up,
    /// Toward `-y`.
    Down,
    /// Toward `-x`.
    Left,
    /// Toward `+x`.
    Right,
}

impl RelativeTileDirection {
    /// The four directions that actually move, in Up, Down, Left, Right order.
    pub const ALL_MOVES: [RelativeTileDirection; 4] = [
        RelativeTileDirection::Up,
        RelativeTileDirection::Down,
        RelativeTileDirection::Left,
        RelativeTileDirection::Right,
    ];

    #[must_use]
    pub fn opposite(self) -> RelativeTileDirection {
        match self {
            RelativeTileDirection::Current => RelativeTileDirection::Current,
            RelativeTileDirection::Up => RelativeTileDirection::Down,
            RelativeTileDirection::Down => RelativeTileDirection::Up,
            RelativeTileDirection::Left => RelativeTileDirection::Right,
            RelativeTileDirection::Right => RelativeTileDirection::Left,
        }
    }

    /// Clockwise quarter turns from `Up`, or `None` for `Current`.
    #[must_use]
    pub fn quarter_turns(self) -> Option<u8> {
        match self {
            RelativeTileDirection::Current => None,
            RelativeTileDirection::Up => Some(0),
            RelativeTileDirection::Right => Some(1),
            RelativeTileDirection::Down => Some(2),
            RelativeTileDirection::Left => Some(3),
        }
    }

    /// Rotate clockwise by `turns` quarter turns. `Current` stays put.
    #[must_use]
    pub fn rotated(self, turns: u8) -> RelativeTileDirection {
        let Some(start) = self.quarter_turns() else {
            return self;
        };
        match (start + turns % 4) % 4 {
            0 => RelativeTileDirection::Up,
            1 => RelativeTileDirection::Right,
            2 => RelativeTileDirection::Down,
            _ => RelativeTileDirection::Left,
        }
    }
}

impl std::fmt::Display for RelativeTileDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Result of a single step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub face: FaceSide,
    pub x: f64,
    pub y: f64,
    /// Direction of travel in the new face's frame. Equal to the requested
    /// direction unless a seam rotated the axes.
    pub heading: RelativeTileDirection,
}

/// Move one tile of size `tile_size` from `(x, y)` on `face`.
#[must_use]
pub fn step(
    face: FaceSide,
    x: f64,
    y: f64,
    tile_size: f64,
    direction: RelativeTileDirection,
) -> Step {
    use FaceSide as F;
    use RelativeTileDirection as D;

    let s = tile_size;
    let same_face = |x, y| Step {
        face,
        x,
        y,
        heading: direction,
    };

    match direction {
        D::Current => return same_face(x, y),
        D::Up if y + s <= 1.0 => return same_face(x, y + s),
        D::Down if y - s >= -1.0 => return same_face(x, y - s),
        D::Right if x + s <= 1.0 => return same_face(x + s, y),
        D::Left if x - s >= -1.0 => return same_face(x - s, y),
        _ => {}
    }

    let (to, nx, ny, heading) = match (face, direction) {
        (_, D::Current) => unreachable!("handled above"),

        (F::Top, D::Up) => (F::Back, -x, 2.0 - y - s, D::Down),
        (F::Top, D::Right) => (F::Right, y, 2.0 - x - s, D::Down),
        (F::Top, D::Down) => (F::Front, x, 2.0 + y - s, D::Down),
        (F::Top, D::Left) => (F::Left, -y, 2.0 + x - s, D::Down),

        (F::Bottom, D::Up) => (F::Front, x, -2.0 + y + s, D::Up),
        (F::Bottom, D::Right) => (F::Right, -y, -2.0 + x + s, D::Up),
        (F::Bottom, D::Down) => (F::Back, -x, -2.0 - y + s, D::Up),
        (F::Bottom, D::Left) => (F::Left, y, -2.0 - x + s, D::Up),

        (F::Front, D::Up) => (F::Top, x, -2.0 + y + s, D::Up),
        (F::Front, D::Right) => (F::Right, -2.0 + x + s, y, D::Right),
        (F::Front, D::Down) => (F::Bottom, x, 2.0 + y - s, D::Down),
        (F::Front, D::Left) => (F::Left, 2.0 + x - s, y, D::Left),

        (F::Left, D::Up) => (F::Top, -2.0 + y + s, -x, D::Right),
        (F::Left, D::Right) => (F::Front, -2.0 + x + s, y, D::Right),
        (F::Left, D::Down) => (F::Bottom, -2.0 - y + s, x, D::Right),
        (F::Left, D::Left) => (F::Back, 2.0 + x - s, y, D::Left),

        (F::Right, D::Up) => (F::Top, 2.0 - y - s, x, D::Left),
        (F::Right, D::Right) => (F::Back, -2.0 + x + s, y, D::Right),
        (F::Right, D::Down) => (F::Bottom, 2.0 + y - s, -x, D::Left),
        (F::Right, D::Left) => (F::Front, 2.0 + x - s, y, D::Left),

        (F::Back, D::Up) => (F::Top, -x, 2.0 - y - s, D::Down),
        (F::Back, D::Right) => (F::Left, -2.0 + x + s, y, D::Right),
        (F::Back, D::Down) => (F::Bottom, -x, -2.0 - y + s, D::Up),
        (F::Back, D::Left) => (F::Right, 2.0 + x - s, y, D::Left),
    };

    trace!(from = %face, to = %to, %direction, %heading, "relative tile crossed a face seam");

    Step {
        face: to,
        x: nx,
        y: ny,
        heading,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tile centres along one axis at `zoom`.
    fn centres(zoom: u32) -> Vec<f64> {
        let count = 1_i64 << zoom;
        (0..count)
            .map(|i| (i as f64 + 0.5) / count as f64 * 2.0 - 1.0)
            .collect()
    }

    fn tile_size(zoom: u32) -> f64 {
        2.0 / (1_i64 << zoom) as f64
    }

    #[test]
    fn test_current_is_identity() {
        let st = step(FaceSide::Left, 0.25, -0.75, 0.5, RelativeTileDirection::Current);
        assert_eq!(st.face, FaceSide::Left);
        assert_eq!((st.x, st.y), (0.25, -0.75));
        assert_eq!(st.heading, RelativeTileDirection::Current);
    }

    #[test]
    fn test_interior_step_stays_on_face() {
        let st = step(FaceSide::Front, -0.25, -0.25, 0.5, RelativeTileDirection::Up);
        assert_eq!(st.face, FaceSide::Front);
        assert_eq!((st.x, st.y), (-0.25, 0.25));
        assert_eq!(st.heading, RelativeTileDirection::Up);
    }

    #[test]
    fn test_seam_targets() {
        use FaceSide as F;
        use RelativeTileDirection as D;
        // Zoom 0: one tile per face, every move crosses a seam.
        let expected = [
            (F::Front, D::Up, F::Top),
            (F::Front, D::Down, F::Bottom),
            (F::Front, D::Left, F::Left),
            (F::Front, D::Right, F::Right),
            (F::Right, D::Right, F::Back),
            (F::Back, D::Right, F::Left),
            (F::Left, D::Right, F::Front),
            (F::Top, D::Up, F::Back),
            (F::Top, D::Down, F::Front),
            (F::Top, D::Left, F::Left),
            (F::Top, D::Right, F::Right),
            (F::Bottom, D::Up, F::Front),
            (F::Bottom, D::Down, F::Back),
            (F::Bottom, D::Left, F::Left),
            (F::Bottom, D::Right, F::Right),
            (F::Back, D::Up, F::Top),
            (F::Back, D::Down, F::Bottom),
            (F::Left, D::Up, F::Top),
            (F::Right, D::Down, F::Bottom),
        ];
        for (from, dir, to) in expected {
            let st = step(from, 0.0, 0.0, 2.0, dir);
            assert_eq!(st.face, to, "{from} {dir}");
            assert_eq!((st.x, st.y), (0.0, 0.0), "{from} {dir} should land on the centre");
        }
    }

    #[test]
    fn test_seam_lands_on_adjacent_cube_point() {
        // The new tile centre sits next to the old one on the cube surface:
        // at most one tile away, half a tile along each axis across a seam.
        let zoom = 2;
        let s = tile_size(zoom);
        for face in FaceSide::ALL {
            for &x in &centres(zoom) {
                for &y in &centres(zoom) {
                    for dir in RelativeTileDirection::ALL_MOVES {
                        let st = step(face, x, y, s, dir);
                        let a = face.cube_point(x, y);
                        let b = st.face.cube_point(st.x, st.y);
                        let d = (a - b).abs();
                        let max_axis = d.x.max(d.y).max(d.z);
                        assert!(
                            (max_axis - s * 0.5).abs() < 1e-12 || (max_axis - s).abs() < 1e-12,
                            "{face} ({x}, {y}) {dir} -> {} ({}, {}): offset {d:?}",
                            st.face,
                            st.x,
                            st.y
                        );
                        assert!((a - b).length() <= s * 1.0001, "{face} {dir} jumped too far");
                    }
                }
            }
        }
    }

    #[test]
    fn test_heading_opposite_returns_to_origin() {
        for zoom in 0..4 {
            let s = tile_size(zoom);
            for face in FaceSide::ALL {
                for &x in &centres(zoom) {
                    for &y in &centres(zoom) {
                        for dir in RelativeTileDirection::ALL_MOVES {
                            let there = step(face, x, y, s, dir);
                            let back =
                                step(there.face, there.x, there.y, s, there.heading.opposite());
                            assert_eq!(
                                (back.face, back.x, back.y),
                                (face, x, y),
                                "zoom {zoom}: {face} ({x}, {y}) {dir} did not come back"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_following_heading_circles_the_cube() {
        for zoom in 0..4 {
            let s = tile_size(zoom);
            let circumference = 4 * (1_usize << zoom);
            for face in FaceSide::ALL {
                for &x in &centres(zoom) {
                    for &y in &centres(zoom) {
                        for dir in RelativeTileDirection::ALL_MOVES {
                            let mut st = Step {
                                face,
                                x,
                                y,
                                heading: dir,
                            };
                            for _ in 0..circumference {
                                st = step(st.face, st.x, st.y, s, st.heading);
                            }
                            assert_eq!(
                                (st.face, st.x, st.y, st.heading),
                                (face, x, y, dir),
                                "zoom {zoom}: {face} ({x}, {y}) heading {dir} did not close"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_rotation() {
        use RelativeTileDirection::*;
        assert_eq!(Up.rotated(1), Right);
        assert_eq!(Right.rotated(2), Left);
        assert_eq!(Left.rotated(1), Up);
        assert_eq!(Down.rotated(4), Down);
        assert_eq!(Current.rotated(3), Current);
        for dir in RelativeTileDirection::ALL_MOVES {
            assert_eq!(dir.rotated(2), dir.opposite());
        }
    }
}
