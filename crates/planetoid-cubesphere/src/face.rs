//! The six faces of the planetoid cube and their local frames.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// The six faces of the cube circumscribing the planetoid.
///
/// The discriminant is the face index packed into planar tile keys, so the
/// order is part of the storage format and must not change.
///
/// Planetoid-centred axes: `+X` points at (lon 0, lat 0), `+Y` at
/// (lon π/2, lat 0) and `+Z` at the north pole.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum FaceSide {
    /// Centred on (lon 0, lat 0), outward axis `+X`.
    Front = 0,
    /// Centred on lon π/2 (east), outward axis `+Y`.
    Right = 1,
    /// Centred on lon π, outward axis `-X`.
    Back = 2,
    /// Centred on lon -π/2 (west), outward axis `-Y`.
    Left = 3,
    /// North pole, outward axis `+Z`.
    Top = 4,
    /// South pole, outward axis `-Z`.
    Bottom = 5,
}

impl FaceSide {
    /// All six faces in index order.
    pub const ALL: [FaceSide; 6] = [
        FaceSide::Front,
        FaceSide::Right,
        FaceSide::Back,
        FaceSide::Left,
        FaceSide::Top,
        FaceSide::Bottom,
    ];

    /// The face index used in planar packing (0-5).
    #[must_use]
    pub const fn index(self) -> i64 {
        self as i64
    }

    /// The face with the given index, or `None` outside 0-5.
    #[must_use]
    pub const fn from_index(index: i64) -> Option<FaceSide> {
        match index {
            0 => Some(FaceSide::Front),
            1 => Some(FaceSide::Right),
            2 => Some(FaceSide::Back),
            3 => Some(FaceSide::Left),
            4 => Some(FaceSide::Top),
            5 => Some(FaceSide::Bottom),
            _ => None,
        }
    }

    /// The face on the other side of the planetoid.
    #[must_use]
    pub fn opposite(self) -> FaceSide {
        match self {
            FaceSide::Front => FaceSide::Back,
            FaceSide::Right => FaceSide::Left,
            FaceSide::Back => FaceSide::Front,
            FaceSide::Left => FaceSide::Right,
            FaceSide::Top => FaceSide::Bottom,
            FaceSide::Bottom => FaceSide::Top,
        }
    }

    /// Outward-pointing unit normal.
    #[must_use]
    pub fn normal(self) -> DVec3 {
        match self {
            FaceSide::Front => DVec3::X,
            FaceSide::Right => DVec3::Y,
            FaceSide::Back => DVec3::NEG_X,
            FaceSide::Left => DVec3::NEG_Y,
            FaceSide::Top => DVec3::Z,
            FaceSide::Bottom => DVec3::NEG_Z,
        }
    }

    /// Direction of increasing local `x`.
    #[must_use]
    pub fn tangent(self) -> DVec3 {
        match self {
            FaceSide::Front => DVec3::Y,
            FaceSide::Right => DVec3::NEG_X,
            FaceSide::Back => DVec3::NEG_Y,
            FaceSide::Left => DVec3::X,
            FaceSide::Top => DVec3::Y,
            FaceSide::Bottom => DVec3::Y,
        }
    }

    /// Direction of increasing local `y`.
    #[must_use]
    pub fn bitangent(self) -> DVec3 {
        match self {
            FaceSide::Front | FaceSide::Right | FaceSide::Back | FaceSide::Left => DVec3::Z,
            FaceSide::Top => DVec3::NEG_X,
            FaceSide::Bottom => DVec3::X,
        }
    }

    /// Point on the surface of the `[-1, 1]` cube for local `(x, y)`.
    #[must_use]
    pub fn cube_point(self, x: f64, y: f64) -> DVec3 {
        self.normal() + x * self.tangent() + y * self.bitangent()
    }
}

impl std::fmt::Display for FaceSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}
