//! Cube-sphere tile addressing: spherical, cubic and planar coordinates,
//! cube projections, relative-tile navigation and tile bounding boxes.

mod bounds;
mod coords;
mod error;
mod face;
mod mapping;
pub mod navigation;
pub mod planar;
pub mod projection;

pub use bounds::{AxisAlignedBoundingBox, BoundingBoxCoordinate};
pub use coords::{CubicCoordinate, GeoPoint, PlanarCoordinate, SphericalCoordinate};
pub use error::{CoordError, UnknownProjection};
pub use face::FaceSide;
pub use mapping::CoordinateMapping;
pub use navigation::{RelativeTileDirection, Step};
pub use planar::MAX_ZOOM;
pub use projection::{
    CubeProjection, ProjectionKind, QscProjection, TangentialProjection, dominant_face,
};
