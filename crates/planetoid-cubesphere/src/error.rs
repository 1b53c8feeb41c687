//! Coordinate mapping error types.

/// Errors produced when a coordinate or zoom cannot be mapped.
///
/// Every failure is deterministic for a given input, so callers should
/// surface these rather than retry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoordError {
    /// A geometric value is outside its valid range or not finite.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// The zoom level would overflow the planar tile index.
    #[error("zoom {0} overflows the planar tile index")]
    ArithmeticOverflow(i16),
}

/// A projection name that does not match any known strategy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown projection kind: {0}")]
pub struct UnknownProjection(pub String);
