use thiserror::Error;

/// Reasons a configuration or calibration request is rejected.
///
/// A rejected request never changes the core's state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PointerError {
    #[error("Invalid screen geometry {width}x{height} at distance {distance} (all must be > 0)")]
    InvalidGeometry {
        width: f32,
        height: f32,
        distance: f32,
    },
    #[error("Invalid quaternion convention code {0} (expected 0 = W first or 1 = W last)")]
    InvalidConvention(i32),
    #[error("Corner calibration rejected: a corner is perpendicular to or behind the view axis")]
    DegenerateCorners,
    #[error("Corner calibration rejected: top-left must be left of and above bottom-right")]
    InvertedCorners,
}
