//! Reference orientations for the two calibration philosophies.
//!
//! `Center` stores a single "straight ahead" reference and pairs with the
//! physical screen projection. `Corners` derives an angular window from two
//! sampled corner orientations and needs no physical measurements.

use crate::error::PointerError;
use crate::math::{compose, inverse, normalize_or_forward, rotate, shortest_lerp, tangent, FORWARD};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Corner directions must have at least this much forward component.
pub const MIN_FORWARD_Z: f32 = 0.01;

/// Smallest accepted tangent span between the two corners.
const MIN_TANGENT_SPAN: f32 = 1e-6;

/// Which projection model is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationMode {
    #[default]
    Center,
    Corners,
}

/// Single-point calibration: the captured orientation becomes forward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterCalibration {
    /// Inverse of the captured orientation.
    pub reference: Quat,
}

impl CenterCalibration {
    pub fn capture(orientation: Quat) -> Self {
        Self {
            reference: inverse(orientation),
        }
    }

    /// Express `orientation` relative to the captured one.
    pub fn correct(&self, orientation: Quat) -> Quat {
        compose(self.reference, orientation)
    }
}

impl Default for CenterCalibration {
    fn default() -> Self {
        Self {
            reference: Quat::IDENTITY,
        }
    }
}

/// Angular window on the `z = 1` plane, in tangent units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TangentBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl TangentBounds {
    pub fn span_x(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn span_y(&self) -> f32 {
        self.max_y - self.min_y
    }
}

/// Two-corner ("frustum") calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumCalibration {
    /// Virtual center: midpoint of the two corner orientations.
    pub center: Quat,
    pub bounds: TangentBounds,
}

impl FrustumCalibration {
    /// Derive the window from unit top-left and bottom-right orientations.
    pub fn capture(top_left: Quat, bottom_right: Quat) -> Result<Self, PointerError> {
        let center = shortest_lerp(top_left, bottom_right, 0.5);
        let inv_center = inverse(center);

        let tl = rotate(compose(inv_center, top_left), FORWARD);
        let br = rotate(compose(inv_center, bottom_right), FORWARD);

        if tl.z < MIN_FORWARD_Z || br.z < MIN_FORWARD_Z {
            return Err(PointerError::DegenerateCorners);
        }

        let tl = tangent(tl);
        let br = tangent(br);
        let bounds = TangentBounds {
            min_x: tl.x,
            max_x: br.x,
            max_y: tl.y,
            min_y: br.y,
        };

        if bounds.span_x() < MIN_TANGENT_SPAN || bounds.span_y() < MIN_TANGENT_SPAN {
            return Err(PointerError::InvertedCorners);
        }

        Ok(Self { center, bounds })
    }

    /// Express `orientation` relative to the virtual center.
    pub fn correct(&self, orientation: Quat) -> Quat {
        compose(inverse(self.center), orientation)
    }
}

/// Active calibration. Switching modes replaces the variant wholesale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Calibration {
    Center(CenterCalibration),
    Corners(FrustumCalibration),
}

impl Calibration {
    pub fn mode(&self) -> CalibrationMode {
        match self {
            Self::Center(_) => CalibrationMode::Center,
            Self::Corners(_) => CalibrationMode::Corners,
        }
    }

    /// Unit pointing direction for a smoothed orientation under this calibration.
    pub fn direction(&self, orientation: Quat) -> Vec3 {
        let corrected = match self {
            Self::Center(center) => center.correct(orientation),
            Self::Corners(frustum) => frustum.correct(orientation),
        };
        normalize_or_forward(rotate(corrected, FORWARD))
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::Center(CenterCalibration::default())
    }
}
