use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Physical screen placement, in any consistent length unit (meters by convention).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenGeometry {
    pub width: f32,
    pub height: f32,
    /// Distance from the user to the screen plane.
    pub distance: f32,
    /// Horizontal user offset, subtracted from the ray hit before mapping to UV.
    pub offset_x: f32,
    /// Vertical user offset, subtracted from the ray hit before mapping to UV.
    pub offset_y: f32,
}

impl ScreenGeometry {
    /// Screen of the given size with the user centered in front of it.
    pub fn new(width: f32, height: f32, distance: f32) -> Self {
        Self {
            width,
            height,
            distance,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    pub fn with_offset(mut self, offset_x: f32, offset_y: f32) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    /// Width, height and distance are all finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        [self.width, self.height, self.distance]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }
}

impl Default for ScreenGeometry {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

/// Output of one processing call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessResult {
    /// Screen coordinate; (0.5, 0.5) is the center, v grows upward. Not clamped.
    pub uv: Vec2,
    /// Ray hit on the screen plane, or the tangent point at unit depth in corners mode.
    pub world: Vec3,
    /// Calibrated pointing direction (unit length).
    pub direction: Vec3,
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
    /// False when the pointer faces away from the projection axis.
    pub is_valid: bool,
}

impl ProcessResult {
    /// Map UV to a pixel position with the origin at the top-left corner.
    ///
    /// Returns `None` for invalid results.
    pub fn to_pixels(&self, width: f32, height: f32) -> Option<Vec2> {
        self.is_valid
            .then(|| Vec2::new(self.uv.x * width, (1.0 - self.uv.y) * height))
    }
}
