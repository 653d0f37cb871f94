use crate::calibration::{Calibration, TangentBounds};
use crate::math::tangent;
use crate::types::{ProcessResult, ScreenGeometry};
use glam::{Vec2, Vec3};

/// Directions with less forward component than this cannot be projected.
pub const MIN_PROJECTABLE_Z: f32 = 0.01;

/// Turn a calibrated direction into a [`ProcessResult`].
///
/// Yaw and pitch are filled in even when the result is invalid.
pub fn project(dir: Vec3, calibration: &Calibration, screen: &ScreenGeometry) -> ProcessResult {
    let (yaw_degrees, pitch_degrees) = yaw_pitch_degrees(dir);
    let mut result = ProcessResult {
        direction: dir,
        yaw_degrees,
        pitch_degrees,
        ..ProcessResult::default()
    };

    if dir.z <= MIN_PROJECTABLE_Z {
        return result;
    }

    let (uv, world) = match calibration {
        Calibration::Center(_) => project_physical(dir, screen),
        Calibration::Corners(frustum) => project_frustum(dir, &frustum.bounds),
    };
    result.uv = uv;
    result.world = world;
    result.is_valid = true;
    result
}

/// `(atan2(x, z), asin(y))` in degrees.
pub fn yaw_pitch_degrees(dir: Vec3) -> (f32, f32) {
    let yaw = dir.x.atan2(dir.z).to_degrees();
    let pitch = dir.y.clamp(-1.0, 1.0).asin().to_degrees();
    (yaw, pitch)
}

/// Ray cast onto the plane `z = distance`, then shift by the user offset.
fn project_physical(dir: Vec3, screen: &ScreenGeometry) -> (Vec2, Vec3) {
    let t = screen.distance / dir.z;
    let hit = dir * t;
    let uv = Vec2::new(
        (hit.x - screen.offset_x) / screen.width + 0.5,
        (hit.y - screen.offset_y) / screen.height + 0.5,
    );
    (uv, hit)
}

/// Linear remap of tangent coordinates from the calibrated window to `[0, 1]`.
fn project_frustum(dir: Vec3, bounds: &TangentBounds) -> (Vec2, Vec3) {
    let t = tangent(dir);
    let uv = Vec2::new(
        (t.x - bounds.min_x) / bounds.span_x(),
        (t.y - bounds.min_y) / bounds.span_y(),
    );
    (uv, t.extend(1.0))
}
