use glam::{Quat, Vec2, Vec3};

/// Canonical forward axis. A calibrated pointer aimed straight ahead points here.
pub const FORWARD: Vec3 = Vec3::Z;

/// Below this magnitude a vector is treated as degenerate.
const NORMALIZE_EPSILON: f32 = 1e-6;

/// Normalize `v`, falling back to [`FORWARD`] for near-zero input instead of
/// producing NaNs.
pub fn normalize_or_forward(v: Vec3) -> Vec3 {
    let magnitude = v.length();
    if magnitude > NORMALIZE_EPSILON {
        v / magnitude
    } else {
        FORWARD
    }
}

/// Rotate `v` by the unit quaternion `q`.
///
/// Uses the double cross product form `v + 2w(u × v) + 2(u × (u × v))` with
/// `u = q.xyz`. The result is undefined for non-unit quaternions.
pub fn rotate(q: Quat, v: Vec3) -> Vec3 {
    let u = Vec3::new(q.x, q.y, q.z);
    let uv = u.cross(v);
    let uuv = u.cross(uv);
    v + uv * (2.0 * q.w) + uuv * 2.0
}

/// Hamilton product `a · b` (apply `b` first, then `a`).
pub fn compose(a: Quat, b: Quat) -> Quat {
    a * b
}

/// Inverse of a unit quaternion (its conjugate).
pub fn inverse(q: Quat) -> Quat {
    q.conjugate()
}

/// Component-wise interpolation between `a` and `b` along the shorter arc,
/// renormalized.
///
/// An approximation of slerp that is good for small steps between consecutive
/// samples or between two calibration corners that are not antipodal.
pub fn shortest_lerp(a: Quat, b: Quat, t: f32) -> Quat {
    let b = if a.dot(b) < 0.0 { -b } else { b };
    let blended = Quat::from_xyzw(
        a.x + (b.x - a.x) * t,
        a.y + (b.y - a.y) * t,
        a.z + (b.z - a.z) * t,
        a.w + (b.w - a.w) * t,
    );
    normalize_quat(blended).unwrap_or(blended)
}

/// Normalize `q` to unit length. Returns `None` when `q` has zero magnitude.
pub fn normalize_quat(q: Quat) -> Option<Quat> {
    let magnitude = q.length();
    if magnitude > 0.0 && magnitude.is_finite() {
        Some(q / magnitude)
    } else {
        None
    }
}

/// Project a direction onto the `z = 1` plane: `(x / z, y / z)`.
///
/// Callers must ensure `dir.z` is safely positive.
pub fn tangent(dir: Vec3) -> Vec2 {
    Vec2::new(dir.x / dir.z, dir.y / dir.z)
}
