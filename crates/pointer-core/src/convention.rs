use crate::error::PointerError;
use crate::math::normalize_quat;
use glam::Quat;
use serde::{Deserialize, Serialize};

/// Order in which a sensor serializes the four quaternion components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuaternionConvention {
    /// `(w, x, y, z)`.
    WFirst,
    /// `(x, y, z, w)`.
    #[default]
    WLast,
}

impl QuaternionConvention {
    /// Wire code used by hosts (`0` = W first, `1` = W last).
    pub fn code(self) -> i32 {
        match self {
            Self::WFirst => 0,
            Self::WLast => 1,
        }
    }

    /// Reorder raw components into `(x, y, z, w)` without normalizing.
    pub fn reorder(self, raw: [f32; 4]) -> Quat {
        let [a, b, c, d] = raw;
        match self {
            Self::WFirst => Quat::from_xyzw(b, c, d, a),
            Self::WLast => Quat::from_xyzw(a, b, c, d),
        }
    }

    /// Inverse of [`reorder`](Self::reorder): lay `q` out in this convention.
    pub fn serialize(self, q: Quat) -> [f32; 4] {
        match self {
            Self::WFirst => [q.w, q.x, q.y, q.z],
            Self::WLast => [q.x, q.y, q.z, q.w],
        }
    }

    /// Reorder and normalize raw components.
    ///
    /// Returns `None` when the input has zero (or non-finite) magnitude.
    pub fn to_quat(self, raw: [f32; 4]) -> Option<Quat> {
        normalize_quat(self.reorder(raw))
    }
}

impl TryFrom<i32> for QuaternionConvention {
    type Error = PointerError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::WFirst),
            1 => Ok(Self::WLast),
            other => Err(PointerError::InvalidConvention(other)),
        }
    }
}
