pub mod room;
pub mod session;

use glam::Quat;
use room::{RoomHit, Wall};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use session::{PointerSession, SessionStatus};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Malformed sensor message: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Sensor message is not UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
}

/// Quaternion components as a sensor sends them.
///
/// The field names are positional: the active convention decides which one
/// holds the scalar part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WireQuat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl WireQuat {
    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl Default for WireQuat {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: 1.0,
        }
    }
}

impl From<Quat> for WireQuat {
    fn from(q: Quat) -> Self {
        Self {
            x: q.x,
            y: q.y,
            z: q.z,
            w: q.w,
        }
    }
}

/// Inbound message from a sensor or control client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SensorMessage {
    /// New orientation sample. `roll` is an optional client-side extra.
    Move {
        q: WireQuat,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        roll: Option<f32>,
    },
    /// Center-calibrate at the latest sample.
    Calibrate,
    /// Remember the latest sample as the top-left corner.
    CalibrateTl,
    /// Finish corner calibration with the latest sample as bottom-right.
    CalibrateBr,
    /// Quaternion convention code (0 = W first, 1 = W last).
    SetMode { mode: i32 },
    /// Partial screen update.
    Config(ConfigUpdate),
}

impl SensorMessage {
    pub fn from_json(line: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(line)?)
    }

    /// Parse one raw input line, rejecting bytes that are not UTF-8.
    pub fn from_bytes(line: &[u8]) -> Result<Self, SessionError> {
        Self::from_json(std::str::from_utf8(line)?)
    }
}

/// Screen fields a client may change at runtime. Absent fields keep their value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f32>,
    #[serde(rename = "offX", skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<f32>,
    #[serde(rename = "offY", skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<f32>,
    #[serde(rename = "smooth", skip_serializing_if = "Option::is_none")]
    pub smoothing: Option<f32>,
}

/// Outbound per-tick update for viewers.
///
/// `x`, `y` and `z` are the room hit point with z negated, so depth grows
/// toward `-z` as in right-handed viewer scenes. `roll` echoes the last roll
/// the sensor reported, for tinting the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PointerEvent {
    #[serde(rename = "3d_move")]
    Move {
        x: f32,
        y: f32,
        z: f32,
        wall: Wall,
        u: f32,
        v: f32,
        valid: bool,
        yaw: f32,
        pitch: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        roll: Option<f32>,
    },
}

impl PointerEvent {
    pub fn new(hit: RoomHit, result: &pointer_core::ProcessResult, roll: Option<f32>) -> Self {
        Self::Move {
            x: hit.point.x,
            y: hit.point.y,
            z: -hit.point.z,
            wall: hit.wall,
            u: result.uv.x,
            v: result.uv.y,
            valid: result.is_valid,
            yaw: result.yaw_degrees,
            pitch: result.pitch_degrees,
            roll,
        }
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}
