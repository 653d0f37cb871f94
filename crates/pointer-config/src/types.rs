use pointer_core::convention::QuaternionConvention;
use pointer_core::ScreenGeometry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Processing interval of the host loop, in milliseconds (~60 Hz by default).
    pub tick_ms: u64,
    /// Physical screen and smoothing.
    pub screen: ScreenConfig,
    /// Sensor input settings.
    pub input: InputConfig,
    /// Virtual room used for the 3D hit preview.
    pub room: RoomConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            screen: ScreenConfig::default(),
            input: InputConfig::default(),
            room: RoomConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Screen width in meters.
    pub width: f32,
    /// Screen height in meters.
    pub height: f32,
    /// Distance from user to screen in meters.
    pub distance: f32,
    /// Horizontal user offset in meters.
    pub offset_x: f32,
    /// Vertical user offset in meters.
    pub offset_y: f32,
    /// Exponential smoothing factor, 0.0 (none) to 0.99 (heavy lag).
    pub smoothing: f32,
}

impl ScreenConfig {
    pub fn geometry(&self) -> ScreenGeometry {
        ScreenGeometry::new(self.width, self.height, self.distance)
            .with_offset(self.offset_x, self.offset_y)
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1.2,
            height: 0.9,
            distance: 1.5,
            offset_x: 0.0,
            offset_y: 0.0,
            smoothing: 0.8,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Component order the sensor uses.
    pub convention: QuaternionConvention,
}

/// Room around the user: floor at `-height / 2`, side walls at `±width / 2`.
/// The front wall is the screen plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub width: f32,
    pub height: f32,
}

impl RoomConfig {
    pub fn is_valid(&self) -> bool {
        [self.width, self.height]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            width: 4.0,
            height: 3.0,
        }
    }
}
