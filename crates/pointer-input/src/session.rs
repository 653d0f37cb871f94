use crate::room::RoomBox;
use crate::{ConfigUpdate, PointerEvent, SensorMessage, SessionError, WireQuat};
use pointer_config::{AppConfig, ScreenConfig};
use pointer_core::calibration::CalibrationMode;
use pointer_core::{PointerCore, PointerError, ProcessResult};

/// Calibration progress as a host would display it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Center,
    /// Top-left captured; waiting for the bottom-right sample.
    AwaitingBottomRight,
    Corners,
}

/// One pointer driven by a stream of [`SensorMessage`]s.
///
/// Holds the latest sample so calibration commands can refer to "where the
/// sensor points now", and the pending top-left corner between the two steps
/// of a corner calibration.
pub struct PointerSession {
    core: PointerCore,
    screen: ScreenConfig,
    room: RoomBox,
    latest: WireQuat,
    roll: Option<f32>,
    pending_top_left: Option<WireQuat>,
}

impl PointerSession {
    /// Configure a core from `config` and center-calibrate at the identity.
    pub fn new(config: &AppConfig) -> Result<Self, PointerError> {
        Self::with_core(PointerCore::new(), config)
    }

    /// Like [`new`](Self::new) but reuses a prepared core (e.g. one with a
    /// log sink installed).
    pub fn with_core(mut core: PointerCore, config: &AppConfig) -> Result<Self, PointerError> {
        core.set_convention(config.input.convention);
        core.configure(config.screen.geometry(), config.screen.smoothing)?;
        let latest = WireQuat::default();
        core.calibrate_center(latest.to_array());

        Ok(Self {
            core,
            screen: config.screen,
            room: RoomBox::new(config.room.width, config.room.height),
            latest,
            roll: None,
            pending_top_left: None,
        })
    }

    pub fn core(&self) -> &PointerCore {
        &self.core
    }

    pub fn screen(&self) -> &ScreenConfig {
        &self.screen
    }

    pub fn latest(&self) -> WireQuat {
        self.latest
    }

    /// Last roll value reported alongside a sample, if any.
    pub fn roll(&self) -> Option<f32> {
        self.roll
    }

    pub fn status(&self) -> SessionStatus {
        if self.pending_top_left.is_some() {
            return SessionStatus::AwaitingBottomRight;
        }
        match self.core.mode() {
            CalibrationMode::Center => SessionStatus::Center,
            CalibrationMode::Corners => SessionStatus::Corners,
        }
    }

    /// Parse and apply one JSON message.
    pub fn handle_json(&mut self, line: &str) -> Result<(), SessionError> {
        let message = SensorMessage::from_json(line)?;
        self.handle(message);
        Ok(())
    }

    /// Parse and apply one raw input line. A bad line leaves the session as it was.
    pub fn handle_bytes(&mut self, line: &[u8]) -> Result<(), SessionError> {
        let message = SensorMessage::from_bytes(line)?;
        self.handle(message);
        Ok(())
    }

    /// Apply one message. Rejected requests are logged and leave state as it was.
    pub fn handle(&mut self, message: SensorMessage) {
        match message {
            SensorMessage::Move { q, roll } => {
                self.latest = q;
                if roll.is_some() {
                    self.roll = roll;
                }
            }
            SensorMessage::Calibrate => {
                self.pending_top_left = None;
                self.core.calibrate_center(self.latest.to_array());
            }
            SensorMessage::CalibrateTl => {
                self.pending_top_left = Some(self.latest);
                tracing::info!("Top-left stored, point at bottom-right");
            }
            SensorMessage::CalibrateBr => match self.pending_top_left.take() {
                Some(top_left) => {
                    if let Err(e) = self
                        .core
                        .calibrate_corners(top_left.to_array(), self.latest.to_array())
                    {
                        tracing::warn!(%e, "Corner calibration failed, keeping previous");
                    }
                }
                None => tracing::warn!("Bottom-right received without a top-left, ignoring"),
            },
            SensorMessage::SetMode { mode } => {
                if let Err(e) = self.core.set_convention_code(mode) {
                    tracing::warn!(%e, "Convention change ignored");
                }
            }
            SensorMessage::Config(update) => self.apply_config(update),
        }
    }

    /// Process the latest sample and cast it into the room.
    pub fn tick(&mut self) -> (ProcessResult, PointerEvent) {
        let result = self.core.process(self.latest.to_array());
        let hit = self.room.cast(result.direction, self.screen.distance);
        (result, PointerEvent::new(hit, &result, self.roll))
    }

    fn apply_config(&mut self, update: ConfigUpdate) {
        let mut screen = self.screen;
        if let Some(width) = update.width {
            screen.width = width;
        }
        if let Some(height) = update.height {
            screen.height = height;
        }
        if let Some(distance) = update.distance {
            screen.distance = distance;
        }
        if let Some(offset_x) = update.offset_x {
            screen.offset_x = offset_x;
        }
        if let Some(offset_y) = update.offset_y {
            screen.offset_y = offset_y;
        }
        if let Some(smoothing) = update.smoothing {
            screen.smoothing = smoothing;
        }

        match self.core.configure(screen.geometry(), screen.smoothing) {
            Ok(()) => {
                screen.smoothing = self.core.smoothing();
                self.screen = screen;
            }
            Err(e) => tracing::warn!(%e, "Config update ignored"),
        }
    }
}

impl std::fmt::Debug for PointerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerSession")
            .field("core", &self.core)
            .field("screen", &self.screen)
            .field("latest", &self.latest)
            .field("status", &self.status())
            .finish()
    }
}
