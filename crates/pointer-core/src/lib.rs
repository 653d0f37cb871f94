pub mod calibration;
pub mod convention;
pub mod error;
pub mod math;
pub mod projection;
pub mod smoothing;
pub mod types;

use calibration::{Calibration, CalibrationMode, CenterCalibration, FrustumCalibration};
use convention::QuaternionConvention;
use glam::Quat;
use smoothing::ExponentialFilter;

pub use error::PointerError;
pub use types::{ProcessResult, ScreenGeometry};

/// Behavior revision reported to hosts (2.0.0).
pub const PROTOCOL_VERSION: i32 = 200;

/// Destination for human-readable diagnostics.
pub type LogSink = Box<dyn Fn(&str) + Send>;

/// Samples between debug heartbeats.
const HEARTBEAT_INTERVAL: u64 = 1000;

/// One pointer: turns raw orientation samples into screen coordinates.
///
/// Sequence per sample: reorder + normalize, smooth, apply calibration,
/// derive yaw/pitch, project.
pub struct PointerCore {
    screen: ScreenGeometry,
    filter: ExponentialFilter,
    convention: QuaternionConvention,
    calibration: Calibration,
    /// Restored when `configure` forces center mode while corners are active.
    last_center: CenterCalibration,
    logger: Option<LogSink>,
    sample_count: u64,
}

impl PointerCore {
    /// Unit screen at unit distance, no smoothing, W-last input, uncalibrated.
    pub fn new() -> Self {
        Self {
            screen: ScreenGeometry::default(),
            filter: ExponentialFilter::default(),
            convention: QuaternionConvention::default(),
            calibration: Calibration::default(),
            last_center: CenterCalibration::default(),
            logger: None,
            sample_count: 0,
        }
    }

    pub fn version(&self) -> i32 {
        PROTOCOL_VERSION
    }

    pub fn screen(&self) -> &ScreenGeometry {
        &self.screen
    }

    pub fn smoothing(&self) -> f32 {
        self.filter.factor()
    }

    pub fn convention(&self) -> QuaternionConvention {
        self.convention
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    pub fn mode(&self) -> CalibrationMode {
        self.calibration.mode()
    }

    /// Install, replace or (with `None`) remove the log sink.
    pub fn set_logger(&mut self, logger: Option<LogSink>) {
        self.logger = logger;
        self.log(&format!("Logger connected. Pointer core v{PROTOCOL_VERSION} ready"));
    }

    pub fn set_convention(&mut self, convention: QuaternionConvention) {
        self.convention = convention;
        tracing::info!(?convention, "Quaternion convention set");
    }

    /// Set the convention from a host code (`0` = W first, `1` = W last).
    pub fn set_convention_code(&mut self, code: i32) -> Result<(), PointerError> {
        match QuaternionConvention::try_from(code) {
            Ok(convention) => {
                self.set_convention(convention);
                Ok(())
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    /// Store screen geometry and smoothing, and switch to center mode.
    ///
    /// Smoothing is clamped into `[0, 0.99]`. Non-positive geometry is
    /// rejected and nothing changes.
    pub fn configure(&mut self, screen: ScreenGeometry, smoothing: f32) -> Result<(), PointerError> {
        if !screen.is_valid() {
            return Err(self.reject(PointerError::InvalidGeometry {
                width: screen.width,
                height: screen.height,
                distance: screen.distance,
            }));
        }

        self.screen = screen;
        self.filter.set_factor(smoothing);
        if let Calibration::Corners(_) = self.calibration {
            self.calibration = Calibration::Center(self.last_center);
        }

        tracing::info!(
            width = screen.width,
            height = screen.height,
            distance = screen.distance,
            offset_x = screen.offset_x,
            offset_y = screen.offset_y,
            smoothing = self.filter.factor(),
            "Pointer configured"
        );
        self.log(&format!(
            "Configured: {:.2}x{:.2} dist:{:.2} smooth:{:.2}",
            screen.width,
            screen.height,
            screen.distance,
            self.filter.factor()
        ));
        Ok(())
    }

    /// Make the given orientation the forward axis (center mode).
    pub fn calibrate_center(&mut self, raw: [f32; 4]) {
        let orientation = self.normalize_input(raw);
        let center = CenterCalibration::capture(orientation);
        self.last_center = center;
        self.calibration = Calibration::Center(center);
        tracing::info!("Calibrated: center");
        self.log("Calibrated: CENTER");
    }

    /// Define an angular window from top-left and bottom-right orientations
    /// (corners mode). A rejected capture keeps the previous calibration.
    pub fn calibrate_corners(
        &mut self,
        top_left: [f32; 4],
        bottom_right: [f32; 4],
    ) -> Result<(), PointerError> {
        let top_left = self.normalize_input(top_left);
        let bottom_right = self.normalize_input(bottom_right);

        let frustum = FrustumCalibration::capture(top_left, bottom_right)
            .map_err(|e| self.reject(e))?;

        let b = frustum.bounds;
        tracing::info!(
            min_x = b.min_x,
            max_x = b.max_x,
            min_y = b.min_y,
            max_y = b.max_y,
            "Calibrated: corners"
        );
        self.calibration = Calibration::Corners(frustum);
        self.log("Calibrated: CORNERS (custom frustum)");
        Ok(())
    }

    /// Back to the uncalibrated default and an empty smoothing history.
    /// Geometry, smoothing factor and convention are kept.
    pub fn reset(&mut self) {
        self.calibration = Calibration::default();
        self.last_center = CenterCalibration::default();
        self.filter.reset();
        tracing::info!("Calibration reset");
        self.log("Calibration reset");
    }

    /// Process one orientation sample.
    pub fn process(&mut self, raw: [f32; 4]) -> ProcessResult {
        let orientation = self.normalize_input(raw);
        let smoothed = self.filter.update(orientation);
        let direction = self.calibration.direction(smoothed);
        let result = projection::project(direction, &self.calibration, &self.screen);

        self.sample_count += 1;
        if self.sample_count % HEARTBEAT_INTERVAL == 0 {
            tracing::debug!(
                samples = self.sample_count,
                u = result.uv.x,
                v = result.uv.y,
                valid = result.is_valid,
                "Pointer samples processed"
            );
        }
        result
    }

    fn normalize_input(&self, raw: [f32; 4]) -> Quat {
        match self.convention.to_quat(raw) {
            Some(q) => q,
            None => {
                tracing::warn!(?raw, "Degenerate orientation sample, using identity");
                Quat::IDENTITY
            }
        }
    }

    fn reject(&self, error: PointerError) -> PointerError {
        tracing::error!(%error, "Request rejected");
        self.log(&format!("Error: {error}"));
        error
    }

    fn log(&self, message: &str) {
        if let Some(logger) = &self.logger {
            logger(message);
        }
    }
}

impl Default for PointerCore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PointerCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerCore")
            .field("screen", &self.screen)
            .field("filter", &self.filter)
            .field("convention", &self.convention)
            .field("calibration", &self.calibration)
            .field("has_logger", &self.logger.is_some())
            .finish()
    }
}
