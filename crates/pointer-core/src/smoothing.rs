use crate::math::shortest_lerp;
use glam::Quat;

/// Upper bound on the smoothing factor; at 1.0 the filter would never move.
pub const MAX_SMOOTHING: f32 = 0.99;

/// First-order low-pass filter over a stream of unit quaternions.
///
/// `factor` is the weight kept from the previous output: 0.0 passes input
/// through, values near [`MAX_SMOOTHING`] lag heavily.
#[derive(Debug, Clone)]
pub struct ExponentialFilter {
    factor: f32,
    /// Last filtered value, `None` until the first sample.
    last: Option<Quat>,
}

impl ExponentialFilter {
    pub fn new(factor: f32) -> Self {
        Self {
            factor: clamp_factor(factor),
            last: None,
        }
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Change the smoothing factor, clamped into `[0, MAX_SMOOTHING]`.
    /// History is kept.
    pub fn set_factor(&mut self, factor: f32) {
        self.factor = clamp_factor(factor);
    }

    /// Whether at least one sample has been seen since construction or reset.
    pub fn has_history(&self) -> bool {
        self.last.is_some()
    }

    /// Forget history; the next sample passes through unfiltered.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Feed one sample and return the filtered orientation.
    pub fn update(&mut self, raw: Quat) -> Quat {
        let filtered = match self.last {
            Some(previous) if self.factor > 0.0 => shortest_lerp(previous, raw, 1.0 - self.factor),
            _ => raw,
        };
        self.last = Some(filtered);
        filtered
    }
}

impl Default for ExponentialFilter {
    fn default() -> Self {
        Self::new(0.0)
    }
}

fn clamp_factor(factor: f32) -> f32 {
    if factor.is_nan() {
        return 0.0;
    }
    factor.clamp(0.0, MAX_SMOOTHING)
}
