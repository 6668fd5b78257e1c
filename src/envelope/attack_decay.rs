use super::Envelope;
use crate::error::{Result, WhooshError};

pub const DEFAULT_PEAK_TIME: f32 = 0.1;
pub const DEFAULT_SHARPNESS: f32 = 15.0;

/// A linear attack followed by an exponential decay. All times are in seconds.
///
/// ```plaintext
/// amplitude
/// ^
/// 1     /\
/// |    /  \
/// |   /    `.
/// |  /       `-._
/// +-+----+--------`---------> time
/// t=0    peak_time
/// ```
///
/// The gain is `t / peak_time` before the peak and `exp(-sharpness * (t - peak_time))`
/// after it. This is the envelope used for whooshes unless another one is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackDecayEnvelope {
    /// The time it takes for the envelope to reach its maximum amplitude.
    pub peak_time: f32,
    /// Decay rate after the peak, in 1/s.
    pub sharpness: f32,
}

impl AttackDecayEnvelope {
    pub fn new(peak_time: f32, sharpness: f32) -> Self {
        Self {
            peak_time,
            sharpness,
        }
    }
}

impl Default for AttackDecayEnvelope {
    fn default() -> Self {
        Self::new(DEFAULT_PEAK_TIME, DEFAULT_SHARPNESS)
    }
}

impl Envelope for AttackDecayEnvelope {
    fn sample(&self, time: f32) -> f32 {
        if time < 0.0 {
            0.0
        } else if time < self.peak_time {
            time / self.peak_time
        } else {
            (-self.sharpness * (time - self.peak_time)).exp()
        }
    }

    fn validate(&self) -> Result<()> {
        if !(self.peak_time.is_finite() && self.peak_time >= 0.0) {
            return Err(WhooshError::invalid(format!(
                "envelope peak time must be non-negative, got {}",
                self.peak_time
            )));
        }
        if !(self.sharpness.is_finite() && self.sharpness > 0.0) {
            return Err(WhooshError::invalid(format!(
                "envelope sharpness must be positive, got {}",
                self.sharpness
            )));
        }
        Ok(())
    }
}
