use super::Envelope;
use crate::error::{Result, WhooshError};

/// A bell-shaped envelope, `exp(-sharpness * (t - center)^2)`.
///
/// Unlike [`AttackDecayEnvelope`](super::attack_decay::AttackDecayEnvelope) this one does not
/// start from silence: with the defaults the gain at `t = 0` is about `0.86`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianEnvelope {
    /// Time of maximum gain, in seconds.
    pub center: f32,
    /// Width control, in 1/s². Larger is narrower.
    pub sharpness: f32,
}

impl GaussianEnvelope {
    pub fn new(center: f32, sharpness: f32) -> Self {
        Self { center, sharpness }
    }
}

impl Default for GaussianEnvelope {
    fn default() -> Self {
        Self::new(0.1, 15.0)
    }
}

impl Envelope for GaussianEnvelope {
    fn sample(&self, time: f32) -> f32 {
        let d = time - self.center;
        (-self.sharpness * d * d).exp()
    }

    fn validate(&self) -> Result<()> {
        if !self.center.is_finite() {
            return Err(WhooshError::invalid(format!(
                "envelope center must be finite, got {}",
                self.center
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

#[test]
fn test_gaussian_shape() {
    let env = GaussianEnvelope::default();
    assert_eq!(env.sample(0.1), 1.0);
    assert!((env.sample(0.0) - (-0.15f32).exp()).abs() < 1e-6);
    // symmetric around the center
    assert!((env.sample(0.05) - env.sample(0.15)).abs() < 1e-6);
    assert!(env.sample(0.3) < env.sample(0.2));
}

#[test]
fn test_gaussian_rejects_bad_parameters() {
    assert!(GaussianEnvelope::default().validate().is_ok());
    assert!(GaussianEnvelope::new(f32::NAN, 15.0).validate().is_err());
    assert!(GaussianEnvelope::new(0.1, -1.0).validate().is_err());
    assert!(GaussianEnvelope::new(0.1, f32::INFINITY).validate().is_err());
}
