use crate::error::Result;

pub trait Envelope {
    /// Sample the envelope gain at `time` seconds after the start of the sound.
    ///
    /// Implementations return a value in `0.0..=1.0`.
    fn sample(&self, time: f32) -> f32;

    /// Check that the parameters keep `sample` finite and within range.
    fn validate(&self) -> Result<()>;
}

pub mod attack_decay;
pub mod gaussian;
