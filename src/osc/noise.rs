use super::Oscillator;

use rand::Rng;

/// Uniform white noise in `[-amp, amp)`. Frequency is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoiseOscillator;

impl Oscillator for NoiseOscillator {
    type State = ();

    fn create_state(&self) -> Self::State {}

    fn fill_samples<R: Rng + ?Sized>(
        &self,
        _state: &mut (),
        rng: &mut R,
        buffer: &mut [f32],
        _delta_t: f32,
        _freq: f32,
        amp: f32,
    ) {
        for sample in buffer.iter_mut() {
            *sample += rng.gen_range(-1.0..1.0) * amp;
        }
    }
}
