use super::Oscillator;

use rand::Rng;

/// Pure tone mixed under the noise to give a whoosh its whistle of moving air.
///
/// The tone carries no randomness, so a tone-only render is independent of the rng.
#[derive(Debug, Clone, Copy, Default)]
pub struct SineOscillator;

/// Running phase, in radians, wrapped to `0..2pi` so long renders keep `f32` precision.
#[derive(Debug, Clone, Default)]
pub struct SineOscillatorState {
    phase: f32,
}

impl Oscillator for SineOscillator {
    type State = SineOscillatorState;

    fn create_state(&self) -> Self::State {
        SineOscillatorState::default()
    }

    fn fill_samples<R: Rng + ?Sized>(
        &self,
        state: &mut Self::State,
        _rng: &mut R,
        buffer: &mut [f32],
        delta_t: f32,
        freq: f32,
        amp: f32,
    ) {
        use std::f32::consts::TAU;

        let step = TAU * freq * delta_t;
        for sample in buffer.iter_mut() {
            *sample += amp * state.phase.sin();
            state.phase = (state.phase + step) % TAU;
        }
    }
}
