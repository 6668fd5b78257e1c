//! Procedural "whoosh" sound effects rendered to mono 16-bit WAV files.
//!
//! A whoosh is white noise (optionally layered with a sine tone) shaped by an
//! [`Envelope`], normalized to a peak level and quantized to 16-bit PCM.
//!
//! ```no_run
//! use rand::{rngs::StdRng, SeedableRng};
//! use whoosh_synth::{generate_whoosh, WhooshConfig};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let header = generate_whoosh("SwordWhoosh.wav", WhooshConfig::default(), &mut rng)?;
//! assert_eq!(header.sample_count(), 13_230);
//! # Ok::<(), whoosh_synth::WhooshError>(())
//! ```

pub mod envelope;
pub mod error;
pub mod osc;
pub mod wav;

use std::{io::Write, path::Path};

use envelope::{attack_decay::AttackDecayEnvelope, Envelope};
use osc::{noise::NoiseOscillator, sine::SineOscillator, Oscillator};
use rand::Rng;

pub use error::{Result, WhooshError};
pub use wav::WavHeader;

pub const DEFAULT_DURATION: f32 = 0.3;
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
pub const DEFAULT_PEAK_LEVEL: f32 = 0.8;
pub const DEFAULT_TONE_FREQ: f32 = 440.0;

#[derive(Debug, Clone, PartialEq)]
pub struct WhooshConfig {
    /// Length of the sound, in seconds.
    pub duration: f32,
    /// The sample rate of the output file, in Hz.
    pub sample_rate: u32,
    /// Peak absolute value after normalization, as a fraction of full scale.
    pub peak_level: f32,
    /// Gain of the noise layer.
    pub noise_amount: f32,
    /// Gain of the sine layer. Zero disables it.
    pub tone_amount: f32,
    /// Frequency of the sine layer, in Hz.
    pub tone_freq: f32,
}

impl Default for WhooshConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            sample_rate: DEFAULT_SAMPLE_RATE,
            peak_level: DEFAULT_PEAK_LEVEL,
            noise_amount: 1.0,
            tone_amount: 0.0,
            tone_freq: DEFAULT_TONE_FREQ,
        }
    }
}

impl WhooshConfig {
    /// Number of samples to render, `round(duration * sample_rate)`.
    pub fn sample_count(&self) -> Result<usize> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(WhooshError::invalid(format!(
                "duration must be positive, got {}",
                self.duration
            )));
        }
        if self.sample_rate == 0 {
            return Err(WhooshError::invalid("sample rate must be positive"));
        }

        let count = (self.duration as f64 * self.sample_rate as f64).round();
        if count < 1.0 {
            return Err(WhooshError::invalid(format!(
                "{} s at {} Hz yields no samples",
                self.duration, self.sample_rate
            )));
        }
        if count > wav::MAX_SAMPLE_COUNT as f64 {
            return Err(WhooshError::invalid(format!(
                "{} s at {} Hz is too long for a WAV file",
                self.duration, self.sample_rate
            )));
        }
        Ok(count as usize)
    }

    pub fn validate(&self) -> Result<()> {
        self.sample_count()?;

        if !(self.peak_level > 0.0 && self.peak_level <= 1.0) {
            return Err(WhooshError::invalid(format!(
                "peak level must be in (0, 1], got {}",
                self.peak_level
            )));
        }
        for (name, amount) in [("noise", self.noise_amount), ("tone", self.tone_amount)] {
            if !amount.is_finite() || amount < 0.0 {
                return Err(WhooshError::invalid(format!(
                    "{name} amount must be non-negative, got {amount}"
                )));
            }
        }
        if self.noise_amount == 0.0 && self.tone_amount == 0.0 {
            return Err(WhooshError::invalid("noise and tone amounts are both zero"));
        }
        if self.tone_amount > 0.0 && !(self.tone_freq.is_finite() && self.tone_freq > 0.0) {
            return Err(WhooshError::invalid(format!(
                "tone frequency must be positive, got {}",
                self.tone_freq
            )));
        }
        Ok(())
    }
}

/// Named sound profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WhooshPreset {
    /// Sword swing: 0.3 s of pure noise, peak at 0.1 s.
    #[default]
    Whoosh,
    /// Short sharp cut with a faint high whistle.
    Slice,
}

impl WhooshPreset {
    pub fn config(self) -> WhooshConfig {
        match self {
            WhooshPreset::Whoosh => WhooshConfig::default(),
            WhooshPreset::Slice => WhooshConfig {
                duration: 0.15,
                noise_amount: 0.8,
                tone_amount: 0.2,
                tone_freq: 1200.0,
                ..WhooshConfig::default()
            },
        }
    }

    pub fn envelope(self) -> AttackDecayEnvelope {
        match self {
            WhooshPreset::Whoosh => AttackDecayEnvelope::default(),
            WhooshPreset::Slice => AttackDecayEnvelope::new(0.02, 25.0),
        }
    }
}

pub struct WhooshSynth<E: Envelope = AttackDecayEnvelope> {
    cfg: WhooshConfig,
    envelope: E,
}

impl WhooshSynth {
    pub fn from_preset(preset: WhooshPreset) -> Self {
        Self::new(preset.config(), preset.envelope())
    }
}

impl<E: Envelope> WhooshSynth<E> {
    pub fn new(cfg: WhooshConfig, envelope: E) -> Self {
        Self { cfg, envelope }
    }

    pub fn config(&self) -> &WhooshConfig {
        &self.cfg
    }

    /// Render the normalized float buffer.
    ///
    /// All randomness is drawn from `rng`, so a seeded generator gives identical output.
    /// The buffer holds 4 bytes per sample; at the WAV size limit of about 2^31 samples that
    /// is 8 GiB, so very long renders are bounded by memory well before the format limit.
    pub fn render<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<f32>> {
        self.cfg.validate()?;
        self.envelope.validate()?;
        let count = self.cfg.sample_count()?;
        let sample_rate = self.cfg.sample_rate as f32;
        let delta_t = 1.0 / sample_rate;

        let mut buffer = vec![0.0f32; count];
        if self.cfg.noise_amount > 0.0 {
            let noise = NoiseOscillator;
            noise.fill_samples(
                &mut noise.create_state(),
                rng,
                &mut buffer,
                delta_t,
                0.0,
                self.cfg.noise_amount,
            );
        }
        if self.cfg.tone_amount > 0.0 {
            let tone = SineOscillator;
            tone.fill_samples(
                &mut tone.create_state(),
                rng,
                &mut buffer,
                delta_t,
                self.cfg.tone_freq,
                self.cfg.tone_amount,
            );
        }

        for (i, sample) in buffer.iter_mut().enumerate() {
            *sample *= self.envelope.sample(i as f32 / sample_rate);
        }

        let gain = normalize(&mut buffer, self.cfg.peak_level);
        log::debug!(
            "rendered {} samples at {} Hz, normalization gain {:.3}",
            count,
            self.cfg.sample_rate,
            gain
        );
        Ok(buffer)
    }

    /// Render and quantize to 16-bit samples.
    pub fn render_pcm<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<i16>> {
        Ok(self.render(rng)?.into_iter().map(wav::quantize).collect())
    }

    /// Render and encode a complete WAV stream into `writer`.
    pub fn write_wav<W: Write, R: Rng + ?Sized>(
        &self,
        writer: &mut W,
        rng: &mut R,
    ) -> Result<WavHeader> {
        let buffer = self.render(rng)?;
        let header = WavHeader::new(self.cfg.sample_rate, buffer.len())?;
        wav::encode(writer, &header, buffer.iter().map(|s| wav::quantize(*s)))
            .map_err(WhooshError::Write)?;
        Ok(header)
    }

    /// Render and write a WAV file to `path`, replacing any existing file.
    ///
    /// Parameters are validated before the file system is touched.
    pub fn write_to_file<P: AsRef<Path>, R: Rng + ?Sized>(
        &self,
        path: P,
        rng: &mut R,
    ) -> Result<WavHeader> {
        let path = path.as_ref();
        let buffer = self.render(rng)?;
        let header = wav::write_file(
            path,
            self.cfg.sample_rate,
            buffer.iter().map(|s| wav::quantize(*s)),
        )?;
        log::info!(
            "generated {} ({:.3} s, {} Hz)",
            path.display(),
            self.cfg.duration,
            self.cfg.sample_rate
        );
        Ok(header)
    }
}

/// Render a whoosh with the default attack/decay envelope and write it to `path`.
pub fn generate_whoosh<P: AsRef<Path>, R: Rng + ?Sized>(
    path: P,
    cfg: WhooshConfig,
    rng: &mut R,
) -> Result<WavHeader> {
    WhooshSynth::new(cfg, AttackDecayEnvelope::default()).write_to_file(path, rng)
}

/// Scale `buffer` so its largest absolute value equals `peak_level`.
///
/// Returns the applied gain. A silent buffer is left as is and the gain is `1.0`.
pub fn normalize(buffer: &mut [f32], peak_level: f32) -> f32 {
    let peak = buffer.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
    if peak == 0.0 {
        return 1.0;
    }
    let gain = peak_level / peak;
    for sample in buffer.iter_mut() {
        *sample *= gain;
    }
    gain
}

#[cfg(test)]
mod tests {
    use super::*;
    use envelope::gaussian::GaussianEnvelope;
    use rand::{rngs::StdRng, SeedableRng};

    fn peak(buf: &[f32]) -> f32 {
        buf.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
    }

    #[test]
    fn sample_count_rounds() {
        let cfg = WhooshConfig::default();
        assert_eq!(cfg.sample_count().unwrap(), 13_230);

        let cfg = WhooshConfig {
            duration: 0.5,
            sample_rate: 3,
            ..Default::default()
        };
        // 1.5 rounds half away from zero
        assert_eq!(cfg.sample_count().unwrap(), 2);

        let cfg = WhooshConfig {
            duration: 1.0 / 3.0,
            sample_rate: 48_000,
            ..Default::default()
        };
        assert_eq!(cfg.sample_count().unwrap(), 16_000);
    }

    #[test]
    fn rejects_non_positive_duration_and_rate() {
        for duration in [0.0, -0.3, f32::NAN, f32::INFINITY] {
            let cfg = WhooshConfig {
                duration,
                ..Default::default()
            };
            assert!(matches!(
                cfg.sample_count(),
                Err(WhooshError::InvalidParameter(_))
            ));
        }
        let cfg = WhooshConfig {
            sample_rate: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(WhooshError::InvalidParameter(_))));

        // rounds to zero samples
        let cfg = WhooshConfig {
            duration: 1e-6,
            sample_rate: 8_000,
            ..Default::default()
        };
        assert!(cfg.sample_count().is_err());
    }

    #[test]
    fn rejects_bad_levels() {
        let bad = [
            WhooshConfig {
                peak_level: 0.0,
                ..Default::default()
            },
            WhooshConfig {
                peak_level: 1.5,
                ..Default::default()
            },
            WhooshConfig {
                noise_amount: -1.0,
                ..Default::default()
            },
            WhooshConfig {
                noise_amount: 0.0,
                tone_amount: 0.0,
                ..Default::default()
            },
            WhooshConfig {
                tone_amount: 0.5,
                tone_freq: 0.0,
                ..Default::default()
            },
        ];
        for cfg in bad {
            assert!(cfg.validate().is_err(), "{cfg:?} should be rejected");
        }
        assert!(WhooshConfig::default().validate().is_ok());
        assert!(WhooshPreset::Slice.config().validate().is_ok());
    }

    #[test]
    fn render_normalizes_to_peak_level() {
        let synth = WhooshSynth::from_preset(WhooshPreset::Whoosh);
        let buf = synth.render(&mut StdRng::seed_from_u64(3)).unwrap();

        assert_eq!(buf.len(), 13_230);
        assert!((peak(&buf) - 0.8).abs() < 1e-6);
        // envelope is zero at t = 0
        assert_eq!(buf[0], 0.0);
    }

    #[test]
    fn render_follows_the_envelope() {
        let synth = WhooshSynth::from_preset(WhooshPreset::Whoosh);
        let buf = synth.render(&mut StdRng::seed_from_u64(11)).unwrap();

        // around the peak at 0.1 s the signal is much louder than at the tail
        let around_peak = peak(&buf[4_000..4_900]);
        let tail = peak(&buf[12_000..]);
        assert!(around_peak > 0.5);
        assert!(tail < around_peak * 0.1);
    }

    #[test]
    fn same_seed_same_samples() {
        let synth = WhooshSynth::from_preset(WhooshPreset::Slice);
        let a = synth.render_pcm(&mut StdRng::seed_from_u64(99)).unwrap();
        let b = synth.render_pcm(&mut StdRng::seed_from_u64(99)).unwrap();
        let c = synth.render_pcm(&mut StdRng::seed_from_u64(100)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn pcm_peak_matches_quantized_level() {
        let synth = WhooshSynth::from_preset(WhooshPreset::Whoosh);
        let pcm = synth.render_pcm(&mut StdRng::seed_from_u64(5)).unwrap();
        let max = pcm.iter().map(|s| s.unsigned_abs()).max().unwrap();
        assert_eq!(max, 26_214);
    }

    #[test]
    fn tone_only_whoosh() {
        let cfg = WhooshConfig {
            noise_amount: 0.0,
            tone_amount: 1.0,
            tone_freq: 1000.0,
            ..Default::default()
        };
        let synth = WhooshSynth::new(cfg, GaussianEnvelope::default());
        let a = synth.render(&mut StdRng::seed_from_u64(1)).unwrap();
        let b = synth.render(&mut StdRng::seed_from_u64(2)).unwrap();
        // no noise layer, so the random source does not matter
        assert_eq!(a, b);
        assert!((peak(&a) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn write_wav_produces_full_stream() {
        let synth = WhooshSynth::from_preset(WhooshPreset::Whoosh);
        let mut out = Vec::new();
        let header = synth
            .write_wav(&mut out, &mut StdRng::seed_from_u64(8))
            .unwrap();

        assert_eq!(header.sample_count(), 13_230);
        assert_eq!(header.data_size(), 26_460);
        assert_eq!(out.len(), 26_504);
        assert_eq!(&out[..4], b"RIFF");
    }

    #[test]
    fn rejects_bad_envelope() {
        for envelope in [
            AttackDecayEnvelope::new(f32::NAN, 15.0),
            AttackDecayEnvelope::new(0.1, -1000.0),
        ] {
            let synth = WhooshSynth::new(WhooshConfig::default(), envelope);
            assert!(matches!(
                synth.render_pcm(&mut StdRng::seed_from_u64(1)),
                Err(WhooshError::InvalidParameter(_))
            ));
            let mut out = Vec::new();
            assert!(synth
                .write_wav(&mut out, &mut StdRng::seed_from_u64(1))
                .is_err());
            assert!(out.is_empty());
        }

        let synth = WhooshSynth::new(WhooshConfig::default(), GaussianEnvelope::new(0.1, -2.0));
        assert!(synth.render(&mut StdRng::seed_from_u64(1)).is_err());
    }

    /// Accepts a few bytes, then fails every write.
    struct FailingWriter {
        budget: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.budget == 0 {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
            }
            let n = buf.len().min(self.budget);
            self.budget -= n;
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writer_failure_is_a_write_error() {
        let synth = WhooshSynth::from_preset(WhooshPreset::Whoosh);
        let err = synth
            .write_wav(&mut FailingWriter { budget: 100 }, &mut StdRng::seed_from_u64(4))
            .unwrap_err();
        match err {
            WhooshError::Write(source) => assert_eq!(source.to_string(), "disk full"),
            other => panic!("expected a write error, got {other}"),
        }
    }

    #[test]
    fn normalize_handles_silence() {
        let mut buf = vec![0.0f32; 16];
        assert_eq!(normalize(&mut buf, 0.8), 1.0);
        assert!(buf.iter().all(|s| *s == 0.0));

        let mut buf = vec![0.1, -0.4, 0.2];
        let gain = normalize(&mut buf, 0.8);
        assert!((gain - 2.0).abs() < 1e-6);
        assert!((buf[1] + 0.8).abs() < 1e-6);
    }
}
