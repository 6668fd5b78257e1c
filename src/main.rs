use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, ValueEnum};
use rand::{rngs::StdRng, SeedableRng};
use whoosh_synth::{
    envelope::{gaussian::GaussianEnvelope, Envelope},
    Result, WavHeader, WhooshConfig, WhooshPreset, WhooshSynth,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    Whoosh,
    Slice,
}

impl From<Preset> for WhooshPreset {
    fn from(p: Preset) -> Self {
        match p {
            Preset::Whoosh => WhooshPreset::Whoosh,
            Preset::Slice => WhooshPreset::Slice,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Shape {
    /// Linear attack, exponential decay
    Linear,
    /// Bell curve centered on the peak
    Gaussian,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "whoosh")]
#[command(about = "Generate a procedural whoosh sound effect as a mono 16-bit WAV file", long_about = None)]
struct Args {
    /// Output file
    #[arg(value_name = "OUTPUT", default_value = "SwordWhoosh.wav")]
    output: PathBuf,

    /// Sound profile to start from
    #[arg(long, value_enum, default_value = "whoosh")]
    preset: Preset,

    /// Envelope shape
    #[arg(long, value_enum, default_value = "linear")]
    envelope: Shape,

    /// Length of the sound (overrides the preset)
    #[arg(long, value_name = "SECONDS")]
    duration: Option<f32>,

    /// Sample rate (overrides the preset)
    #[arg(long, value_name = "HZ")]
    sample_rate: Option<u32>,

    /// Normalization ceiling as a fraction of full scale
    #[arg(long, value_name = "LEVEL")]
    peak_level: Option<f32>,

    /// Seed for the noise generator; random when omitted
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn config(&self) -> WhooshConfig {
        let mut cfg = WhooshPreset::from(self.preset).config();
        if let Some(duration) = self.duration {
            cfg.duration = duration;
        }
        if let Some(sample_rate) = self.sample_rate {
            cfg.sample_rate = sample_rate;
        }
        if let Some(peak_level) = self.peak_level {
            cfg.peak_level = peak_level;
        }
        cfg
    }
}

fn write<E: Envelope>(synth: WhooshSynth<E>, args: &Args, rng: &mut StdRng) -> Result<WavHeader> {
    synth.write_to_file(&args.output, rng)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let preset = WhooshPreset::from(args.preset);
    let cfg = args.config();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let result = match args.envelope {
        Shape::Linear => write(WhooshSynth::new(cfg, preset.envelope()), &args, &mut rng),
        Shape::Gaussian => write(WhooshSynth::new(cfg, GaussianEnvelope::default()), &args, &mut rng),
    };

    match result {
        Ok(header) => {
            log::debug!("{} bytes total", header.file_size());
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
