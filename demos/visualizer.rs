use rand::{rngs::StdRng, SeedableRng};
use whoosh_synth::{WhooshConfig, WhooshPreset, WhooshSynth};

fn main() {
    let cfg = WhooshConfig {
        sample_rate: 4000,
        ..WhooshPreset::Whoosh.config()
    };
    let synth = WhooshSynth::new(cfg, WhooshPreset::Whoosh.envelope());

    let out_buf = match synth.render(&mut StdRng::seed_from_u64(0)) {
        Ok(buf) => buf,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };

    // one row per 2.5 ms keeps the whole sound on screen
    let rows = synth.config().sample_rate as usize / 400;
    for sample in out_buf.iter().step_by(rows) {
        // construct a waveform
        let width = 80;
        let zero = width / 2;
        let amp = (sample * zero as f32) as i32;
        let mut wave = String::new();
        for i in 0..width {
            if i == zero {
                wave.push('|');
            } else if i == zero + amp {
                wave.push('+');
            } else {
                wave.push(' ');
            }
        }
        println!("{}", wave);
    }
}
