//! Renders each of the four render routines to a WAV file in `out/`.

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use simple_logger::SimpleLogger;

use sinop_dsp::oscillator::sin_op::{InitialValues, SinOp};
use sinop_dsp::resources::sine::SineTable;
use sinop_dsp::unit::{Input, Rate, Unit, UnitInputs};
use sinop_dsp::{SampleRate, BLOCK_SIZE, SAMPLE_RATE};

const DURATION: f32 = 3.0;
const FREQUENCY: f32 = 110.0;

fn main() -> hound::Result<()> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Debug)
        .init()
        .unwrap();

    std::fs::create_dir_all("out")?;

    let routines = [
        ("audio_audio", Rate::Audio, Rate::Audio),
        ("audio_control", Rate::Audio, Rate::Control),
        ("control_audio", Rate::Control, Rate::Audio),
        ("control_control", Rate::Control, Rate::Control),
    ];

    for (name, frequency_rate, phase_rate) in routines {
        let unit: Box<dyn Unit> = Box::new(SinOp::new(
            SineTable::shared(),
            SampleRate::new(SAMPLE_RATE),
            frequency_rate,
            phase_rate,
            InitialValues::new(FREQUENCY, 0.0, 0.0),
        ));

        let samples = render(unit, frequency_rate, phase_rate);
        let path = format!("out/sin_op_{name}.wav");
        write(Path::new(&path), &samples)?;

        log::info!("Wrote {} samples to {}", samples.len(), path);
    }

    Ok(())
}

/// Vibrato on the frequency, a slow phase wobble and a feedback sweep from
/// -2 to 2. Control-rate inputs take the first value of each block.
fn render(mut unit: Box<dyn Unit>, frequency_rate: Rate, phase_rate: Rate) -> Vec<f32> {
    let blocks = (DURATION * SAMPLE_RATE / BLOCK_SIZE as f32) as usize;
    let mut frequencies = [0.0; BLOCK_SIZE];
    let mut phases = [0.0; BLOCK_SIZE];
    let mut out = [0.0; BLOCK_SIZE];
    let mut samples = Vec::with_capacity(blocks * BLOCK_SIZE);

    for n in 0..blocks {
        for i in 0..BLOCK_SIZE {
            let t = (n * BLOCK_SIZE + i) as f32 / SAMPLE_RATE;
            frequencies[i] = FREQUENCY * (1.0 + 0.02 * (core::f32::consts::TAU * 5.0 * t).sin());
            phases[i] = 0.5 * (core::f32::consts::TAU * 0.5 * t).sin();
        }

        let inputs = UnitInputs {
            frequency: match frequency_rate {
                Rate::Audio => Input::Audio(&frequencies),
                Rate::Control => Input::Control(frequencies[0]),
            },
            phase: match phase_rate {
                Rate::Audio => Input::Audio(&phases),
                Rate::Control => Input::Control(phases[0]),
            },
            feedback: -2.0 + 4.0 * n as f32 / blocks as f32,
        };

        unit.next(&inputs, &mut out);
        samples.extend_from_slice(&out);
    }

    samples
}

fn write(path: &Path, samples: &[f32]) -> hound::Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE as u32,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec)?;

    for sample in samples {
        writer.write_sample(*sample * 0.5)?;
    }

    writer.finalize()
}
