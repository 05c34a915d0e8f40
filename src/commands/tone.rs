use super::{SpoolArgs, describe, discard_on_error, open_output};
use crate::progress::Progress;
use crate::wav::{Sample, Sink, WavEncoder, WavFormat};
use crate::Verbosity;
use anyhow::{Context, Result, anyhow};
use clap::Args;
use std::f32::consts::PI;
use std::ops::Range;
use std::path::PathBuf;

const FRAMES_PER_WRITE: u64 = 1024;

#[derive(Args)]
pub struct ToneArgs {
    /// Output WAV file, or "-" for stdout
    #[arg(short, long)]
    pub output: PathBuf,

    /// Tone frequency in Hz
    #[arg(long, default_value_t = 440.0)]
    pub frequency: f32,

    /// Duration in seconds
    #[arg(long, default_value_t = 1.0)]
    pub duration: f32,

    /// Sample rate in Hz
    #[arg(long, default_value_t = 44100)]
    pub sample_rate: u32,

    /// Number of channels (the tone is copied to each)
    #[arg(long, default_value_t = 1)]
    pub channels: u16,

    /// Bits per sample (8, 16 or 32)
    #[arg(long, default_value_t = 16)]
    pub bits: u16,

    /// Peak amplitude from 0.0 to 1.0
    #[arg(long, default_value_t = 0.5)]
    pub amplitude: f32,

    #[command(flatten)]
    pub spool: SpoolArgs,
}

/// Sample widths the synthesizer can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Width {
    U8,
    I16,
    I32,
}

impl Width {
    fn from_bits(bits: u16) -> Result<Self> {
        match bits {
            8 => Ok(Width::U8),
            16 => Ok(Width::I16),
            32 => Ok(Width::I32),
            24 => Err(anyhow::Error::new(crate::Error::NotImplemented(
                "24-bit sample packing",
            ))
            .context("Cannot synthesize a 24-bit tone")),
            other => Err(anyhow!("Unsupported bits per sample: {}", other)),
        }
    }
}

pub fn run(args: ToneArgs, verbosity: Verbosity) -> Result<()> {
    if args.duration.is_nan() || args.duration < 0.0 {
        return Err(anyhow!("Duration must be non-negative, got {}", args.duration));
    }
    let width = Width::from_bits(args.bits)?;

    let sink = open_output(&args.output)?;
    let result = synthesize(sink, width, &args, verbosity);
    discard_on_error(&args.output, result)?;

    if verbosity.show_status() {
        eprintln!(
            "Wrote {:.2}s {} Hz tone to {}",
            args.duration,
            args.frequency,
            describe(&args.output)
        );
    }

    Ok(())
}

fn synthesize(
    sink: Box<dyn Sink>,
    width: Width,
    args: &ToneArgs,
    verbosity: Verbosity,
) -> Result<()> {
    let format = WavFormat::pcm(args.channels, args.sample_rate, args.bits);
    let spool = &args.spool;
    let mut encoder = WavEncoder::with_options(sink, format, &spool.options())
        .map_err(|e| spool.explain(e))
        .context("Failed to set up encoder")?;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total_frames = (args.sample_rate as f32 * args.duration) as u64;
    let progress = Progress::frames(total_frames, verbosity);
    let tone = Tone {
        frequency: args.frequency,
        sample_rate: args.sample_rate,
        amplitude: args.amplitude.clamp(0.0, 1.0),
        channels: args.channels,
    };

    let mut start = 0;
    while start < total_frames {
        let end = (start + FRAMES_PER_WRITE).min(total_frames);
        let frames = start..end;
        let written = match width {
            Width::U8 => tone.write(&mut encoder, frames, |v| (v * 127.0 + 128.0).round() as u8),
            Width::I16 => tone.write(&mut encoder, frames, |v| {
                (v * f32::from(i16::MAX)).round() as i16
            }),
            Width::I32 => tone.write(&mut encoder, frames, |v| {
                (f64::from(v) * f64::from(i32::MAX)).round() as i32
            }),
        };
        if let Err(err) = written {
            progress.finish_and_clear();
            return Err(spool.explain(err));
        }
        progress.inc(end - start);
        start = end;
    }
    progress.finish_and_clear();

    encoder
        .finalize()
        .map_err(|e| spool.explain(e))
        .with_context(|| format!("Failed to write {}", describe(&args.output)))
}

struct Tone {
    frequency: f32,
    sample_rate: u32,
    amplitude: f32,
    channels: u16,
}

impl Tone {
    fn value(&self, frame: u64) -> f32 {
        let t = frame as f32 / self.sample_rate as f32;
        (t * self.frequency * 2.0 * PI).sin() * self.amplitude
    }

    /// Render frames `range` with `convert` and hand them to the encoder.
    fn write<W: Sink, T: Sample>(
        &self,
        encoder: &mut WavEncoder<W>,
        range: Range<u64>,
        convert: impl Fn(f32) -> T,
    ) -> crate::Result<usize> {
        let channels = usize::from(self.channels);
        let mut samples = Vec::with_capacity((range.end - range.start) as usize * channels);
        for frame in range {
            let sample = convert(self.value(frame));
            samples.extend(std::iter::repeat_n(sample, channels));
        }
        encoder.write_typed(&samples)
    }
}
