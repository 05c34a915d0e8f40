use super::{SpoolArgs, describe, discard_on_error, open_output};
use crate::progress::Progress;
use crate::wav::{Sink, WavEncoder, WavFormat};
use crate::Verbosity;
use anyhow::{Context, Result, anyhow};
use clap::Args;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

/// Sample frames pulled from the input per read.
const FRAMES_PER_READ: usize = 4096;

#[derive(Args)]
pub struct EncodeArgs {
    /// Raw interleaved little-endian sample data, or "-" for stdin
    pub input: PathBuf,

    /// Output WAV file, or "-" for stdout
    #[arg(short, long)]
    pub output: PathBuf,

    /// Number of interleaved channels
    #[arg(long)]
    pub channels: u16,

    /// Sample rate in Hz
    #[arg(long)]
    pub sample_rate: u32,

    /// Bits per sample
    #[arg(long)]
    pub bits: u16,

    /// Format tag written to the fmt chunk (1 = integer PCM)
    #[arg(long, default_value_t = crate::wav::format::FORMAT_PCM)]
    pub format_tag: u16,

    #[command(flatten)]
    pub spool: SpoolArgs,
}

/// What a finished encode wrote.
struct Summary {
    frames: u64,
    data_size: u64,
}

pub fn run(args: EncodeArgs, verbosity: Verbosity) -> Result<()> {
    let format = WavFormat {
        format_tag: args.format_tag,
        channels: args.channels,
        sample_rate: args.sample_rate,
        bits_per_sample: args.bits,
    };

    let from_stdin = args.input.as_os_str() == "-";
    let input: Box<dyn Read> = if from_stdin {
        Box::new(io::stdin().lock())
    } else {
        if !args.input.exists() {
            return Err(anyhow!("Input file does not exist: {}", args.input.display()));
        }
        let file = File::open(&args.input)
            .with_context(|| format!("Failed to open input file: {}", args.input.display()))?;
        Box::new(file)
    };

    let sink = open_output(&args.output)?;
    let result = encode(input, sink, format, &args, verbosity);
    let summary = discard_on_error(&args.output, result)?;

    if verbosity.show_status() {
        eprintln!(
            "Encoded {} frames ({} bytes of sample data) into {}",
            summary.frames,
            summary.data_size,
            describe(&args.output)
        );
    }

    Ok(())
}

/// Pump `input` through an encoder into `sink`. The encoder is gone by the
/// time this returns, whatever the outcome.
fn encode(
    mut input: Box<dyn Read>,
    sink: Box<dyn Sink>,
    format: WavFormat,
    args: &EncodeArgs,
    verbosity: Verbosity,
) -> Result<Summary> {
    let spool = &args.spool;
    let mut encoder = WavEncoder::with_options(sink, format, &spool.options())
        .map_err(|e| spool.explain(e))
        .context("Failed to set up encoder")?;

    let progress = Progress::bytes("Encoding", verbosity);
    let pumped = pump(&mut *input, &mut encoder, spool, &progress);
    progress.finish_and_clear();
    pumped?;

    let summary = Summary {
        frames: encoder.frames_written(),
        data_size: encoder.data_size(),
    };
    encoder
        .finalize()
        .map_err(|e| spool.explain(e))
        .with_context(|| format!("Failed to write {}", describe(&args.output)))?;
    Ok(summary)
}

/// Feed whole frames from `input` to the encoder until the input ends.
fn pump<W: Sink>(
    input: &mut dyn Read,
    encoder: &mut WavEncoder<W>,
    spool: &SpoolArgs,
    progress: &Progress,
) -> Result<()> {
    let block_align = usize::from(encoder.block_align());
    let mut buf = vec![0u8; block_align * FRAMES_PER_READ];

    loop {
        let n = fill(input, &mut buf).context("Failed to read input")?;
        if n == 0 {
            return Ok(());
        }
        if n % block_align != 0 {
            return Err(anyhow!(
                "Input ends with a partial sample frame: {} trailing bytes (block size {})",
                n % block_align,
                block_align
            ));
        }
        encoder.write_samples(&buf[..n]).map_err(|e| spool.explain(e))?;
        progress.inc(n as u64);
        if n < buf.len() {
            return Ok(());
        }
    }
}

/// Read until `buf` is full or the input ends.
fn fill(input: &mut dyn Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
