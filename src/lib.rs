//! Wavspool - streaming WAV encoder.
//!
//! Sample data is spooled through a memory-bounded [`spill::SpillBuffer`]
//! so a [`wav::WavEncoder`] can write a correct RIFF header without knowing
//! the payload size up front. This module also exposes the CLI types for
//! tools like man page generation.

use clap::{CommandFactory, Parser, Subcommand};

pub mod commands;
pub mod error;
pub mod options;
pub mod progress;
pub mod spill;
pub mod verbosity;
pub mod wav;

pub use error::{Error, Result};
pub use options::EncoderOptions;
pub use progress::Progress;
pub use spill::{SpillBuffer, Staging, TempFileStaging};
pub use verbosity::Verbosity;
pub use wav::{Sink, WavEncoder, WavFormat};

#[derive(Parser)]
#[command(name = "wavspool")]
#[command(about = "Streaming WAV encoder - wrap raw PCM in a RIFF/WAVE container")]
#[command(version)]
pub struct Cli {
    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Show detailed output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the clap Command for man page generation.
    pub fn cmd() -> clap::Command {
        <Self as CommandFactory>::command()
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Wrap raw interleaved samples in a WAV container
    Encode(commands::encode::EncodeArgs),

    /// Synthesize a sine tone into a WAV file
    Tone(commands::tone::ToneArgs),

    /// Generate shell completions
    Completions(commands::completions::CompletionsArgs),
}
