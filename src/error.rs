//! Error types for spooling and encoding.

use std::io;
use thiserror::Error;

/// Result type for wavspool operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while spooling sample data or writing the container.
#[derive(Debug, Error)]
pub enum Error {
    /// Format parameters do not describe a usable sample frame.
    #[error("invalid format: {reason} (channels={channels}, bits_per_sample={bits_per_sample})")]
    Configuration {
        /// Requested channel count.
        channels: u16,
        /// Requested bits per sample.
        bits_per_sample: u16,
        /// What was wrong with them.
        reason: &'static str,
    },

    /// A write did not contain a whole number of sample frames.
    #[error("write of {len} bytes is not a positive multiple of the {block_align}-byte block size")]
    Alignment {
        /// Length of the rejected write.
        len: usize,
        /// Bytes per sample frame.
        block_align: u16,
    },

    /// The requested sample width has no encoder.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    /// The payload would no longer fit the 32-bit RIFF size fields.
    #[error("data chunk would grow to {requested} bytes, limit is {limit}")]
    DataTooLarge {
        /// Payload size after the rejected write.
        requested: u64,
        /// Largest payload the container can describe.
        limit: u64,
    },

    /// The staging store could not be allocated.
    #[error("failed to create staging storage: {0}")]
    StagingCreate(#[source] io::Error),

    /// Spilling buffered bytes to staging storage failed.
    #[error("failed to write staging storage: {0}")]
    StagingWrite(#[source] io::Error),

    /// Reading back staged bytes failed.
    #[error("failed to read staging storage: {0}")]
    StagingRead(#[source] io::Error),

    /// Releasing or removing the staging store failed.
    #[error("failed to close staging storage: {0}")]
    StagingClose(#[source] io::Error),

    /// The destination rejected a write or close.
    #[error("output sink error: {0}")]
    Sink(#[source] io::Error),

    /// A fixed header field could not be written.
    #[error("failed to write WAV header: {0}")]
    HeaderSerialization(#[source] io::Error),
}

impl Error {
    /// Creates a configuration error for the given format parameters.
    pub fn configuration(channels: u16, bits_per_sample: u16, reason: &'static str) -> Self {
        Self::Configuration {
            channels,
            bits_per_sample,
            reason,
        }
    }

    /// True for the staging I/O variants.
    pub fn is_staging(&self) -> bool {
        matches!(
            self,
            Error::StagingCreate(_)
                | Error::StagingWrite(_)
                | Error::StagingRead(_)
                | Error::StagingClose(_)
        )
    }
}
