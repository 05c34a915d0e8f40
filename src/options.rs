//! Tuning knobs for the encoder's spill buffer.

use crate::error::Result;
use crate::spill::TempFileStaging;
use std::path::PathBuf;

/// In-memory chunk size used when nothing else is configured.
pub const DEFAULT_CHUNK_THRESHOLD: usize = 4096;

/// Options controlling where and how sample data is spooled.
#[derive(Debug, Clone)]
pub struct EncoderOptions {
    /// Bytes held in memory before spilling to staging storage.
    pub chunk_threshold: usize,
    /// Directory for the staging file; the system temp dir when `None`.
    pub temp_dir: Option<PathBuf>,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            chunk_threshold: DEFAULT_CHUNK_THRESHOLD,
            temp_dir: None,
        }
    }
}

impl EncoderOptions {
    pub fn chunk_threshold(mut self, bytes: usize) -> Self {
        self.chunk_threshold = bytes;
        self
    }

    pub fn temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Allocate the staging file these options describe.
    pub fn create_staging(&self) -> Result<TempFileStaging> {
        match self.temp_dir {
            Some(ref dir) => TempFileStaging::new_in(dir),
            None => TempFileStaging::new(),
        }
    }
}
