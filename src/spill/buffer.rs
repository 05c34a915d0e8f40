use super::staging::{Staging, TempFileStaging};
use crate::error::{Error, Result};

/// Largest up-front allocation for the in-memory chunk. Thresholds above
/// this still work; the chunk just grows on demand.
const MAX_CHUNK_RESERVE: usize = 1 << 20;

fn chunk_reserve(chunk_threshold: usize) -> usize {
    chunk_threshold.saturating_mul(2).min(MAX_CHUNK_RESERVE)
}

/// Append-only byte buffer that keeps at most about `2 × chunk_threshold`
/// bytes in memory and spills the rest to a [`Staging`] store.
pub struct SpillBuffer<S: Staging = TempFileStaging> {
    chunk_threshold: usize,
    chunk: Vec<u8>,
    total_written: u64,
    staging: S,
}

impl SpillBuffer<TempFileStaging> {
    /// Buffer spilling to a temp file in the system temp directory.
    pub fn new(chunk_threshold: usize) -> Result<Self> {
        Ok(Self::with_staging(chunk_threshold, TempFileStaging::new()?))
    }
}

impl<S: Staging> SpillBuffer<S> {
    pub fn with_staging(chunk_threshold: usize, staging: S) -> Self {
        Self {
            chunk_threshold,
            chunk: Vec::with_capacity(chunk_reserve(chunk_threshold)),
            total_written: 0,
            staging,
        }
    }

    /// Append bytes.
    ///
    /// The byte count is bumped before the chunk is spilled. When spilling
    /// fails with [`Error::StagingWrite`] the count already includes `bytes`
    /// and the chunk stays in memory, so a later flush may still persist it.
    /// Do not write the same bytes again after such a failure.
    pub fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        self.total_written += bytes.len() as u64;
        self.chunk.extend_from_slice(bytes);

        if self.chunk.len() > self.chunk_threshold {
            self.flush()?;
        }

        Ok(bytes.len())
    }

    /// Everything written so far, staged bytes first.
    ///
    /// Loads the whole payload into memory; meant for small payloads and
    /// debugging. Does not move the streaming cursor.
    pub fn materialize(&self) -> Result<Vec<u8>> {
        let mut raw = self.staging.contents().map_err(Error::StagingRead)?;
        raw.extend_from_slice(&self.chunk);
        Ok(raw)
    }

    /// Read the next bytes in write order. Returns `Ok(0)` once every byte
    /// written so far has been consumed.
    pub fn read_next(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.flush()?;
        self.staging.read(buf).map_err(Error::StagingRead)
    }

    /// Total bytes ever written, including any not yet spilled.
    pub fn data_size(&self) -> u64 {
        self.total_written
    }

    pub fn chunk_threshold(&self) -> usize {
        self.chunk_threshold
    }

    /// Bytes currently held in memory.
    pub fn resident_len(&self) -> usize {
        self.chunk.len()
    }

    /// Delete the staging store. Consumes the buffer, so unread data is lost.
    pub fn close(self) -> Result<()> {
        tracing::debug!(total = self.total_written, "closing spill buffer");
        self.staging.remove().map_err(Error::StagingClose)
    }

    fn flush(&mut self) -> Result<()> {
        if self.chunk.is_empty() {
            return Ok(());
        }
        self.staging
            .append(&self.chunk)
            .map_err(Error::StagingWrite)?;
        tracing::debug!(
            bytes = self.chunk.len(),
            total = self.total_written,
            "spilled chunk to staging"
        );
        self.chunk = Vec::with_capacity(chunk_reserve(self.chunk_threshold));
        Ok(())
    }
}
