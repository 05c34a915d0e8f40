//! Backing storage for bytes spilled out of memory.

use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// A temporary byte store with an append-only write view and a forward-only
/// read view over the same object.
///
/// Bytes passed to [`append`](Staging::append) become visible to
/// [`read`](Staging::read) once the call returns.
pub trait Staging {
    /// Append bytes at the end of the store.
    fn append(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Read from the current cursor. `Ok(0)` means everything appended so far
    /// has been consumed.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Everything appended so far, independent of the read cursor.
    fn contents(&self) -> io::Result<Vec<u8>>;

    /// Release both views and delete the store.
    fn remove(self) -> io::Result<()>
    where
        Self: Sized;
}

/// Staging backed by a named temporary file.
///
/// The file handle returned by `tempfile` is the write view; a second handle
/// opened on the same path is the read view and keeps its own cursor.
pub struct TempFileStaging {
    writer: NamedTempFile,
    reader: File,
}

impl TempFileStaging {
    /// Create a staging file in the system temp directory.
    pub fn new() -> Result<Self> {
        let writer = NamedTempFile::new().map_err(Error::StagingCreate)?;
        Self::from_named(writer)
    }

    /// Create a staging file inside `dir`.
    pub fn new_in(dir: impl AsRef<Path>) -> Result<Self> {
        let writer = NamedTempFile::new_in(dir).map_err(Error::StagingCreate)?;
        Self::from_named(writer)
    }

    fn from_named(writer: NamedTempFile) -> Result<Self> {
        let reader = writer.reopen().map_err(Error::StagingCreate)?;
        tracing::debug!(path = %writer.path().display(), "created staging file");
        Ok(Self { writer, reader })
    }

    /// Location of the staging file while it exists.
    pub fn path(&self) -> &Path {
        self.writer.path()
    }
}

impl Staging for TempFileStaging {
    fn append(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.writer.write_all(bytes)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }

    fn contents(&self) -> io::Result<Vec<u8>> {
        fs::read(self.writer.path())
    }

    fn remove(self) -> io::Result<()> {
        let Self { writer, reader } = self;
        // The reader goes first so no handle outlives the directory entry.
        drop(reader);
        let path = writer.path().to_path_buf();
        writer.close()?;
        tracing::debug!(path = %path.display(), "removed staging file");
        Ok(())
    }
}
