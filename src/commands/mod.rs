pub mod completions;
pub mod encode;
pub mod tone;

use crate::options::{DEFAULT_CHUNK_THRESHOLD, EncoderOptions};
use crate::wav::Sink;
use anyhow::{Context, Result};
use clap::Args;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

/// Spooling flags shared by the encoding commands.
#[derive(Args, Debug, Clone)]
pub struct SpoolArgs {
    /// Bytes held in memory before spilling to the staging file
    #[arg(long, default_value_t = DEFAULT_CHUNK_THRESHOLD)]
    pub chunk_threshold: usize,

    /// Directory for the staging file (defaults to the system temp dir)
    #[arg(long)]
    pub temp_dir: Option<PathBuf>,
}

impl SpoolArgs {
    pub fn options(&self) -> EncoderOptions {
        let options = EncoderOptions::default().chunk_threshold(self.chunk_threshold);
        match self.temp_dir {
            Some(ref dir) => options.temp_dir(dir),
            None => options,
        }
    }

    /// Name the staging directory on errors that came from the spool.
    pub fn explain(&self, err: crate::Error) -> anyhow::Error {
        if !err.is_staging() {
            return err.into();
        }
        let dir = self.temp_dir.clone().unwrap_or_else(std::env::temp_dir);
        anyhow::Error::new(err).context(format!("Staging file in {} failed", dir.display()))
    }
}

/// `-` selects stdout.
pub fn is_stdout(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Human-readable name of an output destination.
pub fn describe(path: &Path) -> String {
    if is_stdout(path) {
        "stdout".to_string()
    } else {
        path.display().to_string()
    }
}

/// Open the WAV destination, buffered.
pub fn open_output(path: &Path) -> Result<Box<dyn Sink>> {
    if is_stdout(path) {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Delete a file output when `result` is an error, so a failed run does not
/// leave a truncated WAV behind. The encoder writing to it must already be
/// dropped.
pub fn discard_on_error<T>(path: &Path, result: Result<T>) -> Result<T> {
    if result.is_err() && !is_stdout(path) {
        match fs::remove_file(path) {
            Ok(()) => tracing::debug!(path = %path.display(), "removed incomplete output"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to remove incomplete output"
                );
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use tempfile::tempdir;

    fn spool(temp_dir: Option<PathBuf>) -> SpoolArgs {
        SpoolArgs {
            chunk_threshold: DEFAULT_CHUNK_THRESHOLD,
            temp_dir,
        }
    }

    #[test]
    fn test_explain_names_staging_dir() {
        let args = spool(Some(PathBuf::from("/nowhere/spool")));
        let err = args.explain(crate::Error::StagingCreate(io::Error::other("gone")));
        assert_eq!(err.to_string(), "Staging file in /nowhere/spool failed");
        assert!(err.downcast_ref::<crate::Error>().is_some());
    }

    #[test]
    fn test_explain_leaves_other_errors_alone() {
        let args = spool(None);
        let err = args.explain(crate::Error::NotImplemented("24-bit sample packing"));
        assert_eq!(err.to_string(), "24-bit sample packing is not implemented");
    }

    #[test]
    fn test_discard_on_error_removes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.wav");
        fs::write(&path, b"RIFF").unwrap();

        let result: Result<()> = discard_on_error(&path, Err(anyhow!("encode failed")));
        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_discard_on_error_keeps_success() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.wav");
        fs::write(&path, b"RIFF").unwrap();

        assert_eq!(discard_on_error(&path, Ok(7)).unwrap(), 7);
        assert!(path.exists());
    }

    #[test]
    fn test_stdout_is_never_removed() {
        assert!(is_stdout(Path::new("-")));
        assert_eq!(describe(Path::new("-")), "stdout");
        let result: Result<()> = discard_on_error(Path::new("-"), Err(anyhow!("boom")));
        assert!(result.is_err());
    }
}
