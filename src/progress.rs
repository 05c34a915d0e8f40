//! Progress indicators for long-running encodes.
//!
//! Respects verbosity settings - no progress in quiet mode.

use crate::Verbosity;
use indicatif::{ProgressBar, ProgressStyle};

/// A progress bar that respects verbosity settings.
pub struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    /// Bar over a known number of sample frames.
    pub fn frames(total: u64, verbosity: Verbosity) -> Self {
        let bar = verbosity.show_status().then(|| {
            let pb = ProgressBar::new(total);
            let template = "{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} frames {msg}";
            if let Ok(style) = ProgressStyle::with_template(template) {
                pb.set_style(style.progress_chars("#>-"));
            }
            pb
        });
        Self { bar }
    }

    /// Byte counter for input of unknown length, such as stdin.
    pub fn bytes(msg: &str, verbosity: Verbosity) -> Self {
        let bar = verbosity.show_status().then(|| {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg} {bytes}") {
                pb.set_style(style.tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "));
            }
            pb.set_message(msg.to_string());
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            pb
        });
        Self { bar }
    }

    pub fn inc(&self, delta: u64) {
        if let Some(ref bar) = self.bar {
            bar.inc(delta);
        }
    }

    /// Finish and clear the progress bar.
    pub fn finish_and_clear(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_has_no_bar() {
        let progress = Progress::frames(10, Verbosity::Quiet);
        assert!(progress.bar.is_none());
        progress.inc(5);
        progress.finish_and_clear();
    }
}
