//! Output verbosity selected by the global `--quiet` / `--verbose` flags.

use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Progress bars and end-of-command summaries.
    pub fn show_status(self) -> bool {
        self != Self::Quiet
    }

    /// Default log level when `RUST_LOG` is not set.
    pub fn log_level(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::ERROR,
            Self::Normal => LevelFilter::WARN,
            Self::Verbose => LevelFilter::DEBUG,
        }
    }

    /// Install the global `tracing` subscriber, writing to stderr.
    pub fn init_logging(self) {
        let filter = tracing_subscriber::EnvFilter::builder()
            .with_default_directive(self.log_level().into())
            .from_env_lossy();
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
}
