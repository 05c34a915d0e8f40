use anyhow::Result;
use clap::Parser;
use wavspool::{Cli, Commands, Verbosity};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    verbosity.init_logging();

    match cli.command {
        Commands::Encode(args) => wavspool::commands::encode::run(args, verbosity),
        Commands::Tone(args) => wavspool::commands::tone::run(args, verbosity),
        Commands::Completions(args) => {
            wavspool::commands::completions::run(args);
            Ok(())
        }
    }
}
