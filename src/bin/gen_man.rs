//! Render wavspool man pages.
//!
//! Usage: `cargo run --bin gen-man [OUT_DIR]` (default `man/`).

use clap_mangen::Man;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

fn render(cmd: clap::Command, dir: &Path, file_name: &str) -> io::Result<()> {
    let mut page = Vec::new();
    Man::new(cmd).render(&mut page)?;
    fs::write(dir.join(file_name), page)?;
    println!("wrote {}", dir.join(file_name).display());
    Ok(())
}

fn main() -> io::Result<()> {
    let out_dir = env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from("man"), PathBuf::from);
    fs::create_dir_all(&out_dir)?;

    let cmd = wavspool::Cli::cmd();
    for sub in cmd.get_subcommands() {
        let page = format!("wavspool-{}.1", sub.get_name());
        render(sub.clone(), &out_dir, &page)?;
    }
    render(cmd, &out_dir, "wavspool.1")
}
