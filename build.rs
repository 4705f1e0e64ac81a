//! Build script for man page generation.
//!
//! Renders a man page for the `fbharness` runner with `clap_mangen`. The CLI
//! definitions come from the `cli-defs` crate so the build script never
//! compiles the harness itself.

use std::{env, fs, io, path::PathBuf};

use clap::CommandFactory;
use clap_mangen::Man;
use cli_defs::Cli;

fn main() -> io::Result<()> {
    println!("cargo::rerun-if-changed=cli-defs");

    // OUT_DIR is absent for IDE analysis runs.
    let Ok(out_dir) = env::var("OUT_DIR").map(PathBuf::from) else {
        return Ok(());
    };

    let man = Man::new(Cli::command());
    let mut file = fs::File::create(out_dir.join("fbharness.1"))?;
    man.render(&mut file)
}
