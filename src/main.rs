//! Binary entry point for the `FB_MotorControl` harness runner.
//!
//! The run logic lives in `fbharness::runner`; this binary only installs the
//! log subscriber and delegates.

use std::process::ExitCode;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    fbharness::runner::run()
}
