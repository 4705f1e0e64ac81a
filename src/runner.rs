//! Configured smoke runs of the verification loop.
//!
//! The runner keeps the binary thin: it loads [`HarnessConfig`], drives the
//! loop with a seeded [`RandomOracle`] and writes the rendered [`Verdict`].

use std::{
    ffi::OsString,
    io::{self, Write},
    process::ExitCode,
};

use anyhow::{Context, Result, anyhow};
pub use cli_defs::{HarnessConfig, ReportFormat};
use ortho_config::OrthoConfig;
use tracing::info;

use crate::{
    driver::{CycleBound, VerificationLoop},
    oracle::RandomOracle,
    report::Verdict,
};

/// Exit status reported when the invariant is violated.
pub const VIOLATION_EXIT_CODE: u8 = 1;

/// Load configuration from defaults, the dotfile, the environment and `args`.
///
/// # Errors
///
/// Returns an error if any configuration layer fails to parse.
pub fn load_config<I, T>(args: I) -> Result<HarnessConfig>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    HarnessConfig::load_from_iter(args)
        .map_err(|err| anyhow!("failed to load harness configuration: {err}"))
}

/// Run the loop once under `config`.
#[must_use]
pub fn execute(config: &HarnessConfig) -> Verdict {
    let bound = CycleBound::from_unwind(config.unwind);
    info!(seed = config.seed, ?bound, history = config.history, "starting run");
    let mut harness = VerificationLoop::new(RandomOracle::seeded(config.seed));
    if config.history {
        harness = harness.with_history();
    }
    let verdict = Verdict::from_run(harness.run(bound));
    info!(status = verdict.status(), "run finished");
    verdict
}

/// Parse the process arguments, run, and print the verdict to stdout.
///
/// # Errors
///
/// Returns any error raised while loading configuration, rendering the
/// verdict or writing it out.
pub fn run() -> Result<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with_args(std::env::args_os(), &mut out)
}

/// Execute a run configured from `args`, writing the verdict to `out`.
///
/// Violations are not errors here: they are rendered like any other verdict
/// and reported through the returned exit code.
///
/// # Errors
///
/// Returns any error raised while loading configuration, rendering the
/// verdict or writing it out.
pub fn run_with_args<I, T>(args: I, out: &mut impl Write) -> Result<ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let config = load_config(args)?;
    let verdict = execute(&config);
    let rendered = verdict
        .render(config.format)
        .context("failed to render verdict")?;
    writeln!(out, "{rendered}").context("failed to write verdict")?;
    Ok(if verdict.is_violated() {
        ExitCode::from(VIOLATION_EXIT_CODE)
    } else {
        ExitCode::SUCCESS
    })
}
