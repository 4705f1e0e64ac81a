//! Shared CLI type definitions for fbharness build and runtime.
//!
//! This crate provides the runner configuration used by both the `build.rs`
//! script (for man page generation) and the `fbharness` binary. Keeping the
//! definitions here lets the build script render the man page without
//! pulling in the harness itself.

// The derives emit code at module scope, so these cannot be narrowed to items.
#![expect(
    non_snake_case,
    reason = "Clap/OrthoConfig derive macros generate helper modules with uppercase names"
)]
#![expect(
    missing_docs,
    reason = "OrthoConfig and Clap derive macros generate items that cannot be documented"
)]

use std::fmt;

use clap::{Args, Parser, ValueEnum};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

/// Default cycle bound, matching the unwinding depth used for bounded checks.
pub const DEFAULT_UNWIND: u64 = 10;
/// Default seed for the pseudorandom oracle.
pub const DEFAULT_SEED: u64 = 0;

/// Output format for run verdicts.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable summary with a Markdown counterexample table.
    #[default]
    Markdown,
    /// Machine-readable JSON verdict.
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Markdown => "markdown",
            Self::Json => "json",
        })
    }
}

/// Runner configuration shared by the binary and the man page generator.
///
/// Values are layered from defaults, the `.fbh.toml` dotfile, `FBH_`
/// environment variables and finally the command line.
#[derive(Args, OrthoConfig, Serialize, Deserialize, Default, Debug, Clone)]
#[ortho_config(prefix = "FBH_")]
pub struct HarnessConfig {
    /// Number of cycles to run before declaring the bound exhausted (0 runs
    /// until the invariant fails).
    #[ortho_config(default = DEFAULT_UNWIND)]
    #[arg(long)]
    pub unwind: u64,
    /// Seed for the pseudorandom input oracle.
    #[ortho_config(default = DEFAULT_SEED)]
    #[arg(long)]
    pub seed: u64,
    /// Verdict output format.
    #[ortho_config(default = ReportFormat::Markdown)]
    #[arg(long, value_enum)]
    pub format: ReportFormat,
    /// Record every cycle so counterexamples show the full trace.
    #[ortho_config(default = true)]
    #[arg(long)]
    pub history: bool,
}

/// Top-level CLI entry point consumed by binaries.
#[derive(Parser, Serialize)]
#[command(name = "fbharness", about = "Drive the FB_MotorControl verification loop")]
pub struct Cli {
    /// CLI configuration overrides (merged with files and defaults at runtime).
    #[command(flatten)]
    pub config: HarnessConfigCli,
}
