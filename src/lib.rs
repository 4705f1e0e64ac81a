//! Verification harness for the `FB_MotorControl` function block.
//!
//! The crate drives one function-block instance through an explicit
//! verification loop. Every cycle samples a fresh input from an injected
//! [`oracle::Oracle`], frames the step with beginning-of-cycle and
//! end-of-cycle markers, and asserts the end-of-cycle range property. The
//! same loop runs under the Kani model checker, an AFL fuzz target, scripted
//! tests and the seeded `fbharness` runner.

pub mod driver;
pub mod error;
pub mod function_block;
pub mod markers;
pub mod observer;
pub mod oracle;
pub mod report;
pub mod runner;

#[cfg(test)]
mod test_helpers;

pub use driver::{CycleBound, CycleRecord, LoopState, RunSummary, VerificationLoop};
pub use error::InvariantViolation;
pub use function_block::MotorControl;
pub use report::{Counterexample, Verdict};
