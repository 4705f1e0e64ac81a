//! Kani harnesses for the verification loop.
//!
//! Proofs that drive a full cycle unwind to [`CYCLE_UNWIND`]: five state
//! passes plus the exit check. `FiniteKaniOracle` keeps the input filter to
//! a single draw.

use super::{CYCLE_UNWIND, LoopState, VerificationLoop, end_of_cycle_holds};
use crate::{
    function_block::MotorControl,
    oracle::{FiniteKaniOracle, KaniOracle, Oracle},
};

#[kani::proof]
fn kani_step_matches_comparison() {
    let mut block = MotorControl {
        pressure_low: kani::any(),
        motor_critical: kani::any(),
        threshold: kani::any(),
    };
    let before = block;

    block.step();

    kani::assert(
        block.motor_critical == (before.pressure_low < before.threshold),
        "output equals the pressure comparison",
    );
    kani::assert(
        block.pressure_low.to_bits() == before.pressure_low.to_bits(),
        "step leaves pressure untouched",
    );
    kani::assert(
        block.threshold.to_bits() == before.threshold.to_bits(),
        "step leaves threshold untouched",
    );
}

#[kani::proof]
fn kani_range_check_accepts_bounds() {
    let pressure: f32 = kani::any();
    kani::assume((0.0..=65_535.0).contains(&pressure));
    kani::assert(end_of_cycle_holds(true, pressure), "in-range pressure passes");
    kani::assert(
        end_of_cycle_holds(false, kani::any()),
        "implication is vacuous outside end of cycle",
    );
}

#[kani::proof]
#[kani::unwind(6)]
fn kani_markers_stay_exclusive() {
    kani::assert(LoopState::all().len() < CYCLE_UNWIND, "bound covers one cycle");
    let mut harness = VerificationLoop::new(FiniteKaniOracle);
    for _ in LoopState::all() {
        let state = harness.state();
        let outcome = harness.transition();
        kani::assert(harness.markers().is_exclusive(), "BoC and EoC never overlap");
        if state == LoopState::LoopStart {
            kani::assert(harness.markers().boc, "BoC is raised after sampling");
            kani::assert(
                harness.instance().pressure_low.is_finite(),
                "filtered pressure is finite",
            );
        }
        if outcome.is_err() {
            return;
        }
    }
}

#[kani::proof]
#[kani::unwind(6)]
fn kani_cycle_fails_exactly_out_of_range() {
    let mut harness = VerificationLoop::new(FiniteKaniOracle);
    let outcome = harness.run_cycle();
    let pressure = harness.instance().pressure_low;
    kani::assert(
        outcome.is_ok() == (0.0..=65_535.0).contains(&pressure),
        "cycle passes iff pressure is in range",
    );
    kani::cover!(outcome.is_err(), "a violating pressure is reachable");
}

#[kani::proof]
fn kani_non_finite_pressure_fails_range() {
    let mut oracle = KaniOracle;
    let first = oracle.nondet_f32();
    kani::assume(!first.is_finite());
    kani::assert(!end_of_cycle_holds(true, first), "non-finite never passes");
}

#[kani::proof]
#[kani::unwind(6)]
#[kani::should_panic]
fn kani_end_of_cycle_range_is_violated() {
    let mut harness = VerificationLoop::new(FiniteKaniOracle);
    let outcome = harness.run_cycle();
    kani::assert(outcome.is_ok(), "end-of-cycle range holds");
}
