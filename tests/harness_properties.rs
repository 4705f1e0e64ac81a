//! Property tests for the step contract and the driver.

use fbharness::{
    CycleBound,
    MotorControl,
    VerificationLoop,
    driver::{PRESSURE_MAX, PRESSURE_MIN},
    markers::Marker,
    observer::{CycleEvent, TraceRecorder},
    oracle::ScriptedOracle,
};
use proptest::prelude::*;

const MAX_CYCLES: usize = 8;

fn in_range(pressure: f32) -> bool { (PRESSURE_MIN..=PRESSURE_MAX).contains(&pressure) }

/// Pressures the oracle hands out for each cycle: the finite samples in
/// order, then zeros once the script runs dry.
fn accepted_samples(script: &[f32], cycles: usize) -> Vec<f32> {
    script
        .iter()
        .copied()
        .filter(|sample| sample.is_finite())
        .chain(std::iter::repeat(0.0))
        .take(cycles)
        .collect()
}

fn pressure_strategy() -> impl Strategy<Value = f32> {
    prop_oneof![
        4 => -100_000.0f32..100_000.0f32,
        1 => Just(f32::NAN),
        1 => Just(f32::INFINITY),
        1 => Just(f32::NEG_INFINITY),
        1 => Just(PRESSURE_MAX),
        1 => Just(PRESSURE_MIN),
    ]
}

proptest! {
    /// The step computes `pressure_low < threshold` and nothing else.
    #[test]
    fn step_matches_comparison(pressure in any::<f32>(), threshold in any::<f32>(), stale in any::<bool>()) {
        let mut block = MotorControl {
            pressure_low: pressure,
            motor_critical: stale,
            threshold,
        };
        block.step();
        prop_assert_eq!(block.motor_critical, pressure < threshold);
        prop_assert_eq!(block.pressure_low.to_bits(), pressure.to_bits());
        prop_assert_eq!(block.threshold.to_bits(), threshold.to_bits());
    }

    /// The step only ever sees finite input and the markers frame it.
    #[test]
    fn driver_filters_and_brackets(
        script in prop::collection::vec(pressure_strategy(), 0..24),
        cycles in 1..=MAX_CYCLES,
    ) {
        let mut harness = VerificationLoop::with_observer(
            ScriptedOracle::pressures(script.iter().copied()),
            TraceRecorder::new(),
        );
        let bound = CycleBound::Cycles(u64::try_from(cycles).unwrap_or(u64::MAX));
        let outcome = harness.run(bound);
        let last_cycle = harness.cycle();
        let recorder = harness.into_observer();

        for event in recorder.events() {
            if let CycleEvent::StepInvoked { pressure_low, .. } = *event {
                prop_assert!(pressure_low.is_finite());
            }
        }
        for cycle in 1..=last_cycle {
            let boc = recorder.position_in_cycle(cycle, |e| e.is_pulse_of(Marker::Boc));
            let step = recorder
                .position_in_cycle(cycle, |e| matches!(e, CycleEvent::StepInvoked { .. }));
            prop_assert!(boc.is_some());
            prop_assert!(boc < step);
            if let Some(eoc) = recorder.position_in_cycle(cycle, |e| e.is_pulse_of(Marker::Eoc)) {
                prop_assert!(step < Some(eoc));
            }
        }

        let accepted = accepted_samples(&script, cycles);
        let expected_failure = accepted.iter().position(|sample| !in_range(*sample));
        match (outcome, expected_failure) {
            (Ok(summary), None) => {
                prop_assert_eq!(summary.cycles, bound_cycles(bound));
            }
            (Err(violation), Some(index)) => {
                let failing = violation.counterexample().failing;
                prop_assert_eq!(usize::try_from(failing.cycle).ok(), Some(index + 1));
                prop_assert!(!in_range(failing.instance.pressure_low));
            }
            (actual, expected) => {
                prop_assert!(false, "outcome {actual:?} disagrees with expected failure {expected:?}");
            }
        }
    }
}

const fn bound_cycles(bound: CycleBound) -> u64 {
    match bound {
        CycleBound::Cycles(cycles) => cycles,
        CycleBound::Unbounded => u64::MAX,
    }
}
