//! Scripted end-to-end scenarios for the verification loop.

use fbharness::{
    VerificationLoop,
    markers::Marker,
    observer::{CycleEvent, TraceRecorder},
    oracle::ScriptedOracle,
};
use rstest::rstest;

/// Outcome of the first cycle driven by `script`.
struct FirstCycle {
    motor_critical: bool,
    holds: bool,
    rejected: u32,
    recorder: TraceRecorder,
}

fn first_cycle(script: &[f32]) -> FirstCycle {
    let mut harness = VerificationLoop::with_observer(
        ScriptedOracle::pressures(script.iter().copied()),
        TraceRecorder::new(),
    );
    let (record, holds) = match harness.run_cycle() {
        Ok(record) => (record, true),
        Err(violation) => (violation.into_counterexample().failing, false),
    };
    FirstCycle {
        motor_critical: record.instance.motor_critical,
        holds,
        rejected: record.rejected_samples,
        recorder: harness.into_observer(),
    }
}

#[rstest]
#[case::zero(0.0, true, true)]
#[case::threshold(36_464.0, false, true)]
#[case::upper_bound(65_535.0, false, true)]
#[case::above_range(65_536.0, false, false)]
#[case::negative(-1.0, true, false)]
fn single_sample_scenarios(
    #[case] pressure: f32,
    #[case] motor_critical: bool,
    #[case] holds: bool,
) {
    let outcome = first_cycle(&[pressure]);
    assert_eq!(outcome.motor_critical, motor_critical);
    assert_eq!(outcome.holds, holds);
    assert_eq!(outcome.rejected, 0);
}

#[test]
fn nan_is_filtered_before_the_step() {
    let outcome = first_cycle(&[f32::NAN, 42.0]);
    assert_eq!(outcome.rejected, 1);
    assert!(outcome.motor_critical);
    assert!(outcome.holds);
    let steps: Vec<f32> = outcome
        .recorder
        .events()
        .iter()
        .filter_map(|event| match *event {
            CycleEvent::StepInvoked { pressure_low, .. } => Some(pressure_low),
            _ => None,
        })
        .collect();
    assert_eq!(steps, vec![42.0]);
}

#[rstest]
#[case::passing(&[10.0])]
#[case::failing(&[-5.0])]
#[case::filtered(&[f32::INFINITY, 70_000.0])]
fn sentinels_bracket_the_step(#[case] script: &[f32]) {
    let outcome = first_cycle(script);
    let recorder = &outcome.recorder;
    let boc = recorder.position_in_cycle(1, |e| e.is_pulse_of(Marker::Boc));
    let step = recorder.position_in_cycle(1, |e| matches!(e, CycleEvent::StepInvoked { .. }));
    let check =
        recorder.position_in_cycle(1, |e| matches!(e, CycleEvent::InvariantChecked { .. }));
    let eoc = recorder.position_in_cycle(1, |e| e.is_pulse_of(Marker::Eoc));
    let (Some(boc), Some(step), Some(check)) = (boc, step, check) else {
        panic!("every cycle pulses BoC, steps and checks");
    };
    assert!(boc < step);
    assert!(step < check);
    match eoc {
        Some(eoc) => {
            assert!(outcome.holds);
            assert!(check < eoc);
        }
        None => assert!(!outcome.holds, "EoC only pulses after a passing check"),
    }
}
