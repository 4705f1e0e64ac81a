//! Exhaustive exploration of the harness model.


use fbharness_verification::harness_model::HarnessModel;
use rstest::rstest;
use verification_harness::{MIN_STATE_COUNT, verify_harness_model};

#[rstest]
#[case::one_cycle(1)]
#[case::two_cycles(2)]
#[case::three_cycles(3)]
fn default_model_finds_violation_in_first_cycle(#[case] cycles: u8) {
    let outcome = verify_harness_model(&HarnessModel::default().cycles(cycles));
    assert!(
        outcome.is_verified(),
        "reachability missing: {}, safety counterexamples: {}",
        outcome.missing_reachability,
        outcome.safety_counterexamples
    );
    assert!(outcome.range_violated);
    // Breadth-first search returns a shortest counterexample.
    assert_eq!(outcome.violation_cycle, Some(0));
    assert!(outcome.unique_state_count >= MIN_STATE_COUNT);
}

#[test]
fn in_range_model_has_no_counterexample() {
    let outcome = verify_harness_model(&HarnessModel::in_range_only());
    assert!(outcome.is_verified());
    assert!(!outcome.range_violated);
}

#[test]
fn nan_only_domain_never_steps() {
    let outcome = verify_harness_model(&HarnessModel::with_samples([f32::NAN, f32::INFINITY]));
    assert!(!outcome.range_violated);
    assert_eq!(outcome.safety_counterexamples, 0);
    // Only the filter rejection is reachable.
    assert_eq!(outcome.missing_reachability, 3);
}

#[test]
fn violation_requires_an_out_of_range_sample() {
    let outcome = verify_harness_model(&HarnessModel::with_samples([1.0, 70_000.0]));
    assert!(outcome.range_violated);
    let safe = verify_harness_model(&HarnessModel::with_samples([1.0, 65_535.0]));
    assert!(!safe.range_violated);
}
