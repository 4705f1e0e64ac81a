//! Safety and reachability property definitions for the harness model.
//!
//! - **Safety properties** ("always") must hold in every reachable state.
//! - **Reachability properties** ("sometimes") must hold in at least one.
//!
//! The end-of-cycle range property is written as a safety property but is
//! *expected* to fail: a discovery for it is the counterexample the harness
//! exists to find. [`END_OF_CYCLE_RANGE_NAME`] lets callers tell it apart
//! from the properties that must never be discovered.

use fbharness::{LoopState, markers::CycleMarkers};
use stateright::Property;

use super::{HarnessModel, actions::is_violation, state::HarnessState};

/// Safety property name: the step only ever sees finite pressure.
pub const STEP_SEES_FINITE_PRESSURE_NAME: &str = "step sees finite pressure";

/// Safety property name: `BoC` and `EoC` are never raised together.
pub const MARKERS_EXCLUSIVE_NAME: &str = "markers are exclusive";

/// Safety property name: each marker is only raised at its own location.
pub const MARKERS_LOCATED_NAME: &str = "markers are raised only around the step";

/// Safety property name: the output agrees with the comparison after a step.
pub const OUTPUT_MATCHES_COMPARISON_NAME: &str = "output matches pressure comparison";

/// Safety property name: sentinel pulses bracket the step.
pub const SENTINELS_BRACKET_STEP_NAME: &str = "sentinels bracket the step";

/// Expected-failure property name: the end-of-cycle range assertion.
pub const END_OF_CYCLE_RANGE_NAME: &str = "end-of-cycle pressure within range";

/// Reachability property name: the input filter discards a draw.
pub const CAN_REJECT_NON_FINITE_NAME: &str = "can reject non-finite pressure";

/// Reachability property name: the step raises `Motor_Critical`.
pub const CAN_RAISE_MOTOR_CRITICAL_NAME: &str = "can raise motor critical";

/// Reachability property name: the step clears `Motor_Critical`.
pub const CAN_CLEAR_MOTOR_CRITICAL_NAME: &str = "can clear motor critical";

/// Reachability property name: a cycle passes the assertion.
pub const CAN_COMPLETE_CYCLE_NAME: &str = "can complete a cycle";

fn marker_at_own_location(markers: CycleMarkers, location: LoopState) -> bool {
    (!markers.boc || location == LoopState::PrepareBoc)
        && (!markers.eoc || location == LoopState::PrepareEoc)
}

fn output_matches(state: &HarnessState) -> bool {
    // Later draws overwrite the input before the next step runs.
    if !matches!(state.location, LoopState::CallEnd | LoopState::PrepareEoc) {
        return true;
    }
    let block = state.block();
    state.motor_critical == (block.pressure_low < block.threshold)
}

const fn sentinels_bracket(state: &HarnessState) -> bool {
    (!state.stepped() || state.boc_pulsed) && (!state.eoc_pulsed || state.stepped())
}

/// Safety property: the step only runs on finite `Pressure_LOW`.
#[must_use]
pub fn step_sees_finite_pressure() -> Property<HarnessModel> {
    Property::always(STEP_SEES_FINITE_PRESSURE_NAME, |_model, state: &HarnessState| {
        state.step_entry.is_none_or(|sample| sample.is_finite())
    })
}

/// Safety property: `BoC` and `EoC` never overlap.
#[must_use]
pub fn markers_exclusive() -> Property<HarnessModel> {
    Property::always(MARKERS_EXCLUSIVE_NAME, |_model, state: &HarnessState| {
        state.markers.is_exclusive()
    })
}

/// Safety property: `BoC` is only raised before its sentinel pulse and `EoC`
/// only before the assertion.
#[must_use]
pub fn markers_located() -> Property<HarnessModel> {
    Property::always(MARKERS_LOCATED_NAME, |_model, state: &HarnessState| {
        marker_at_own_location(state.markers, state.location)
    })
}

/// Safety property: between the step and the assertion, `Motor_Critical`
/// equals `Pressure_LOW < Threshold`; `Threshold` is never touched.
#[must_use]
pub fn output_matches_comparison() -> Property<HarnessModel> {
    Property::always(OUTPUT_MATCHES_COMPARISON_NAME, |_model, state: &HarnessState| {
        output_matches(state) && state.threshold_is_initial()
    })
}

/// Safety property: the `BoC` pulse precedes the step and the `EoC` pulse
/// follows it.
#[must_use]
pub fn sentinels_bracket_step() -> Property<HarnessModel> {
    Property::always(SENTINELS_BRACKET_STEP_NAME, |_model, state: &HarnessState| {
        sentinels_bracket(state)
    })
}

/// Expected-failure property: the end-of-cycle assertion holds.
#[must_use]
pub fn end_of_cycle_range() -> Property<HarnessModel> {
    Property::always(END_OF_CYCLE_RANGE_NAME, |_model, state: &HarnessState| {
        !is_violation(state)
    })
}

/// Reachability property: a non-finite draw is discarded.
#[must_use]
pub fn can_reject_non_finite() -> Property<HarnessModel> {
    Property::sometimes(CAN_REJECT_NON_FINITE_NAME, |_model, state: &HarnessState| {
        state.filter_rejected
    })
}

/// Reachability property: the step sets `Motor_Critical`.
#[must_use]
pub fn can_raise_motor_critical() -> Property<HarnessModel> {
    Property::sometimes(CAN_RAISE_MOTOR_CRITICAL_NAME, |_model, state: &HarnessState| {
        state.stepped() && state.motor_critical
    })
}

/// Reachability property: the step clears `Motor_Critical`.
#[must_use]
pub fn can_clear_motor_critical() -> Property<HarnessModel> {
    Property::sometimes(CAN_CLEAR_MOTOR_CRITICAL_NAME, |_model, state: &HarnessState| {
        state.stepped() && !state.motor_critical
    })
}

/// Reachability property: a cycle passes the end-of-cycle assertion.
#[must_use]
pub fn can_complete_cycle() -> Property<HarnessModel> {
    Property::sometimes(CAN_COMPLETE_CYCLE_NAME, |_model, state: &HarnessState| {
        state.completed_cycles > 0
    })
}
