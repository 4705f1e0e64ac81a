//! Actions and state transitions for the harness model.
//!
//! Only `LoopStart` is nondeterministic: it draws one pressure sample from
//! the model's domain. Every other location has a single successor, computed
//! by the same entry actions the harness runs.

use fbharness::{LoopState, driver::end_of_cycle_holds};

use super::state::{HarnessState, PressureSample};

/// Actions that move the model between states.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Action {
    /// The oracle answers a pressure draw at `LoopStart`.
    Draw(PressureSample),
    /// Run the entry action of the current non-sampling location.
    Advance,
}

/// Returns `true` if the end-of-cycle assertion fails in `state`.
///
/// Such a state is terminal: the harness aborts there.
#[must_use]
pub fn is_violation(state: &HarnessState) -> bool {
    state.location == LoopState::PrepareEoc
        && !end_of_cycle_holds(state.markers.eoc, state.pressure.value())
}

/// Applies an action to a state, returning the resulting state.
///
/// Returns `None` when the action is not enabled in `state`: a draw outside
/// `LoopStart`, an advance at `LoopStart`, or any action once the
/// end-of-cycle assertion has failed.
#[must_use]
pub fn apply_action(state: &HarnessState, action: &Action) -> Option<HarnessState> {
    if is_violation(state) {
        return None;
    }
    let mut next = state.clone();
    match (*action, state.location) {
        (Action::Draw(sample), LoopState::LoopStart) => apply_draw(&mut next, sample),
        (Action::Advance, LoopState::LoopStart) | (Action::Draw(_), _) => return None,
        (Action::Advance, LoopState::PrepareBoc) => {
            next.boc_pulsed = true;
            next.markers.boc = false;
        }
        (Action::Advance, LoopState::Call) => {
            let mut block = next.block();
            next.step_entry = Some(next.pressure);
            block.step();
            next.set_block(block);
        }
        (Action::Advance, LoopState::CallEnd) => next.markers.eoc = true,
        (Action::Advance, LoopState::PrepareEoc) => {
            next.eoc_pulsed = true;
            next.markers.eoc = false;
            next.completed_cycles = next.completed_cycles.saturating_add(1);
        }
    }
    // A non-finite draw is discarded and redrawn from the same location.
    let leaves = match *action {
        Action::Draw(sample) => sample.is_finite(),
        Action::Advance => true,
    };
    if leaves {
        next.location = state.location.next();
    }
    Some(next)
}

fn apply_draw(state: &mut HarnessState, sample: PressureSample) {
    state.pressure = sample;
    if !sample.is_finite() {
        state.filter_rejected = true;
        return;
    }
    state.step_entry = None;
    state.boc_pulsed = false;
    state.eoc_pulsed = false;
    state.markers.boc = true;
}
