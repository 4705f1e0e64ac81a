//! Stateright model of the verification loop.
//!
//! The model explores every interleaving of pressure draws the loop can see
//! over a finite sample domain, for a bounded number of cycles. It checks
//! that:
//!
//! 1. **Safety**: the step only sees finite input, the markers never overlap
//!    and sit where the loop raises them, and the output tracks the
//!    comparison.
//! 2. **Discovery**: an out-of-range pressure reaches the end-of-cycle
//!    assertion whenever the domain contains one.
//! 3. **Reachability**: the filter, both step outcomes and a full cycle are
//!    exercised.
//!
//! # Example
//!
//! ```
//! use fbharness_verification::harness_model::{HarnessModel, properties::END_OF_CYCLE_RANGE_NAME};
//! use stateright::{Checker, Model};
//!
//! let checker = HarnessModel::default().checker().spawn_bfs().join();
//! assert!(checker.discovery(END_OF_CYCLE_RANGE_NAME).is_some());
//! ```

pub mod actions;
pub mod properties;
pub mod state;

use fbharness::LoopState;
use stateright::{Model, Property};

use self::{
    actions::{Action, apply_action},
    properties::{
        can_clear_motor_critical,
        can_complete_cycle,
        can_raise_motor_critical,
        can_reject_non_finite,
        end_of_cycle_range,
        markers_exclusive,
        markers_located,
        output_matches_comparison,
        sentinels_bracket_step,
        step_sees_finite_pressure,
    },
    state::{HarnessState, PressureSample},
};

/// Pressure draws explored by [`HarnessModel::default`]: both range bounds,
/// the threshold, a value either side of the range, and every non-finite
/// class.
pub const DEFAULT_SAMPLES: [f32; 9] = [
    0.0,
    42.0,
    36_464.0,
    65_535.0,
    65_536.0,
    -1.0,
    f32::NAN,
    f32::INFINITY,
    f32::NEG_INFINITY,
];

/// Pressure draws explored by [`HarnessModel::in_range_only`].
pub const IN_RANGE_SAMPLES: [f32; 5] = [0.0, 42.0, 36_464.0, 65_535.0, f32::NAN];

/// Configuration for the harness model.
#[derive(Clone, Debug)]
pub struct HarnessModel {
    /// Values the oracle may answer for each pressure draw.
    pub samples: Vec<PressureSample>,
    /// Cycles explored before the model stops drawing.
    pub max_cycles: u8,
}

impl Default for HarnessModel {
    fn default() -> Self { Self::with_samples(DEFAULT_SAMPLES) }
}

impl HarnessModel {
    /// Model drawing from `samples` for two cycles.
    #[must_use]
    pub fn with_samples(samples: impl IntoIterator<Item = f32>) -> Self {
        Self {
            samples: samples.into_iter().map(PressureSample::new).collect(),
            max_cycles: 2,
        }
    }

    /// Model whose finite draws all satisfy the end-of-cycle range, so the
    /// range property must hold.
    #[must_use]
    pub fn in_range_only() -> Self { Self::with_samples(IN_RANGE_SAMPLES) }

    /// Change the cycle bound, saturating zero to one.
    #[must_use]
    pub fn cycles(mut self, max_cycles: u8) -> Self {
        self.max_cycles = max_cycles.max(1);
        self
    }
}

impl Model for HarnessModel {
    type State = HarnessState;
    type Action = Action;

    fn init_states(&self) -> Vec<Self::State> { vec![HarnessState::initial()] }

    fn actions(&self, state: &Self::State, actions: &mut Vec<Self::Action>) {
        if state.location != LoopState::LoopStart {
            actions.push(Action::Advance);
            return;
        }
        if state.completed_cycles >= self.max_cycles {
            return;
        }
        actions.extend(self.samples.iter().copied().map(Action::Draw));
    }

    fn next_state(&self, state: &Self::State, action: Self::Action) -> Option<Self::State> {
        apply_action(state, &action)
    }

    fn properties(&self) -> Vec<Property<Self>> {
        vec![
            // Safety properties
            step_sees_finite_pressure(),
            markers_exclusive(),
            markers_located(),
            output_matches_comparison(),
            sentinels_bracket_step(),
            // Expected discovery
            end_of_cycle_range(),
            // Reachability properties
            can_reject_non_finite(),
            can_raise_motor_critical(),
            can_clear_motor_critical(),
            can_complete_cycle(),
        ]
    }
}
