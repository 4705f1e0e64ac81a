//! State types for the harness model.
//!
//! - [`PressureSample`] is a hashable carrier for an `f32` draw.
//! - [`HarnessState`] is one configuration of the verification loop, plus
//!   the per-cycle bookkeeping the properties inspect.

use fbharness::{
    LoopState,
    MotorControl,
    function_block::INITIAL_THRESHOLD,
    markers::CycleMarkers,
};

/// A pressure draw, stored by bit pattern so states can be hashed.
///
/// Two NaNs with the same payload compare equal here, unlike the floats
/// they carry.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct PressureSample(u32);

impl PressureSample {
    /// Wrap a draw.
    #[must_use]
    pub const fn new(value: f32) -> Self { Self(value.to_bits()) }

    /// The carried draw.
    #[must_use]
    pub const fn value(self) -> f32 { f32::from_bits(self.0) }

    /// Returns `true` unless the draw is NaN or infinite.
    #[must_use]
    pub const fn is_finite(self) -> bool { self.value().is_finite() }
}

/// One configuration of the verification loop.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct HarnessState {
    /// State whose entry action runs next.
    pub location: LoopState,
    /// Current `Pressure_LOW`.
    pub pressure: PressureSample,
    /// Current `Threshold`.
    pub threshold: PressureSample,
    /// Current `Motor_Critical`.
    pub motor_critical: bool,
    /// `BoC`/`EoC` flags.
    pub markers: CycleMarkers,
    /// Pressure seen by the most recent step, if one ran this cycle.
    pub step_entry: Option<PressureSample>,
    /// The `BoC` sentinel has pulsed this cycle.
    pub boc_pulsed: bool,
    /// The `EoC` sentinel has pulsed this cycle.
    pub eoc_pulsed: bool,
    /// The input filter has discarded at least one draw.
    pub filter_rejected: bool,
    /// Cycles that passed the end-of-cycle assertion.
    pub completed_cycles: u8,
}

impl HarnessState {
    /// The loop at program entry.
    #[must_use]
    pub const fn initial() -> Self {
        let block = MotorControl::new();
        Self {
            location: LoopState::LoopStart,
            pressure: PressureSample::new(block.pressure_low),
            threshold: PressureSample::new(block.threshold),
            motor_critical: block.motor_critical,
            markers: CycleMarkers::cleared(),
            step_entry: None,
            boc_pulsed: false,
            eoc_pulsed: false,
            filter_rejected: false,
            completed_cycles: 0,
        }
    }

    /// The instance fields as a function block.
    #[must_use]
    pub const fn block(&self) -> MotorControl {
        MotorControl {
            pressure_low: self.pressure.value(),
            motor_critical: self.motor_critical,
            threshold: self.threshold.value(),
        }
    }

    /// Store the instance fields of `block`.
    pub const fn set_block(&mut self, block: MotorControl) {
        self.pressure = PressureSample::new(block.pressure_low);
        self.motor_critical = block.motor_critical;
        self.threshold = PressureSample::new(block.threshold);
    }

    /// Returns `true` once the step has run in the current cycle.
    #[must_use]
    pub const fn stepped(&self) -> bool { self.step_entry.is_some() }

    /// Returns `true` if `threshold` still holds its initial value.
    #[must_use]
    pub fn threshold_is_initial(&self) -> bool {
        self.threshold == PressureSample::new(INITIAL_THRESHOLD)
    }
}

impl Default for HarnessState {
    fn default() -> Self { Self::initial() }
}
