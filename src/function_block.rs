//! The `FB_MotorControl` function block.
//!
//! A function block executes one input-to-output transition per PLC cycle.
//! This one raises `Motor_Critical` whenever the low-pressure reading drops
//! below the configured threshold.

use serde::Serialize;

/// Initial value of `Threshold`.
///
/// Carried over verbatim from the generated block. It bears no relation to
/// the `[0, 65535]` range checked at end of cycle.
pub const INITIAL_THRESHOLD: f32 = 36_464.0;

/// Instance data of `FB_MotorControl`.
///
/// `pressure_low` is semantically an unsigned 16-bit reading but is carried
/// as a float so NaN and infinities can be modelled at the input boundary.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MotorControl {
    /// `Pressure_LOW` input.
    pub pressure_low: f32,
    /// `Motor_Critical` output.
    pub motor_critical: bool,
    /// `Threshold` constant.
    pub threshold: f32,
}

impl MotorControl {
    /// Instance in its program-entry state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pressure_low: 0.0,
            motor_critical: false,
            threshold: INITIAL_THRESHOLD,
        }
    }

    /// Execute one cycle of the block.
    ///
    /// Sets `motor_critical` to `pressure_low < threshold` and touches
    /// nothing else. A NaN pressure compares false and clears the output.
    pub const fn step(&mut self) { self.motor_critical = self.pressure_low < self.threshold; }
}

impl Default for MotorControl {
    fn default() -> Self { Self::new() }
}
