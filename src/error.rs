//! Harness failure type.

use thiserror::Error;

use crate::report::Counterexample;

/// A failed end-of-cycle assertion.
///
/// This is the harness's unrecoverable abort. Each front end escalates it to
/// its own hard failure: the model checker reports an assertion failure, the
/// fuzzer crashes, and the runner exits non-zero with the counterexample.
#[derive(Debug, Error)]
pub enum InvariantViolation {
    /// `EoC` was raised while `Pressure_LOW` lay outside `[0, 65535]`.
    #[error(
        "end-of-cycle invariant violated in cycle {}: Pressure_LOW = {:?}",
        .0.failing.cycle,
        .0.failing.instance.pressure_low
    )]
    EndOfCycle(Box<Counterexample>),
}

impl InvariantViolation {
    /// The trace that led to the violation.
    #[must_use]
    pub fn counterexample(&self) -> &Counterexample {
        match self {
            Self::EndOfCycle(counterexample) => counterexample,
        }
    }

    /// Consume the error, returning its trace.
    #[must_use]
    pub fn into_counterexample(self) -> Counterexample {
        match self {
            Self::EndOfCycle(counterexample) => *counterexample,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{driver::CycleRecord, function_block::MotorControl, markers::CycleMarkers};

    #[test]
    fn message_names_cycle_and_pressure() {
        let failing = CycleRecord {
            cycle: 7,
            instance: MotorControl {
                pressure_low: -2.5,
                ..MotorControl::new()
            },
            markers: CycleMarkers {
                boc: false,
                eoc: true,
            },
            rejected_samples: 0,
        };
        let error = InvariantViolation::EndOfCycle(Box::new(Counterexample::new(failing, Vec::new())));
        assert_eq!(
            error.to_string(),
            "end-of-cycle invariant violated in cycle 7: Pressure_LOW = -2.5"
        );
        assert_eq!(error.into_counterexample().failing, failing);
    }
}
