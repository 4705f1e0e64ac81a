//! The verification loop driver.
//!
//! The generated harness threads its loop through labelled blocks and
//! unconditional jumps. Here the same loop is an explicit state machine: a
//! [`LoopState`] tag plus [`VerificationLoop::transition`], which runs the
//! entry action of the current state and moves to the next one.
//!
//! One cycle visits every state once:
//!
//! | State        | Entry action                                              |
//! |--------------|-----------------------------------------------------------|
//! | `LoopStart`  | draw pressures until finite, raise `BoC`                  |
//! | `PrepareBoc` | pulse the `BoC` sentinel, lower `BoC`                     |
//! | `Call`       | run the function block                                    |
//! | `CallEnd`    | raise `EoC`                                               |
//! | `PrepareEoc` | assert the end-of-cycle invariant, pulse `EoC`, lower it  |
//!
//! The end-of-cycle range is *checked*, never enforced. The input filter only
//! removes NaN and infinities, so an unconstrained oracle is expected to
//! violate the assertion; finding that violation is what the harness is for.

#[cfg(kani)]
mod kani;

use std::collections::VecDeque;

use serde::Serialize;
use tracing::{debug, error, info_span};

use crate::{
    error::InvariantViolation,
    function_block::MotorControl,
    markers::{CycleMarkers, Marker, Sentinel},
    observer::{CycleEvent, CycleObserver},
    oracle::Oracle,
    report::Counterexample,
};

/// Lower bound of the checked `Pressure_LOW` range.
pub const PRESSURE_MIN: f32 = 0.0;
/// Upper bound of the checked `Pressure_LOW` range.
pub const PRESSURE_MAX: f32 = 65_535.0;

/// Loop unwinding bound for a symbolic run of one cycle: one pass per
/// [`LoopState`] plus the exit check.
///
/// Kani proofs that drive a whole cycle carry this as `#[kani::unwind(6)]`.
pub const CYCLE_UNWIND: usize = 6;

/// Completed cycles kept by [`VerificationLoop::with_history`].
///
/// Older records are dropped first, so an unbounded run holds at most this
/// many records however long it passes.
pub const HISTORY_LIMIT: usize = 64;

/// Location of the driver within a cycle.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub enum LoopState {
    /// Sample inputs and raise `BoC`.
    #[default]
    LoopStart,
    /// Pulse the beginning-of-cycle sentinel.
    PrepareBoc,
    /// Run the function block.
    Call,
    /// Raise `EoC`.
    CallEnd,
    /// Check the invariant and pulse the end-of-cycle sentinel.
    PrepareEoc,
}

impl LoopState {
    /// State entered after this one's entry action completes.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::LoopStart => Self::PrepareBoc,
            Self::PrepareBoc => Self::Call,
            Self::Call => Self::CallEnd,
            Self::CallEnd => Self::PrepareEoc,
            Self::PrepareEoc => Self::LoopStart,
        }
    }

    /// Label of the state as it appears in generated harnesses.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LoopStart => "loop_start",
            Self::PrepareBoc => "prepare_BoC",
            Self::Call => "l_main_call",
            Self::CallEnd => "callEnd",
            Self::PrepareEoc => "prepare_EoC",
        }
    }

    /// All states in cycle order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::LoopStart,
            Self::PrepareBoc,
            Self::Call,
            Self::CallEnd,
            Self::PrepareEoc,
        ]
    }
}

/// The end-of-cycle assertion: `¬EoC ∨ (0 ≤ pressure ≤ 65535)`.
///
/// Outside end of cycle the implication holds vacuously. NaN fails the range
/// comparison, as do both infinities.
#[must_use]
pub fn end_of_cycle_holds(eoc: bool, pressure: f32) -> bool {
    !eoc || (PRESSURE_MIN..=PRESSURE_MAX).contains(&pressure)
}

/// How many cycles [`VerificationLoop::run`] may execute.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum CycleBound {
    /// Run until the invariant fails.
    Unbounded,
    /// Stop once this many cycles have completed.
    Cycles(u64),
}

impl CycleBound {
    /// Interpret an unwinding depth, where zero means unbounded.
    #[must_use]
    pub const fn from_unwind(unwind: u64) -> Self {
        if unwind == 0 {
            Self::Unbounded
        } else {
            Self::Cycles(unwind)
        }
    }

    /// Returns `true` if another cycle may start after `completed` cycles.
    #[must_use]
    pub const fn admits(self, completed: u64) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Cycles(limit) => completed < limit,
        }
    }
}

/// Snapshot of the harness taken when the end-of-cycle assertion runs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CycleRecord {
    /// Cycle number, starting at one.
    pub cycle: u64,
    /// Instance state after the step.
    pub instance: MotorControl,
    /// Marker flags at the assertion.
    pub markers: CycleMarkers,
    /// Non-finite samples the input filter discarded this cycle.
    pub rejected_samples: u32,
}

/// Totals reported by a bounded run that finished without a violation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct RunSummary {
    /// Cycles completed.
    pub cycles: u64,
    /// Non-finite samples discarded across all cycles.
    pub rejected_samples: u64,
}

/// The verification loop around one `FB_MotorControl` instance.
///
/// Construction is the harness entry point: the instance gets its initial
/// values, both markers are cleared, and the driver sits at
/// [`LoopState::LoopStart`].
#[derive(Debug)]
pub struct VerificationLoop<O, S = ()> {
    instance: MotorControl,
    markers: CycleMarkers,
    boc_sentinel: Sentinel,
    eoc_sentinel: Sentinel,
    oracle: O,
    observer: S,
    state: LoopState,
    cycle: u64,
    completed: u64,
    rejected_this_cycle: u32,
    rejected_total: u64,
    history: Option<VecDeque<CycleRecord>>,
    history_limit: usize,
}

impl<O: Oracle> VerificationLoop<O> {
    /// Create a loop drawing inputs from `oracle`.
    #[must_use]
    pub const fn new(oracle: O) -> Self { Self::with_observer(oracle, ()) }
}

impl<O: Oracle, S: CycleObserver> VerificationLoop<O, S> {
    /// Create a loop that reports cycle events to `observer`.
    #[must_use]
    pub const fn with_observer(oracle: O, observer: S) -> Self {
        Self {
            instance: MotorControl::new(),
            markers: CycleMarkers::cleared(),
            boc_sentinel: Sentinel::new(Marker::Boc),
            eoc_sentinel: Sentinel::new(Marker::Eoc),
            oracle,
            observer,
            state: LoopState::LoopStart,
            cycle: 0,
            completed: 0,
            rejected_this_cycle: 0,
            rejected_total: 0,
            history: None,
            history_limit: HISTORY_LIMIT,
        }
    }

    /// Keep records of the last [`HISTORY_LIMIT`] completed cycles so that
    /// a counterexample can show the trace leading to the violation.
    #[must_use]
    pub fn with_history(self) -> Self { self.with_history_limit(HISTORY_LIMIT) }

    /// Keep records of the last `limit` completed cycles.
    ///
    /// Memory grows with each cycle until `limit` records are held, then
    /// stays flat. A limit of zero records nothing.
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history = Some(VecDeque::new());
        self.history_limit = limit;
        self
    }

    /// The function block instance.
    #[must_use]
    pub const fn instance(&self) -> &MotorControl { &self.instance }

    /// Current `BoC`/`EoC` flags.
    #[must_use]
    pub const fn markers(&self) -> CycleMarkers { self.markers }

    /// State whose entry action runs on the next [`transition`](Self::transition).
    #[must_use]
    pub const fn state(&self) -> LoopState { self.state }

    /// Number of the current (or most recent) cycle; zero before the first.
    #[must_use]
    pub const fn cycle(&self) -> u64 { self.cycle }

    /// Number of cycles that passed the end-of-cycle assertion.
    #[must_use]
    pub const fn completed_cycles(&self) -> u64 { self.completed }

    /// Number of `BoC` and `EoC` sentinel pulses so far.
    #[must_use]
    pub const fn pulses(&self) -> (u64, u64) {
        (self.boc_sentinel.pulses(), self.eoc_sentinel.pulses())
    }

    /// Most recent completed cycle records, oldest first, when history is
    /// enabled.
    #[must_use]
    pub const fn history(&self) -> Option<&VecDeque<CycleRecord>> { self.history.as_ref() }

    /// The input oracle.
    #[must_use]
    pub const fn oracle(&self) -> &O { &self.oracle }

    /// The event observer.
    #[must_use]
    pub const fn observer(&self) -> &S { &self.observer }

    /// Consume the loop, returning its observer.
    #[must_use]
    pub fn into_observer(self) -> S { self.observer }

    /// Run the entry action of the current state and move to the next one.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation`] when the end-of-cycle assertion fails.
    /// The driver then stays at [`LoopState::PrepareEoc`] with the failing
    /// state intact.
    pub fn transition(&mut self) -> Result<LoopState, InvariantViolation> {
        self.advance()?;
        Ok(self.state)
    }

    /// Run transitions until the current cycle's assertion has passed and
    /// the driver is back at [`LoopState::LoopStart`].
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation`] when the end-of-cycle assertion fails.
    pub fn run_cycle(&mut self) -> Result<CycleRecord, InvariantViolation> {
        loop {
            if let Some(record) = self.advance()? {
                return Ok(record);
            }
        }
    }

    /// Run cycles until `bound` is reached.
    ///
    /// With [`CycleBound::Unbounded`] this only returns on a violation.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation`] for the first cycle whose end-of-cycle
    /// assertion fails.
    pub fn run(&mut self, bound: CycleBound) -> Result<RunSummary, InvariantViolation> {
        let span = info_span!("verification_loop", ?bound);
        let _entered = span.enter();
        while bound.admits(self.completed) {
            self.run_cycle()?;
        }
        debug!(
            cycles = self.completed,
            rejected = self.rejected_total,
            "cycle bound reached"
        );
        Ok(RunSummary {
            cycles: self.completed,
            rejected_samples: self.rejected_total,
        })
    }

    fn advance(&mut self) -> Result<Option<CycleRecord>, InvariantViolation> {
        let record = match self.state {
            LoopState::LoopStart => {
                self.enter_loop_start();
                None
            }
            LoopState::PrepareBoc => {
                self.enter_prepare_boc();
                None
            }
            LoopState::Call => {
                self.enter_call();
                None
            }
            LoopState::CallEnd => {
                self.markers.eoc = true;
                None
            }
            LoopState::PrepareEoc => Some(self.enter_prepare_eoc()?),
        };
        self.state = self.state.next();
        Ok(record)
    }

    fn enter_loop_start(&mut self) {
        self.cycle = self.cycle.saturating_add(1);
        self.rejected_this_cycle = 0;
        loop {
            let sample = self.oracle.nondet_f32();
            self.instance.pressure_low = sample;
            if sample.is_finite() {
                break;
            }
            self.rejected_this_cycle = self.rejected_this_cycle.saturating_add(1);
            debug!(cycle = self.cycle, ?sample, "discarded non-finite pressure sample");
            self.observer.observe(&CycleEvent::InputRejected {
                cycle: self.cycle,
                sample,
            });
        }
        self.rejected_total = self
            .rejected_total
            .saturating_add(u64::from(self.rejected_this_cycle));
        self.observer.observe(&CycleEvent::InputAccepted {
            cycle: self.cycle,
            sample: self.instance.pressure_low,
        });
        self.markers.boc = true;
    }

    fn enter_prepare_boc(&mut self) {
        self.boc_sentinel.pulse(self.cycle);
        self.observer.observe(&CycleEvent::Pulse {
            cycle: self.cycle,
            marker: Marker::Boc,
        });
        self.markers.boc = false;
    }

    fn enter_call(&mut self) {
        self.observer.observe(&CycleEvent::StepInvoked {
            cycle: self.cycle,
            pressure_low: self.instance.pressure_low,
        });
        self.instance.step();
        self.observer.observe(&CycleEvent::StepCompleted {
            cycle: self.cycle,
            motor_critical: self.instance.motor_critical,
        });
    }

    fn enter_prepare_eoc(&mut self) -> Result<CycleRecord, InvariantViolation> {
        let holds = end_of_cycle_holds(self.markers.eoc, self.instance.pressure_low);
        self.observer.observe(&CycleEvent::InvariantChecked {
            cycle: self.cycle,
            holds,
        });
        let record = self.record();
        if !holds {
            error!(
                cycle = self.cycle,
                pressure_low = ?self.instance.pressure_low,
                "end-of-cycle invariant violated"
            );
            let history = self
                .history
                .as_ref()
                .map(|kept| kept.iter().cloned().collect())
                .unwrap_or_default();
            return Err(InvariantViolation::EndOfCycle(Box::new(
                Counterexample::new(record, history),
            )));
        }
        if let Some(history) = self.history.as_mut() {
            if history.len() >= self.history_limit {
                history.pop_front();
            }
            if self.history_limit > 0 {
                history.push_back(record);
            }
        }
        self.eoc_sentinel.pulse(self.cycle);
        self.observer.observe(&CycleEvent::Pulse {
            cycle: self.cycle,
            marker: Marker::Eoc,
        });
        self.markers.eoc = false;
        self.completed = self.completed.saturating_add(1);
        debug!(
            cycle = self.cycle,
            motor_critical = self.instance.motor_critical,
            "cycle complete"
        );
        Ok(record)
    }

    const fn record(&self) -> CycleRecord {
        CycleRecord {
            cycle: self.cycle,
            instance: self.instance,
            markers: self.markers,
            rejected_samples: self.rejected_this_cycle,
        }
    }
}
