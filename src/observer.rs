//! Cycle event observation.
//!
//! The driver reports every externally meaningful step of a cycle to a
//! [`CycleObserver`]. The unit observer `()` discards events and keeps the
//! loop allocation-free; [`TraceRecorder`] keeps them for inspection.

use serde::Serialize;

use crate::markers::Marker;

/// Something that happened inside a cycle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CycleEvent {
    /// The input filter discarded a non-finite sample.
    InputRejected {
        /// Cycle number, starting at one.
        cycle: u64,
        /// The rejected sample.
        sample: f32,
    },
    /// The input filter accepted a finite sample.
    InputAccepted {
        /// Cycle number, starting at one.
        cycle: u64,
        /// The accepted sample.
        sample: f32,
    },
    /// A sentinel was pulsed.
    Pulse {
        /// Cycle number, starting at one.
        cycle: u64,
        /// Which sentinel.
        marker: Marker,
    },
    /// The function block is about to run.
    StepInvoked {
        /// Cycle number, starting at one.
        cycle: u64,
        /// `Pressure_LOW` as seen at step entry.
        pressure_low: f32,
    },
    /// The function block returned.
    StepCompleted {
        /// Cycle number, starting at one.
        cycle: u64,
        /// `Motor_Critical` after the step.
        motor_critical: bool,
    },
    /// The end-of-cycle assertion was evaluated.
    InvariantChecked {
        /// Cycle number, starting at one.
        cycle: u64,
        /// Whether the assertion held.
        holds: bool,
    },
}

impl CycleEvent {
    /// Cycle the event belongs to.
    #[must_use]
    pub const fn cycle(&self) -> u64 {
        match *self {
            Self::InputRejected { cycle, .. }
            | Self::InputAccepted { cycle, .. }
            | Self::Pulse { cycle, .. }
            | Self::StepInvoked { cycle, .. }
            | Self::StepCompleted { cycle, .. }
            | Self::InvariantChecked { cycle, .. } => cycle,
        }
    }

    /// Returns `true` if this is a pulse of `marker`.
    #[must_use]
    pub fn is_pulse_of(&self, marker: Marker) -> bool {
        matches!(self, Self::Pulse { marker: m, .. } if *m == marker)
    }
}

/// Receiver for [`CycleEvent`]s.
pub trait CycleObserver {
    /// Record one event.
    fn observe(&mut self, event: &CycleEvent);
}

impl CycleObserver for () {
    fn observe(&mut self, _event: &CycleEvent) {}
}

impl<T: CycleObserver + ?Sized> CycleObserver for &mut T {
    fn observe(&mut self, event: &CycleEvent) { (**self).observe(event); }
}

/// Observer that keeps every event in order.
#[derive(Clone, Debug, Default)]
pub struct TraceRecorder {
    events: Vec<CycleEvent>,
}

impl TraceRecorder {
    /// Create an empty recorder.
    #[must_use]
    pub const fn new() -> Self { Self { events: Vec::new() } }

    /// Events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[CycleEvent] { &self.events }

    /// Events recorded for one cycle.
    pub fn cycle_events(&self, cycle: u64) -> impl Iterator<Item = &CycleEvent> {
        self.events.iter().filter(move |event| event.cycle() == cycle)
    }

    /// Position of the first event matching `predicate` within `cycle`.
    #[must_use]
    pub fn position_in_cycle(
        &self,
        cycle: u64,
        predicate: impl Fn(&CycleEvent) -> bool,
    ) -> Option<usize> {
        self.cycle_events(cycle).position(predicate)
    }

    /// Consume the recorder, returning its events.
    #[must_use]
    pub fn into_events(self) -> Vec<CycleEvent> { self.events }
}

impl CycleObserver for TraceRecorder {
    fn observe(&mut self, event: &CycleEvent) { self.events.push(*event); }
}
