//! Beginning-of-cycle and end-of-cycle markers.
//!
//! Two kinds of marker frame every cycle:
//!
//! - [`CycleMarkers`] holds the `BoC`/`EoC` flags. Each is raised for exactly
//!   one driver transition, and the end-of-cycle assertion is guarded by
//!   `EoC`.
//! - A [`Sentinel`] is a write-only flag pulsed high and immediately low.
//!   The pulse carries no information for the harness itself. It exists to
//!   leave a uniquely identifiable location in a trace, so each pulse is
//!   also emitted as a `tracing` event under [`SENTINEL_TARGET`].

use std::{fmt, hint::black_box};

use serde::Serialize;
use tracing::trace;

/// `tracing` target used for sentinel pulse events.
pub const SENTINEL_TARGET: &str = "fbharness::sentinel";

/// The `BoC`/`EoC` flag pair.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub struct CycleMarkers {
    /// Beginning of cycle.
    pub boc: bool,
    /// End of cycle.
    pub eoc: bool,
}

impl CycleMarkers {
    /// Both flags lowered, as at program entry.
    #[must_use]
    pub const fn cleared() -> Self {
        Self {
            boc: false,
            eoc: false,
        }
    }

    /// Returns `true` unless both flags are raised at once.
    #[must_use]
    pub const fn is_exclusive(&self) -> bool { !(self.boc && self.eoc) }
}

/// Which end of the cycle a sentinel marks.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum Marker {
    /// Pulsed after inputs are sampled and before the block runs.
    #[serde(rename = "BoC")]
    Boc,
    /// Pulsed after the end-of-cycle assertion.
    #[serde(rename = "EoC")]
    Eoc,
}

impl Marker {
    /// Trace label of the marker.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boc => "BoC",
            Self::Eoc => "EoC",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Write-only flag pulsed once per cycle.
#[derive(Debug)]
pub struct Sentinel {
    marker: Marker,
    raised: bool,
    pulses: u64,
}

impl Sentinel {
    /// Create a lowered sentinel for `marker`.
    #[must_use]
    pub const fn new(marker: Marker) -> Self {
        Self {
            marker,
            raised: false,
            pulses: 0,
        }
    }

    /// Marker this sentinel stands for.
    #[must_use]
    pub const fn marker(&self) -> Marker { self.marker }

    /// Number of pulses emitted so far.
    #[must_use]
    pub const fn pulses(&self) -> u64 { self.pulses }

    /// Raise and immediately lower the flag, emitting a trace event.
    pub fn pulse(&mut self, cycle: u64) {
        self.raised = true;
        trace!(
            target: SENTINEL_TARGET,
            marker = self.marker.as_str(),
            cycle,
            "sentinel pulse"
        );
        // The store must survive optimisation so the location shows up.
        let raised = black_box(&mut self.raised);
        *raised = false;
        self.pulses = self.pulses.saturating_add(1);
    }
}
