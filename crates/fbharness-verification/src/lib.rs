//! Explicit-state verification of the `FB_MotorControl` harness.
//!
//! The bounded model checker reasons about the verification loop
//! symbolically. This crate complements it with a Stateright model that
//! enumerates the loop's reachable states over a finite domain of pressure
//! samples. The model reuses the harness's own state transition, step and
//! end-of-cycle check, so a discovery here is a discovery in the harness.
//!
//! See [`harness_model`] for the model and its properties.

pub mod harness_model;
