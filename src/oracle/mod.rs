//! Nondeterministic input producers.
//!
//! The verification loop never reads inputs directly. Every draw goes
//! through an [`Oracle`], whose concrete implementation decides what
//! "arbitrary" means:
//!
//! - [`RandomOracle`] samples a seeded generator for smoke runs.
//! - [`ScriptedOracle`] replays a fixed list of values for tests.
//! - [`ByteOracle`] decodes a fuzzer-supplied byte stream.
//! - `KaniOracle` (only when compiled by Kani) hands out symbolic values that
//!   the model checker resolves.
//!
//! Oracles are deliberately impure: two draws of the same type may return
//! different values, so every producer takes `&mut self`.

mod bytes;
#[cfg(kani)]
mod kani;
mod random;
mod scripted;

pub use bytes::ByteOracle;
pub use random::RandomOracle;
pub use scripted::{OracleValue, ScriptedOracle};

#[cfg(kani)]
pub use self::kani::{FiniteKaniOracle, KaniOracle};

/// Source of unconstrained primitive values.
///
/// One producer exists per primitive type the generated harnesses declare.
/// Each call is independent of every other call.
pub trait Oracle {
    /// Draw an arbitrary boolean.
    fn nondet_bool(&mut self) -> bool;
    /// Draw an arbitrary unsigned 8-bit integer.
    fn nondet_u8(&mut self) -> u8;
    /// Draw an arbitrary unsigned 16-bit integer.
    fn nondet_u16(&mut self) -> u16;
    /// Draw an arbitrary unsigned 32-bit integer.
    fn nondet_u32(&mut self) -> u32;
    /// Draw an arbitrary unsigned 64-bit integer.
    fn nondet_u64(&mut self) -> u64;
    /// Draw an arbitrary signed 8-bit integer.
    fn nondet_i8(&mut self) -> i8;
    /// Draw an arbitrary signed 16-bit integer.
    fn nondet_i16(&mut self) -> i16;
    /// Draw an arbitrary signed 32-bit integer.
    fn nondet_i32(&mut self) -> i32;
    /// Draw an arbitrary signed 64-bit integer.
    fn nondet_i64(&mut self) -> i64;
    /// Draw an arbitrary single-precision float, NaN and infinities included.
    fn nondet_f32(&mut self) -> f32;
    /// Draw an arbitrary double-precision float, NaN and infinities included.
    fn nondet_f64(&mut self) -> f64;
}

impl<O: Oracle + ?Sized> Oracle for &mut O {
    fn nondet_bool(&mut self) -> bool { (**self).nondet_bool() }

    fn nondet_u8(&mut self) -> u8 { (**self).nondet_u8() }

    fn nondet_u16(&mut self) -> u16 { (**self).nondet_u16() }

    fn nondet_u32(&mut self) -> u32 { (**self).nondet_u32() }

    fn nondet_u64(&mut self) -> u64 { (**self).nondet_u64() }

    fn nondet_i8(&mut self) -> i8 { (**self).nondet_i8() }

    fn nondet_i16(&mut self) -> i16 { (**self).nondet_i16() }

    fn nondet_i32(&mut self) -> i32 { (**self).nondet_i32() }

    fn nondet_i64(&mut self) -> i64 { (**self).nondet_i64() }

    fn nondet_f32(&mut self) -> f32 { (**self).nondet_f32() }

    fn nondet_f64(&mut self) -> f64 { (**self).nondet_f64() }
}
