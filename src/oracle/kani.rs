//! Symbolic oracles resolved by the Kani model checker.

use super::Oracle;

/// Oracle whose every draw is an unconstrained symbolic value.
#[derive(Clone, Copy, Debug, Default)]
pub struct KaniOracle;

impl Oracle for KaniOracle {
    fn nondet_bool(&mut self) -> bool { kani::any() }

    fn nondet_u8(&mut self) -> u8 { kani::any() }

    fn nondet_u16(&mut self) -> u16 { kani::any() }

    fn nondet_u32(&mut self) -> u32 { kani::any() }

    fn nondet_u64(&mut self) -> u64 { kani::any() }

    fn nondet_i8(&mut self) -> i8 { kani::any() }

    fn nondet_i16(&mut self) -> i16 { kani::any() }

    fn nondet_i32(&mut self) -> i32 { kani::any() }

    fn nondet_i64(&mut self) -> i64 { kani::any() }

    fn nondet_f32(&mut self) -> f32 { kani::any() }

    fn nondet_f64(&mut self) -> f64 { kani::any() }
}

/// Symbolic oracle that only hands out finite floats.
///
/// The checker picks a finite value directly, so the input filter loop never
/// needs a second iteration and a small unwinding bound is sound.
#[derive(Clone, Copy, Debug, Default)]
pub struct FiniteKaniOracle;

impl Oracle for FiniteKaniOracle {
    fn nondet_bool(&mut self) -> bool { kani::any() }

    fn nondet_u8(&mut self) -> u8 { kani::any() }

    fn nondet_u16(&mut self) -> u16 { kani::any() }

    fn nondet_u32(&mut self) -> u32 { kani::any() }

    fn nondet_u64(&mut self) -> u64 { kani::any() }

    fn nondet_i8(&mut self) -> i8 { kani::any() }

    fn nondet_i16(&mut self) -> i16 { kani::any() }

    fn nondet_i32(&mut self) -> i32 { kani::any() }

    fn nondet_i64(&mut self) -> i64 { kani::any() }

    fn nondet_f32(&mut self) -> f32 {
        let value: f32 = kani::any();
        kani::assume(value.is_finite());
        value
    }

    fn nondet_f64(&mut self) -> f64 {
        let value: f64 = kani::any();
        kani::assume(value.is_finite());
        value
    }
}
