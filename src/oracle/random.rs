//! Seeded pseudorandom oracle for smoke runs.

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::Oracle;

/// Oracle backed by a seeded [`StdRng`].
///
/// Floats are built from uniformly random bit patterns rather than sampled
/// from an interval, so NaN, the infinities and subnormals all show up and
/// the finite-input filter is exercised.
#[derive(Clone, Debug)]
pub struct RandomOracle {
    seed: u64,
    rng: StdRng,
}

impl RandomOracle {
    /// Create an oracle whose draws are reproducible for `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed this oracle was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 { self.seed }
}

impl Oracle for RandomOracle {
    fn nondet_bool(&mut self) -> bool { self.rng.r#gen() }

    fn nondet_u8(&mut self) -> u8 { self.rng.r#gen() }

    fn nondet_u16(&mut self) -> u16 { self.rng.r#gen() }

    fn nondet_u32(&mut self) -> u32 { self.rng.r#gen() }

    fn nondet_u64(&mut self) -> u64 { self.rng.r#gen() }

    fn nondet_i8(&mut self) -> i8 { self.rng.r#gen() }

    fn nondet_i16(&mut self) -> i16 { self.rng.r#gen() }

    fn nondet_i32(&mut self) -> i32 { self.rng.r#gen() }

    fn nondet_i64(&mut self) -> i64 { self.rng.r#gen() }

    fn nondet_f32(&mut self) -> f32 { f32::from_bits(self.rng.r#gen()) }

    fn nondet_f64(&mut self) -> f64 { f64::from_bits(self.rng.r#gen()) }
}
