//! Oracle that replays a fixed script of values.

use std::collections::VecDeque;

use tracing::warn;

use super::Oracle;

/// A single scripted draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OracleValue {
    /// Answer for [`Oracle::nondet_bool`].
    Bool(bool),
    /// Answer for [`Oracle::nondet_u8`].
    U8(u8),
    /// Answer for [`Oracle::nondet_u16`].
    U16(u16),
    /// Answer for [`Oracle::nondet_u32`].
    U32(u32),
    /// Answer for [`Oracle::nondet_u64`].
    U64(u64),
    /// Answer for [`Oracle::nondet_i8`].
    I8(i8),
    /// Answer for [`Oracle::nondet_i16`].
    I16(i16),
    /// Answer for [`Oracle::nondet_i32`].
    I32(i32),
    /// Answer for [`Oracle::nondet_i64`].
    I64(i64),
    /// Answer for [`Oracle::nondet_f32`].
    F32(f32),
    /// Answer for [`Oracle::nondet_f64`].
    F64(f64),
}

impl OracleValue {
    /// Name of the primitive type this value answers.
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
        }
    }
}

/// Oracle answering draws from a queue of [`OracleValue`]s.
///
/// Draws consume the script front to back. When the head of the script does
/// not match the requested type, or the script is exhausted, the draw yields
/// the type's zero value and is counted as a miss; a mismatched head stays
/// queued for the next draw of its own type.
#[derive(Clone, Debug, Default)]
pub struct ScriptedOracle {
    script: VecDeque<OracleValue>,
    misses: usize,
}

impl ScriptedOracle {
    /// Build an oracle from an arbitrary script.
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = OracleValue>) -> Self {
        Self {
            script: values.into_iter().collect(),
            misses: 0,
        }
    }

    /// Build an oracle that only answers `f32` draws, in order.
    #[must_use]
    pub fn pressures(values: impl IntoIterator<Item = f32>) -> Self {
        Self::new(values.into_iter().map(OracleValue::F32))
    }

    /// Append a value to the end of the script.
    pub fn push(&mut self, value: OracleValue) { self.script.push_back(value); }

    /// Number of scripted values not yet drawn.
    #[must_use]
    pub fn remaining(&self) -> usize { self.script.len() }

    /// Number of draws answered with a zero value.
    #[must_use]
    pub const fn misses(&self) -> usize { self.misses }

    fn next_matching<T: Default>(
        &mut self,
        requested: &'static str,
        extract: fn(OracleValue) -> Option<T>,
    ) -> T {
        let Some(head) = self.script.front().copied() else {
            self.misses = self.misses.saturating_add(1);
            warn!(requested, "oracle script exhausted; answering zero");
            return T::default();
        };
        let Some(value) = extract(head) else {
            self.misses = self.misses.saturating_add(1);
            warn!(
                requested,
                scripted = head.type_name(),
                "oracle script type mismatch; answering zero"
            );
            return T::default();
        };
        self.script.pop_front();
        value
    }
}

impl Oracle for ScriptedOracle {
    fn nondet_bool(&mut self) -> bool {
        self.next_matching("bool", |v| match v {
            OracleValue::Bool(b) => Some(b),
            _ => None,
        })
    }

    fn nondet_u8(&mut self) -> u8 {
        self.next_matching("u8", |v| match v {
            OracleValue::U8(n) => Some(n),
            _ => None,
        })
    }

    fn nondet_u16(&mut self) -> u16 {
        self.next_matching("u16", |v| match v {
            OracleValue::U16(n) => Some(n),
            _ => None,
        })
    }

    fn nondet_u32(&mut self) -> u32 {
        self.next_matching("u32", |v| match v {
            OracleValue::U32(n) => Some(n),
            _ => None,
        })
    }

    fn nondet_u64(&mut self) -> u64 {
        self.next_matching("u64", |v| match v {
            OracleValue::U64(n) => Some(n),
            _ => None,
        })
    }

    fn nondet_i8(&mut self) -> i8 {
        self.next_matching("i8", |v| match v {
            OracleValue::I8(n) => Some(n),
            _ => None,
        })
    }

    fn nondet_i16(&mut self) -> i16 {
        self.next_matching("i16", |v| match v {
            OracleValue::I16(n) => Some(n),
            _ => None,
        })
    }

    fn nondet_i32(&mut self) -> i32 {
        self.next_matching("i32", |v| match v {
            OracleValue::I32(n) => Some(n),
            _ => None,
        })
    }

    fn nondet_i64(&mut self) -> i64 {
        self.next_matching("i64", |v| match v {
            OracleValue::I64(n) => Some(n),
            _ => None,
        })
    }

    fn nondet_f32(&mut self) -> f32 {
        self.next_matching("f32", |v| match v {
            OracleValue::F32(x) => Some(x),
            _ => None,
        })
    }

    fn nondet_f64(&mut self) -> f64 {
        self.next_matching("f64", |v| match v {
            OracleValue::F64(x) => Some(x),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn replays_values_in_order() {
        let mut oracle = ScriptedOracle::new([
            OracleValue::Bool(true),
            OracleValue::U16(65_535),
            OracleValue::I8(-3),
            OracleValue::F64(0.5),
        ]);
        assert!(oracle.nondet_bool());
        assert_eq!(oracle.nondet_u16(), 65_535);
        assert_eq!(oracle.nondet_i8(), -3);
        assert_eq!(oracle.nondet_f64().to_bits(), 0.5f64.to_bits());
        assert_eq!(oracle.remaining(), 0);
        assert_eq!(oracle.misses(), 0);
    }

    #[test]
    fn exhausted_script_answers_zero() {
        let mut oracle = ScriptedOracle::default();
        assert_eq!(oracle.nondet_u32(), 0);
        assert_eq!(oracle.nondet_f32().to_bits(), 0.0f32.to_bits());
        assert!(!oracle.nondet_bool());
        assert_eq!(oracle.misses(), 3);
    }

    #[test]
    fn mismatched_head_stays_queued() {
        let mut oracle = ScriptedOracle::new([OracleValue::I64(-9)]);
        assert_eq!(oracle.nondet_u64(), 0);
        assert_eq!(oracle.misses(), 1);
        assert_eq!(oracle.remaining(), 1);
        assert_eq!(oracle.nondet_i64(), -9);
    }

    #[test]
    fn push_extends_the_script() {
        let mut oracle = ScriptedOracle::pressures([1.0]);
        oracle.push(OracleValue::I32(12));
        assert_eq!(oracle.nondet_f32().to_bits(), 1.0f32.to_bits());
        assert_eq!(oracle.nondet_i32(), 12);
    }

    #[test]
    fn nan_survives_the_script() {
        let mut oracle = ScriptedOracle::pressures([f32::NAN]);
        assert!(oracle.nondet_f32().is_nan());
    }

    #[rstest]
    #[case(OracleValue::Bool(false), "bool")]
    #[case(OracleValue::U8(1), "u8")]
    #[case(OracleValue::I16(1), "i16")]
    #[case(OracleValue::F32(1.0), "f32")]
    fn type_names(#[case] value: OracleValue, #[case] expected: &str) {
        assert_eq!(value.type_name(), expected);
    }
}
