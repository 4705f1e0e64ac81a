//! Oracle decoding draws from a fuzzer-supplied byte stream.

#![expect(
    clippy::little_endian_bytes,
    reason = "fuzzer inputs and generated corpora are little-endian by convention"
)]

use super::Oracle;

/// Oracle that slices each draw off the front of a byte buffer.
///
/// Every draw consumes exactly `size_of::<T>()` bytes. Once the buffer runs
/// out, the missing bytes read as zero, so a short input still produces a
/// well-formed (and finite) draw.
#[derive(Clone, Debug)]
pub struct ByteOracle<'a> {
    data: &'a [u8],
    cursor: usize,
}

impl<'a> ByteOracle<'a> {
    /// Wrap a byte buffer.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self { Self { data, cursor: 0 } }

    /// Number of input bytes consumed so far.
    #[must_use]
    pub fn consumed(&self) -> usize { self.cursor.min(self.data.len()) }

    /// Returns `true` once every input byte has been consumed.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool { self.cursor >= self.data.len() }

    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        let rest = self.data.get(self.cursor..).unwrap_or_default();
        for (slot, byte) in out.iter_mut().zip(rest) {
            *slot = *byte;
        }
        self.cursor = self.cursor.saturating_add(N);
        out
    }
}

impl Oracle for ByteOracle<'_> {
    fn nondet_bool(&mut self) -> bool {
        let [byte] = self.take();
        byte & 1 == 1
    }

    fn nondet_u8(&mut self) -> u8 {
        let [byte] = self.take();
        byte
    }

    fn nondet_u16(&mut self) -> u16 { u16::from_le_bytes(self.take()) }

    fn nondet_u32(&mut self) -> u32 { u32::from_le_bytes(self.take()) }

    fn nondet_u64(&mut self) -> u64 { u64::from_le_bytes(self.take()) }

    fn nondet_i8(&mut self) -> i8 { i8::from_le_bytes(self.take()) }

    fn nondet_i16(&mut self) -> i16 { i16::from_le_bytes(self.take()) }

    fn nondet_i32(&mut self) -> i32 { i32::from_le_bytes(self.take()) }

    fn nondet_i64(&mut self) -> i64 { i64::from_le_bytes(self.take()) }

    fn nondet_f32(&mut self) -> f32 { f32::from_le_bytes(self.take()) }

    fn nondet_f64(&mut self) -> f64 { f64::from_le_bytes(self.take()) }
}
