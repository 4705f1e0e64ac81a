//! AFL target driving the verification loop from fuzzer bytes.
//!
//! Every input is decoded by a `ByteOracle` into pressure draws. A violated
//! end-of-cycle invariant panics so AFL records the input as a crash; the
//! crashing file is the counterexample.

unsafe extern "C" {
    fn __AFL_LOOP(cnt: u32) -> i32;
}

use std::io::{self, Read};

use fbharness::{CycleBound, VerificationLoop, oracle::ByteOracle};

/// Largest input read per testcase.
const MAX_INPUT: u64 = 4096;
/// Cycles run per testcase.
const CYCLES: u64 = 64;

fn main() {
    let mut data = Vec::new();
    loop {
        // SAFETY: provided by the AFL runtime linked in by `cargo afl`.
        if unsafe { __AFL_LOOP(1000) } == 0 {
            break;
        }
        data.clear();
        if io::stdin().take(MAX_INPUT).read_to_end(&mut data).is_err() {
            return;
        }

        let mut harness = VerificationLoop::new(ByteOracle::new(&data));
        if let Err(violation) = harness.run(CycleBound::Cycles(CYCLES)) {
            panic!("{violation}");
        }
    }
}
