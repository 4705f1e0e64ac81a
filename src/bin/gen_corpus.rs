//! Utility to create AFL fuzzing corpus data.
//!
//! Each seed is the byte stream the fuzz target's oracle decodes: one
//! little-endian `f32` per pressure draw. The seeds mirror the scripted
//! scenarios and are written into the `fuzz/corpus` directory.

#![expect(
    clippy::little_endian_bytes,
    reason = "the fuzz oracle decodes little-endian draws"
)]

use std::{
    fs::{self, File},
    io::{self, Write},
    path::Path,
};

const CORPUS_DIR: &str = "fuzz/corpus";

const SEEDS: [(&str, &[f32]); 6] = [
    ("zero.bin", &[0.0]),
    ("threshold.bin", &[36_464.0]),
    ("upper_bound.bin", &[65_535.0]),
    ("above_range.bin", &[65_536.0]),
    ("negative.bin", &[-1.0]),
    ("nan_then_valid.bin", &[f32::NAN, 42.0]),
];

fn save_seed(draws: &[f32], path: &Path) -> io::Result<()> {
    let mut file = File::create(path)?;
    for draw in draws {
        file.write_all(&draw.to_le_bytes())?;
    }
    Ok(())
}

fn main() -> io::Result<()> {
    fs::create_dir_all(CORPUS_DIR)?;
    let dir = Path::new(CORPUS_DIR);
    for (name, draws) in SEEDS {
        save_seed(draws, &dir.join(name))?;
    }
    Ok(())
}
