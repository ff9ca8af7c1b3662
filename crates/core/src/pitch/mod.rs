//! Pitch-class arithmetic over the fixed 12-tone chromatic tables.
//!
//! Both tables are indexed by [`PitchClass`] and spell the same pitch class
//! at every index; they only differ in which accidental they prefer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{JazzWheelError, Result};

/// Sharp-preferring spellings, starting at C.
pub const SHARP_TABLE: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Flat-preferring spellings, starting at C.
pub const FLAT_TABLE: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// One of the 12 equal-tempered chromatic steps, C = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);

    /// Builds a pitch class from any integer, wrapping into `[0, 11]`.
    pub fn wrapping(value: i64) -> Self {
        Self(value.rem_euclid(12) as u8)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Moves by `semitones`, which may be negative or larger than an octave.
    pub fn shifted(self, semitones: i32) -> Self {
        Self::wrapping(i64::from(self.0) + i64::from(semitones))
    }

    pub fn sharp_spelling(self) -> &'static str {
        SHARP_TABLE[self.index()]
    }

    pub fn flat_spelling(self) -> &'static str {
        FLAT_TABLE[self.index()]
    }

    /// Iterates over all twelve pitch classes in ascending order.
    pub fn all() -> impl Iterator<Item = PitchClass> {
        (0..12).map(PitchClass)
    }
}

impl TryFrom<u8> for PitchClass {
    type Error = JazzWheelError;

    fn try_from(value: u8) -> Result<Self> {
        if value < 12 {
            Ok(Self(value))
        } else {
            Err(JazzWheelError::invalid("pitch class", value.to_string()))
        }
    }
}

impl From<PitchClass> for u8 {
    fn from(value: PitchClass) -> Self {
        value.0
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sharp_spelling())
    }
}

/// Resolves a spelling such as `"C#"` or `"Eb"` to its pitch class.
///
/// The sharp table is consulted first, then the flat table. Matching is exact:
/// accidentals are the ASCII `#` and `b` markers and the letter is uppercase.
pub fn resolve(spelling: &str) -> Result<PitchClass> {
    SHARP_TABLE
        .iter()
        .position(|name| *name == spelling)
        .or_else(|| FLAT_TABLE.iter().position(|name| *name == spelling))
        .map(|index| PitchClass(index as u8))
        .ok_or_else(|| JazzWheelError::UnknownNote {
            spelling: spelling.to_string(),
        })
}

/// Returns true when both spellings resolve to the same pitch class.
pub fn enharmonic(a: &str, b: &str) -> bool {
    matches!((resolve(a), resolve(b)), (Ok(x), Ok(y)) if x == y)
}
