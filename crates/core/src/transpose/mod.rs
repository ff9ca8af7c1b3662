//! Note transposition and enharmonic spelling.
//!
//! [`transpose`] moves a root by a number of semitones and spells the result
//! from either the sharp or the flat table, according to a
//! [`NotationPreference`]. The `Auto` policy follows the conventions used on
//! the scale sheets; see [`prefers_flats`] for the exact rules.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{pitch, JazzWheelError, PitchClass, Result};

/// Keys conventionally written with flats. Tested against the sharp-table
/// spelling of the target, so among these only `F` can ever match.
const FLAT_KEY_ROOTS: [&str; 7] = ["F", "Bb", "Eb", "Ab", "Db", "Gb", "Cb"];

/// Concert roots that keep flats when read a whole step up.
const FLAT_ROOTS_UP_A_STEP: [&str; 3] = ["Bb", "Eb", "Ab"];

/// Common jazz keys, tested against the flat-table spelling of the target.
const COMMON_FLAT_KEYS: [&str; 5] = ["F", "Bb", "Eb", "Ab", "C"];

/// Accidental notation used when spelling transposed notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NotationPreference {
    #[serde(rename = "#")]
    Sharp,
    #[serde(rename = "b")]
    Flat,
    #[default]
    #[serde(rename = "auto")]
    Auto,
}

impl NotationPreference {
    pub const ALL: [NotationPreference; 3] = [Self::Sharp, Self::Flat, Self::Auto];

    /// Token used when persisting the preference.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sharp => "#",
            Self::Flat => "b",
            Self::Auto => "auto",
        }
    }

    /// Parses a stored token. Anything unrecognised behaves like `Sharp`,
    /// which is the fallthrough of the spelling policy.
    pub fn from_stored(token: &str) -> Self {
        token.parse().unwrap_or(Self::Sharp)
    }
}

impl fmt::Display for NotationPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotationPreference {
    type Err = JazzWheelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "#" | "sharp" | "sharps" => Ok(Self::Sharp),
            "b" | "flat" | "flats" => Ok(Self::Flat),
            "auto" => Ok(Self::Auto),
            _ => Err(JazzWheelError::invalid("notation preference", s)),
        }
    }
}

/// Instrument transpositions shown on a scale sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transposition {
    Concert,
    Bb,
    Eb,
}

impl Transposition {
    pub const ALL: [Transposition; 3] = [Self::Concert, Self::Bb, Self::Eb];

    /// Semitones between concert pitch and the written pitch.
    pub fn semitones(self) -> i32 {
        match self {
            Self::Concert => 0,
            Self::Bb => 2,
            Self::Eb => 9,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Concert => "Concert",
            Self::Bb => "Bb",
            Self::Eb => "Eb",
        }
    }

    /// Written root for an instrument in this key.
    pub fn apply(self, root: &str, pref: NotationPreference) -> String {
        transpose(root, self.semitones(), pref)
    }
}

/// Transposes `root` by `semitones` and spells the result according to `pref`.
///
/// Unknown roots are returned unchanged. This pass-through keeps the function
/// total over all inputs; use [`try_transpose`] to observe the failure.
pub fn transpose(root: &str, semitones: i32, pref: NotationPreference) -> String {
    match try_transpose(root, semitones, pref) {
        Ok(spelling) => spelling.to_string(),
        Err(err) => {
            tracing::debug!(root, semitones, %err, "passing unresolved root through unchanged");
            root.to_string()
        }
    }
}

/// Strict variant of [`transpose`] that reports [`JazzWheelError::UnknownNote`].
pub fn try_transpose(root: &str, semitones: i32, pref: NotationPreference) -> Result<&'static str> {
    let target = pitch::resolve(root)?.shifted(semitones);

    Ok(if prefers_flats(root, semitones, target, pref) {
        target.flat_spelling()
    } else {
        target.sharp_spelling()
    })
}

/// Decides whether `target` is spelled from the flat table.
///
/// With `Auto`, flats are used when any of these hold:
/// 1. the sharp spelling of the target is in the flat-key set
///    `{F, Bb, Eb, Ab, Db, Gb, Cb}`;
/// 2. the move is exactly 2 semitones and the untransposed root is one of
///    `{Bb, Eb, Ab}`;
/// 3. the flat spelling of the target is one of `{F, Bb, Eb, Ab, C}`.
pub fn prefers_flats(
    root: &str,
    semitones: i32,
    target: PitchClass,
    pref: NotationPreference,
) -> bool {
    match pref {
        NotationPreference::Flat => true,
        NotationPreference::Sharp => false,
        NotationPreference::Auto => {
            FLAT_KEY_ROOTS.contains(&target.sharp_spelling())
                || (semitones == 2 && FLAT_ROOTS_UP_A_STEP.contains(&root))
                || COMMON_FLAT_KEYS.contains(&target.flat_spelling())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::{resolve, FLAT_TABLE, SHARP_TABLE};

    fn all_roots() -> impl Iterator<Item = &'static str> {
        SHARP_TABLE.iter().chain(FLAT_TABLE.iter()).copied()
    }

    #[test]
    fn transposes_known_scenarios() {
        assert_eq!(transpose("C", 2, NotationPreference::Flat), "D");
        assert_eq!(transpose("E", 2, NotationPreference::Flat), "Gb");
        assert_eq!(transpose("E", 2, NotationPreference::Sharp), "F#");
        assert_eq!(transpose("Bb", 2, NotationPreference::Auto), "C");
        assert_eq!(transpose("D", 9, NotationPreference::Auto), "B");
    }

    #[test]
    fn passes_unknown_roots_through() {
        assert_eq!(transpose("Xb", 2, NotationPreference::Auto), "Xb");
        assert_eq!(transpose("", 9, NotationPreference::Flat), "");
        assert!(matches!(
            try_transpose("Xb", 2, NotationPreference::Auto),
            Err(JazzWheelError::UnknownNote { .. })
        ));
    }

    #[test]
    fn auto_uses_flats_for_common_jazz_keys() {
        // Flat spelling of the target is in the common key set.
        assert_eq!(transpose("G", 3, NotationPreference::Auto), "Bb");
        assert_eq!(transpose("C", 8, NotationPreference::Auto), "Ab");
        assert_eq!(transpose("D", 1, NotationPreference::Auto), "Eb");
    }

    #[test]
    fn auto_keeps_sharps_outside_the_flat_rules() {
        assert_eq!(transpose("C", 1, NotationPreference::Auto), "C#");
        assert_eq!(transpose("C", 6, NotationPreference::Auto), "F#");
        assert_eq!(transpose("E", 9, NotationPreference::Auto), "C#");
    }

    #[test]
    fn auto_flat_key_rule_checks_the_sharp_spelling() {
        // Db and Gb are flat-key roots, but the sharp table spells them C# and
        // F#, so the first rule never fires for them.
        let target = resolve("Db").unwrap();
        assert!(!prefers_flats("C", 1, target, NotationPreference::Auto));
        let target = resolve("Gb").unwrap();
        assert!(!prefers_flats("C", 6, target, NotationPreference::Auto));
    }

    #[test]
    fn auto_whole_step_rule_depends_on_the_original_spelling() {
        // Ab + 2 = Bb, which is also covered by the common key rule.
        assert_eq!(transpose("Ab", 2, NotationPreference::Auto), "Bb");
        assert_eq!(transpose("G#", 2, NotationPreference::Auto), "Bb");

        let target = resolve("Db").unwrap();
        assert!(!prefers_flats("B", 2, target, NotationPreference::Auto));
        assert!(prefers_flats("Eb", 2, resolve("F").unwrap(), NotationPreference::Auto));
        // The rule is tied to an interval of exactly 2, not 2 mod 12.
        let target = resolve("C#").unwrap();
        assert!(!prefers_flats("Bb", 14, target, NotationPreference::Auto));
        assert!(prefers_flats("Bb", 2, target, NotationPreference::Auto));
    }

    #[test]
    fn zero_shift_preserves_pitch_class() {
        for root in all_roots() {
            for pref in NotationPreference::ALL {
                let out = transpose(root, 0, pref);
                assert_eq!(resolve(&out).unwrap(), resolve(root).unwrap(), "{root} {pref}");
            }
        }
    }

    #[test]
    fn transposed_pitch_class_matches_modular_arithmetic() {
        for root in all_roots() {
            let base = resolve(root).unwrap();
            for semitones in -30..=30 {
                for pref in NotationPreference::ALL {
                    let out = transpose(root, semitones, pref);
                    assert_eq!(resolve(&out).unwrap(), base.shifted(semitones));
                }
            }
        }
    }

    #[test]
    fn handles_extreme_intervals() {
        let out = transpose("C", i32::MIN, NotationPreference::Sharp);
        assert_eq!(resolve(&out).unwrap(), PitchClass::wrapping(i64::from(i32::MIN)));
        let out = transpose("B", i32::MAX, NotationPreference::Flat);
        assert_eq!(resolve(&out).unwrap(), PitchClass::wrapping(11 + i64::from(i32::MAX)));
    }

    #[test]
    fn up_a_step_and_back_returns_to_the_root() {
        for root in all_roots() {
            let up = transpose(root, 2, NotationPreference::Auto);
            let back = transpose(&up, 10, NotationPreference::Auto);
            assert_eq!(resolve(&back).unwrap(), resolve(root).unwrap());
        }
    }

    #[test]
    fn parses_notation_tokens() {
        assert_eq!("#".parse::<NotationPreference>().unwrap(), NotationPreference::Sharp);
        assert_eq!("Flat".parse::<NotationPreference>().unwrap(), NotationPreference::Flat);
        assert_eq!("auto".parse::<NotationPreference>().unwrap(), NotationPreference::Auto);
        assert!("natural".parse::<NotationPreference>().is_err());
        assert_eq!(NotationPreference::from_stored("garbage"), NotationPreference::Sharp);
        assert_eq!(NotationPreference::from_stored("b"), NotationPreference::Flat);
    }

    #[test]
    fn transpositions_use_instrument_offsets() {
        assert_eq!(Transposition::Bb.apply("F", NotationPreference::Auto), "G");
        assert_eq!(Transposition::Eb.apply("F", NotationPreference::Auto), "D");
        assert_eq!(Transposition::Eb.apply("C", NotationPreference::Auto), "A");
        assert_eq!(Transposition::Concert.apply("Db", NotationPreference::Sharp), "C#");
    }
}
