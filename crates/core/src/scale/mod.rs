use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{JazzWheelError, Result};

/// Scale families recommended by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleType {
    #[serde(rename = "major")]
    Major,
    #[serde(rename = "dorian")]
    Dorian,
    #[serde(rename = "mixolydian")]
    Mixolydian,
    #[serde(rename = "minor")]
    Minor,
    #[serde(rename = "blues")]
    Blues,
    #[serde(rename = "pentatonic major", alias = "pentatonic-major")]
    PentatonicMajor,
    #[serde(rename = "pentatonic minor", alias = "pentatonic-minor")]
    PentatonicMinor,
}

impl ScaleType {
    pub const ALL: [ScaleType; 7] = [
        Self::Major,
        Self::Dorian,
        Self::Mixolydian,
        Self::Minor,
        Self::Blues,
        Self::PentatonicMajor,
        Self::PentatonicMinor,
    ];

    /// Lowercase tag as written in the catalog.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Dorian => "dorian",
            Self::Mixolydian => "mixolydian",
            Self::Minor => "minor",
            Self::Blues => "blues",
            Self::PentatonicMajor => "pentatonic major",
            Self::PentatonicMinor => "pentatonic minor",
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScaleType {
    type Err = JazzWheelError;

    fn from_str(s: &str) -> Result<Self> {
        let normalised = s.trim().to_ascii_lowercase().replace('-', " ");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalised)
            .ok_or_else(|| JazzWheelError::invalid("scale type", s))
    }
}

/// A scale to practise over a tune, rooted at a concert-pitch spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleRecommendation {
    pub root: String,
    #[serde(rename = "type")]
    pub scale_type: ScaleType,
    pub reason: String,
}

impl ScaleRecommendation {
    pub fn new(root: impl Into<String>, scale_type: ScaleType, reason: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            scale_type,
            reason: reason.into(),
        }
    }
}

/// Joins a root and a scale type as `"{root} {Type}"`, uppercasing the first
/// character of the type. An empty type yields the root followed by a space.
pub fn format_scale_name(root: &str, scale_type: &str) -> String {
    let mut chars = scale_type.chars();
    let capitalised: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    format!("{root} {capitalised}")
}
