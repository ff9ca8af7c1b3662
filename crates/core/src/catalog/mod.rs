//! Practice repertoire: jazz standards tagged by style, tempo and complexity,
//! each with its recommended scales.

use std::{collections::HashSet, fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{JazzWheelError, Result, ScaleRecommendation};

const BUILTIN_STANDARDS: &str = include_str!("../../data/standards.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Style {
    #[serde(rename = "New Orleans")]
    NewOrleans,
    Swing,
    Bebop,
    Modal,
    #[serde(rename = "Bossa/Latin")]
    BossaLatin,
    #[serde(rename = "Soul-Jazz/Funk")]
    SoulJazzFunk,
    Ballad,
}

impl Style {
    pub const ALL: [Style; 7] = [
        Self::NewOrleans,
        Self::Swing,
        Self::Bebop,
        Self::Modal,
        Self::BossaLatin,
        Self::SoulJazzFunk,
        Self::Ballad,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::NewOrleans => "New Orleans",
            Self::Swing => "Swing",
            Self::Bebop => "Bebop",
            Self::Modal => "Modal",
            Self::BossaLatin => "Bossa/Latin",
            Self::SoulJazzFunk => "Soul-Jazz/Funk",
            Self::Ballad => "Ballad",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::NewOrleans => &["new-orleans", "dixieland"],
            Self::BossaLatin => &["bossa", "latin"],
            Self::SoulJazzFunk => &["soul-jazz", "funk"],
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tempo {
    #[serde(rename = "Lent")]
    Slow,
    Medium,
    #[serde(rename = "Rapide")]
    Fast,
}

impl Tempo {
    pub const ALL: [Tempo; 3] = [Self::Slow, Self::Medium, Self::Fast];

    pub fn label(self) -> &'static str {
        match self {
            Self::Slow => "Lent",
            Self::Medium => "Medium",
            Self::Fast => "Rapide",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Slow => &["slow"],
            Self::Medium => &[],
            Self::Fast => &["fast"],
        }
    }
}

/// How many scales a tune asks the player to switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Complexity {
    #[serde(rename = "1 gamme")]
    SingleScale,
    #[serde(rename = "plusieurs gammes")]
    MultipleScales,
}

impl Complexity {
    pub const ALL: [Complexity; 2] = [Self::SingleScale, Self::MultipleScales];

    pub fn label(self) -> &'static str {
        match self {
            Self::SingleScale => "1 gamme",
            Self::MultipleScales => "plusieurs gammes",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::SingleScale => &["single", "one"],
            Self::MultipleScales => &["multiple", "several"],
        }
    }
}

/// Case-insensitive lookup over a tag's label and aliases.
fn parse_tag<T: Copy>(
    kind: &'static str,
    input: &str,
    all: &[T],
    label: fn(T) -> &'static str,
    aliases: fn(T) -> &'static [&'static str],
) -> Result<T> {
    let wanted = input.trim();
    all.iter()
        .copied()
        .find(|tag| {
            label(*tag).eq_ignore_ascii_case(wanted)
                || aliases(*tag).iter().any(|alias| alias.eq_ignore_ascii_case(wanted))
        })
        .ok_or_else(|| JazzWheelError::invalid(kind, input))
}

macro_rules! tag_traits {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $ty {
            type Err = JazzWheelError;

            fn from_str(s: &str) -> Result<Self> {
                parse_tag($kind, s, &Self::ALL, Self::label, Self::aliases)
            }
        }
    };
}

tag_traits!(Style, "style");
tag_traits!(Tempo, "tempo");
tag_traits!(Complexity, "complexity");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tags {
    pub styles: Vec<Style>,
    pub tempo: Tempo,
    pub complexity: Complexity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JazzStandard {
    pub id: String,
    pub title: String,
    pub tags: Tags,
    pub recommended_scales: Vec<ScaleRecommendation>,
}

/// Ordered, read-only collection of standards with unique identifiers.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    standards: Vec<JazzStandard>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate identifiers.
    pub fn new(standards: Vec<JazzStandard>) -> Result<Self> {
        let mut seen = HashSet::new();
        for standard in &standards {
            if !seen.insert(standard.id.as_str()) {
                return Err(JazzWheelError::msg(format!(
                    "duplicate standard id `{}` in catalog",
                    standard.id
                )));
            }
        }
        Ok(Self { standards })
    }

    /// Repertoire bundled with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_STANDARDS)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let standards: Vec<JazzStandard> = serde_json::from_str(json)?;
        Self::new(standards)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&contents)?;
        tracing::info!(path = %path.display(), standards = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&JazzStandard> {
        self.standards.iter().find(|standard| standard.id == id)
    }

    /// Like [`Catalog::get`] but reports a missing id as an error.
    pub fn require(&self, id: &str) -> Result<&JazzStandard> {
        self.get(id)
            .ok_or_else(|| JazzWheelError::UnknownStandard(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &JazzStandard> {
        self.standards.iter()
    }

    pub fn len(&self) -> usize {
        self.standards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.standards.is_empty()
    }
}
