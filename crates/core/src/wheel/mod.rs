use std::{fmt, str::FromStr};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{JazzStandard, JazzWheelError, Result};

/// How the user last picked a tune.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    Wheel,
    Manual,
}

impl SelectionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wheel => "wheel",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionMode {
    type Err = JazzWheelError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "wheel" => Ok(Self::Wheel),
            "manual" => Ok(Self::Manual),
            _ => Err(JazzWheelError::invalid("selection mode", s)),
        }
    }
}

/// Random picker over the currently visible standards.
#[derive(Debug, Clone, Default)]
pub struct Wheel<'a> {
    items: Vec<&'a JazzStandard>,
}

impl<'a> Wheel<'a> {
    pub fn new(items: Vec<&'a JazzStandard>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[&'a JazzStandard] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Draws one standard uniformly. Returns `None` when nothing is visible.
    pub fn spin<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&'a JazzStandard> {
        let picked = spin(&self.items, rng).copied();
        if let Some(standard) = picked {
            tracing::debug!(id = %standard.id, candidates = self.items.len(), "wheel stopped");
        }
        picked
    }
}

/// Uniform index draw over `items`.
pub fn spin<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.random_range(0..items.len()))
}
