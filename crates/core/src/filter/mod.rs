use serde::{Deserialize, Serialize};

use crate::{Catalog, Complexity, JazzStandard, Style, Tempo};

/// Repertoire filters. An empty list places no constraint on its tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    #[serde(default)]
    pub styles: Vec<Style>,
    #[serde(default)]
    pub tempo: Vec<Tempo>,
    #[serde(default)]
    pub complexity: Vec<Complexity>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// A standard matches when it shares at least one style with the filter
    /// and its tempo and complexity are among the selected ones.
    pub fn matches(&self, standard: &JazzStandard) -> bool {
        let tags = &standard.tags;
        let style_match =
            self.styles.is_empty() || tags.styles.iter().any(|style| self.styles.contains(style));
        let tempo_match = self.tempo.is_empty() || self.tempo.contains(&tags.tempo);
        let complexity_match =
            self.complexity.is_empty() || self.complexity.contains(&tags.complexity);

        style_match && tempo_match && complexity_match
    }

    /// Standards of `catalog` that pass the filter, in catalog order.
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a JazzStandard> {
        catalog.iter().filter(|standard| self.matches(standard)).collect()
    }

    pub fn toggle_style(&mut self, style: Style) {
        toggle(&mut self.styles, style);
    }

    pub fn toggle_tempo(&mut self, tempo: Tempo) {
        toggle(&mut self.tempo, tempo);
    }

    pub fn toggle_complexity(&mut self, complexity: Complexity) {
        toggle(&mut self.complexity, complexity);
    }

    pub fn reset(&mut self) {
        self.styles.clear();
        self.tempo.clear();
        self.complexity.clear();
    }

    pub fn is_active(&self) -> bool {
        !(self.styles.is_empty() && self.tempo.is_empty() && self.complexity.is_empty())
    }
}

fn toggle<T: PartialEq>(list: &mut Vec<T>, value: T) {
    if let Some(position) = list.iter().position(|item| *item == value) {
        list.remove(position);
    } else {
        list.push(value);
    }
}
