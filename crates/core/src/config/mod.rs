use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    Catalog, Filters, JazzStandard, KeyValueStore, NotationPreference, Result, SelectionMode,
};

pub const NOTATION_KEY: &str = "accidental_pref";
pub const FILTERS_KEY: &str = "jazz_filters";
pub const MODE_KEY: &str = "jazz_mode";
pub const LAST_SELECTED_KEY: &str = "last_selected_id";

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// External catalog replacing the bundled repertoire.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// Location of the JSON preference store.
    #[serde(default)]
    pub preferences_path: Option<PathBuf>,
}

impl AppConfig {
    /// Reads a JSON config file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::from_path(path),
            None => Catalog::builtin(),
        }
    }
}

/// User preferences restored at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    pub notation: NotationPreference,
    pub filters: Filters,
    pub mode: SelectionMode,
    pub last_selected: Option<String>,
}

impl Preferences {
    /// Reads every preference from `store`. Missing keys take their defaults;
    /// malformed values are logged and replaced.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self> {
        let notation = store
            .get(NOTATION_KEY)?
            .map(|token| NotationPreference::from_stored(&token))
            .unwrap_or_default();

        let filters = match store.get(FILTERS_KEY)? {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|err| {
                tracing::warn!(%err, "ignoring malformed stored filters");
                Filters::default()
            }),
            None => Filters::default(),
        };

        let mode = match store.get(MODE_KEY)? {
            Some(token) => token.parse().unwrap_or_else(|err| {
                tracing::warn!(%err, "ignoring malformed stored selection mode");
                SelectionMode::default()
            }),
            None => SelectionMode::default(),
        };

        Ok(Self {
            notation,
            filters,
            mode,
            last_selected: store.get(LAST_SELECTED_KEY)?,
        })
    }
}

/// Preferences paired with the store they are written back to.
pub struct Session<S> {
    store: S,
    preferences: Preferences,
}

impl<S: KeyValueStore> Session<S> {
    pub fn load(store: S) -> Result<Self> {
        let preferences = Preferences::load(&store)?;
        Ok(Self { store, preferences })
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn set_notation(&mut self, notation: NotationPreference) -> Result<()> {
        self.store.set(NOTATION_KEY, notation.as_str())?;
        self.preferences.notation = notation;
        Ok(())
    }

    pub fn set_filters(&mut self, filters: Filters) -> Result<()> {
        self.store.set(FILTERS_KEY, &serde_json::to_string(&filters)?)?;
        self.preferences.filters = filters;
        Ok(())
    }

    pub fn set_mode(&mut self, mode: SelectionMode) -> Result<()> {
        self.store.set(MODE_KEY, mode.as_str())?;
        self.preferences.mode = mode;
        Ok(())
    }

    /// Remembers `standard` as the current tune and how it was picked.
    pub fn select(&mut self, standard: &JazzStandard, mode: SelectionMode) -> Result<()> {
        self.set_mode(mode)?;
        self.store.set(LAST_SELECTED_KEY, &standard.id)?;
        self.preferences.last_selected = Some(standard.id.clone());
        Ok(())
    }

    pub fn clear_selection(&mut self) -> Result<()> {
        self.store.remove(LAST_SELECTED_KEY)?;
        self.preferences.last_selected = None;
        Ok(())
    }

    /// The remembered tune, if it still exists in `catalog`.
    pub fn selected<'a>(&self, catalog: &'a Catalog) -> Option<&'a JazzStandard> {
        let id = self.preferences.last_selected.as_deref()?;
        let found = catalog.get(id);
        if found.is_none() {
            tracing::warn!(id, "remembered standard is not in the catalog");
        }
        found
    }
}

impl<S> std::fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("preferences", &self.preferences)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{JsonFileStore, MemoryStore, Style};

    #[test]
    fn defaults_when_store_is_empty() {
        let prefs = Preferences::load(&MemoryStore::new()).unwrap();
        assert_eq!(prefs.notation, NotationPreference::Auto);
        assert_eq!(prefs.mode, SelectionMode::Wheel);
        assert!(!prefs.filters.is_active());
        assert_eq!(prefs.last_selected, None);
    }

    #[test]
    fn recovers_from_malformed_values() {
        let mut store = MemoryStore::new();
        store.set(NOTATION_KEY, "natural").unwrap();
        store.set(FILTERS_KEY, "{ broken").unwrap();
        store.set(MODE_KEY, "carousel").unwrap();

        let prefs = Preferences::load(&store).unwrap();
        assert_eq!(prefs.notation, NotationPreference::Sharp);
        assert_eq!(prefs.filters, Filters::default());
        assert_eq!(prefs.mode, SelectionMode::Wheel);
    }

    #[test]
    fn session_writes_back_through_the_store() {
        let catalog = Catalog::builtin().unwrap();
        let mut session = Session::load(MemoryStore::new()).unwrap();

        let mut filters = Filters::new();
        filters.toggle_style(Style::Bebop);
        session.set_filters(filters.clone()).unwrap();
        session.set_notation(NotationPreference::Flat).unwrap();
        session
            .select(catalog.require("so-what").unwrap(), SelectionMode::Manual)
            .unwrap();

        let store = session.into_store();
        assert_eq!(store.get(NOTATION_KEY).unwrap().as_deref(), Some("b"));
        assert_eq!(store.get(MODE_KEY).unwrap().as_deref(), Some("manual"));

        let restored = Session::load(store).unwrap();
        assert_eq!(restored.preferences().filters, filters);
        assert_eq!(restored.selected(&catalog).unwrap().title, "So What");
    }

    #[test]
    fn clearing_the_selection_forgets_the_tune() {
        let catalog = Catalog::builtin().unwrap();
        let mut session = Session::load(MemoryStore::new()).unwrap();
        session
            .select(catalog.require("mr-pc").unwrap(), SelectionMode::Wheel)
            .unwrap();
        session.clear_selection().unwrap();

        assert!(session.selected(&catalog).is_none());
        assert_eq!(session.into_store().get(LAST_SELECTED_KEY).unwrap(), None);
    }

    #[test]
    fn stale_selection_is_ignored() {
        let catalog = Catalog::builtin().unwrap();
        let mut store = MemoryStore::new();
        store.set(LAST_SELECTED_KEY, "removed-tune").unwrap();
        let session = Session::load(store).unwrap();
        assert!(session.selected(&catalog).is_none());
    }

    #[test]
    fn loads_config_file_or_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = AppConfig::load(dir.path().join("missing.json")).unwrap();
        assert_eq!(missing, AppConfig::default());

        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "preferences_path": "/tmp/prefs.json" }"#).unwrap();
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.preferences_path, Some(PathBuf::from("/tmp/prefs.json")));
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.catalog().unwrap().len(), 19);
    }

    #[test]
    fn file_backed_session_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut session = Session::load(JsonFileStore::open(&path).unwrap()).unwrap();
        session.set_notation(NotationPreference::Sharp).unwrap();

        let restored = Session::load(JsonFileStore::open(&path).unwrap()).unwrap();
        assert_eq!(restored.preferences().notation, NotationPreference::Sharp);
    }
}
