use std::rc::Rc;

use crate::app::domain::preferences::{FontSize, Preferences, PreferencesRecord, Tab};
use crate::app::infrastructure::error::StoreError;
use crate::app::infrastructure::store::{keys, DurableStore, StoreResult};

/// Single writer of the display preferences.
///
/// The in-memory copy is authoritative for the running session: a failed
/// write is returned to the caller but never rolls the value back.
pub struct PreferenceManager {
    store: Rc<dyn DurableStore>,
    prefs: Preferences,
    loaded: bool,
}

impl PreferenceManager {
    pub fn new(store: Rc<dyn DurableStore>) -> Self {
        Self {
            store,
            prefs: Preferences::default(),
            loaded: false,
        }
    }

    /// Read `preferences` from the store. Missing or malformed records yield
    /// defaults. Only the first call touches the store.
    pub fn load(&mut self) -> Preferences {
        if self.loaded {
            return self.prefs;
        }

        match self.store.get(keys::PREFERENCES) {
            Ok(Some(json)) => match serde_json::from_str::<PreferencesRecord>(&json) {
                Ok(record) => {
                    self.prefs.dark_mode = record.dark_mode;
                    self.prefs.last_tab = record.tab();
                }
                Err(err) => {
                    tracing::warn!(%err, "malformed preferences record; using defaults");
                }
            },
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(%err, "could not read preferences; using defaults");
            }
        }

        self.loaded = true;
        tracing::debug!(prefs = ?self.prefs, "preferences loaded");
        self.prefs
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    /// Update and persist `{darkMode, lastTab}`. Exactly one write per call.
    pub fn save(&mut self, dark_mode: bool, last_tab: Tab) -> StoreResult<()> {
        self.prefs.dark_mode = dark_mode;
        self.prefs.last_tab = last_tab;

        let json = serde_json::to_string(&PreferencesRecord::new(dark_mode, last_tab)).map_err(
            |source| StoreError::Encode {
                key: keys::PREFERENCES.to_string(),
                source,
            },
        )?;
        self.store.set(keys::PREFERENCES, &json)?;
        tracing::info!(dark_mode, last_tab = last_tab.as_str(), "preferences saved");
        Ok(())
    }

    /// Persists only when the value actually changes.
    pub fn set_dark_mode(&mut self, dark_mode: bool) -> StoreResult<()> {
        if self.prefs.dark_mode == dark_mode {
            return Ok(());
        }
        self.save(dark_mode, self.prefs.last_tab)
    }

    pub fn set_last_tab(&mut self, tab: Tab) -> StoreResult<()> {
        if self.prefs.last_tab == tab {
            return Ok(());
        }
        self.save(self.prefs.dark_mode, tab)
    }

    /// Read `fontSize`; absent, unreadable or unknown values resolve to `média`.
    pub fn load_font_size(&mut self) -> FontSize {
        let size = match self.store.get(keys::FONT_SIZE) {
            Ok(Some(raw)) => FontSize::from_stored(&raw),
            Ok(None) => FontSize::default(),
            Err(err) => {
                tracing::warn!(%err, "could not read font size; using default");
                FontSize::default()
            }
        };
        self.prefs.font_size = size;
        size
    }

    /// The new size applies immediately even if the write fails.
    pub fn set_font_size(&mut self, size: FontSize) -> StoreResult<()> {
        self.prefs.font_size = size;
        self.store.set(keys::FONT_SIZE, size.as_str())?;
        tracing::info!(font_size = size.as_str(), "font size saved");
        Ok(())
    }

    /// Forget everything in memory after the store has been wiped.
    pub fn reset(&mut self) {
        self.prefs = Preferences::default();
    }
}
