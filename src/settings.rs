//! Game settings and preferences
//!
//! Persisted separately from scores, through the same obfuscated store.

use serde::{Deserialize, Serialize};

use crate::persistence::{PersistenceStore, SETTINGS_KEY};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sound off (the game window opens muted)
    pub muted: bool,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Reduced motion (no death flash)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            muted: true,
            sfx_volume: 1.0,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Load settings (defaults if absent or unreadable)
    pub fn load(store: &PersistenceStore) -> Self {
        if !store.contains(SETTINGS_KEY) {
            log::info!("Using default settings");
            return Self::default();
        }
        let settings = store.get(SETTINGS_KEY, Self::default());
        log::info!("Loaded settings");
        settings
    }

    /// Save settings
    pub fn save(&self, store: &mut PersistenceStore) {
        store.set(SETTINGS_KEY, self);
        log::info!("Settings saved");
    }
}
