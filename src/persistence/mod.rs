//! Save/load persistence with light obfuscation
//!
//! Features:
//! - Reversible XOR/hex codec so scores aren't plaintext in devtools
//! - Typed records that fall back to defaults on corruption
//! - One-time migration of the old plaintext cookie high score

pub mod codec;
pub mod migration;
pub mod store;

pub use codec::{Codec, CodecError, XorHexCodec};
pub use migration::{LEGACY_HIGH_SCORE_KEY, MigrationOutcome, migrate_legacy_high_score};
pub use store::PersistenceStore;

use crate::platform::{CookieJar, KeyValueStore, MemoryStorage};

/// Obfuscated high score record
pub const HIGH_SCORE_KEY: &str = "snake_high_score";
/// Obfuscated leaderboard record
pub const LEADERBOARD_KEY: &str = "snake_leaderboard";
/// Obfuscated settings record
pub const SETTINGS_KEY: &str = "snake_settings";

/// The game's records plus the legacy substrate they migrate from.
///
/// The legacy import runs lazily before the first high score read.
pub struct GameStorage {
    store: PersistenceStore,
    legacy: Box<dyn KeyValueStore>,
    migrated: bool,
}

impl GameStorage {
    pub fn new(
        backend: impl KeyValueStore + 'static,
        legacy: impl KeyValueStore + 'static,
    ) -> Self {
        Self {
            store: PersistenceStore::new(backend),
            legacy: Box::new(legacy),
            migrated: false,
        }
    }

    /// Volatile storage (native builds, tests)
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new(), CookieJar::new())
    }

    /// Run the legacy import (a no-op after the first call in a session)
    pub fn migrate(&mut self) -> MigrationOutcome {
        if self.migrated {
            return MigrationOutcome::NothingToMigrate;
        }
        self.migrated = true;
        migrate_legacy_high_score(self.legacy.as_mut(), &mut self.store)
    }

    /// Stored high score (0 if absent or unreadable)
    pub fn high_score(&mut self) -> u64 {
        self.migrate();
        self.store.get(HIGH_SCORE_KEY, 0)
    }

    pub fn set_high_score(&mut self, score: u64) {
        self.migrate();
        self.store.set(HIGH_SCORE_KEY, &score);
        log::info!("High score saved ({score})");
    }

    pub fn store(&self) -> &PersistenceStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PersistenceStore {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_score_defaults_to_zero() {
        let mut storage = GameStorage::in_memory();
        assert_eq!(storage.high_score(), 0);
    }

    #[test]
    fn test_high_score_runs_legacy_migration_first() {
        let backend = MemoryStorage::new();
        let legacy = CookieJar::from_header("snakeHighScore=42");
        let mut storage = GameStorage::new(backend.clone(), legacy.clone());

        assert_eq!(storage.high_score(), 42);
        assert_eq!(legacy.get(LEGACY_HIGH_SCORE_KEY), None);

        // The new record decodes to 42 on its own
        let reread = PersistenceStore::new(backend.clone());
        assert_eq!(reread.get(HIGH_SCORE_KEY, 0u64), 42);
        assert_eq!(
            reread.get_value(HIGH_SCORE_KEY, serde_json::Value::Null),
            serde_json::json!(42)
        );

        // Later calls are no-ops
        assert_eq!(storage.migrate(), MigrationOutcome::NothingToMigrate);
        let mut fresh = GameStorage::new(backend, legacy);
        assert_eq!(fresh.migrate(), MigrationOutcome::NothingToMigrate);
        assert_eq!(fresh.high_score(), 42);
    }

    #[test]
    fn test_set_high_score_roundtrip() {
        let backend = MemoryStorage::new();
        let mut storage = GameStorage::new(backend.clone(), CookieJar::new());
        storage.set_high_score(9);

        let mut reopened = GameStorage::new(backend, CookieJar::new());
        assert_eq!(reopened.high_score(), 9);
    }
}
