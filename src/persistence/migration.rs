//! One-time import of the plaintext cookie high score

use super::store::PersistenceStore;
use super::HIGH_SCORE_KEY;
use crate::platform::KeyValueStore;

/// Cookie name used by the old plaintext high score
pub const LEGACY_HIGH_SCORE_KEY: &str = "snakeHighScore";

/// What a migration run did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// No legacy record present
    NothingToMigrate,
    /// Legacy value imported (the stored score after the merge)
    Migrated { score: u64 },
    /// Legacy record was unreadable and has been dropped
    Discarded,
}

/// Leading decimal digits of a legacy cookie value (`"42abc"` -> 42)
pub fn parse_legacy_score(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..digits_end].parse().ok()
}

/// Move the legacy plaintext high score into the obfuscated store.
///
/// The legacy entry is deleted afterwards, so a second run is a no-op. If
/// both formats hold a score the larger one wins.
pub fn migrate_legacy_high_score(
    legacy: &mut dyn KeyValueStore,
    store: &mut PersistenceStore,
) -> MigrationOutcome {
    let Some(raw) = legacy.get(LEGACY_HIGH_SCORE_KEY) else {
        return MigrationOutcome::NothingToMigrate;
    };

    let outcome = match parse_legacy_score(&raw) {
        Some(legacy_score) => {
            let current: u64 = store.get(HIGH_SCORE_KEY, 0);
            let score = current.max(legacy_score);
            store.set(HIGH_SCORE_KEY, &score);
            log::info!("Migrated legacy high score {legacy_score} (stored {score})");
            MigrationOutcome::Migrated { score }
        }
        None => {
            log::warn!("Dropping unreadable legacy high score {raw:?}");
            MigrationOutcome::Discarded
        }
    };

    if let Err(err) = legacy.remove(LEGACY_HIGH_SCORE_KEY) {
        log::warn!("Failed to delete legacy high score: {err}");
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{CookieJar, MemoryStorage};

    #[test]
    fn test_parse_legacy_score() {
        assert_eq!(parse_legacy_score("42"), Some(42));
        assert_eq!(parse_legacy_score(" 17 "), Some(17));
        assert_eq!(parse_legacy_score("9;path=/"), Some(9));
        assert_eq!(parse_legacy_score("NaN"), None);
        assert_eq!(parse_legacy_score("-3"), None);
        assert_eq!(parse_legacy_score(""), None);
    }

    #[test]
    fn test_migrates_and_deletes_legacy() {
        let mut legacy = CookieJar::from_header("snakeHighScore=42");
        let backend = MemoryStorage::new();
        let mut store = PersistenceStore::new(backend.clone());

        let outcome = migrate_legacy_high_score(&mut legacy, &mut store);
        assert_eq!(outcome, MigrationOutcome::Migrated { score: 42 });
        assert_eq!(store.get(HIGH_SCORE_KEY, 0u64), 42);
        assert_eq!(legacy.get(LEGACY_HIGH_SCORE_KEY), None);
        assert!(backend.contains_key(HIGH_SCORE_KEY));

        // Second run finds nothing and leaves the store alone
        let again = migrate_legacy_high_score(&mut legacy, &mut store);
        assert_eq!(again, MigrationOutcome::NothingToMigrate);
        assert_eq!(store.get(HIGH_SCORE_KEY, 0u64), 42);
    }

    #[test]
    fn test_keeps_larger_existing_score() {
        let mut legacy = CookieJar::from_header("snakeHighScore=5");
        let mut store = PersistenceStore::new(MemoryStorage::new());
        store.set(HIGH_SCORE_KEY, &12u64);

        let outcome = migrate_legacy_high_score(&mut legacy, &mut store);
        assert_eq!(outcome, MigrationOutcome::Migrated { score: 12 });
        assert_eq!(store.get(HIGH_SCORE_KEY, 0u64), 12);
    }

    #[test]
    fn test_unreadable_legacy_is_dropped() {
        let mut legacy = CookieJar::from_header("theme=dark; snakeHighScore=oops");
        let backend = MemoryStorage::new();
        let mut store = PersistenceStore::new(backend.clone());

        let outcome = migrate_legacy_high_score(&mut legacy, &mut store);
        assert_eq!(outcome, MigrationOutcome::Discarded);
        assert!(backend.is_empty());
        assert_eq!(legacy.header(), "theme=dark");
    }
}
