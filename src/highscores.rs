//! High score leaderboard system
//!
//! Persisted (obfuscated) to LocalStorage, tracks the top 5 scores.

use serde::{Deserialize, Serialize};

use crate::consts::NAME_LENGTH;
use crate::persistence::{LEADERBOARD_KEY, PersistenceStore};

/// Maximum number of leaderboard entries to keep
pub const MAX_LEADERBOARD_ENTRIES: usize = 5;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Three capital letters
    pub name: String,
    /// Food eaten
    pub score: u64,
    /// Unix timestamp (ms) when achieved
    pub date: u64,
}

/// Score-sorted leaderboard, best first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

/// Names are exactly three capital letters
fn is_valid_name(name: &str) -> bool {
    name.len() == NAME_LENGTH && name.bytes().all(|b| b.is_ascii_uppercase())
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// A full board only takes a strictly better score than last place.
    /// Zero never places.
    pub fn qualifies(&self, score: u64) -> bool {
        score > 0
            && (self.entries.len() < MAX_LEADERBOARD_ENTRIES
                || self.entries.last().is_some_and(|last| score > last.score))
    }

    /// 1-based place `score` would take if recorded now
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        self.qualifies(score)
            .then(|| 1 + self.entries.iter().take_while(|e| e.score >= score).count())
    }

    /// Append an entry, re-sort and trim.
    ///
    /// The sort is stable, so equal scores keep insertion order.
    /// Returns the rank achieved (1-indexed) or None if it fell off the end.
    pub fn insert(&mut self, score: u64, name: &str, timestamp: u64) -> Option<usize> {
        self.entries.push(LeaderboardEntry {
            name: name.to_string(),
            score,
            date: timestamp,
        });
        let new_index = self.entries.len() - 1;

        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by(|&a, &b| self.entries[b].score.cmp(&self.entries[a].score));
        let rank = order.iter().position(|&i| i == new_index);

        self.normalize();
        rank.filter(|&r| r < MAX_LEADERBOARD_ENTRIES).map(|r| r + 1)
    }

    /// Insert and immediately persist
    pub fn record(
        &mut self,
        store: &mut PersistenceStore,
        score: u64,
        name: &str,
        timestamp: u64,
    ) -> Option<usize> {
        let rank = self.insert(score, name, timestamp);
        self.save(store);
        rank
    }

    /// Restore the sorted, bounded invariant
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_LEADERBOARD_ENTRIES);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Best score on the board
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn scores(&self) -> Vec<u64> {
        self.entries.iter().map(|e| e.score).collect()
    }

    /// Load the leaderboard (empty if absent or unreadable).
    ///
    /// Entries with a malformed name are dropped.
    pub fn load(store: &PersistenceStore) -> Self {
        let mut board: Leaderboard = store.get(LEADERBOARD_KEY, Leaderboard::new());
        let stored = board.entries.len();
        board.entries.retain(|e| is_valid_name(&e.name));
        if board.entries.len() < stored {
            log::warn!(
                "Dropped {} leaderboard entries with invalid names",
                stored - board.entries.len()
            );
        }
        board.normalize();
        log::info!("Loaded {} leaderboard entries", board.entries.len());
        board
    }

    /// Persist the leaderboard
    pub fn save(&self, store: &mut PersistenceStore) {
        store.set(LEADERBOARD_KEY, self);
        log::info!("Leaderboard saved ({} entries)", self.entries.len());
    }
}

/// Format a timestamp as a relative date string
pub fn format_date(timestamp: u64, now: u64) -> String {
    let diff_mins = now.saturating_sub(timestamp) / 60_000;
    let diff_hours = diff_mins / 60;
    let diff_days = diff_hours / 24;

    if diff_days >= 1 {
        if diff_days == 1 {
            "Yesterday".to_string()
        } else if diff_days < 7 {
            format!("{} days ago", diff_days)
        } else if diff_days < 14 {
            "1 week ago".to_string()
        } else {
            format!("{} weeks ago", diff_days / 7)
        }
    } else if diff_hours >= 1 {
        if diff_hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", diff_hours)
        }
    } else if diff_mins >= 1 {
        if diff_mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{} mins ago", diff_mins)
        }
    } else {
        "Just now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStorage;

    #[test]
    fn test_insert_sorts_truncates_and_keeps_tie_order() {
        let backend = MemoryStorage::new();
        let mut store = PersistenceStore::new(backend.clone());
        let mut board = Leaderboard::load(&store);

        let names = ["AAA", "BBB", "CCC", "DDD", "EEE", "FFF"];
        for (i, score) in [10, 50, 30, 50, 5, 100].into_iter().enumerate() {
            board.record(&mut store, score, names[i], i as u64);
        }

        let stored = Leaderboard::load(&PersistenceStore::new(backend));
        assert_eq!(stored.len(), 5);
        assert_eq!(stored.scores(), vec![100, 50, 50, 30, 10]);
        assert_eq!(stored.entries[1].name, "BBB");
        assert_eq!(stored.entries[2].name, "DDD");
        assert_eq!(stored, board);
    }

    #[test]
    fn test_insert_returns_rank() {
        let mut board = Leaderboard::new();
        assert_eq!(board.insert(10, "AAA", 0), Some(1));
        assert_eq!(board.insert(20, "BBB", 1), Some(1));
        // Ties rank behind the existing entry
        assert_eq!(board.insert(10, "CCC", 2), Some(3));
        assert_eq!(board.insert(1, "DDD", 3), Some(4));
        assert_eq!(board.insert(1, "EEE", 4), Some(5));
        // Board full and tie with last: falls off
        assert_eq!(board.insert(1, "FFF", 5), None);
        assert_eq!(board.len(), 5);
        assert!(board.entries.iter().all(|e| e.name != "FFF"));
    }

    #[test]
    fn test_qualifies_and_potential_rank() {
        let mut board = Leaderboard::new();
        assert!(!board.qualifies(0));
        assert!(board.qualifies(1));
        for score in [50, 40, 30, 20, 10] {
            board.insert(score, "AAA", 0);
        }
        assert!(!board.qualifies(10));
        assert!(board.qualifies(11));
        assert_eq!(board.potential_rank(45), Some(2));
        // Ties place behind the existing entry
        assert_eq!(board.potential_rank(40), Some(3));
        assert_eq!(board.potential_rank(99), Some(1));
        assert_eq!(board.potential_rank(5), None);
        assert_eq!(board.top_score(), Some(50));
    }

    #[test]
    fn test_serialized_as_plain_array() {
        let mut board = Leaderboard::new();
        board.insert(3, "ABC", 1_700_000_000_000);
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "name": "ABC", "score": 3, "date": 1_700_000_000_000u64 }])
        );
    }

    #[test]
    fn test_load_normalizes_tampered_data() {
        let mut store = PersistenceStore::new(MemoryStorage::new());
        let unsorted: Vec<_> = (1..=7u64)
            .map(|s| LeaderboardEntry {
                name: "ZZZ".into(),
                score: s,
                date: 0,
            })
            .collect();
        store.set(LEADERBOARD_KEY, &unsorted);
        let board = Leaderboard::load(&store);
        assert_eq!(board.scores(), vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn test_load_drops_malformed_names() {
        let mut store = PersistenceStore::new(MemoryStorage::new());
        store.set_value(
            LEADERBOARD_KEY,
            &serde_json::json!([
                { "name": "ABC", "score": 9, "date": 0 },
                { "name": "abc", "score": 8, "date": 0 },
                { "name": "ABCD", "score": 7, "date": 0 },
                { "name": "<b>", "score": 6, "date": 0 },
                { "name": "", "score": 5, "date": 0 },
                { "name": "ÄBC", "score": 4, "date": 0 },
                { "name": "XYZ", "score": 3, "date": 0 }
            ]),
        );
        let board = Leaderboard::load(&store);
        assert_eq!(board.scores(), vec![9, 3]);
        assert!(board.entries.iter().all(|e| is_valid_name(&e.name)));
    }

    #[test]
    fn test_load_corrupt_is_empty() {
        let mut backend = MemoryStorage::new();
        use crate::platform::KeyValueStore;
        backend.set(LEADERBOARD_KEY, "abc").unwrap();
        let board = Leaderboard::load(&PersistenceStore::new(backend));
        assert!(board.is_empty());
    }

    #[test]
    fn test_format_date() {
        let now = 10 * 24 * 3_600_000;
        assert_eq!(format_date(now, now), "Just now");
        assert_eq!(format_date(now - 60_000, now), "1 min ago");
        assert_eq!(format_date(now - 5 * 60_000, now), "5 mins ago");
        assert_eq!(format_date(now - 3_600_000, now), "1 hour ago");
        assert_eq!(format_date(now - 24 * 3_600_000, now), "Yesterday");
        assert_eq!(format_date(now - 3 * 24 * 3_600_000, now), "3 days ago");
        assert_eq!(format_date(0, now), "1 week ago");
        assert_eq!(format_date(0, 3 * now), "4 weeks ago");
    }
}
