//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time
//! - Input events
//! - Randomness
//! - Storage (LocalStorage and cookies on web, in-memory natively)

pub mod input;
pub mod random;
pub mod storage;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::Key;
pub use random::{RandomSource, SeededRandom, SequenceRandom};
pub use storage::{CookieJar, KeyValueStore, MemoryStorage, StorageError};

/// Wall-clock time in epoch milliseconds
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// Wall-clock time in epoch milliseconds
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
