//! Pixel Snake - the grid snake easter egg
//!
//! Core modules:
//! - `sim`: Deterministic grid simulation (movement, collisions, food, speed curve)
//! - `persistence`: Obfuscated key-value persistence and legacy migration
//! - `highscores`: Top-5 leaderboard
//! - `name_entry`: Three-letter arcade name capture
//! - `session`: Session controller wiring input, sim, audio and storage
//! - `platform`: Storage, randomness and keyboard abstractions
//! - `renderer`: "Draw these colored cells" contract for the host
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscores;
pub mod name_entry;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::{Leaderboard, LeaderboardEntry};
pub use name_entry::NameEntry;
pub use session::{GameSession, SessionPhase};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Cells per side of the (square, toroidal) grid
    pub const GRID_SIZE: i32 = 20;
    /// Pixel size of one cell (hint for hosts drawing onto a canvas)
    pub const CELL_SIZE: u32 = 20;

    /// Inter-tick delay at score 0 (ms)
    pub const INITIAL_SPEED: u64 = 150;
    /// Delay removed per point scored (ms)
    pub const SPEED_INCREMENT: u64 = 5;
    /// Fastest possible tick (ms)
    pub const MIN_SPEED: u64 = 50;
    /// Minimum food size (fraction of a cell)
    pub const MIN_FOOD_SIZE: f32 = 0.3;

    /// Red flash after death (ms)
    pub const DEATH_FLASH_DURATION: u64 = 500;

    /// Snake spawn cell
    pub const START_X: i32 = 10;
    pub const START_Y: i32 = 10;

    /// Letters in a leaderboard name
    pub const NAME_LENGTH: usize = 3;
}
