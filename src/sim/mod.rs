//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time is passed in, never read
//! - Randomness comes through `RandomSource` only
//! - No rendering, audio or platform dependencies

pub mod state;
pub mod tick;

pub use state::{Direction, Food, GameState, Position, wrap};
pub use tick::{StepOutcome, place_food, random_food_size, step};
