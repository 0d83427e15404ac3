//! Paced simulation step
//!
//! The host may call [`step`] every display frame; the snake only moves once
//! the current speed interval has elapsed.

use std::collections::VecDeque;

use glam::IVec2;

use super::state::{Direction, Food, GameState, Position, wrap};
use crate::consts::GRID_SIZE;
use crate::platform::RandomSource;

/// Result of a single [`step`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Interval not yet elapsed (or session over); nothing changed
    Waiting,
    /// Moved one cell
    Continue,
    /// Moved onto the food and grew
    AteFood,
    /// Ran into itself; the session is now over
    Collided,
}

/// Advance the snake one cell in `direction` if its interval has elapsed.
///
/// `direction` must already be filtered against reversals.
pub fn step(
    state: &mut GameState,
    direction: Direction,
    now: u64,
    rng: &mut dyn RandomSource,
) -> StepOutcome {
    if state.is_over || now.saturating_sub(state.last_move_ms) < state.speed_ms {
        return StepOutcome::Waiting;
    }
    state.last_move_ms = now;
    state.direction = direction;

    let head = wrap(state.head() + direction.delta());

    // Checked before the tail moves: the tail cell still counts as body
    if state.snake.iter().skip(1).any(|&segment| segment == head) {
        state.is_over = true;
        state.death_time_ms = Some(now);
        log::debug!("Collision at ({}, {}) with score {}", head.x, head.y, state.score);
        return StepOutcome::Collided;
    }

    state.snake.push_front(head);

    if state.food.is_some_and(|food| food.position == head) {
        state.score += 1;
        state.speed_ms = state.tuning.speed_for_score(state.score);
        let size = random_food_size(state.tuning.min_food_size, rng);
        state.food = place_food(&state.snake, size, rng);
        log::debug!("Ate food: score {}, speed {}ms", state.score, state.speed_ms);
        StepOutcome::AteFood
    } else {
        state.snake.pop_back();
        StepOutcome::Continue
    }
}

/// Uniform size in `[min_size, 1]`
pub fn random_food_size(min_size: f32, rng: &mut dyn RandomSource) -> f32 {
    min_size + rng.uniform() as f32 * (1.0 - min_size)
}

/// Pick a uniformly random free cell for the food.
///
/// Returns None when the snake covers the whole grid.
pub fn place_food(
    snake: &VecDeque<Position>,
    size_fraction: f32,
    rng: &mut dyn RandomSource,
) -> Option<Food> {
    let free: Vec<Position> = (0..GRID_SIZE)
        .flat_map(|y| (0..GRID_SIZE).map(move |x| IVec2::new(x, y)))
        .filter(|cell| !snake.contains(cell))
        .collect();
    if free.is_empty() {
        return None;
    }

    let index = ((rng.uniform() * free.len() as f64) as usize).min(free.len() - 1);
    Some(Food {
        position: free[index],
        size_fraction,
    })
}
