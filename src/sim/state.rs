//! Game state and core simulation types

use std::collections::VecDeque;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::tick::place_food;
use crate::consts::*;
use crate::platform::RandomSource;
use crate::tuning::Tuning;

/// A grid cell, `0 <= x, y < GRID_SIZE`
pub type Position = IVec2;

/// Heading of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// One-cell offset (screen coordinates, y grows downward)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Wrap a position onto the toroidal grid
#[inline]
pub fn wrap(pos: IVec2) -> IVec2 {
    IVec2::new(pos.x.rem_euclid(GRID_SIZE), pos.y.rem_euclid(GRID_SIZE))
}

/// Food pellet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub position: Position,
    /// Drawn size as a fraction of a cell, in `[min_food_size, 1]`
    pub size_fraction: f32,
}

/// Complete state of one play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Body segments, head first
    pub snake: VecDeque<Position>,
    /// Direction of the last move
    pub direction: Direction,
    /// None only when the snake fills the whole grid
    pub food: Option<Food>,
    pub score: u32,
    /// Current inter-tick delay (ms)
    pub speed_ms: u64,
    /// Time of the last committed move (ms)
    pub last_move_ms: u64,
    pub is_over: bool,
    pub death_time_ms: Option<u64>,
    pub tuning: Tuning,
}

impl GameState {
    /// Fresh session: one segment at the start cell heading right
    pub fn new(tuning: Tuning, rng: &mut dyn RandomSource) -> Self {
        let snake = VecDeque::from([IVec2::new(START_X, START_Y)]);
        let food = place_food(&snake, 1.0, rng);
        Self {
            snake,
            direction: Direction::Right,
            food,
            score: 0,
            speed_ms: tuning.initial_speed_ms,
            last_move_ms: 0,
            is_over: false,
            death_time_ms: None,
            tuning,
        }
    }

    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.snake.contains(&pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::SeededRandom;

    #[test]
    fn test_new_state() {
        let mut rng = SeededRandom::new(1);
        let state = GameState::new(Tuning::default(), &mut rng);
        assert_eq!(state.snake, VecDeque::from([IVec2::new(10, 10)]));
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed_ms, INITIAL_SPEED);
        assert!(!state.is_over);

        let food = state.food.unwrap();
        assert!(!state.occupies(food.position));
        assert_eq!(food.size_fraction, 1.0);
    }

    #[test]
    fn test_opposites() {
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.delta() + dir.opposite().delta(), IVec2::ZERO);
        }
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap(IVec2::new(-1, 0)), IVec2::new(GRID_SIZE - 1, 0));
        assert_eq!(wrap(IVec2::new(GRID_SIZE, GRID_SIZE)), IVec2::ZERO);
        assert_eq!(wrap(IVec2::new(5, 7)), IVec2::new(5, 7));
    }
}
