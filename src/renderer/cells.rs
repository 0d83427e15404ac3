//! Cell instances for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::consts::DEATH_FLASH_DURATION;
use crate::sim::GameState;

/// One filled square, in grid units
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CellInstance {
    /// Top-left corner
    pub position: [f32; 2],
    /// Edge length (1.0 = a whole cell)
    pub size: f32,
    pub color: [f32; 4],
}

impl CellInstance {
    pub const fn new(x: f32, y: f32, size: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            size,
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.067, 0.067, 0.067, 1.0];
    pub const SNAKE: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const FOOD: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const DEATH_FLASH: [f32; 3] = [1.0, 0.0, 0.0];
}

/// Snake segments (head first) followed by the food, shrunk and centered
pub fn draw_list(state: &GameState) -> Vec<CellInstance> {
    let mut cells = Vec::with_capacity(state.snake.len() + 1);
    for segment in &state.snake {
        cells.push(CellInstance::new(
            segment.x as f32,
            segment.y as f32,
            1.0,
            colors::SNAKE,
        ));
    }
    if let Some(food) = state.food {
        let size = food.size_fraction;
        let offset = (1.0 - size) / 2.0;
        cells.push(CellInstance::new(
            food.position.x as f32 + offset,
            food.position.y as f32 + offset,
            size,
            colors::FOOD,
        ));
    }
    cells
}

/// Opacity of the red overlay right after death
pub fn death_flash_alpha(state: &GameState, now: u64, reduced_motion: bool) -> f32 {
    if reduced_motion {
        return 0.0;
    }
    let Some(died_at) = state.death_time_ms else {
        return 0.0;
    };
    let elapsed = now.saturating_sub(died_at);
    if elapsed >= DEATH_FLASH_DURATION {
        return 0.0;
    }
    0.5 * (1.0 - elapsed as f32 / DEATH_FLASH_DURATION as f32)
}
