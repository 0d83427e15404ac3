//! Rendering contract
//!
//! The game never draws. Hosts pull a list of colored cells each frame and
//! paint them however they like (canvas 2D, GPU instances, terminal).

pub mod cells;

pub use cells::{CellInstance, colors, death_flash_alpha, draw_list};
