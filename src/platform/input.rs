//! Keyboard input normalization

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Space,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value (arrows or WASD)
    pub fn from_dom(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "arrowup" | "w" => Some(Key::Up),
            "arrowdown" | "s" => Some(Key::Down),
            "arrowleft" | "a" => Some(Key::Left),
            "arrowright" | "d" => Some(Key::Right),
            "enter" => Some(Key::Enter),
            " " | "space" | "spacebar" => Some(Key::Space),
            _ => None,
        }
    }
}
