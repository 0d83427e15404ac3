//! Arcade-style three-letter name entry

use crate::consts::NAME_LENGTH;

const ALPHABET_LEN: u8 = 26;

/// Inputs understood while entering a name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameInput {
    /// Next letter in the active slot
    Increment,
    /// Previous letter in the active slot
    Decrement,
    /// Move the cursor one slot left
    Left,
    /// Move the cursor one slot right
    Right,
    Confirm,
}

/// Letter slots plus cursor. Emits the name exactly once on confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    /// Letter offsets from 'A'
    letters: [u8; NAME_LENGTH],
    cursor: usize,
    submitted: bool,
}

impl Default for NameEntry {
    fn default() -> Self {
        Self::new()
    }
}

impl NameEntry {
    pub fn new() -> Self {
        Self {
            letters: [0; NAME_LENGTH],
            cursor: 0,
            submitted: false,
        }
    }

    /// Apply one input. Returns the name on the first confirm only.
    pub fn handle(&mut self, input: NameInput) -> Option<String> {
        if self.submitted {
            return None;
        }
        match input {
            NameInput::Increment => {
                let slot = &mut self.letters[self.cursor];
                *slot = (*slot + 1) % ALPHABET_LEN;
            }
            NameInput::Decrement => {
                let slot = &mut self.letters[self.cursor];
                *slot = (*slot + ALPHABET_LEN - 1) % ALPHABET_LEN;
            }
            NameInput::Left => self.cursor = (self.cursor + NAME_LENGTH - 1) % NAME_LENGTH,
            NameInput::Right => self.cursor = (self.cursor + 1) % NAME_LENGTH,
            NameInput::Confirm => {
                self.submitted = true;
                return Some(self.name());
            }
        }
        None
    }

    /// Current letters
    pub fn name(&self) -> String {
        self.letters.iter().map(|&l| (b'A' + l) as char).collect()
    }

    /// Active slot (0-based)
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }
}
