//! Keyboard to cell bindings
//!
//! Three keyboard rows, each one chromatic octave of twelve cells, laid out
//! like a tracker's note keys:
//!
//! ```text
//! q w e r t y u i o p [ ]    cells 24..=35
//! a s d f g h j k l ; ' 1    cells 12..=23
//! z x c v b n m , . / \ `    cells  0..=11
//! ```

use rustc_hash::FxHashMap;

use crate::error::{PlatformError, Result};
use crate::input::Key;

/// Key rows, lowest cells first
pub const STANDARD_ROWS: [[char; 12]; 3] = [
    ['z', 'x', 'c', 'v', 'b', 'n', 'm', ',', '.', '/', '\\', '`'],
    ['a', 's', 'd', 'f', 'g', 'h', 'j', 'k', 'l', ';', '\'', '1'],
    ['q', 'w', 'e', 'r', 't', 'y', 'u', 'i', 'o', 'p', '[', ']'],
];

/// Maps printable keys to cells
#[derive(Clone, Debug)]
pub struct KeyMap {
    by_key: FxHashMap<char, usize>,
    by_cell: Vec<char>,
}

impl KeyMap {
    /// The 36-key tracker layout
    pub fn standard() -> Self {
        Self::from_rows(&STANDARD_ROWS)
    }

    /// Build from rows of keys; cells are numbered row by row
    pub fn from_rows<const N: usize>(rows: &[[char; N]]) -> Self {
        let by_cell: Vec<char> = rows.iter().flatten().copied().collect();
        let by_key = by_cell
            .iter()
            .enumerate()
            .map(|(cell, &c)| (c, cell))
            .collect();
        Self { by_key, by_cell }
    }

    pub fn cell_count(&self) -> usize {
        self.by_cell.len()
    }

    /// Cell bound to a key, case-insensitive
    pub fn cell_for_key(&self, key: &Key) -> Option<usize> {
        key.to_char().and_then(|c| self.cell_for_char(c))
    }

    pub fn cell_for_char(&self, c: char) -> Option<usize> {
        self.by_key.get(&c.to_ascii_lowercase()).copied()
    }

    pub fn key_for_cell(&self, cell: usize) -> Option<char> {
        self.by_cell.get(cell).copied()
    }

    /// Keys in rows of `width`, top row first, as they sit on a keyboard
    pub fn rows_top_down(&self, width: usize) -> Vec<&[char]> {
        let mut rows: Vec<&[char]> = self.by_cell.chunks(width.max(1)).collect();
        rows.reverse();
        rows
    }

    /// Resolve a scripted key sequence to cells. Whitespace is skipped.
    pub fn parse_script(&self, script: &str) -> Result<Vec<usize>> {
        script
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| self.cell_for_char(c).ok_or(PlatformError::UnboundKey(c)))
            .collect()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::standard()
    }
}
