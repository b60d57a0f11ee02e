//! Background cycle and figure colors
//!
//! Every trigger advances the background one step through a fixed
//! sixteen-color loop. Figures take their color from the cell, picking the
//! light or dark variant so they contrast with the new background.

use tessel_core::Color;

/// Background loop, in order
pub const BACKGROUNDS: [u32; 16] = [
    0x000000, 0xFFFBF5, 0x0A1628, 0xFFF8F0, 0x0D0D0D, 0xF8F4EF, 0x1C3A5C, 0xFFFFFF, 0x0A0A0A,
    0xFFFDF8, 0x0A1628, 0xFAF6F1, 0x1A1A1A, 0xFFFFFF, 0x1C3A5C, 0xFFFBF5,
];

/// Backgrounds that take light figures
pub const DARK_BACKGROUNDS: [u32; 6] = [0x000000, 0x0A0A0A, 0x0D0D0D, 0x0A1628, 0x1C3A5C, 0x1A1A1A];

/// Per-cell figure colors on dark backgrounds: whites, champagne, gold
pub const FG_ON_DARK: [u32; 36] = [
    0xFFFFFF, 0xE8DCC8, 0xFFF9F0, 0xD4AF37, 0xF5F0E8, 0xFFFFFF, 0xE8DCC8, 0xFFFBF5, 0xC9A227,
    0xF0EBE3, 0xFFFFFF, 0xD4AF37, 0xE8DCC8, 0xFFF9F0, 0xC9A227, 0xFFFFFF, 0xE8DCC8, 0xD4AF37,
    0xFFFBF5, 0xF0EBE3, 0xC9A227, 0xFFFFFF, 0xE8DCC8, 0xFFF9F0, 0xD4AF37, 0xFFFFFF, 0xC9A227,
    0xE8DCC8, 0xFFFBF5, 0xD4AF37, 0xFFFFFF, 0xE8DCC8, 0xD4AF37, 0xFFF9F0, 0xC9A227, 0xF0EBE3,
];

/// Per-cell figure colors on light backgrounds: navy, burgundy, charcoal
pub const FG_ON_LIGHT: [u32; 36] = [
    0x0A1628, 0x1C3A5C, 0x000000, 0x722F37, 0x1A1A1A, 0x0A1628, 0x8B0000, 0x1C3A5C, 0x2C1810,
    0x000000, 0x722F37, 0x0A1628, 0x1C3A5C, 0x000000, 0x8B0000, 0x1A1A1A, 0x0A1628, 0x722F37,
    0x1C3A5C, 0x2C1810, 0x000000, 0x0A1628, 0x722F37, 0x1C3A5C, 0x8B0000, 0x1A1A1A, 0x0A1628,
    0x000000, 0x1C3A5C, 0x722F37, 0x0A1628, 0x1C3A5C, 0x000000, 0x722F37, 0x8B0000, 0x1A1A1A,
];

pub fn is_dark(background: Color) -> bool {
    DARK_BACKGROUNDS.contains(&background.to_hex())
}

/// Figure color for a cell drawn over `background`. Cells past the table
/// wrap around.
pub fn foreground_for(cell: usize, background: Color) -> Color {
    let table = if is_dark(background) {
        &FG_ON_DARK
    } else {
        &FG_ON_LIGHT
    };
    Color::from_hex(table[cell % table.len()])
}

/// Position in the background loop
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BackgroundCycle {
    index: usize,
}

impl BackgroundCycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Color {
        Color::from_hex(BACKGROUNDS[self.index])
    }

    /// Step to the next background and return it
    pub fn advance(&mut self) -> Color {
        self.index = (self.index + 1) % BACKGROUNDS.len();
        self.current()
    }
}
