//! Layout contract shared by the renderer and the simulation sizing.

use crossterm::style::Color;

/// Rows below the grid kept for the status line and stop prompt
pub const RESERVED_ROWS: u16 = 3;

pub const ALIVE_GLYPH: char = 'O';
pub const DEAD_GLYPH: char = ' ';

pub const STOP_PROMPT: &str = "Press any key to stop";

/// Foreground colours cycled through in rave mode
pub const RAVE_PALETTE: [Color; 8] = [
    Color::Reset,
    Color::Black,
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
];

/// Colour for the given tick; always the default colour unless raving
pub fn frame_color(tick: u64, rave: bool) -> Color {
    if rave {
        RAVE_PALETTE[(tick % RAVE_PALETTE.len() as u64) as usize]
    } else {
        Color::Reset
    }
}
