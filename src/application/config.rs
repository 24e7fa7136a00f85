use std::time::Duration;

use crate::ui::RESERVED_ROWS;

/// Default tick limit
pub const DEFAULT_MAX_TICKS: u64 = 1_000_000;

/// Runtime settings for one simulation run
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Probability a cell is alive after a random fill or stall reset
    pub density: f64,
    /// Stop after this many ticks
    pub max_ticks: u64,
    /// How long each tick waits for a stop signal
    pub tick_timeout: Duration,
    /// Step rows in parallel with rayon
    pub parallel: bool,
    /// Seed for fills and resets; `None` draws from the OS
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            density: 0.5,
            max_ticks: DEFAULT_MAX_TICKS,
            tick_timeout: Duration::from_millis(500),
            parallel: false,
            seed: None,
        }
    }
}

/// Grid `(width, height)` for a surface of `(columns, rows)`.
/// Surfaces shorter than the reserved rows give a zero-height grid.
pub const fn grid_size(surface: (u16, u16)) -> (usize, usize) {
    let (columns, rows) = surface;
    (columns as usize, rows.saturating_sub(RESERVED_ROWS) as usize)
}
