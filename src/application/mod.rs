mod config;
mod simulation;

pub use config::{DEFAULT_MAX_TICKS, SimulationConfig, grid_size};
pub use simulation::{Frontend, RunSummary, SimulationLoop, StartState, StopReason, TickReport};
