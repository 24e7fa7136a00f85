// Domain layer - Core simulation logic
pub mod domain;

// Application layer - Run orchestration and configuration
pub mod application;

// Infrastructure layer - Terminal, rendering, input
pub mod ui;
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use domain::{Cell, CycleDetector, DetectorAction, Error, Grid, Pattern, RuleSet, presets};
pub use application::{Frontend, RunSummary, SimulationConfig, SimulationLoop, StartState, StopReason, TickReport};
