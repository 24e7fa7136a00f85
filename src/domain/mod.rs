mod cell;
mod cycle;
mod error;
mod grid;
mod patterns;
mod rules;

pub use cell::Cell;
pub use cycle::{CycleDetector, DetectorAction, STALL_BUDGET};
pub use error::Error;
pub use grid::Grid;
pub use patterns::{Pattern, presets};
pub use rules::{RuleSet, all_rules};
