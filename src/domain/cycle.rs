//! Stall detection for simulations stuck in a 1- or 2-step cycle.

use super::Grid;

/// Matches allowed before the detector asks for a reset
pub const STALL_BUDGET: u32 = 20;

/// Observations needed before comparisons start
const WARMUP_GENERATIONS: u64 = 4;

/// What the caller should do after an observation
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DetectorAction {
    Continue,
    /// The grid has stalled; the caller must re-randomize it
    ResetNow,
}

/// Watches successive generations for period-1 or period-2 repetition.
///
/// Keeps owned copies of the two previous generations. Every observation
/// that equals either of them spends one unit of the countdown; the
/// countdown is never refilled by non-matching generations, only when it
/// runs out and a reset is requested.
#[derive(Clone, Debug)]
pub struct CycleDetector {
    previous: Option<Grid>,
    previous2: Option<Grid>,
    countdown: u32,
    observed: u64,
}

impl CycleDetector {
    pub fn new() -> Self {
        Self {
            previous: None,
            previous2: None,
            countdown: STALL_BUDGET,
            observed: 0,
        }
    }

    /// Remaining matches before the next reset
    pub const fn countdown(&self) -> u32 {
        self.countdown
    }

    /// Number of generations observed so far
    pub const fn observed(&self) -> u64 {
        self.observed
    }

    /// Feed the newest generation and rotate the stored snapshots
    pub fn observe(&mut self, current: &Grid) -> DetectorAction {
        let mut action = DetectorAction::Continue;

        if self.observed >= WARMUP_GENERATIONS && self.matches_history(current) {
            self.countdown -= 1;
            if self.countdown == 0 {
                self.countdown = STALL_BUDGET;
                action = DetectorAction::ResetNow;
            }
        }

        self.previous2 = self.previous.replace(current.clone());
        self.observed += 1;
        action
    }

    /// Both snapshots exist, share `current`'s size, and one of them equals it
    fn matches_history(&self, current: &Grid) -> bool {
        let (Some(previous), Some(previous2)) = (&self.previous, &self.previous2) else {
            return false;
        };
        let dims = current.dimensions();
        if previous.dimensions() != dims || previous2.dimensions() != dims {
            return false;
        }
        current == previous || current == previous2
    }
}

impl Default for CycleDetector {
    fn default() -> Self {
        Self::new()
    }
}
