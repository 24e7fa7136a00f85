use std::time::Duration;

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use super::config::{SimulationConfig, grid_size};
use crate::domain::{CycleDetector, DetectorAction, Grid, Pattern, RuleSet};

/// The display side of a run: reports its size, shows frames, and relays
/// the stop signal. Implemented by the terminal renderer and by test doubles.
pub trait Frontend {
    /// Current `(columns, rows)` of the display surface
    fn surface_size(&mut self) -> Result<(u16, u16)>;

    /// Show one generation; rows are visited top to bottom
    fn render(&mut self, grid: &Grid, report: &TickReport) -> Result<()>;

    /// Wait up to `timeout` for a stop request. A timeout means keep going.
    fn poll_stop(&mut self, timeout: Duration) -> Result<bool>;
}

/// How the grid is populated before the first tick
#[derive(Clone, Debug)]
pub enum StartState {
    /// Each cell alive with the configured density
    Random,
    /// `(col, row)` coordinates of live cells; out-of-range ones are dropped
    Alive(Vec<(i64, i64)>),
    /// A preset centred on the grid
    Pattern(Pattern),
    /// An explicit grid, cropped or padded to the surface
    Grid(Grid),
}

/// What happened during one tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    /// 1-based tick number
    pub tick: u64,
    pub population: usize,
    pub resized: bool,
    pub reset: bool,
    /// Stall matches left before the next reset
    pub countdown: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    MaxTicks,
    Stopped,
}

/// Totals for a finished run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub resets: u64,
    pub resizes: u64,
    pub reason: StopReason,
}

/// SimulationLoop orchestrates one run.
/// It owns the grid, rule, and stall detector exclusively; the frontend only
/// ever sees the grid by shared reference.
pub struct SimulationLoop {
    config: SimulationConfig,
    rules: RuleSet,
    grid: Grid,
    detector: CycleDetector,
    rng: StdRng,
    surface: (u16, u16),
    ticks: u64,
    resets: u64,
    resizes: u64,
}

impl SimulationLoop {
    /// Build the initial grid for a surface of `(columns, rows)`
    pub fn new(config: SimulationConfig, rules: RuleSet, start: StartState, surface: (u16, u16)) -> Self {
        let mut rng = config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let (width, height) = grid_size(surface);

        let grid = match start {
            StartState::Random => Grid::random(width, height, config.density, &mut rng),
            StartState::Alive(coords) => Grid::from_alive(width, height, coords),
            StartState::Pattern(pattern) => {
                let mut grid = Grid::new(width, height);
                pattern.place_centered(&mut grid);
                grid
            }
            StartState::Grid(grid) => grid.resize(width, height),
        };

        Self {
            config,
            rules,
            grid,
            detector: CycleDetector::new(),
            rng,
            surface,
            ticks: 0,
            resets: 0,
            resizes: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn detector(&self) -> &CycleDetector {
        &self.detector
    }

    /// Ticks completed so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one tick: follow the surface size, step, check for a stall,
    /// then hand the new generation to the frontend.
    pub fn tick<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> Result<TickReport> {
        let resized = self.follow_surface(frontend.surface_size()?);

        self.grid = if self.config.parallel {
            self.grid.step_parallel(&self.rules)
        } else {
            self.grid.step(&self.rules)
        };

        let reset = match self.detector.observe(&self.grid) {
            DetectorAction::Continue => false,
            DetectorAction::ResetNow => {
                self.grid.randomize_with(&mut self.rng, self.config.density);
                self.resets += 1;
                info!(tick = self.ticks + 1, resets = self.resets, "stalled in a short cycle, reseeding");
                true
            }
        };

        self.ticks += 1;
        let report = TickReport {
            tick: self.ticks,
            population: self.grid.population(),
            resized,
            reset,
            countdown: self.detector.countdown(),
        };
        frontend.render(&self.grid, &report)?;
        Ok(report)
    }

    /// Tick until the tick limit or a stop signal. The stop signal is only
    /// checked between ticks.
    pub fn run<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> Result<RunSummary> {
        let (width, height) = self.grid.dimensions();
        info!(
            rule = %self.rules,
            width,
            height,
            population = self.grid.population(),
            max_ticks = self.config.max_ticks,
            parallel = self.config.parallel,
            "starting simulation"
        );

        let reason = loop {
            if self.ticks >= self.config.max_ticks {
                break StopReason::MaxTicks;
            }
            self.tick(frontend)?;
            if frontend.poll_stop(self.config.tick_timeout)? {
                break StopReason::Stopped;
            }
        };

        let summary = RunSummary {
            ticks: self.ticks,
            resets: self.resets,
            resizes: self.resizes,
            reason,
        };
        info!(?summary, "simulation finished");
        Ok(summary)
    }

    /// Resize the grid if the surface changed since the last tick
    fn follow_surface(&mut self, surface: (u16, u16)) -> bool {
        if surface == self.surface {
            return false;
        }

        let (width, height) = grid_size(surface);
        debug!(
            from = ?self.grid.dimensions(),
            to = ?(width, height),
            "surface resized"
        );
        self.grid = self.grid.resize(width, height);
        self.surface = surface;
        self.resizes += 1;
        true
    }
}
