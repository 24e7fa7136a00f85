use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use terminal_life::{
    RuleSet, SimulationConfig, SimulationLoop, StartState,
    application::DEFAULT_MAX_TICKS,
    domain::all_rules,
    input::start_file,
    presets,
    rendering::TerminalFrontend,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "terminal-life",
    version,
    about = "Runs a Game of Life simulation as a terminal screensaver"
)]
struct Cli {
    /// Birth/survival rule in B<digits>/S<digits> notation.
    #[arg(long, default_value = "B3/S23")]
    rule: RuleSet,

    /// Start-position file: a path, or a name looked up as StartPositions/<name>.csv.
    #[arg(long, conflicts_with = "pattern")]
    start_file: Option<String>,

    /// Preset pattern placed in the middle of the screen (see --list-patterns).
    #[arg(long)]
    pattern: Option<String>,

    /// Probability a cell starts alive in random fills and stall resets.
    #[arg(long, default_value_t = 0.5, value_parser = parse_density)]
    density: f64,

    /// Stop after this many generations.
    #[arg(long, default_value_t = DEFAULT_MAX_TICKS)]
    max_ticks: u64,

    /// Milliseconds to wait for a key press between generations.
    #[arg(long, default_value_t = 500)]
    tick_ms: u64,

    /// Seed for random fills, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Step rows in parallel.
    #[arg(long)]
    parallel: bool,

    /// Cycle the foreground colour every generation.
    #[arg(long)]
    rave: bool,

    /// Print the named rules and exit.
    #[arg(long)]
    list_rules: bool,

    /// Print the preset patterns and exit.
    #[arg(long)]
    list_patterns: bool,
}

fn parse_density(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(String::from("density must be between 0 and 1"))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    if cli.list_rules {
        for (name, description, rule) in all_rules() {
            println!("{name:<10} {:<14} {description}", rule.to_string());
        }
        return Ok(());
    }
    if cli.list_patterns {
        for pattern in presets::all_patterns() {
            println!("{:<12} {}", pattern.name, pattern.description);
        }
        return Ok(());
    }

    let start = start_state(&cli)?;
    let config = SimulationConfig {
        density: cli.density,
        max_ticks: cli.max_ticks,
        tick_timeout: Duration::from_millis(cli.tick_ms),
        parallel: cli.parallel,
        seed: cli.seed,
    };

    let surface = crossterm::terminal::size().context("failed to query terminal size")?;
    info!(columns = surface.0, rows = surface.1, rule = %cli.rule, "terminal detected");

    let mut frontend = TerminalFrontend::new(cli.rule, cli.rave)?;
    let result = SimulationLoop::new(config, cli.rule, start, surface).run(&mut frontend);
    // Restore the terminal before any error is printed
    drop(frontend);

    let summary = result?;
    println!(
        "Stopped after {} generations ({} stall resets)",
        summary.ticks, summary.resets
    );
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn start_state(cli: &Cli) -> Result<StartState> {
    if let Some(name) = &cli.start_file {
        return Ok(StartState::Alive(start_file::load(name)?));
    }
    if let Some(name) = &cli.pattern {
        let pattern = presets::by_name(name)
            .ok_or_else(|| anyhow!("unknown pattern {name:?}; try --list-patterns"))?;
        return Ok(StartState::Pattern(pattern));
    }
    Ok(StartState::Random)
}
