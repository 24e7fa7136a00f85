//! Throughput of serial versus rayon-parallel stepping

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use terminal_life::{Grid, RuleSet};

fn random_grid(width: usize, height: usize) -> Grid {
    Grid::random(width, height, 0.5, &mut StdRng::seed_from_u64(0xC0FFEE))
}

fn benchmark_serial(width: usize, height: usize, iterations: u32) -> f64 {
    let rules = RuleSet::conway();
    let mut grid = random_grid(width, height);

    let start = Instant::now();
    for _ in 0..iterations {
        grid = grid.step(&rules);
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn benchmark_parallel(width: usize, height: usize, iterations: u32) -> f64 {
    let rules = RuleSet::conway();
    let mut grid = random_grid(width, height);

    let start = Instant::now();
    for _ in 0..iterations {
        grid = grid.step_parallel(&rules);
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn main() {
    println!("=== Generation Step Benchmark ===\n");

    // Typical terminals first, then sizes well past any screen
    let sizes = [(80, 21), (200, 57), (400, 100), (1000, 1000), (2000, 2000)];
    let iterations = 20;

    println!("{:>12} {:>12} {:>12} {:>10}", "Size", "Serial", "Parallel", "Speedup");
    println!("{:-<50}", "");

    for (width, height) in sizes {
        let serial_ms = benchmark_serial(width, height, iterations);
        let parallel_ms = benchmark_parallel(width, height, iterations);

        println!(
            "{:>12} {:>12.3} {:>12.3} {:>9.1}x",
            format!("{}x{}", width, height),
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms
        );
    }
}
