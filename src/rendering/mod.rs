use std::io::{self, Stdout, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::application::{Frontend, TickReport};
use crate::domain::{Cell, Grid, RuleSet};
use crate::input;
use crate::ui::{ALIVE_GLYPH, DEAD_GLYPH, STOP_PROMPT, frame_color};

/// Format large numbers with K/M suffixes
fn format_number(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

fn glyph(cell: Cell) -> char {
    if cell.is_alive() { ALIVE_GLYPH } else { DEAD_GLYPH }
}

/// One string per grid row, top to bottom
pub fn frame_rows(grid: &Grid) -> Vec<String> {
    grid.rows()
        .map(|row| row.iter().copied().map(glyph).collect())
        .collect()
}

/// Status line shown under the grid
pub fn status_line(rules: &RuleSet, report: &TickReport) -> String {
    format!(
        "Gen {}  Cells {}  Rule {}  Stall {}",
        format_number(report.tick as usize),
        format_number(report.population),
        rules,
        report.countdown
    )
}

/// Frontend drawing to the real terminal through crossterm.
///
/// Raw mode and the alternate screen are entered on construction and left
/// again on drop, so the shell is restored even if the run fails.
pub struct TerminalFrontend {
    stdout: Stdout,
    rules: RuleSet,
    rave: bool,
}

impl TerminalFrontend {
    pub fn new(rules: RuleSet, rave: bool) -> Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        execute!(stdout, EnterAlternateScreen, Hide).context("failed to enter alternate screen")?;
        Ok(Self { stdout, rules, rave })
    }
}

impl Frontend for TerminalFrontend {
    fn surface_size(&mut self) -> Result<(u16, u16)> {
        terminal::size().context("failed to query terminal size")
    }

    fn render(&mut self, grid: &Grid, report: &TickReport) -> Result<()> {
        let color = frame_color(report.tick, self.rave);
        queue!(self.stdout, Clear(ClearType::All), SetForegroundColor(color))?;

        let rows = frame_rows(grid);
        for (y, line) in rows.iter().enumerate() {
            queue!(self.stdout, MoveTo(0, y as u16), Print(line))?;
        }

        let below = rows.len() as u16;
        queue!(
            self.stdout,
            MoveTo(0, below),
            Print(status_line(&self.rules, report)),
            MoveTo(0, below + 1),
            Print(STOP_PROMPT),
        )?;
        self.stdout.flush().context("failed to flush frame")
    }

    fn poll_stop(&mut self, timeout: Duration) -> Result<bool> {
        input::wait_for_stop(timeout).context("failed to read terminal input")
    }
}

impl Drop for TerminalFrontend {
    fn drop(&mut self) {
        if let Err(err) = execute!(self.stdout, ResetColor, Show, LeaveAlternateScreen) {
            tracing::error!(?err, "failed to leave alternate screen");
        }
        if let Err(err) = terminal::disable_raw_mode() {
            tracing::error!(?err, "failed to disable raw mode");
        }
    }
}
