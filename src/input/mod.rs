use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};

pub mod start_file;

/// Wait up to `timeout` for a key press.
///
/// Returns `true` as soon as any key is pressed. Resize and mouse events
/// are drained without cutting the wait short, and running out of time
/// returns `false`.
pub fn wait_for_stop(timeout: Duration) -> io::Result<bool> {
    let deadline = Instant::now() + timeout;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if !event::poll(remaining)? {
            return Ok(false);
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(true);
            }
        }
        if remaining.is_zero() {
            return Ok(false);
        }
    }
}
