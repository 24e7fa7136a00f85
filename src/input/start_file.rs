//! Start-position files: one `col,row` pair per line.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Directory searched for bare start-position names
pub const START_POSITIONS_DIR: &str = "StartPositions";

/// Resolve `name` to a file: an existing path is used as-is, anything else
/// is looked up as `StartPositions/<name>.csv`.
pub fn resolve(name: &str) -> PathBuf {
    let direct = Path::new(name);
    if direct.is_file() {
        direct.to_path_buf()
    } else {
        Path::new(START_POSITIONS_DIR).join(format!("{name}.csv"))
    }
}

/// Read and parse a start-position file
pub fn load(name: &str) -> Result<Vec<(i64, i64)>> {
    let path = resolve(name);
    let text = fs::read_to_string(&path)
        .with_context(|| format!("failed to read start positions from {}", path.display()))?;
    let positions = parse(&text);
    debug!(path = %path.display(), cells = positions.len(), "loaded start positions");
    Ok(positions)
}

/// Parse `col,row` lines. Blank lines and `#` comments are skipped; lines
/// that do not hold two integers are logged and skipped.
pub fn parse(text: &str) -> Vec<(i64, i64)> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let parsed = parse_pair(line);
            if parsed.is_none() {
                warn!(line = idx + 1, text = line, "skipping malformed start position");
            }
            parsed
        })
        .collect()
}

fn parse_pair(line: &str) -> Option<(i64, i64)> {
    let (col, row) = line.split_once(',')?;
    Some((col.trim().parse().ok()?, row.trim().parse().ok()?))
}
