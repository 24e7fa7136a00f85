use super::{Cell, RuleSet};
use rand::Rng;
use rayon::prelude::*;

/// Grid manages the 2D cellular automaton on a torus.
///
/// Cells are stored row-major: `height` rows of `width` cells, addressed as
/// `(row, col)`. Stepping is functional and returns a fresh grid, so a clone
/// taken before a step is never affected by it. A grid with a zero dimension
/// holds no cells; stepping and randomizing it are no-ops.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid with all cells initially dead
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Dead; width * height],
        }
    }

    /// Create a grid from `(col, row)` coordinates of live cells.
    /// Coordinates outside the grid are silently dropped.
    pub fn from_alive<I>(width: usize, height: usize, alive: I) -> Self
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let mut grid = Self::new(width, height);
        for (col, row) in alive {
            if let (Ok(col), Ok(row)) = (usize::try_from(col), usize::try_from(row)) {
                grid.set(row, col, Cell::Alive);
            }
        }
        grid
    }

    /// Create a grid where each cell is alive with the given probability
    pub fn random<R: Rng + ?Sized>(width: usize, height: usize, probability: f64, rng: &mut R) -> Self {
        let mut grid = Self::new(width, height);
        grid.randomize_with(rng, probability);
        grid
    }

    /// Get grid dimensions as `(width, height)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// True when the grid holds no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Convert 2D coordinates to 1D index
    const fn get_index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Get cell at position (with bounds checking)
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        (row < self.height && col < self.width).then(|| self.cells[self.get_index(row, col)])
    }

    /// Set cell at position, ignoring out-of-bounds writes
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if row < self.height && col < self.width {
            let idx = self.get_index(row, col);
            self.cells[idx] = cell;
        }
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Count live neighbors using toroidal wrapping (grid wraps like a torus).
    ///
    /// Row 0 sees row `height - 1` above it, column 0 sees column
    /// `width - 1` to its left. Panics if the position is out of bounds.
    pub fn neighbor_count(&self, row: usize, col: usize) -> u8 {
        assert!(
            row < self.height && col < self.width,
            "({row}, {col}) outside {}x{} grid",
            self.width,
            self.height
        );

        let up = (row + self.height - 1) % self.height;
        let down = (row + 1) % self.height;
        let left = (col + self.width - 1) % self.width;
        let right = (col + 1) % self.width;

        [
            (up, left), (up, col), (up, right),
            (row, left), (row, right),
            (down, left), (down, col), (down, right),
        ]
        .into_iter()
        .map(|(r, c)| self.cells[self.get_index(r, c)].weight())
        .sum()
    }

    /// Next state of the cell at `(row, col)`, read from this generation only
    #[inline]
    fn next_cell(&self, rules: &RuleSet, row: usize, col: usize) -> Cell {
        let current = self.cells[self.get_index(row, col)];
        rules.evolve(current, self.neighbor_count(row, col))
    }

    /// Pure functional evolution - returns new grid (serial)
    pub fn step(&self, rules: &RuleSet) -> Self {
        let cells = (0..self.height)
            .flat_map(|row| (0..self.width).map(move |col| (row, col)))
            .map(|(row, col)| self.next_cell(rules, row, col))
            .collect();

        Self {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Parallel evolution using rayon, one task per row.
    /// Reads only `self` and writes into a fresh buffer, so the result is
    /// identical to [`Grid::step`].
    pub fn step_parallel(&self, rules: &RuleSet) -> Self {
        let mut cells = vec![Cell::Dead; self.cells.len()];
        if self.width > 0 {
            cells
                .par_chunks_mut(self.width)
                .enumerate()
                .for_each(|(row, out)| {
                    for (col, cell) in out.iter_mut().enumerate() {
                        *cell = self.next_cell(rules, row, col);
                    }
                });
        }

        Self {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Randomize grid in place using the thread-local RNG
    pub fn randomize(&mut self, probability: f64) {
        self.randomize_with(&mut rand::rng(), probability);
    }

    /// Randomize grid in place; each cell is independently alive with
    /// `probability` (clamped to 0..=1)
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R, probability: f64) {
        let probability = if probability.is_nan() { 0.0 } else { probability.clamp(0.0, 1.0) };
        self.cells
            .iter_mut()
            .for_each(|cell| *cell = Cell::from(rng.random_bool(probability)));
    }

    /// Build a grid of the new size, keeping the overlapping top-left region.
    /// New area is dead and area outside the new bounds is dropped.
    pub fn resize(&self, width: usize, height: usize) -> Self {
        let mut resized = Self::new(width, height);
        let keep_cols = self.width.min(width);
        for (old, new) in self.rows().zip(resized.rows_mut()).take(self.height.min(height)) {
            new[..keep_cols].copy_from_slice(&old[..keep_cols]);
        }
        resized
    }

    /// Rows in top-to-bottom order, each a slice of `width` cells
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width.max(1))
    }

    fn rows_mut(&mut self) -> impl Iterator<Item = &mut [Cell]> + '_ {
        self.cells.chunks_mut(self.width.max(1))
    }

    /// Iterate over all cells with their `(row, col)` positions
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.rows()
            .enumerate()
            .flat_map(|(row, cells)| cells.iter().enumerate().map(move |(col, &cell)| (row, col, cell)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::presets;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn grid_from_rows(rows: &[&str]) -> Grid {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        let alive = rows.iter().enumerate().flat_map(|(row, line)| {
            line.chars()
                .enumerate()
                .filter(|&(_, c)| c == 'O')
                .map(move |(col, _)| (col as i64, row as i64))
        });
        Grid::from_alive(width, height, alive)
    }

    #[test]
    fn test_neighbor_count_interior() {
        let grid = grid_from_rows(&[
            "OOO..",
            "O.O..",
            "OOO..",
            ".....",
        ]);
        assert_eq!(grid.neighbor_count(1, 1), 8);
        assert_eq!(grid.neighbor_count(0, 0), 2);
    }

    #[test]
    fn test_neighbor_count_wraps_rows() {
        let mut grid = Grid::new(5, 5);
        grid.set(4, 2, Cell::Alive);
        // Row 0 sees row 4 above it
        assert_eq!(grid.neighbor_count(0, 1), 1);
        assert_eq!(grid.neighbor_count(0, 2), 1);
        assert_eq!(grid.neighbor_count(0, 3), 1);
        assert_eq!(grid.neighbor_count(0, 4), 0);
    }

    #[test]
    fn test_neighbor_count_wraps_cols() {
        let mut grid = Grid::new(5, 5);
        grid.set(2, 4, Cell::Alive);
        // Column 0 sees column 4 to its left
        assert_eq!(grid.neighbor_count(1, 0), 1);
        assert_eq!(grid.neighbor_count(2, 0), 1);
        assert_eq!(grid.neighbor_count(3, 0), 1);
        assert_eq!(grid.neighbor_count(2, 1), 0);
    }

    #[test]
    fn test_neighbor_count_corners() {
        let mut grid = Grid::new(4, 3);
        grid.set(0, 3, Cell::Alive);
        grid.set(2, 0, Cell::Alive);
        grid.set(2, 3, Cell::Alive);
        // (0, 0) touches all three other corners through the wrap
        assert_eq!(grid.neighbor_count(0, 0), 3);
    }

    #[test]
    fn test_from_alive_drops_out_of_bounds() {
        let grid = Grid::from_alive(3, 2, [(0, 0), (2, 1), (3, 0), (0, 2), (-1, 0), (1, -5)]);
        assert_eq!(grid.population(), 2);
        assert_eq!(grid.get(0, 0), Some(Cell::Alive));
        assert_eq!(grid.get(1, 2), Some(Cell::Alive));
    }

    #[test]
    fn test_blinker_oscillates() {
        let rules = RuleSet::conway();
        let horizontal = grid_from_rows(&[
            ".....",
            ".....",
            ".OOO.",
            ".....",
            ".....",
        ]);
        let vertical = grid_from_rows(&[
            ".....",
            "..O..",
            "..O..",
            "..O..",
            ".....",
        ]);
        assert_eq!(horizontal.step(&rules), vertical);
        assert_eq!(vertical.step(&rules), horizontal);
    }

    #[test]
    fn test_glider_on_small_torus() {
        let rules = RuleSet::conway();
        let mut grid = Grid::new(5, 5);
        presets::glider().place_on(&mut grid, 0, 0);
        assert_eq!(grid, grid_from_rows(&[
            ".O...",
            "..O..",
            "OOO..",
            ".....",
            ".....",
        ]));

        let next = grid.step(&rules);
        assert_eq!(next, grid_from_rows(&[
            ".....",
            "O.O..",
            ".OO..",
            ".O...",
            ".....",
        ]));
    }

    #[test]
    fn test_glider_period_four_translates() {
        let rules = RuleSet::conway();
        let mut start = Grid::new(8, 8);
        presets::glider().place_on(&mut start, 1, 1);

        let after = (0..4).fold(start.clone(), |g, _| g.step(&rules));

        let mut expected = Grid::new(8, 8);
        presets::glider().place_on(&mut expected, 2, 2);
        assert_eq!(after, expected);
    }

    #[test]
    fn test_glider_wraps_around_torus() {
        let rules = RuleSet::conway();
        let mut start = Grid::new(8, 8);
        presets::glider().place_on(&mut start, 0, 0);
        // Eight periods move the glider 8 cells diagonally: a full lap
        let after = (0..32).fold(start.clone(), |g, _| g.step(&rules));
        assert_eq!(after, start);
    }

    #[test]
    fn test_step_leaves_original_untouched() {
        let rules = RuleSet::conway();
        let grid = grid_from_rows(&["...", "OOO", "..."]);
        let before = grid.clone();
        let _ = grid.step(&rules);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_step_is_deterministic() {
        let rules = RuleSet::parse("B36/S23").unwrap();
        let grid = Grid::random(30, 20, 0.4, &mut StdRng::seed_from_u64(7));
        assert_eq!(grid.step(&rules), grid.step(&rules));
    }

    #[test]
    fn test_parallel_matches_serial() {
        let rules = RuleSet::conway();
        let mut grid = Grid::random(64, 48, 0.5, &mut StdRng::seed_from_u64(42));
        for _ in 0..10 {
            let serial = grid.step(&rules);
            assert_eq!(grid.step_parallel(&rules), serial);
            grid = serial;
        }
    }

    #[test]
    fn test_all_dead_stays_dead() {
        let grid = Grid::new(10, 7);
        for rule in ["B3/S23", "B36/S23", "B1/S012345678", "B12345678/S0"] {
            let rules = RuleSet::parse(rule).unwrap();
            assert_eq!(grid.step(&rules).population(), 0, "{rule}");
        }
    }

    #[test]
    fn test_all_dead_births_with_b0() {
        let rules = RuleSet::parse("B0/S8").unwrap();
        let grid = Grid::new(4, 4);
        assert_eq!(grid.step(&rules).population(), 16);
    }

    #[test]
    fn test_randomize_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut grid = Grid::new(12, 9);
        grid.randomize_with(&mut rng, 0.0);
        assert_eq!(grid.population(), 0);
        grid.randomize_with(&mut rng, 1.0);
        assert_eq!(grid.population(), 12 * 9);
    }

    #[test]
    fn test_randomize_clamps_probability() {
        let mut grid = Grid::new(5, 5);
        grid.randomize(7.5);
        assert_eq!(grid.population(), 25);
        grid.randomize(-1.0);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_resize_grow_then_shrink_preserves_cells() {
        let grid = Grid::random(9, 6, 0.5, &mut StdRng::seed_from_u64(3));
        let grown = grid.resize(15, 11);
        assert_eq!(grown.dimensions(), (15, 11));
        assert_eq!(grown.population(), grid.population());
        assert_eq!(grown.resize(9, 6), grid);
    }

    #[test]
    fn test_resize_shrink_discards_outside() {
        let grid = grid_from_rows(&[
            "O...O",
            ".....",
            "..O..",
            "O...O",
        ]);
        let shrunk = grid.resize(3, 3);
        assert_eq!(shrunk, grid_from_rows(&["O..", "...", "..O"]));
    }

    #[test]
    fn test_resize_mixed_axes() {
        let grid = grid_from_rows(&["OOOO", "OOOO"]);
        let resized = grid.resize(2, 4);
        assert_eq!(resized, grid_from_rows(&["OO", "OO", "..", ".."]));
    }

    #[test]
    fn test_zero_sized_grid() {
        let rules = RuleSet::parse("B0/S8").unwrap();
        for (w, h) in [(0, 0), (0, 5), (5, 0)] {
            let mut grid = Grid::new(w, h);
            assert!(grid.is_empty());
            grid.randomize(1.0);
            assert!(grid.is_empty());
            assert_eq!(grid.step(&rules), grid);
            assert_eq!(grid.step_parallel(&rules), grid);
            assert_eq!(grid.rows().count(), 0);
        }

        let grid = grid_from_rows(&["OO", "OO"]);
        let empty = grid.resize(0, 3);
        assert!(empty.is_empty());
        assert_eq!(empty.resize(2, 2), Grid::new(2, 2));
    }

    #[test]
    fn test_rows_are_row_major() {
        let grid = grid_from_rows(&["O..", ".O."]);
        let rows: Vec<Vec<bool>> = grid
            .rows()
            .map(|r| r.iter().map(|c| c.is_alive()).collect())
            .collect();
        assert_eq!(rows, vec![vec![true, false, false], vec![false, true, false]]);
        assert_eq!(grid.iter_cells().filter(|&(_, _, c)| c.is_alive()).count(), 2);
    }
}
