// grid.rs - Grid types for two-state cellular automata

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::Rng;

use crate::rules::RuleSet;

/// Relative offsets of the 8-connected Moore neighborhood.
const MOORE: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// State of a single cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    #[inline]
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

/// A rectangular selection in cell coordinates.
///
/// `x` runs over rows and `y` over columns, matching [`Grid`] addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub rows: usize,
    pub cols: usize,
}

impl Rect {
    pub fn new(x: usize, y: usize, rows: usize, cols: usize) -> Self {
        Self { x, y, rows, cols }
    }

    /// Selection spanning two inclusive corners given in any order.
    pub fn from_corners(a: (usize, usize), b: (usize, usize)) -> Self {
        let (x0, x1) = (a.0.min(b.0), a.0.max(b.0));
        let (y0, y1) = (a.1.min(b.1), a.1.max(b.1));
        Self::new(x0, y0, x1 - x0 + 1, y1 - y0 + 1)
    }
}

/// A `rows x cols` array of cells.
///
/// Dimensions are fixed at construction. Cells are addressed as `(x, y)` with
/// `x < rows` and `y < cols`. A simulation step never mutates a grid; it
/// builds the next generation as a new value (see [`Grid::next_generation`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-dead grid.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows >= 1 && cols >= 1, "grid dimensions must be at least 1x1, got {rows}x{cols}");
        Self {
            rows,
            cols,
            cells: vec![Cell::Dead; rows * cols],
        }
    }

    /// Creates a grid with the listed `(x, y)` cells alive. Coordinates
    /// outside the grid are skipped.
    pub fn with_alive(rows: usize, cols: usize, alive: &[(usize, usize)]) -> Self {
        let mut grid = Self::new(rows, cols);
        for &(x, y) in alive {
            if x < rows && y < cols {
                grid.set(x, y, true);
            }
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.rows && y < self.cols,
            "cell ({x}, {y}) out of bounds for {}x{} grid",
            self.rows,
            self.cols
        );
        x * self.cols + y
    }

    /// Returns the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[self.index(x, y)]
    }

    /// Returns the cell at `(x, y)`, or `None` outside the grid.
    pub fn try_get(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.rows && y < self.cols).then(|| self.cells[x * self.cols + y])
    }

    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_alive()
    }

    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        let i = self.index(x, y);
        self.cells[i] = Cell::from(alive);
    }

    /// Counts live cells in the Moore neighborhood of `(x, y)`.
    ///
    /// Without `wrap`, positions off the grid do not exist. With `wrap`, the
    /// grid closes into a torus: row `rows - 1` touches row `0`, column
    /// `cols - 1` touches column `0`, and the corners are diagonal neighbors.
    /// Each of the 8 offsets contributes at most once.
    pub fn live_neighbor_count(&self, x: usize, y: usize, wrap: bool) -> u8 {
        let (rows, cols) = (self.rows as isize, self.cols as isize);
        let (x, y) = (x as isize, y as isize);
        let mut count = 0;
        for (dx, dy) in MOORE {
            let (mut nx, mut ny) = (x + dx, y + dy);
            if wrap {
                nx = nx.rem_euclid(rows);
                ny = ny.rem_euclid(cols);
            } else if nx < 0 || ny < 0 || nx >= rows || ny >= cols {
                continue;
            }
            if self.cells[nx as usize * self.cols + ny as usize].is_alive() {
                count += 1;
            }
        }
        count
    }

    /// Builds the generation that follows this one under `rules`.
    pub fn next_generation(&self, rules: &RuleSet, wrap: bool) -> Grid {
        let mut next = Grid::new(self.rows, self.cols);
        for x in 0..self.rows {
            for y in 0..self.cols {
                let alive = self.is_alive(x, y);
                let neighbors = self.live_neighbor_count(x, y, wrap);
                if rules.next_state(alive, neighbors) {
                    next.set(x, y, true);
                }
            }
        }
        next
    }

    /// Sets every cell alive with `probability`, independently, using the
    /// thread-local generator.
    pub fn randomize(&mut self, probability: f64) {
        self.randomize_with(&mut rand::thread_rng(), probability);
    }

    /// Like [`Grid::randomize`] with a caller-supplied generator.
    ///
    /// `probability` is clamped to `[0, 1]`; NaN counts as 0.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R, probability: f64) {
        let p = if probability.is_nan() { 0.0 } else { probability.clamp(0.0, 1.0) };
        for cell in &mut self.cells {
            *cell = Cell::from(rng.gen_bool(p));
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Dead);
    }

    /// Copies the part of the grid covered by `rect`.
    ///
    /// The selection is clipped to the grid first. Returns `None` when the
    /// clipped region has zero width or height.
    pub fn extract_subgrid(&self, rect: Rect) -> Option<Grid> {
        let x0 = rect.x.min(self.rows);
        let y0 = rect.y.min(self.cols);
        let x1 = rect.x.saturating_add(rect.rows).min(self.rows);
        let y1 = rect.y.saturating_add(rect.cols).min(self.cols);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        let mut sub = Grid::new(x1 - x0, y1 - y0);
        for x in x0..x1 {
            for y in y0..y1 {
                if self.is_alive(x, y) {
                    sub.set(x - x0, y - y0, true);
                }
            }
        }
        Some(sub)
    }

    /// Where `pattern` would land if anchored at `(x, y)`: the anchor shifted
    /// inward until the pattern fits. `None` if the pattern is larger than
    /// this grid in either dimension.
    pub fn fit_anchor(&self, x: isize, y: isize, pattern: &Grid) -> Option<(usize, usize)> {
        if pattern.rows > self.rows || pattern.cols > self.cols {
            return None;
        }
        let max_x = (self.rows - pattern.rows) as isize;
        let max_y = (self.cols - pattern.cols) as isize;
        Some((x.clamp(0, max_x) as usize, y.clamp(0, max_y) as usize))
    }

    /// Copies `pattern` over this grid with its top-left cell at `(x, y)`.
    ///
    /// Both live and dead pattern cells overwrite the target. The anchor is
    /// shifted inward so the whole pattern fits. Returns `false`, leaving the
    /// grid untouched, if the pattern is larger than the grid.
    pub fn place_at(&mut self, x: isize, y: isize, pattern: &Grid) -> bool {
        let Some((ax, ay)) = self.fit_anchor(x, y, pattern) else {
            return false;
        };
        for px in 0..pattern.rows {
            for py in 0..pattern.cols {
                self.set(ax + px, ay + py, pattern.is_alive(px, py));
            }
        }
        true
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Coordinates of every live cell, row-major.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(|(i, _)| (i / self.cols, i % self.cols))
    }

    /// Hash of the cell contents, used to spot repeating generations.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
