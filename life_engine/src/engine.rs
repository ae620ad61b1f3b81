// engine.rs - Simulation engine driven by the UI tick

use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::{ConfigError, EngineError, RuleError};
use crate::grid::{Grid, Rect};
use crate::history::{DEFAULT_CAPACITY, HistoryBuffer};
use crate::record::MatrixData;
use crate::rle;
use crate::rules::RuleSet;
use crate::stats::PopulationStats;

/// How many recent generations are remembered for cycle detection.
const CYCLE_WINDOW: usize = 10;

/// One running simulation: the generation history, the active rule and the
/// bookkeeping the UI shows alongside the grid.
///
/// The engine never runs on its own. The caller invokes [`Engine::step`] (or
/// [`Engine::tick`]) once per timer tick.
#[derive(Debug, Clone)]
pub struct Engine {
    history: HistoryBuffer,
    rules: RuleSet,
    wrap: bool,
    generation: u64,
    stats: PopulationStats,

    recent: [u64; CYCLE_WINDOW],
    recent_count: usize,
    cycle: bool,
}

impl Engine {
    /// An all-dead `rows x cols` engine running B3/S23 on a torus.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::with_grid(Grid::new(rows.max(1), cols.max(1)), RuleSet::default(), DEFAULT_CAPACITY)
    }

    /// Builds an engine from validated settings. The grid starts dead; call
    /// [`Engine::randomize`] with `seed_probability` to seed it.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        let rules = config.validate()?;
        let mut engine = Self::with_grid(
            Grid::new(config.rows, config.cols),
            rules,
            config.history_capacity,
        );
        engine.wrap = config.wrap;
        Ok(engine)
    }

    fn with_grid(grid: Grid, rules: RuleSet, capacity: usize) -> Self {
        let stats = PopulationStats::new(grid.population(), grid.rows() * grid.cols());
        Self {
            history: HistoryBuffer::new(grid, capacity),
            rules,
            wrap: true,
            generation: 0,
            stats,
            recent: [0; CYCLE_WINDOW],
            recent_count: 0,
            cycle: false,
        }
    }

    /// The generation under the history cursor.
    pub fn current(&self) -> &Grid {
        self.history.current()
    }

    /// Advances one generation under the given edge condition.
    ///
    /// After a rollback this replays the stored generation; otherwise it
    /// computes a new one with the active rule.
    pub fn step(&mut self, wrap: bool) -> &Grid {
        let fresh = self.history.replayable() == 0;
        self.history.step(wrap, &self.rules);
        self.generation += 1;

        let fingerprint = self.history.current().fingerprint();
        if fresh {
            self.cycle = self.check_for_cycle(fingerprint);
            if self.cycle {
                debug!(generation = self.generation, "generation repeats a recent one");
            }
        }
        self.stats.record(self.generation, self.history.current().population());
        self.history.current()
    }

    /// [`Engine::step`] using the stored edge condition.
    pub fn tick(&mut self) -> &Grid {
        self.step(self.wrap)
    }

    /// Steps back one generation. Returns `false` once the oldest retained
    /// generation is current.
    pub fn rollback(&mut self) -> bool {
        if !self.history.rollback() {
            return false;
        }
        self.generation = self.generation.saturating_sub(1);
        self.cycle = false;
        self.stats.record(self.generation, self.history.current().population());
        true
    }

    /// Reseeds the grid, each cell alive with `probability`, and restarts the
    /// history.
    pub fn randomize(&mut self, probability: f64) {
        self.randomize_with(&mut rand::thread_rng(), probability);
    }

    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R, probability: f64) {
        let current = self.current();
        let mut grid = Grid::new(current.rows(), current.cols());
        grid.randomize_with(rng, probability);
        info!(probability, population = grid.population(), "seeded grid");
        self.restart(grid);
    }

    /// Kills every cell and restarts the history.
    pub fn clear(&mut self) {
        let current = self.current();
        let grid = Grid::new(current.rows(), current.cols());
        self.restart(grid);
    }

    /// Switches to an all-dead grid of the new size. The history does not
    /// survive a resize. Zero dimensions are raised to 1.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        let (rows, cols) = (rows.max(1), cols.max(1));
        info!(rows, cols, "resized grid");
        self.restart(Grid::new(rows, cols));
    }

    /// Adopts `grid` as the new starting generation, dimensions included.
    pub fn load_grid(&mut self, grid: Grid) {
        info!(rows = grid.rows(), cols = grid.cols(), "loaded grid");
        self.restart(grid);
    }

    fn restart(&mut self, grid: Grid) {
        self.stats.reset(grid.population(), grid.rows() * grid.cols());
        self.history.reset(grid);
        self.generation = 0;
        self.forget_recent();
    }

    /// Copies `pattern` onto the current generation with its top-left cell at
    /// `(x, y)`, shifted inward to fit. Returns `false` without touching the
    /// grid when the pattern is larger than the grid.
    pub fn place_pattern(&mut self, x: isize, y: isize, pattern: &Grid) -> bool {
        let mut grid = self.current().clone();
        if !grid.place_at(x, y, pattern) {
            warn!(
                pattern_rows = pattern.rows(),
                pattern_cols = pattern.cols(),
                rows = grid.rows(),
                cols = grid.cols(),
                "pattern too large to place"
            );
            return false;
        }
        self.edit(grid);
        true
    }

    /// Sets one cell of the current generation.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    pub fn set_cell(&mut self, x: usize, y: usize, alive: bool) {
        let mut grid = self.current().clone();
        grid.set(x, y, alive);
        self.edit(grid);
    }

    /// Flips one cell of the current generation.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    pub fn toggle_cell(&mut self, x: usize, y: usize) {
        let alive = self.current().is_alive(x, y);
        self.set_cell(x, y, !alive);
    }

    // Edits replace the current generation; stored future generations were
    // computed from the old state and are dropped.
    fn edit(&mut self, grid: Grid) {
        let population = grid.population();
        self.history.replace_current(grid);
        self.stats.record(self.generation, population);
        self.forget_recent();
    }

    /// Copies the cells under `rect` out of the current generation.
    pub fn extract_selection(&self, rect: Rect) -> Option<Grid> {
        self.current().extract_subgrid(rect)
    }

    /// RLE body of the current generation.
    pub fn export_rle(&self) -> String {
        rle::encode(self.current())
    }

    /// Decodes an RLE body into a `rows x cols` grid, typically for
    /// [`Engine::place_pattern`]. The engine itself is not changed.
    pub fn import_rle(&self, text: &str, rows: usize, cols: usize) -> Result<Grid, EngineError> {
        Ok(rle::decode(text, rows, cols)?)
    }

    /// Captures the current generation and rule as a pattern record.
    pub fn save(&self, title: impl Into<String>) -> MatrixData {
        MatrixData::from_grid(self.current())
            .with_title(title)
            .with_rule(&self.rules)
    }

    /// Loads a record's grid and, if it carries one, its rule. Nothing
    /// changes unless both decode.
    pub fn load_record(&mut self, record: &MatrixData) -> Result<(), EngineError> {
        let grid = record.to_grid()?;
        let rules = match record.rule() {
            Some(spec) => Some(RuleSet::parse(spec)?),
            None => None,
        };
        if let Some(rules) = rules {
            self.rules = rules;
        }
        info!(title = record.title(), "loaded pattern record");
        self.load_grid(grid);
        Ok(())
    }

    /// Switches to a new rule. On error the previous rule stays active.
    pub fn set_rule(&mut self, spec: &str) -> Result<(), RuleError> {
        match RuleSet::parse(spec) {
            Ok(rules) => {
                info!(rule = %rules, "rule changed");
                self.rules = rules;
                Ok(())
            }
            Err(err) => {
                warn!(%err, kept = %self.rules, "rejected rule");
                Err(err)
            }
        }
    }

    /// Canonical string of the active rule, e.g. `B3/S23`.
    pub fn rule(&self) -> String {
        self.rules.to_string()
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn wrap(&self) -> bool {
        self.wrap
    }

    pub fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    /// Ticks since the last reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.current().population()
    }

    pub fn stats(&self) -> &PopulationStats {
        &self.stats
    }

    /// Whether the newest computed generation matches one of the last
    /// [`CYCLE_WINDOW`] computed generations.
    pub fn cycle_detected(&self) -> bool {
        self.cycle
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_index(&self) -> usize {
        self.history.index()
    }

    pub fn history_capacity(&self) -> usize {
        self.history.capacity()
    }

    /// Changes how many generations are kept (at least 1).
    pub fn set_history_capacity(&mut self, capacity: usize) {
        self.history.set_capacity(capacity);
    }

    fn check_for_cycle(&mut self, fingerprint: u64) -> bool {
        let filled = self.recent_count.min(CYCLE_WINDOW);
        if self.recent[..filled].contains(&fingerprint) {
            return true;
        }
        self.recent[self.recent_count % CYCLE_WINDOW] = fingerprint;
        self.recent_count += 1;
        false
    }

    fn forget_recent(&mut self) {
        self.recent = [0; CYCLE_WINDOW];
        self.recent_count = 0;
        self.cycle = false;
    }
}
