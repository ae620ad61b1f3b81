// history.rs - Bounded generation history with replay and rollback

use std::collections::VecDeque;

use tracing::debug;

use crate::grid::Grid;
use crate::rules::RuleSet;

/// Default number of generations kept.
pub const DEFAULT_CAPACITY: usize = 100;

/// Capped sequence of generations with a cursor on the current one.
///
/// Stepping forward after a rollback replays the stored generation instead
/// of recomputing it, so forward and backward stepping are exact inverses.
/// When the buffer is full, the oldest generation is evicted.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    generations: VecDeque<Grid>,
    cursor: usize,
    capacity: usize,
}

impl HistoryBuffer {
    /// Starts a history at `initial`. A capacity of 0 is raised to 1.
    pub fn new(initial: Grid, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut generations = VecDeque::with_capacity(capacity);
        generations.push_back(initial);
        Self {
            generations,
            cursor: 0,
            capacity,
        }
    }

    /// The generation under the cursor.
    pub fn current(&self) -> &Grid {
        &self.generations[self.cursor]
    }

    /// Advances one generation, replaying a stored one when the cursor is
    /// behind the newest, otherwise computing it from the current grid.
    pub fn step(&mut self, wrap: bool, rules: &RuleSet) -> &Grid {
        if self.cursor + 1 < self.generations.len() {
            self.cursor += 1;
            debug!(cursor = self.cursor, "replaying stored generation");
        } else {
            let next = self.current().next_generation(rules, wrap);
            self.push(next);
            debug!(cursor = self.cursor, len = self.generations.len(), "computed generation");
        }
        self.current()
    }

    /// Moves the cursor back one generation. Returns `false` at the oldest
    /// retained generation.
    pub fn rollback(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Replaces the whole history with `[initial]`.
    pub fn reset(&mut self, initial: Grid) {
        self.generations.clear();
        self.generations.push_back(initial);
        self.cursor = 0;
    }

    /// Swaps the current generation for `grid` and drops any stored future
    /// generations, which were computed from the replaced state. Used for
    /// edits made between steps.
    pub fn replace_current(&mut self, grid: Grid) -> &Grid {
        self.generations.truncate(self.cursor + 1);
        self.generations[self.cursor] = grid;
        self.current()
    }

    fn push(&mut self, grid: Grid) {
        if self.generations.len() == self.capacity {
            self.generations.pop_front();
            self.cursor = self.cursor.saturating_sub(1);
            debug!(capacity = self.capacity, "evicted oldest generation");
        }
        self.generations.push_back(grid);
        self.cursor = self.generations.len() - 1;
    }

    /// Number of retained generations.
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    /// Always `false`: a history holds at least the current generation.
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    /// Position of the current generation, 0 being the oldest retained.
    pub fn index(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Changes the capacity (at least 1). When shrinking, the oldest
    /// generations go first; stored future generations are dropped only once
    /// everything before the cursor is gone.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.generations.len() > self.capacity && self.cursor > 0 {
            self.generations.pop_front();
            self.cursor -= 1;
        }
        self.generations.truncate(self.capacity);
    }

    /// Number of generations stored ahead of the cursor.
    pub fn replayable(&self) -> usize {
        self.generations.len() - 1 - self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blinker() -> Grid {
        Grid::with_alive(5, 5, &[(2, 1), (2, 2), (2, 3)])
    }

    fn glider() -> Grid {
        Grid::with_alive(12, 12, &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)])
    }

    #[test]
    fn starts_at_initial_generation() {
        let history = HistoryBuffer::new(blinker(), 10);
        assert_eq!(history.current(), &blinker());
        assert_eq!((history.len(), history.index()), (1, 0));
        assert!(!history.is_empty());
    }

    #[test]
    fn rollback_at_oldest_is_refused() {
        let mut history = HistoryBuffer::new(blinker(), 10);
        assert!(!history.rollback());
        assert_eq!(history.index(), 0);
    }

    #[test]
    fn step_then_rollback_restores_previous() {
        let rules = RuleSet::conway();
        let mut history = HistoryBuffer::new(blinker(), 10);
        let next = history.step(false, &rules).clone();
        assert_ne!(next, blinker());
        assert!(history.rollback());
        assert_eq!(history.current(), &blinker());
        assert_eq!(history.replayable(), 1);
    }

    #[test]
    fn replay_returns_stored_generation() {
        // A replayed step must not recompute: stepping under a rule that
        // would kill everything still returns the stored generation.
        let mut history = HistoryBuffer::new(glider(), 10);
        let first = history.step(false, &RuleSet::conway()).clone();
        assert!(history.rollback());
        let replayed = history.step(false, &RuleSet::seeds()).clone();
        assert_eq!(replayed, first);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn capacity_evicts_oldest() {
        let rules = RuleSet::conway();
        let mut expected = glider();
        for _ in 0..10 {
            expected = expected.next_generation(&rules, false);
        }

        let mut history = HistoryBuffer::new(glider(), 5);
        for _ in 0..10 {
            history.step(false, &rules);
        }
        assert_eq!(history.len(), 5);
        assert_eq!(history.current(), &expected);

        let mut rollbacks = 0;
        while history.rollback() {
            rollbacks += 1;
        }
        assert_eq!(rollbacks, 4);
    }

    #[test]
    fn reset_discards_everything() {
        let rules = RuleSet::conway();
        let mut history = HistoryBuffer::new(glider(), 10);
        history.step(true, &rules);
        history.step(true, &rules);
        history.reset(blinker());
        assert_eq!((history.len(), history.index()), (1, 0));
        assert_eq!(history.current(), &blinker());
    }

    #[test]
    fn replace_current_drops_future_generations() {
        let rules = RuleSet::conway();
        let mut history = HistoryBuffer::new(glider(), 10);
        history.step(false, &rules);
        history.step(false, &rules);
        history.rollback();

        let edited = Grid::with_alive(12, 12, &[(5, 5)]);
        history.replace_current(edited.clone());
        assert_eq!((history.len(), history.index()), (2, 1));
        assert_eq!(history.current(), &edited);
        assert_eq!(history.replayable(), 0);
        assert!(history.rollback());
        assert_eq!(history.current(), &glider());
    }

    #[test]
    fn shrinking_keeps_the_cursor_generation() {
        let rules = RuleSet::conway();
        let mut history = HistoryBuffer::new(glider(), 10);
        for _ in 0..6 {
            history.step(false, &rules);
        }
        history.rollback();
        history.rollback();
        let current = history.current().clone();

        history.set_capacity(3);
        assert_eq!(history.len(), 3);
        assert_eq!(history.current(), &current);
        assert_eq!(history.index(), 0);

        history.set_capacity(0);
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), &current);
    }
}
