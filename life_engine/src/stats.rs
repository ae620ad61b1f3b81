// stats.rs - Population statistics over a run

/// Consecutive flat updates after which the population counts as settled.
pub const EQUILIBRIUM_UPDATES: u32 = 5;

/// Population samples collected tick by tick since the last reset.
#[derive(Debug, Clone, Default)]
pub struct PopulationStats {
    samples: Vec<(u64, usize)>,
    area: usize,
    max: usize,
    min: usize,
    flat_since: Option<u64>,
    flat_updates: u32,
}

impl PopulationStats {
    /// Starts a fresh record at tick 0.
    pub fn new(population: usize, area: usize) -> Self {
        let mut stats = Self::default();
        stats.reset(population, area);
        stats
    }

    /// Drops all samples and starts over at tick 0 with `population` live
    /// cells out of `area`.
    pub fn reset(&mut self, population: usize, area: usize) {
        self.samples.clear();
        self.area = area;
        self.max = population;
        self.min = population;
        self.flat_since = None;
        self.flat_updates = 0;
        self.record(0, population);
    }

    /// Records the population at `tick`. A tick at or before the newest
    /// sample (after a rollback) discards the samples it supersedes.
    pub fn record(&mut self, tick: u64, population: usize) {
        while self.samples.last().is_some_and(|&(t, _)| t >= tick) {
            self.samples.pop();
        }
        self.samples.push((tick, population));
        self.max = self.max.max(population);
        self.min = self.min.min(population);

        match self.instantaneous_slope() {
            Some(slope) if slope == 0.0 => {
                if self.flat_since.is_none() {
                    self.flat_since = self.samples.iter().rev().nth(1).map(|&(t, _)| t);
                }
                self.flat_updates += 1;
            }
            Some(_) => {
                self.flat_since = None;
                self.flat_updates = 0;
            }
            None => {}
        }
    }

    /// Population at the newest sample.
    pub fn population(&self) -> usize {
        self.samples.last().map_or(0, |&(_, p)| p)
    }

    /// Number of cells in the grid being observed.
    pub fn area(&self) -> usize {
        self.area
    }

    /// Highest population seen since the last reset.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Lowest population seen since the last reset.
    pub fn min(&self) -> usize {
        self.min
    }

    /// `(tick, population)` samples, oldest first.
    pub fn samples(&self) -> &[(u64, usize)] {
        &self.samples
    }

    /// Cells gained per tick across the whole record.
    pub fn average_slope(&self) -> Option<f64> {
        match self.samples.as_slice() {
            [first, .., last] => slope(*first, *last),
            _ => None,
        }
    }

    /// Cells gained per tick over the last two samples.
    pub fn instantaneous_slope(&self) -> Option<f64> {
        match self.samples.as_slice() {
            [.., prev, last] => slope(*prev, *last),
            _ => None,
        }
    }

    /// `(tick, population)` where the population stopped changing, once it
    /// has stayed flat for more than [`EQUILIBRIUM_UPDATES`] updates.
    pub fn equilibrium(&self) -> Option<(u64, usize)> {
        if self.flat_updates <= EQUILIBRIUM_UPDATES {
            return None;
        }
        self.flat_since.map(|tick| (tick, self.population()))
    }
}

fn slope((t0, p0): (u64, usize), (t1, p1): (u64, usize)) -> Option<f64> {
    if t1 == t0 {
        return None;
    }
    Some((p1 as f64 - p0 as f64) / (t1 as f64 - t0 as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_extremes_and_slopes() {
        let mut stats = PopulationStats::new(10, 100);
        stats.record(1, 14);
        stats.record(2, 6);
        assert_eq!((stats.max(), stats.min()), (14, 6));
        assert_eq!(stats.average_slope(), Some(-2.0));
        assert_eq!(stats.instantaneous_slope(), Some(-8.0));
        assert_eq!(stats.area(), 100);
    }

    #[test]
    fn slopes_need_two_samples() {
        let stats = PopulationStats::new(3, 9);
        assert_eq!(stats.average_slope(), None);
        assert_eq!(stats.instantaneous_slope(), None);
        assert_eq!(stats.population(), 3);
    }

    #[test]
    fn regressed_tick_replaces_newer_samples() {
        let mut stats = PopulationStats::new(5, 25);
        stats.record(1, 7);
        stats.record(2, 9);
        stats.record(1, 7);
        assert_eq!(stats.samples(), &[(0, 5), (1, 7)]);
        assert_eq!(stats.population(), 7);
        // Extremes are absolute since reset.
        assert_eq!(stats.max(), 9);
    }

    #[test]
    fn equilibrium_after_a_flat_run() {
        let mut stats = PopulationStats::new(20, 400);
        stats.record(1, 12);
        for tick in 2..=6 {
            stats.record(tick, 12);
        }
        assert_eq!(stats.equilibrium(), None);
        stats.record(7, 12);
        assert_eq!(stats.equilibrium(), Some((1, 12)));

        stats.record(8, 13);
        assert_eq!(stats.equilibrium(), None);
    }

    #[test]
    fn reset_clears_samples() {
        let mut stats = PopulationStats::new(1, 4);
        stats.record(1, 2);
        stats.reset(3, 9);
        assert_eq!(stats.samples(), &[(0, 3)]);
        assert_eq!((stats.max(), stats.min()), (3, 3));
    }
}
