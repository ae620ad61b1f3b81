// rules.rs - Birth/survival rules for two-state automata

use std::fmt;
use std::str::FromStr;

use crate::error::RuleError;

/// Largest neighbor count a Moore neighborhood can produce.
pub const MAX_NEIGHBORS: u8 = 8;

/// Birth and survival neighbor-count sets, parsed once from a rule string
/// such as `B3/S23`.
///
/// Each set is a bitmask: bit `n` set means `n` live neighbors triggers the
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleSet {
    birth: u16,
    survival: u16,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::conway()
    }
}

impl RuleSet {
    /// Builds a rule from explicit neighbor counts. Counts above 8 are ignored.
    pub fn new(birth: &[u8], survival: &[u8]) -> Self {
        Self {
            birth: mask(birth),
            survival: mask(survival),
        }
    }

    /// Conway's Game of Life: B3/S23
    pub fn conway() -> Self {
        Self::new(&[3], &[2, 3])
    }

    /// HighLife: B36/S23
    pub fn high_life() -> Self {
        Self::new(&[3, 6], &[2, 3])
    }

    /// Day & Night: B3678/S34678
    pub fn day_and_night() -> Self {
        Self::new(&[3, 6, 7, 8], &[3, 4, 6, 7, 8])
    }

    /// Seeds: B2/S
    pub fn seeds() -> Self {
        Self::new(&[2], &[])
    }

    /// Life without Death: B3/S012345678
    pub fn life_without_death() -> Self {
        Self::new(&[3], &[0, 1, 2, 3, 4, 5, 6, 7, 8])
    }

    /// Parses `B<digits>/S<digits>` or `S<digits>/B<digits>`.
    ///
    /// The prefix letters may be either case. Every character after a prefix
    /// must be a digit in `0..=8`.
    pub fn parse(spec: &str) -> Result<Self, RuleError> {
        let invalid = |reason| RuleError::InvalidRuleSyntax {
            spec: spec.to_string(),
            reason,
        };

        let trimmed = spec.trim();
        let Some((first, second)) = trimmed.split_once('/') else {
            return Err(invalid("missing '/' separator"));
        };
        if second.contains('/') {
            return Err(invalid("more than one '/' separator"));
        }

        let mut birth = None;
        let mut survival = None;
        for half in [first, second] {
            let mut chars = half.chars();
            let slot = match chars.next().map(|c| c.to_ascii_uppercase()) {
                Some('B') => &mut birth,
                Some('S') => &mut survival,
                _ => return Err(invalid("each half must start with 'B' or 'S'")),
            };
            if slot.is_some() {
                return Err(invalid("the same prefix appears twice"));
            }
            *slot = Some(digits(chars.as_str()).map_err(invalid)?);
        }

        match (birth, survival) {
            (Some(birth), Some(survival)) => Ok(Self { birth, survival }),
            _ => Err(invalid("both a 'B' and an 'S' half are required")),
        }
    }

    /// The full transition law: survival set for live cells, birth set for
    /// dead ones.
    #[inline]
    pub fn next_state(&self, current: bool, live_neighbors: u8) -> bool {
        let set = if current { self.survival } else { self.birth };
        live_neighbors <= MAX_NEIGHBORS && set & (1 << live_neighbors) != 0
    }

    /// Neighbor counts that bring a dead cell to life, ascending.
    pub fn birth(&self) -> Vec<u8> {
        members(self.birth)
    }

    /// Neighbor counts that keep a live cell alive, ascending.
    pub fn survival(&self) -> Vec<u8> {
        members(self.survival)
    }
}

impl FromStr for RuleSet {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("B")?;
        for n in self.birth() {
            write!(f, "{n}")?;
        }
        f.write_str("/S")?;
        for n in self.survival() {
            write!(f, "{n}")?;
        }
        Ok(())
    }
}

fn mask(counts: &[u8]) -> u16 {
    counts
        .iter()
        .filter(|&&n| n <= MAX_NEIGHBORS)
        .fold(0, |acc, &n| acc | (1 << n))
}

fn members(mask: u16) -> Vec<u8> {
    (0..=MAX_NEIGHBORS).filter(|n| mask & (1 << n) != 0).collect()
}

fn digits(s: &str) -> Result<u16, &'static str> {
    let mut set = 0;
    for c in s.chars() {
        let n = c.to_digit(10).ok_or("non-digit after prefix")?;
        if n > MAX_NEIGHBORS as u32 {
            return Err("neighbor count above 8");
        }
        set |= 1 << n;
    }
    Ok(set)
}
