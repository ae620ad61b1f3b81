// patterns.rs - Built-in starter patterns

use crate::error::RleError;
use crate::grid::Grid;
use crate::record::MatrixData;
use crate::rle;

/// A named pattern stored as an RLE body. `rows` is the length of a body
/// line and `cols` the number of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub rows: usize,
    pub cols: usize,
    pub rle: &'static str,
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        rows: 3,
        cols: 3,
        rle: "bo$2bo$3o!",
    },
    Pattern {
        name: "Blinker",
        rows: 3,
        cols: 1,
        rle: "3o!",
    },
    Pattern {
        name: "Toad",
        rows: 4,
        cols: 2,
        rle: "b3o$3o!",
    },
    Pattern {
        name: "Beacon",
        rows: 4,
        cols: 4,
        rle: "2o$2o$2b2o$2b2o!",
    },
    Pattern {
        name: "Pulsar",
        rows: 13,
        cols: 13,
        rle: "2b3o3b3o2b2$o4bobo4bo$o4bobo4bo$o4bobo4bo$2b3o3b3o2b2$2b3o3b3o2b$o4bobo4bo$o4bobo4bo$o4bobo4bo2$2b3o3b3o!",
    },
    Pattern {
        name: "R-pentomino",
        rows: 3,
        cols: 3,
        rle: "b2o$2o$bo!",
    },
    Pattern {
        name: "Gosper Glider Gun",
        rows: 36,
        cols: 9,
        rle: "24bo$22bobo$12b2o6b2o12b2o$11bo3bo4b2o12b2o$2o8bo5bo3b2o$2o8bo3bob2o4bobo$10bo5bo7bo$11bo3bo$12b2o!",
    },
];

impl Pattern {
    pub fn grid(&self) -> Result<Grid, RleError> {
        rle::decode(self.rle, self.rows, self.cols)
    }

    pub fn record(&self) -> MatrixData {
        MatrixData::new(self.name, self.rows, self.cols, self.rle)
    }
}

/// Looks a pattern up by name, ignoring case.
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
