// rle.rs - Run-length encoded pattern bodies
//
// A body is a stream of `<count><tag>` runs, `o` for alive and `b` for dead,
// with the count left out when it is 1. Each line of the stream holds one
// grid column (`y`), walked over its rows (`x`). Lines end with `$` and the
// stream ends with `!`. Trailing dead cells of a line are never written.

use std::fmt::Write;

use crate::error::RleError;
use crate::grid::Grid;

const ALIVE: char = 'o';
const DEAD: char = 'b';
const LINE_END: char = '$';
const TERMINATOR: char = '!';

/// Encodes `grid` as an RLE body, `!` included.
pub fn encode(grid: &Grid) -> String {
    let mut out = String::new();
    for y in 0..grid.cols() {
        if y > 0 {
            out.push(LINE_END);
        }
        // Nothing past the last live cell of the line is written.
        let Some(end) = (0..grid.rows()).rev().find(|&x| grid.is_alive(x, y)) else {
            continue;
        };

        let mut x = 0;
        while x <= end {
            let alive = grid.is_alive(x, y);
            let run = (x..=end).take_while(|&i| grid.is_alive(i, y) == alive).count();
            push_run(&mut out, run, if alive { ALIVE } else { DEAD });
            x += run;
        }
    }
    out.push(TERMINATOR);
    out
}

fn push_run(out: &mut String, run: usize, tag: char) {
    if run > 1 {
        // Writing to a String cannot fail.
        let _ = write!(out, "{run}");
    }
    out.push(tag);
}

/// Decodes an RLE body into a new `rows x cols` grid.
///
/// Decoding stops at the first `!`. Lines may end early; missing cells stay
/// dead. A count before `$` skips that many lines. Any character outside
/// `0-9`, `o`, `b`, `$`, `!` fails with [`RleError::MalformedRle`], reporting
/// the position the cursor reached once the pending run count is applied.
/// Nothing is returned unless the whole body decodes.
pub fn decode(text: &str, rows: usize, cols: usize) -> Result<Grid, RleError> {
    if rows == 0 || cols == 0 {
        return Err(RleError::InvalidDimensions { rows, cols });
    }

    let mut grid = Grid::new(rows, cols);
    let (mut x, mut y) = (0usize, 0usize);
    let mut count: Option<usize> = None;

    for ch in text.chars() {
        match ch {
            '0'..='9' => {
                let digit = ch as usize - '0' as usize;
                count = Some(count.unwrap_or(0).saturating_mul(10).saturating_add(digit));
            }
            ALIVE | DEAD => {
                let run = count.take().unwrap_or(1);
                if run == 0 {
                    continue;
                }
                if y >= cols || x.saturating_add(run) > rows {
                    return Err(RleError::RunOutOfBounds { count: run, x, y });
                }
                if ch == ALIVE {
                    for i in x..x + run {
                        grid.set(i, y, true);
                    }
                }
                x += run;
            }
            LINE_END => {
                y = y.saturating_add(count.take().unwrap_or(1));
                x = 0;
            }
            TERMINATOR => return Ok(grid),
            other => {
                return Err(RleError::MalformedRle {
                    ch: other,
                    x: x.saturating_add(count.unwrap_or(0)),
                    y,
                });
            }
        }
    }
    Err(RleError::MissingTerminator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_round_trip(rle: &str) {
        let grid = decode(rle, 10, 10).unwrap();
        assert_eq!(encode(&grid), rle);
    }

    #[test]
    fn blank_grid() {
        let grid = decode("$$$$$$$$$!", 10, 10).unwrap();
        assert_eq!(grid, Grid::new(10, 10));
        assert_eq!(encode(&grid), "$$$$$$$$$!");
    }

    #[test]
    fn filled_grid() {
        let rle = "10o$10o$10o$10o$10o$10o$10o$10o$10o$10o!";
        let grid = decode(rle, 10, 10).unwrap();
        assert_eq!(grid.population(), 100);
        assert_eq!(encode(&grid), rle);
    }

    #[test]
    fn reference_shapes_round_trip() {
        assert_round_trip("o8bo$bo6bo$2bo4bo$3bo2bo$4b2o$4b2o$3bo2bo$2bo4bo$bo6bo$o8bo!");
        assert_round_trip("10o$o8bo$o8bo$o8bo$o8bo$o8bo$o8bo$o8bo$o8bo$10o!");
        assert_round_trip("3o$4o$5o$b5o$2b5o$3b5o$4b5o$5b5o$6b4o$7b3o!");
        assert_round_trip("10o$$10o$$10o$$10o$$10o$!");
        assert_round_trip(
            "bobobobobo$bobobobobo$bobobobobo$bobobobobo$bobobobobo$bobobobobo$bobobobobo$bobobobobo$bobobobobo$bobobobobo!",
        );
    }

    #[test]
    fn lines_are_columns() {
        // First line is column 0, walked down the rows.
        let grid = decode("bo$2o!", 3, 2).unwrap();
        assert_eq!(grid, Grid::with_alive(3, 2, &[(1, 0), (0, 1), (1, 1)]));
        assert_eq!(encode(&grid), "bo$2o!");
    }

    #[test]
    fn trailing_dead_cells_are_dropped() {
        let grid = Grid::with_alive(5, 2, &[(1, 0)]);
        assert_eq!(encode(&grid), "bo$!");
        assert_eq!(decode("bo3b$!", 5, 2).unwrap(), grid);
    }

    #[test]
    fn counted_line_end_skips_lines() {
        let grid = decode("o2$o!", 3, 3).unwrap();
        assert_eq!(grid, Grid::with_alive(3, 3, &[(0, 0), (0, 2)]));
    }

    #[test]
    fn text_after_terminator_is_ignored() {
        assert_eq!(decode("o!zzz", 2, 2).unwrap(), Grid::with_alive(2, 2, &[(0, 0)]));
    }

    #[test]
    fn malformed_character_reports_position() {
        assert_eq!(
            decode("3z$!", 10, 10),
            Err(RleError::MalformedRle { ch: 'z', x: 3, y: 0 })
        );
        assert_eq!(
            decode("2o$bq!", 10, 10),
            Err(RleError::MalformedRle { ch: 'q', x: 1, y: 1 })
        );
    }

    #[test]
    fn runs_must_stay_inside_the_grid() {
        assert_eq!(
            decode("11o!", 10, 10),
            Err(RleError::RunOutOfBounds { count: 11, x: 0, y: 0 })
        );
        assert_eq!(
            decode("$$o!", 2, 2),
            Err(RleError::RunOutOfBounds { count: 1, x: 0, y: 2 })
        );
    }

    #[test]
    fn missing_terminator_fails() {
        assert_eq!(decode("3o$o", 4, 4), Err(RleError::MissingTerminator));
    }

    #[test]
    fn empty_dimensions_fail() {
        assert_eq!(
            decode("!", 0, 4),
            Err(RleError::InvalidDimensions { rows: 0, cols: 4 })
        );
    }
}
