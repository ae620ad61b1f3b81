// record.rs - Named pattern records and the `.rle` file layout

use serde::{Deserialize, Serialize};

use crate::error::{PatternError, RleError, RuleError};
use crate::grid::Grid;
use crate::rle;
use crate::rules::RuleSet;

/// Longest body line written by [`MatrixData::to_rle_file`].
const LINE_WIDTH: usize = 70;

/// A saved pattern: title, dimensions, RLE body and optional rule.
///
/// Records are plain data handed to and from pattern storage. The engine
/// turns them into grids with [`MatrixData::to_grid`] and never keeps them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixData {
    title: String,
    rows: usize,
    cols: usize,
    rle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rule: Option<String>,
}

impl MatrixData {
    pub fn new(title: impl Into<String>, rows: usize, cols: usize, rle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows,
            cols,
            rle: rle.into(),
            rule: None,
        }
    }

    /// Captures `grid` under the default title `CellMatrix_(<rows>x<cols>)`.
    pub fn from_grid(grid: &Grid) -> Self {
        Self::new(
            default_title(grid.rows(), grid.cols()),
            grid.rows(),
            grid.cols(),
            rle::encode(grid),
        )
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_rule(mut self, rule: &RuleSet) -> Self {
        self.rule = Some(rule.to_string());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// `(rows, cols)` of the grid the body decodes into.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rle(&self) -> &str {
        &self.rle
    }

    /// The rule string as stored, if any.
    pub fn rule(&self) -> Option<&str> {
        self.rule.as_deref()
    }

    /// The stored rule parsed, falling back to B3/S23 when none is stored.
    pub fn rule_set(&self) -> Result<RuleSet, RuleError> {
        self.rule.as_deref().map_or(Ok(RuleSet::default()), RuleSet::parse)
    }

    /// Decodes the body into a grid of the recorded dimensions.
    pub fn to_grid(&self) -> Result<Grid, RleError> {
        rle::decode(&self.rle, self.rows, self.cols)
    }

    /// Renders the record in `.rle` file layout: a `#N` title comment, the
    /// `x = .., y = .., rule = ..` header, then the body wrapped at 70
    /// characters.
    pub fn to_rle_file(&self) -> String {
        let rule = self.rule.clone().unwrap_or_else(|| RuleSet::default().to_string());
        let mut out = format!(
            "#N {}\nx = {}, y = {}, rule = {}\n",
            self.title, self.rows, self.cols, rule
        );
        let body: Vec<char> = self.rle.chars().collect();
        for line in body.chunks(LINE_WIDTH) {
            out.extend(line);
            out.push('\n');
        }
        out
    }

    /// Parses the `.rle` file layout.
    ///
    /// `#N` gives the title and other `#` lines are skipped. The header's
    /// first two comma-separated parts give the dimensions (`x` cells per
    /// body line, `y` body lines) and the last word of the third part the
    /// rule. Every other line is concatenated into the body.
    pub fn from_rle_file(text: &str) -> Result<Self, PatternError> {
        let mut title = None;
        let mut header = None;
        let mut body = String::new();

        for line in text.lines().map(str::trim) {
            if let Some(name) = line.strip_prefix("#N") {
                title = Some(name.trim().to_string());
            } else if line.starts_with('#') {
                continue;
            } else if line.contains('=') {
                header = Some(parse_header(line)?);
            } else {
                body.push_str(line);
            }
        }

        let (rows, cols, rule) = header.ok_or(PatternError::MissingHeader)?;
        if rows == 0 || cols == 0 {
            return Err(PatternError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            title: title.unwrap_or_else(|| default_title(rows, cols)),
            rows,
            cols,
            rle: body,
            rule,
        })
    }

    /// Storage file name: the title without spaces or `/`, lowercased, with
    /// an `.rle` extension.
    pub fn file_name(&self) -> String {
        let stem: String = self
            .title
            .chars()
            .filter(|&c| c != ' ' && c != '/')
            .collect();
        format!("{}.rle", stem.to_lowercase())
    }
}

fn default_title(rows: usize, cols: usize) -> String {
    format!("CellMatrix_({rows}x{cols})")
}

fn parse_header(line: &str) -> Result<(usize, usize, Option<String>), PatternError> {
    let invalid = || PatternError::InvalidHeader(line.to_string());
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() < 2 {
        return Err(invalid());
    }
    let rows = dimension(parts[0]).ok_or_else(invalid)?;
    let cols = dimension(parts[1]).ok_or_else(invalid)?;
    let rule = parts
        .get(2)
        .and_then(|part| part.split_whitespace().last())
        .map(str::to_string);
    Ok((rows, cols, rule))
}

fn dimension(part: &str) -> Option<usize> {
    let digits: String = part.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GLIDER_FILE: &str = "#N Glider\n#C A small spaceship.\nx = 3, y = 3, rule = B3/S23\nbo$2bo$3o!\n";

    #[test]
    fn from_grid_uses_default_title() {
        let grid = Grid::with_alive(4, 6, &[(1, 1)]);
        let record = MatrixData::from_grid(&grid);
        assert_eq!(record.title(), "CellMatrix_(4x6)");
        assert_eq!(record.dimensions(), (4, 6));
        assert_eq!(record.to_grid().unwrap(), grid);
        assert_eq!(record.rule(), None);
    }

    #[test]
    fn parses_file_layout() {
        let record = MatrixData::from_rle_file(GLIDER_FILE).unwrap();
        assert_eq!(record.title(), "Glider");
        assert_eq!(record.dimensions(), (3, 3));
        assert_eq!(record.rule(), Some("B3/S23"));
        assert_eq!(record.rle(), "bo$2bo$3o!");
        assert_eq!(record.to_grid().unwrap().population(), 5);
    }

    #[test]
    fn body_lines_are_joined() {
        let text = "x = 10, y = 2\n5o\n5o$\n10o!\n";
        let record = MatrixData::from_rle_file(text).unwrap();
        assert_eq!(record.rle(), "5o5o$10o!");
        assert_eq!(record.title(), "CellMatrix_(10x2)");
        assert_eq!(record.rule_set().unwrap(), RuleSet::conway());
        assert_eq!(record.to_grid().unwrap().population(), 20);
    }

    #[test]
    fn file_layout_round_trips() {
        let body = format!("{}!", ["3o"; 40].join("$"));
        let record = MatrixData::new("Long Stripes", 3, 40, body).with_rule(&RuleSet::high_life());
        let text = record.to_rle_file();
        assert!(text.lines().skip(2).all(|line| line.len() <= LINE_WIDTH));
        assert_eq!(MatrixData::from_rle_file(&text).unwrap(), record);
    }

    #[test]
    fn header_errors() {
        assert_eq!(
            MatrixData::from_rle_file("#N Nothing\nbo$o!\n"),
            Err(PatternError::MissingHeader)
        );
        assert!(matches!(
            MatrixData::from_rle_file("x = , y = 3\no!"),
            Err(PatternError::InvalidHeader(_))
        ));
        assert_eq!(
            MatrixData::from_rle_file("x = 0, y = 3\n!"),
            Err(PatternError::InvalidDimensions { rows: 0, cols: 3 })
        );
    }

    #[test]
    fn unknown_rule_is_reported_on_use() {
        let record = MatrixData::from_rle_file("x = 3, y = 3, rule = Life\nbo$2bo$3o!").unwrap();
        assert_eq!(record.rule(), Some("Life"));
        assert!(record.rule_set().is_err());
    }

    #[test]
    fn file_name_is_slugged() {
        let record = MatrixData::new("Gosper Glider Gun / p30", 36, 9, "!");
        assert_eq!(record.file_name(), "gosperglidergunp30.rle");
    }
}
