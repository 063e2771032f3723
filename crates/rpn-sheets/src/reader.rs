//! Sheet reader
//!
//! Input format: a header line `"<width> <height>"`, followed by exactly
//! `width * height` lines, one formula per cell in row-major order.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use rpn_sheets_core::GridSize;
use rpn_sheets_formula::Grid;

use crate::error::{SheetError, SheetResult};
use crate::options::ReadOptions;

/// Sheet file reader
pub struct SheetReader;

impl SheetReader {
    /// Read a sheet file into a grid
    pub fn read_file<P: AsRef<Path>>(path: P, options: &ReadOptions) -> SheetResult<Grid> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read a sheet from a reader into a grid
    pub fn read<R: Read>(reader: R, options: &ReadOptions) -> SheetResult<Grid> {
        let lines = BufReader::new(reader)
            .lines()
            .map(|line| line.map_err(SheetError::from));
        Self::build(lines, options)
    }

    /// Build a grid from already split lines, header first
    pub fn from_lines<I, S>(lines: I, options: &ReadOptions) -> SheetResult<Grid>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(lines.into_iter().map(|line| Ok(line.into())), options)
    }

    /// Parse the `"<width> <height>"` header line
    pub fn parse_header(line: &str) -> SheetResult<GridSize> {
        let invalid = || SheetError::malformed(format!("Invalid spreadsheet header format: {}", line));

        let caps = header_re().captures(line).ok_or_else(invalid)?;
        let width: usize = caps["width"].parse().map_err(|_| invalid())?;
        let height: usize = caps["height"].parse().map_err(|_| invalid())?;

        GridSize::new(width, height).map_err(|e| SheetError::malformed(e.to_string()))
    }

    fn build<I>(mut lines: I, options: &ReadOptions) -> SheetResult<Grid>
    where
        I: Iterator<Item = SheetResult<String>>,
    {
        let header = lines
            .next()
            .transpose()?
            .ok_or_else(|| SheetError::malformed("Missing spreadsheet header"))?;
        let size = Self::parse_header(clean(&header, options))?;

        let mut grid = Grid::new(size);
        let expected = size.cell_count();
        let mut cells = size.addresses();
        let mut count = 0usize;

        for line in lines {
            let line = line?;
            let Some(addr) = cells.next() else {
                return Err(SheetError::malformed(format!(
                    "Input table is of incorrect size. Must be: {} cells, but got more",
                    expected
                )));
            };

            grid.set_formula(addr.row, addr.col, clean(&line, options))
                .map_err(|e| SheetError::cell(addr.row, addr.col, e))?;
            count += 1;
        }

        if count != expected {
            return Err(SheetError::malformed(format!(
                "Input table is of incorrect size. Must be: {} cells, but got: {}",
                expected, count
            )));
        }

        tracing::info!(
            width = size.width(),
            height = size.height(),
            "spreadsheet loaded"
        );
        Ok(grid)
    }
}

fn clean<'a>(line: &'a str, options: &ReadOptions) -> &'a str {
    if options.trim_lines {
        line.trim_end()
    } else {
        line
    }
}

fn header_re() -> &'static Regex {
    static HEADER_RE: OnceLock<Regex> = OnceLock::new();
    HEADER_RE.get_or_init(|| {
        Regex::new(r"^(?<width>\d+)\s+(?<height>\d+)$").expect("header regex must compile")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn read(lines: &[&str]) -> SheetResult<Grid> {
        SheetReader::from_lines(lines.iter().copied(), &ReadOptions::default())
    }

    #[test]
    fn test_input_header() {
        let size = SheetReader::parse_header("3 2").unwrap();
        assert_eq!(size.width(), 3);
        assert_eq!(size.height(), 2);

        let size = SheetReader::parse_header("10 \t 4").unwrap();
        assert_eq!((size.width(), size.height()), (10, 4));
    }

    #[test]
    fn test_invalid_header() {
        for header in ["", "3", "3 2 1", "3,2", "x 2", " 3 2", "0 2", "2 27"] {
            assert!(
                matches!(
                    SheetReader::parse_header(header),
                    Err(SheetError::MalformedInput(_))
                ),
                "header {:?} should be rejected",
                header
            );
        }
    }

    #[test]
    fn test_build_from_input() {
        let grid = read(&["3 2", "1", "2", "3", "4", "5", "6"]).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.calc(0, 0).unwrap(), 1.0);
        assert_eq!(grid.calc(0, 2).unwrap(), 3.0);
        assert_eq!(grid.calc(1, 0).unwrap(), 4.0);
        assert_eq!(grid.calc(1, 2).unwrap(), 6.0);
    }

    #[test]
    fn test_input_non_complete() {
        let err = read(&["3 2", "1", "2", "3", "4", "5"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed input: Input table is of incorrect size. Must be: 6 cells, but got: 5"
        );
    }

    #[test]
    fn test_input_too_long() {
        assert!(matches!(
            read(&["1 1", "1", "2"]),
            Err(SheetError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(read(&[]), Err(SheetError::MalformedInput(_))));
    }

    #[test]
    fn test_invalid_formula_names_cell() {
        let err = read(&["2 1", "1", "1.5"]).unwrap_err();
        assert_eq!(err.to_string(), "Error in cell A2: Invalid formula: 1.5");
    }

    #[test]
    fn test_crlf_lines() {
        let input = "2 1\r\n7\r\nA1 1 +\r\n";
        let grid = SheetReader::read(input.as_bytes(), &ReadOptions::default()).unwrap();
        assert_eq!(grid.calc(0, 1).unwrap(), 8.0);

        let strict = ReadOptions { trim_lines: false };
        assert!(SheetReader::read(input.as_bytes(), &strict).is_err());
    }
}
