//! Cell address type

use crate::error::{Error, Result};
use crate::MAX_ROWS;
use std::fmt;
use std::str::FromStr;

/// Format a cell position the way references are written.
///
/// The row becomes a letter (`0 -> A`), the column a 1-based number:
/// `(0, 0) -> "A1"`, `(0, 1) -> "A2"`, `(1, 0) -> "B1"`.
pub fn cell_name(row: usize, col: usize) -> String {
    let letter = u32::try_from(row)
        .ok()
        .and_then(|r| char::from_u32('A' as u32 + r))
        .unwrap_or('?');
    format!("{}{}", letter, col as u64 + 1)
}

/// A cell address (e.g., "A1", "C12")
///
/// The letter selects the row and the number selects the column, both 0-based internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    /// Row index (0-based, A=0 ... Z=25)
    pub row: usize,
    /// Column index (0-based internally, 1-based in display)
    pub col: usize,
}

impl CellAddress {
    /// Create a new cell address
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Parse a cell address from reference notation
    ///
    /// # Examples
    /// ```
    /// use rpn_sheets_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("A1").unwrap();
    /// assert_eq!(addr.row, 0);
    /// assert_eq!(addr.col, 0);
    ///
    /// let addr = CellAddress::parse("C12").unwrap();
    /// assert_eq!(addr.row, 2);
    /// assert_eq!(addr.col, 11);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        let Some((&letter, digits)) = bytes.split_first() else {
            return Err(Error::InvalidAddress("empty address".into()));
        };

        if !letter.is_ascii_uppercase() {
            return Err(Error::InvalidAddress(format!("no row letter in '{}'", s)));
        }
        if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
            return Err(Error::InvalidAddress(format!(
                "invalid column number in '{}'",
                s
            )));
        }

        let number: usize = s[1..]
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("column number too large in '{}'", s)))?;

        // Columns are 1-based in text, we use 0-based internally
        if number == 0 {
            return Err(Error::InvalidAddress(format!(
                "column number must be >= 1 in '{}'",
                s
            )));
        }

        let row = (letter - b'A') as usize;
        debug_assert!(row < MAX_ROWS);

        Ok(Self::new(row, number - 1))
    }

    /// Format as reference string
    pub fn to_a1_string(&self) -> String {
        cell_name(self.row, self.col)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_name() {
        assert_eq!(cell_name(0, 0), "A1");
        assert_eq!(cell_name(0, 1), "A2");
        assert_eq!(cell_name(1, 0), "B1");
        assert_eq!(cell_name(25, 99_999), "Z100000");
    }

    #[test]
    fn test_cell_address_parse() {
        let addr = CellAddress::parse("A1").unwrap();
        assert_eq!(addr, CellAddress::new(0, 0));

        let addr = CellAddress::parse("B2").unwrap();
        assert_eq!(addr.row, 1);
        assert_eq!(addr.col, 1);

        let addr = CellAddress::parse("Z100000").unwrap();
        assert_eq!(addr.row, 25);
        assert_eq!(addr.col, 99_999);
    }

    #[test]
    fn test_cell_address_parse_errors() {
        assert!(CellAddress::parse("").is_err());
        assert!(CellAddress::parse("A").is_err());
        assert!(CellAddress::parse("1").is_err());
        assert!(CellAddress::parse("a1").is_err());
        assert!(CellAddress::parse("AA1").is_err());
        assert!(CellAddress::parse("A0").is_err()); // Column 0 is invalid
        assert!(CellAddress::parse("A1x").is_err());
        assert!(CellAddress::parse("A99999999999999999999999").is_err());
    }

    #[test]
    fn test_cell_address_display() {
        assert_eq!(CellAddress::new(0, 0).to_string(), "A1");
        assert_eq!(CellAddress::new(2, 99).to_string(), "C100");
        assert_eq!("D7".parse::<CellAddress>().unwrap().to_string(), "D7");
    }
}
