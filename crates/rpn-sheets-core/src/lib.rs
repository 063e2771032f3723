//! # rpn-sheets-core
//!
//! Core types shared by the rpn-sheets crates:
//! - [`CellAddress`] - a cell's location (row letter + 1-based column number, e.g. "B3")
//! - [`GridSize`] - fixed grid dimensions with row-major index math
//! - [`cell_name`] - formatting of a (row, column) pair for diagnostics
//!
//! Rows are named by a single uppercase letter, so a grid never has more than
//! [`MAX_ROWS`] rows. Columns are numbered from 1 in text form.
//!
//! ## Example
//!
//! ```rust
//! use rpn_sheets_core::{cell_name, CellAddress, GridSize};
//!
//! let addr = CellAddress::parse("B3").unwrap();
//! assert_eq!((addr.row, addr.col), (1, 2));
//! assert_eq!(cell_name(1, 2), "B3");
//!
//! let size = GridSize::new(3, 2).unwrap();
//! assert_eq!(size.index_of(addr), Some(5));
//! assert_eq!(size.index_of(CellAddress::new(2, 0)), None);
//! ```

pub mod cell;
pub mod error;

pub use cell::{cell_name, CellAddress, GridSize};
pub use error::{Error, Result};

/// Maximum number of rows in a grid (one per letter A-Z)
pub const MAX_ROWS: usize = 26;
