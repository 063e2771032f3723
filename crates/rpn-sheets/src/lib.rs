//! # rpn-sheets
//!
//! A small spreadsheet calculator for postfix (RPN) formulas.
//!
//! A sheet has up to 26 rows (`A`..`Z`) and any number of columns. Every cell
//! holds an integer constant or a postfix formula over constants, the binary
//! operators `+ - * /`, the unary operators `++`/`--` and cell references
//! such as `B3`.
//!
//! ## Features
//!
//! - Read the text sheet format (`"<width> <height>"` header, one formula per line)
//! - Calculate every cell with dependency resolution and cycle detection
//! - Row-major or multi-threaded calculation over a shared grid
//! - Write calculated values with fixed precision
//! - Generate random acyclic sheets for load testing
//!
//! ## Example
//!
//! ```rust
//! use rpn_sheets::prelude::*;
//!
//! let input = "3 2\nA2\n4 5 *\nA1\nA1 B2 /\n3\n1 ++\n";
//! let grid = SheetReader::read(input.as_bytes(), &ReadOptions::default())?;
//!
//! let calculation = grid.calculate()?;
//! let output = SheetWriter::write_to_string(&calculation, &WriteOptions::default())?;
//! assert!(output.starts_with("3 2\n20.00000\n20.00000\n20.00000\n6.66667\n"));
//! # Ok::<(), SheetError>(())
//! ```

pub mod calculation;
pub mod error;
pub mod generator;
pub mod options;
pub mod prelude;
pub mod reader;
pub mod writer;

pub use calculation::{Calculation, CalculationStats, GridCalculationExt};
pub use error::{SheetError, SheetResult};
pub use generator::{GeneratorOptions, SheetGenerator};
pub use options::{
    CalculationOptions, CalculationOrder, LineTerminator, ReadOptions, WriteOptions,
};
pub use reader::SheetReader;
pub use writer::SheetWriter;

// Re-export core types
pub use rpn_sheets_core::{cell_name, CellAddress, GridSize, MAX_ROWS};

// Re-export formula types
pub use rpn_sheets_formula::{
    evaluate, tokenize, BinaryOperator, Formula, FormulaError, FormulaResult, Grid, Token,
    UnaryOperator,
};
