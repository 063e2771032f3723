//! # rpn-sheets-formula
//!
//! Postfix formula engine for rpn-sheets.
//!
//! This crate provides:
//! - Formula tokenizing (text → postfix tokens)
//! - Formula evaluation (tokens → value) as a right-to-left stack machine
//! - The [`Grid`] owning one [`Formula`] per cell
//! - Dependency resolution with cycle detection
//!
//! ## Example
//!
//! ```rust
//! use rpn_sheets_core::GridSize;
//! use rpn_sheets_formula::{Formula, Grid};
//!
//! assert_eq!(Formula::parse("3 -- 5 + ++")?.evaluate_standalone()?, 8.0);
//!
//! let mut grid = Grid::new(GridSize::new(2, 2)?);
//! grid.set_formula(0, 0, "A2 B2 +")?;
//! grid.set_formula(0, 1, "B1 B2 +")?;
//! grid.set_formula(1, 0, "B2 B2 +")?;
//! grid.set_formula(1, 1, "1")?;
//! assert_eq!(grid.calc(0, 0)?, 4.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod dependency;
pub mod error;
pub mod evaluator;
pub mod formula;
pub mod grid;
pub mod token;
pub mod tokenizer;

pub use dependency::{evaluation_order, resolve};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, CellLookup, TokenStack};
pub use formula::Formula;
pub use grid::Grid;
pub use token::{BinaryOperator, Token, UnaryOperator};
pub use tokenizer::tokenize;
