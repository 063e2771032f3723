//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`GridSize`] - The fixed dimensions of a grid and its row-major indexing

mod address;
mod size;

pub use address::{cell_name, CellAddress};
pub use size::{Addresses, GridSize};
