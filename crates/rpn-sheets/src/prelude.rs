//! Prelude module - common imports for rpn-sheets users
//!
//! ```rust
//! use rpn_sheets::prelude::*;
//! ```

pub use crate::{
    // Calculation types
    Calculation,
    CalculationOptions,
    CalculationOrder,
    CalculationStats,
    CellAddress,
    // Error types
    FormulaError,
    // Main types
    Formula,
    Grid,
    // Extension traits
    GridCalculationExt,
    GridSize,

    ReadOptions,
    SheetError,
    SheetResult,

    // I/O types
    SheetReader,
    SheetWriter,
    WriteOptions,
};
