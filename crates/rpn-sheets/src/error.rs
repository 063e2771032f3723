//! Sheet-level error types

use rpn_sheets_formula::FormulaError;
use thiserror::Error;

/// Result type for sheet operations
pub type SheetResult<T> = std::result::Result<T, SheetError>;

/// Errors that can occur while loading, calculating or writing a sheet
#[derive(Debug, Error)]
pub enum SheetError {
    /// Header or cell count does not match the input format
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Invalid sheet dimensions or cell address
    #[error(transparent)]
    Core(#[from] rpn_sheets_core::Error),

    /// Worker pool for parallel calculation could not be started
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Formula failure pinned to the cell it happened in
    #[error("Error in cell {cell}: {source}")]
    Cell {
        cell: String,
        #[source]
        source: FormulaError,
    },
}

impl SheetError {
    pub(crate) fn malformed<S: Into<String>>(msg: S) -> Self {
        SheetError::MalformedInput(msg.into())
    }

    pub(crate) fn cell(row: usize, col: usize, source: FormulaError) -> Self {
        SheetError::Cell {
            cell: rpn_sheets_core::cell_name(row, col),
            source,
        }
    }

    /// Underlying formula error, if any
    pub fn formula_error(&self) -> Option<&FormulaError> {
        match self {
            SheetError::Cell { source, .. } => Some(source),
            _ => None,
        }
    }
}
