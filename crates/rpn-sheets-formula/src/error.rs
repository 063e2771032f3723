//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during formula tokenizing, resolution or evaluation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// Formula text violates the token grammar
    #[error("Invalid formula: {formula}")]
    Tokenize { formula: String, position: usize },

    /// Operator evaluated with too few operands
    #[error("Insufficient operands for '{operator}'")]
    Arity { operator: String },

    /// Tokens left over after the root token was evaluated
    #[error("Formula has incorrect order or missed operator: {formula}")]
    ExtraTokens { formula: String, remaining: usize },

    /// Reference to a cell outside of the grid
    #[error("Invalid cell reference: {reference}")]
    ReferenceOutOfBounds { reference: String },

    /// Direct or indirect self-reference
    #[error("Cyclic dependency detected involving {}", .cells.join(", "))]
    CyclicDependency { cells: Vec<String> },

    /// Formula with references evaluated without a grid
    #[error("Cell reference {reference} requires a grid to evaluate")]
    GridRequired { reference: String },

    /// Reference to a cell that holds no formula
    #[error("Cell {cell} is empty")]
    EmptyCell { cell: String },

    /// Attempt to install a formula into a cell that already has one
    #[error("Cell {cell} already has a formula")]
    CellOccupied { cell: String },

    /// Grid access outside of its dimensions
    #[error("Cell {cell} is outside of the grid")]
    CellOutOfBounds { cell: String },
}

impl FormulaError {
    pub(crate) fn tokenize(formula: &str, position: usize) -> Self {
        FormulaError::Tokenize {
            formula: formula.to_string(),
            position,
        }
    }
}
