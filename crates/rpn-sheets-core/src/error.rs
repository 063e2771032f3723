//! Error types for rpn-sheets-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in rpn-sheets-core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Grid dimensions that cannot be addressed
    #[error("Invalid grid size {width}x{height}: {reason}")]
    InvalidSize {
        width: usize,
        height: usize,
        reason: &'static str,
    },
}
