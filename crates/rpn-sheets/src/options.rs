//! Read, write and calculation options

/// Options for reading a sheet
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Strip trailing whitespace (including `\r`) from every line
    pub trim_lines: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self { trim_lines: true }
    }
}

/// Options for writing calculated values
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Digits after the decimal point (default: 5)
    pub precision: usize,
    /// Line terminator
    pub line_terminator: LineTerminator,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            precision: 5,
            line_terminator: LineTerminator::LF,
        }
    }
}

/// Line terminator type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTerminator {
    /// Unix-style (LF)
    LF,
    /// Windows-style (CRLF)
    CRLF,
}

impl LineTerminator {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineTerminator::LF => "\n",
            LineTerminator::CRLF => "\r\n",
        }
    }
}

/// Options for sheet calculation
#[derive(Debug, Clone, Default)]
pub struct CalculationOptions {
    /// How cells are scheduled
    pub order: CalculationOrder,
}

/// Scheduling of cell calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalculationOrder {
    /// One cell after another, row by row
    #[default]
    RowMajor,
    /// Cells are spread over a rayon thread pool; a failure is still reported
    /// for the first failing cell in row-major order
    Parallel {
        /// Pool size (0: rayon's default, one thread per logical CPU)
        threads: usize,
    },
}
