//! Whole-sheet calculation
//!
//! Evaluates every cell of a [`Grid`] and collects the values in row-major
//! order. The first failing cell (in row-major order) aborts the calculation.
//!
//! # Example
//!
//! ```rust
//! use rpn_sheets::prelude::*;
//!
//! let grid = SheetReader::from_lines(["2 1", "4", "A1 2 /"], &ReadOptions::default())?;
//! let calculation = grid.calculate()?;
//!
//! assert_eq!(calculation.values(), &[4.0, 2.0]);
//! println!("Calculated {} cells", calculation.stats().cells_calculated);
//! # Ok::<(), SheetError>(())
//! ```

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use rpn_sheets_core::{CellAddress, GridSize};
use rpn_sheets_formula::Grid;

use crate::error::{SheetError, SheetResult};
use crate::options::{CalculationOptions, CalculationOrder};

/// Statistics from a calculation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculationStats {
    /// Number of cells calculated
    pub cells_calculated: usize,
    /// Number of cells whose formula references other cells
    pub reference_cells: usize,
}

/// Values of a fully calculated sheet
#[derive(Debug, Clone)]
pub struct Calculation {
    size: GridSize,
    values: Vec<f64>,
    stats: CalculationStats,
}

impl Calculation {
    /// Dimensions of the calculated sheet
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// All values in row-major order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value of a single cell
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        let index = self.size.index_of(CellAddress::new(row, col))?;
        self.values.get(index).copied()
    }

    /// Values grouped by row
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.size.width())
    }

    /// Calculation statistics
    pub fn stats(&self) -> &CalculationStats {
        &self.stats
    }
}

/// Extension trait for Grid to add whole-sheet calculation
pub trait GridCalculationExt {
    /// Calculate every cell with default options
    fn calculate(&self) -> SheetResult<Calculation>;

    /// Calculate every cell with custom options
    fn calculate_with_options(&self, options: &CalculationOptions) -> SheetResult<Calculation>;
}

impl GridCalculationExt for Grid {
    fn calculate(&self) -> SheetResult<Calculation> {
        self.calculate_with_options(&CalculationOptions::default())
    }

    fn calculate_with_options(&self, options: &CalculationOptions) -> SheetResult<Calculation> {
        if let CalculationOrder::Parallel { threads } = options.order {
            warm_up(self, threads)?;
        }

        // Values computed by the workers are memoized, so this pass only
        // collects them and pins the first failure to its cell.
        calculate_row_major(self)
    }
}

fn calculate_row_major(grid: &Grid) -> SheetResult<Calculation> {
    let size = grid.size();
    let mut values = Vec::with_capacity(size.cell_count());
    let mut stats = CalculationStats::default();

    for addr in size.addresses() {
        let value = grid
            .calc(addr.row, addr.col)
            .map_err(|e| SheetError::cell(addr.row, addr.col, e))?;
        values.push(value);

        stats.cells_calculated += 1;
        if grid
            .get_formula(addr.row, addr.col)
            .is_some_and(|f| f.has_dependencies())
        {
            stats.reference_cells += 1;
        }
    }

    tracing::info!(
        cells = stats.cells_calculated,
        reference_cells = stats.reference_cells,
        "sheet calculated"
    );

    Ok(Calculation {
        size,
        values,
        stats,
    })
}

/// Evaluate cells on a rayon pool (`threads == 0`: rayon's default size).
/// The first failure stops the remaining work; the row-major pass that
/// follows reports it.
fn warm_up(grid: &Grid, threads: usize) -> SheetResult<()> {
    let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
    let size = grid.size();

    tracing::debug!(
        threads = pool.current_num_threads(),
        "calculating in parallel"
    );

    let warmed = pool.install(|| {
        (0..size.cell_count()).into_par_iter().try_for_each(|index| {
            let (row, col) = (index / size.width(), index % size.width());
            grid.calc(row, col).map(|_| ())
        })
    });
    if warmed.is_err() {
        tracing::debug!("parallel calculation stopped at a failing cell");
    }

    Ok(())
}
