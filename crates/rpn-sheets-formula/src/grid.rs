//! Grid of formula cells

use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::CellLookup;
use crate::formula::Formula;
use rpn_sheets_core::{cell_name, CellAddress, GridSize};

/// Fixed-size grid owning one optional [`Formula`] per cell.
///
/// Cells are written once during loading and evaluated lazily. The grid is
/// `Sync`: concurrent calculations share memoized values and each cell is
/// evaluated at most once.
///
/// # Example
/// ```rust
/// use rpn_sheets_core::GridSize;
/// use rpn_sheets_formula::Grid;
///
/// let mut grid = Grid::new(GridSize::new(2, 1).unwrap());
/// grid.set_formula(0, 0, "2").unwrap();
/// grid.set_formula(0, 1, "A1 3 *").unwrap();
/// assert_eq!(grid.calc(0, 1).unwrap(), 6.0);
/// ```
#[derive(Debug)]
pub struct Grid {
    size: GridSize,
    cells: Vec<Option<Formula>>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(size: GridSize) -> Self {
        let mut cells = Vec::with_capacity(size.cell_count());
        cells.resize_with(size.cell_count(), || None);
        Self { size, cells }
    }

    /// Grid dimensions
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.size.width()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.size.height()
    }

    /// Formula stored at a cell, if any
    pub fn get_formula(&self, row: usize, col: usize) -> Option<&Formula> {
        let index = self.size.index_of(CellAddress::new(row, col))?;
        self.cells[index].as_ref()
    }

    /// Parse `text` and install it into an empty cell
    pub fn set_formula(&mut self, row: usize, col: usize, text: &str) -> FormulaResult<()> {
        let addr = CellAddress::new(row, col);
        let index = self.checked_index(addr)?;

        let slot = &mut self.cells[index];
        if slot.is_some() {
            return Err(FormulaError::CellOccupied {
                cell: addr.to_string(),
            });
        }

        *slot = Some(Formula::parse(text)?.with_home(addr));
        Ok(())
    }

    /// Evaluate a cell, resolving everything it references
    pub fn calc(&self, row: usize, col: usize) -> FormulaResult<f64> {
        let index = self.checked_index(CellAddress::new(row, col))?;
        let value = self.formula_at(index)?.evaluate(self)?;
        tracing::trace!(cell = %cell_name(row, col), value, "calculated cell");
        Ok(value)
    }

    /// Formula at a flat row-major index
    pub(crate) fn formula_at(&self, index: usize) -> FormulaResult<&Formula> {
        match self.cells.get(index) {
            Some(Some(formula)) => Ok(formula),
            Some(None) => Err(FormulaError::EmptyCell {
                cell: self.name_of(index),
            }),
            None => Err(FormulaError::CellOutOfBounds {
                cell: self.name_of(index),
            }),
        }
    }

    /// Cell name of a flat index, for diagnostics
    pub(crate) fn name_of(&self, index: usize) -> String {
        cell_name(index / self.width(), index % self.width())
    }

    fn checked_index(&self, addr: CellAddress) -> FormulaResult<usize> {
        self.size
            .index_of(addr)
            .ok_or_else(|| FormulaError::CellOutOfBounds {
                cell: addr.to_string(),
            })
    }
}

impl CellLookup for Grid {
    fn size(&self) -> GridSize {
        self.size
    }

    fn value(&self, addr: CellAddress) -> FormulaResult<f64> {
        self.calc(addr.row, addr.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grid_2x2() -> Grid {
        let mut grid = Grid::new(GridSize::new(2, 2).unwrap());
        for (i, text) in ["1", "2", "3", "4"].iter().enumerate() {
            grid.set_formula(i / 2, i % 2, text).unwrap();
        }
        grid
    }

    #[test]
    fn test_grid_dimensions() {
        let grid = Grid::new(GridSize::new(3, 2).unwrap());
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert!(grid.get_formula(0, 0).is_none());
    }

    #[test]
    fn test_calc_constants() {
        let grid = grid_2x2();
        assert_eq!(grid.calc(0, 0).unwrap(), 1.0);
        assert_eq!(grid.calc(0, 1).unwrap(), 2.0);
        assert_eq!(grid.calc(1, 0).unwrap(), 3.0);
        assert_eq!(grid.calc(1, 1).unwrap(), 4.0);
    }

    #[test]
    fn test_set_formula_installs_home() {
        let grid = grid_2x2();
        let formula = grid.get_formula(1, 0).unwrap();
        assert_eq!(formula.home(), Some(CellAddress::new(1, 0)));
        assert_eq!(formula.text(), "3");
    }

    #[test]
    fn test_set_formula_rejects_occupied_cell() {
        let mut grid = grid_2x2();
        assert_eq!(
            grid.set_formula(0, 1, "7").unwrap_err(),
            FormulaError::CellOccupied { cell: "A2".into() }
        );
        assert_eq!(grid.calc(0, 1).unwrap(), 2.0);
    }

    #[test]
    fn test_set_formula_rejects_invalid_text() {
        let mut grid = Grid::new(GridSize::new(1, 1).unwrap());
        assert!(matches!(
            grid.set_formula(0, 0, "1 2 ^"),
            Err(FormulaError::Tokenize { .. })
        ));
        assert!(grid.get_formula(0, 0).is_none());
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut grid = grid_2x2();
        assert!(grid.get_formula(2, 0).is_none());
        assert_eq!(
            grid.calc(0, 2).unwrap_err(),
            FormulaError::CellOutOfBounds { cell: "A3".into() }
        );
        assert!(matches!(
            grid.set_formula(2, 0, "1"),
            Err(FormulaError::CellOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_reference_to_empty_cell() {
        let mut grid = Grid::new(GridSize::new(2, 1).unwrap());
        grid.set_formula(0, 0, "A2 1 +").unwrap();

        assert_eq!(
            grid.calc(0, 0).unwrap_err(),
            FormulaError::EmptyCell { cell: "A2".into() }
        );
        assert_eq!(
            grid.calc(0, 1).unwrap_err(),
            FormulaError::EmptyCell { cell: "A2".into() }
        );
    }
}
