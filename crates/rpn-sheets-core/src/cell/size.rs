//! Grid dimensions and row-major indexing

use super::address::CellAddress;
use crate::error::{Error, Result};
use crate::MAX_ROWS;

/// Fixed dimensions of a grid: `width` columns by `height` rows.
///
/// Cells are stored row-major, so the flat index of `(row, col)` is
/// `row * width + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize {
    width: usize,
    height: usize,
}

impl GridSize {
    /// Create grid dimensions, rejecting sizes that references cannot address
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let invalid = |reason| Error::InvalidSize {
            width,
            height,
            reason,
        };

        if width == 0 || height == 0 {
            return Err(invalid("dimensions must be positive"));
        }
        if height > MAX_ROWS {
            return Err(invalid("at most 26 rows (A-Z) are addressable"));
        }
        if width.checked_mul(height).is_none() {
            return Err(invalid("cell count overflows"));
        }

        Ok(Self { width, height })
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Check if a cell is within the grid
    pub fn contains(&self, addr: CellAddress) -> bool {
        addr.row < self.height && addr.col < self.width
    }

    /// Flat row-major index of a cell, if it is inside the grid
    pub fn index_of(&self, addr: CellAddress) -> Option<usize> {
        self.contains(addr).then(|| addr.row * self.width + addr.col)
    }

    /// Cell address of a flat index
    pub fn address_at(&self, index: usize) -> Option<CellAddress> {
        (index < self.cell_count())
            .then(|| CellAddress::new(index / self.width, index % self.width))
    }

    /// Iterate over all cell addresses in row-major order
    pub fn addresses(&self) -> Addresses {
        Addresses {
            size: *self,
            next: 0,
        }
    }
}

/// Iterator over the cells of a grid, row by row
pub struct Addresses {
    size: GridSize,
    next: usize,
}

impl Iterator for Addresses {
    type Item = CellAddress;

    fn next(&mut self) -> Option<Self::Item> {
        let addr = self.size.address_at(self.next)?;
        self.next += 1;
        Some(addr)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.size.cell_count() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Addresses {}
