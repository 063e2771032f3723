//! Random test sheet generation
//!
//! Produces valid, acyclic input files for load testing. The first and last
//! four cells, plus a random share of the others, are integer constants. The
//! remaining cells sum 1 to 10 references:
//! - even cells reference higher even cells
//! - odd cells reference lower odd cells
//!
//! Neither direction can close a loop, so every generated sheet calculates.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rpn_sheets_core::{cell_name, GridSize};

use crate::error::SheetResult;

/// Cells at each end of the sheet that always hold constants
const CONSTANT_EDGE: usize = 4;

/// Upper bound on references in a generated formula
const MAX_REFERENCES: usize = 10;

/// Options for sheet generation
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Number of columns
    pub width: usize,
    /// Number of rows (at most 26)
    pub height: usize,
    /// Probability of a cell being a constant (default: 0.3)
    pub constant_ratio: f64,
    /// Seed for reproducible output; entropy when absent
    pub seed: Option<u64>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            width: 100_000,
            height: 26,
            constant_ratio: 0.3,
            seed: None,
        }
    }
}

/// Random sheet generator
pub struct SheetGenerator {
    size: GridSize,
    constant_ratio: f64,
    rng: StdRng,
}

impl SheetGenerator {
    /// Create a generator, validating the requested dimensions
    pub fn new(options: &GeneratorOptions) -> SheetResult<Self> {
        let size = GridSize::new(options.width, options.height)?;
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            size,
            constant_ratio: options.constant_ratio.clamp(0.0, 1.0),
            rng,
        })
    }

    /// Generate a sheet into a file
    pub fn generate_file<P: AsRef<Path>>(&mut self, path: P) -> SheetResult<()> {
        let file = File::create(path)?;
        self.generate(file)
    }

    /// Generate a sheet into a writer
    pub fn generate<W: Write>(&mut self, writer: W) -> SheetResult<()> {
        let mut out = BufWriter::new(writer);

        writeln!(out, "{} {}", self.size.width(), self.size.height())?;
        for index in 0..self.size.cell_count() {
            let line = self.cell(index);
            writeln!(out, "{}", line)?;
        }

        out.flush()?;
        tracing::info!(
            width = self.size.width(),
            height = self.size.height(),
            "test sheet generated"
        );
        Ok(())
    }

    fn cell(&mut self, index: usize) -> String {
        let total = self.size.cell_count();
        let edge = index < CONSTANT_EDGE || index + CONSTANT_EDGE >= total;

        if edge || self.rng.gen::<f64>() < self.constant_ratio {
            return self.rng.gen::<i32>().to_string();
        }

        // Candidates share the parity of `index`: even cells link forward,
        // odd cells link backward.
        let (first, count) = if index % 2 == 0 {
            (index + 2, (total - index - 1) / 2)
        } else {
            (1, index / 2)
        };

        let references = self.rng.gen_range(1..=MAX_REFERENCES);
        let mut formula = String::new();
        for _ in 0..references {
            let target = first + 2 * self.rng.gen_range(0..count);
            formula.push_str(&cell_name(target / self.size.width(), target % self.size.width()));
            formula.push(' ');
        }
        formula.push_str(&vec!["+"; references - 1].join(" "));

        formula.trim_end().to_string()
    }
}
