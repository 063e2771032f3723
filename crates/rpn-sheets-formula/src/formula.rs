//! Spreadsheet formula representation

use crate::dependency;
use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::{self, join_tokens, CellLookup};
use crate::grid::Grid;
use crate::token::Token;
use crate::tokenizer::tokenize;
use once_cell::sync::OnceCell;
use rpn_sheets_core::CellAddress;
use std::fmt;
use std::str::FromStr;

/// A postfix formula stored in (or evaluated against) a [`Grid`].
///
/// The dependency set and the value are computed lazily and at most once.
/// After the value is set it never changes, so repeated evaluation is a
/// cache hit with no side effects.
#[derive(Debug)]
pub struct Formula {
    tokens: Vec<Token>,
    has_references: bool,
    /// Cell holding this formula, set when installed into a grid
    home: Option<CellAddress>,
    /// Flat grid indices of the distinct cells referenced
    dependencies: OnceCell<Box<[usize]>>,
    value: OnceCell<f64>,
}

impl Formula {
    /// Parse a formula from its text
    pub fn parse(text: &str) -> FormulaResult<Self> {
        let tokens = tokenize(text)?;
        let has_references = tokens.iter().any(Token::is_reference);

        Ok(Self {
            tokens,
            has_references,
            home: None,
            dependencies: OnceCell::new(),
            value: OnceCell::new(),
        })
    }

    pub(crate) fn with_home(mut self, home: CellAddress) -> Self {
        self.home = Some(home);
        self
    }

    /// Postfix tokens, as written
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Canonical text: tokens joined by single spaces
    pub fn text(&self) -> String {
        join_tokens(&self.tokens)
    }

    /// Cell this formula is installed in, if any
    pub fn home(&self) -> Option<CellAddress> {
        self.home
    }

    /// Check if the formula references any cell
    pub fn has_dependencies(&self) -> bool {
        self.has_references
    }

    /// Check if the value has been computed
    pub fn is_evaluated(&self) -> bool {
        self.value.get().is_some()
    }

    /// Memoized value, if already computed
    pub fn value(&self) -> Option<f64> {
        self.value.get().copied()
    }

    /// Distinct cells referenced by this formula, as flat grid indices.
    ///
    /// Computed on first use. Fails if a reference lies outside the grid or
    /// names an empty cell.
    pub fn dependencies(&self, grid: &Grid) -> FormulaResult<&[usize]> {
        self.dependencies
            .get_or_try_init(|| {
                let mut indices: Vec<usize> = Vec::new();
                for token in &self.tokens {
                    let Token::Ref(addr) = token else {
                        continue;
                    };
                    let index = grid.size().index_of(*addr).ok_or_else(|| {
                        FormulaError::ReferenceOutOfBounds {
                            reference: addr.to_string(),
                        }
                    })?;
                    grid.formula_at(index)?;
                    if !indices.contains(&index) {
                        indices.push(index);
                    }
                }
                Ok(indices.into_boxed_slice())
            })
            .map(|deps| &deps[..])
    }

    /// Evaluate against a grid.
    ///
    /// Referenced cells are resolved first, in dependency order, so a long
    /// chain of references never recurses. Cycles are reported as
    /// [`FormulaError::CyclicDependency`].
    pub fn evaluate(&self, grid: &Grid) -> FormulaResult<f64> {
        self.value
            .get_or_try_init(|| {
                if self.has_references {
                    dependency::resolve(self, grid)?;
                }
                self.compute(Some(grid))
            })
            .copied()
    }

    /// Evaluate without a grid. Fails if the formula references any cell.
    pub fn evaluate_standalone(&self) -> FormulaResult<f64> {
        if let Some(Token::Ref(addr)) = self.tokens.iter().find(|t| t.is_reference()) {
            return Err(FormulaError::GridRequired {
                reference: addr.to_string(),
            });
        }
        self.value.get_or_try_init(|| self.compute(None)).copied()
    }

    /// Evaluate assuming every dependency already has its value
    pub(crate) fn evaluate_resolved(&self, grid: &Grid) -> FormulaResult<f64> {
        self.value
            .get_or_try_init(|| self.compute(Some(grid)))
            .copied()
    }

    fn compute(&self, lookup: Option<&dyn CellLookup>) -> FormulaResult<f64> {
        evaluator::evaluate(&self.tokens, lookup)
    }
}

impl FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> FormulaResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
