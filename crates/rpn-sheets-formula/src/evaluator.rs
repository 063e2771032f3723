//! Formula evaluator
//!
//! Evaluates a postfix token sequence by scanning it right to left. The last
//! token is the root of the expression; operators pop their operands from the
//! tail of the remaining tokens; operators still waiting for operands are kept
//! on an explicit stack.

use crate::error::{FormulaError, FormulaResult};
use crate::token::{BinaryOperator, Token, UnaryOperator};
use rpn_sheets_core::{CellAddress, GridSize};

/// Access to the values of other cells during evaluation
pub trait CellLookup {
    /// Dimensions that bound valid references
    fn size(&self) -> GridSize;

    /// Resolved value of a cell inside the grid
    fn value(&self, addr: CellAddress) -> FormulaResult<f64>;
}

/// Tokens that have not been consumed yet, in their original order
#[derive(Debug, Clone)]
pub struct TokenStack<'a> {
    tokens: &'a [Token],
}

impl<'a> TokenStack<'a> {
    /// Create a stack holding a whole formula
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens }
    }

    /// Take the rightmost remaining token
    pub fn pop(&mut self) -> Option<&'a Token> {
        let (last, rest) = self.tokens.split_last()?;
        self.tokens = rest;
        Some(last)
    }

    /// Number of tokens left
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if all tokens were consumed
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Operator waiting for operand values while its subtree is evaluated
enum Pending<'a> {
    Unary(UnaryOperator),
    /// Right operand still being evaluated
    Right(BinaryOperator, &'a Token),
    /// Right operand done, left operand being evaluated
    Left(BinaryOperator, f64),
}

impl Token {
    /// Evaluate this token, consuming its operands from the tail of `stack`.
    ///
    /// Operands are taken in the same order as a recursive descent would take
    /// them, but pending operators live on the heap, so nesting depth is not
    /// limited by the thread's stack.
    ///
    /// `lookup` is needed only by cell references.
    pub fn evaluate<'a>(
        &'a self,
        stack: &mut TokenStack<'a>,
        lookup: Option<&dyn CellLookup>,
    ) -> FormulaResult<f64> {
        let mut pending: Vec<Pending<'a>> = Vec::new();
        let mut current = self;

        loop {
            let mut value = match current {
                Token::Const(value) => *value as f64,
                Token::Ref(addr) => reference_value(*addr, lookup)?,
                Token::UnaryOp(op) => {
                    pending.push(Pending::Unary(*op));
                    current = pop_operand(stack, current)?;
                    continue;
                }
                Token::BinaryOp(op) => {
                    // The most recently written operand is on top
                    pending.push(Pending::Right(*op, current));
                    current = pop_operand(stack, current)?;
                    continue;
                }
            };

            // Fold the finished operand into the operators waiting for it
            loop {
                match pending.pop() {
                    None => return Ok(value),
                    Some(Pending::Unary(op)) => value = op.apply(value),
                    Some(Pending::Right(op, operator)) => {
                        pending.push(Pending::Left(op, value));
                        current = pop_operand(stack, operator)?;
                        break;
                    }
                    Some(Pending::Left(op, right)) => value = op.apply(value, right),
                }
            }
        }
    }
}

fn reference_value(addr: CellAddress, lookup: Option<&dyn CellLookup>) -> FormulaResult<f64> {
    let lookup = lookup.ok_or_else(|| FormulaError::GridRequired {
        reference: addr.to_string(),
    })?;
    if !lookup.size().contains(addr) {
        return Err(FormulaError::ReferenceOutOfBounds {
            reference: addr.to_string(),
        });
    }
    lookup.value(addr)
}

fn pop_operand<'a>(stack: &mut TokenStack<'a>, operator: &Token) -> FormulaResult<&'a Token> {
    stack.pop().ok_or_else(|| FormulaError::Arity {
        operator: operator.to_string(),
    })
}

/// Evaluate a complete postfix formula.
///
/// Every token must be consumed by the root token; leftovers mean the
/// formula was written in the wrong order or is missing an operator.
///
/// # Example
/// ```rust
/// use rpn_sheets_formula::{evaluate, tokenize};
///
/// let tokens = tokenize("20 3 / 2 +").unwrap();
/// assert_eq!(evaluate(&tokens, None).unwrap(), 20.0 / 3.0 + 2.0);
/// ```
pub fn evaluate(tokens: &[Token], lookup: Option<&dyn CellLookup>) -> FormulaResult<f64> {
    let mut stack = TokenStack::new(tokens);
    let root = stack.pop().ok_or_else(|| FormulaError::Tokenize {
        formula: String::new(),
        position: 0,
    })?;

    let value = root.evaluate(&mut stack, lookup)?;

    if !stack.is_empty() {
        return Err(FormulaError::ExtraTokens {
            formula: join_tokens(tokens),
            remaining: stack.len(),
        });
    }

    Ok(value)
}

/// Canonical text of a token sequence
pub(crate) fn join_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn eval(formula: &str) -> FormulaResult<f64> {
        evaluate(&tokenize(formula)?, None)
    }

    /// Fixed values for every cell of a small grid
    struct Values {
        size: GridSize,
        values: Vec<f64>,
    }

    impl CellLookup for Values {
        fn size(&self) -> GridSize {
            self.size
        }

        fn value(&self, addr: CellAddress) -> FormulaResult<f64> {
            let index = self.size.index_of(addr).ok_or_else(|| {
                FormulaError::CellOutOfBounds {
                    cell: addr.to_string(),
                }
            })?;
            Ok(self.values[index])
        }
    }

    #[test]
    fn test_evaluate_arithmetic() {
        assert_eq!(eval("1 2 +").unwrap(), 3.0);
        assert_eq!(eval("2 3 *").unwrap(), 6.0);
        assert_eq!(eval("4 3 -").unwrap(), 1.0);
        assert_eq!(eval("20 3 /").unwrap(), 20.0 / 3.0);
        assert_eq!(eval("20 3 / 2 +").unwrap(), 20.0 / 3.0 + 2.0);
    }

    #[test]
    fn test_evaluate_negative_constant() {
        assert_eq!(eval("1 2 - -3 +").unwrap(), -4.0);
    }

    #[test]
    fn test_evaluate_increment_decrement() {
        assert_eq!(eval("2 3 ++ +").unwrap(), 6.0);
        assert_eq!(eval("3 -- 5 + ++").unwrap(), 8.0);
    }

    #[test]
    fn test_evaluate_division_by_zero() {
        assert_eq!(eval("1 0 /").unwrap(), f64::INFINITY);
        assert_eq!(eval("-1 0 /").unwrap(), f64::NEG_INFINITY);
        assert!(eval("0 0 /").unwrap().is_nan());
    }

    #[test]
    fn test_evaluate_extra_tokens() {
        let err = eval("1 + 2").unwrap_err();
        assert_eq!(
            err,
            FormulaError::ExtraTokens {
                formula: "1 + 2".into(),
                remaining: 2,
            }
        );
        assert!(matches!(eval("1 2"), Err(FormulaError::ExtraTokens { .. })));
    }

    #[test]
    fn test_evaluate_missing_operands() {
        assert!(matches!(eval("+ +"), Err(FormulaError::Arity { .. })));
        assert!(matches!(eval("++"), Err(FormulaError::Arity { .. })));
        assert!(matches!(eval("1 *"), Err(FormulaError::Arity { .. })));
        assert_eq!(
            eval("--").unwrap_err().to_string(),
            "Insufficient operands for '--'"
        );
    }

    #[test]
    fn test_evaluate_references() {
        let grid = Values {
            size: GridSize::new(2, 2).unwrap(),
            values: vec![20.0, 10.0, 4.0, 3.0],
        };
        let tokens = tokenize("A1 B2 / 2 +").unwrap();
        assert_eq!(evaluate(&tokens, Some(&grid)).unwrap(), 20.0 / 3.0 + 2.0);

        let tokens = tokenize("C3").unwrap();
        assert_eq!(
            evaluate(&tokens, Some(&grid)).unwrap_err(),
            FormulaError::ReferenceOutOfBounds {
                reference: "C3".into()
            }
        );
    }

    #[test]
    fn test_evaluate_reference_without_grid() {
        assert!(matches!(
            eval("A1 1 +"),
            Err(FormulaError::GridRequired { .. })
        ));
    }

    #[test]
    fn test_evaluate_deeply_nested_formula() {
        let depth = 100_000;

        let increments = format!("1{}", " ++".repeat(depth));
        assert_eq!(eval(&increments).unwrap(), (depth + 1) as f64);

        // Left-deep chain: every '+' takes the rest of the formula as its left operand
        let sums = format!("1{}", " 1 +".repeat(depth));
        assert_eq!(eval(&sums).unwrap(), (depth + 1) as f64);

        // Right-deep chain: every '-' takes the rest of the formula as its right operand
        let differences = format!("{}0{}", "1 ".repeat(depth), " -".repeat(depth));
        assert_eq!(eval(&differences).unwrap(), 0.0);
    }

    #[test]
    fn test_evaluate_deep_formula_errors() {
        let missing = format!("1{}", " +".repeat(50_000));
        assert!(matches!(eval(&missing), Err(FormulaError::Arity { .. })));

        let decrements = format!("7{}", " --".repeat(50_000));
        assert_eq!(eval(&decrements).unwrap(), -49_993.0);

        let leftover = format!("1 2{}", " ++".repeat(50_000));
        assert!(matches!(
            eval(&leftover),
            Err(FormulaError::ExtraTokens { remaining: 1, .. })
        ));
    }

    #[test]
    fn test_token_stack() {
        let tokens = tokenize("1 2 +").unwrap();
        let mut stack = TokenStack::new(&tokens);

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.pop(), Some(&tokens[2]));
        assert_eq!(stack.pop(), Some(&tokens[1]));
        assert_eq!(stack.pop(), Some(&tokens[0]));
        assert!(stack.is_empty());
        assert_eq!(stack.pop(), None);
    }
}
