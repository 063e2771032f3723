//! Formula token types
//!
//! A formula is stored as its postfix token sequence, exactly as written.

use rpn_sheets_core::CellAddress;
use std::fmt;

/// One component of a postfix formula
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Integer literal
    Const(i64),
    /// Arithmetic operator applied to the two preceding operands
    BinaryOp(BinaryOperator),
    /// `++` or `--` applied to the preceding operand
    UnaryOp(UnaryOperator),
    /// Reference to another cell
    Ref(CellAddress),
}

impl Token {
    /// Check if this token names another cell
    pub fn is_reference(&self) -> bool {
        matches!(self, Token::Ref(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Const(value) => write!(f, "{}", value),
            Token::BinaryOp(op) => write!(f, "{}", op),
            Token::UnaryOp(op) => write!(f, "{}", op),
            Token::Ref(addr) => write!(f, "{}", addr),
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    /// Operator for a single operator character
    pub fn from_symbol(c: u8) -> Option<Self> {
        match c {
            b'+' => Some(BinaryOperator::Add),
            b'-' => Some(BinaryOperator::Subtract),
            b'*' => Some(BinaryOperator::Multiply),
            b'/' => Some(BinaryOperator::Divide),
            _ => None,
        }
    }

    /// Operator symbol as written in formulas
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
        }
    }

    /// Apply the operator as `left OP right`.
    ///
    /// Division by zero yields an infinity or NaN.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            BinaryOperator::Add => left + right,
            BinaryOperator::Subtract => left - right,
            BinaryOperator::Multiply => left * right,
            BinaryOperator::Divide => left / right,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Increment,
    Decrement,
}

impl UnaryOperator {
    /// Operator symbol as written in formulas
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOperator::Increment => "++",
            UnaryOperator::Decrement => "--",
        }
    }

    pub fn apply(&self, operand: f64) -> f64 {
        match self {
            UnaryOperator::Increment => operand + 1.0,
            UnaryOperator::Decrement => operand - 1.0,
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
