//! Formula tokenizer
//!
//! A hand-written scanner for postfix formulas. Tokens are separated by spaces;
//! every token is a maximal run of one character class:
//!
//! - digits form an integer constant (`42`)
//! - an uppercase letter followed by digits forms a cell reference (`B12`)
//! - a single operator character forms a binary operator (`+ - * /`)
//! - `++` and `--` form increment and decrement
//!
//! A sign directly followed by a digit at the start of a token is part of the
//! constant (`-3`, `+7`). Anything else is rejected.

use crate::error::{FormulaError, FormulaResult};
use crate::token::{BinaryOperator, Token, UnaryOperator};
use rpn_sheets_core::CellAddress;

/// Tokenize a formula string into its postfix token sequence
///
/// # Example
/// ```rust
/// use rpn_sheets_formula::{tokenize, BinaryOperator, Token};
///
/// let tokens = tokenize("1 -2 +").unwrap();
/// assert_eq!(
///     tokens,
///     vec![Token::Const(1), Token::Const(-2), Token::BinaryOp(BinaryOperator::Add)]
/// );
/// assert!(tokenize("1.5").is_err());
/// assert!(tokenize("   ").is_err());
/// ```
pub fn tokenize(formula: &str) -> FormulaResult<Vec<Token>> {
    let mut tokenizer = Tokenizer::new(formula);
    let mut tokens = Vec::new();

    while let Some(token) = tokenizer.next_token()? {
        tokens.push(token);
    }

    if tokens.is_empty() {
        return Err(FormulaError::tokenize(formula, 0));
    }

    Ok(tokens)
}

/// Character classes recognized by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Separator,
    Digit,
    Letter,
    Operator,
}

impl CharClass {
    fn of(c: u8) -> Option<Self> {
        match c {
            b' ' => Some(CharClass::Separator),
            b'0'..=b'9' => Some(CharClass::Digit),
            b'A'..=b'Z' => Some(CharClass::Letter),
            b'+' | b'-' | b'*' | b'/' => Some(CharClass::Operator),
            _ => None,
        }
    }
}

struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn next_token(&mut self) -> FormulaResult<Option<Token>> {
        self.skip_separators();

        let Some(c) = self.peek_byte() else {
            return Ok(None);
        };

        let token = match self.classify(c)? {
            CharClass::Digit => self.scan_number()?,
            CharClass::Letter => self.scan_reference()?,
            CharClass::Operator => {
                // One character of lookahead decides between a signed constant and an operator
                if self.peek_class_at(1) == Some(CharClass::Digit) {
                    self.scan_number()?
                } else {
                    self.scan_operator()?
                }
            }
            CharClass::Separator => unreachable!("separators are skipped"),
        };

        // A token must end at a separator or at the end of input
        match self.peek_byte() {
            None | Some(b' ') => Ok(Some(token)),
            Some(_) => Err(self.error()),
        }
    }

    // === Token scanning ===

    fn scan_number(&mut self) -> FormulaResult<Token> {
        let start = self.pos;

        if matches!(self.peek_byte(), Some(b'+' | b'-')) {
            self.advance();
        }
        self.skip_digits();

        let value = self.input[start..self.pos]
            .parse::<i64>()
            .map_err(|_| FormulaError::tokenize(self.input, start))?;

        Ok(Token::Const(value))
    }

    fn scan_reference(&mut self) -> FormulaResult<Token> {
        let start = self.pos;

        self.advance(); // Row letter
        self.skip_digits();

        let address = CellAddress::parse(&self.input[start..self.pos])
            .map_err(|_| FormulaError::tokenize(self.input, start))?;

        Ok(Token::Ref(address))
    }

    fn scan_operator(&mut self) -> FormulaResult<Token> {
        let start = self.pos;
        let Some(first) = self.peek_byte() else {
            return Err(self.error());
        };
        self.advance();

        if self.peek_class_at(0) != Some(CharClass::Operator) {
            return BinaryOperator::from_symbol(first)
                .map(Token::BinaryOp)
                .ok_or_else(|| FormulaError::tokenize(self.input, start));
        }

        // Only "++" and "--" are valid two-character operators
        let second = self.peek_byte();
        self.advance();
        match (first, second) {
            (b'+', Some(b'+')) => Ok(Token::UnaryOp(UnaryOperator::Increment)),
            (b'-', Some(b'-')) => Ok(Token::UnaryOp(UnaryOperator::Decrement)),
            _ => Err(FormulaError::tokenize(self.input, start)),
        }
    }

    // === Helpers ===

    fn classify(&self, c: u8) -> FormulaResult<CharClass> {
        CharClass::of(c).ok_or_else(|| self.error())
    }

    fn skip_separators(&mut self) {
        while self.peek_byte() == Some(b' ') {
            self.advance();
        }
    }

    fn skip_digits(&mut self) {
        while self.peek_byte().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn peek_class_at(&self, offset: usize) -> Option<CharClass> {
        self.input
            .as_bytes()
            .get(self.pos + offset)
            .and_then(|&c| CharClass::of(c))
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn error(&self) -> FormulaError {
        FormulaError::tokenize(self.input, self.pos)
    }
}
