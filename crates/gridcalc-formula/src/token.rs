//! Formula tokens
//!
//! Splits formula text into parentheses, the four arithmetic operators,
//! variables (letters then digits), unsigned numeric literals and
//! whitespace. Whitespace is discarded. Any other run of characters becomes
//! a [`Token::Invalid`] so that validation can report it.

use std::fmt;

use gridcalc_core::CellName;

use crate::error::{FormulaError, FormulaResult};

/// Arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Subtract),
            "*" => Some(Operator::Multiply),
            "/" => Some(Operator::Divide),
            _ => None,
        }
    }

    /// Operator symbol as written in formulas
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// Binding strength: `*` and `/` bind tighter than `+` and `-`
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide => 2,
        }
    }
}

/// A formula token
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LeftParen,
    RightParen,
    Operator(Operator),
    /// Unsigned numeric literal
    Number(f64),
    /// Variable reference, normalized to uppercase
    Variable(CellName),
    /// Input that matches no token pattern
    Invalid(String),
}

impl Token {
    /// Numbers, variables: things that produce a value
    pub fn is_operand(&self) -> bool {
        matches!(self, Token::Number(_) | Token::Variable(_))
    }

    /// Tokens that may start a formula or follow '(' or an operator
    pub(crate) fn opens_operand(&self) -> bool {
        self.is_operand() || matches!(self, Token::LeftParen)
    }

    /// Tokens that may end a formula or precede an operator
    pub(crate) fn closes_operand(&self) -> bool {
        self.is_operand() || matches!(self, Token::RightParen)
    }
}

impl fmt::Display for Token {
    /// Canonical spelling: numbers in standard `f64` form, variables uppercase
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
            Token::Operator(op) => write!(f, "{}", op.symbol()),
            Token::Number(n) => write!(f, "{}", n),
            Token::Variable(name) => write!(f, "{}", name),
            Token::Invalid(text) => f.write_str(text),
        }
    }
}

/// Split formula text into tokens
///
/// Only fails for numeric literals that overflow `f64`; every other
/// malformed piece of input is returned as [`Token::Invalid`].
///
/// # Example
/// ```rust
/// use gridcalc_formula::{tokenize, Operator, Token};
///
/// let tokens = tokenize("2.50 * x1").unwrap();
/// assert_eq!(tokens.len(), 3);
/// assert_eq!(tokens[0], Token::Number(2.5));
/// assert_eq!(tokens[1], Token::Operator(Operator::Multiply));
/// assert_eq!(tokens[2].to_string(), "X1");
/// ```
pub fn tokenize(text: &str) -> FormulaResult<Vec<Token>> {
    let pattern = lazy_regex::regex!(
        r"(?x)
          (?P<lp>\()
        | (?P<rp>\))
        | (?P<op>[-+*/])
        | (?P<var>[A-Za-z]+[0-9]+)
        | (?P<num>(?:[0-9]+\.[0-9]*|[0-9]*\.[0-9]+|[0-9]+)(?:[eE][-+]?[0-9]+)?)
        | (?P<ws>\s+)
        "
    );

    let mut tokens = Vec::new();
    let mut last_end = 0;

    for caps in pattern.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };

        if whole.start() > last_end {
            tokens.push(Token::Invalid(text[last_end..whole.start()].to_string()));
        }
        last_end = whole.end();

        let piece = whole.as_str();
        let token = if caps.name("lp").is_some() {
            Token::LeftParen
        } else if caps.name("rp").is_some() {
            Token::RightParen
        } else if let Some(op) = caps.name("op").and_then(|m| Operator::from_symbol(m.as_str())) {
            Token::Operator(op)
        } else if caps.name("var").is_some() {
            match CellName::parse(piece) {
                Ok(name) => Token::Variable(name),
                Err(_) => Token::Invalid(piece.to_string()),
            }
        } else if caps.name("num").is_some() {
            Token::Number(parse_number(piece)?)
        } else {
            // whitespace
            continue;
        };
        tokens.push(token);
    }

    if last_end < text.len() {
        tokens.push(Token::Invalid(text[last_end..].to_string()));
    }

    Ok(tokens)
}

fn parse_number(literal: &str) -> FormulaResult<f64> {
    match literal.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(FormulaError::NumberOutOfRange(literal.to_string())),
    }
}
