//! Formula error types

use thiserror::Error;

/// Result type for formula construction
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Result of evaluating a formula
pub type EvalResult = std::result::Result<f64, EvalError>;

/// Syntax errors raised while constructing a [`Formula`](crate::Formula)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// No tokens at all (empty or whitespace-only input)
    #[error("Formula cannot be empty")]
    Empty,

    /// A piece of input that is not a number, variable, operator or parenthesis
    #[error("Invalid token '{0}'")]
    InvalidToken(String),

    /// A numeric literal too large to represent
    #[error("Numeric literal '{0}' is out of range")]
    NumberOutOfRange(String),

    /// First token is not a number, variable or '('
    #[error("Formula must start with a number, variable, or '(' but starts with '{0}'")]
    InvalidStart(String),

    /// Last token is not a number, variable or ')'
    #[error("Formula must end with a number, variable, or ')' but ends with '{0}'")]
    InvalidEnd(String),

    /// '(' or an operator followed by something other than an operand
    #[error("Expected a number, variable, or '(' after '{after}' but found '{found}'")]
    ExpectedOperand { after: String, found: String },

    /// An operand or ')' followed by something other than an operator or ')'
    #[error("Expected an operator or ')' after '{after}' but found '{found}'")]
    ExpectedOperator { after: String, found: String },

    /// A ')' with no open '(' to close
    #[error("Closing parenthesis at token {position} has no matching '('")]
    UnmatchedClose { position: usize },

    /// More '(' than ')' at the end of the formula
    #[error("Unbalanced parentheses: {open} opening but {close} closing")]
    Unbalanced { open: usize, close: usize },
}

/// Errors produced by evaluation
///
/// These are values, not failures of the engine: a spreadsheet stores them
/// as the cell's value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A variable the lookup could not resolve to a number
    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),

    /// Right-hand side of '/' evaluated to zero
    #[error("Division by zero")]
    DivisionByZero,
}
