//! Validated formulas
//!
//! A [`Formula`] can only be obtained through [`Formula::new`], which
//! rejects malformed input. Once built it is immutable and carries its
//! variables and its canonical string.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use gridcalc_core::CellName;

use crate::error::{EvalResult, FormulaError, FormulaResult};
use crate::evaluator::{evaluate, Lookup};
use crate::token::{tokenize, Token};

/// An infix arithmetic formula over numbers, variables, `+ - * /` and parentheses
///
/// Equality and hashing are defined by the canonical string: numbers are
/// rewritten in standard `f64` form, variables are uppercased and whitespace
/// is dropped. No algebraic simplification is applied, so `1+1` and `2` are
/// different formulas.
///
/// # Example
/// ```rust
/// use gridcalc_formula::Formula;
///
/// let a = Formula::new("x1 + 2.000").unwrap();
/// let b = Formula::new("X1+2").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "X1+2");
/// assert!(Formula::new("2 +").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Formula {
    tokens: Vec<Token>,
    variables: BTreeSet<CellName>,
    canonical: String,
}

impl Formula {
    /// Parse and validate a formula (without a leading `=`)
    pub fn new(text: &str) -> FormulaResult<Self> {
        let tokens = tokenize(text)?;
        validate(&tokens)?;

        let variables = tokens
            .iter()
            .filter_map(|token| match token {
                Token::Variable(name) => Some(name.clone()),
                _ => None,
            })
            .collect();
        let canonical = tokens.iter().map(ToString::to_string).collect();

        Ok(Self {
            tokens,
            variables,
            canonical,
        })
    }

    /// Distinct variables referenced by the formula, normalized
    pub fn variables(&self) -> &BTreeSet<CellName> {
        &self.variables
    }

    /// Validated token sequence
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Canonical string form
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Evaluate the formula, resolving variables through `lookup`
    ///
    /// Never panics: undefined variables and division by zero come back as
    /// [`EvalError`](crate::EvalError) values.
    pub fn evaluate<L>(&self, lookup: &L) -> EvalResult
    where
        L: Lookup + ?Sized,
    {
        evaluate(&self.tokens, lookup)
    }
}

/// Check the token sequence against the formula grammar
fn validate(tokens: &[Token]) -> FormulaResult<()> {
    let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
        return Err(FormulaError::Empty);
    };

    if let Some(Token::Invalid(text)) = tokens.iter().find(|t| matches!(t, Token::Invalid(_))) {
        return Err(FormulaError::InvalidToken(text.clone()));
    }
    if !first.opens_operand() {
        return Err(FormulaError::InvalidStart(first.to_string()));
    }
    if !last.closes_operand() {
        return Err(FormulaError::InvalidEnd(last.to_string()));
    }

    for pair in tokens.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        let needs_operand = matches!(current, Token::LeftParen | Token::Operator(_));

        if needs_operand && !next.opens_operand() {
            return Err(FormulaError::ExpectedOperand {
                after: current.to_string(),
                found: next.to_string(),
            });
        }
        if !needs_operand && !matches!(next, Token::Operator(_) | Token::RightParen) {
            return Err(FormulaError::ExpectedOperator {
                after: current.to_string(),
                found: next.to_string(),
            });
        }
    }

    let mut open = 0;
    let mut close = 0;
    for (position, token) in tokens.iter().enumerate() {
        match token {
            Token::LeftParen => open += 1,
            Token::RightParen => {
                close += 1;
                if close > open {
                    return Err(FormulaError::UnmatchedClose { position });
                }
            }
            _ => {}
        }
    }
    if open != close {
        return Err(FormulaError::Unbalanced { open, close });
    }

    Ok(())
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for Formula {}

impl Hash for Formula {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> FormulaResult<Self> {
        Self::new(s)
    }
}
