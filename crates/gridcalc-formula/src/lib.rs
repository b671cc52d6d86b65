//! # gridcalc-formula
//!
//! Formula tokenizer, validator and evaluator for gridcalc.
//!
//! This crate provides:
//! - Tokenization of infix arithmetic (`+ - * /`, parentheses, numbers, variables)
//! - A validating [`Formula`] constructor with a canonical string form
//! - Two-stack evaluation against a [`Lookup`] for variable values
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_formula::{EvalError, Formula};
//!
//! let formula = Formula::new("(a1 + 2) * b1").unwrap();
//! assert_eq!(formula.to_string(), "(A1+2)*B1");
//!
//! let lookup = |name: &str| match name {
//!     "A1" => Some(4.0),
//!     "B1" => Some(0.5),
//!     _ => None,
//! };
//! assert_eq!(formula.evaluate(&lookup), Ok(3.0));
//!
//! let missing = Formula::new("C1 + 1").unwrap();
//! assert_eq!(
//!     missing.evaluate(&lookup),
//!     Err(EvalError::UndefinedVariable("C1".into()))
//! );
//! ```

pub mod error;
pub mod evaluator;
pub mod formula;
pub mod token;

pub use error::{EvalError, EvalResult, FormulaError, FormulaResult};
pub use evaluator::Lookup;
pub use formula::Formula;
pub use token::{tokenize, Operator, Token};
