//! Formula evaluator
//!
//! Two-stack (operand/operator) evaluation of a validated token sequence.
//! `*` and `/` bind tighter than `+` and `-`, operators of equal precedence
//! associate to the left, and parentheses override both.

use crate::error::{EvalError, EvalResult};
use crate::token::{Operator, Token};

/// Resolves variable names to numbers during evaluation
///
/// Names are passed in normalized (uppercase) form. Returning `None` marks
/// the variable as undefined, which makes the evaluation produce
/// [`EvalError::UndefinedVariable`].
///
/// Any `Fn(&str) -> Option<f64>` closure is a lookup:
///
/// ```rust
/// use std::collections::HashMap;
/// use gridcalc_formula::Formula;
///
/// let values = HashMap::from([("A1".to_string(), 2.0)]);
/// let lookup = |name: &str| values.get(name).copied();
///
/// assert_eq!(Formula::new("a1 * 3").unwrap().evaluate(&lookup), Ok(6.0));
/// ```
pub trait Lookup {
    /// Value of `name`, or `None` if it is undefined
    fn lookup(&self, name: &str) -> Option<f64>;
}

impl<F> Lookup for F
where
    F: Fn(&str) -> Option<f64>,
{
    fn lookup(&self, name: &str) -> Option<f64> {
        self(name)
    }
}

/// Entry on the operator stack
#[derive(Debug, Clone, Copy)]
enum Pending {
    Operator(Operator),
    LeftParen,
}

/// Evaluate a validated token sequence
pub(crate) fn evaluate<L>(tokens: &[Token], lookup: &L) -> EvalResult
where
    L: Lookup + ?Sized,
{
    let mut values: Vec<f64> = Vec::with_capacity(tokens.len() / 2 + 1);
    let mut operators: Vec<Pending> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(n) => values.push(*n),
            Token::Variable(name) => {
                let value = lookup
                    .lookup(name.as_str())
                    .ok_or_else(|| EvalError::UndefinedVariable(name.to_string()))?;
                values.push(value);
            }
            Token::Operator(op) => {
                // Reduce everything on the stack that binds at least as tightly
                while let Some(&Pending::Operator(top)) = operators.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    operators.pop();
                    apply(&mut values, top)?;
                }
                operators.push(Pending::Operator(*op));
            }
            Token::LeftParen => operators.push(Pending::LeftParen),
            Token::RightParen => {
                // Stops after popping the matching '('
                while let Some(Pending::Operator(op)) = operators.pop() {
                    apply(&mut values, op)?;
                }
            }
            // rejected by validation
            Token::Invalid(_) => {}
        }
    }

    while let Some(Pending::Operator(op)) = operators.pop() {
        apply(&mut values, op)?;
    }

    Ok(pop_operand(&mut values))
}

fn apply(values: &mut Vec<f64>, op: Operator) -> Result<(), EvalError> {
    let rhs = pop_operand(values);
    let lhs = pop_operand(values);

    let result = match op {
        Operator::Add => lhs + rhs,
        Operator::Subtract => lhs - rhs,
        Operator::Multiply => lhs * rhs,
        Operator::Divide => {
            if rhs == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            lhs / rhs
        }
    };
    values.push(result);
    Ok(())
}

fn pop_operand(values: &mut Vec<f64>) -> f64 {
    values
        .pop()
        .expect("validated formula supplies an operand for every operator")
}
