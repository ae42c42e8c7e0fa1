use crate::error::EvalError;
use std::fmt;
use tracing::debug;

/// One of the four supported binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
}

impl Operator {
    /// Map a symbol to an operator. Anything outside `+ - * /` yields `None`.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            _ => None,
        }
    }

    /// The symbol this operator is written with.
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// Apply the operator to two operands.
    ///
    /// Division by zero is reported as [`EvalError::DivisionByZero`] rather than
    /// producing an infinity or NaN.
    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, EvalError> {
        match self {
            Operator::Add => Ok(lhs + rhs),
            Operator::Subtract => Ok(lhs - rhs),
            Operator::Multiply => Ok(lhs * rhs),
            Operator::Divide => {
                if rhs == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                Ok(lhs / rhs)
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single binary operation waiting to be evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equation {
    pub lhs: f64,
    pub op: Operator,
    pub rhs: f64,
}

impl Equation {
    pub fn new(lhs: f64, op: Operator, rhs: f64) -> Self {
        Self { lhs, op, rhs }
    }

    /// Evaluate the equation, consuming it into a [`Calculation`].
    pub fn evaluate(self) -> Result<Calculation, EvalError> {
        let result = self.op.apply(self.lhs, self.rhs).inspect_err(|e| {
            debug!(equation = %self, error = ?e, "evaluation failed");
        })?;
        Ok(Calculation {
            equation: self,
            result,
        })
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op, self.rhs)
    }
}

/// A completed round: the equation and its value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calculation {
    pub equation: Equation,
    pub result: f64,
}

impl fmt::Display for Calculation {
    /// Renders `<lhs> <op> <rhs> = <result>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.equation, self.result)
    }
}

/// Evaluate `lhs symbol rhs` where the operator is given as a raw symbol.
///
/// Unlike [`Operator::apply`], the symbol is not validated in advance, so an
/// unknown symbol surfaces as [`EvalError::InvalidOperator`].
///
/// ```
/// use calculator::{evaluate, EvalError};
/// assert_eq!(evaluate(6.0, '+', 3.0), Ok(9.0));
/// assert_eq!(evaluate(5.0, '/', 0.0), Err(EvalError::DivisionByZero));
/// ```
pub fn evaluate(lhs: f64, symbol: char, rhs: f64) -> Result<f64, EvalError> {
    let op = Operator::from_symbol(symbol).ok_or(EvalError::InvalidOperator(symbol))?;
    op.apply(lhs, rhs)
}
