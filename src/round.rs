//! The state machine behind a single round of the calculator.
//!
//! A round starts in [`State::AwaitingFirstInput`] and is fed one line at a
//! time until it reaches [`State::Ready`], at which point [`Round::resolve`]
//! evaluates it. Rejected lines never change the state, so the first operand
//! survives any number of failed operator attempts.

use crate::error::{EvalError, InputError};
use crate::operator::{Calculation, Equation, Operator};
use crate::parser::{self, Classified, Partial};
use tracing::debug;

pub const FIRST_INPUT_PROMPT: &str = "Enter an equation (e.g., 6+3) or the first number: ";
pub const OPERATOR_PROMPT: &str =
    "Enter an operator (+, -, *, /) followed by the second number or just an operator: ";
pub const SECOND_OPERAND_PROMPT: &str = "Enter the second number: ";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum State {
    /// Nothing entered yet.
    AwaitingFirstInput,
    /// A bare first operand was entered.
    AwaitingOperatorAndOperand { lhs: f64 },
    /// First operand and operator are known.
    AwaitingSecondOperandOnly { lhs: f64, op: Operator },
    /// The equation is complete and can be evaluated.
    Ready(Equation),
    /// The round produced a result.
    Done(Calculation),
}

#[derive(Debug, Clone)]
pub struct Round {
    state: State,
}

impl Default for Round {
    fn default() -> Self {
        Self::new()
    }
}

impl Round {
    pub fn new() -> Self {
        Round {
            state: State::AwaitingFirstInput,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Prompt for the next line, or `None` once no more input is needed.
    pub fn prompt(&self) -> Option<&'static str> {
        match self.state {
            State::AwaitingFirstInput => Some(FIRST_INPUT_PROMPT),
            State::AwaitingOperatorAndOperand { .. } => Some(OPERATOR_PROMPT),
            State::AwaitingSecondOperandOnly { .. } => Some(SECOND_OPERAND_PROMPT),
            State::Ready(_) | State::Done(_) => None,
        }
    }

    /// Feed one line of user input.
    ///
    /// On error the state is left exactly as it was and the caller is expected
    /// to show the error and prompt again.
    pub fn feed(&mut self, line: &str) -> Result<(), InputError> {
        let next = match self.state {
            State::AwaitingFirstInput => match parser::classify(line)? {
                Classified::BareNumber(lhs) => State::AwaitingOperatorAndOperand { lhs },
                Classified::Equation(equation) => State::Ready(equation),
            },
            State::AwaitingOperatorAndOperand { lhs } => {
                match parser::extract_operator_and_operand(line)? {
                    Partial::OperatorOnly(op) => State::AwaitingSecondOperandOnly { lhs, op },
                    Partial::OperatorAndOperand(op, rhs) => {
                        State::Ready(Equation::new(lhs, op, rhs))
                    }
                }
            }
            // Negative values are accepted here, unlike the other operand paths.
            State::AwaitingSecondOperandOnly { lhs, op } => {
                let rhs = parser::parse_number(line)?;
                State::Ready(Equation::new(lhs, op, rhs))
            }
            State::Ready(_) | State::Done(_) => return Err(InputError::Unexpected),
        };
        debug!(from = ?self.state, to = ?next, "round transition");
        self.state = next;
        Ok(())
    }

    /// Evaluate a ready equation and move to [`State::Done`].
    ///
    /// On failure the round stays in [`State::Ready`]; the session discards it
    /// and starts a fresh one.
    pub fn resolve(&mut self) -> Result<Calculation, EvalError> {
        match self.state {
            State::Ready(equation) => {
                let calculation = equation.evaluate()?;
                self.state = State::Done(calculation);
                Ok(calculation)
            }
            State::Done(calculation) => Ok(calculation),
            _ => Err(EvalError::Incomplete),
        }
    }
}
