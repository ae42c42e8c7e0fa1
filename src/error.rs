//! Error types shared by the parser, the round state machine and the evaluator.
//!
//! Every variant is recoverable: the session prints the message and either
//! re-prompts ([`InputError`]) or abandons the current round ([`EvalError`]).
//! The `Display` text of each variant is exactly what the user sees.

use thiserror::Error;

/// Rejected input. The caller re-prompts without changing state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// The first line was neither a non-negative number nor a complete equation.
    #[error("Invalid input. You must enter a valid non-negative number or a complete equation (e.g., 6+3).")]
    InvalidFirstInput,

    /// Nothing was entered where an operator was expected.
    #[error("Invalid input. You must enter an operator.")]
    MissingOperator,

    /// The line was not an operator, nor an operator followed by a number.
    #[error("Error! Please enter a valid operator followed by a number (e.g., +3) or just an operator.")]
    InvalidOperatorInput,

    /// The line did not hold a single number.
    #[error("Invalid input. Please enter a number.")]
    InvalidNumber,

    /// A line was fed to a round that is no longer waiting for input.
    #[error("No input is expected at this point.")]
    Unexpected,
}

/// Evaluation failure. The round is abandoned and no result is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    /// `/` with a zero right-hand operand.
    #[error("Division by zero is not allowed!")]
    DivisionByZero,

    /// A symbol outside `+ - * /`.
    #[error("Invalid operator!")]
    InvalidOperator(char),

    /// `resolve` was called before both operands and the operator were known.
    #[error("The equation is not complete yet.")]
    Incomplete,
}
