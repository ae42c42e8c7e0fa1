//! A small interactive four-function calculator.
//!
//! Each round accepts either a complete equation such as `6+3` or a bare first
//! number followed by an operator and a second number, possibly over several
//! prompts. Exactly one binary operation (`+`, `-`, `*` or `/`) is evaluated per
//! round; there is no precedence, grouping or chaining.
//!
//! The pieces are layered:
//! - [`parser`] classifies and splits raw input lines,
//! - [`round`] is the explicit state machine for one round,
//! - [`operator`] holds the operator set and evaluation,
//! - [`Interpreter`] drives rounds against any [`io_adapters::Console`].

pub mod error;
pub mod io_adapters;
mod interpreter;
pub mod operator;
pub mod parser;
pub mod round;

pub use error::{EvalError, InputError};
/// The session driver and its options.
///
/// See [`Interpreter`] for an example using a scripted console.
pub use interpreter::{Interpreter, Options};
pub use operator::{Calculation, Equation, Operator, evaluate};
