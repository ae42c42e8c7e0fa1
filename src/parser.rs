//! Classification and extraction of the text a user types at each prompt.
//!
//! All number/operator splitting goes through a handful of anchored regular
//! expressions. Operand literals inside equations are unsigned decimals
//! (`12`, `2.5`, `.5`, `5.`); signs and exponents are never part of them, so a
//! `-` or `+` is always read as the operator.

use crate::error::InputError;
use crate::operator::{Equation, Operator};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// `<number> <op> <number>`, whitespace optional around every token.
static EQUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([0-9]+\.?[0-9]*|\.[0-9]+)\s*([^0-9.\s])\s*([0-9]+\.?[0-9]*|\.[0-9]+)\s*$")
        .expect("equation pattern is valid")
});

/// `<op> <number>`, used once the first operand is already known.
static OPERATOR_AND_OPERAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([^0-9.\s])\s*([0-9]+\.?[0-9]*|\.[0-9]+)\s*$")
        .expect("operator/operand pattern is valid")
});

/// A standalone second operand. Signs and exponents are allowed here.
static SIGNED_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)\s*$")
        .expect("number pattern is valid")
});

/// What a first line of input turned out to be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classified {
    /// Only the first operand; operator and second operand come later.
    BareNumber(f64),
    /// Everything needed for one evaluation.
    Equation(Equation),
}

/// What the line after a bare number turned out to be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Partial {
    /// Just the operator; the second operand is asked for separately.
    OperatorOnly(Operator),
    /// Operator and second operand on the same line, e.g. `+3`.
    OperatorAndOperand(Operator, f64),
}

/// Convert a literal that already matched one of the patterns above.
///
/// Overlong literals such as a few hundred digits convert to infinity; those are
/// rejected like any other malformed number.
fn to_number(literal: &str) -> Option<f64> {
    literal.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parse a bare non-negative number.
///
/// The whole string must consist of ASCII digits and `.` and convert cleanly,
/// so `"1e5"`, `"-3"`, `" 3"`, `"1.2.3"` and `"."` are all rejected.
pub fn parse_bare_number(input: &str) -> Option<f64> {
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    to_number(input)
}

/// Split a complete equation such as `6+3` or `6 + 3`.
///
/// Both operands are non-negative by construction and the operator must be one
/// of `+ - * /`.
pub fn extract_equation(input: &str) -> Result<Equation, InputError> {
    let caps = EQUATION
        .captures(input)
        .ok_or(InputError::InvalidFirstInput)?;
    let lhs = to_number(&caps[1]).ok_or(InputError::InvalidFirstInput)?;
    let op = single_operator(&caps[2]).ok_or(InputError::InvalidFirstInput)?;
    let rhs = to_number(&caps[3]).ok_or(InputError::InvalidFirstInput)?;
    Ok(Equation::new(lhs, op, rhs))
}

/// Classify the first line of a round.
///
/// ```
/// use calculator::parser::{classify, Classified};
/// assert_eq!(classify("12"), Ok(Classified::BareNumber(12.0)));
/// assert!(matches!(classify("6 + 3"), Ok(Classified::Equation(_))));
/// assert!(classify("6^3").is_err());
/// ```
pub fn classify(input: &str) -> Result<Classified, InputError> {
    if let Some(value) = parse_bare_number(input) {
        trace!(input, value, "classified as bare number");
        return Ok(Classified::BareNumber(value));
    }
    let equation = extract_equation(input)?;
    trace!(input, %equation, "classified as equation");
    Ok(Classified::Equation(equation))
}

/// Parse the line entered after a bare first operand.
///
/// Accepts a single operator character, or an operator followed by a
/// non-negative number (whitespace between them is allowed).
pub fn extract_operator_and_operand(input: &str) -> Result<Partial, InputError> {
    if input.is_empty() {
        return Err(InputError::MissingOperator);
    }

    let mut chars = input.chars();
    if let (Some(symbol), None) = (chars.next(), chars.next()) {
        return Operator::from_symbol(symbol)
            .map(Partial::OperatorOnly)
            .ok_or(InputError::InvalidOperatorInput);
    }

    let caps = OPERATOR_AND_OPERAND
        .captures(input)
        .ok_or(InputError::InvalidOperatorInput)?;
    let op = single_operator(&caps[1]).ok_or(InputError::InvalidOperatorInput)?;
    let rhs = to_number(&caps[2]).ok_or(InputError::InvalidOperatorInput)?;
    Ok(Partial::OperatorAndOperand(op, rhs))
}

/// Parse a standalone second operand.
///
/// Negative values and exponents are accepted at this stage.
pub fn parse_number(input: &str) -> Result<f64, InputError> {
    let caps = SIGNED_NUMBER
        .captures(input)
        .ok_or(InputError::InvalidNumber)?;
    to_number(&caps[1]).ok_or(InputError::InvalidNumber)
}

fn single_operator(text: &str) -> Option<Operator> {
    text.chars().next().and_then(Operator::from_symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eq(lhs: f64, symbol: char, rhs: f64) -> Classified {
        Classified::Equation(Equation::new(lhs, Operator::from_symbol(symbol).unwrap(), rhs))
    }

    #[test]
    fn test_bare_numbers_accepted() {
        for (input, expected) in [
            ("0", 0.0),
            ("12", 12.0),
            ("3.75", 3.75),
            (".5", 0.5),
            ("5.", 5.0),
            ("007", 7.0),
        ] {
            assert_eq!(classify(input), Ok(Classified::BareNumber(expected)), "{input}");
        }
    }

    #[test]
    fn test_bare_numbers_rejected() {
        for input in ["", ".", "-3", "+3", "1e5", "1.2.3", " 3", "3 ", "abc", "12a"] {
            assert_eq!(parse_bare_number(input), None, "{input:?}");
        }
    }

    #[test]
    fn test_overlong_literal_is_rejected_not_infinite() {
        let huge = "9".repeat(400);
        assert_eq!(parse_bare_number(&huge), None);
        assert_eq!(classify(&huge), Err(InputError::InvalidFirstInput));
        assert_eq!(
            classify(&format!("{huge}+1")),
            Err(InputError::InvalidFirstInput)
        );
    }

    #[test]
    fn test_equations_with_and_without_spaces() {
        assert_eq!(classify("6+3"), Ok(eq(6.0, '+', 3.0)));
        assert_eq!(classify("6 + 3"), Ok(eq(6.0, '+', 3.0)));
        assert_eq!(classify("  6 -3 "), Ok(eq(6.0, '-', 3.0)));
        assert_eq!(classify("8*9"), Ok(eq(8.0, '*', 9.0)));
        assert_eq!(classify("1.5/.5"), Ok(eq(1.5, '/', 0.5)));
        assert_eq!(classify("10-20"), Ok(eq(10.0, '-', 20.0)));
    }

    #[test]
    fn test_equations_rejected() {
        for input in [
            "6^3", "6%3", "-6+3", "6+-3", "6+", "+3", "6+3+1", "6+3abc", "6 3", "(6+3)", "1e5+3",
        ] {
            assert_eq!(classify(input), Err(InputError::InvalidFirstInput), "{input:?}");
        }
    }

    #[test]
    fn test_operator_only() {
        assert_eq!(
            extract_operator_and_operand("*"),
            Ok(Partial::OperatorOnly(Operator::Multiply))
        );
        assert_eq!(
            extract_operator_and_operand("^"),
            Err(InputError::InvalidOperatorInput)
        );
        assert_eq!(
            extract_operator_and_operand("* "),
            Err(InputError::InvalidOperatorInput)
        );
    }

    #[test]
    fn test_operator_and_operand() {
        assert_eq!(
            extract_operator_and_operand("+3"),
            Ok(Partial::OperatorAndOperand(Operator::Add, 3.0))
        );
        assert_eq!(
            extract_operator_and_operand("/ 2.5"),
            Ok(Partial::OperatorAndOperand(Operator::Divide, 2.5))
        );
        assert_eq!(
            extract_operator_and_operand("--3"),
            Err(InputError::InvalidOperatorInput)
        );
        assert_eq!(
            extract_operator_and_operand("3+"),
            Err(InputError::InvalidOperatorInput)
        );
        assert_eq!(
            extract_operator_and_operand("x3"),
            Err(InputError::InvalidOperatorInput)
        );
    }

    #[test]
    fn test_empty_operator_line() {
        assert_eq!(
            extract_operator_and_operand(""),
            Err(InputError::MissingOperator)
        );
    }

    #[test]
    fn test_second_number_allows_sign() {
        assert_eq!(parse_number("4"), Ok(4.0));
        assert_eq!(parse_number(" -2.5 "), Ok(-2.5));
        assert_eq!(parse_number("+1e2"), Ok(100.0));
        assert_eq!(parse_number("."), Err(InputError::InvalidNumber));
        assert_eq!(parse_number(""), Err(InputError::InvalidNumber));
        assert_eq!(parse_number("four"), Err(InputError::InvalidNumber));
        assert_eq!(parse_number("inf"), Err(InputError::InvalidNumber));
        assert_eq!(parse_number("1e999"), Err(InputError::InvalidNumber));
    }
}
