//! Safe arithmetic evaluation
//!
//! A small recursive-descent evaluator over the canonical character set.
//! There is deliberately no ambient interpreter here: no identifiers, no
//! function calls, no side effects. Malformed input and non-finite results
//! come back as `EvalError` values.

mod lexer;
mod parser;

pub use parser::{BinaryOperator, Expr};

/// Ways an evaluation can fail. The session renders all of these (except
/// `EmptyInput`, which stays silent) as a single "invalid expression"
/// indicator; the variants exist for diagnostics and tests.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Nothing to evaluate.
    EmptyInput,
    /// Expression ends in something other than a digit or `)`.
    TrailingOperator,
    /// A character outside the expression language.
    InvalidToken { found: String },
    /// A token in a position where it cannot appear.
    UnexpectedToken { found: String },
    /// Input ended mid-expression.
    UnexpectedEndOfInput,
    /// An opening parenthesis was never closed.
    ExpectedClosingParen,
    /// The computation produced an infinite or not-a-number value.
    NonFinite,
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "Empty expression."),
            Self::TrailingOperator => write!(f, "Expression ends in an operator."),
            Self::InvalidToken { found } => write!(f, "Invalid token: {found}."),
            Self::UnexpectedToken { found } => write!(f, "Unexpected token: {found}."),
            Self::UnexpectedEndOfInput => write!(f, "Unexpected end of expression."),
            Self::ExpectedClosingParen => {
                write!(f, "Expected closing parenthesis ')' but none found.")
            }
            Self::NonFinite => write!(f, "Result is not a finite number."),
        }
    }
}

impl std::error::Error for EvalError {}

/// Evaluate a canonical expression string to a finite value.
///
/// Division by zero, `0 / 0`, and fractional powers of negative bases all
/// produce non-finite f64 values and are reported as `EvalError::NonFinite`.
pub fn evaluate(expr: &str) -> Result<f64, EvalError> {
    let expr = expr.trim();
    if expr.is_empty() {
        return Err(EvalError::EmptyInput);
    }

    // A well-formed expression can only end in a digit or a closing paren.
    // Catches dangling operators ("3 + ") before parsing.
    match expr.chars().last() {
        Some(c) if c.is_ascii_digit() || c == ')' => {}
        _ => return Err(EvalError::TrailingOperator),
    }

    let tokens = lexer::lex(expr)?;
    let tree = parser::parse(&tokens)?;
    let value = eval_node(&tree);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFinite)
    }
}

fn eval_node(expr: &Expr) -> f64 {
    match expr {
        Expr::Number(value) => *value,
        Expr::Neg(inner) => -eval_node(inner),
        Expr::BinaryOp { op, left, right } => {
            let left = eval_node(left);
            let right = eval_node(right);
            match op {
                BinaryOperator::Add => left + right,
                BinaryOperator::Sub => left - right,
                BinaryOperator::Mul => left * right,
                BinaryOperator::Div => left / right,
                // f64 remainder keeps the dividend's sign, like fmod
                BinaryOperator::Mod => left % right,
                BinaryOperator::Pow => left.powf(right),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(evaluate("5 + 3").unwrap(), 8.0);
        assert_eq!(evaluate("5 - 3").unwrap(), 2.0);
        assert_eq!(evaluate("4 * 2.5").unwrap(), 10.0);
        assert_eq!(evaluate("9 / 2").unwrap(), 4.5);
    }

    #[test]
    fn test_precedence() {
        assert_eq!(evaluate("1 + 2 * 3").unwrap(), 7.0);
        assert_eq!(evaluate("(1 + 2) * 3").unwrap(), 9.0);
        assert_eq!(evaluate("10 - 4 - 3").unwrap(), 3.0);
        assert_eq!(evaluate("16 / 4 / 2").unwrap(), 2.0);
    }

    #[test]
    fn test_power() {
        assert_eq!(evaluate("2 ^ 3").unwrap(), 8.0);
        // right-associative: 2 ^ (3 ^ 2)
        assert_eq!(evaluate("2 ^ 3 ^ 2").unwrap(), 512.0);
        assert_eq!(evaluate("2 ^ -1").unwrap(), 0.5);
        assert_eq!(evaluate("4 ^ 0.5").unwrap(), 2.0);
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(evaluate("-5 + 3").unwrap(), -2.0);
        assert_eq!(evaluate("2 * -3").unwrap(), -6.0);
        // exponent binds tighter than unary minus
        assert_eq!(evaluate("-2 ^ 2").unwrap(), -4.0);
        assert_eq!(evaluate("(-2) ^ 2").unwrap(), 4.0);
    }

    #[test]
    fn test_modulo() {
        assert_eq!(evaluate("7 % 3").unwrap(), 1.0);
        assert_eq!(evaluate("7.5 % 2").unwrap(), 1.5);
        // remainder follows the dividend's sign
        assert_eq!(evaluate("-7 % 3").unwrap(), -1.0);
    }

    #[test]
    fn test_division_by_zero_fails() {
        assert_eq!(evaluate("10 / 0"), Err(EvalError::NonFinite));
        assert_eq!(evaluate("0 / 0"), Err(EvalError::NonFinite));
    }

    #[test]
    fn test_complex_power_fails() {
        // fractional power of a negative base is NaN in f64
        assert_eq!(evaluate("(0 - 2) ^ 0.5"), Err(EvalError::NonFinite));
    }

    #[test]
    fn test_empty_input_fails() {
        assert_eq!(evaluate(""), Err(EvalError::EmptyInput));
        assert_eq!(evaluate("   "), Err(EvalError::EmptyInput));
    }

    #[test]
    fn test_trailing_operator_fails() {
        assert_eq!(evaluate("3 + "), Err(EvalError::TrailingOperator));
        assert_eq!(evaluate("3 *"), Err(EvalError::TrailingOperator));
        assert_eq!(evaluate("3."), Err(EvalError::TrailingOperator));
    }

    #[test]
    fn test_malformed_expressions_fail() {
        assert!(evaluate("(1 + 2").is_err());
        assert!(evaluate("1 + * 2").is_err());
        assert!(evaluate("abc").is_err());
    }

    #[test]
    fn test_decimals() {
        assert_eq!(evaluate("0.5 + .5").unwrap(), 1.0);
        assert_eq!(evaluate("3.141592653589793 * 2").unwrap(), std::f64::consts::TAU);
    }

    #[test]
    fn test_digit_plus_chains_match_sums() {
        assert_eq!(evaluate("1 + 2 + 3 + 4").unwrap(), 10.0);
        assert_eq!(evaluate("7").unwrap(), 7.0);
    }
}
