use std::iter::Peekable;

use super::EvalError;
use super::lexer::Token;

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Neg(Box<Expr>),
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

type TokenStream<'a> = Peekable<std::slice::Iter<'a, Token>>;

/// Parse a full token stream into an expression tree. Trailing tokens after
/// a complete expression are an error.
pub fn parse(tokens: &[Token]) -> Result<Expr, EvalError> {
    let mut stream = tokens.iter().peekable();
    let expr = parse_additive(&mut stream)?;
    match stream.next() {
        None => Ok(expr),
        Some(token) => Err(EvalError::UnexpectedToken {
            found: format!("{token:?}"),
        }),
    }
}

/// `additive := multiplicative (("+" | "-") multiplicative)*`, left-associative.
fn parse_additive(tokens: &mut TokenStream<'_>) -> Result<Expr, EvalError> {
    let mut left = parse_multiplicative(tokens)?;
    loop {
        let op = match tokens.peek() {
            Some(Token::Plus) => BinaryOperator::Add,
            Some(Token::Minus) => BinaryOperator::Sub,
            _ => break,
        };
        tokens.next();
        let right = parse_multiplicative(tokens)?;
        left = Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        };
    }
    Ok(left)
}

/// `multiplicative := unary (("*" | "/" | "%") unary)*`, left-associative.
fn parse_multiplicative(tokens: &mut TokenStream<'_>) -> Result<Expr, EvalError> {
    let mut left = parse_unary(tokens)?;
    loop {
        let op = match tokens.peek() {
            Some(Token::Star) => BinaryOperator::Mul,
            Some(Token::Slash) => BinaryOperator::Div,
            Some(Token::Percent) => BinaryOperator::Mod,
            _ => break,
        };
        tokens.next();
        let right = parse_unary(tokens)?;
        left = Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        };
    }
    Ok(left)
}

/// `unary := "-" unary | power`
///
/// Unary minus binds looser than `^`, so `-2 ^ 2` is `-(2 ^ 2)`.
fn parse_unary(tokens: &mut TokenStream<'_>) -> Result<Expr, EvalError> {
    if let Some(Token::Minus) = tokens.peek() {
        tokens.next();
        let inner = parse_unary(tokens)?;
        return Ok(Expr::Neg(Box::new(inner)));
    }
    parse_power(tokens)
}

/// `power := primary ("^" unary)?`
///
/// Right-associative via recursion through `unary`, which also makes
/// negative exponents (`2 ^ -3`) parse without extra parentheses.
fn parse_power(tokens: &mut TokenStream<'_>) -> Result<Expr, EvalError> {
    let base = parse_primary(tokens)?;
    if let Some(Token::Caret) = tokens.peek() {
        tokens.next();
        let exponent = parse_unary(tokens)?;
        return Ok(Expr::BinaryOp {
            op: BinaryOperator::Pow,
            left: Box::new(base),
            right: Box::new(exponent),
        });
    }
    Ok(base)
}

/// `primary := NUMBER | "(" additive ")"`
fn parse_primary(tokens: &mut TokenStream<'_>) -> Result<Expr, EvalError> {
    match tokens.next() {
        Some(Token::Number(value)) => Ok(Expr::Number(*value)),
        Some(Token::LParen) => {
            let inner = parse_additive(tokens)?;
            match tokens.next() {
                Some(Token::RParen) => Ok(inner),
                Some(token) => Err(EvalError::UnexpectedToken {
                    found: format!("{token:?}"),
                }),
                None => Err(EvalError::ExpectedClosingParen),
            }
        }
        Some(token) => Err(EvalError::UnexpectedToken {
            found: format!("{token:?}"),
        }),
        None => Err(EvalError::UnexpectedEndOfInput),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::lexer::lex;

    fn parse_str(input: &str) -> Result<Expr, EvalError> {
        parse(&lex(input).unwrap())
    }

    #[test]
    fn test_precedence_shape() {
        // 1 + 2 * 3 parses as 1 + (2 * 3)
        let expr = parse_str("1 + 2 * 3").unwrap();
        match expr {
            Expr::BinaryOp {
                op: BinaryOperator::Add,
                right,
                ..
            } => {
                assert!(matches!(
                    *right,
                    Expr::BinaryOp {
                        op: BinaryOperator::Mul,
                        ..
                    }
                ));
            }
            other => panic!("unexpected tree: {other:?}"),
        }
    }

    #[test]
    fn test_unbalanced_parens() {
        assert!(matches!(
            parse_str("(1 + 2"),
            Err(EvalError::ExpectedClosingParen)
        ));
        assert!(matches!(
            parse_str("1 + 2)"),
            Err(EvalError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn test_dangling_operator_is_rejected() {
        assert!(matches!(
            parse_str("3 +"),
            Err(EvalError::UnexpectedEndOfInput)
        ));
    }

    #[test]
    fn test_adjacent_numbers_are_rejected() {
        assert!(matches!(
            parse_str("1 2"),
            Err(EvalError::UnexpectedToken { .. })
        ));
    }
}
