use logos::Logos;

use super::EvalError;

/// Tokens of the canonical expression language.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    /// Numeric literals: `42`, `3.14`, `3.`, `.5`.
    #[regex(r"[0-9]+\.?[0-9]*", parse_number)]
    #[regex(r"\.[0-9]+", parse_number)]
    Number(f64),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
}

fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Tokenize a canonical expression. Any character outside the token set
/// (including stray letters that survived an unfiltered input) is an error.
pub fn lex(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    for (result, span) in Token::lexer(input).spanned() {
        match result {
            Ok(token) => tokens.push(token),
            Err(()) => {
                return Err(EvalError::InvalidToken {
                    found: input[span].to_string(),
                });
            }
        }
    }
    Ok(tokens)
}
