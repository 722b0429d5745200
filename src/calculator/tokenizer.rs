//! Symbol normalization and tokenization.
//!
//! Keypad expressions use display symbols (`×`, `÷`, `^`, `√`). They are
//! first rewritten into a plain ASCII form (`*`, `/`, `**`, `sqrt`) and then
//! split into tokens.

use super::error::SyntaxError;
use super::functions::Function;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    /// `**`
    Power,
    LParen,
    RParen,
    Comma,
    Function(Function),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "number {n}"),
            Self::Plus => write!(f, "'+'"),
            Self::Minus => write!(f, "'-'"),
            Self::Star => write!(f, "'*'"),
            Self::Slash => write!(f, "'/'"),
            Self::Power => write!(f, "'**'"),
            Self::LParen => write!(f, "'('"),
            Self::RParen => write!(f, "')'"),
            Self::Comma => write!(f, "','"),
            Self::Function(func) => write!(f, "function {}", func.name()),
        }
    }
}

/// Rewrite display symbols into their computable ASCII form.
pub fn normalize(expression: &str) -> String {
    let mut out = String::with_capacity(expression.len() + 8);

    for c in expression.chars() {
        match c {
            '÷' => out.push('/'),
            '×' => out.push('*'),
            '^' => out.push_str("**"),
            _ => match Function::ALL.into_iter().find(|f| f.symbol() == Some(c)) {
                Some(func) => out.push_str(func.name()),
                None => out.push(c),
            },
        }
    }

    out
}

/// Split a normalized expression into tokens.
pub fn tokenize(input: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let mut end = start;
            while let Some(&(i, d)) = chars.peek() {
                if !(d.is_ascii_digit() || d == '.') {
                    break;
                }
                end = i + d.len_utf8();
                chars.next();
            }
            tokens.push(parse_number(&input[start..end])?);
            continue;
        }

        if c.is_ascii_alphabetic() {
            let mut end = start;
            while let Some(&(i, d)) = chars.peek() {
                if !(d.is_ascii_alphanumeric() || d == '_') {
                    break;
                }
                end = i + d.len_utf8();
                chars.next();
            }
            let name = &input[start..end];
            let func = Function::from_name(name)
                .ok_or_else(|| SyntaxError::UnknownFunction(name.to_string()))?;
            tokens.push(Token::Function(func));
            continue;
        }

        chars.next();
        let token = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => {
                if chars.next_if(|&(_, d)| d == '*').is_some() {
                    Token::Power
                } else {
                    Token::Star
                }
            }
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            other => return Err(SyntaxError::UnexpectedChar(other, start)),
        };
        tokens.push(token);
    }

    Ok(tokens)
}

fn parse_number(literal: &str) -> Result<Token, SyntaxError> {
    literal
        .parse::<f64>()
        .map(Token::Number)
        .map_err(|_| SyntaxError::InvalidNumber(literal.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_symbols() {
        assert_eq!(normalize("2 × 3 ÷ 4 ^ 5"), "2 * 3 / 4 ** 5");
        assert_eq!(normalize("√(9)"), "sqrt(9)");
        assert_eq!(normalize("1 + 2"), "1 + 2");
    }

    #[test]
    fn test_tokenize_expression() {
        let tokens = tokenize("sqrt(2.5, 3) ** -1").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Function(Function::Sqrt),
                Token::LParen,
                Token::Number(2.5),
                Token::Comma,
                Token::Number(3.0),
                Token::RParen,
                Token::Power,
                Token::Minus,
                Token::Number(1.0),
            ]
        );
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(tokenize("5.").unwrap(), vec![Token::Number(5.0)]);
        assert_eq!(tokenize(".5").unwrap(), vec![Token::Number(0.5)]);
        assert_eq!(
            tokenize("."),
            Err(SyntaxError::InvalidNumber(".".to_string()))
        );
        assert_eq!(
            tokenize("1.2.3"),
            Err(SyntaxError::InvalidNumber("1.2.3".to_string()))
        );
    }

    #[test]
    fn test_rejects_unknown_input() {
        assert_eq!(
            tokenize("2 % 3"),
            Err(SyntaxError::UnexpectedChar('%', 2))
        );
        assert_eq!(
            tokenize("pow(2)"),
            Err(SyntaxError::UnknownFunction("pow".to_string()))
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize("   ").unwrap(), vec![]);
    }
}
