//! Error types for expression evaluation.

use thiserror::Error;

/// Ways an expression can be malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// Nothing to evaluate.
    #[error("empty expression")]
    Empty,

    /// A character outside the expression grammar.
    #[error("unexpected character {0:?} at offset {1}")]
    UnexpectedChar(char, usize),

    /// A numeric literal that does not parse, such as `1.2.3` or `.`.
    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    /// A name that is not in the function registry.
    #[error("unknown function {0:?}")]
    UnknownFunction(String),

    /// A function name not followed by `(`.
    #[error("function {0} must be followed by '('")]
    MissingCallParen(&'static str),

    /// A `(` without `)` or the other way round.
    #[error("unmatched parenthesis")]
    UnmatchedParen,

    /// An operator, comma or parenthesis with no operand where one is required.
    #[error("missing operand")]
    MissingOperand,

    /// Two operands in a row, or a token where an operator was required.
    #[error("unexpected {0}")]
    UnexpectedToken(String),

    /// A comma outside a function call.
    #[error("argument separator outside of a function call")]
    StrayComma,

    /// Wrong number of arguments for a function.
    #[error("{name} takes {min} to {max} arguments, got {got}")]
    Arity {
        name: &'static str,
        min: usize,
        max: usize,
        got: usize,
    },
}

/// Errors that can occur while evaluating an expression.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The expression is malformed.
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// A division, or an equivalent reciprocal, by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// The result is not a finite real number.
    #[error("result is undefined")]
    Undefined,
}
