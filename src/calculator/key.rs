//! Key labels accepted by the calculator.
//!
//! Every on-screen control maps to exactly one [`Key`]. Labels are the
//! symbols printed on the buttons; a few ASCII aliases are accepted when
//! parsing so keys can be typed on a plain terminal.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A binary operator key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Operator {
    /// All operators, in keypad order.
    pub const ALL: [Operator; 5] = [
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Pow,
    ];

    /// The symbol written into the expression for this operator.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '×',
            Self::Div => '÷',
            Self::Pow => '^',
        }
    }

    /// Look up an operator by its expression symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// The operator block as it appears in an expression: `" <op> "`.
    pub fn block(self) -> String {
        format!(" {} ", self.symbol())
    }
}

/// Memory register keys. They are wired into the keypad but have no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemoryKey {
    Clear,
    Add,
    Subtract,
}

/// One activated control on the keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A decimal digit. Only `0..=9` edit the expression; [`Key::digit`]
    /// builds a checked one.
    Digit(u8),
    OpenParen,
    CloseParen,
    Operator(Operator),
    /// Square root prefix, opens its own parenthesis scope.
    Sqrt,
    Point,
    Backspace,
    Clear,
    Evaluate,
    Memory(MemoryKey),
}

/// Error returned when a label does not name any key.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown key label {0:?}")]
pub struct KeyParseError(pub String);

impl Key {
    /// Build a digit key, returning `None` for values above 9.
    pub fn digit(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self::Digit(value))
    }

    /// Parse a key from its button label or one of the accepted aliases.
    ///
    /// Surrounding whitespace is ignored.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();

        let key = match label {
            "(" => Self::OpenParen,
            ")" => Self::CloseParen,
            "+" => Self::Operator(Operator::Add),
            "-" => Self::Operator(Operator::Sub),
            "×" | "x" | "*" => Self::Operator(Operator::Mul),
            "÷" | "/" => Self::Operator(Operator::Div),
            "^" => Self::Operator(Operator::Pow),
            "√" | "sqrt" => Self::Sqrt,
            "." => Self::Point,
            "◄" | "<" | "back" => Self::Backspace,
            "C" => Self::Clear,
            "=" => Self::Evaluate,
            "MC" => Self::Memory(MemoryKey::Clear),
            "M+" => Self::Memory(MemoryKey::Add),
            "M-" => Self::Memory(MemoryKey::Subtract),
            _ => {
                let mut chars = label.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                return c.to_digit(10).map(|d| Self::Digit(d as u8));
            }
        };

        Some(key)
    }

    /// The label printed on the button for this key.
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::OpenParen => "(".to_string(),
            Self::CloseParen => ")".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Sqrt => "√".to_string(),
            Self::Point => ".".to_string(),
            Self::Backspace => "◄".to_string(),
            Self::Clear => "C".to_string(),
            Self::Evaluate => "=".to_string(),
            Self::Memory(MemoryKey::Clear) => "MC".to_string(),
            Self::Memory(MemoryKey::Add) => "M+".to_string(),
            Self::Memory(MemoryKey::Subtract) => "M-".to_string(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| KeyParseError(s.to_string()))
    }
}
