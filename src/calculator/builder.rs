//! Incremental expression editing.
//!
//! The expression text is the only state: each key press maps the current
//! text to a new one. The empty string stands for the empty placeholder;
//! prompt and error texts are handled by [`super::Calculator`] before the
//! text reaches this module.
//!
//! Operators are always written as a spaced block (`" + "`), so a text that
//! ends in a space ends in an operator block.

use super::key::{Key, Operator};

/// Apply one editing key to the expression text.
///
/// `Clear`, `Evaluate` and memory keys touch more than the expression and
/// are returned unchanged here.
pub fn apply(text: &str, key: Key) -> String {
    match key {
        Key::Digit(d) => push_digit(text, d),
        Key::OpenParen => open_scope(text, "("),
        Key::CloseParen => close_paren(text),
        Key::Sqrt => open_scope(text, "√("),
        Key::Operator(op) => push_operator(text, op),
        Key::Backspace => backspace(text),
        Key::Point => push_point(text),
        Key::Clear | Key::Evaluate | Key::Memory(_) => text.to_string(),
    }
}

/// The trailing run of digits and decimal points.
pub fn numeric_run(text: &str) -> &str {
    let start = text
        .char_indices()
        .rev()
        .take_while(|&(_, c)| c.is_ascii_digit() || c == '.')
        .last()
        .map_or(text.len(), |(i, _)| i);
    &text[start..]
}

/// Number of `(` minus number of `)`.
pub fn open_depth(text: &str) -> usize {
    let opens = text.chars().filter(|&c| c == '(').count();
    let closes = text.chars().filter(|&c| c == ')').count();
    opens.saturating_sub(closes)
}

/// The text without its trailing operator block, if it ends in one.
pub fn strip_operator_block(text: &str) -> Option<&str> {
    let mut tail = text.chars().rev();
    match (tail.next(), tail.next(), tail.next()) {
        (Some(' '), Some(symbol), Some(' ')) if Operator::from_symbol(symbol).is_some() => {
            Some(drop_last_chars(text, 3))
        }
        _ => None,
    }
}

fn drop_last_chars(text: &str, n: usize) -> &str {
    match text.char_indices().rev().nth(n - 1) {
        Some((i, _)) => &text[..i],
        None => "",
    }
}

fn ends_with_digit(text: &str) -> bool {
    text.chars().last().is_some_and(|c| c.is_ascii_digit())
}

/// Only `0..=9` are digits; any other value leaves the text unchanged.
fn push_digit(text: &str, digit: u8) -> String {
    let Some(c) = char::from_digit(u32::from(digit), 10) else {
        return text.to_string();
    };
    // A lone zero never grows into a run of leading zeros.
    if numeric_run(text) == "0" {
        return text.to_string();
    }
    format!("{text}{c}")
}

fn open_scope(text: &str, opener: &str) -> String {
    let mut out = text.to_string();
    if ends_with_digit(text) {
        out.push_str(&Operator::Mul.block());
    }
    out.push_str(opener);
    out
}

fn close_paren(text: &str) -> String {
    let mut out = text.to_string();

    if out.ends_with('(') {
        out.pop();
        if out.ends_with('√') {
            out.pop();
        }
    } else if open_depth(text) > 0 {
        out.push(')');
    }

    out
}

fn push_operator(text: &str, op: Operator) -> String {
    if let Some(base) = strip_operator_block(text) {
        return format!("{base}{}", op.block());
    }

    match text.chars().last() {
        None | Some(' ') | Some('(') | Some('.') => text.to_string(),
        Some(_) => format!("{text}{}", op.block()),
    }
}

fn backspace(text: &str) -> String {
    if text.ends_with(' ') {
        return if text.chars().count() >= 3 {
            drop_last_chars(text, 3).to_string()
        } else {
            String::new()
        };
    }

    let mut out = text.to_string();
    let removed = out.pop();

    // A square root and its opening parenthesis go together, unless the
    // removed character was a parenthesis of its own.
    if removed != Some('(') && out.ends_with("√(") {
        out.truncate(out.len() - "√(".len());
    } else if out.ends_with('√') {
        out.pop();
    }

    out
}

fn push_point(text: &str) -> String {
    let since_space = text.rfind(' ').map_or(text, |i| &text[i..]);
    if since_space.contains('.') {
        return text.to_string();
    }
    format!("{text}.")
}
