//! Key scripts: a compact way to write a sequence of key presses.
//!
//! A script is a string such as `"2+2="` or `"√9)="`. Each key label (or one
//! of its ASCII aliases) is matched greedily; whitespace between keys is
//! ignored. Multi-character labels like `MC`, `M+` and `sqrt` are recognized
//! before single characters.

use super::key::Key;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    /// Matches one key label at the start of the remaining script.
    static ref KEY_LABEL: Regex = Regex::new(
        r"^(?:MC|M\+|M-|sqrt|back|[0-9()+\-×x*÷/^√.◄<C=])"
    ).unwrap();
}

/// A script contained text that is not a key label.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized key at offset {offset}: {found:?}")]
pub struct ScriptError {
    /// Byte offset into the script.
    pub offset: usize,
    /// The offending character.
    pub found: char,
}

/// Parse a key script into the keys it presses, in order.
pub fn parse_script(script: &str) -> Result<Vec<Key>, ScriptError> {
    let mut keys = Vec::new();
    let mut offset = 0;

    while offset < script.len() {
        let rest = &script[offset..];

        let Some(c) = rest.chars().next() else {
            break;
        };
        if c.is_whitespace() {
            offset += c.len_utf8();
            continue;
        }

        let key = KEY_LABEL
            .find(rest)
            .and_then(|m| Key::from_label(m.as_str()).map(|key| (key, m.end())));

        match key {
            Some((key, len)) => {
                keys.push(key);
                offset += len;
            }
            None => return Err(ScriptError { offset, found: c }),
        }
    }

    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::key::{MemoryKey, Operator};

    #[test]
    fn test_simple_script() {
        assert_eq!(
            parse_script("2+2=").unwrap(),
            vec![
                Key::Digit(2),
                Key::Operator(Operator::Add),
                Key::Digit(2),
                Key::Evaluate,
            ]
        );
    }

    #[test]
    fn test_multi_character_labels() {
        assert_eq!(
            parse_script("MC M+ M- sqrt back").unwrap(),
            vec![
                Key::Memory(MemoryKey::Clear),
                Key::Memory(MemoryKey::Add),
                Key::Memory(MemoryKey::Subtract),
                Key::Sqrt,
                Key::Backspace,
            ]
        );
    }

    #[test]
    fn test_symbols_and_aliases() {
        assert_eq!(
            parse_script("√9)×3÷x*/◄<").unwrap(),
            vec![
                Key::Sqrt,
                Key::Digit(9),
                Key::CloseParen,
                Key::Operator(Operator::Mul),
                Key::Digit(3),
                Key::Operator(Operator::Div),
                Key::Operator(Operator::Mul),
                Key::Operator(Operator::Mul),
                Key::Operator(Operator::Div),
                Key::Backspace,
                Key::Backspace,
            ]
        );
    }

    #[test]
    fn test_unknown_key_reported() {
        assert_eq!(
            parse_script("12 % 3"),
            Err(ScriptError {
                offset: 3,
                found: '%'
            })
        );
        assert_eq!(
            parse_script("M"),
            Err(ScriptError {
                offset: 0,
                found: 'M'
            })
        );
    }

    #[test]
    fn test_empty_script() {
        assert!(parse_script("").unwrap().is_empty());
        assert!(parse_script("   ").unwrap().is_empty());
    }
}
