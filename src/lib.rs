//! Keypad calculator core.
//!
//! [`calculator`] holds the key-press state machine and the evaluator,
//! [`keypad`] maps pointer events onto keys, and [`config`] loads the
//! optional TOML settings.

pub mod calculator;
pub mod config;
pub mod keypad;
