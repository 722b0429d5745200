//! The calculator state machine.
//!
//! A [`Calculator`] owns the two texts shown to the user: the expression
//! being typed and the result line holding the last successful evaluation.
//! Each [`Calculator::press`] runs to completion and replaces whole values.

use super::builder;
use super::evaluation::evaluate;
use super::key::Key;
use serde::Serialize;
use tracing::debug;

/// Placeholder texts shown instead of an expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texts {
    /// Shown before any input.
    pub prompt: String,
    /// Shown after a failed evaluation.
    pub error: String,
    /// Initial result line.
    pub banner: String,
}

impl Default for Texts {
    fn default() -> Self {
        Self {
            prompt: "Write!".to_string(),
            error: "Error".to_string(),
            banner: "Pad Calculator".to_string(),
        }
    }
}

/// The two texts a renderer displays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub expression: String,
    pub result_line: String,
}

/// What the expression line holds.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Entry {
    Prompt,
    Error,
    Text(String),
}

/// Calculator state: the expression under construction and the result line.
#[derive(Clone, Debug)]
pub struct Calculator {
    entry: Entry,
    result_line: String,
    texts: Texts,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(Texts::default())
    }
}

impl Calculator {
    pub fn new(texts: Texts) -> Self {
        Self {
            entry: Entry::Prompt,
            result_line: texts.banner.clone(),
            texts,
        }
    }

    /// The expression text, or the prompt/error placeholder.
    pub fn expression(&self) -> &str {
        match &self.entry {
            Entry::Prompt => &self.texts.prompt,
            Entry::Error => &self.texts.error,
            Entry::Text(text) => text,
        }
    }

    /// The last `"<expression> = <value>"` line, the banner, or empty.
    pub fn result_line(&self) -> &str {
        &self.result_line
    }

    pub fn texts(&self) -> &Texts {
        &self.texts
    }

    /// Whether the expression is showing the prompt.
    pub fn is_prompt(&self) -> bool {
        self.entry == Entry::Prompt
    }

    /// Whether the expression is showing the error marker.
    pub fn is_error(&self) -> bool {
        self.entry == Entry::Error
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            expression: self.expression().to_string(),
            result_line: self.result_line.clone(),
        }
    }

    /// Apply a sequence of key presses in order.
    pub fn press_all(&mut self, keys: impl IntoIterator<Item = Key>) {
        for key in keys {
            self.press(key);
        }
    }

    /// Apply one key press.
    pub fn press(&mut self, key: Key) {
        // Placeholders never take part in editing.
        let text = match std::mem::replace(&mut self.entry, Entry::Prompt) {
            Entry::Prompt | Entry::Error => String::new(),
            Entry::Text(text) => text,
        };

        self.entry = match key {
            Key::Clear => {
                if text.is_empty() {
                    self.result_line.clear();
                }
                Entry::Prompt
            }
            Key::Evaluate => self.evaluate(text),
            Key::Memory(memory) => {
                debug!(?memory, "memory keys have no effect");
                Entry::from_text(text)
            }
            _ => Entry::from_text(builder::apply(&text, key)),
        };

        debug!(%key, expression = %self.expression(), "key applied");
    }

    fn evaluate(&mut self, text: String) -> Entry {
        match evaluate(&text) {
            Ok(evaluation) => {
                self.result_line = evaluation.result_line();
                Entry::from_text(evaluation.value_text)
            }
            Err(error) => {
                debug!(expression = %text, %error, "evaluation failed");
                Entry::Error
            }
        }
    }
}

impl Entry {
    /// An empty text falls back to the prompt.
    fn from_text(text: String) -> Self {
        if text.is_empty() {
            Self::Prompt
        } else {
            Self::Text(text)
        }
    }
}
