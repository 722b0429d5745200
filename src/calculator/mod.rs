//! Calculator core: guarded expression entry and safe evaluation.
//!
//! This module provides functionality to:
//! - Turn key presses into a well-formed expression text
//! - Evaluate expressions without a general-purpose interpreter
//! - Format results so they can be edited further

mod builder;
mod error;
mod evaluation;
mod functions;
mod key;
mod rpn;
mod script;
mod session;
mod tokenizer;

pub use builder::apply;
pub use error::{EvalError, SyntaxError};
pub use evaluation::{Evaluation, evaluate, format_value};
pub use functions::Function;
pub use key::{Key, KeyParseError, MemoryKey, Operator};
pub use script::{ScriptError, parse_script};
pub use session::{Calculator, Snapshot, Texts};
