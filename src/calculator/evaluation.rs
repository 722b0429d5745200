//! Expression evaluation.
//!
//! Normalizes keypad symbols, compiles the expression to RPN and runs it.
//! No general-purpose evaluator is involved: only numbers, the five binary
//! operators, parentheses and registered functions are understood.

use super::error::EvalError;
use super::rpn::{compile, execute};
use super::tokenizer::{normalize, tokenize};
use tracing::trace;

/// A successfully evaluated expression.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    /// The expression as it was entered.
    pub expression: String,
    /// The numeric value.
    pub value: f64,
    /// The value formatted for display and further editing.
    pub value_text: String,
}

impl Evaluation {
    /// The history line shown above the expression: `"<expression> = <value>"`.
    pub fn result_line(&self) -> String {
        format!("{} = {}", self.expression, self.value_text)
    }
}

/// Evaluate a keypad expression.
pub fn evaluate(expression: &str) -> Result<Evaluation, EvalError> {
    let normalized = normalize(expression);
    let tokens = tokenize(&normalized)?;
    let program = compile(&tokens)?;
    trace!(%normalized, steps = program.len(), "compiled expression");

    let value = execute(&program)?;

    Ok(Evaluation {
        expression: expression.to_string(),
        value,
        value_text: format_value(value),
    })
}

/// Format a value for display.
///
/// Integral values have no decimal point. Anything else is printed with the
/// shortest decimal that reads back as the same `f64`, without rounding.
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        // Also covers -0.0.
        return "0".to_string();
    }
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::error::SyntaxError;

    #[test]
    fn test_basic_evaluation() {
        let result = evaluate("2 + 2").unwrap();
        assert_eq!(result.value, 4.0);
        assert_eq!(result.value_text, "4");
        assert_eq!(result.result_line(), "2 + 2 = 4");
    }

    #[test]
    fn test_keypad_symbols() {
        assert_eq!(evaluate("6 × 7").unwrap().value_text, "42");
        assert_eq!(evaluate("7 ÷ 2").unwrap().value_text, "3.5");
        assert_eq!(evaluate("2 ^ 10").unwrap().value_text, "1024");
        assert_eq!(evaluate("√(9)").unwrap().result_line(), "√(9) = 3");
        assert_eq!(evaluate("2 × √(16) + 1").unwrap().value_text, "9");
    }

    #[test]
    fn test_decimal_result_not_rounded() {
        assert_eq!(evaluate("0.1 + 0.2").unwrap().value_text, "0.30000000000000004");
        assert_eq!(evaluate("1 ÷ 3").unwrap().value_text, "0.3333333333333333");
    }

    #[test]
    fn test_chained_negative_result() {
        let first = evaluate("2 - 5").unwrap();
        assert_eq!(first.value_text, "-3");
        let second = evaluate(&format!("{} ^ 2", first.value_text)).unwrap();
        assert_eq!(second.value_text, "-9");
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(evaluate("5 ÷ 0"), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate("5 ÷ (2 - 2)"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(
            evaluate("√(9"),
            Err(EvalError::Syntax(SyntaxError::UnmatchedParen))
        );
        assert_eq!(
            evaluate("2 + "),
            Err(EvalError::Syntax(SyntaxError::MissingOperand))
        );
        assert_eq!(evaluate(""), Err(EvalError::Syntax(SyntaxError::Empty)));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(4.0), "4");
        assert_eq!(format_value(-0.0), "0");
        assert_eq!(format_value(-2.5), "-2.5");
        assert_eq!(format_value(1e20), "100000000000000000000");
        assert_eq!(format_value(1e-7), "0.0000001");
    }
}
