//! Function registry consulted by the evaluator.

use super::error::EvalError;
use std::ops::RangeInclusive;

/// A function callable from an expression as `name(arg, ...)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Function {
    /// `sqrt(x)` or `sqrt(x, n)`: the `n`th root of `x`, `n` defaulting to 2.
    Sqrt,
}

impl Function {
    /// Every registered function.
    pub const ALL: [Function; 1] = [Function::Sqrt];

    /// Name used in normalized expressions.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
        }
    }

    /// Prefix symbol used on the keypad, if any.
    pub fn symbol(self) -> Option<char> {
        match self {
            Self::Sqrt => Some('√'),
        }
    }

    /// Accepted argument counts.
    pub fn arity(self) -> RangeInclusive<usize> {
        match self {
            Self::Sqrt => 1..=2,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Call the function. `args` must already satisfy [`Function::arity`].
    pub fn apply(self, args: &[f64]) -> Result<f64, EvalError> {
        match self {
            Self::Sqrt => {
                let value = args.first().copied().unwrap_or(f64::NAN);
                let index = args.get(1).copied().unwrap_or(2.0);
                root(value, index)
            }
        }
    }
}

fn root(value: f64, index: f64) -> Result<f64, EvalError> {
    if index == 0.0 {
        return Err(EvalError::DivisionByZero);
    }

    let result = if index == 2.0 {
        value.sqrt()
    } else {
        value.powf(index.recip())
    };

    if result.is_finite() {
        Ok(result)
    } else {
        Err(EvalError::Undefined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(Function::from_name("sqrt"), Some(Function::Sqrt));
        assert_eq!(Function::from_name("cbrt"), None);
        assert_eq!(Function::Sqrt.symbol(), Some('√'));
    }

    #[test]
    fn test_sqrt_default_index() {
        assert_eq!(Function::Sqrt.apply(&[9.0]), Ok(3.0));
        assert_eq!(Function::Sqrt.apply(&[2.0, 2.0]), Ok(2f64.sqrt()));
    }

    #[test]
    fn test_sqrt_explicit_index() {
        let cube = Function::Sqrt.apply(&[27.0, 3.0]).unwrap();
        assert!((cube - 3.0).abs() < 1e-12);
        let fourth = Function::Sqrt.apply(&[16.0, 4.0]).unwrap();
        assert!((fourth - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_sqrt_failures() {
        assert_eq!(
            Function::Sqrt.apply(&[4.0, 0.0]),
            Err(EvalError::DivisionByZero)
        );
        assert_eq!(Function::Sqrt.apply(&[-4.0]), Err(EvalError::Undefined));
    }

    #[test]
    fn test_arity() {
        assert!(Function::Sqrt.arity().contains(&1));
        assert!(Function::Sqrt.arity().contains(&2));
        assert!(!Function::Sqrt.arity().contains(&3));
    }
}
