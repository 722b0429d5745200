//! Shunting-yard conversion to reverse Polish notation, and its execution.
//!
//! Conversion tracks whether the next token must be an operand, which is
//! enough to reject every malformed sequence before anything is computed.

use super::error::{EvalError, SyntaxError};
use super::functions::Function;
use super::tokenizer::Token;

/// Precedence of unary minus: above `*` and `/`, below `**`.
const NEGATE_PRECEDENCE: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    fn from_token(token: Token) -> Option<Self> {
        match token {
            Token::Plus => Some(Self::Add),
            Token::Minus => Some(Self::Sub),
            Token::Star => Some(Self::Mul),
            Token::Slash => Some(Self::Div),
            Token::Power => Some(Self::Pow),
            _ => None,
        }
    }

    fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
            Self::Pow => 4,
        }
    }

    fn is_right_associative(self) -> bool {
        matches!(self, Self::Pow)
    }

    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, EvalError> {
        let value = match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => {
                if rhs == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                lhs / rhs
            }
            Self::Pow => {
                if lhs == 0.0 && rhs < 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                lhs.powf(rhs)
            }
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::Undefined)
        }
    }
}

/// One step of an RPN program.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Instruction {
    Push(f64),
    Negate,
    Binary(BinaryOp),
    /// Call a function with the given number of arguments from the stack.
    Call(Function, usize),
}

#[derive(Debug)]
enum Pending {
    Binary(BinaryOp),
    Negate,
    /// An open parenthesis, owned by a function call when `call` is set.
    Paren {
        call: Option<Function>,
        args: usize,
    },
}

impl Pending {
    /// Whether this pending operator must be emitted before `incoming` is pushed.
    fn binds_before(&self, incoming: BinaryOp) -> bool {
        let precedence = match self {
            Self::Binary(op) => op.precedence(),
            Self::Negate => NEGATE_PRECEDENCE,
            Self::Paren { .. } => return false,
        };
        precedence > incoming.precedence()
            || (precedence == incoming.precedence() && !incoming.is_right_associative())
    }
}

/// Convert a token stream into an RPN program.
pub fn compile(tokens: &[Token]) -> Result<Vec<Instruction>, SyntaxError> {
    if tokens.is_empty() {
        return Err(SyntaxError::Empty);
    }

    let mut output = Vec::with_capacity(tokens.len());
    let mut pending: Vec<Pending> = Vec::new();
    let mut expect_operand = true;
    let mut iter = tokens.iter().copied().peekable();

    while let Some(token) = iter.next() {
        match token {
            Token::Number(value) => {
                if !expect_operand {
                    return Err(SyntaxError::UnexpectedToken(token.to_string()));
                }
                output.push(Instruction::Push(value));
                expect_operand = false;
            }
            Token::Function(func) => {
                if !expect_operand {
                    return Err(SyntaxError::UnexpectedToken(token.to_string()));
                }
                if iter.next_if_eq(&Token::LParen).is_none() {
                    return Err(SyntaxError::MissingCallParen(func.name()));
                }
                pending.push(Pending::Paren {
                    call: Some(func),
                    args: 1,
                });
            }
            Token::LParen => {
                if !expect_operand {
                    return Err(SyntaxError::UnexpectedToken(token.to_string()));
                }
                pending.push(Pending::Paren {
                    call: None,
                    args: 1,
                });
            }
            Token::RParen => {
                if expect_operand {
                    return Err(SyntaxError::MissingOperand);
                }
                let (call, args) = unwind_to_paren(&mut pending, &mut output)?;
                if let Some(func) = call {
                    check_arity(func, args)?;
                    output.push(Instruction::Call(func, args));
                }
            }
            Token::Comma => {
                if expect_operand {
                    return Err(SyntaxError::MissingOperand);
                }
                drain_operators(&mut pending, &mut output);
                match pending.last_mut() {
                    Some(Pending::Paren {
                        call: Some(_),
                        args,
                    }) => *args += 1,
                    _ => return Err(SyntaxError::StrayComma),
                }
                expect_operand = true;
            }
            Token::Plus | Token::Minus if expect_operand => {
                if token == Token::Minus {
                    pending.push(Pending::Negate);
                }
            }
            _ => {
                let Some(op) = BinaryOp::from_token(token) else {
                    return Err(SyntaxError::UnexpectedToken(token.to_string()));
                };
                if expect_operand {
                    return Err(SyntaxError::MissingOperand);
                }
                while pending.last().is_some_and(|top| top.binds_before(op)) {
                    if let Some(top) = pending.pop() {
                        emit(top, &mut output);
                    }
                }
                pending.push(Pending::Binary(op));
                expect_operand = true;
            }
        }
    }

    if expect_operand {
        return Err(SyntaxError::MissingOperand);
    }

    while let Some(top) = pending.pop() {
        if matches!(top, Pending::Paren { .. }) {
            return Err(SyntaxError::UnmatchedParen);
        }
        emit(top, &mut output);
    }

    Ok(output)
}

fn emit(entry: Pending, output: &mut Vec<Instruction>) {
    match entry {
        Pending::Binary(op) => output.push(Instruction::Binary(op)),
        Pending::Negate => output.push(Instruction::Negate),
        Pending::Paren { .. } => {}
    }
}

/// Emit operators down to, but not including, the innermost open parenthesis.
fn drain_operators(pending: &mut Vec<Pending>, output: &mut Vec<Instruction>) {
    while pending
        .last()
        .is_some_and(|top| !matches!(top, Pending::Paren { .. }))
    {
        if let Some(top) = pending.pop() {
            emit(top, output);
        }
    }
}

/// Emit operators and pop the innermost open parenthesis.
fn unwind_to_paren(
    pending: &mut Vec<Pending>,
    output: &mut Vec<Instruction>,
) -> Result<(Option<Function>, usize), SyntaxError> {
    drain_operators(pending, output);
    match pending.pop() {
        Some(Pending::Paren { call, args }) => Ok((call, args)),
        _ => Err(SyntaxError::UnmatchedParen),
    }
}

fn check_arity(func: Function, got: usize) -> Result<(), SyntaxError> {
    let arity = func.arity();
    if arity.contains(&got) {
        Ok(())
    } else {
        Err(SyntaxError::Arity {
            name: func.name(),
            min: *arity.start(),
            max: *arity.end(),
            got,
        })
    }
}

/// Run an RPN program and return the single value it leaves on the stack.
pub fn execute(program: &[Instruction]) -> Result<f64, EvalError> {
    let mut stack: Vec<f64> = Vec::with_capacity(program.len());

    for instruction in program {
        match *instruction {
            Instruction::Push(value) => stack.push(value),
            Instruction::Negate => {
                let value = pop(&mut stack)?;
                stack.push(-value);
            }
            Instruction::Binary(op) => {
                let rhs = pop(&mut stack)?;
                let lhs = pop(&mut stack)?;
                stack.push(op.apply(lhs, rhs)?);
            }
            Instruction::Call(func, argc) => {
                if stack.len() < argc {
                    return Err(SyntaxError::MissingOperand.into());
                }
                let args = stack.split_off(stack.len() - argc);
                stack.push(func.apply(&args)?);
            }
        }
    }

    match stack.as_slice() {
        [value] => Ok(*value),
        _ => Err(SyntaxError::MissingOperand.into()),
    }
}

fn pop(stack: &mut Vec<f64>) -> Result<f64, EvalError> {
    stack
        .pop()
        .ok_or(EvalError::Syntax(SyntaxError::MissingOperand))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::tokenizer::tokenize;

    fn run(input: &str) -> Result<f64, EvalError> {
        let tokens = tokenize(input)?;
        let program = compile(&tokens)?;
        execute(&program)
    }

    fn syntax(input: &str) -> SyntaxError {
        match run(input) {
            Err(EvalError::Syntax(e)) => e,
            other => panic!("expected syntax error for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_precedence() {
        assert_eq!(run("2 + 3 * 4"), Ok(14.0));
        assert_eq!(run("(2 + 3) * 4"), Ok(20.0));
        assert_eq!(run("10 - 4 - 3"), Ok(3.0));
        assert_eq!(run("64 / 4 / 2"), Ok(8.0));
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(run("2 ** 3 ** 2"), Ok(512.0));
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(run("-3 ** 2"), Ok(-9.0));
        assert_eq!(run("2 ** -1"), Ok(0.5));
        assert_eq!(run("-3 * 2"), Ok(-6.0));
        assert_eq!(run("-3 + 1"), Ok(-2.0));
        assert_eq!(run("+4"), Ok(4.0));
    }

    #[test]
    fn test_compile_order() {
        let program = compile(&tokenize("1 + 2 * 3").unwrap()).unwrap();
        assert_eq!(
            program,
            vec![
                Instruction::Push(1.0),
                Instruction::Push(2.0),
                Instruction::Push(3.0),
                Instruction::Binary(BinaryOp::Mul),
                Instruction::Binary(BinaryOp::Add),
            ]
        );
    }

    #[test]
    fn test_function_calls() {
        assert_eq!(run("sqrt(9)"), Ok(3.0));
        assert_eq!(run("2 * sqrt(4 + 5)"), Ok(6.0));
        assert_eq!(run("sqrt(sqrt(16))"), Ok(2.0));
        let cube = run("sqrt(8, 3)").unwrap();
        assert!((cube - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_malformed_sequences() {
        assert_eq!(syntax(""), SyntaxError::Empty);
        assert_eq!(syntax("2 +"), SyntaxError::MissingOperand);
        assert_eq!(syntax("* 2"), SyntaxError::MissingOperand);
        assert_eq!(syntax("()"), SyntaxError::MissingOperand);
        assert_eq!(syntax("(2"), SyntaxError::UnmatchedParen);
        assert_eq!(syntax("2)"), SyntaxError::UnmatchedParen);
        assert_eq!(syntax("sqrt(9"), SyntaxError::UnmatchedParen);
        assert_eq!(syntax("1, 2"), SyntaxError::StrayComma);
        assert_eq!(syntax("(1, 2)"), SyntaxError::StrayComma);
        assert_eq!(syntax("sqrt 9"), SyntaxError::MissingCallParen("sqrt"));
        assert!(matches!(syntax("(2)(3)"), SyntaxError::UnexpectedToken(_)));
        assert!(matches!(syntax("(2)3"), SyntaxError::UnexpectedToken(_)));
    }

    #[test]
    fn test_arity_checked() {
        assert_eq!(
            syntax("sqrt(1, 2, 3)"),
            SyntaxError::Arity {
                name: "sqrt",
                min: 1,
                max: 2,
                got: 3
            }
        );
    }

    #[test]
    fn test_arithmetic_failures() {
        assert_eq!(run("5 / 0"), Err(EvalError::DivisionByZero));
        assert_eq!(run("0 ** -1"), Err(EvalError::DivisionByZero));
        assert_eq!(run("10 ** 400"), Err(EvalError::Undefined));
        assert_eq!(run("sqrt(-1)"), Err(EvalError::Undefined));
    }
}
