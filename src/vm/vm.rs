//! The bytecode virtual machine: a stack-based execution engine.

use crate::error::{InternalError, JankyError, RuntimeError};

use super::chunk::Bytecode;
use super::opcode::Op;
use super::value::Value;

/// Maximum operand stack depth. Exceeding it (or popping an empty stack) is a
/// runtime error, not undefined behavior.
pub const STACK_MAX: usize = 256;

/// The virtual machine. Owns the bytecode for the duration of one run and is
/// discarded afterwards; successive runs never share state.
pub struct Vm {
    bytecode: Bytecode,
    ip: usize,
    stack: Vec<Value>,
    /// Values printed at `End`, captured for callers and tests.
    pub output: Vec<String>,
}

impl Vm {
    pub fn new(bytecode: Bytecode) -> Self {
        Self {
            bytecode,
            ip: 0,
            stack: Vec::with_capacity(STACK_MAX),
            output: Vec::new(),
        }
    }

    /// Run the fetch-decode-execute loop until the instruction pointer
    /// reaches the end of the code array. `End` is itself interpreted; it is
    /// not a sentinel the loop stops on directly.
    pub fn run(&mut self) -> Result<(), JankyError> {
        while self.ip < self.bytecode.code.len() {
            let op = self.bytecode.code[self.ip];
            self.ip += 1;
            self.eval_op(op)?;
        }
        Ok(())
    }

    fn eval_op(&mut self, op: Op) -> Result<(), JankyError> {
        match op {
            Op::Constant(idx) => {
                let value = self
                    .bytecode
                    .constants
                    .get(idx as usize)
                    .cloned()
                    .ok_or_else(|| {
                        InternalError::ConstantOutOfRange(
                            idx as usize,
                            self.bytecode.constants.len(),
                        )
                    })?;
                self.push(value)?;
            }

            // Operands arrive right-then-left from the compiler, so the
            // first pop is the left operand.
            Op::Plus => self.numeric_binary("+", |a, b| a + b)?,
            Op::Minus => self.numeric_binary("-", |a, b| a - b)?,
            Op::Multiply => self.numeric_binary("*", |a, b| a * b)?,
            Op::Divide => self.numeric_binary("/", |a, b| a / b)?,
            Op::Modulo => {
                let a = self.pop_number("%")?;
                let b = self.pop_number("%")?;
                // Truncating integer modulo, C cast semantics. Wrapping so
                // that i64::MIN % -1 is 0 instead of an overflow panic.
                let (a, b) = (a as i64, b as i64);
                if b == 0 {
                    return Err(RuntimeError::ModuloByZero.into());
                }
                self.push(Value::Number(a.wrapping_rem(b) as f64))?;
            }
            Op::Negate => {
                let value = self.pop()?;
                match value {
                    Value::Number(n) => self.push(Value::Number(-n))?,
                    _ => return Err(RuntimeError::NegateNonNumber.into()),
                }
            }

            Op::LogicalNot => {
                let value = self.pop()?;
                match value {
                    Value::Bool(b) => self.push(Value::Bool(!b))?,
                    _ => return Err(RuntimeError::LogicalNotNonBool.into()),
                }
            }
            Op::LogicalAnd => self.logical_binary("&&", |a, b| a && b)?,
            Op::LogicalOr => self.logical_binary("||", |a, b| a || b)?,

            Op::BitwiseNot => {
                let value = self.pop()?;
                match value {
                    Value::Number(n) => self.push(Value::Number(!(n as i64) as f64))?,
                    _ => return Err(RuntimeError::NumericOpNonNumber("~").into()),
                }
            }
            Op::BitwiseAnd => self.bitwise_binary("&", |a, b| a & b)?,
            Op::BitwiseOr => self.bitwise_binary("|", |a, b| a | b)?,
            Op::BitwiseXor => self.bitwise_binary("^", |a, b| a ^ b)?,
            // Shift counts masked to 0..63; C leaves oversized shifts
            // undefined, this does not.
            Op::LeftShift => self.bitwise_binary("<<", |a, b| a << (b & 63))?,
            Op::RightShift => self.bitwise_binary(">>", |a, b| a >> (b & 63))?,

            Op::Equals => {
                let b = self.pop()?;
                let a = self.pop()?;
                let eq = a.loose_equals(&b);
                self.push(Value::Bool(eq))?;
            }
            Op::NotEquals => {
                let b = self.pop()?;
                let a = self.pop()?;
                let eq = a.loose_equals(&b);
                self.push(Value::Bool(!eq))?;
            }

            // Pop order is reversed relative to loose equality. When the tags
            // differ both opcodes push `false`, and when they match both push
            // the un-negated equality result: TripleNotEquals behaves
            // identically to TripleEquals.
            Op::TripleEquals | Op::TripleNotEquals => {
                let a = self.pop()?;
                let b = self.pop()?;
                let result = if a.tag() != b.tag() {
                    false
                } else {
                    a.strict_equals(&b)
                };
                self.push(Value::Bool(result))?;
            }

            Op::LessThan => self.relational_binary("<", |ord| ord.is_lt())?,
            Op::LessThanEquals => self.relational_binary("<=", |ord| ord.is_le())?,
            Op::GreaterThan => self.relational_binary(">", |ord| ord.is_gt())?,
            Op::GreaterThanEquals => self.relational_binary(">=", |ord| ord.is_ge())?,

            Op::End => {
                // Only the last statement's value is observable; anything
                // beneath it on the stack is discarded with the VM.
                if self.stack.is_empty() {
                    return Ok(());
                }
                let value = self.pop()?;
                if let Value::Identifier(_) = value {
                    return Err(InternalError::UnprintableValue.into());
                }
                let rendered = value.to_string();
                println!("{}", rendered);
                self.output.push(rendered);
            }
        }

        Ok(())
    }

    // --- Binary op helpers ---

    fn numeric_binary(
        &mut self,
        name: &'static str,
        f: impl FnOnce(f64, f64) -> f64,
    ) -> Result<(), JankyError> {
        let a = self.pop_number(name)?;
        let b = self.pop_number(name)?;
        self.push(Value::Number(f(a, b)))
    }

    fn logical_binary(
        &mut self,
        name: &'static str,
        f: impl FnOnce(bool, bool) -> bool,
    ) -> Result<(), JankyError> {
        let a = self.pop_bool(name)?;
        let b = self.pop_bool(name)?;
        self.push(Value::Bool(f(a, b)))
    }

    fn bitwise_binary(
        &mut self,
        name: &'static str,
        f: impl FnOnce(i64, i64) -> i64,
    ) -> Result<(), JankyError> {
        let a = self.pop_number(name)? as i64;
        let b = self.pop_number(name)? as i64;
        self.push(Value::Number(f(a, b) as f64))
    }

    fn relational_binary(
        &mut self,
        name: &'static str,
        f: impl FnOnce(std::cmp::Ordering) -> bool,
    ) -> Result<(), JankyError> {
        let a = self.pop()?;
        let b = self.pop()?;
        if a.tag() != b.tag() {
            return Err(RuntimeError::NumericOpNonNumber(name).into());
        }
        let ord = match (&a, &b) {
            (Value::Number(x), Value::Number(y)) => {
                x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal)
            }
            (Value::Bool(x), Value::Bool(y)) => (*x as u8).cmp(&(*y as u8)),
            (Value::Str(x), Value::Str(y)) => x.cmp(y),
            (Value::Identifier(x), Value::Identifier(y)) => x.cmp(y),
            _ => unreachable!("tags checked above"),
        };
        self.push(Value::Bool(f(ord)))
    }

    // --- Stack discipline ---

    fn push(&mut self, value: Value) -> Result<(), JankyError> {
        if self.stack.len() >= STACK_MAX {
            return Err(RuntimeError::StackOverflow.into());
        }
        self.stack.push(value);
        Ok(())
    }

    fn pop(&mut self) -> Result<Value, JankyError> {
        self.stack
            .pop()
            .ok_or_else(|| RuntimeError::StackUnderflow.into())
    }

    fn pop_number(&mut self, name: &'static str) -> Result<f64, JankyError> {
        match self.pop()? {
            Value::Number(n) => Ok(n),
            _ => Err(RuntimeError::NumericOpNonNumber(name).into()),
        }
    }

    fn pop_bool(&mut self, name: &'static str) -> Result<bool, JankyError> {
        match self.pop()? {
            Value::Bool(b) => Ok(b),
            _ => Err(RuntimeError::LogicalOpNonBool(name).into()),
        }
    }
}
