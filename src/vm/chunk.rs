//! Bytecode container: instruction sequence plus constant pool.

use super::opcode::Op;
use super::value::Value;

/// Compiled bytecode: a flat instruction array and its constant pool.
/// Both are append-only during compilation and handed to the VM by move.
#[derive(Debug, Clone, PartialEq)]
pub struct Bytecode {
    pub code: Vec<Op>,
    pub constants: Vec<Value>,
}

impl Bytecode {
    pub fn new() -> Self {
        Self {
            code: Vec::new(),
            constants: Vec::new(),
        }
    }

    /// Emit an instruction, returning its offset.
    pub fn emit(&mut self, op: Op) -> usize {
        let offset = self.code.len();
        self.code.push(op);
        offset
    }

    /// Add a constant to the pool and return its index. No deduplication:
    /// duplicate literals get duplicate entries. Returns `None` once the
    /// `u8` operand width is exhausted.
    pub fn add_constant(&mut self, value: Value) -> Option<u8> {
        if self.constants.len() > u8::MAX as usize {
            return None;
        }
        let idx = self.constants.len() as u8;
        self.constants.push(value);
        Some(idx)
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

impl Default for Bytecode {
    fn default() -> Self {
        Self::new()
    }
}
