//! Bytecode opcodes for the Janky VM.

/// A single bytecode instruction.
///
/// `Constant` carries its pool index in the same cell as the opcode; the `u8`
/// operand caps the constant pool at 256 entries per chunk. The enum is
/// closed, so the "unknown opcode" abort of a byte-coded dispatcher cannot
/// occur here by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Push a constant from the constant pool onto the stack.
    Constant(u8),

    // --- Arithmetic ---
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Negate,

    // --- Logical ---
    LogicalNot,
    LogicalAnd,
    LogicalOr,

    // --- Bitwise ---
    BitwiseNot,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    LeftShift,
    RightShift,

    // --- Equality ---
    Equals,
    NotEquals,
    TripleEquals,
    TripleNotEquals,

    // --- Relational ---
    LessThan,
    LessThanEquals,
    GreaterThan,
    GreaterThanEquals,

    /// End of program: print the last value left on the stack, if any.
    End,
}

impl Op {
    /// Disassembly mnemonic.
    pub fn name(&self) -> &'static str {
        match self {
            Op::Constant(_) => "CONSTANT",
            Op::Plus => "PLUS",
            Op::Minus => "MINUS",
            Op::Multiply => "MULTIPLY",
            Op::Divide => "DIVIDE",
            Op::Modulo => "MODULO",
            Op::Negate => "NEGATE",
            Op::LogicalNot => "LOGICAL_NOT",
            Op::LogicalAnd => "LOGICAL_AND",
            Op::LogicalOr => "LOGICAL_OR",
            Op::BitwiseNot => "BITWISE_NOT",
            Op::BitwiseAnd => "BITWISE_AND",
            Op::BitwiseOr => "BITWISE_OR",
            Op::BitwiseXor => "BITWISE_XOR",
            Op::LeftShift => "LEFT_SHIFT",
            Op::RightShift => "RIGHT_SHIFT",
            Op::Equals => "EQUALS",
            Op::NotEquals => "NOT_EQUALS",
            Op::TripleEquals => "TRIPLE_EQUALS",
            Op::TripleNotEquals => "TRIPLE_NOT_EQUALS",
            Op::LessThan => "LESS_THAN",
            Op::LessThanEquals => "LESS_THAN_EQUALS",
            Op::GreaterThan => "GREATER_THAN",
            Op::GreaterThanEquals => "GREATER_THAN_EQUALS",
            Op::End => "END",
        }
    }
}
