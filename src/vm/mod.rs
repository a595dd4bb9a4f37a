//! Bytecode VM for Janky: compiles AST to bytecode and executes it on a
//! stack machine.
//!
//! - `value`: tagged dynamic values
//! - `opcode`: instruction set
//! - `chunk`: bytecode container (instructions + constant pool)
//! - `compiler`: single-pass AST-to-bytecode lowering
//! - `vm`: the fetch-decode-execute loop
//! - `disassembler`: debug output for bytecode inspection

pub mod chunk;
pub mod compiler;
pub mod disassembler;
pub mod opcode;
pub mod value;
#[allow(clippy::module_inception)]
pub mod vm;

pub use chunk::Bytecode;
pub use compiler::Compiler;
pub use disassembler::{disassemble, print_disassembly};
pub use opcode::Op;
pub use value::Value;
pub use vm::{Vm, STACK_MAX};
