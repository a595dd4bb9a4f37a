//! Bytecode disassembler for debug output.

use super::chunk::Bytecode;
use super::opcode::Op;
use super::value::Value;

/// Disassemble bytecode to a human-readable string.
pub fn disassemble(bytecode: &Bytecode) -> String {
    let mut out = String::new();
    for (offset, op) in bytecode.code.iter().enumerate() {
        out.push_str(&format!("{:04} ", offset));
        disassemble_op(op, bytecode, &mut out);
        out.push('\n');
    }
    out
}

fn disassemble_op(op: &Op, bytecode: &Bytecode, out: &mut String) {
    match op {
        Op::Constant(idx) => {
            out.push_str(&format!(
                "{:<18} {:>4} ({})",
                op.name(),
                idx,
                format_constant(bytecode.constants.get(*idx as usize))
            ));
        }
        _ => out.push_str(op.name()),
    }
}

fn format_constant(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(n)) => format!("{}", n),
        Some(Value::Bool(b)) => format!("{}", b),
        Some(Value::Str(s)) => format!("\"{}\"", s),
        Some(Value::Identifier(name)) => format!("identifier {}", name),
        None => "<out of range>".to_string(),
    }
}

/// Print a disassembly to stdout.
pub fn print_disassembly(bytecode: &Bytecode) {
    print!("{}", disassemble(bytecode));
}
