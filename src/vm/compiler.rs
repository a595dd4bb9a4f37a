//! AST-to-bytecode compiler.
//!
//! Single pass: walks the AST once, emitting into a `Bytecode`. For binary
//! nodes the right operand is compiled before the left, so the VM's handlers
//! pop the left operand first; swapping this order silently changes the
//! semantics of every non-commutative operator.

use std::rc::Rc;

use crate::ast::{BinaryOp, Expr, ExprKind, Program, UnaryOp};
use crate::error::{CompileError, InternalError, JankyError};

use super::chunk::Bytecode;
use super::opcode::Op;
use super::value::Value;

/// Result type for compilation. Internal errors mark AST nodes the compiler
/// has no lowering for, unreachable from scanned source and kept distinct from
/// user-facing compile errors.
pub type CompileResult<T> = Result<T, JankyError>;

/// The compiler: transforms a parsed program into bytecode.
pub struct Compiler {
    bytecode: Bytecode,
}

impl Compiler {
    pub fn new() -> Self {
        Self {
            bytecode: Bytecode::new(),
        }
    }

    /// Compile a full program, ending with a single trailing `End`.
    pub fn compile(program: &Program) -> CompileResult<Bytecode> {
        let mut compiler = Compiler::new();
        for stmt in &program.statements {
            compiler.compile_expr(stmt)?;
        }
        compiler.bytecode.emit(Op::End);
        Ok(compiler.bytecode)
    }

    /// Compile an expression, leaving its result on the stack.
    fn compile_expr(&mut self, expr: &Expr) -> CompileResult<()> {
        match &expr.kind {
            ExprKind::NumberLiteral(n) => {
                self.emit_constant(Value::Number(*n), expr)?;
            }
            ExprKind::BoolLiteral(b) => {
                self.emit_constant(Value::Bool(*b), expr)?;
            }
            ExprKind::StringLiteral(s) => {
                self.emit_constant(Value::Str(Rc::from(s.as_str())), expr)?;
            }
            ExprKind::Identifier(name) => {
                self.emit_constant(Value::Identifier(Rc::from(name.as_str())), expr)?;
            }
            ExprKind::Unary { op, operand } => {
                self.compile_expr(operand)?;
                match op {
                    UnaryOp::Negate => {
                        self.bytecode.emit(Op::Negate);
                    }
                    UnaryOp::LogicalNot => {
                        self.bytecode.emit(Op::LogicalNot);
                    }
                    UnaryOp::BitwiseNot => {
                        self.bytecode.emit(Op::BitwiseNot);
                    }
                    // Not lowered yet: the operand's value passes through
                    // untouched.
                    UnaryOp::Typeof => {}
                }
            }
            ExprKind::Binary { left, op, right } => {
                // Right before left: the VM pops the left operand as `a`.
                self.compile_expr(right)?;
                self.compile_expr(left)?;
                self.bytecode.emit(binary_opcode(*op));
            }
            ExprKind::VariableDeclaration { .. }
            | ExprKind::Property { .. }
            | ExprKind::Call { .. }
            | ExprKind::Unknown => {
                return Err(InternalError::UnknownAstNode.into());
            }
        }
        Ok(())
    }

    fn emit_constant(&mut self, value: Value, expr: &Expr) -> CompileResult<()> {
        let idx = self
            .bytecode
            .add_constant(value)
            .ok_or(CompileError::TooManyConstants(expr.span))?;
        self.bytecode.emit(Op::Constant(idx));
        Ok(())
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

fn binary_opcode(op: BinaryOp) -> Op {
    match op {
        BinaryOp::LogicalOr => Op::LogicalOr,
        BinaryOp::LogicalAnd => Op::LogicalAnd,
        BinaryOp::BitwiseOr => Op::BitwiseOr,
        BinaryOp::BitwiseXor => Op::BitwiseXor,
        BinaryOp::BitwiseAnd => Op::BitwiseAnd,
        BinaryOp::Equals => Op::Equals,
        BinaryOp::NotEquals => Op::NotEquals,
        BinaryOp::TripleEquals => Op::TripleEquals,
        BinaryOp::TripleNotEquals => Op::TripleNotEquals,
        BinaryOp::Less => Op::LessThan,
        BinaryOp::LessEqual => Op::LessThanEquals,
        BinaryOp::Greater => Op::GreaterThan,
        BinaryOp::GreaterEqual => Op::GreaterThanEquals,
        BinaryOp::LeftShift => Op::LeftShift,
        BinaryOp::RightShift => Op::RightShift,
        BinaryOp::Add => Op::Plus,
        BinaryOp::Subtract => Op::Minus,
        BinaryOp::Multiply => Op::Multiply,
        BinaryOp::Divide => Op::Divide,
        BinaryOp::Modulo => Op::Modulo,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Scanner;
    use crate::parser::Parser;
    use crate::span::Span;
    use pretty_assertions::assert_eq;

    fn compile_source(source: &str) -> Bytecode {
        let tokens = Scanner::new(source).scan_tokens().unwrap();
        let program = Parser::new(tokens).parse().unwrap();
        Compiler::compile(&program).unwrap()
    }

    #[test]
    fn test_literal_compiles_to_constant_and_end() {
        let bytecode = compile_source("7;");
        assert_eq!(bytecode.code, vec![Op::Constant(0), Op::End]);
        assert_eq!(bytecode.constants, vec![Value::Number(7.0)]);
    }

    #[test]
    fn test_binary_emits_right_then_left() {
        let bytecode = compile_source("2 - 5;");
        // Right operand (5) lands in the pool first.
        assert_eq!(
            bytecode.code,
            vec![Op::Constant(0), Op::Constant(1), Op::Minus, Op::End]
        );
        assert_eq!(
            bytecode.constants,
            vec![Value::Number(5.0), Value::Number(2.0)]
        );
    }

    #[test]
    fn test_no_constant_deduplication() {
        let bytecode = compile_source("1 + 1;");
        assert_eq!(bytecode.constants.len(), 2);
    }

    #[test]
    fn test_unary_chain() {
        let bytecode = compile_source("-1;");
        assert_eq!(
            bytecode.code,
            vec![Op::Constant(0), Op::Negate, Op::End]
        );
    }

    #[test]
    fn test_typeof_emits_no_opcode() {
        let bytecode = compile_source("typeof 5;");
        assert_eq!(bytecode.code, vec![Op::Constant(0), Op::End]);
    }

    #[test]
    fn test_trailing_end_is_single() {
        let bytecode = compile_source("1; 2;");
        assert_eq!(
            bytecode.code,
            vec![Op::Constant(0), Op::Constant(1), Op::End]
        );
    }

    #[test]
    fn test_declaration_is_an_internal_error() {
        let tokens = Scanner::new("let x = 1;").scan_tokens().unwrap();
        let program = Parser::new(tokens).parse().unwrap();
        let err = Compiler::compile(&program).unwrap_err();
        assert!(matches!(
            err,
            JankyError::Internal(InternalError::UnknownAstNode)
        ));
    }

    #[test]
    fn test_unknown_node_is_an_internal_error() {
        let program = Program::new(vec![Expr::new(ExprKind::Unknown, Span::origin())]);
        let err = Compiler::compile(&program).unwrap_err();
        assert!(matches!(
            err,
            JankyError::Internal(InternalError::UnknownAstNode)
        ));
    }

    #[test]
    fn test_constant_pool_overflow() {
        let mut source = String::new();
        for i in 0..257 {
            source.push_str(&format!("{};", i));
        }
        let tokens = Scanner::new(&source).scan_tokens().unwrap();
        let program = Parser::new(tokens).parse().unwrap();
        let err = Compiler::compile(&program).unwrap_err();
        assert!(matches!(
            err,
            JankyError::Compile(CompileError::TooManyConstants(_))
        ));
    }

    #[test]
    fn test_compilation_is_deterministic() {
        let a = compile_source("1 + 2 * 3 == 7;");
        let b = compile_source("1 + 2 * 3 == 7;");
        assert_eq!(a, b);
    }
}
