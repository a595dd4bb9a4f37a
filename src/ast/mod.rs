//! AST module: expression and program node definitions.

pub mod expr;

pub use expr::{dump_program, BinaryOp, Binding, Expr, ExprKind, Program, UnaryOp};
