//! Expression AST nodes.

use crate::span::Span;

/// An expression in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Binding keyword of a variable declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Let,
    Var,
    Const,
    Unknown,
}

impl std::fmt::Display for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Binding::Let => write!(f, "let"),
            Binding::Var => write!(f, "var"),
            Binding::Const => write!(f, "const"),
            Binding::Unknown => write!(f, "unknown"),
        }
    }
}

/// Unary prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-x`
    Negate,
    /// `!x`
    LogicalNot,
    /// `~x`
    BitwiseNot,
    /// `typeof x`, parsed but not yet lowered to bytecode.
    Typeof,
}

impl std::fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOp::Negate => write!(f, "-"),
            UnaryOp::LogicalNot => write!(f, "!"),
            UnaryOp::BitwiseNot => write!(f, "~"),
            UnaryOp::Typeof => write!(f, "typeof"),
        }
    }
}

/// Binary operators, lowest-to-highest binding power groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equals,
    NotEquals,
    TripleEquals,
    TripleNotEquals,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    LeftShift,
    RightShift,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BinaryOp::LogicalOr => "||",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::BitwiseOr => "|",
            BinaryOp::BitwiseXor => "^",
            BinaryOp::BitwiseAnd => "&",
            BinaryOp::Equals => "==",
            BinaryOp::NotEquals => "!=",
            BinaryOp::TripleEquals => "===",
            BinaryOp::TripleNotEquals => "!==",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::LeftShift => "<<",
            BinaryOp::RightShift => ">>",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
        };
        write!(f, "{}", s)
    }
}

/// All expression variants.
///
/// `Property`, `Call` and `Unknown` are structurally present but never lowered
/// by the bytecode compiler; they exist for parser fidelity and future
/// extension. `VariableDeclaration` parses but is likewise not yet compiled.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Number literal: 42, 3.14
    NumberLiteral(f64),
    /// Boolean literal: true, false
    BoolLiteral(bool),
    /// String literal: "hello"
    StringLiteral(String),
    /// Identifier reference, unresolved raw text: foo
    Identifier(String),

    /// Unary operation: -x, !x, ~x, typeof x
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Binary operation: a + b
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },

    /// Variable declaration: let x; / var x = 1;
    VariableDeclaration {
        binding: Binding,
        name: String,
        initializer: Option<Box<Expr>>,
    },

    /// Property access: obj.field
    Property { object: Box<Expr>, name: String },

    /// Function call: foo(a, b)
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },

    /// Placeholder produced in place of an unparseable construct.
    Unknown,
}

/// A parsed program: an ordered sequence of top-level statement expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Expr>,
}

impl Program {
    pub fn new(statements: Vec<Expr>) -> Self {
        Self { statements }
    }
}

/// Render an AST as an indented tree, for `--debug` output.
pub fn dump_program(program: &Program) -> String {
    let mut out = String::new();
    for stmt in &program.statements {
        dump_expr(stmt, 0, &mut out);
    }
    out
}

fn dump_expr(expr: &Expr, indent: usize, out: &mut String) {
    let pad = "  ".repeat(indent);
    match &expr.kind {
        ExprKind::NumberLiteral(n) => out.push_str(&format!("{}CONSTANT: {}\n", pad, n)),
        ExprKind::BoolLiteral(b) => out.push_str(&format!("{}CONSTANT: {}\n", pad, b)),
        ExprKind::StringLiteral(s) => out.push_str(&format!("{}CONSTANT: \"{}\"\n", pad, s)),
        ExprKind::Identifier(name) => out.push_str(&format!("{}IDENTIFIER: {}\n", pad, name)),
        ExprKind::Unary { op, operand } => {
            out.push_str(&format!("{}UNARY: {}\n", pad, op));
            dump_expr(operand, indent + 1, out);
        }
        ExprKind::Binary { left, op, right } => {
            out.push_str(&format!("{}BINARY: {}\n", pad, op));
            dump_expr(left, indent + 1, out);
            dump_expr(right, indent + 1, out);
        }
        ExprKind::VariableDeclaration {
            binding,
            name,
            initializer,
        } => {
            out.push_str(&format!("{}DECLARATION: {} {}\n", pad, binding, name));
            if let Some(init) = initializer {
                dump_expr(init, indent + 1, out);
            }
        }
        ExprKind::Property { object, name } => {
            out.push_str(&format!("{}PROPERTY: {}\n", pad, name));
            dump_expr(object, indent + 1, out);
        }
        ExprKind::Call { callee, args } => {
            out.push_str(&format!("{}CALL:\n", pad));
            dump_expr(callee, indent + 1, out);
            for arg in args {
                dump_expr(arg, indent + 1, out);
            }
        }
        ExprKind::Unknown => out.push_str(&format!("{}UNKNOWN\n", pad)),
    }
}
