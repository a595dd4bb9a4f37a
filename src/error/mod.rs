//! Error types for all pipeline stages.

use crate::span::Span;
use thiserror::Error;

/// Lexer errors. The first one aborts scanning; there is no resynchronization.
#[derive(Debug, Error)]
pub enum LexerError {
    #[error("Unexpected character. ('{0}' at {1})")]
    UnexpectedChar(char, Span),

    #[error("Unterminated string literal. (at {0})")]
    UnterminatedString(Span),

    #[error("Invalid numeric literal ('{0}' at {1})")]
    InvalidNumber(String, Span),
}

impl LexerError {
    pub fn unexpected_char(c: char, span: Span) -> Self {
        Self::UnexpectedChar(c, span)
    }

    pub fn unterminated_string(span: Span) -> Self {
        Self::UnterminatedString(span)
    }

    pub fn invalid_number(s: impl Into<String>, span: Span) -> Self {
        Self::InvalidNumber(s.into(), span)
    }

    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedChar(_, span) => *span,
            Self::UnterminatedString(span) => *span,
            Self::InvalidNumber(_, span) => *span,
        }
    }
}

/// Parser errors. Parsing stops at the first one; the statements built so far
/// are discarded by the caller.
#[derive(Debug, Error)]
pub enum ParserError {
    #[error("Expected expression (found '{found}' at {span})")]
    ExpectedExpression { found: String, span: Span },

    #[error("Expected identifier (at {0})")]
    ExpectedIdentifier(Span),

    #[error("Expected '=' or ';' (at {0})")]
    ExpectedInitializerOrSemicolon(Span),

    #[error("Expected ';' (at {0})")]
    ExpectedSemicolon(Span),
}

impl ParserError {
    pub fn expected_expression(found: impl Into<String>, span: Span) -> Self {
        Self::ExpectedExpression {
            found: found.into(),
            span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::ExpectedExpression { span, .. } => *span,
            Self::ExpectedIdentifier(span) => *span,
            Self::ExpectedInitializerOrSemicolon(span) => *span,
            Self::ExpectedSemicolon(span) => *span,
        }
    }
}

/// Bytecode compilation errors.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Too many constants in one bytecode chunk (at {0})")]
    TooManyConstants(Span),
}

impl CompileError {
    pub fn span(&self) -> Span {
        match self {
            Self::TooManyConstants(span) => *span,
        }
    }
}

/// Runtime errors raised by the VM mid-execution. Remaining bytecode is not
/// executed after the first one.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Can only negate numeric values.")]
    NegateNonNumber,

    #[error("Can only apply logical not to boolean values.")]
    LogicalNotNonBool,

    #[error("Can only apply '{0}' to boolean values.")]
    LogicalOpNonBool(&'static str),

    #[error("Can only apply '{0}' to number values.")]
    NumericOpNonNumber(&'static str),

    #[error("Modulo by zero")]
    ModuloByZero,

    #[error("Stack overflow")]
    StackOverflow,

    #[error("Stack underflow")]
    StackUnderflow,
}

/// Internal consistency violations: states that are unreachable when the
/// compiler and VM agree on the instruction set. Surfaced as a typed error
/// instead of a process abort so callers (and tests) can observe them.
#[derive(Debug, Error)]
pub enum InternalError {
    #[error("Unable to compile expression as it is unknown.")]
    UnknownAstNode,

    #[error("Constant index {0} out of range (pool has {1} entries)")]
    ConstantOutOfRange(usize, usize),

    #[error("Value has no printable representation")]
    UnprintableValue,
}

/// A unified error type for the whole pipeline.
#[derive(Debug, Error)]
pub enum JankyError {
    #[error("Lexer error: {0}")]
    Lexer(#[from] LexerError),

    #[error("Parser error: {0}")]
    Parser(#[from] ParserError),

    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    #[error("Internal error: {0}")]
    Internal(#[from] InternalError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl JankyError {
    /// True for errors detected before execution starts.
    pub fn is_compile_time(&self) -> bool {
        matches!(self, Self::Lexer(_) | Self::Parser(_) | Self::Compile(_))
    }
}
