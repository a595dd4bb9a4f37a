//! Expression parsing: the operator-precedence ladder.
//!
//! Each binary level is left-associative via iterative accumulation; unary is
//! right-recursive. Lowest to highest binding power:
//!
//! ```text
//! expression := logicalOr
//! logicalOr  := logicalAnd ('||' logicalAnd)*
//! logicalAnd := bitwiseOr ('&&' bitwiseOr)*
//! bitwiseOr  := bitwiseXor ('|' bitwiseXor)*
//! bitwiseXor := bitwiseAnd ('^' bitwiseAnd)*
//! bitwiseAnd := comparison ('&' comparison)*
//! comparison := shift (('=='|'==='|'!=='|'!='|'>'|'<'|'>='|'<=') shift)*
//! shift      := term (('>>'|'<<') term)*
//! term       := factor (('+'|'-') factor)*
//! factor     := unary (('*'|'/'|'%') unary)*
//! unary      := ('-'|'!'|'~'|'typeof')* primary
//! primary    := NUMBER | TRUE | FALSE | STRING | IDENTIFIER
//! ```

use crate::ast::{BinaryOp, Expr, ExprKind, UnaryOp};
use crate::error::ParserError;
use crate::lexer::TokenKind;

use super::core::{ParseResult, Parser};

impl Parser {
    pub(crate) fn expression(&mut self) -> ParseResult<Expr> {
        self.logical_or()
    }

    fn binary_level<F>(
        &mut self,
        operand: fn(&mut Parser) -> ParseResult<Expr>,
        mut operator: F,
    ) -> ParseResult<Expr>
    where
        F: FnMut(&TokenKind) -> Option<BinaryOp>,
    {
        let mut left = operand(self)?;

        while let Some(op) = operator(&self.peek().kind) {
            self.advance();
            let right = operand(self)?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    fn logical_or(&mut self) -> ParseResult<Expr> {
        self.binary_level(Parser::logical_and, |kind| match kind {
            TokenKind::PipePipe => Some(BinaryOp::LogicalOr),
            _ => None,
        })
    }

    fn logical_and(&mut self) -> ParseResult<Expr> {
        self.binary_level(Parser::bitwise_or, |kind| match kind {
            TokenKind::AmpAmp => Some(BinaryOp::LogicalAnd),
            _ => None,
        })
    }

    fn bitwise_or(&mut self) -> ParseResult<Expr> {
        self.binary_level(Parser::bitwise_xor, |kind| match kind {
            TokenKind::Pipe => Some(BinaryOp::BitwiseOr),
            _ => None,
        })
    }

    fn bitwise_xor(&mut self) -> ParseResult<Expr> {
        self.binary_level(Parser::bitwise_and, |kind| match kind {
            TokenKind::Caret => Some(BinaryOp::BitwiseXor),
            _ => None,
        })
    }

    fn bitwise_and(&mut self) -> ParseResult<Expr> {
        self.binary_level(Parser::comparison, |kind| match kind {
            TokenKind::Amp => Some(BinaryOp::BitwiseAnd),
            _ => None,
        })
    }

    fn comparison(&mut self) -> ParseResult<Expr> {
        self.binary_level(Parser::shift, |kind| match kind {
            TokenKind::EqualEqual => Some(BinaryOp::Equals),
            TokenKind::TripleEqual => Some(BinaryOp::TripleEquals),
            TokenKind::BangEqual => Some(BinaryOp::NotEquals),
            TokenKind::TripleBangEqual => Some(BinaryOp::TripleNotEquals),
            TokenKind::Less => Some(BinaryOp::Less),
            TokenKind::LessEqual => Some(BinaryOp::LessEqual),
            TokenKind::Greater => Some(BinaryOp::Greater),
            TokenKind::GreaterEqual => Some(BinaryOp::GreaterEqual),
            _ => None,
        })
    }

    fn shift(&mut self) -> ParseResult<Expr> {
        self.binary_level(Parser::term, |kind| match kind {
            TokenKind::LessLess => Some(BinaryOp::LeftShift),
            TokenKind::GreaterGreater => Some(BinaryOp::RightShift),
            _ => None,
        })
    }

    fn term(&mut self) -> ParseResult<Expr> {
        self.binary_level(Parser::factor, |kind| match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Subtract),
            _ => None,
        })
    }

    fn factor(&mut self) -> ParseResult<Expr> {
        self.binary_level(Parser::unary, |kind| match kind {
            TokenKind::Star => Some(BinaryOp::Multiply),
            TokenKind::Slash => Some(BinaryOp::Divide),
            TokenKind::Percent => Some(BinaryOp::Modulo),
            _ => None,
        })
    }

    fn unary(&mut self) -> ParseResult<Expr> {
        let op = match self.peek().kind {
            TokenKind::Minus => Some(UnaryOp::Negate),
            TokenKind::Bang => Some(UnaryOp::LogicalNot),
            TokenKind::Tilde => Some(UnaryOp::BitwiseNot),
            TokenKind::Typeof => Some(UnaryOp::Typeof),
            _ => None,
        };

        if let Some(op) = op {
            let op_span = self.current_span();
            self.advance();
            let operand = self.unary()?;
            let span = op_span.merge(operand.span);
            return Ok(Expr::new(
                ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
                span,
            ));
        }

        self.primary()
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        let span = self.current_span();
        let expr = match &self.peek().kind {
            TokenKind::Number(n) => {
                let n = *n;
                self.advance();
                Expr::new(ExprKind::NumberLiteral(n), span)
            }
            TokenKind::True => {
                self.advance();
                Expr::new(ExprKind::BoolLiteral(true), span)
            }
            TokenKind::False => {
                self.advance();
                Expr::new(ExprKind::BoolLiteral(false), span)
            }
            TokenKind::Str(s) => {
                let s = s.clone();
                self.advance();
                Expr::new(ExprKind::StringLiteral(s), span)
            }
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Expr::new(ExprKind::Identifier(name), span)
            }
            kind => {
                return Err(ParserError::expected_expression(format!("{}", kind), span));
            }
        };

        self.property_access(expr)
    }

    /// Postfix `expr.identifier` chains. Each iteration must consume an
    /// identifier, so the loop always makes progress on malformed input.
    /// The scanner never emits `Dot`, so this path is reachable only from a
    /// hand-built token stream; the node parses but never compiles.
    fn property_access(&mut self, mut expr: Expr) -> ParseResult<Expr> {
        while self.match_token(&TokenKind::Dot) {
            let name = self.expect_identifier()?;
            let span = expr.span.merge(self.tokens[self.current - 1].span);
            expr = Expr::new(
                ExprKind::Property {
                    object: Box::new(expr),
                    name,
                },
                span,
            );
        }

        Ok(expr)
    }
}
