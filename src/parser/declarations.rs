//! Statement parsing: variable declarations and expression statements.

use crate::ast::{Binding, Expr, ExprKind};
use crate::error::ParserError;
use crate::lexer::TokenKind;

use super::core::{ParseResult, Parser};

impl Parser {
    /// statement := variableDeclaration | expression ';'?
    pub(crate) fn statement(&mut self) -> ParseResult<Expr> {
        match self.peek().kind {
            TokenKind::Let | TokenKind::Var | TokenKind::Const => self.variable_declaration(),
            _ => {
                let expr = self.expression()?;
                // Expression statements may be separated by semicolons.
                self.match_token(&TokenKind::Semicolon);
                Ok(expr)
            }
        }
    }

    /// variableDeclaration := ('let'|'var'|'const') IDENTIFIER (';' | '=' expression ';')
    ///
    /// Declarations parse into the AST but are not yet lowered to bytecode;
    /// one reaching the compiler is an internal error.
    fn variable_declaration(&mut self) -> ParseResult<Expr> {
        let start_span = self.current_span();
        let binding = match self.advance().kind {
            TokenKind::Let => Binding::Let,
            TokenKind::Var => Binding::Var,
            TokenKind::Const => Binding::Const,
            _ => Binding::Unknown,
        };

        let name = self.expect_identifier()?;

        let initializer = if self.match_token(&TokenKind::Semicolon) {
            None
        } else if self.match_token(&TokenKind::Equal) {
            let init = self.expression()?;
            if !self.match_token(&TokenKind::Semicolon) {
                return Err(ParserError::ExpectedSemicolon(self.current_span()));
            }
            Some(Box::new(init))
        } else {
            return Err(ParserError::ExpectedInitializerOrSemicolon(
                self.current_span(),
            ));
        };

        let span = start_span.merge(self.tokens[self.current - 1].span);
        Ok(Expr::new(
            ExprKind::VariableDeclaration {
                binding,
                name,
                initializer,
            },
            span,
        ))
    }
}
