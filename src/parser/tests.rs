//! Parser tests.

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::error::ParserError;
    use crate::lexer::{Scanner, Token, TokenKind};
    use crate::parser::Parser;
    use crate::span::Span;

    fn parse_program(source: &str) -> Program {
        let tokens = Scanner::new(source).scan_tokens().unwrap();
        Parser::new(tokens).parse().unwrap()
    }

    fn parse_expr(source: &str) -> Expr {
        parse_program(source).statements.into_iter().next().unwrap()
    }

    fn parse_err(source: &str) -> ParserError {
        let tokens = Scanner::new(source).scan_tokens().unwrap();
        Parser::new(tokens).parse().unwrap_err()
    }

    #[test]
    fn test_binary_expr() {
        let expr = parse_expr("1 + 2;");
        match expr.kind {
            ExprKind::Binary { op, .. } => assert_eq!(op, BinaryOp::Add),
            _ => panic!("Expected binary expression"),
        }
    }

    #[test]
    fn test_precedence() {
        // 1 + 2 * 3 should parse as 1 + (2 * 3)
        let expr = parse_expr("1 + 2 * 3;");
        match expr.kind {
            ExprKind::Binary {
                op: BinaryOp::Add,
                right,
                ..
            } => match right.kind {
                ExprKind::Binary {
                    op: BinaryOp::Multiply,
                    ..
                } => {}
                _ => panic!("Expected multiply on right"),
            },
            _ => panic!("Expected add at top"),
        }
    }

    #[test]
    fn test_left_associativity() {
        // 1 - 2 - 3 should parse as (1 - 2) - 3
        let expr = parse_expr("1 - 2 - 3;");
        match expr.kind {
            ExprKind::Binary {
                op: BinaryOp::Subtract,
                left,
                right,
            } => {
                assert!(matches!(
                    left.kind,
                    ExprKind::Binary {
                        op: BinaryOp::Subtract,
                        ..
                    }
                ));
                assert!(matches!(right.kind, ExprKind::NumberLiteral(n) if n == 3.0));
            }
            _ => panic!("Expected subtract at top"),
        }
    }

    #[test]
    fn test_full_ladder_ordering() {
        // || binds loosest: true || 1 & 2 == 3 parses with Or at the root.
        let expr = parse_expr("true || 1 & 2 == 3;");
        match expr.kind {
            ExprKind::Binary {
                op: BinaryOp::LogicalOr,
                right,
                ..
            } => match right.kind {
                // & binds looser than ==, so the right side roots at BitwiseAnd.
                ExprKind::Binary {
                    op: BinaryOp::BitwiseAnd,
                    right: and_rhs,
                    ..
                } => assert!(matches!(
                    and_rhs.kind,
                    ExprKind::Binary {
                        op: BinaryOp::Equals,
                        ..
                    }
                )),
                _ => panic!("Expected bitwise-and under or"),
            },
            _ => panic!("Expected or at top"),
        }
    }

    #[test]
    fn test_shift_binds_tighter_than_comparison() {
        let expr = parse_expr("1 << 2 < 3;");
        match expr.kind {
            ExprKind::Binary {
                op: BinaryOp::Less,
                left,
                ..
            } => assert!(matches!(
                left.kind,
                ExprKind::Binary {
                    op: BinaryOp::LeftShift,
                    ..
                }
            )),
            _ => panic!("Expected less-than at top"),
        }
    }

    #[test]
    fn test_unary_chain_is_right_recursive() {
        let expr = parse_expr("-~1;");
        match expr.kind {
            ExprKind::Unary {
                op: UnaryOp::Negate,
                operand,
            } => assert!(matches!(
                operand.kind,
                ExprKind::Unary {
                    op: UnaryOp::BitwiseNot,
                    ..
                }
            )),
            _ => panic!("Expected negate at top"),
        }
    }

    #[test]
    fn test_typeof_prefix() {
        let expr = parse_expr("typeof 5;");
        assert!(matches!(
            expr.kind,
            ExprKind::Unary {
                op: UnaryOp::Typeof,
                ..
            }
        ));
    }

    #[test]
    fn test_primaries() {
        assert!(matches!(
            parse_expr("42;").kind,
            ExprKind::NumberLiteral(n) if n == 42.0
        ));
        assert!(matches!(
            parse_expr("true;").kind,
            ExprKind::BoolLiteral(true)
        ));
        assert!(matches!(
            parse_expr("\"hi\";").kind,
            ExprKind::StringLiteral(ref s) if s == "hi"
        ));
        assert!(matches!(
            parse_expr("foo;").kind,
            ExprKind::Identifier(ref s) if s == "foo"
        ));
    }

    #[test]
    fn test_multiple_statements() {
        let program = parse_program("1; 2; 3;");
        assert_eq!(program.statements.len(), 3);
    }

    #[test]
    fn test_declaration_without_initializer() {
        let expr = parse_expr("let x;");
        match expr.kind {
            ExprKind::VariableDeclaration {
                binding,
                name,
                initializer,
            } => {
                assert_eq!(binding, Binding::Let);
                assert_eq!(name, "x");
                assert!(initializer.is_none());
            }
            _ => panic!("Expected declaration"),
        }
    }

    #[test]
    fn test_declaration_with_initializer() {
        let expr = parse_expr("const x = 1 + 2;");
        match expr.kind {
            ExprKind::VariableDeclaration {
                binding,
                initializer,
                ..
            } => {
                assert_eq!(binding, Binding::Const);
                assert!(matches!(
                    initializer.unwrap().kind,
                    ExprKind::Binary {
                        op: BinaryOp::Add,
                        ..
                    }
                ));
            }
            _ => panic!("Expected declaration"),
        }
    }

    #[test]
    fn test_declaration_errors() {
        assert!(matches!(
            parse_err("let 5;"),
            ParserError::ExpectedIdentifier(_)
        ));
        assert!(matches!(
            parse_err("let x 5;"),
            ParserError::ExpectedInitializerOrSemicolon(_)
        ));
        assert!(matches!(
            parse_err("let x = 5"),
            ParserError::ExpectedSemicolon(_)
        ));
    }

    #[test]
    fn test_missing_expression() {
        assert!(matches!(
            parse_err("1 +"),
            ParserError::ExpectedExpression { .. }
        ));
    }

    #[test]
    fn test_parse_stops_at_first_error() {
        // The second statement is fine, but parsing halts on the first.
        let err = parse_err("1 + ; 2;");
        assert!(matches!(err, ParserError::ExpectedExpression { .. }));
    }

    // Property access only exists for a hand-built token stream: the scanner
    // rejects a bare `.`, so these exercise the dead-but-parseable path.

    fn tok(kind: TokenKind) -> Token {
        Token::new(kind, Span::origin())
    }

    #[test]
    fn test_property_access_from_constructed_tokens() {
        let tokens = vec![
            tok(TokenKind::Identifier("obj".into())),
            tok(TokenKind::Dot),
            tok(TokenKind::Identifier("field".into())),
            tok(TokenKind::Eof),
        ];
        let program = Parser::new(tokens).parse().unwrap();
        match &program.statements[0].kind {
            ExprKind::Property { object, name } => {
                assert_eq!(name, "field");
                assert!(matches!(object.kind, ExprKind::Identifier(ref s) if s == "obj"));
            }
            other => panic!("Expected property access, got {:?}", other),
        }
    }

    #[test]
    fn test_property_access_requires_identifier_and_terminates() {
        // `obj.1` must error out instead of spinning on the same token.
        let tokens = vec![
            tok(TokenKind::Identifier("obj".into())),
            tok(TokenKind::Dot),
            tok(TokenKind::Number(1.0)),
            tok(TokenKind::Eof),
        ];
        let err = Parser::new(tokens).parse().unwrap_err();
        assert!(matches!(err, ParserError::ExpectedIdentifier(_)));
    }
}
