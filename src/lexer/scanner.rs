//! Lexer/Scanner for Janky source code.

use crate::error::LexerError;
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

/// The lexer transforms source code into a stream of tokens.
///
/// Scanning stops at the first lexical error; nothing after it is tokenized.
pub struct Scanner<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    line: usize,
    column: usize,
    start_pos: usize,
    start_line: usize,
    start_column: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            line: 1,
            column: 1,
            start_pos: 0,
            start_line: 1,
            start_column: 1,
        }
    }

    /// Scan all tokens from the source. The stream always ends with exactly
    /// one `Eof` token.
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.scan_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        Ok(tokens)
    }

    /// Scan the next token.
    pub fn scan_token(&mut self) -> Result<Token, LexerError> {
        self.skip_whitespace();
        self.mark_start();

        let Some((_, c)) = self.advance() else {
            return Ok(Token::eof(self.current_pos, self.line, self.column));
        };

        match c {
            '+' => Ok(self.make_token(TokenKind::Plus)),
            '-' => Ok(self.make_token(TokenKind::Minus)),
            '*' => Ok(self.make_token(TokenKind::Star)),
            '/' => Ok(self.make_token(TokenKind::Slash)),
            '%' => Ok(self.make_token(TokenKind::Percent)),
            ';' => Ok(self.make_token(TokenKind::Semicolon)),
            '~' => Ok(self.make_token(TokenKind::Tilde)),
            '^' => Ok(self.make_token(TokenKind::Caret)),

            // Maximal munch: `=` / `==` / `===`
            '=' => {
                if self.match_char('=') {
                    if self.match_char('=') {
                        Ok(self.make_token(TokenKind::TripleEqual))
                    } else {
                        Ok(self.make_token(TokenKind::EqualEqual))
                    }
                } else {
                    Ok(self.make_token(TokenKind::Equal))
                }
            }
            '!' => {
                if self.match_char('=') {
                    if self.match_char('=') {
                        Ok(self.make_token(TokenKind::TripleBangEqual))
                    } else {
                        Ok(self.make_token(TokenKind::BangEqual))
                    }
                } else {
                    Ok(self.make_token(TokenKind::Bang))
                }
            }
            '&' => {
                if self.match_char('&') {
                    Ok(self.make_token(TokenKind::AmpAmp))
                } else {
                    Ok(self.make_token(TokenKind::Amp))
                }
            }
            '|' => {
                if self.match_char('|') {
                    Ok(self.make_token(TokenKind::PipePipe))
                } else {
                    Ok(self.make_token(TokenKind::Pipe))
                }
            }
            '<' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenKind::LessEqual))
                } else if self.match_char('<') {
                    Ok(self.make_token(TokenKind::LessLess))
                } else {
                    Ok(self.make_token(TokenKind::Less))
                }
            }
            '>' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenKind::GreaterEqual))
                } else if self.match_char('>') {
                    Ok(self.make_token(TokenKind::GreaterGreater))
                } else {
                    Ok(self.make_token(TokenKind::Greater))
                }
            }

            '"' => self.scan_string(),

            c if c.is_ascii_digit() => self.scan_number(c),

            c if c.is_ascii_alphabetic() => self.scan_identifier(c),

            _ => Err(LexerError::unexpected_char(c, self.current_span())),
        }
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                Some(' ' | '\t' | '\r') => {
                    self.advance();
                }
                Some('\n') => {
                    self.advance();
                    self.line += 1;
                    self.column = 1;
                }
                _ => break,
            }
        }
    }

    /// Double-quoted string, no escape processing.
    fn scan_string(&mut self) -> Result<Token, LexerError> {
        let mut value = String::new();

        loop {
            match self.peek() {
                None => {
                    return Err(LexerError::unterminated_string(self.current_span()));
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\n') => {
                    self.advance();
                    self.line += 1;
                    self.column = 1;
                    value.push('\n');
                }
                Some(c) => {
                    self.advance();
                    value.push(c);
                }
            }
        }

        Ok(self.make_token(TokenKind::Str(value)))
    }

    /// Digits with at most one decimal point. A second `.` inside the literal
    /// is a lexical error.
    fn scan_number(&mut self, first: char) -> Result<Token, LexerError> {
        let mut value = String::from(first);
        let mut seen_dot = false;

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                value.push(c);
                self.advance();
            } else if c == '.' {
                if seen_dot {
                    return Err(LexerError::invalid_number(value, self.current_span()));
                }
                seen_dot = true;
                value.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let n: f64 = value
            .parse()
            .map_err(|_| LexerError::invalid_number(value.clone(), self.current_span()))?;
        Ok(self.make_token(TokenKind::Number(n)))
    }

    /// Consecutive ASCII letters, then an exact-match keyword lookup.
    fn scan_identifier(&mut self, first: char) -> Result<Token, LexerError> {
        let mut value = String::from(first);

        while let Some(c) = self.peek() {
            if c.is_ascii_alphabetic() {
                value.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let kind = TokenKind::keyword(&value).unwrap_or(TokenKind::Identifier(value));
        Ok(self.make_token(kind))
    }

    fn advance(&mut self) -> Option<(usize, char)> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            self.column += 1;
            Some((pos, c))
        } else {
            None
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn mark_start(&mut self) {
        self.start_pos = self.current_pos;
        self.start_line = self.line;
        self.start_column = self.column;
    }

    fn current_span(&self) -> Span {
        Span::new(
            self.start_pos,
            self.current_pos,
            self.start_line,
            self.start_column,
        )
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.current_span())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scan(source: &str) -> Vec<TokenKind> {
        Scanner::new(source)
            .scan_tokens()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            scan("42 3.14"),
            vec![
                TokenKind::Number(42.0),
                TokenKind::Number(3.14),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_number_with_two_dots_is_an_error() {
        let err = Scanner::new("1.2.3").scan_tokens().unwrap_err();
        assert!(matches!(err, LexerError::InvalidNumber(..)));
    }

    #[test]
    fn test_string() {
        assert_eq!(
            scan(r#""hello""#),
            vec![TokenKind::Str("hello".to_string()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let err = Scanner::new("\"abc").scan_tokens().unwrap_err();
        assert!(matches!(err, LexerError::UnterminatedString(_)));
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            scan("let var const true false typeof"),
            vec![
                TokenKind::Let,
                TokenKind::Var,
                TokenKind::Const,
                TokenKind::True,
                TokenKind::False,
                TokenKind::Typeof,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keyword_lookup_is_exact_match() {
        assert_eq!(
            scan("lets typeofx"),
            vec![
                TokenKind::Identifier("lets".to_string()),
                TokenKind::Identifier("typeofx".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_maximal_munch_equals() {
        assert_eq!(
            scan("= == === ! != !=="),
            vec![
                TokenKind::Equal,
                TokenKind::EqualEqual,
                TokenKind::TripleEqual,
                TokenKind::Bang,
                TokenKind::BangEqual,
                TokenKind::TripleBangEqual,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_maximal_munch_shifts_and_comparisons() {
        assert_eq!(
            scan("< <= << > >= >>"),
            vec![
                TokenKind::Less,
                TokenKind::LessEqual,
                TokenKind::LessLess,
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::GreaterGreater,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_logical_and_bitwise() {
        assert_eq!(
            scan("& && | || ^ ~"),
            vec![
                TokenKind::Amp,
                TokenKind::AmpAmp,
                TokenKind::Pipe,
                TokenKind::PipePipe,
                TokenKind::Caret,
                TokenKind::Tilde,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unexpected_character() {
        let err = Scanner::new("1 @ 2").scan_tokens().unwrap_err();
        assert!(matches!(err, LexerError::UnexpectedChar('@', _)));
    }

    #[test]
    fn test_bare_dot_is_an_error() {
        // `.` only appears inside numeric literals; standalone it is rejected.
        let err = Scanner::new("a.b").scan_tokens().unwrap_err();
        assert!(matches!(err, LexerError::UnexpectedChar('.', _)));
    }

    #[test]
    fn test_whitespace_and_eof() {
        assert_eq!(scan(" \t\r\n "), vec![TokenKind::Eof]);
        // Exactly one EOF token, even for empty input.
        assert_eq!(scan(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_spans_track_lines() {
        let tokens = Scanner::new("1\n2").scan_tokens().unwrap();
        assert_eq!(tokens[0].span.line, 1);
        assert_eq!(tokens[1].span.line, 2);
    }
}
