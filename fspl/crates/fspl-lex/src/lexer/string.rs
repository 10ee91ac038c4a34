//! String and character literal lexing.
//!
//! Neither literal has escape sequences. A character is either permitted
//! in the literal's allowlist or it is diagnosed and, for strings,
//! dropped from the accumulated text.

use fspl_util::{DiagnosticBuilder, DiagnosticCode, Symbol};

use crate::lexer::Lexer;
use crate::token::{Token, TokenKind, TokenPayload};

impl<'a> Lexer<'a> {
    /// Called with the opening `"` already current; consumes through the
    /// closing `"`.
    pub(super) fn lex_string(&mut self, line: fspl_util::Line) -> Token {
        self.cursor.advance(); // opening quote
        let mut text = String::new();
        let mut closed = false;

        loop {
            match self.cursor.current_char() {
                None => break,
                Some('"') => {
                    self.cursor.advance();
                    closed = true;
                    break;
                }
                Some(c) => {
                    self.cursor.advance();
                    if crate::ascii::is_valid_in_string(c) {
                        text.push(c);
                    } else {
                        DiagnosticBuilder::error(format!("char not valid in a string: {c}"))
                            .code(DiagnosticCode::E_LEX_INVALID_STRING_CHAR)
                            .line(Some(self.cursor.line()))
                            .emit(self.handler);
                    }
                }
            }
        }

        if !closed {
            DiagnosticBuilder::error("reached end of file and string quotes were never closed")
                .code(DiagnosticCode::E_LEX_UNTERMINATED_STRING)
                .line(Some(self.cursor.line()))
                .emit(self.handler);
        }

        Token::with_payload(TokenKind::StringLiteral, line, TokenPayload::Str(Symbol::intern(&text)))
    }

    /// Called with the opening `'` already current; consumes the single
    /// body character and the closing `'`.
    pub(super) fn lex_char(&mut self, line: fspl_util::Line) -> Token {
        self.cursor.advance(); // opening quote

        let body = self.cursor.current_char();
        if body.is_some() {
            self.cursor.advance();
        }
        let value = body.unwrap_or('\0');

        if !crate::ascii::is_valid_char_literal(value) {
            DiagnosticBuilder::error(format!("not a valid char literal: {value}"))
                .code(DiagnosticCode::E_LEX_INVALID_CHAR_LITERAL)
                .line(Some(line))
                .emit(self.handler);
        }

        if self.cursor.advance() != Some('\'') {
            DiagnosticBuilder::error("single quote containing more than one char")
                .code(DiagnosticCode::E_LEX_UNTERMINATED_CHAR)
                .line(Some(line))
                .emit(self.handler);
        }

        Token::with_payload(TokenKind::CharLiteral, line, TokenPayload::Char(value))
    }
}
