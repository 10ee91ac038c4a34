//! Main `Lexer` struct and token dispatch.

use fspl_util::{DiagnosticBuilder, DiagnosticCode, Handler, Line};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Scans one source file into a stream of [`Token`]s.
///
/// `next_token` is the scanner contract from §4.1: call it repeatedly and
/// it returns successive tokens, yielding `FILE_END` forever once the
/// source is exhausted rather than erroring on repeated calls.
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) handler: &'a Handler,
}

impl<'a> Lexer<'a> {
    pub fn new(cursor: Cursor<'a>, handler: &'a Handler) -> Self {
        Self { cursor, handler }
    }

    pub fn from_source(source: &'a str, handler: &'a Handler) -> Self {
        Self::new(Cursor::new(source), handler)
    }

    /// Returns the next token, or `FILE_END` once the source is exhausted.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();
        let line = self.cursor.line();

        let Some(c) = self.cursor.current_char() else {
            return Token::new(TokenKind::FileEnd, line);
        };

        let token = if crate::ascii::is_ident_start(c) {
            self.lex_identifier()
        } else if crate::ascii::is_digit(c) {
            self.lex_number()
        } else {
            self.lex_symbol(c)
        };

        if token.kind == TokenKind::Unknown {
            DiagnosticBuilder::error(format!("unknown token: {c}"))
                .code(DiagnosticCode::E_LEX_UNEXPECTED_CHAR)
                .line(Some(line))
                .emit(self.handler);
        }

        tracing::trace!(?token.kind, line = line.get(), "lexed token");
        token
    }

    pub fn current_line(&self) -> Line {
        self.cursor.line()
    }

    #[cfg(test)]
    pub(crate) fn cursor_char(&self) -> Option<char> {
        self.cursor.current_char()
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.is_eof() {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenPayload;

    #[test]
    fn empty_source_yields_file_end_immediately() {
        let handler = Handler::new();
        let mut lexer = Lexer::from_source("", &handler);
        assert_eq!(lexer.next_token().kind, TokenKind::FileEnd);
    }

    #[test]
    fn repeated_calls_past_eof_keep_returning_file_end() {
        let handler = Handler::new();
        let mut lexer = Lexer::from_source("", &handler);
        assert_eq!(lexer.next_token().kind, TokenKind::FileEnd);
        assert_eq!(lexer.next_token().kind, TokenKind::FileEnd);
        assert_eq!(lexer.next_token().kind, TokenKind::FileEnd);
    }

    #[test]
    fn iterator_stops_before_file_end() {
        let handler = Handler::new();
        let lexer = Lexer::from_source("a b", &handler);
        let kinds: Vec<_> = lexer.map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Identifier, TokenKind::Identifier]);
    }

    #[test]
    fn whitespace_between_tokens_is_skipped() {
        let handler = Handler::new();
        let mut lexer = Lexer::from_source("  total  :=  5 ", &handler);
        assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
        assert_eq!(lexer.next_token().kind, TokenKind::Assignment);
        let lit = lexer.next_token();
        assert_eq!(lit.integer_value(), Some(5));
        assert_eq!(lexer.next_token().kind, TokenKind::FileEnd);
    }

    #[test]
    fn line_tracks_across_multiple_lines() {
        let handler = Handler::new();
        let mut lexer = Lexer::from_source("a\nb\n\nc", &handler);
        assert_eq!(lexer.next_token().line.get(), 1);
        assert_eq!(lexer.next_token().line.get(), 2);
        assert_eq!(lexer.next_token().line.get(), 4);
    }

    #[test]
    fn bare_equals_is_unknown_and_diagnosed() {
        let handler = Handler::new();
        let mut lexer = Lexer::from_source("=", &handler);
        let t = lexer.next_token();
        assert_eq!(t.kind, TokenKind::Unknown);
        assert!(handler.has_errors());
    }

    #[test]
    fn unknown_token_does_not_stop_the_scan() {
        let handler = Handler::new();
        let mut lexer = Lexer::from_source("@ total", &handler);
        assert_eq!(lexer.next_token().kind, TokenKind::Unknown);
        let t = lexer.next_token();
        assert_eq!(t.kind, TokenKind::Identifier);
        assert_eq!(t.payload, TokenPayload::Ident(fspl_util::Symbol::intern("TOTAL")));
    }
}
