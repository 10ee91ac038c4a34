//! Identifier and reserved-word lexing.

use fspl_util::Symbol;

use crate::lexer::Lexer;
use crate::token::{keyword_kind, Token, TokenKind, TokenPayload};

impl<'a> Lexer<'a> {
    /// A letter begins an identifier; letters, digits, and underscores
    /// continue it. The accumulated text is upper-cased before interning
    /// (§4.1), so `Total`, `TOTAL`, and `total` all name the same symbol.
    ///
    /// Note: unlike the scanner this is grounded on, this does not
    /// pre-insert the identifier into a current scope — this crate has no
    /// notion of scopes. That insertion happens where the parser consumes
    /// the token and drives the symbol table.
    pub(super) fn lex_identifier(&mut self) -> Token {
        let line = self.cursor.line();
        let mut text = String::new();

        while let Some(c) = self.cursor.current_char() {
            if crate::ascii::is_ident_continue(c) {
                text.push(c.to_ascii_uppercase());
                self.cursor.advance();
            } else {
                break;
            }
        }

        let symbol = Symbol::intern(&text);

        match keyword_kind(symbol) {
            Some(TokenKind::KwTrue) => Token::with_payload(TokenKind::KwTrue, line, TokenPayload::Bool(true)),
            Some(TokenKind::KwFalse) => Token::with_payload(TokenKind::KwFalse, line, TokenPayload::Bool(false)),
            Some(kind) => Token::new(kind, line),
            None => Token::with_payload(TokenKind::Identifier, line, TokenPayload::Ident(symbol)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fspl_util::Handler;

    fn lex_one(src: &str) -> Token {
        let handler = Handler::new();
        let mut lexer = Lexer::from_source(src, &handler);
        lexer.next_token()
    }

    #[test]
    fn plain_identifier_is_upper_cased() {
        let t = lex_one("total_count");
        assert_eq!(t.kind, TokenKind::Identifier);
        assert_eq!(t.ident_symbol(), Some(Symbol::intern("TOTAL_COUNT")));
    }

    #[test]
    fn mixed_case_and_upper_case_intern_to_the_same_symbol() {
        assert_eq!(lex_one("Total").ident_symbol(), lex_one("TOTAL").ident_symbol());
    }

    #[test]
    fn identifier_cannot_start_with_underscore_or_digit() {
        // A leading underscore is not a letter, so it falls to the
        // operator/symbol lexer and is diagnosed as unknown there.
        let t = lex_one("_total");
        assert_ne!(t.kind, TokenKind::Identifier);
    }

    macro_rules! keyword_test {
        ($name:ident, $src:literal, $kind:expr) => {
            #[test]
            fn $name() {
                assert_eq!(lex_one($src).kind, $kind);
            }
        };
    }

    keyword_test!(kw_in, "in", TokenKind::KwIn);
    keyword_test!(kw_out, "OUT", TokenKind::KwOut);
    keyword_test!(kw_inout, "InOut", TokenKind::KwInout);
    keyword_test!(kw_program, "program", TokenKind::KwProgram);
    keyword_test!(kw_is, "is", TokenKind::KwIs);
    keyword_test!(kw_begin, "begin", TokenKind::KwBegin);
    keyword_test!(kw_end, "end", TokenKind::KwEnd);
    keyword_test!(kw_global, "global", TokenKind::KwGlobal);
    keyword_test!(kw_procedure, "procedure", TokenKind::KwProcedure);
    keyword_test!(kw_string, "string", TokenKind::KwString);
    keyword_test!(kw_char, "char", TokenKind::KwChar);
    keyword_test!(kw_integer, "integer", TokenKind::KwInteger);
    keyword_test!(kw_float, "float", TokenKind::KwFloat);
    keyword_test!(kw_bool, "bool", TokenKind::KwBool);
    keyword_test!(kw_if, "if", TokenKind::KwIf);
    keyword_test!(kw_then, "then", TokenKind::KwThen);
    keyword_test!(kw_else, "else", TokenKind::KwElse);
    keyword_test!(kw_for, "for", TokenKind::KwFor);
    keyword_test!(kw_return, "return", TokenKind::KwReturn);
    keyword_test!(kw_not, "not", TokenKind::KwNot);

    #[test]
    fn true_and_false_carry_a_bool_payload() {
        let t = lex_one("true");
        assert_eq!(t.kind, TokenKind::KwTrue);
        assert_eq!(t.bool_value(), Some(true));

        let f = lex_one("FALSE");
        assert_eq!(f.kind, TokenKind::KwFalse);
        assert_eq!(f.bool_value(), Some(false));
    }

    #[test]
    fn builtin_io_procedure_names_are_ordinary_identifiers_here() {
        for name in ["GETINTEGER", "PUTSTRING", "GetBool"] {
            assert_eq!(lex_one(name).kind, TokenKind::Identifier);
        }
    }
}
