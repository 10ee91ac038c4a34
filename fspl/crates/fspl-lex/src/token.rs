//! Token kinds and payloads (§3, §6.1).
//!
//! A token is its kind, the line it started on, and — for literals and
//! identifiers — one payload value. Everything else about a token (its
//! text) is recoverable from the payload or doesn't matter past the
//! scanner, so there is no separate lexeme field to keep in sync.

use fspl_util::symbol::{
    Symbol, KW_BEGIN, KW_BOOL, KW_CHAR, KW_ELSE, KW_END, KW_FALSE, KW_FLOAT, KW_FOR, KW_GLOBAL,
    KW_IF, KW_IN, KW_INOUT, KW_INTEGER, KW_IS, KW_NOT, KW_OUT, KW_PROCEDURE, KW_PROGRAM,
    KW_RETURN, KW_STRING, KW_THEN, KW_TRUE,
};
use fspl_util::Line;

/// Every kind of token the scanner can produce (§6.1): structural
/// punctuation, operators, literal kinds, the one identifier kind, the 22
/// reserved words, and the two sentinels.
///
/// `TRUE`/`FALSE` double as both reserved words and the bool literal —
/// there is no separate `BoolLiteral` kind, the same way the original
/// scanner keeps the reserved-word token type and only swaps in a bool
/// value underneath it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    // Structural
    Period,
    Semicolon,
    LParen,
    RParen,
    Comma,
    LBracket,
    RBracket,
    Colon,

    // Operators
    And,
    Or,
    Plus,
    Minus,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Assignment,
    Equals,
    NotEqual,
    Multiplication,
    Division,

    // Literals
    StringLiteral,
    CharLiteral,
    IntegerLiteral,
    FloatLiteral,

    // Identifier
    Identifier,

    // Reserved words
    KwIn,
    KwOut,
    KwInout,
    KwProgram,
    KwIs,
    KwBegin,
    KwEnd,
    KwGlobal,
    KwProcedure,
    KwString,
    KwChar,
    KwInteger,
    KwFloat,
    KwBool,
    KwIf,
    KwThen,
    KwElse,
    KwFor,
    KwReturn,
    KwTrue,
    KwFalse,
    KwNot,

    // Sentinels
    FileEnd,
    Unknown,
}

impl TokenKind {
    pub fn is_reserved_word(self) -> bool {
        matches!(
            self,
            TokenKind::KwIn
                | TokenKind::KwOut
                | TokenKind::KwInout
                | TokenKind::KwProgram
                | TokenKind::KwIs
                | TokenKind::KwBegin
                | TokenKind::KwEnd
                | TokenKind::KwGlobal
                | TokenKind::KwProcedure
                | TokenKind::KwString
                | TokenKind::KwChar
                | TokenKind::KwInteger
                | TokenKind::KwFloat
                | TokenKind::KwBool
                | TokenKind::KwIf
                | TokenKind::KwThen
                | TokenKind::KwElse
                | TokenKind::KwFor
                | TokenKind::KwReturn
                | TokenKind::KwTrue
                | TokenKind::KwFalse
                | TokenKind::KwNot
        )
    }
}

/// The one value a token's kind requires, if any.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TokenPayload {
    None,
    Integer(i64),
    Float(f64),
    Bool(bool),
    Char(char),
    Str(Symbol),
    Ident(Symbol),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: Line,
    pub payload: TokenPayload,
}

impl Token {
    pub fn new(kind: TokenKind, line: Line) -> Self {
        Self {
            kind,
            line,
            payload: TokenPayload::None,
        }
    }

    pub fn with_payload(kind: TokenKind, line: Line, payload: TokenPayload) -> Self {
        Self { kind, line, payload }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::FileEnd
    }

    pub fn integer_value(&self) -> Option<i64> {
        match self.payload {
            TokenPayload::Integer(v) => Some(v),
            _ => None,
        }
    }

    pub fn float_value(&self) -> Option<f64> {
        match self.payload {
            TokenPayload::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn bool_value(&self) -> Option<bool> {
        match self.payload {
            TokenPayload::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn char_value(&self) -> Option<char> {
        match self.payload {
            TokenPayload::Char(v) => Some(v),
            _ => None,
        }
    }

    pub fn string_symbol(&self) -> Option<Symbol> {
        match self.payload {
            TokenPayload::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn ident_symbol(&self) -> Option<Symbol> {
        match self.payload {
            TokenPayload::Ident(s) => Some(s),
            _ => None,
        }
    }
}

/// Maps an interned, upper-cased symbol to its reserved-word token kind.
/// Ordinary identifiers, including the ten built-in I/O procedure names,
/// return `None` here — they are only reserved in the sense of being
/// pre-declared in the global scope, a symbol-table concern rather than a
/// lexical one.
pub fn keyword_kind(symbol: Symbol) -> Option<TokenKind> {
    match symbol {
        KW_IN => Some(TokenKind::KwIn),
        KW_OUT => Some(TokenKind::KwOut),
        KW_INOUT => Some(TokenKind::KwInout),
        KW_PROGRAM => Some(TokenKind::KwProgram),
        KW_IS => Some(TokenKind::KwIs),
        KW_BEGIN => Some(TokenKind::KwBegin),
        KW_END => Some(TokenKind::KwEnd),
        KW_GLOBAL => Some(TokenKind::KwGlobal),
        KW_PROCEDURE => Some(TokenKind::KwProcedure),
        KW_STRING => Some(TokenKind::KwString),
        KW_CHAR => Some(TokenKind::KwChar),
        KW_INTEGER => Some(TokenKind::KwInteger),
        KW_FLOAT => Some(TokenKind::KwFloat),
        KW_BOOL => Some(TokenKind::KwBool),
        KW_IF => Some(TokenKind::KwIf),
        KW_THEN => Some(TokenKind::KwThen),
        KW_ELSE => Some(TokenKind::KwElse),
        KW_FOR => Some(TokenKind::KwFor),
        KW_RETURN => Some(TokenKind::KwReturn),
        KW_TRUE => Some(TokenKind::KwTrue),
        KW_FALSE => Some(TokenKind::KwFalse),
        KW_NOT => Some(TokenKind::KwNot),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_kind_covers_every_reserved_word() {
        use fspl_util::symbol::Symbol;

        for word in [
            "IN", "OUT", "INOUT", "PROGRAM", "IS", "BEGIN", "END", "GLOBAL", "PROCEDURE",
            "STRING", "CHAR", "INTEGER", "FLOAT", "BOOL", "IF", "THEN", "ELSE", "FOR", "RETURN",
            "TRUE", "FALSE", "NOT",
        ] {
            let symbol = Symbol::intern(word);
            let kind = keyword_kind(symbol).unwrap_or_else(|| panic!("{word} should be reserved"));
            assert!(kind.is_reserved_word());
        }
    }

    #[test]
    fn ordinary_identifier_is_not_a_keyword() {
        use fspl_util::symbol::Symbol;
        assert_eq!(keyword_kind(Symbol::intern("TOTAL")), None);
        assert_eq!(keyword_kind(Symbol::intern("GETINTEGER")), None);
    }

    #[test]
    fn token_accessors_match_their_payload() {
        let t = Token::with_payload(TokenKind::IntegerLiteral, Line::new(3), TokenPayload::Integer(42));
        assert_eq!(t.integer_value(), Some(42));
        assert_eq!(t.float_value(), None);
    }

    #[test]
    fn file_end_has_no_payload() {
        let t = Token::new(TokenKind::FileEnd, Line::new(10));
        assert!(t.is_eof());
        assert_eq!(t.payload, TokenPayload::None);
    }
}
