//! Diagnostic codes for categorizing compiler errors and warnings.
//!
//! Codes follow the `{prefix}{number}` shape used throughout the rest of
//! the corpus so a user can grep a message back to its origin. The number
//! ranges below line up with the four-way taxonomy from the core's error
//! handling design: lexical (1xxx), syntactic (2xxx), semantic (3xxx),
//! internal (9xxx).

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    pub prefix: &'static str,
    pub number: u32,
}

impl DiagnosticCode {
    #[inline]
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    #[inline]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    #[inline]
    pub const fn number(&self) -> u32 {
        self.number
    }

    pub fn as_str(&self) -> String {
        format!("{}{:04}", self.prefix, self.number)
    }

    // Lexical (§7: unrecognized character, unterminated literal, invalid
    // character in literal).
    pub const E_LEX_UNEXPECTED_CHAR: Self = Self::new("E", 1001);
    pub const E_LEX_UNTERMINATED_STRING: Self = Self::new("E", 1002);
    pub const E_LEX_UNTERMINATED_CHAR: Self = Self::new("E", 1003);
    pub const E_LEX_INVALID_STRING_CHAR: Self = Self::new("E", 1004);
    pub const E_LEX_INVALID_CHAR_LITERAL: Self = Self::new("E", 1005);
    pub const E_LEX_STRAY_EQUALS: Self = Self::new("E", 1006);

    // Syntactic (§7: unexpected token, missing required delimiter).
    pub const E_PARSE_UNEXPECTED_TOKEN: Self = Self::new("E", 2001);
    pub const E_PARSE_EXPECTED_TOKEN: Self = Self::new("E", 2002);
    pub const E_PARSE_UNEXPECTED_EOF: Self = Self::new("E", 2003);
    pub const W_PARSE_MISMATCHED_END: Self = Self::new("W", 2004);

    // Semantic (§7: undeclared name, redeclaration, wrong direction,
    // incompatible types).
    pub const E_SEM_UNDECLARED: Self = Self::new("E", 3001);
    pub const E_SEM_REDECLARED: Self = Self::new("E", 3002);
    pub const E_SEM_TYPE_MISMATCH: Self = Self::new("E", 3003);
    pub const E_SEM_BAD_COERCION: Self = Self::new("E", 3004);
    pub const E_SEM_WRONG_DIRECTION: Self = Self::new("E", 3005);
    pub const E_SEM_ARITY_MISMATCH: Self = Self::new("E", 3006);
    pub const E_SEM_NOT_A_PROCEDURE: Self = Self::new("E", 3007);
    pub const E_SEM_NOT_AN_ARRAY: Self = Self::new("E", 3008);
    pub const E_SEM_NESTED_PROCEDURE: Self = Self::new("E", 3009);

    // Internal (§7: the parser reached a branch it does not know how to
    // handle — always a bug in this implementation, never in the input).
    pub const E_INTERNAL: Self = Self::new("E", 9001);

    pub const W_UNUSED_VARIABLE: Self = Self::new("W", 4001);
}

impl std::fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DiagnosticCode({})", self.as_str())
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
