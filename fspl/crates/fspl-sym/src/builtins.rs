//! The ten built-in I/O procedures (§4.3.6), seeded into the global scope
//! before any user declaration is processed so that calling `PUTINTEGER`
//! or `GETSTRING` resolves exactly like a user-defined procedure would.
//!
//! The four scalar `PUT*` builtins take their one argument by reference
//! even though they only read through it — modeling that as
//! [`ParamDirection::Out`] keeps the call-site ABI lowering (§4.3.4)
//! identical to every other by-reference scalar rather than special-casing
//! "by reference but read-only". `PUTSTRING` does not fit that pattern: a
//! string value is already a pointer to bytes, so reading one needs only
//! that single pointer (§4.3.4's `in` row), while `GETSTRING` needs to
//! write back which buffer the caller's variable points to, hence the
//! pointer-to-pointer `out` shape (§4.3.6). Giving `PUTSTRING`
//! [`ParamDirection::In`] and `GETSTRING` [`ParamDirection::Out`] is what
//! keeps those two indirection levels apart.

use fspl_util::Symbol;

use crate::entry::{ParamDirection, Parameter, SymbolEntry, SymbolKind};

fn one_ref_param(kind: SymbolKind) -> Vec<Parameter> {
    vec![Parameter { name: Symbol::intern("V"), kind, direction: ParamDirection::Out, array_bounds: None }]
}

fn one_value_param(kind: SymbolKind) -> Vec<Parameter> {
    vec![Parameter { name: Symbol::intern("V"), kind, direction: ParamDirection::In, array_bounds: None }]
}

/// One entry per built-in, in the order §4.3.6 lists them.
pub fn entries() -> Vec<SymbolEntry> {
    vec![
        SymbolEntry::procedure(Symbol::intern("PUTINTEGER"), one_ref_param(SymbolKind::Integer), false),
        SymbolEntry::procedure(Symbol::intern("PUTFLOAT"), one_ref_param(SymbolKind::Float), false),
        SymbolEntry::procedure(Symbol::intern("PUTCHAR"), one_ref_param(SymbolKind::Character), false),
        SymbolEntry::procedure(Symbol::intern("PUTSTRING"), one_value_param(SymbolKind::Str), false),
        SymbolEntry::procedure(Symbol::intern("PUTBOOL"), one_ref_param(SymbolKind::Bool), false),
        SymbolEntry::procedure(Symbol::intern("GETINTEGER"), one_ref_param(SymbolKind::Integer), false),
        SymbolEntry::procedure(Symbol::intern("GETFLOAT"), one_ref_param(SymbolKind::Float), false),
        SymbolEntry::procedure(Symbol::intern("GETCHAR"), one_ref_param(SymbolKind::Character), false),
        SymbolEntry::procedure(Symbol::intern("GETSTRING"), one_ref_param(SymbolKind::Str), false),
        SymbolEntry::procedure(Symbol::intern("GETBOOL"), one_ref_param(SymbolKind::Bool), false),
    ]
}

pub const NAMES: [&str; 10] = [
    "PUTINTEGER", "PUTFLOAT", "PUTCHAR", "PUTSTRING", "PUTBOOL",
    "GETINTEGER", "GETFLOAT", "GETCHAR", "GETSTRING", "GETBOOL",
];
