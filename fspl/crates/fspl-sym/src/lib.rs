//! **Symbol Table Manager** (§4.2): tracks every declared name, its type
//! information, and (once emitted) its IR storage handle, across exactly
//! two live scopes — one global, one local to the procedure currently
//! being compiled.
//!
//! `fspl-sym` has no opinion on syntax or emission order; the parser
//! drives it — declaring names as it parses them, resolving names as it
//! emits expressions, entering and leaving the one local scope around a
//! procedure body.

pub mod builtins;
pub mod entry;
pub mod scope;
pub mod table;

pub use entry::{ArrayBounds, InsertPoint, ParamDirection, Parameter, SymbolEntry, SymbolKind};
pub use scope::{EntryRef, Scope};
pub use table::SymbolTable;
