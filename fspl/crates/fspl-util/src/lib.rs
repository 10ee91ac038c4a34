//! Shared foundation types for the fspl compiler family: diagnostic
//! reporting, source-line tracking, and symbol interning.
//!
//! Every other crate in the workspace (`fspl-lex`, `fspl-sym`, `fspl-ir`,
//! `fspl-par`, `fspl-drv`) depends on this one and nothing else in the
//! reverse direction — it has no knowledge of tokens, IR, or grammar.

pub mod diagnostic;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Handler, Level};
pub use span::Line;
pub use symbol::Symbol;

pub use rustc_hash::{FxHashMap, FxHashSet};
