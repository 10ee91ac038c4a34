//! IR backend façade (§6.3): the narrow surface between the
//! parser/semantic emitter and LLVM. Everything the façade needs to
//! expose lives in [`llvm`]; [`types`] is the type vocabulary it accepts
//! and [`error`] the failure modes a malformed call can hit.

pub mod error;
pub mod llvm;
pub mod types;

pub use error::{CodeGenError, Result};
pub use llvm::{Backend, BlockId, Comparison, FunctionId, Value, ValueId};
pub use types::{IrType, TypeMapper};
