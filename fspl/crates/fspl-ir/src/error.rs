//! Errors the façade itself can raise.
//!
//! These are all "internal" in the §7 taxonomy sense: a well-formed caller
//! (the parser, driving the façade the way §6.3 describes) never triggers
//! one. They exist so a malformed call — an unknown handle, a block
//! referenced before it was created — fails with a message instead of an
//! inkwell panic.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodeGenError {
    #[error("unknown value handle {0:?}")]
    UnknownValue(crate::ValueId),

    #[error("unknown block handle {0:?}")]
    UnknownBlock(crate::BlockId),

    #[error("unknown function handle {0:?}")]
    UnknownFunction(crate::FunctionId),

    #[error("LLVM builder rejected the instruction: {0}")]
    BuilderFailed(String),

    #[error("module verification failed: {0}")]
    VerificationFailed(String),
}

pub type Result<T> = std::result::Result<T, CodeGenError>;
