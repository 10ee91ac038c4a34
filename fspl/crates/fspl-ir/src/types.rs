//! The IR type vocabulary the façade accepts (§6.3).
//!
//! Five primitive kinds plus the two compound shapes a parameter or
//! storage location can take: a pointer (for `out`/`inout` scalars and
//! strings) and a fixed-length array. There is no struct, tuple, or
//! nested-pointer type — the source language doesn't have them (§1
//! Non-goals: nested array or pointer types).

use inkwell::context::Context;
use inkwell::types::{BasicTypeEnum, FunctionType};
use inkwell::AddressSpace;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IrType {
    Int,
    Float,
    Bool,
    Char,
    /// A string value is a pointer to a NUL-terminated byte buffer.
    Str,
    /// An `out`/`inout` parameter or any by-reference storage cell.
    PtrTo(Box<IrType>),
    Array(Box<IrType>, u32),
}

impl IrType {
    pub fn ptr_to(self) -> IrType {
        IrType::PtrTo(Box::new(self))
    }

    pub fn array_of(self, len: u32) -> IrType {
        IrType::Array(Box::new(self), len)
    }

    pub fn is_float(&self) -> bool {
        matches!(self, IrType::Float)
    }

    pub fn is_int(&self) -> bool {
        matches!(self, IrType::Int)
    }
}

/// Maps [`IrType`] onto concrete LLVM types for one `Context`.
pub struct TypeMapper<'ctx> {
    context: &'ctx Context,
}

impl<'ctx> TypeMapper<'ctx> {
    pub fn new(context: &'ctx Context) -> Self {
        Self { context }
    }

    pub fn basic(&self, ty: &IrType) -> BasicTypeEnum<'ctx> {
        match ty {
            IrType::Int => self.context.i32_type().into(),
            IrType::Float => self.context.f64_type().into(),
            IrType::Bool => self.context.bool_type().into(),
            IrType::Char => self.context.i8_type().into(),
            IrType::Str => self.context.ptr_type(AddressSpace::default()).into(),
            IrType::PtrTo(_) => self.context.ptr_type(AddressSpace::default()).into(),
            IrType::Array(elem, len) => self.basic(elem).array_type(*len).into(),
        }
    }

    /// Builds the function type for a procedure: every parameter lowered
    /// through [`Self::basic`], never variadic (§6.3).
    pub fn function_type(&self, params: &[IrType], returns_value: bool) -> FunctionType<'ctx> {
        let param_types: Vec<_> = params.iter().map(|p| self.basic(p).into()).collect();
        if returns_value {
            self.context.i32_type().fn_type(&param_types, false)
        } else {
            self.context.void_type().fn_type(&param_types, false)
        }
    }
}
