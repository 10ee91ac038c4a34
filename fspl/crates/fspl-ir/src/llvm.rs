//! The backend façade (§6.3): the one surface the parser is allowed to
//! touch. Everything it needs — module/function/block creation, typed
//! arithmetic, comparisons, bitwise ops, conversions, address arithmetic,
//! memory, control flow, calls, and serialization — lives here; nothing
//! about machine code, registers, or linking does. `fspl-par` never
//! imports `inkwell` directly.
//!
//! Handles ([`FunctionId`], [`BlockId`], [`ValueId`]) are small `Copy`
//! indices rather than borrowed inkwell types, so the symbol table
//! (`fspl-sym`, which has no `'ctx` lifetime of its own) can hold a
//! variable's storage location or a procedure's function handle without
//! threading LLVM's context lifetime through every symbol-table type.

use inkwell::basic_block::BasicBlock;
use inkwell::builder::Builder;
use inkwell::context::Context;
use inkwell::module::{Linkage, Module};
use inkwell::types::BasicTypeEnum;
use inkwell::values::{
    BasicValue, BasicValueEnum, FloatValue, FunctionValue, IntValue, PointerValue,
};
use inkwell::{AddressSpace, FloatPredicate, IntPredicate};

use crate::error::{CodeGenError, Result};
use crate::types::{IrType, TypeMapper};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FunctionId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ValueId(pub u32);

/// An SSA value produced mid-expression. Unlike [`ValueId`] this borrows
/// `'ctx` directly — it never needs to outlive the expression that built
/// it, so there is no reason to hide it behind a handle.
#[derive(Clone, Copy, Debug)]
pub enum Value<'ctx> {
    Int(IntValue<'ctx>),
    Float(FloatValue<'ctx>),
    Bool(IntValue<'ctx>),
    Char(IntValue<'ctx>),
    Ptr(PointerValue<'ctx>),
}

impl<'ctx> Value<'ctx> {
    pub fn as_basic(&self) -> BasicValueEnum<'ctx> {
        match *self {
            Value::Int(v) => v.into(),
            Value::Float(v) => v.into(),
            Value::Bool(v) => v.into(),
            Value::Char(v) => v.into(),
            Value::Ptr(v) => v.into(),
        }
    }

    pub fn into_int(self) -> IntValue<'ctx> {
        match self {
            Value::Int(v) | Value::Bool(v) | Value::Char(v) => v,
            other => panic!("expected an integer-family value, found {other:?}"),
        }
    }

    pub fn into_float(self) -> FloatValue<'ctx> {
        match self {
            Value::Float(v) => v,
            other => panic!("expected a float value, found {other:?}"),
        }
    }

    pub fn into_ptr(self) -> PointerValue<'ctx> {
        match self {
            Value::Ptr(v) => v,
            other => panic!("expected a pointer value, found {other:?}"),
        }
    }
}

/// The six relational operators (§4.3.1 `relation`), kept as a façade-level
/// enum rather than handing `fspl-par` `inkwell`'s own predicate types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    Lt,
    Gt,
    LtEq,
    GtEq,
    Eq,
    NotEq,
}

impl Comparison {
    fn int_predicate(self) -> IntPredicate {
        match self {
            Comparison::Lt => IntPredicate::SLT,
            Comparison::Gt => IntPredicate::SGT,
            Comparison::LtEq => IntPredicate::SLE,
            Comparison::GtEq => IntPredicate::SGE,
            Comparison::Eq => IntPredicate::EQ,
            Comparison::NotEq => IntPredicate::NE,
        }
    }

    fn float_predicate(self) -> FloatPredicate {
        match self {
            Comparison::Lt => FloatPredicate::OLT,
            Comparison::Gt => FloatPredicate::OGT,
            Comparison::LtEq => FloatPredicate::OLE,
            Comparison::GtEq => FloatPredicate::OGE,
            Comparison::Eq => FloatPredicate::OEQ,
            Comparison::NotEq => FloatPredicate::ONE,
        }
    }
}

/// Owns the LLVM context handles and every function/block/value allocated
/// through it. The insertion point ("current position" in §4.3.3) is
/// exactly `Builder`'s own cursor — this façade never tracks a second one.
pub struct Backend<'ctx> {
    context: &'ctx Context,
    module: Module<'ctx>,
    builder: Builder<'ctx>,
    mapper: TypeMapper<'ctx>,

    functions: Vec<FunctionValue<'ctx>>,
    blocks: Vec<BasicBlock<'ctx>>,
    values: Vec<(PointerValue<'ctx>, IrType)>,
}

impl<'ctx> Backend<'ctx> {
    pub fn new(context: &'ctx Context, module_name: &str) -> Self {
        Self {
            context,
            module: context.create_module(module_name),
            builder: context.create_builder(),
            mapper: TypeMapper::new(context),
            functions: Vec::new(),
            blocks: Vec::new(),
            values: Vec::new(),
        }
    }

    // ---- functions & blocks -------------------------------------------

    /// `(return_type, [param_types], variadic=false)` per §6.3; `None`
    /// return type means void.
    pub fn declare_function(
        &mut self,
        name: &str,
        params: &[IrType],
        returns_value: bool,
    ) -> FunctionId {
        let fn_type = self.mapper.function_type(params, returns_value);
        let function = self.module.add_function(name, fn_type, Some(Linkage::External));
        let id = FunctionId(self.functions.len() as u32);
        self.functions.push(function);
        id
    }

    pub fn function_param(&self, function: FunctionId, index: u32) -> Result<Value<'ctx>> {
        let f = self.function_value(function)?;
        let param = f
            .get_nth_param(index)
            .ok_or_else(|| CodeGenError::BuilderFailed(format!("no parameter #{index}")))?;
        Ok(Self::wrap_basic(param))
    }

    pub fn create_block(&mut self, function: FunctionId, label: &str) -> Result<BlockId> {
        let f = self.function_value(function)?;
        let block = self.context.append_basic_block(f, label);
        let id = BlockId(self.blocks.len() as u32);
        self.blocks.push(block);
        Ok(id)
    }

    /// Moves the insertion point (§ "Insertion point" in the glossary) to
    /// the end of `block`. This *is* the "current position" cursor §4.3.3
    /// describes; the parser never tracks one separately.
    pub fn position_at_end(&mut self, block: BlockId) -> Result<()> {
        let bb = self.block_value(block)?;
        self.builder.position_at_end(bb);
        Ok(())
    }

    // ---- memory ---------------------------------------------------------

    pub fn alloca(&mut self, ty: IrType, name: &str) -> Result<ValueId> {
        let basic = self.mapper.basic(&ty);
        let ptr = self
            .builder
            .build_alloca(basic, name)
            .map_err(|e| CodeGenError::BuilderFailed(e.to_string()))?;
        Ok(self.push_value(ptr, ty))
    }

    /// A global scalar, zero-initialized, 16-byte aligned (§9 "Global
    /// initializers").
    pub fn global_scalar_zero(&mut self, ty: IrType, name: &str) -> Result<ValueId> {
        let basic = self.mapper.basic(&ty);
        let zero = Self::zero_of(basic);
        let global = self.module.add_global(basic, Some(AddressSpace::default()), name);
        global.set_initializer(&zero);
        global.set_alignment(16);
        Ok(self.push_value(global.as_pointer_value(), ty))
    }

    /// A global array, aggregate-zero initialized, 16-byte aligned (§9).
    pub fn global_array_zero(&mut self, elem_ty: IrType, len: u32, name: &str) -> Result<ValueId> {
        let array_ty = elem_ty.clone().array_of(len);
        let basic = self.mapper.basic(&array_ty);
        let BasicTypeEnum::ArrayType(arr) = basic else {
            return Err(CodeGenError::BuilderFailed("expected array type".into()));
        };
        let zero = arr.const_zero();
        let global = self.module.add_global(arr, Some(AddressSpace::default()), name);
        global.set_initializer(&zero);
        global.set_alignment(16);
        Ok(self.push_value(global.as_pointer_value(), array_ty))
    }

    /// A string literal as a global NUL-terminated byte buffer (§9).
    pub fn global_string_literal(&mut self, text: &str, name: &str) -> Result<ValueId> {
        let global = self
            .builder
            .build_global_string_ptr(text, name)
            .map_err(|e| CodeGenError::BuilderFailed(e.to_string()))?;
        Ok(self.push_value(global.as_pointer_value(), IrType::Str))
    }

    pub fn load(&mut self, value: ValueId) -> Result<Value<'ctx>> {
        let (ptr, ty) = self.value_entry(value)?.clone();
        let basic = self.mapper.basic(&ty);
        let loaded = self
            .builder
            .build_load(basic, ptr, "load")
            .map_err(|e| CodeGenError::BuilderFailed(e.to_string()))?;
        Ok(Self::wrap_basic(loaded))
    }

    pub fn store(&mut self, dest: ValueId, val: Value<'ctx>) -> Result<()> {
        let (ptr, _) = *self.value_entry(dest)?;
        self.builder
            .build_store(ptr, val.as_basic())
            .map_err(|e| CodeGenError::BuilderFailed(e.to_string()))?;
        Ok(())
    }

    /// Stores through an already-computed pointer rather than a
    /// registered [`ValueId`] — used for `out`/`inout` formal parameters,
    /// whose address arrives as an ordinary [`Value::Ptr`].
    pub fn store_through(&mut self, dest_ptr: Value<'ctx>, val: Value<'ctx>) -> Result<()> {
        self.builder
            .build_store(dest_ptr.into_ptr(), val.as_basic())
            .map_err(|e| CodeGenError::BuilderFailed(e.to_string()))?;
        Ok(())
    }

    pub fn load_through(&mut self, ptr: Value<'ctx>, elem_ty: &IrType) -> Result<Value<'ctx>> {
        let basic = self.mapper.basic(elem_ty);
        let loaded = self
            .builder
            .build_load(basic, ptr.into_ptr(), "load")
            .map_err(|e| CodeGenError::BuilderFailed(e.to_string()))?;
        Ok(Self::wrap_basic(loaded))
    }

    /// Registers an already-computed pointer (typically a by-reference
    /// function parameter) as a handle the rest of the façade can
    /// `load`/`store`/`element_address` through, exactly as if it had
    /// come from `alloca`. `pointee_ty` is the type the pointer addresses,
    /// not the pointer's own type.
    pub fn register_pointer(&mut self, ptr: PointerValue<'ctx>, pointee_ty: IrType) -> ValueId {
        self.push_value(ptr, pointee_ty)
    }

    pub fn address_of(&self, value: ValueId) -> Result<Value<'ctx>> {
        let (ptr, _) = *self.value_entry(value)?;
        Ok(Value::Ptr(ptr))
    }

    pub fn value_type(&self, value: ValueId) -> Result<IrType> {
        Ok(self.value_entry(value)?.1.clone())
    }

    /// GEP-style element address arithmetic (§6.3, §4.3.5): `index` is
    /// already normalized by subtracting the array's declared lower
    /// bound before this is called.
    pub fn element_address(&mut self, array: ValueId, index: Value<'ctx>) -> Result<Value<'ctx>> {
        let (ptr, ty) = self.value_entry(array)?.clone();
        let IrType::Array(elem_ty, _) = &ty else {
            return Err(CodeGenError::BuilderFailed("element_address on a non-array".into()));
        };
        let elem_basic = self.mapper.basic(elem_ty);
        let zero = self.context.i32_type().const_zero();
        let idx = index.into_int();
        let addr = unsafe {
            self.builder
                .build_gep(elem_basic, ptr, &[zero, idx], "elem")
                .map_err(|e| CodeGenError::BuilderFailed(e.to_string()))?
        };
        Ok(Value::Ptr(addr))
    }

    // ---- arithmetic -------------------------------------------------

    pub fn add(&mut self, lhs: Value<'ctx>, rhs: Value<'ctx>) -> Value<'ctx> {
        match (lhs, rhs) {
            (Value::Float(_), _) | (_, Value::Float(_)) => {
                Value::Float(self.builder.build_float_add(self.as_float(lhs), self.as_float(rhs), "fadd").expect("well-typed add"))
            }
            _ => Value::Int(self.builder.build_int_add(lhs.into_int(), rhs.into_int(), "iadd").expect("well-typed add")),
        }
    }

    pub fn sub(&mut self, lhs: Value<'ctx>, rhs: Value<'ctx>) -> Value<'ctx> {
        match (lhs, rhs) {
            (Value::Float(_), _) | (_, Value::Float(_)) => {
                Value::Float(self.builder.build_float_sub(self.as_float(lhs), self.as_float(rhs), "fsub").expect("well-typed sub"))
            }
            _ => Value::Int(self.builder.build_int_sub(lhs.into_int(), rhs.into_int(), "isub").expect("well-typed sub")),
        }
    }

    pub fn mul(&mut self, lhs: Value<'ctx>, rhs: Value<'ctx>) -> Value<'ctx> {
        match (lhs, rhs) {
            (Value::Float(_), _) | (_, Value::Float(_)) => {
                Value::Float(self.builder.build_float_mul(self.as_float(lhs), self.as_float(rhs), "fmul").expect("well-typed mul"))
            }
            _ => Value::Int(self.builder.build_int_mul(lhs.into_int(), rhs.into_int(), "imul").expect("well-typed mul")),
        }
    }

    pub fn div(&mut self, lhs: Value<'ctx>, rhs: Value<'ctx>) -> Value<'ctx> {
        match (lhs, rhs) {
            (Value::Float(_), _) | (_, Value::Float(_)) => {
                Value::Float(self.builder.build_float_div(self.as_float(lhs), self.as_float(rhs), "fdiv").expect("well-typed div"))
            }
            _ => Value::Int(self.builder.build_int_signed_div(lhs.into_int(), rhs.into_int(), "idiv").expect("well-typed div")),
        }
    }

    pub fn negate_int(&mut self, v: Value<'ctx>) -> Value<'ctx> {
        Value::Int(self.builder.build_int_neg(v.into_int(), "ineg").expect("well-typed neg"))
    }

    pub fn negate_float(&mut self, v: Value<'ctx>) -> Value<'ctx> {
        Value::Float(self.builder.build_float_neg(v.into_float(), "fneg").expect("well-typed neg"))
    }

    // ---- comparisons --------------------------------------------------

    pub fn icmp(&mut self, pred: IntPredicate, lhs: Value<'ctx>, rhs: Value<'ctx>) -> Value<'ctx> {
        Value::Bool(
            self.builder
                .build_int_compare(pred, lhs.into_int(), rhs.into_int(), "icmp")
                .expect("well-typed compare"),
        )
    }

    pub fn fcmp(&mut self, pred: FloatPredicate, lhs: Value<'ctx>, rhs: Value<'ctx>) -> Value<'ctx> {
        Value::Bool(
            self.builder
                .build_float_compare(pred, lhs.into_float(), rhs.into_float(), "fcmp")
                .expect("well-typed compare"),
        )
    }

    /// §6.3's "comparisons (signed integer, ordered float)" as a single
    /// entry point keyed by [`Comparison`] rather than `icmp`/`fcmp`'s raw
    /// `inkwell` predicate types — this is what keeps the relational
    /// operators in `fspl-par` from ever importing `inkwell` directly.
    /// Dispatches on the already-widened operands' own kind (float vs.
    /// everything else, since bool and char are both integer-family).
    pub fn compare(&mut self, op: Comparison, lhs: Value<'ctx>, rhs: Value<'ctx>) -> Value<'ctx> {
        match (lhs, rhs) {
            (Value::Float(_), _) | (_, Value::Float(_)) => self.fcmp(op.float_predicate(), lhs, rhs),
            _ => self.icmp(op.int_predicate(), lhs, rhs),
        }
    }

    // ---- bitwise / logical ---------------------------------------------

    pub fn bitwise_and(&mut self, lhs: Value<'ctx>, rhs: Value<'ctx>) -> Value<'ctx> {
        Value::Int(self.builder.build_and(lhs.into_int(), rhs.into_int(), "and").expect("well-typed and"))
    }

    pub fn bitwise_or(&mut self, lhs: Value<'ctx>, rhs: Value<'ctx>) -> Value<'ctx> {
        Value::Int(self.builder.build_or(lhs.into_int(), rhs.into_int(), "or").expect("well-typed or"))
    }

    pub fn bitwise_xor(&mut self, lhs: Value<'ctx>, rhs: Value<'ctx>) -> Value<'ctx> {
        Value::Int(self.builder.build_xor(lhs.into_int(), rhs.into_int(), "xor").expect("well-typed xor"))
    }

    pub fn const_int(&self, v: i64) -> Value<'ctx> {
        Value::Int(self.context.i32_type().const_int(v as u64, true))
    }

    pub fn const_bool(&self, v: bool) -> Value<'ctx> {
        Value::Bool(self.context.bool_type().const_int(v as u64, false))
    }

    pub fn const_float(&self, v: f64) -> Value<'ctx> {
        Value::Float(self.context.f64_type().const_float(v))
    }

    pub fn const_char(&self, v: char) -> Value<'ctx> {
        Value::Char(self.context.i8_type().const_int(v as u64, false))
    }

    // ---- conversions ------------------------------------------------

    pub fn int_to_float(&mut self, v: Value<'ctx>) -> Value<'ctx> {
        Value::Float(
            self.builder
                .build_signed_int_to_float(v.into_int(), self.context.f64_type(), "sitofp")
                .expect("well-typed conversion"),
        )
    }

    pub fn float_to_int(&mut self, v: Value<'ctx>) -> Value<'ctx> {
        Value::Int(
            self.builder
                .build_float_to_signed_int(v.into_float(), self.context.i32_type(), "fptosi")
                .expect("well-typed conversion"),
        )
    }

    /// `0 <-> false, nonzero <-> true`, compiled as "not equal to zero".
    pub fn int_to_bool(&mut self, v: Value<'ctx>) -> Value<'ctx> {
        let zero = self.context.i32_type().const_zero();
        Value::Bool(
            self.builder
                .build_int_compare(IntPredicate::NE, v.into_int(), zero, "ne_zero")
                .expect("well-typed compare"),
        )
    }

    pub fn bool_to_int(&mut self, v: Value<'ctx>) -> Value<'ctx> {
        Value::Int(
            self.builder
                .build_int_z_extend(v.into_int(), self.context.i32_type(), "zext")
                .expect("well-typed conversion"),
        )
    }

    // ---- control flow -------------------------------------------------

    pub fn branch(&mut self, target: BlockId) -> Result<()> {
        let bb = self.block_value(target)?;
        self.builder
            .build_unconditional_branch(bb)
            .map_err(|e| CodeGenError::BuilderFailed(e.to_string()))?;
        Ok(())
    }

    pub fn cond_branch(&mut self, cond: Value<'ctx>, then_block: BlockId, else_block: BlockId) -> Result<()> {
        let then_bb = self.block_value(then_block)?;
        let else_bb = self.block_value(else_block)?;
        self.builder
            .build_conditional_branch(cond.into_int(), then_bb, else_bb)
            .map_err(|e| CodeGenError::BuilderFailed(e.to_string()))?;
        Ok(())
    }

    pub fn call(&mut self, function: FunctionId, args: &[Value<'ctx>]) -> Result<Option<Value<'ctx>>> {
        let f = self.function_value(function)?;
        let basic_args: Vec<_> = args.iter().map(|a| a.as_basic().into()).collect();
        let site = self
            .builder
            .build_call(f, &basic_args, "call")
            .map_err(|e| CodeGenError::BuilderFailed(e.to_string()))?;
        Ok(site.try_as_basic_value().left().map(Self::wrap_basic))
    }

    pub fn ret_void(&mut self) -> Result<()> {
        self.builder
            .build_return(None)
            .map_err(|e| CodeGenError::BuilderFailed(e.to_string()))?;
        Ok(())
    }

    pub fn ret_value(&mut self, v: Value<'ctx>) -> Result<()> {
        let basic = v.as_basic();
        self.builder
            .build_return(Some(&basic as &dyn BasicValue))
            .map_err(|e| CodeGenError::BuilderFailed(e.to_string()))?;
        Ok(())
    }

    // ---- serialization ------------------------------------------------

    pub fn print_to_string(&self) -> String {
        self.module.print_to_string().to_string()
    }

    pub fn verify(&self) -> Result<()> {
        self.module
            .verify()
            .map_err(|e| CodeGenError::VerificationFailed(e.to_string()))
    }

    // ---- internals ------------------------------------------------------

    fn function_value(&self, id: FunctionId) -> Result<FunctionValue<'ctx>> {
        self.functions.get(id.0 as usize).copied().ok_or(CodeGenError::UnknownFunction(id))
    }

    fn block_value(&self, id: BlockId) -> Result<BasicBlock<'ctx>> {
        self.blocks.get(id.0 as usize).copied().ok_or(CodeGenError::UnknownBlock(id))
    }

    fn value_entry(&self, id: ValueId) -> Result<&(PointerValue<'ctx>, IrType)> {
        self.values.get(id.0 as usize).ok_or(CodeGenError::UnknownValue(id))
    }

    fn push_value(&mut self, ptr: PointerValue<'ctx>, ty: IrType) -> ValueId {
        let id = ValueId(self.values.len() as u32);
        self.values.push((ptr, ty));
        id
    }

    fn zero_of(ty: BasicTypeEnum<'ctx>) -> BasicValueEnum<'ctx> {
        match ty {
            BasicTypeEnum::IntType(t) => t.const_zero().into(),
            BasicTypeEnum::FloatType(t) => t.const_zero().into(),
            BasicTypeEnum::PointerType(t) => t.const_null().into(),
            BasicTypeEnum::ArrayType(t) => t.const_zero().into(),
            other => panic!("no zero initializer for {other:?}"),
        }
    }

    fn as_float(&mut self, v: Value<'ctx>) -> FloatValue<'ctx> {
        match v {
            Value::Float(f) => f,
            other => self
                .builder
                .build_signed_int_to_float(other.into_int(), self.context.f64_type(), "sitofp")
                .expect("well-typed widening"),
        }
    }

    fn wrap_basic(v: BasicValueEnum<'ctx>) -> Value<'ctx> {
        match v {
            BasicValueEnum::IntValue(i) => Value::Int(i),
            BasicValueEnum::FloatValue(f) => Value::Float(f),
            BasicValueEnum::PointerValue(p) => Value::Ptr(p),
            other => panic!("unexpected basic value kind from façade operation: {other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declare_function_and_create_block_round_trip_through_handles() {
        let context = Context::create();
        let mut backend = Backend::new(&context, "test");
        let f = backend.declare_function("main", &[], false);
        let entry = backend.create_block(f, "entry").unwrap();
        backend.position_at_end(entry).unwrap();
        backend.ret_void().unwrap();
        assert!(backend.print_to_string().contains("define void @main"));
    }

    #[test]
    fn alloca_store_load_round_trips_a_scalar() {
        let context = Context::create();
        let mut backend = Backend::new(&context, "test");
        let f = backend.declare_function("main", &[], false);
        let entry = backend.create_block(f, "entry").unwrap();
        backend.position_at_end(entry).unwrap();

        let slot = backend.alloca(IrType::Int, "x").unwrap();
        let five = backend.const_int(5);
        backend.store(slot, five).unwrap();
        let _loaded = backend.load(slot).unwrap();
        backend.ret_void().unwrap();

        let ir = backend.print_to_string();
        assert!(ir.contains("alloca i32"));
        assert!(ir.contains("store i32 5"));
    }

    #[test]
    fn unknown_handles_error_instead_of_panicking() {
        let context = Context::create();
        let backend = Backend::new(&context, "test");
        assert!(matches!(backend.function_value(FunctionId(7)), Err(CodeGenError::UnknownFunction(_))));
        assert!(matches!(backend.block_value(BlockId(7)), Err(CodeGenError::UnknownBlock(_))));
    }

    #[test]
    fn int_to_bool_compiles_to_not_equal_zero() {
        let context = Context::create();
        let mut backend = Backend::new(&context, "test");
        let f = backend.declare_function("main", &[], false);
        let entry = backend.create_block(f, "entry").unwrap();
        backend.position_at_end(entry).unwrap();
        let v = backend.const_int(3);
        let _b = backend.int_to_bool(v);
        backend.ret_void().unwrap();
        assert!(backend.print_to_string().contains("icmp ne"));
    }
}
