//! The symbol table (§4.2): a global scope that lives for the whole
//! compilation plus at most one active local scope for the procedure
//! body currently being emitted. FSPL has no nested procedure
//! declarations (§9 Open Questions) — `enter_procedure_scope` refuses to
//! open a second local scope rather than stacking one, and the parser
//! turns that refusal into a diagnostic instead of silently shadowing.

use fspl_ir::FunctionId;
use fspl_util::Symbol;

use crate::builtins;
use crate::entry::{InsertPoint, ParamDirection, Parameter, SymbolEntry, SymbolKind};
use crate::scope::{EntryRef, Scope};

pub struct SymbolTable {
    global: Scope,
    local: Option<Scope>,
    current_procedure: Option<FunctionId>,
    insert_point_stack: Vec<InsertPoint>,
}

impl SymbolTable {
    /// A fresh table with the ten built-in I/O procedures already
    /// declared at global scope (§4.3.6).
    pub fn new() -> Self {
        let mut global = Scope::new();
        for entry in builtins::entries() {
            global.insert(entry);
        }
        Self { global, local: None, current_procedure: None, insert_point_stack: Vec::new() }
    }

    /// Looks the name up in the active local scope first, then global
    /// (§4.2: local shadows global). Returns `None` if undeclared
    /// anywhere — the caller diagnoses `E_SEM_UNDECLARED`.
    pub fn resolve(&self, name: Symbol) -> Option<EntryRef> {
        if let Some(local) = &self.local {
            if let Some(entry) = local.get(name) {
                return Some(entry);
            }
        }
        self.global.get(name)
    }

    pub fn declare_global(&mut self, entry: SymbolEntry) -> Option<EntryRef> {
        self.global.insert(entry)
    }

    /// Declares into the active local scope. Panics if there is none —
    /// callers only reach this between `enter_procedure_scope` and
    /// `leave_procedure_scope`.
    pub fn declare_local(&mut self, entry: SymbolEntry) -> Option<EntryRef> {
        self.local
            .as_mut()
            .expect("declare_local called with no active procedure scope")
            .insert(entry)
    }

    pub fn is_declared_in_current_scope(&self, name: Symbol) -> bool {
        if let Some(local) = &self.local {
            local.contains(name)
        } else {
            self.global.contains(name)
        }
    }

    /// Moves `name` out of the active local scope and re-declares it at
    /// global scope, marking the entry `is_global`. Used for the one
    /// case FSPL needs a local binding visible for the rest of the
    /// module: a procedure-local array or string whose backing storage
    /// the façade allocates as a module global rather than a stack slot
    /// (see the Open Question on global vs. stack-allocated locals).
    pub fn promote_to_global(&mut self, name: Symbol) -> Option<EntryRef> {
        let local = self.local.as_mut()?;
        let entry_ref = local.remove(name)?;
        entry_ref.borrow_mut().is_global = true;
        self.global.insert_ref(name, entry_ref.clone());
        Some(entry_ref)
    }

    /// Opens the one local scope FSPL ever has active at a time. Returns
    /// `false` (and leaves the existing local scope untouched) if one is
    /// already open — a nested procedure declaration.
    pub fn enter_procedure_scope(&mut self) -> bool {
        if self.local.is_some() {
            return false;
        }
        self.local = Some(Scope::new());
        true
    }

    /// Drops the active local scope. Leaves `current_procedure_fn`
    /// untouched — the caller is responsible for restoring it to the
    /// enclosing procedure (or `None` at the top level) via
    /// `set_current_procedure_fn` once it knows what that is.
    pub fn leave_procedure_scope(&mut self) {
        self.local = None;
    }

    pub fn in_procedure_scope(&self) -> bool {
        self.local.is_some()
    }

    pub fn add_parameter(
        &mut self,
        name: Symbol,
        kind: SymbolKind,
        direction: ParamDirection,
        array_bounds: Option<crate::entry::ArrayBounds>,
    ) -> Parameter {
        self.declare_local(SymbolEntry::variable(name, kind, array_bounds));
        Parameter { name, kind, direction, array_bounds }
    }

    pub fn set_current_procedure_fn(&mut self, function: FunctionId) {
        self.current_procedure = Some(function);
    }

    pub fn current_procedure_fn(&self) -> Option<FunctionId> {
        self.current_procedure
    }

    pub fn save_insert_point(&mut self, point: InsertPoint) {
        self.insert_point_stack.push(point);
    }

    pub fn restore_insert_point(&mut self) -> Option<InsertPoint> {
        self.insert_point_stack.pop()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fspl_util::Symbol;

    #[test]
    fn builtins_resolve_without_any_user_declaration() {
        let table = SymbolTable::new();
        assert!(table.resolve(Symbol::intern("PUTINTEGER")).is_some());
        assert!(table.resolve(Symbol::intern("GETSTRING")).is_some());
    }

    #[test]
    fn local_declaration_shadows_a_global_of_the_same_name() {
        let mut table = SymbolTable::new();
        table.declare_global(SymbolEntry::variable(Symbol::intern("X"), SymbolKind::Integer, None));
        table.enter_procedure_scope();
        table.declare_local(SymbolEntry::variable(Symbol::intern("X"), SymbolKind::Float, None));
        assert_eq!(table.resolve(Symbol::intern("X")).unwrap().borrow().kind, SymbolKind::Float);
    }

    #[test]
    fn leaving_scope_uncovers_the_global_again() {
        let mut table = SymbolTable::new();
        table.declare_global(SymbolEntry::variable(Symbol::intern("X"), SymbolKind::Integer, None));
        table.enter_procedure_scope();
        table.declare_local(SymbolEntry::variable(Symbol::intern("X"), SymbolKind::Float, None));
        table.leave_procedure_scope();
        assert_eq!(table.resolve(Symbol::intern("X")).unwrap().borrow().kind, SymbolKind::Integer);
    }

    #[test]
    fn entering_a_second_procedure_scope_is_refused() {
        let mut table = SymbolTable::new();
        assert!(table.enter_procedure_scope());
        assert!(!table.enter_procedure_scope());
    }

    #[test]
    fn promote_to_global_moves_the_binding_and_survives_scope_exit() {
        let mut table = SymbolTable::new();
        table.enter_procedure_scope();
        table.declare_local(SymbolEntry::variable(Symbol::intern("BUF"), SymbolKind::Str, None));
        table.promote_to_global(Symbol::intern("BUF"));
        table.leave_procedure_scope();
        let entry = table.resolve(Symbol::intern("BUF")).unwrap();
        assert!(entry.borrow().is_global);
    }

    #[test]
    fn insert_point_stack_is_last_in_first_out() {
        let mut table = SymbolTable::new();
        let a = InsertPoint { function: FunctionId(0), block: fspl_ir::BlockId(0) };
        let b = InsertPoint { function: FunctionId(1), block: fspl_ir::BlockId(1) };
        table.save_insert_point(a);
        table.save_insert_point(b);
        assert_eq!(table.restore_insert_point().unwrap().function, b.function);
        assert_eq!(table.restore_insert_point().unwrap().function, a.function);
        assert!(table.restore_insert_point().is_none());
    }
}
