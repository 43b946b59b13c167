use std::collections::{HashMap, HashSet};

use crate::{AstTypeInferencer, TypeVarId};
use tern_core::types::Ty;

/// One scope frame: its own bindings plus the non-generic set in force while
/// it is the innermost frame. The set is copied on push, so popping a frame
/// restores the enclosing set exactly.
#[derive(Clone, Debug, Default)]
pub(crate) struct ScopeFrame {
    pub(crate) bindings: HashMap<String, Ty>,
    pub(crate) non_generic: Vec<Ty>,
}

impl AstTypeInferencer {
    /// Opens a scope whose lookups fall through to the enclosing ones. The
    /// non-generic set is copied so `pop_scope` restores the outer set.
    pub fn push_scope(&mut self) {
        let non_generic = self
            .scopes
            .last()
            .map(|frame| frame.non_generic.clone())
            .unwrap_or_default();
        self.scopes.push(ScopeFrame {
            bindings: HashMap::new(),
            non_generic,
        });
    }

    pub fn pop_scope(&mut self) {
        // the root frame holds top-level bindings and stays for the session
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn bind(&mut self, name: impl Into<String>, ty: Ty) {
        if let Some(frame) = self.scopes.last_mut() {
            frame.bindings.insert(name.into(), ty);
        }
    }

    pub(crate) fn mark_non_generic(&mut self, ty: Ty) {
        if let Some(frame) = self.scopes.last_mut() {
            frame.non_generic.push(ty);
        }
    }

    fn lookup_binding(&self, name: &str) -> Option<&Ty> {
        self.scopes
            .iter()
            .rev()
            .find_map(|frame| frame.bindings.get(name))
    }

    /// Type of `name` at a use site. Non-generic bindings come back as-is;
    /// everything else is instantiated with fresh variables. `None` when the
    /// name is unbound.
    pub fn lookup(&mut self, name: &str) -> Option<Ty> {
        let stored = self.lookup_binding(name)?.clone();
        let is_non_generic = self
            .scopes
            .last()
            .map(|frame| frame.non_generic.contains(&stored))
            .unwrap_or(false);
        if is_non_generic {
            return Some(stored);
        }
        Some(self.fresh_instance(&stored))
    }

    /// Copies `ty`, replacing every generic unbound variable with a fresh one.
    /// Within one call the same source variable maps to the same copy.
    pub fn fresh_instance(&mut self, ty: &Ty) -> Ty {
        let non_generic = self.non_generic_vars();
        let mut mapping = HashMap::new();
        self.instantiate(ty, &non_generic, &mut mapping)
    }

    fn instantiate(
        &mut self,
        ty: &Ty,
        non_generic: &HashSet<TypeVarId>,
        mapping: &mut HashMap<TypeVarId, Ty>,
    ) -> Ty {
        match self.compress(ty) {
            Ty::Var(var) => {
                if non_generic.contains(&var) {
                    return Ty::Var(var);
                }
                if let Some(copy) = mapping.get(&var) {
                    return copy.clone();
                }
                let copy = self.fresh_var();
                mapping.insert(var, copy.clone());
                copy
            }
            Ty::Primitive(prim) => Ty::Primitive(prim),
            Ty::Function(function) => {
                let params = function
                    .params
                    .iter()
                    .map(|param| self.instantiate(param, non_generic, mapping))
                    .collect();
                let ret = self.instantiate(&function.ret, non_generic, mapping);
                Ty::function(params, ret)
            }
            Ty::Array(elem) => Ty::array(self.instantiate(&elem, non_generic, mapping)),
        }
    }

    /// Unbound variables reachable from the current non-generic types. Any
    /// variable outside this set is generic.
    fn non_generic_vars(&mut self) -> HashSet<TypeVarId> {
        let roots = match self.scopes.last_mut() {
            Some(frame) => std::mem::take(&mut frame.non_generic),
            None => return HashSet::new(),
        };
        let mut vars = HashSet::new();
        for ty in &roots {
            let resolved = self.resolve(ty);
            collect_vars(&resolved, &mut vars);
        }
        if let Some(frame) = self.scopes.last_mut() {
            frame.non_generic = roots;
        }
        vars
    }
}

fn collect_vars(ty: &Ty, vars: &mut HashSet<TypeVarId>) {
    match ty {
        Ty::Var(var) => {
            vars.insert(*var);
        }
        Ty::Primitive(_) => {}
        Ty::Function(function) => {
            for param in &function.params {
                collect_vars(param, vars);
            }
            collect_vars(&function.ret, vars);
        }
        Ty::Array(elem) => collect_vars(elem, vars),
    }
}
