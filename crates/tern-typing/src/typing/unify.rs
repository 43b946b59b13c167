use crate::{AstTypeInferencer, TypeErrorKind, TypeVarId};
use tern_core::span::Span;
use tern_core::types::{type_var_name, Ty, TypeFunction};

/// Arena record of a type variable. `resolved` is the union-find link; it is
/// only ever set after an occurs check, so following links terminates.
#[derive(Clone, Debug)]
pub(crate) struct TypeVar {
    pub(crate) name: String,
    pub(crate) resolved: Option<Ty>,
}

impl AstTypeInferencer {
    pub(crate) fn fresh_type_var(&mut self) -> TypeVarId {
        let id = self.type_vars.len();
        self.type_vars.push(TypeVar {
            name: type_var_name(id),
            resolved: None,
        });
        id
    }

    pub fn fresh_var(&mut self) -> Ty {
        Ty::Var(self.fresh_type_var())
    }

    pub fn is_unresolved(&self, var: TypeVarId) -> bool {
        self.type_vars
            .get(var)
            .map(|v| v.resolved.is_none())
            .unwrap_or(false)
    }

    /// Follows `resolved` links to the most specific known type, pointing every
    /// variable on the way directly at the result.
    pub fn compress(&mut self, ty: &Ty) -> Ty {
        let Ty::Var(var) = ty else {
            return ty.clone();
        };
        let Some(next) = self.type_vars[*var].resolved.clone() else {
            return ty.clone();
        };
        let target = self.compress(&next);
        self.type_vars[*var].resolved = Some(target.clone());
        target
    }

    /// Deep form of `compress`: every nested variable is replaced by what it
    /// currently resolves to.
    pub fn resolve(&mut self, ty: &Ty) -> Ty {
        match self.compress(ty) {
            Ty::Function(function) => {
                let params = function.params.iter().map(|p| self.resolve(p)).collect();
                let ret = self.resolve(&function.ret);
                Ty::function(params, ret)
            }
            Ty::Array(elem) => Ty::array(self.resolve(&elem)),
            other => other,
        }
    }

    pub fn type_to_string(&mut self, ty: &Ty) -> String {
        self.resolve(ty).to_string()
    }

    pub fn occurs_in(&mut self, var: TypeVarId, ty: &Ty) -> bool {
        match self.compress(ty) {
            Ty::Var(other) => other == var,
            Ty::Primitive(_) => false,
            Ty::Function(function) => {
                function.params.iter().any(|p| self.occurs_in(var, p))
                    || self.occurs_in(var, &function.ret)
            }
            Ty::Array(elem) => self.occurs_in(var, &elem),
        }
    }

    /// Makes `a` and `b` equal or records why they cannot be. Never fails hard;
    /// returns whether unification succeeded.
    pub fn unify(&mut self, a: &Ty, b: &Ty, span: Option<Span>) -> bool {
        self.unify_with(a, b, span, None)
    }

    /// Like `unify`, with `context` prefixed to any diagnostic it produces.
    pub fn unify_in(&mut self, a: &Ty, b: &Ty, span: Option<Span>, context: &str) -> bool {
        self.unify_with(a, b, span, Some(context))
    }

    fn unify_with(&mut self, a: &Ty, b: &Ty, span: Option<Span>, context: Option<&str>) -> bool {
        let a = self.compress(a);
        let b = self.compress(b);
        if a == b {
            return true;
        }
        match (&a, &b) {
            (Ty::Var(var), _) => self.bind_var(*var, &b, span, context),
            (_, Ty::Var(var)) => self.bind_var(*var, &a, span, context),
            (Ty::Function(fa), Ty::Function(fb)) => self.unify_functions(fa, fb, span, context),
            (Ty::Array(ea), Ty::Array(eb)) => self.unify_with(ea, eb, span, context),
            (Ty::Primitive(pa), Ty::Primitive(pb)) => {
                if pa == pb {
                    return true;
                }
                let message = format!("type mismatch between `{}` and `{}`", pa, pb);
                self.report_unify(TypeErrorKind::Mismatch, span, context, message);
                false
            }
            _ => {
                let message = format!(
                    "cannot unify `{}` with `{}`",
                    self.type_to_string(&a),
                    self.type_to_string(&b)
                );
                self.report_unify(TypeErrorKind::Mismatch, span, context, message);
                false
            }
        }
    }

    fn unify_functions(
        &mut self,
        fa: &TypeFunction,
        fb: &TypeFunction,
        span: Option<Span>,
        context: Option<&str>,
    ) -> bool {
        if fa.params.len() != fb.params.len() {
            let message = format!(
                "function arity mismatch: {} parameter(s) vs {} parameter(s)",
                fa.params.len(),
                fb.params.len()
            );
            self.report_unify(TypeErrorKind::Arity, span, context, message);
            return false;
        }
        let mut ok = true;
        for (pa, pb) in fa.params.iter().zip(fb.params.iter()) {
            ok &= self.unify_with(pa, pb, span, context);
        }
        ok &= self.unify_with(&fa.ret, &fb.ret, span, context);
        ok
    }

    fn bind_var(
        &mut self,
        var: TypeVarId,
        ty: &Ty,
        span: Option<Span>,
        context: Option<&str>,
    ) -> bool {
        if self.occurs_in(var, ty) {
            let name = self.type_vars[var].name.clone();
            let message = format!(
                "infinite unification: `{}` occurs in `{}`",
                name,
                self.type_to_string(ty)
            );
            self.report_unify(TypeErrorKind::InfiniteType, span, context, message);
            return false;
        }
        tracing::trace!("bind {} := {}", self.type_vars[var].name, ty);
        self.type_vars[var].resolved = Some(ty.clone());
        true
    }

    fn report_unify(
        &mut self,
        kind: TypeErrorKind,
        span: Option<Span>,
        context: Option<&str>,
        message: String,
    ) {
        let message = match context {
            Some(context) => format!("{}: {}", context, message),
            None => message,
        };
        self.report(kind, span, message);
    }
}
