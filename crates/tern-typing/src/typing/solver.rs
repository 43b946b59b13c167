use crate::{AstTypeInferencer, TypeErrorKind};
use tern_core::ops::BinOpKind;
use tern_core::span::Span;
use tern_core::types::{PrimitiveType, Ty};

impl AstTypeInferencer {
    /// Result type of `lhs op rhs`, given the operand types already inferred.
    pub fn solve_binary(&mut self, op: BinOpKind, lhs: &Ty, rhs: &Ty, span: Option<Span>) -> Ty {
        tracing::trace!("solving `{}` over {} and {}", op, lhs, rhs);
        match op {
            BinOpKind::Add => self.solve_add(lhs, rhs, span),
            BinOpKind::Sub | BinOpKind::Mul | BinOpKind::Div => {
                self.require_numeric(lhs, rhs, span);
                Ty::number()
            }
            BinOpKind::Gt | BinOpKind::Lt | BinOpKind::Ge | BinOpKind::Le => {
                self.require_numeric(lhs, rhs, span);
                Ty::bool()
            }
            BinOpKind::Eq | BinOpKind::Ne => {
                self.unify(lhs, rhs, span);
                Ty::bool()
            }
            other => {
                self.report(
                    TypeErrorKind::Unsupported,
                    span,
                    format!("unsupported binary operator `{}`", other),
                );
                self.fresh_var()
            }
        }
    }

    fn solve_add(&mut self, lhs: &Ty, rhs: &Ty, span: Option<Span>) -> Ty {
        let lhs_string = self.compress(lhs).is_primitive(PrimitiveType::String);
        let rhs_string = self.compress(rhs).is_primitive(PrimitiveType::String);
        match (lhs_string, rhs_string) {
            (true, true) => Ty::string(),
            (true, false) | (false, true) => {
                self.report(
                    TypeErrorKind::Misuse,
                    span,
                    "cannot concatenate string with non-string value",
                );
                Ty::string()
            }
            (false, false) => {
                self.require_numeric(lhs, rhs, span);
                Ty::number()
            }
        }
    }

    fn require_numeric(&mut self, lhs: &Ty, rhs: &Ty, span: Option<Span>) {
        self.unify(lhs, &Ty::number(), span);
        self.unify(rhs, &Ty::number(), span);
    }
}
