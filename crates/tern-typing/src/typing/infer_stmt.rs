use crate::{AstTypeInferencer, TypeErrorKind};
use tern_core::ast::{ConstDeclaration, Program, ReturnStatement, Stmt};
use tern_core::types::Ty;

impl AstTypeInferencer {
    pub fn infer_stmt(&mut self, stmt: &mut Stmt) -> Ty {
        match stmt {
            Stmt::Const(decl) => self.infer_const(decl),
            Stmt::Return(ret) => self.infer_return(ret),
            Stmt::Expr(expr) => self.infer_expr(expr),
        }
    }

    fn infer_const(&mut self, decl: &mut ConstDeclaration) -> Ty {
        let init = self.infer_expr(&mut decl.init);
        let bound = match &decl.annotation {
            Some(annotation) => {
                let declared = self.type_from_annotation(annotation);
                let span = decl.init.span.or(decl.span);
                let context = format!("declared type of `{}`", decl.name);
                self.unify_in(&init, &declared, span, &context);
                declared
            }
            None => init,
        };
        tracing::trace!("bind `{}`: {}", decl.name, bound);
        self.bind(decl.name.as_str(), bound.clone());
        decl.ty = Some(bound.clone());
        bound
    }

    fn infer_return(&mut self, ret: &mut ReturnStatement) -> Ty {
        let ty = match &mut ret.argument {
            Some(argument) => self.infer_expr(argument),
            None => Ty::void(),
        };
        ret.ty = Some(ty.clone());
        ty
    }

    /// Infers a block body. Only a final `return` supplies the result type;
    /// without one the body is `Void`.
    pub(crate) fn infer_function_body(&mut self, body: &mut [Stmt]) -> Ty {
        let last = body.len().saturating_sub(1);
        let mut result = None;
        for (index, stmt) in body.iter_mut().enumerate() {
            let ty = self.infer_stmt(stmt);
            if let Stmt::Return(ret) = stmt {
                if index == last {
                    result = Some(ty);
                } else {
                    self.report(
                        TypeErrorKind::Unsupported,
                        ret.span,
                        "`return` must be the last statement of a function body",
                    );
                }
            }
        }
        result.unwrap_or_else(Ty::void)
    }

    /// Infers top-level statements in order; the program's type is that of the
    /// last one, or `Void` for an empty program.
    pub(crate) fn infer_program_body(&mut self, program: &mut Program) -> Ty {
        let mut last = Ty::void();
        for stmt in &mut program.body {
            last = self.infer_stmt(stmt);
        }
        program.ty = Some(last.clone());
        last
    }
}
