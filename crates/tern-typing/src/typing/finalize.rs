use crate::AstTypeInferencer;
use tern_core::ast::*;
use tern_core::types::TySlot;

impl AstTypeInferencer {
    /// Rewrites every type slot in the tree to its fully resolved form so the
    /// tree no longer depends on this session's variable arena.
    pub fn finalize_program(&mut self, program: &mut Program) {
        self.finalize_slot(&mut program.ty);
        for stmt in &mut program.body {
            self.finalize_stmt(stmt);
        }
    }

    fn finalize_slot(&mut self, slot: &mut TySlot) {
        if let Some(ty) = slot.take() {
            *slot = Some(self.resolve(&ty));
        }
    }

    fn finalize_stmt(&mut self, stmt: &mut Stmt) {
        match stmt {
            Stmt::Const(decl) => {
                self.finalize_slot(&mut decl.ty);
                self.finalize_expr(&mut decl.init);
            }
            Stmt::Return(ret) => {
                self.finalize_slot(&mut ret.ty);
                if let Some(argument) = &mut ret.argument {
                    self.finalize_expr(argument);
                }
            }
            Stmt::Expr(expr) => self.finalize_expr(expr),
        }
    }

    fn finalize_expr(&mut self, expr: &mut Expr) {
        self.finalize_slot(&mut expr.ty);
        match &mut expr.kind {
            ExprKind::Number(_) | ExprKind::String(_) | ExprKind::Bool(_) | ExprKind::Ident(_) => {}
            ExprKind::Binary(binary) => {
                self.finalize_expr(&mut binary.lhs);
                self.finalize_expr(&mut binary.rhs);
            }
            ExprKind::Conditional(conditional) => {
                self.finalize_expr(&mut conditional.test);
                self.finalize_expr(&mut conditional.consequent);
                self.finalize_expr(&mut conditional.alternate);
            }
            ExprKind::Arrow(arrow) => {
                for param in &mut arrow.params {
                    self.finalize_slot(&mut param.ty);
                }
                match &mut arrow.body {
                    ArrowBody::Expr(body) => self.finalize_expr(body),
                    ArrowBody::Block(body) => {
                        for stmt in body {
                            self.finalize_stmt(stmt);
                        }
                    }
                }
            }
            ExprKind::Call(call) => {
                self.finalize_expr(&mut call.callee);
                for arg in &mut call.args {
                    self.finalize_expr(arg);
                }
            }
            ExprKind::Array(array) => {
                for element in &mut array.elements {
                    self.finalize_expr(element);
                }
            }
            ExprKind::Member(member) => {
                self.finalize_expr(&mut member.object);
                self.finalize_expr(&mut member.index);
            }
        }
    }
}
