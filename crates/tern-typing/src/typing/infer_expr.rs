use crate::{AstTypeInferencer, TypeErrorKind};
use tern_core::ast::*;
use tern_core::span::Span;
use tern_core::types::Ty;

impl AstTypeInferencer {
    /// Infers `expr` and every sub-expression, storing each node's type in its
    /// slot. The slots hold raw terms until `finalize_program` resolves them.
    pub fn infer_expr(&mut self, expr: &mut Expr) -> Ty {
        let span = expr.span;
        let ty = match expr.kind_mut() {
            ExprKind::Number(literal) => {
                if literal.is_integer() {
                    Ty::number()
                } else {
                    Ty::float()
                }
            }
            ExprKind::String(_) => Ty::string(),
            ExprKind::Bool(_) => Ty::bool(),
            ExprKind::Ident(ident) => self.infer_ident(&ident.name, span),
            ExprKind::Binary(binary) => {
                let lhs = self.infer_expr(&mut binary.lhs);
                let rhs = self.infer_expr(&mut binary.rhs);
                self.solve_binary(binary.op, &lhs, &rhs, span)
            }
            ExprKind::Conditional(conditional) => self.infer_conditional(conditional, span),
            ExprKind::Arrow(arrow) => self.infer_arrow(arrow, span),
            ExprKind::Call(call) => self.infer_call(call, span),
            ExprKind::Array(array) => self.infer_array(array),
            ExprKind::Member(member) => self.infer_member(member, span),
        };
        expr.set_ty(ty.clone());
        ty
    }

    fn infer_ident(&mut self, name: &Ident, span: Option<Span>) -> Ty {
        match self.lookup(name.as_str()) {
            Some(ty) => ty,
            None => {
                self.report(
                    TypeErrorKind::Unsupported,
                    span,
                    format!("unbound identifier `{}` reached type inference", name),
                );
                self.fresh_var()
            }
        }
    }

    fn infer_conditional(&mut self, conditional: &mut ConditionalExpression, span: Option<Span>) -> Ty {
        let test = self.infer_expr(&mut conditional.test);
        let test_span = conditional.test.span.or(span);
        self.unify_in(&test, &Ty::bool(), test_span, "ternary condition must be Bool");

        let consequent = self.infer_expr(&mut conditional.consequent);
        let alternate = self.infer_expr(&mut conditional.alternate);
        let result = self.fresh_var();
        let context = "ternary branches must have the same type";
        self.unify_in(&consequent, &result, conditional.consequent.span.or(span), context);
        self.unify_in(&alternate, &result, conditional.alternate.span.or(span), context);
        result
    }

    fn infer_arrow(&mut self, arrow: &mut ArrowFunctionExpression, span: Option<Span>) -> Ty {
        self.push_scope();
        let mut params = Vec::with_capacity(arrow.params.len());
        for param in &mut arrow.params {
            let ty = match &param.annotation {
                Some(annotation) => self.type_from_annotation(annotation),
                None => self.fresh_var(),
            };
            param.ty = Some(ty.clone());
            self.bind(param.name.as_str(), ty.clone());
            self.mark_non_generic(ty.clone());
            params.push(ty);
        }

        let inferred = match &mut arrow.body {
            ArrowBody::Expr(body) => self.infer_expr(body),
            ArrowBody::Block(body) => self.infer_function_body(body),
        };
        let ret = match &arrow.ret_annotation {
            Some(annotation) => {
                let declared = self.type_from_annotation(annotation);
                let ret_span = annotation.span().or(span);
                self.unify_in(&inferred, &declared, ret_span, "declared return type");
                declared
            }
            None => inferred,
        };
        self.pop_scope();

        let ret = self.compress(&ret);
        Ty::function(params, ret)
    }

    fn infer_call(&mut self, call: &mut CallExpression, span: Option<Span>) -> Ty {
        let callee = self.infer_expr(&mut call.callee);
        let callee = self.compress(&callee);
        let args: Vec<Ty> = call.args.iter_mut().map(|arg| self.infer_expr(arg)).collect();

        match callee {
            Ty::Var(var) => {
                let ret = self.fresh_var();
                let expected = Ty::function(args, ret.clone());
                self.unify(&Ty::Var(var), &expected, span);
                ret
            }
            Ty::Function(function) => {
                if function.params.len() != args.len() {
                    self.report(
                        TypeErrorKind::Arity,
                        span,
                        format!(
                            "function expects {} argument(s) but was called with {}",
                            function.params.len(),
                            args.len()
                        ),
                    );
                    return *function.ret;
                }
                for (index, (arg, param)) in args.iter().zip(function.params.iter()).enumerate() {
                    let arg_span = call.args[index].span.or(span);
                    let context = format!("argument {} of call", index + 1);
                    self.unify_in(arg, param, arg_span, &context);
                }
                *function.ret
            }
            other => {
                let message = format!(
                    "called value is not a function: `{}`",
                    self.type_to_string(&other)
                );
                self.report(TypeErrorKind::Misuse, span, message);
                self.fresh_var()
            }
        }
    }

    fn infer_array(&mut self, array: &mut ArrayLiteral) -> Ty {
        let mut elements = array.elements.iter_mut();
        let Some(first) = elements.next() else {
            return Ty::array(self.fresh_var());
        };
        let elem = self.infer_expr(first);
        for element in elements {
            let ty = self.infer_expr(element);
            self.unify_in(&ty, &elem, element.span, "array elements must share one type");
        }
        Ty::array(elem)
    }

    fn infer_member(&mut self, member: &mut MemberExpression, span: Option<Span>) -> Ty {
        let index = self.infer_expr(&mut member.index);
        let index_span = member.index.span.or(span);
        self.unify_in(&index, &Ty::number(), index_span, "array index must be Number");

        let object = self.infer_expr(&mut member.object);
        match self.compress(&object) {
            Ty::Array(elem) => *elem,
            object => {
                let elem = self.fresh_var();
                let object_span = member.object.span.or(span);
                self.unify_in(
                    &object,
                    &Ty::array(elem.clone()),
                    object_span,
                    "indexed value must be an array",
                );
                elem
            }
        }
    }
}
