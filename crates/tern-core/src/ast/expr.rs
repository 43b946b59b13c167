use crate::ast::{Ident, Stmt, TypeAnnotation};
use crate::ops::BinOpKind;
use crate::span::Span;
use crate::types::{Ty, TySlot};
use derive_more::From;
use serde::Serialize;

pub type BExpr = Box<Expr>;

#[derive(Debug, Clone, PartialEq, Serialize, From)]
#[serde(tag = "type")]
pub enum ExprKind {
    #[serde(rename = "NumericLiteral")]
    Number(NumericLiteral),
    #[serde(rename = "StringLiteral")]
    String(StringLiteral),
    #[serde(rename = "BooleanLiteral")]
    Bool(BooleanLiteral),
    #[serde(rename = "Identifier")]
    Ident(Identifier),
    #[serde(rename = "BinaryExpression")]
    Binary(BinaryExpression),
    #[serde(rename = "ConditionalExpression")]
    Conditional(ConditionalExpression),
    #[serde(rename = "ArrowFunctionExpression")]
    Arrow(ArrowFunctionExpression),
    #[serde(rename = "CallExpression")]
    Call(CallExpression),
    #[serde(rename = "ArrayLiteral")]
    Array(ArrayLiteral),
    #[serde(rename = "MemberExpression")]
    Member(MemberExpression),
}

impl ExprKind {
    pub fn node_kind(&self) -> &'static str {
        match self {
            ExprKind::Number(_) => "NumericLiteral",
            ExprKind::String(_) => "StringLiteral",
            ExprKind::Bool(_) => "BooleanLiteral",
            ExprKind::Ident(_) => "Identifier",
            ExprKind::Binary(_) => "BinaryExpression",
            ExprKind::Conditional(_) => "ConditionalExpression",
            ExprKind::Arrow(_) => "ArrowFunctionExpression",
            ExprKind::Call(_) => "CallExpression",
            ExprKind::Array(_) => "ArrayLiteral",
            ExprKind::Member(_) => "MemberExpression",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expr {
    #[serde(flatten)]
    pub kind: ExprKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    #[serde(rename = "inferredType", skip_serializing_if = "Option::is_none")]
    pub ty: TySlot,
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Self {
            kind,
            span: None,
            ty: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut ExprKind {
        &mut self.kind
    }

    pub fn ty(&self) -> Option<&Ty> {
        self.ty.as_ref()
    }

    pub fn set_ty(&mut self, ty: Ty) {
        self.ty = Some(ty);
    }

    pub fn number(value: f64) -> Expr {
        NumericLiteral { value }.into()
    }
    pub fn string(value: impl Into<String>) -> Expr {
        StringLiteral {
            value: value.into(),
        }
        .into()
    }
    pub fn bool(value: bool) -> Expr {
        BooleanLiteral { value }.into()
    }
    pub fn ident(name: impl Into<Ident>) -> Expr {
        Identifier { name: name.into() }.into()
    }
    pub fn binary(op: BinOpKind, lhs: Expr, rhs: Expr) -> Expr {
        BinaryExpression {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
        .into()
    }
    pub fn conditional(test: Expr, consequent: Expr, alternate: Expr) -> Expr {
        ConditionalExpression {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        }
        .into()
    }
    pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
        CallExpression {
            callee: Box::new(callee),
            args,
        }
        .into()
    }
    pub fn array(elements: Vec<Expr>) -> Expr {
        ArrayLiteral { elements }.into()
    }
    pub fn member(object: Expr, index: Expr) -> Expr {
        MemberExpression {
            object: Box::new(object),
            index: Box::new(index),
        }
        .into()
    }
    pub fn arrow(params: Vec<Param>, body: ArrowBody) -> Expr {
        ArrowFunctionExpression {
            params,
            ret_annotation: None,
            body,
        }
        .into()
    }
}

impl<T> From<T> for Expr
where
    ExprKind: From<T>,
{
    fn from(value: T) -> Self {
        Expr::new(ExprKind::from(value))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericLiteral {
    pub value: f64,
}

impl NumericLiteral {
    /// Whether the literal denotes a mathematical integer (`1`, `2.0`).
    pub fn is_integer(&self) -> bool {
        self.value.is_finite() && self.value.fract() == 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StringLiteral {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BooleanLiteral {
    pub value: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identifier {
    pub name: Ident,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryExpression {
    #[serde(rename = "operator")]
    pub op: BinOpKind,
    #[serde(rename = "left")]
    pub lhs: BExpr,
    #[serde(rename = "right")]
    pub rhs: BExpr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionalExpression {
    pub test: BExpr,
    pub consequent: BExpr,
    pub alternate: BExpr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: Ident,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<TypeAnnotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    #[serde(rename = "inferredType", skip_serializing_if = "Option::is_none")]
    pub ty: TySlot,
}

impl Param {
    pub fn new(name: impl Into<Ident>) -> Self {
        Self {
            name: name.into(),
            annotation: None,
            span: None,
            ty: None,
        }
    }

    pub fn with_annotation(mut self, annotation: TypeAnnotation) -> Self {
        self.annotation = Some(annotation);
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

/// `x => x + 1` keeps its expression; `x => { ... }` keeps the statements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArrowBody {
    Block(Vec<Stmt>),
    Expr(BExpr),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrowFunctionExpression {
    pub params: Vec<Param>,
    #[serde(rename = "returnType", skip_serializing_if = "Option::is_none")]
    pub ret_annotation: Option<TypeAnnotation>,
    pub body: ArrowBody,
}

impl ArrowFunctionExpression {
    pub fn with_return_annotation(mut self, annotation: TypeAnnotation) -> Self {
        self.ret_annotation = Some(annotation);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallExpression {
    pub callee: BExpr,
    #[serde(rename = "arguments")]
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayLiteral {
    pub elements: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberExpression {
    pub object: BExpr,
    #[serde(rename = "property")]
    pub index: BExpr,
}
