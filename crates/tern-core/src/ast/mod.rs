//! Syntax tree for tern programs.
//!
//! Nodes serialize with a `"type"` discriminator carrying the node-kind name,
//! and every value-denoting node has a type slot the typer fills in.

use crate::span::Span;
use crate::types::{Ty, TySlot};
use derive_more::From;
use serde::Serialize;
use std::fmt::{Display, Formatter};

mod annotation;
mod expr;

pub use annotation::*;
pub use expr::*;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Ident {
    name: String,
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl Display for Ident {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Ident {
    fn from(name: &str) -> Self {
        Ident::new(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Program {
    pub body: Vec<Stmt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    #[serde(rename = "inferredType", skip_serializing_if = "Option::is_none")]
    pub ty: TySlot,
}

impl Program {
    pub fn new(body: Vec<Stmt>) -> Self {
        Self {
            body,
            span: None,
            ty: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn ty(&self) -> Option<&Ty> {
        self.ty.as_ref()
    }

    /// Top-level `const` declarations in source order.
    pub fn declarations(&self) -> impl Iterator<Item = &ConstDeclaration> {
        self.body.iter().filter_map(|stmt| match stmt {
            Stmt::Const(decl) => Some(decl),
            _ => None,
        })
    }

    pub fn declaration(&self, name: &str) -> Option<&ConstDeclaration> {
        self.declarations().find(|decl| decl.name.as_str() == name)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, From)]
#[serde(untagged)]
pub enum Stmt {
    Const(ConstDeclaration),
    Return(ReturnStatement),
    Expr(Expr),
}

impl Stmt {
    pub fn span(&self) -> Option<Span> {
        match self {
            Stmt::Const(decl) => decl.span,
            Stmt::Return(ret) => ret.span,
            Stmt::Expr(expr) => expr.span,
        }
    }

    pub fn ty(&self) -> Option<&Ty> {
        match self {
            Stmt::Const(decl) => decl.ty.as_ref(),
            Stmt::Return(ret) => ret.ty.as_ref(),
            Stmt::Expr(expr) => expr.ty.as_ref(),
        }
    }

    pub fn node_kind(&self) -> &'static str {
        match self {
            Stmt::Const(_) => "ConstDeclaration",
            Stmt::Return(_) => "ReturnStatement",
            Stmt::Expr(expr) => expr.kind.node_kind(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ConstDeclaration {
    pub name: Ident,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<TypeAnnotation>,
    pub init: Box<Expr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    #[serde(rename = "inferredType", skip_serializing_if = "Option::is_none")]
    pub ty: TySlot,
}

impl ConstDeclaration {
    pub fn new(name: impl Into<Ident>, init: Expr) -> Self {
        Self {
            name: name.into(),
            annotation: None,
            init: Box::new(init),
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

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ReturnStatement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub argument: Option<Box<Expr>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    #[serde(rename = "inferredType", skip_serializing_if = "Option::is_none")]
    pub ty: TySlot,
}

impl ReturnStatement {
    pub fn new(argument: Option<Expr>) -> Self {
        Self {
            argument: argument.map(Box::new),
            span: None,
            ty: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}
