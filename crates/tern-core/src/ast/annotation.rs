use crate::span::Span;
use itertools::Itertools;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// A written type: `number`, `string[]`, `Array<boolean>`, `(x: number) => void`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum TypeAnnotation {
    Named {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        span: Option<Span>,
    },
    Array {
        element: Box<TypeAnnotation>,
        #[serde(skip_serializing_if = "Option::is_none")]
        span: Option<Span>,
    },
    Function {
        params: Vec<TypeAnnotation>,
        ret: Box<TypeAnnotation>,
        #[serde(skip_serializing_if = "Option::is_none")]
        span: Option<Span>,
    },
}

impl TypeAnnotation {
    pub fn named(name: impl Into<String>) -> Self {
        TypeAnnotation::Named {
            name: name.into(),
            span: None,
        }
    }

    pub fn array(element: TypeAnnotation) -> Self {
        TypeAnnotation::Array {
            element: Box::new(element),
            span: None,
        }
    }

    pub fn function(params: Vec<TypeAnnotation>, ret: TypeAnnotation) -> Self {
        TypeAnnotation::Function {
            params,
            ret: Box::new(ret),
            span: None,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            TypeAnnotation::Named { span, .. }
            | TypeAnnotation::Array { span, .. }
            | TypeAnnotation::Function { span, .. } => *span,
        }
    }

    pub fn with_span(mut self, new_span: Span) -> Self {
        match &mut self {
            TypeAnnotation::Named { span, .. }
            | TypeAnnotation::Array { span, .. }
            | TypeAnnotation::Function { span, .. } => *span = Some(new_span),
        }
        self
    }
}

impl Display for TypeAnnotation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeAnnotation::Named { name, .. } => f.write_str(name),
            TypeAnnotation::Array { element, .. } => match element.as_ref() {
                TypeAnnotation::Function { .. } => write!(f, "({})[]", element),
                _ => write!(f, "{}[]", element),
            },
            TypeAnnotation::Function { params, ret, .. } => {
                write!(f, "({}) => {}", params.iter().join(", "), ret)
            }
        }
    }
}
