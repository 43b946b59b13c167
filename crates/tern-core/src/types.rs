//! Type terms attached to the typed tree.
//!
//! Variables are indices into the inference session's arena; the arena owns
//! their `resolved` links, so a `Ty` here is a plain value that can be cloned
//! and compared freely.

use itertools::Itertools;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};

pub type TypeVarId = usize;
pub type TySlot = Option<Ty>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Number,
    Float,
    Bool,
    String,
    Void,
}

impl PrimitiveType {
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveType::Number => "Number",
            PrimitiveType::Float => "Float",
            PrimitiveType::Bool => "Bool",
            PrimitiveType::String => "String",
            PrimitiveType::Void => "Void",
        }
    }
}

impl Display for PrimitiveType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeFunction {
    pub params: Vec<Ty>,
    pub ret: Box<Ty>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ty {
    Var(TypeVarId),
    Primitive(PrimitiveType),
    Function(TypeFunction),
    Array(Box<Ty>),
}

impl Ty {
    pub fn number() -> Ty {
        Ty::Primitive(PrimitiveType::Number)
    }
    pub fn float() -> Ty {
        Ty::Primitive(PrimitiveType::Float)
    }
    pub fn bool() -> Ty {
        Ty::Primitive(PrimitiveType::Bool)
    }
    pub fn string() -> Ty {
        Ty::Primitive(PrimitiveType::String)
    }
    pub fn void() -> Ty {
        Ty::Primitive(PrimitiveType::Void)
    }
    pub fn function(params: Vec<Ty>, ret: Ty) -> Ty {
        Ty::Function(TypeFunction {
            params,
            ret: Box::new(ret),
        })
    }
    pub fn array(elem: Ty) -> Ty {
        Ty::Array(Box::new(elem))
    }

    pub fn as_var(&self) -> Option<TypeVarId> {
        match self {
            Ty::Var(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_primitive(&self, prim: PrimitiveType) -> bool {
        matches!(self, Ty::Primitive(p) if *p == prim)
    }
}

/// Display name of a type variable: `a` … `z`, then `a1` … `z1`, and so on.
pub fn type_var_name(id: TypeVarId) -> String {
    let letter = (b'a' + (id % 26) as u8) as char;
    match id / 26 {
        0 => letter.to_string(),
        round => format!("{}{}", letter, round),
    }
}

impl Display for Ty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Ty::Var(id) => f.write_str(&type_var_name(*id)),
            Ty::Primitive(prim) => write!(f, "{}", prim),
            Ty::Function(function) => write!(
                f,
                "({}) -> {}",
                function.params.iter().join(", "),
                function.ret
            ),
            Ty::Array(elem) => write!(f, "Array<{}>", elem),
        }
    }
}

impl Serialize for Ty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_names_wrap_after_z() {
        assert_eq!(type_var_name(0), "a");
        assert_eq!(type_var_name(25), "z");
        assert_eq!(type_var_name(26), "a1");
        assert_eq!(type_var_name(53), "b2");
    }

    #[test]
    fn function_types_render_with_parenthesized_parameters() {
        let callback = Ty::function(vec![Ty::number()], Ty::bool());
        let ty = Ty::function(vec![callback, Ty::array(Ty::Var(2))], Ty::void());
        assert_eq!(ty.to_string(), "((Number) -> Bool, Array<c>) -> Void");
    }
}
