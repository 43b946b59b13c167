use crate::AstTypeInferencer;
use tern_core::ast::TypeAnnotation;
use tern_core::types::Ty;

impl AstTypeInferencer {
    /// Maps a written type onto a type term. Unknown names become a fresh
    /// variable instead of an error.
    pub fn type_from_annotation(&mut self, annotation: &TypeAnnotation) -> Ty {
        match annotation {
            TypeAnnotation::Named { name, .. } => match name.as_str() {
                "number" => Ty::number(),
                "string" => Ty::string(),
                "boolean" => Ty::bool(),
                "void" => Ty::void(),
                other => {
                    tracing::debug!("unknown type name `{}`, using a fresh variable", other);
                    self.fresh_var()
                }
            },
            TypeAnnotation::Array { element, .. } => {
                Ty::array(self.type_from_annotation(element))
            }
            TypeAnnotation::Function { params, ret, .. } => {
                let params = params
                    .iter()
                    .map(|param| self.type_from_annotation(param))
                    .collect();
                let ret = self.type_from_annotation(ret);
                Ty::function(params, ret)
            }
        }
    }
}
