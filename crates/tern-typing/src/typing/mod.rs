pub mod annotation;
pub mod finalize;
pub mod infer_expr;
pub mod infer_stmt;
pub mod scope;
pub mod solver;
pub mod types;
pub mod unify;
