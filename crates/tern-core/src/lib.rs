pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod ops;
pub mod source_map;
pub mod span;
pub mod types;

// Re-export commonly used items for convenience
pub use tracing;

pub type Error = crate::error::Error;
pub type Result<T> = crate::error::Result<T>;
