pub mod lexer;
pub mod parser;
pub mod resolve;

pub use lexer::{lex, Keyword, LexerError, Token, TokenKind};
pub use parser::{parse_expression, parse_program, ParseError};
pub use resolve::resolve_program;
