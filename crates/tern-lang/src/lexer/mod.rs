mod tokenizer;
pub(crate) mod winnow;

pub use tokenizer::{lex, unescape_string, Keyword, LexerError, Token, TokenKind};
