use super::winnow::{
    backtrack_err, is_ident_continue, is_ident_start, parse_quoted_literal, ws, MULTI_PUNCT,
    SINGLE_PUNCT,
};
use tern_core::span::Span;
use thiserror::Error;
use winnow::combinator::{alt, opt};
use winnow::error::{ContextError, ErrMode};
use winnow::token::{one_of, take_while};
use winnow::{ModalResult, Parser};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Const,
    Return,
    True,
    False,
}

impl Keyword {
    fn from_lexeme(lexeme: &str) -> Option<Self> {
        match lexeme {
            "const" => Some(Self::Const),
            "return" => Some(Self::Return),
            "true" => Some(Self::True),
            "false" => Some(Self::False),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Number,
    StringLiteral,
    Symbol,
    Keyword(Keyword),
}

#[derive(Debug, Error)]
pub enum LexerError {
    #[error("lexer error at offset {offset}: {message}")]
    Invalid { offset: usize, message: String },
}

impl LexerError {
    fn at(offset: usize, err: ErrMode<ContextError>) -> Self {
        let message = match err {
            ErrMode::Backtrack(_) => "unexpected character".to_string(),
            ErrMode::Cut(_) => "unterminated literal or comment".to_string(),
            ErrMode::Incomplete(_) => "incomplete input".to_string(),
        };
        LexerError::Invalid { offset, message }
    }
}

pub fn lex(source: &str) -> Result<Vec<Token>, LexerError> {
    let mut input = source;
    let mut tokens = Vec::new();
    while !input.is_empty() {
        let start = source.len() - input.len();
        ws.parse_next(&mut input)
            .map_err(|err| LexerError::at(start, err))?;
        if input.is_empty() {
            break;
        }
        let start = source.len() - input.len();
        let kind = token_kind
            .parse_next(&mut input)
            .map_err(|err| LexerError::at(start, err))?;
        let end = source.len() - input.len();
        let lexeme = source[start..end].to_string();
        let kind = match kind {
            TokenKind::Ident => Keyword::from_lexeme(&lexeme)
                .map(TokenKind::Keyword)
                .unwrap_or(TokenKind::Ident),
            other => other,
        };
        tokens.push(Token {
            kind,
            lexeme,
            span: Span::new(start as u32, end as u32),
        });
    }
    tracing::trace!("lexed {} tokens", tokens.len());
    Ok(tokens)
}

fn token_kind(input: &mut &str) -> ModalResult<TokenKind> {
    alt((string_token, number_token, ident_token, symbol_token)).parse_next(input)
}

fn string_token(input: &mut &str) -> ModalResult<TokenKind> {
    parse_quoted_literal(input).map(|_| TokenKind::StringLiteral)
}

fn number_token(input: &mut &str) -> ModalResult<TokenKind> {
    (
        take_while(1.., |c: char| c.is_ascii_digit()),
        opt(('.', take_while(1.., |c: char| c.is_ascii_digit()))),
    )
        .map(|_| TokenKind::Number)
        .parse_next(input)
}

fn ident_token(input: &mut &str) -> ModalResult<TokenKind> {
    (
        take_while(1.., is_ident_start),
        take_while(0.., is_ident_continue),
    )
        .parse_next(input)
        .map(|_| TokenKind::Ident)
}

fn symbol_token(input: &mut &str) -> ModalResult<TokenKind> {
    alt((
        multi_punct_token.map(|_| TokenKind::Symbol),
        single_punct_token.map(|_| TokenKind::Symbol),
    ))
    .parse_next(input)
}

fn multi_punct_token(input: &mut &str) -> ModalResult<&'static str> {
    for sym in MULTI_PUNCT {
        if let Some(rest) = input.strip_prefix(sym) {
            *input = rest;
            return Ok(*sym);
        }
    }
    Err(backtrack_err())
}

fn single_punct_token(input: &mut &str) -> ModalResult<char> {
    one_of(|c: char| SINGLE_PUNCT.contains(c)).parse_next(input)
}

/// Decodes the body of a quoted literal lexeme (quotes included).
pub fn unescape_string(lexeme: &str) -> String {
    let inner = lexeme
        .get(1..lexeme.len().saturating_sub(1))
        .unwrap_or_default();
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
