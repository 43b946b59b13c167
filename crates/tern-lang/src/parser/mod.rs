//! Recursive-descent parser over the token slice produced by `lexer::lex`.
//!
//! Every parse function takes `&mut &[Token]` and advances it past what it
//! consumed; on failure the slice position is unspecified unless the caller
//! restored a checkpoint.

mod expr;
mod types;

use crate::lexer::{self, Keyword, LexerError, Token, TokenKind};
use tern_core::ast::{ConstDeclaration, Ident, Program, ReturnStatement, Stmt};
use tern_core::span::Span;
use thiserror::Error;

pub(crate) use expr::parse_expr;
pub(crate) use types::parse_type;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("lex error: {0}")]
    Lex(#[from] LexerError),
    #[error("expected {expected} at {span}, found '{found}'")]
    Unexpected {
        expected: String,
        found: String,
        span: Span,
    },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },
    #[error("invalid numeric literal '{0}'")]
    InvalidNumber(String),
}

impl ParseError {
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::Unexpected { span, .. } => Some(*span),
            ParseError::Lex(LexerError::Invalid { offset, .. }) => {
                Some(Span::new(*offset as u32, *offset as u32 + 1))
            }
            _ => None,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

pub fn parse_program(source: &str) -> ParseResult<Program> {
    let tokens = lexer::lex(source)?;
    let mut input: &[Token] = tokens.as_slice();
    let mut body = Vec::new();
    while !input.is_empty() {
        body.push(parse_stmt(&mut input)?);
    }
    tracing::debug!("parsed program with {} statements", body.len());
    Ok(Program::new(body).with_span(Span::new(0, source.len() as u32)))
}

pub fn parse_expression(source: &str) -> ParseResult<tern_core::ast::Expr> {
    let tokens = lexer::lex(source)?;
    let mut input: &[Token] = tokens.as_slice();
    let expr = parse_expr(&mut input)?;
    if let Some(token) = input.first() {
        return Err(unexpected("end of input", token));
    }
    Ok(expr)
}

pub(crate) fn parse_stmt(input: &mut &[Token]) -> ParseResult<Stmt> {
    if let Some(start) = match_keyword(input, Keyword::Const) {
        let (name, name_span) = expect_ident(input)?;
        let annotation = if match_symbol(input, ":").is_some() {
            Some(parse_type(input)?)
        } else {
            None
        };
        expect_symbol(input, "=")?;
        let init = parse_expr(input)?;
        let mut end = init.span.unwrap_or(name_span);
        if let Some(semi) = match_symbol(input, ";") {
            end = semi;
        }
        let mut decl = ConstDeclaration::new(Ident::new(name), init).with_span(start.to(end));
        decl.annotation = annotation;
        return Ok(decl.into());
    }

    if let Some(start) = match_keyword(input, Keyword::Return) {
        let argument = if at_statement_end(input) {
            None
        } else {
            Some(parse_expr(input)?)
        };
        let mut end = argument.as_ref().and_then(|arg| arg.span).unwrap_or(start);
        if let Some(semi) = match_symbol(input, ";") {
            end = semi;
        }
        return Ok(ReturnStatement::new(argument).with_span(start.to(end)).into());
    }

    let expr = parse_expr(input)?;
    if let Some(semi) = match_symbol(input, ";") {
        let span = expr.span.map(|span| span.to(semi)).unwrap_or(semi);
        return Ok(Stmt::Expr(expr.with_span(span)));
    }
    Ok(Stmt::Expr(expr))
}

fn at_statement_end(input: &[Token]) -> bool {
    input.is_empty() || matches_symbol(input.first(), ";") || matches_symbol(input.first(), "}")
}

pub(crate) fn unexpected(expected: &str, token: &Token) -> ParseError {
    ParseError::Unexpected {
        expected: expected.to_string(),
        found: token.lexeme.clone(),
        span: token.span,
    }
}

pub(crate) fn error_at(input: &[Token], expected: &str) -> ParseError {
    match input.first() {
        Some(token) => unexpected(expected, token),
        None => ParseError::UnexpectedEof {
            expected: expected.to_string(),
        },
    }
}

pub(crate) fn matches_symbol(token: Option<&Token>, symbol: &str) -> bool {
    matches!(
        token,
        Some(Token {
            kind: TokenKind::Symbol,
            lexeme,
            ..
        }) if lexeme == symbol
    )
}

/// Consumes `symbol` if it is next, returning its span.
pub(crate) fn match_symbol(input: &mut &[Token], symbol: &str) -> Option<Span> {
    if matches_symbol(input.first(), symbol) {
        let span = input[0].span;
        *input = &input[1..];
        Some(span)
    } else {
        None
    }
}

pub(crate) fn expect_symbol(input: &mut &[Token], symbol: &str) -> ParseResult<Span> {
    match_symbol(input, symbol).ok_or_else(|| error_at(input, &format!("'{}'", symbol)))
}

pub(crate) fn match_keyword(input: &mut &[Token], keyword: Keyword) -> Option<Span> {
    match input.first() {
        Some(Token {
            kind: TokenKind::Keyword(k),
            span,
            ..
        }) if *k == keyword => {
            let span = *span;
            *input = &input[1..];
            Some(span)
        }
        _ => None,
    }
}

pub(crate) fn peek_ident(input: &[Token]) -> bool {
    matches!(
        input.first(),
        Some(Token {
            kind: TokenKind::Ident,
            ..
        })
    )
}

pub(crate) fn expect_ident(input: &mut &[Token]) -> ParseResult<(String, Span)> {
    match input.first() {
        Some(Token {
            kind: TokenKind::Ident,
            lexeme,
            span,
        }) => {
            let found = (lexeme.clone(), *span);
            *input = &input[1..];
            Ok(found)
        }
        _ => Err(error_at(input, "identifier")),
    }
}

pub(crate) fn advance(input: &mut &[Token]) -> Option<Token> {
    let token = input.first().cloned()?;
    *input = &input[1..];
    Some(token)
}
