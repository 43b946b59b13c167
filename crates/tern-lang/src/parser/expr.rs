use super::{
    advance, error_at, expect_ident, expect_symbol, match_symbol, matches_symbol, parse_stmt,
    parse_type, peek_ident, unexpected, ParseError, ParseResult,
};
use crate::lexer::{unescape_string, Keyword, Token, TokenKind};
use tern_core::ast::{
    ArrowBody, ArrowFunctionExpression, Expr, Param, TypeAnnotation,
};
use tern_core::ops::BinOpKind;
use tern_core::span::Span;

pub(crate) fn parse_expr(input: &mut &[Token]) -> ParseResult<Expr> {
    if let Some(arrow) = try_parse_arrow(input)? {
        return Ok(arrow);
    }
    parse_conditional(input)
}

struct ArrowHead {
    start: Span,
    params: Vec<Param>,
    ret_annotation: Option<TypeAnnotation>,
}

/// Arrow functions and parenthesized expressions share a prefix; the head is
/// parsed speculatively and the slice is rewound when no `=>` follows.
fn try_parse_arrow(input: &mut &[Token]) -> ParseResult<Option<Expr>> {
    if peek_ident(input) && matches_symbol(input.get(1), "=>") {
        let (name, span) = expect_ident(input)?;
        expect_symbol(input, "=>")?;
        let head = ArrowHead {
            start: span,
            params: vec![Param::new(name.as_str()).with_span(span)],
            ret_annotation: None,
        };
        return parse_arrow_body(input, head).map(Some);
    }

    if !matches_symbol(input.first(), "(") {
        return Ok(None);
    }
    let checkpoint = *input;
    match parse_arrow_head(input) {
        Some(head) => parse_arrow_body(input, head).map(Some),
        None => {
            *input = checkpoint;
            Ok(None)
        }
    }
}

fn parse_arrow_head(input: &mut &[Token]) -> Option<ArrowHead> {
    let start = match_symbol(input, "(")?;
    let mut params = Vec::new();
    if match_symbol(input, ")").is_none() {
        loop {
            let (name, span) = expect_ident(input).ok()?;
            let mut param = Param::new(name.as_str()).with_span(span);
            if match_symbol(input, ":").is_some() {
                let annotation = parse_type(input).ok()?;
                if let Some(end) = annotation.span() {
                    param.span = Some(span.to(end));
                }
                param.annotation = Some(annotation);
            }
            params.push(param);
            if match_symbol(input, ",").is_some() {
                continue;
            }
            match_symbol(input, ")")?;
            break;
        }
    }
    let ret_annotation = if match_symbol(input, ":").is_some() {
        Some(parse_type(input).ok()?)
    } else {
        None
    };
    match_symbol(input, "=>")?;
    Some(ArrowHead {
        start,
        params,
        ret_annotation,
    })
}

fn parse_arrow_body(input: &mut &[Token], head: ArrowHead) -> ParseResult<Expr> {
    let (body, end) = if let Some(open) = match_symbol(input, "{") {
        let mut stmts = Vec::new();
        let close = loop {
            if let Some(close) = match_symbol(input, "}") {
                break close;
            }
            if input.is_empty() {
                return Err(ParseError::UnexpectedEof {
                    expected: "'}'".to_string(),
                });
            }
            stmts.push(parse_stmt(input)?);
        };
        (ArrowBody::Block(stmts), open.to(close))
    } else {
        let expr = parse_expr(input)?;
        let end = expr.span.unwrap_or(head.start);
        (ArrowBody::Expr(Box::new(expr)), end)
    };
    let arrow = ArrowFunctionExpression {
        params: head.params,
        ret_annotation: head.ret_annotation,
        body,
    };
    Ok(Expr::from(arrow).with_span(head.start.to(end)))
}

fn parse_conditional(input: &mut &[Token]) -> ParseResult<Expr> {
    let test = parse_binary(input, 1)?;
    if match_symbol(input, "?").is_none() {
        return Ok(test);
    }
    let consequent = parse_expr(input)?;
    expect_symbol(input, ":")?;
    let alternate = parse_expr(input)?;
    let span = Span::join(test.span, alternate.span);
    let expr = Expr::conditional(test, consequent, alternate);
    Ok(match span {
        Some(span) => expr.with_span(span),
        None => expr,
    })
}

fn parse_binary(input: &mut &[Token], min_prec: u8) -> ParseResult<Expr> {
    let mut left = parse_postfix(input)?;
    while let Some(op) = peek_binop(input) {
        let prec = op.precedence();
        if prec < min_prec {
            break;
        }
        advance(input);
        let right = parse_binary(input, prec + 1)?;
        let span = Span::join(left.span, right.span);
        left = Expr::binary(op, left, right);
        left.span = span;
    }
    Ok(left)
}

fn peek_binop(input: &[Token]) -> Option<BinOpKind> {
    match input.first()? {
        Token {
            kind: TokenKind::Symbol,
            lexeme,
            ..
        } => BinOpKind::from_symbol(lexeme),
        _ => None,
    }
}

fn parse_postfix(input: &mut &[Token]) -> ParseResult<Expr> {
    let mut expr = parse_primary(input)?;
    loop {
        if match_symbol(input, "(").is_some() {
            let (args, close) = parse_list(input, ")")?;
            let span = expr.span.map(|span| span.to(close)).unwrap_or(close);
            expr = Expr::call(expr, args).with_span(span);
        } else if match_symbol(input, "[").is_some() {
            let index = parse_expr(input)?;
            let close = expect_symbol(input, "]")?;
            let span = expr.span.map(|span| span.to(close)).unwrap_or(close);
            expr = Expr::member(expr, index).with_span(span);
        } else {
            break;
        }
    }
    Ok(expr)
}

/// Comma-separated expressions up to `close`; a trailing comma is accepted.
fn parse_list(input: &mut &[Token], close: &str) -> ParseResult<(Vec<Expr>, Span)> {
    let mut items = Vec::new();
    loop {
        if let Some(end) = match_symbol(input, close) {
            return Ok((items, end));
        }
        items.push(parse_expr(input)?);
        if match_symbol(input, ",").is_none() {
            let end = expect_symbol(input, close)?;
            return Ok((items, end));
        }
    }
}

fn parse_primary(input: &mut &[Token]) -> ParseResult<Expr> {
    let Some(token) = advance(input) else {
        return Err(error_at(input, "expression"));
    };
    match &token.kind {
        TokenKind::Number => {
            let value: f64 = token
                .lexeme
                .parse()
                .map_err(|_| ParseError::InvalidNumber(token.lexeme.clone()))?;
            Ok(Expr::number(value).with_span(token.span))
        }
        TokenKind::StringLiteral => {
            Ok(Expr::string(unescape_string(&token.lexeme)).with_span(token.span))
        }
        TokenKind::Keyword(Keyword::True) => Ok(Expr::bool(true).with_span(token.span)),
        TokenKind::Keyword(Keyword::False) => Ok(Expr::bool(false).with_span(token.span)),
        TokenKind::Ident => Ok(Expr::ident(token.lexeme.as_str()).with_span(token.span)),
        TokenKind::Symbol if token.lexeme == "[" => {
            let (elements, close) = parse_list(input, "]")?;
            Ok(Expr::array(elements).with_span(token.span.to(close)))
        }
        TokenKind::Symbol if token.lexeme == "(" => {
            let inner = parse_expr(input)?;
            let close = expect_symbol(input, ")")?;
            Ok(inner.with_span(token.span.to(close)))
        }
        _ => Err(unexpected("expression", &token)),
    }
}
