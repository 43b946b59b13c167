use super::{
    advance, error_at, expect_ident, expect_symbol, match_symbol, matches_symbol, peek_ident,
    ParseResult,
};
use crate::lexer::Token;
use tern_core::ast::TypeAnnotation;
use tern_core::span::Span;

/// `number`, `string[]`, `Array<boolean>`, `(x: number, y: number) => number`.
pub(crate) fn parse_type(input: &mut &[Token]) -> ParseResult<TypeAnnotation> {
    let mut ty = parse_type_atom(input)?;
    while matches_symbol(input.first(), "[") && matches_symbol(input.get(1), "]") {
        advance(input);
        let close = expect_symbol(input, "]")?;
        let span = Span::join(ty.span(), Some(close));
        ty = TypeAnnotation::Array {
            element: Box::new(ty),
            span,
        };
    }
    Ok(ty)
}

fn parse_type_atom(input: &mut &[Token]) -> ParseResult<TypeAnnotation> {
    if let Some(open) = match_symbol(input, "(") {
        let mut params = Vec::new();
        if match_symbol(input, ")").is_none() {
            loop {
                // parameter names in function types are documentation only
                if peek_ident(input) && matches_symbol(input.get(1), ":") {
                    advance(input);
                    advance(input);
                }
                params.push(parse_type(input)?);
                if match_symbol(input, ",").is_some() {
                    continue;
                }
                expect_symbol(input, ")")?;
                break;
            }
        }
        if match_symbol(input, "=>").is_some() {
            let ret = parse_type(input)?;
            let span = Span::join(Some(open), ret.span());
            return Ok(TypeAnnotation::Function {
                params,
                ret: Box::new(ret),
                span,
            });
        }
        if params.len() == 1 {
            if let Some(grouped) = params.pop() {
                return Ok(grouped);
            }
        }
        return Err(error_at(input, "'=>'"));
    }

    let (name, span) = expect_ident(input)?;
    if name == "Array" && match_symbol(input, "<").is_some() {
        let element = parse_type(input)?;
        let close = expect_symbol(input, ">")?;
        return Ok(TypeAnnotation::Array {
            element: Box::new(element),
            span: Some(span.to(close)),
        });
    }
    Ok(TypeAnnotation::Named {
        name,
        span: Some(span),
    })
}
