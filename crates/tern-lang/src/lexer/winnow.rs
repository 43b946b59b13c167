use winnow::combinator::{alt, cut_err, opt, repeat};
use winnow::error::{ContextError, ErrMode};
use winnow::token::{literal, take_till, take_until, take_while};
use winnow::{ModalResult, Parser};

pub(crate) const MULTI_PUNCT: &[&str] = &["===", "!==", "=>", "==", "!=", "<=", ">=", "&&", "||"];
pub(crate) const SINGLE_PUNCT: &str = "=+-*/%!<>?:;,.()[]{}";

pub(crate) fn ws(input: &mut &str) -> ModalResult<()> {
    repeat::<_, _, (), _, _>(0.., alt((whitespace, line_comment, block_comment)))
        .parse_next(input)?;
    Ok(())
}

pub(crate) fn whitespace(input: &mut &str) -> ModalResult<()> {
    take_while(1.., char::is_whitespace)
        .map(|_| ())
        .parse_next(input)
}

pub(crate) fn line_comment(input: &mut &str) -> ModalResult<()> {
    literal("//").parse_next(input)?;
    take_till(0.., |c: char| c == '\n').parse_next(input)?;
    opt(literal("\n")).parse_next(input)?;
    Ok(())
}

pub(crate) fn block_comment(input: &mut &str) -> ModalResult<()> {
    literal("/*").parse_next(input)?;
    cut_err(take_until(0.., "*/")).parse_next(input)?;
    literal("*/").parse_next(input)?;
    Ok(())
}

/// Consumes a `"..."` or `'...'` literal including its quotes; escapes are
/// skipped here and decoded by `unescape_string`.
pub(crate) fn parse_quoted_literal(input: &mut &str) -> ModalResult<String> {
    let slice = *input;
    let quote = match slice.chars().next() {
        Some(c @ ('"' | '\'')) => c as u8,
        _ => return Err(backtrack_err()),
    };
    let bytes = slice.as_bytes();
    let mut idx = 1;
    let mut escape = false;
    while idx < bytes.len() {
        let b = bytes[idx];
        idx += 1;
        if b == b'\\' && !escape {
            escape = true;
            continue;
        }
        if b == b'\n' && !escape {
            break;
        }
        if b == quote && !escape {
            let literal = slice[..idx].to_string();
            *input = &slice[idx..];
            return Ok(literal);
        }
        escape = false;
    }
    Err(ErrMode::Cut(ContextError::new()))
}

pub(crate) fn is_ident_start(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_ascii_alphabetic()
}

pub(crate) fn is_ident_continue(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_ascii_alphanumeric()
}

pub(crate) fn backtrack_err() -> ErrMode<ContextError> {
    ErrMode::Backtrack(ContextError::new())
}
