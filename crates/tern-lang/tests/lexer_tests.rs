use pretty_assertions::assert_eq;
use tern_lang::{lex, Keyword, LexerError, TokenKind};

fn lexemes(source: &str) -> Vec<String> {
    lex(source)
        .unwrap_or_else(|e| panic!("lex failed for `{source}`: {e}"))
        .into_iter()
        .map(|token| token.lexeme)
        .collect()
}

#[test]
fn multi_char_symbols_win_over_single() {
    assert_eq!(
        lexemes("a === b !== c => d <= e"),
        vec!["a", "===", "b", "!==", "c", "=>", "d", "<=", "e"]
    );
}

#[test]
fn keywords_are_classified() {
    let tokens = lex("const f = true; return false").expect("lex");
    assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::Const));
    assert_eq!(tokens[1].kind, TokenKind::Ident);
    assert_eq!(tokens[3].kind, TokenKind::Keyword(Keyword::True));
    assert_eq!(tokens[5].kind, TokenKind::Keyword(Keyword::Return));
    assert_eq!(tokens[6].kind, TokenKind::Keyword(Keyword::False));
}

#[test]
fn numbers_keep_their_fraction() {
    let tokens = lex("1.5 42 3.").expect("lex");
    assert_eq!(tokens[0].lexeme, "1.5");
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[1].lexeme, "42");
    // a dot without digits is punctuation
    assert_eq!(tokens[2].lexeme, "3");
    assert_eq!(tokens[3].lexeme, ".");
}

#[test]
fn comments_and_whitespace_are_skipped() {
    assert_eq!(
        lexemes("// leading\nconst /* inline */ x = 1; // trailing"),
        vec!["const", "x", "=", "1", ";"]
    );
}

#[test]
fn spans_are_byte_offsets() {
    let tokens = lex("const  xy = 'hi';").expect("lex");
    assert_eq!((tokens[1].span.lo, tokens[1].span.hi), (7, 9));
    assert_eq!(tokens[3].kind, TokenKind::StringLiteral);
    assert_eq!((tokens[3].span.lo, tokens[3].span.hi), (12, 16));
}

#[test]
fn unterminated_string_is_an_error() {
    let err = lex("const s = \"open").expect_err("should fail");
    let LexerError::Invalid { offset, .. } = err;
    assert_eq!(offset, 10);
}

#[test]
fn unknown_character_is_an_error() {
    assert!(lex("const x = #;").is_err());
}
