//! Layout scenarios over complete braid sources
//!
//! These tests exercise the full pipeline (scanner + post-processor) on
//! realistic documents: grammar notation, embedded code regions, and the
//! places where the two meet.

use braid::lexing::testing::{count_kind, kinds};
use braid::lexing::{indentation_width, tokenize, TokenKind};
use rstest::rstest;

#[test]
fn test_grammar_document_token_shape() {
    let tokens = tokenize("<a> ::= b\n").unwrap();
    insta::assert_debug_snapshot!(kinds(&tokens), @r###"
    [
        Nonterminal,
        Define,
        Ident,
        Newline,
        Eof,
    ]
    "###);
}

#[test]
fn test_document_mixing_grammar_and_embedded_code() {
    let source = "<start> ::= <item>\n%{\nif x:\n    y\n    z\nw\n%}\n<item> ::= \"a\"\n";
    let tokens = tokenize(source).unwrap();
    assert_eq!(
        kinds(&tokens),
        vec![
            // grammar rule, layout-insensitive
            TokenKind::Nonterminal,
            TokenKind::Define,
            TokenKind::Nonterminal,
            TokenKind::Newline,
            // embedded region
            TokenKind::CodeStart,
            TokenKind::Newline,
            TokenKind::Ident, // if
            TokenKind::Ident, // x
            TokenKind::Colon,
            TokenKind::Newline,
            TokenKind::Indent,
            TokenKind::Ident, // y
            TokenKind::Newline,
            TokenKind::Ident, // z
            TokenKind::Newline,
            TokenKind::Dedent,
            TokenKind::Ident, // w
            TokenKind::Newline,
            TokenKind::CodeEnd,
            TokenKind::Newline,
            // back to grammar notation
            TokenKind::Nonterminal,
            TokenKind::Define,
            TokenKind::Str,
            TokenKind::Newline,
            TokenKind::Eof,
        ]
    );

    let indent = tokens
        .iter()
        .find(|t| t.kind == TokenKind::Indent)
        .unwrap();
    assert_eq!(indent.text, "    ");
}

#[test]
fn test_blank_line_inside_embedded_code_produces_no_tokens() {
    let source = "%{\nif x:\n    y\n\n    z\n%}\n";
    let tokens = tokenize(source).unwrap();
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::CodeStart,
            TokenKind::Newline,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Colon,
            TokenKind::Newline,
            TokenKind::Indent,
            TokenKind::Ident, // y
            TokenKind::Newline,
            TokenKind::Ident, // z, straight after y: the blank line left nothing
            TokenKind::Newline,
            TokenKind::Dedent,
            TokenKind::CodeEnd,
            TokenKind::Newline,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_bracketed_call_spanning_lines_stays_one_logical_line() {
    let source = "%{\nf(\n  1,\n  2\n)\n%}\n";
    let tokens = tokenize(source).unwrap();
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::CodeStart,
            TokenKind::Newline,
            TokenKind::Ident,
            TokenKind::OpenParen,
            TokenKind::Number,
            TokenKind::Comma,
            TokenKind::Number,
            TokenKind::CloseParen,
            TokenKind::Newline,
            TokenKind::CodeEnd,
            TokenKind::Newline,
            TokenKind::Eof,
        ]
    );
    assert_eq!(count_kind(&tokens, TokenKind::Indent), 0);
    assert_eq!(count_kind(&tokens, TokenKind::Dedent), 0);
}

#[rstest]
#[case("", 0)]
#[case("    ", 4)]
#[case("\t", 8)]
#[case("  \t", 8)]
#[case("\t ", 9)]
#[case("       \t", 8)]
#[case("        \t", 16)]
fn test_indentation_width_tab_stops(#[case] whitespace: &str, #[case] expected: u32) {
    assert_eq!(indentation_width(whitespace), expected);
}

#[test]
fn test_end_of_input_flushes_newline_dedents_eof() {
    let tokens = tokenize("%{\nif x:\n    if y:\n        z").unwrap();
    let shape = kinds(&tokens);
    assert_eq!(
        &shape[shape.len() - 4..],
        &[
            TokenKind::Newline,
            TokenKind::Dedent,
            TokenKind::Dedent,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_full_document_retokenizes_identically() {
    let source = "<start> ::= <item>\n%{\nif x:\n    y\n%}\n<item> ::= \"a\"\n";
    assert_eq!(tokenize(source).unwrap(), tokenize(source).unwrap());
}

#[test]
fn test_indentation_outside_embedded_code_is_inert() {
    // Continuation-style grammar formatting: the indented alternatives are
    // plain newline-prefixed tokens, no layout structure.
    let source = "<expr> ::= <term>\n    | <expr> \"+\" <term>\n";
    let tokens = tokenize(source).unwrap();
    assert_eq!(count_kind(&tokens, TokenKind::Indent), 0);
    assert_eq!(count_kind(&tokens, TokenKind::Dedent), 0);
    assert_eq!(count_kind(&tokens, TokenKind::Newline), 2);
}
