//! Testing utilities for the braid lexer
//!
//! Small factories and stream helpers shared by unit and integration tests.
//! Token streams carry text and positions that most assertions do not care
//! about; these helpers strip a stream down to the part under test.

use crate::lexing::tokens::{Token, TokenKind};

/// Kinds of a token stream, for shape assertions.
pub fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

/// Texts of a token stream, for content assertions.
pub fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

/// Count the tokens of one kind in a stream.
pub fn count_kind(tokens: &[Token], kind: TokenKind) -> usize {
    tokens.iter().filter(|t| t.kind == kind).count()
}

/// A token at a throwaway position, for tests that only compare kinds.
pub fn mk_token(kind: TokenKind, text: &str) -> Token {
    Token::new(kind, text, 1, 0, 0..text.len())
}

/// A synthetic dedent at a throwaway position.
pub fn dedent_token() -> Token {
    mk_token(TokenKind::Dedent, "")
}
