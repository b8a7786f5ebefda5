//! Token definitions for the braid format
//!
//! This module defines the closed set of token kinds flowing out of the
//! lexer, plus the `Token` record carrying text and source position. The
//! kind set is one enum shared by every stage: the scanner produces the
//! raw kinds, the post-processor adds the synthetic ones (`Indent`,
//! `Dedent`, `Eof`) and reuses `Newline` for synthesized line breaks.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// All token kinds in the braid format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Synthesized by the layout post-processor
    Indent,
    Dedent,
    Eof,

    // A line break plus its trailing indentation run. Raw outside embedded
    // code; synthesized (break text only) inside it.
    Newline,

    // Embedded-code region markers
    CodeStart,
    CodeEnd,

    // Grouping delimiters (suspend layout while open)
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,

    // Grammar notation
    Nonterminal,
    Define,
    Pipe,

    // Shared lexical categories
    Ident,
    Number,
    Str,
    Colon,
    Comma,
    Semi,
    Dot,
    Op,

    // Trivia: produced by the scanner table, filtered before post-processing
    Whitespace,
    Comment,
    LineJoin,

    // Unmatched input, forwarded unchanged
    Error,
}

impl TokenKind {
    /// Kinds that only the post-processor emits, never the scanner table.
    pub fn is_synthetic(&self) -> bool {
        matches!(self, TokenKind::Indent | TokenKind::Dedent | TokenKind::Eof)
    }

    /// Opening grouping delimiter (increments the bracket depth).
    pub fn opens_group(&self) -> bool {
        matches!(
            self,
            TokenKind::OpenParen | TokenKind::OpenBracket | TokenKind::OpenBrace
        )
    }

    /// Closing grouping delimiter (decrements the bracket depth).
    pub fn closes_group(&self) -> bool {
        matches!(
            self,
            TokenKind::CloseParen | TokenKind::CloseBracket | TokenKind::CloseBrace
        )
    }

    /// Trivia kinds the scanner filters out of the raw stream.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::Comment | TokenKind::LineJoin
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
            TokenKind::Eof => "EOF",
            TokenKind::Newline => "NEWLINE",
            TokenKind::CodeStart => "CODE_START",
            TokenKind::CodeEnd => "CODE_END",
            TokenKind::OpenParen => "OPEN_PAREN",
            TokenKind::CloseParen => "CLOSE_PAREN",
            TokenKind::OpenBracket => "OPEN_BRACKET",
            TokenKind::CloseBracket => "CLOSE_BRACKET",
            TokenKind::OpenBrace => "OPEN_BRACE",
            TokenKind::CloseBrace => "CLOSE_BRACE",
            TokenKind::Nonterminal => "NONTERMINAL",
            TokenKind::Define => "DEFINE",
            TokenKind::Pipe => "PIPE",
            TokenKind::Ident => "IDENT",
            TokenKind::Number => "NUMBER",
            TokenKind::Str => "STRING",
            TokenKind::Colon => "COLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Semi => "SEMI",
            TokenKind::Dot => "DOT",
            TokenKind::Op => "OP",
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::Comment => "COMMENT",
            TokenKind::LineJoin => "LINE_JOIN",
            TokenKind::Error => "ERROR",
        };
        write!(f, "{}", name)
    }
}

/// One token in the output stream.
///
/// `span` is the byte range in the source; synthetic tokens use the range
/// of the text they were derived from (`Indent` covers its whitespace run,
/// `Dedent` is empty at the point of dedentation). `line` is 1-based,
/// `column` is 0-based, both at the token start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
    pub column: u32,
    pub span: Range<usize>,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        line: u32,
        column: u32,
        span: Range<usize>,
    ) -> Self {
        Token {
            kind,
            text: text.into(),
            line,
            column,
            span,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_predicates() {
        assert!(TokenKind::Indent.is_synthetic());
        assert!(TokenKind::Dedent.is_synthetic());
        assert!(TokenKind::Eof.is_synthetic());
        assert!(!TokenKind::Newline.is_synthetic());

        assert!(TokenKind::OpenParen.opens_group());
        assert!(TokenKind::OpenBrace.opens_group());
        assert!(!TokenKind::CodeStart.opens_group());

        assert!(TokenKind::CloseBracket.closes_group());
        assert!(!TokenKind::CodeEnd.closes_group());

        assert!(TokenKind::Comment.is_trivia());
        assert!(!TokenKind::Newline.is_trivia());
    }

    #[test]
    fn test_kind_display_names() {
        assert_eq!(TokenKind::Indent.to_string(), "INDENT");
        assert_eq!(TokenKind::Dedent.to_string(), "DEDENT");
        assert_eq!(TokenKind::Newline.to_string(), "NEWLINE");
        assert_eq!(TokenKind::Nonterminal.to_string(), "NONTERMINAL");
        assert_eq!(TokenKind::CodeStart.to_string(), "CODE_START");
    }

    #[test]
    fn test_token_display() {
        let token = Token::new(TokenKind::Ident, "foo", 1, 0, 0..3);
        assert_eq!(token.to_string(), "IDENT(\"foo\")");
    }

    #[test]
    fn test_token_serialization_round_trip() {
        let token = Token::new(TokenKind::Newline, "\n", 2, 5, 10..11);
        let json = serde_json::to_string(&token).unwrap();
        let back: Token = serde_json::from_str(&json).unwrap();
        assert_eq!(back, token);
    }
}
