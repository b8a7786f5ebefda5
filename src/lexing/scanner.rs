//! Raw tokenization for the braid lexer
//!
//! This module is the character-level half of the lexer: a logos pattern
//! table wrapped in a [`Scanner`] that builds position-carrying [`Token`]s.
//! The layout post-processor consumes it through the narrow
//! [`RawTokenSource`] seam (pull one token, peek 1-2 characters, query the
//! cursor position), so the matching technique underneath is an
//! implementation detail.
//!
//! The scanner also owns the skip channel: inline whitespace, `#` comments
//! and `\`-line-joins are matched by the table but never surface as raw
//! tokens. One exception: a whitespace run at byte offset 0 surfaces as a
//! `Newline`-kind token, so a document that opens with an indented line
//! still begins with a well-formed logical-line break.

use logos::Logos;

use crate::lexing::tokens::{Token, TokenKind};

/// The scanner side of the lexer contract.
///
/// The post-processor pulls raw tokens one at a time, peeks up to two
/// characters past the cursor when classifying a line break, and stamps
/// synthetic tokens with the current position.
pub trait RawTokenSource {
    /// Produce the next raw token. Never fails: unmatched input comes back
    /// as an `Error`-kind token, and the end of input as `Eof` (repeatedly,
    /// if pulled again).
    fn next_raw(&mut self) -> Token;

    /// Peek the k-th character past the cursor (k = 0 or 1 in practice).
    fn peek_char(&self, k: usize) -> Option<char>;

    /// True only while the cursor sits at byte offset 0.
    fn at_start_of_input(&self) -> bool;

    /// Current 1-based line of the cursor.
    fn line(&self) -> u32;

    /// Current 0-based column of the cursor.
    fn column(&self) -> u32;

    /// Current byte offset of the cursor.
    fn offset(&self) -> usize;
}

/// The logos matching table. Private: everything downstream sees
/// [`TokenKind`], which also covers the synthetic kinds this table can
/// never produce.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawLex {
    // A line break plus its trailing indentation run, as one match. The
    // post-processor splits the two parts when layout is active.
    #[regex(r"(\r?\n|\r|\f)[ \t]*")]
    Newline,

    #[token("%{")]
    CodeStart,
    #[token("%}")]
    CodeEnd,

    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,

    #[token("::=")]
    Define,
    #[token("|")]
    Pipe,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token(".")]
    Dot,

    #[regex(r"<[A-Za-z_][A-Za-z0-9_]*>")]
    Nonterminal,
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,
    #[regex(r#""([^"\\\r\n]|\\.)*""#)]
    #[regex(r"'([^'\\\r\n]|\\.)*'")]
    Str,
    #[regex(r"[-+*/%=<>!&^~@?]+")]
    Op,

    // Skip channel
    #[regex(r"[ \t]+")]
    Whitespace,
    #[regex(r"#[^\r\n\f]*")]
    Comment,
    #[regex(r"\\[ \t]*(\r?\n|\r|\f)")]
    LineJoin,
}

impl From<RawLex> for TokenKind {
    fn from(raw: RawLex) -> TokenKind {
        match raw {
            RawLex::Newline => TokenKind::Newline,
            RawLex::CodeStart => TokenKind::CodeStart,
            RawLex::CodeEnd => TokenKind::CodeEnd,
            RawLex::OpenParen => TokenKind::OpenParen,
            RawLex::CloseParen => TokenKind::CloseParen,
            RawLex::OpenBracket => TokenKind::OpenBracket,
            RawLex::CloseBracket => TokenKind::CloseBracket,
            RawLex::OpenBrace => TokenKind::OpenBrace,
            RawLex::CloseBrace => TokenKind::CloseBrace,
            RawLex::Define => TokenKind::Define,
            RawLex::Pipe => TokenKind::Pipe,
            RawLex::Colon => TokenKind::Colon,
            RawLex::Comma => TokenKind::Comma,
            RawLex::Semi => TokenKind::Semi,
            RawLex::Dot => TokenKind::Dot,
            RawLex::Nonterminal => TokenKind::Nonterminal,
            RawLex::Ident => TokenKind::Ident,
            RawLex::Number => TokenKind::Number,
            RawLex::Str => TokenKind::Str,
            RawLex::Op => TokenKind::Op,
            RawLex::Whitespace => TokenKind::Whitespace,
            RawLex::Comment => TokenKind::Comment,
            RawLex::LineJoin => TokenKind::LineJoin,
        }
    }
}

/// Logos-backed raw token source with line/column tracking.
pub struct Scanner<'src> {
    src: &'src str,
    lexer: logos::Lexer<'src, RawLex>,
    line: u32,
    column: u32,
    offset: usize,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Scanner {
            src: source,
            lexer: RawLex::lexer(source),
            line: 1,
            column: 0,
            offset: 0,
        }
    }

    fn advance_position(&mut self, text: &str) {
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    self.line += 1;
                    self.column = 0;
                }
                '\n' | '\u{000C}' => {
                    self.line += 1;
                    self.column = 0;
                }
                _ => self.column += 1,
            }
        }
    }

    fn eof_token(&self) -> Token {
        Token::new(
            TokenKind::Eof,
            "",
            self.line,
            self.column,
            self.src.len()..self.src.len(),
        )
    }
}

impl RawTokenSource for Scanner<'_> {
    fn next_raw(&mut self) -> Token {
        loop {
            let Some(result) = self.lexer.next() else {
                return self.eof_token();
            };
            let span = self.lexer.span();
            let slice = self.lexer.slice();
            let (line, column) = (self.line, self.column);

            let kind = match result {
                Ok(raw) => TokenKind::from(raw),
                Err(()) => TokenKind::Error,
            };

            self.offset = span.end;
            self.advance_position(slice);

            match kind {
                // Leading whitespace acts as the document's first line break,
                // carrying the opening indentation run.
                TokenKind::Whitespace if span.start == 0 => {
                    return Token::new(TokenKind::Newline, slice, line, column, span);
                }
                TokenKind::Whitespace | TokenKind::Comment | TokenKind::LineJoin => continue,
                _ => return Token::new(kind, slice, line, column, span),
            }
        }
    }

    fn peek_char(&self, k: usize) -> Option<char> {
        self.src[self.offset..].chars().nth(k)
    }

    fn at_start_of_input(&self) -> bool {
        self.offset == 0
    }

    fn line(&self) -> u32 {
        self.line
    }

    fn column(&self) -> u32 {
        self.column
    }

    fn offset(&self) -> usize {
        self.offset
    }
}
