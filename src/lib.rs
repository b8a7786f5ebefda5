//! # braid
//!
//! A lexer for the braid grammar format.
//!
//! Braid is a hybrid notation: a declarative grammar/constraint dialect that
//! is not layout-sensitive, interleaved with embedded code regions
//! (`%{ ... %}`) that are layout-sensitive in the off-side-rule sense.
//! This crate turns braid source into a flat, parser-ready token stream,
//! synthesizing `Indent`/`Dedent`/`Newline` tokens for the embedded regions.
//!
//! See the [lexing] module for the pipeline overview.

pub mod lexing;

pub use lexing::{tokenize, LexError, Lexer, Token, TokenKind};
