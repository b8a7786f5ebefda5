//! Lexer
//!
//! This module orchestrates the complete tokenization pipeline for the braid
//! format.
//!
//! The pipeline consists of:
//! 1. Raw scanning using the logos lexer ./lexing/scanner.rs
//! 2. Trivia filtering (inline whitespace, comments, line joins) done by the
//!    scanner before tokens reach the next stage
//! 3. Layout post-processing (Newline suppression, Indent/Dedent synthesis)
//!    ./lexing/postprocessor.rs
//!
//! Indentation Handling
//!
//!     Braid's grammar notation is not layout-sensitive: line breaks are
//!     ordinary `Newline` tokens and leading whitespace means nothing. Inside
//!     an embedded code region (`%{ ... %}`) indentation defines block
//!     structure, which regular parsers cannot see from a flat character
//!     stream. The post-processor therefore tracks logical lines and turns
//!     indentation changes into semantic `Indent` and `Dedent` tokens, which
//!     map nicely to brace tokens for more standard syntaxes.
//!
//!     The rationale for doing this in a separate stage, pull-based:
//!     - The logos scanner stays a vanilla pattern table with no custom code.
//!     - All layout state (indent stack, bracket depth, embedded-region
//!       counter, pending queue) lives in one place, behind one seam, so the
//!       scanning technique underneath is an implementation detail.
//!     - The parser pulls one token at a time; a single newline match may
//!       expand into several queued tokens (or none at all, for blank lines
//!       and bracketed continuations), and the queue is drained before the
//!       scanner is consulted again.

pub mod layout;
pub mod postprocessor;
pub mod scanner;
pub mod testing;
pub mod tokens;

pub use layout::{indentation_width, LayoutState};
pub use postprocessor::PostProcessor;
pub use scanner::{RawTokenSource, Scanner};
pub use tokens::{Token, TokenKind};

use std::fmt;

/// Errors that can occur during lexing.
///
/// These are fatal: once the layout state is broken the downstream token
/// stream cannot be trusted, so no repair is attempted. Malformed input at
/// the character level is not an error at this layer; the scanner forwards
/// it as [`TokenKind::Error`] tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A closing `)`, `]` or `}` appeared with no matching opener.
    UnbalancedCloser { line: u32, column: u32 },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnbalancedCloser { line, column } => write!(
                f,
                "unbalanced closing delimiter at line {}, column {}",
                line, column
            ),
        }
    }
}

impl std::error::Error for LexError {}

/// The braid lexer: a logos scanner feeding the layout post-processor.
///
/// One `Lexer` instance owns one tokenization run. Running two inputs
/// concurrently requires two instances; reusing one instance for new input
/// goes through [`Lexer::reset`], which restores all layout state to its
/// empty defaults.
pub struct Lexer<'src> {
    inner: PostProcessor<Scanner<'src>>,
}

impl<'src> Lexer<'src> {
    /// Create a lexer over the given source with fresh layout state.
    pub fn new(source: &'src str) -> Self {
        Lexer {
            inner: PostProcessor::new(Scanner::new(source)),
        }
    }

    /// Reuse this instance for new input, discarding all state from the
    /// previous run.
    pub fn reset(&mut self, source: &'src str) {
        self.inner.reset(Scanner::new(source));
    }

    /// Produce the next post-processed token.
    ///
    /// The stream ends with a single `Eof` token; calling again after that
    /// keeps returning `Eof`.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.inner.next_token()
    }

    /// Access the post-processor, e.g. to drive the mode signals directly.
    pub fn post_processor(&mut self) -> &mut PostProcessor<Scanner<'src>> {
        &mut self.inner
    }
}

/// Tokenize braid source into the final flat token stream.
///
/// Returns every token up to and including the single trailing `Eof`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }

    Ok(tokens)
}
