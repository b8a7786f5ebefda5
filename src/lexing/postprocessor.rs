//! Layout post-processing for the braid lexer
//!
//! This is the stateful stage between the raw scanner and the parser. The
//! parser pulls one token at a time via [`PostProcessor::next_token`]; the
//! post-processor pulls raw tokens as needed and, inside embedded code
//! regions, rewrites line breaks into logical-line structure:
//!
//! - a line break followed by content at the same width emits `Newline`,
//! - deeper content emits `Newline` then `Indent` (pushing the new width),
//! - shallower content emits `Newline` then one `Dedent` per closed level,
//! - blank lines, comment-only lines and line breaks inside open brackets
//!   emit nothing at all,
//! - end of input flushes `Newline`, the outstanding `Dedent`s, then `Eof`.
//!
//! Outside embedded regions raw line breaks pass through unchanged and no
//! synthesis happens.
//!
//! The structural lexemes (grouping delimiters, `%{`/`%}`) drive the mode
//! signals. They are plain public methods on the post-processor, invoked
//! here when the corresponding token kinds are pulled; a scanner that does
//! its own rule dispatch can call them directly instead.

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexing::layout::{indentation_width, LayoutState};
use crate::lexing::scanner::RawTokenSource;
use crate::lexing::tokens::{Token, TokenKind};
use crate::lexing::LexError;

/// Strip these to keep only the line-break characters of a newline match.
static NEWLINE_TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\r\n\x0C]+").unwrap());
/// Strip these to keep only the indentation run of a newline match.
static SPACES_TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n\x0C]+").unwrap());

/// The token post-processor: owns the layout state and a raw token source.
pub struct PostProcessor<S: RawTokenSource> {
    source: S,
    state: LayoutState,
}

impl<S: RawTokenSource> PostProcessor<S> {
    pub fn new(source: S) -> Self {
        PostProcessor {
            source,
            state: LayoutState::new(),
        }
    }

    /// Reuse this instance over a new source, discarding all layout state.
    pub fn reset(&mut self, source: S) {
        self.source = source;
        self.state.reset();
    }

    /// Produce exactly one token.
    ///
    /// The output differs from the raw stream only by the synthetic
    /// `Indent`/`Dedent`/`Newline` tokens and by suppressed line breaks;
    /// every other raw token is returned unchanged, `Error` kinds included.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        loop {
            if let Some(token) = self.state.pending.pop_front() {
                return Ok(token);
            }

            let raw = self.source.next_raw();
            match raw.kind {
                TokenKind::Eof if !self.state.indent_stack.is_empty() => {
                    self.flush_at_eof(raw);
                }
                TokenKind::Eof => return Ok(raw),
                TokenKind::Newline => {
                    if let Some(passthrough) = self.on_newline(raw) {
                        return Ok(passthrough);
                    }
                }
                kind if kind.opens_group() => {
                    self.on_open_bracket();
                    return Ok(raw);
                }
                kind if kind.closes_group() => {
                    self.on_close_bracket()?;
                    return Ok(raw);
                }
                TokenKind::CodeStart => {
                    self.on_enter_embedded();
                    return Ok(raw);
                }
                TokenKind::CodeEnd => {
                    // Close any blocks still open, then the marker itself;
                    // the queue hands them out in that order.
                    self.on_exit_embedded();
                    self.state.pending.push_back(raw);
                }
                _ => return Ok(raw),
            }
        }
    }

    /// Handle a raw line-break token.
    ///
    /// Returns the token itself when layout is inactive (pass it through
    /// verbatim); otherwise enqueues zero or more decided tokens and
    /// returns `None`.
    fn on_newline(&mut self, raw: Token) -> Option<Token> {
        if self.state.embedded_depth == 0 {
            return Some(raw);
        }

        let breaks = NEWLINE_TEXT.replace_all(&raw.text, "");
        let spaces = SPACES_TEXT.replace_all(&raw.text, "");

        let next = self.source.peek_char(0);
        let next_next = self.source.peek_char(1);

        // Not a logical-line boundary: a continuation inside brackets, a
        // blank line, or a comment line with more input behind it.
        if self.state.bracket_depth > 0
            || (next_next.is_some() && matches!(next, Some('\r') | Some('\n') | Some('#')))
        {
            return None;
        }

        self.state.pending.push_back(Token::new(
            TokenKind::Newline,
            breaks.as_ref(),
            raw.line,
            raw.column,
            raw.span.start..raw.span.start + breaks.len(),
        ));

        let width = indentation_width(&spaces);
        let previous = self.state.current_indent();
        match width.cmp(&previous) {
            Ordering::Equal => {}
            Ordering::Greater => {
                self.state.push_indent(width);
                self.state.pending.push_back(Token::new(
                    TokenKind::Indent,
                    spaces.as_ref(),
                    self.source.line(),
                    0,
                    raw.span.end - spaces.len()..raw.span.end,
                ));
            }
            Ordering::Less => {
                // Each pop closes one block. A width matching no remaining
                // level is accepted as-is (ragged dedent).
                while self.state.current_indent() > width {
                    self.state.indent_stack.pop();
                    self.state.embedded_depth = self.state.embedded_depth.saturating_sub(1);
                    let dedent = self.dedent_here();
                    self.state.pending.push_back(dedent);
                }
            }
        }

        None
    }

    /// End-of-input flush: close the statement, close every open block,
    /// then put the `Eof` back at the end of the queue.
    fn flush_at_eof(&mut self, eof: Token) {
        self.state.pending.push_back(Token::new(
            TokenKind::Newline,
            "\n",
            eof.line,
            eof.column,
            eof.span.clone(),
        ));
        while self.state.indent_stack.pop().is_some() {
            let dedent = self.dedent_here();
            self.state.pending.push_back(dedent);
        }
        self.state.pending.push_back(eof);
    }

    fn dedent_here(&self) -> Token {
        Token::new(
            TokenKind::Dedent,
            "",
            self.source.line(),
            self.source.column(),
            self.source.offset()..self.source.offset(),
        )
    }

    // Mode signals. `next_token` invokes these when it pulls the structural
    // token kinds; they are public for scanners that dispatch rule actions
    // themselves.

    /// An opening `(`, `[` or `{` was matched.
    pub fn on_open_bracket(&mut self) {
        self.state.bracket_depth += 1;
    }

    /// A closing `)`, `]` or `}` was matched. Going below zero means the
    /// token stream can no longer be trusted, so it is a fatal error.
    pub fn on_close_bracket(&mut self) -> Result<(), LexError> {
        if self.state.bracket_depth == 0 {
            return Err(LexError::UnbalancedCloser {
                line: self.source.line(),
                column: self.source.column(),
            });
        }
        self.state.bracket_depth -= 1;
        Ok(())
    }

    /// An embedded-code open marker was matched.
    pub fn on_enter_embedded(&mut self) {
        self.state.embedded_depth += 1;
    }

    /// An embedded-code close marker was matched. This always returns to
    /// layout-insensitive mode, however deep the nesting; indentation levels
    /// still open are closed here, one queued `Dedent` per level, so every
    /// `Indent` has a matching `Dedent` no matter how the region ends.
    pub fn on_exit_embedded(&mut self) {
        self.state.embedded_depth = 0;
        while self.state.indent_stack.pop().is_some() {
            let dedent = self.dedent_here();
            self.state.pending.push_back(dedent);
        }
    }

    /// True only while the raw cursor sits at byte offset 0.
    pub fn at_start_of_input(&self) -> bool {
        self.source.at_start_of_input()
    }

    /// Currently open grouping delimiters.
    pub fn bracket_depth(&self) -> u32 {
        self.state.bracket_depth
    }

    /// Embedded-region nesting; zero means layout rules are inactive.
    pub fn embedded_depth(&self) -> u32 {
        self.state.embedded_depth
    }

    /// Widths of the currently open indentation levels, outermost first.
    pub fn indent_levels(&self) -> &[u32] {
        &self.state.indent_stack
    }
}
