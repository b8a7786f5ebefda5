//! Layout state for the braid lexer
//!
//! One [`LayoutState`] is owned by one tokenization run. It is mutated only
//! by the post-processor's newline handler and mode signals, and holds:
//!
//! - the indent stack (strictly increasing widths of the open blocks),
//! - the bracket-nesting counter (open `(`/`[`/`{` suspend layout),
//! - the embedded-region counter (zero means layout rules are inactive),
//! - the pending queue of already-decided tokens, drained before the raw
//!   source is consulted again.

use std::collections::VecDeque;

use crate::lexing::tokens::Token;

#[derive(Debug, Default)]
pub struct LayoutState {
    pub(crate) indent_stack: Vec<u32>,
    pub(crate) bracket_depth: u32,
    pub(crate) embedded_depth: u32,
    pub(crate) pending: VecDeque<Token>,
}

impl LayoutState {
    pub fn new() -> Self {
        LayoutState::default()
    }

    /// Restore every field to its empty/zero default, for instance reuse.
    pub fn reset(&mut self) {
        self.indent_stack.clear();
        self.bracket_depth = 0;
        self.embedded_depth = 0;
        self.pending.clear();
    }

    /// Width of the innermost open block, or 0 at base level.
    pub fn current_indent(&self) -> u32 {
        self.indent_stack.last().copied().unwrap_or(0)
    }

    /// Push a deeper indentation level. The stack stays strictly increasing.
    pub(crate) fn push_indent(&mut self, width: u32) {
        debug_assert!(width > self.current_indent());
        self.indent_stack.push(width);
    }
}

/// Compute the indentation width of a whitespace run.
///
/// Spaces count 1; a tab advances the running width to the next multiple
/// of 8.
pub fn indentation_width(whitespace: &str) -> u32 {
    let mut width = 0;
    for c in whitespace.chars() {
        if c == '\t' {
            width += 8 - width % 8;
        } else {
            width += 1;
        }
    }
    width
}
