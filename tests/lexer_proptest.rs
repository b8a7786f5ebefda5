//! Property-based tests for the braid lexer
//!
//! These properties hold for every input the generators can produce:
//! indentation structure is always balanced, the stream always terminates
//! in a single `Eof`, and the transformation is deterministic.

use proptest::prelude::*;

use braid::lexing::testing::count_kind;
use braid::lexing::{indentation_width, tokenize, TokenKind};

/// Build an embedded-code region from (indent level, identifier) lines,
/// using a 4-space unit.
fn embedded_block(lines: &[(usize, String)]) -> String {
    let mut source = String::from("%{\n");
    for (level, name) in lines {
        for _ in 0..*level {
            source.push_str("    ");
        }
        source.push_str(name);
        source.push('\n');
    }
    source.push_str("%}\n");
    source
}

fn block_lines() -> impl Strategy<Value = Vec<(usize, String)>> {
    prop::collection::vec((0usize..4, "[a-z]{1,8}"), 1..12)
}

proptest! {
    #[test]
    fn indents_and_dedents_balance(lines in block_lines()) {
        let source = embedded_block(&lines);
        let tokens = tokenize(&source).unwrap();
        prop_assert_eq!(
            count_kind(&tokens, TokenKind::Indent),
            count_kind(&tokens, TokenKind::Dedent)
        );
    }

    #[test]
    fn exactly_one_eof_terminates_the_stream(lines in block_lines()) {
        let source = embedded_block(&lines);
        let tokens = tokenize(&source).unwrap();
        prop_assert_eq!(count_kind(&tokens, TokenKind::Eof), 1);
        prop_assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn truncated_region_still_balances_at_eof(lines in block_lines()) {
        // Same content but no close marker: the EOF flush closes the blocks.
        let mut source = embedded_block(&lines);
        source.truncate(source.len() - "%}\n".len());
        let tokens = tokenize(&source).unwrap();
        prop_assert_eq!(
            count_kind(&tokens, TokenKind::Indent),
            count_kind(&tokens, TokenKind::Dedent)
        );
        prop_assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn retokenizing_is_deterministic(lines in block_lines()) {
        let source = embedded_block(&lines);
        prop_assert_eq!(tokenize(&source).unwrap(), tokenize(&source).unwrap());
    }

    #[test]
    fn grammar_notation_never_synthesizes_layout(
        rules in prop::collection::vec(("[a-z]{1,6}", "[a-z]{1,6}"), 1..8)
    ) {
        let mut source = String::new();
        for (lhs, rhs) in &rules {
            source.push_str(&format!("<{}> ::= {}\n", lhs, rhs));
        }
        let tokens = tokenize(&source).unwrap();
        prop_assert_eq!(count_kind(&tokens, TokenKind::Indent), 0);
        prop_assert_eq!(count_kind(&tokens, TokenKind::Dedent), 0);
        prop_assert_eq!(count_kind(&tokens, TokenKind::Newline), rules.len());
    }

    #[test]
    fn width_of_space_is_one_more(run in "[ \t]{0,16}") {
        let mut extended = run.clone();
        extended.push(' ');
        prop_assert_eq!(indentation_width(&extended), indentation_width(&run) + 1);
    }

    #[test]
    fn width_after_tab_is_next_tab_stop(run in "[ \t]{0,16}") {
        let mut extended = run.clone();
        extended.push('\t');
        let width = indentation_width(&extended);
        prop_assert_eq!(width % 8, 0);
        prop_assert!(width > indentation_width(&run));
        prop_assert!(width - indentation_width(&run) <= 8);
    }
}
