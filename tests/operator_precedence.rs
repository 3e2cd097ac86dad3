//! Table-driven coverage of spec §4.4.5's nineteen-level precedence table:
//! for each `(op_lo, op_hi)` pair, the root of `a op_lo b op_hi c` must be
//! `op_lo`, since looser-binding groups are structured last and therefore
//! end up closer to the root.

use rlang_cst::token::TokenKind;
use rlang_cst::Script;
use test_case::test_case;

fn root_lexeme(src: &str) -> String {
    let script = Script::parse(src).unwrap();
    let root = script.roots().next().unwrap();
    script.arena().lexeme(root).to_string()
}

#[test_case("*", "^", "a * b ^ c" ; "star_caret")]
#[test_case("+", "*", "a + b * c" ; "plus_star")]
#[test_case("+", ":", "a : b + c" ; "plus_colon")]
#[test_case("<", "+", "a < b + c" ; "lt_plus")]
#[test_case("&", "<", "a & b < c" ; "and_lt")]
#[test_case("|", "&", "a | b & c" ; "or_and")]
#[test_case("=", "<-", "a = b <- c" ; "eq_arrow")]
fn looser_group_is_the_root(op_lo: &str, _op_hi: &str, src: &str) {
    let src = format!("{src}\n");
    assert_eq!(root_lexeme(&src), op_lo);
}

#[test]
fn caret_is_right_associative() {
    let script = Script::parse("a ^ b ^ c\n").unwrap();
    let root = script.roots().next().unwrap();
    let arena = script.arena();
    assert_eq!(arena.lexeme(root), "^");
    // Right-associative: root's right child is itself `b ^ c`, not
    // `(a ^ b)` on the left.
    let children: Vec<_> = arena
        .children(root)
        .iter()
        .copied()
        .filter(|&c| !arena.is_presentation(c))
        .collect();
    let right = *children.last().unwrap();
    assert_eq!(arena.kind(right), TokenKind::OperatorBinary);
    assert_eq!(arena.lexeme(right), "^");
}

#[test]
fn plus_is_left_associative() {
    let script = Script::parse("a + b + c\n").unwrap();
    let root = script.roots().next().unwrap();
    let arena = script.arena();
    assert_eq!(arena.lexeme(root), "+");
    let children: Vec<_> = arena
        .children(root)
        .iter()
        .copied()
        .filter(|&c| !arena.is_presentation(c))
        .collect();
    let left = children[0];
    assert_eq!(arena.kind(left), TokenKind::OperatorBinary);
    assert_eq!(arena.lexeme(left), "+");
}

#[test]
fn left_arrow_assignment_is_right_associative() {
    let script = Script::parse("a <- b <- c\n").unwrap();
    let root = script.roots().next().unwrap();
    let arena = script.arena();
    assert_eq!(arena.lexeme(root), "<-");
    let children: Vec<_> = arena
        .children(root)
        .iter()
        .copied()
        .filter(|&c| !arena.is_presentation(c))
        .collect();
    let right = *children.last().unwrap();
    assert_eq!(arena.kind(right), TokenKind::OperatorBinary);
    assert_eq!(arena.lexeme(right), "<-");
}

#[test]
fn bracket_chaining_nests_left_to_right() {
    let script = Script::parse("a[1][2]\n").unwrap();
    let root = script.roots().next().unwrap();
    let arena = script.arena();
    assert_eq!(arena.kind(root), TokenKind::OperatorBracket);
    assert_eq!(arena.lexeme(root), "[");
}
