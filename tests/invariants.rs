//! Universal invariants and shaper laws from spec §8, exercised across the
//! whole pipeline rather than any one module.

use rlang_cst::token::TokenKind;
use rlang_cst::Script;

fn concat_text(script: &Script) -> String {
    script
        .roots()
        .map(|id| script.arena().text_of(id))
        .collect()
}

fn concat_text_no_formatting(script: &mut Script) -> String {
    let starts: Vec<usize> = script.roots().map(|id| script.arena().start_of(id)).collect();
    starts
        .into_iter()
        .map(|pos| script.view_mut(pos).unwrap().text_no_formatting())
        .collect::<Vec<_>>()
        .join(";")
}

#[test]
fn lossless_round_trip_across_multiple_statements() {
    let src = "x <- 1\ny <- f(x, 2)\n# trailing comment\nz = x + y\n";
    let script = Script::parse(src).unwrap();
    assert_eq!(concat_text(&script), src);
}

#[test]
fn no_formatting_strips_comments_and_spacing() {
    let src = "a = 1 # one\nb = 2\n";
    let mut script = Script::parse(src).unwrap();
    let canonical = concat_text_no_formatting(&mut script);
    assert_eq!(canonical, "a=1;b=2");
}

#[test]
fn statement_start_offsets_strictly_increase() {
    let script = Script::parse("a\nb\nc\n").unwrap();
    let starts: Vec<usize> = script.roots().map(|id| script.arena().start_of(id)).collect();
    assert!(starts.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn edit_delta_propagates_to_later_statement_offsets() {
    let mut script = Script::parse("f(1)\ny <- 2\n").unwrap();
    let first_start = script.roots().next().unwrap();
    let first_start = script.arena().start_of(first_start);
    let second_start_before = script.roots().nth(1).unwrap();
    let second_start_before = script.arena().start_of(second_start_before);

    let delta = {
        let mut view = script.view_mut(first_start).unwrap();
        view.add_function_parameter("f", None, "2", 1, false).unwrap()
    };
    script.propagate_shift(first_start, delta);

    let second_start_after = script.roots().nth(1).unwrap();
    let second_start_after = script.arena().start_of(second_start_after);
    assert_eq!(second_start_after as isize, second_start_before as isize + delta);
}

#[test]
fn precedence_root_is_the_loosest_operator() {
    // `+` binds looser than `*`, so the statement roots at `+`.
    let script = Script::parse("a * b + c\n").unwrap();
    let root = script.roots().next().unwrap();
    assert_eq!(script.arena().kind(root), TokenKind::OperatorBinary);
    assert_eq!(script.arena().lexeme(root), "+");
}

#[test]
fn unary_minus_roots_at_unary_right() {
    let script = Script::parse("-a\n").unwrap();
    let root = script.roots().next().unwrap();
    assert_eq!(script.arena().kind(root), TokenKind::OperatorUnaryRight);
}

#[test]
fn binary_minus_roots_at_binary() {
    let script = Script::parse("a - b\n").unwrap();
    let root = script.roots().next().unwrap();
    assert_eq!(script.arena().kind(root), TokenKind::OperatorBinary);
}

#[test]
fn newline_before_unary_minus_splits_statements() {
    let script = Script::parse("a\n-b\n").unwrap();
    assert_eq!(script.statement_count(), 2);
}

#[test]
fn terminator_stays_a_direct_child_of_the_statement_root() {
    // Regression: `end_statement::attach` must not cascade the trailing
    // `EndStatement` down into the tree on repeated application; it has
    // to land as a direct child of whichever token is this statement's
    // root, here `<-`.
    let script = Script::parse("x <- 1 + 2\n").unwrap();
    let root = script.roots().next().unwrap();
    let arena = script.arena();
    assert_eq!(arena.lexeme(root), "<-");
    assert!(arena
        .children(root)
        .iter()
        .any(|&c| arena.kind(c) == TokenKind::EndStatement));
    assert_eq!(concat_text(&script), "x <- 1 + 2\n");
}

#[test]
fn function_name_requires_open_paren_on_the_same_line() {
    let script = Script::parse("f(x)\n").unwrap();
    let root = script.roots().next().unwrap();
    assert_eq!(script.arena().kind(root), TokenKind::FunctionName);

    let script = Script::parse("f\n(x)\n").unwrap();
    assert_eq!(script.statement_count(), 2);
    let first = script.roots().next().unwrap();
    assert_eq!(script.arena().kind(first), TokenKind::SyntacticName);
}
