//! Pass 5 (spec §4.4.5): the nineteen-level precedence table, processed
//! from tightest- to loosest-binding, each level restructuring every
//! still-unstructured matching operator in its group.

use std::collections::HashSet;

use crate::shaper::keyword;
use crate::token::{Arena, TokenId, TokenKind};

#[derive(Clone, Copy)]
enum Shape {
    Bracket,
    Binary,
    UnaryRight,
    UnaryLeft,
}

struct Group {
    rtl: bool,
    matches: fn(TokenKind, &str) -> Option<Shape>,
}

const GROUPS: &[Group] = &[
    Group { rtl: false, matches: |k, t| bin(k, t, &["::", ":::"]) },
    Group { rtl: false, matches: |k, t| bin(k, t, &["$", "@"]) },
    Group { rtl: false, matches: |k, t| if k == TokenKind::OperatorBracket && matches!(t, "[" | "[[") { Some(Shape::Bracket) } else { None } },
    Group { rtl: true, matches: |k, t| bin(k, t, &["^"]) },
    Group { rtl: false, matches: |k, t| if k == TokenKind::OperatorUnaryRight && matches!(t, "+" | "-") { Some(Shape::UnaryRight) } else { None } },
    Group { rtl: false, matches: |k, t| bin(k, t, &[":"]) },
    Group { rtl: false, matches: |k, t| if k == TokenKind::OperatorBinary && t.starts_with('%') { Some(Shape::Binary) } else { None } },
    Group { rtl: false, matches: |k, t| bin(k, t, &["|>"]) },
    Group { rtl: false, matches: |k, t| bin(k, t, &["*", "/"]) },
    Group { rtl: false, matches: |k, t| if k == TokenKind::OperatorBinary && matches!(t, "+" | "-") { Some(Shape::Binary) } else { None } },
    Group { rtl: false, matches: |k, t| bin(k, t, &["<", ">", "<>", "<=", ">=", "==", "!="]) },
    Group { rtl: false, matches: |k, t| if k == TokenKind::OperatorUnaryRight && matches!(t, "!" | "!!" | "!!!") { Some(Shape::UnaryRight) } else { None } },
    Group { rtl: false, matches: |k, t| bin(k, t, &["&", "&&"]) },
    Group { rtl: false, matches: |k, t| bin(k, t, &["|", "||"]) },
    Group { rtl: false, matches: tilde },
    Group { rtl: true, matches: |k, t| bin(k, t, &["->", "->>"]) },
    Group { rtl: true, matches: |k, t| bin(k, t, &["<-", "<<-", ":="]) },
    Group { rtl: true, matches: |k, t| bin(k, t, &["="]) },
    Group { rtl: false, matches: |k, t| if k == TokenKind::OperatorUnaryRight && matches!(t, "?" | "??") { Some(Shape::UnaryRight) } else { None } },
];

fn bin(kind: TokenKind, text: &str, set: &[&str]) -> Option<Shape> {
    if kind == TokenKind::OperatorBinary && set.contains(&text) {
        Some(Shape::Binary)
    } else {
        None
    }
}

fn tilde(kind: TokenKind, text: &str) -> Option<Shape> {
    if text != "~" {
        return None;
    }
    match kind {
        TokenKind::OperatorUnaryLeft => Some(Shape::UnaryLeft),
        TokenKind::OperatorUnaryRight => Some(Shape::UnaryRight),
        TokenKind::OperatorBinary => Some(Shape::Binary),
        _ => None,
    }
}

pub fn apply(arena: &mut Arena, tokens: Vec<TokenId>) -> Vec<TokenId> {
    let mut list = tokens;
    for group in GROUPS {
        list = crate::shaper::common::recurse_into_children(arena, list, &|arena, list| {
            process_group(arena, list, group)
        });
    }
    list
}

fn process_group(arena: &mut Arena, mut list: Vec<TokenId>, group: &Group) -> Vec<TokenId> {
    let mut structured: HashSet<TokenId> = HashSet::new();
    let mut i: isize = if group.rtl {
        list.len() as isize - 1
    } else {
        0
    };

    while i >= 0 && (i as usize) < list.len() {
        i = step(arena, &mut list, i as usize, group, &mut structured);
    }

    list
}

/// Try to structure `list[idx]`. Returns the index to resume scanning from
/// next, moving in the group's scan direction; `-1` or past-the-end stops
/// the scan.
fn step(
    arena: &mut Arena,
    list: &mut Vec<TokenId>,
    idx: usize,
    group: &Group,
    structured: &mut HashSet<TokenId>,
) -> isize {
    let no_match = if group.rtl { idx as isize - 1 } else { idx as isize + 1 };

    let id = list[idx];
    if structured.contains(&id) {
        return no_match;
    }
    let kind = arena.kind(id);
    let text = arena.lexeme(id).to_string();
    let Some(shape) = (group.matches)(kind, &text) else {
        return no_match;
    };

    match shape {
        Shape::Binary => {
            if idx == 0 || idx + 1 >= list.len() {
                return no_match;
            }
            let left = list[idx - 1];
            let (right, right_consumed) = keyword::bind_maybe(arena, list, idx + 1);
            arena.push_child(id, left);
            arena.push_child(id, right);
            arena.resort_children(id);
            structured.insert(id);
            let remove_to = idx + right_consumed;
            list.splice(idx - 1..=remove_to, [id]);
            // `id` now sits at `idx - 1`.
            if group.rtl {
                idx as isize - 2
            } else {
                idx as isize
            }
        }
        Shape::UnaryRight => {
            if idx + 1 >= list.len() {
                return no_match;
            }
            let (right, right_consumed) = keyword::bind_maybe(arena, list, idx + 1);
            arena.push_child(id, right);
            arena.resort_children(id);
            structured.insert(id);
            let remove_to = idx + right_consumed;
            list.splice(idx..=remove_to, [id]);
            // `id` stays at `idx`.
            if group.rtl {
                idx as isize - 1
            } else {
                idx as isize + 1
            }
        }
        Shape::UnaryLeft => {
            if idx == 0 {
                return no_match;
            }
            let left = list[idx - 1];
            arena.push_child(id, left);
            arena.resort_children(id);
            structured.insert(id);
            list.splice(idx - 1..=idx, [id]);
            if group.rtl {
                idx as isize - 2
            } else {
                idx as isize
            }
        }
        Shape::Bracket => {
            if idx == 0 {
                return no_match;
            }
            let left = list[idx - 1];
            prepend_operand(arena, id, left);
            structured.insert(id);
            list.splice(idx - 1..=idx, [id]);
            if group.rtl {
                idx as isize - 2
            } else {
                idx as isize
            }
        }
    }
}

/// Make `operand` the first non-presentation child of `bracket_id`,
/// keeping any existing leading `Presentation` child first.
fn prepend_operand(arena: &mut Arena, bracket_id: TokenId, operand: TokenId) {
    let mut children = arena.children(bracket_id).to_vec();
    let insert_at = if children
        .first()
        .is_some_and(|&c| arena.kind(c) == TokenKind::Presentation)
    {
        1
    } else {
        0
    };
    children.insert(insert_at, operand);
    arena.set_children(bracket_id, children);
}
