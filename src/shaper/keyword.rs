//! Pass 6 (spec §4.4.6): bind each control-flow keyword to its condition
//! and body siblings, chaining through `else`.
//!
//! [`bind_maybe`] is also called directly by
//! [`crate::shaper::operator_precedence`], which must absorb a keyword's
//! whole construct (not just the bare keyword token) when it appears as
//! the right-hand operand of a binary operator.

use crate::token::{Arena, TokenId, TokenKind};

const TWO_PART: &[&str] = &["if", "for", "while", "function"];
const ONE_PART: &[&str] = &["repeat", "else"];

fn is_construct_keyword(arena: &Arena, id: TokenId) -> bool {
    arena.kind(id) == TokenKind::KeyWord
        && (TWO_PART.contains(&arena.lexeme(id)) || ONE_PART.contains(&arena.lexeme(id)))
}

/// If `list[idx]` starts a keyword construct, bind it (recursively
/// chaining through `else`) and report how many list items it consumed.
/// Otherwise returns the bare token, consuming one item.
pub fn bind_maybe(arena: &mut Arena, list: &[TokenId], idx: usize) -> (TokenId, usize) {
    let id = list[idx];
    if is_construct_keyword(arena, id) {
        bind_one(arena, list, idx)
    } else {
        (id, 1)
    }
}

fn bind_one(arena: &mut Arena, list: &[TokenId], start: usize) -> (TokenId, usize) {
    let kw_id = list[start];
    let text = arena.lexeme(kw_id).to_string();
    let two_part = TWO_PART.contains(&text.as_str());
    let mut idx = start + 1;
    let mut consumed = 1;

    if two_part {
        if idx < list.len() {
            let cond = list[idx];
            arena.push_child(kw_id, cond);
            idx += 1;
            consumed += 1;
        }
        if idx < list.len() {
            let (body, body_consumed) = bind_maybe(arena, list, idx);
            arena.push_child(kw_id, body);
            idx += body_consumed;
            consumed += body_consumed;
        }
    } else if idx < list.len() {
        let (body, body_consumed) = bind_maybe(arena, list, idx);
        arena.push_child(kw_id, body);
        idx += body_consumed;
        consumed += body_consumed;
    }

    arena.resort_children(kw_id);

    if idx < list.len() && arena.kind(list[idx]) == TokenKind::KeyWord && arena.lexeme(list[idx]) == "else" {
        let (else_id, else_consumed) = bind_one(arena, list, idx);
        arena.push_child(kw_id, else_id);
        arena.resort_children(kw_id);
        idx += else_consumed;
        consumed += else_consumed;
    }

    (kw_id, consumed)
}

pub fn statement_binding(arena: &mut Arena, tokens: Vec<TokenId>) -> Vec<TokenId> {
    let mut out = Vec::new();
    let mut i = 0usize;
    while i < tokens.len() {
        if is_construct_keyword(arena, tokens[i]) {
            let (bound, consumed) = bind_one(arena, &tokens, i);
            out.push(bound);
            i += consumed;
        } else {
            out.push(tokens[i]);
            i += 1;
        }
    }
    out
}
