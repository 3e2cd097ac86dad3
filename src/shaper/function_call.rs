//! Pass 4 (spec §4.4.4): a `FunctionName` token adopts its following `(`
//! sibling as its single functional child.
//!
//! Well-formed R guarantees a `FunctionName` is always followed by `(`
//! (the tokenizer only assigns that kind when it already saw one); a
//! `FunctionName` with nothing to adopt is left untouched rather than
//! raised, consistent with the shaper's optimistic-over-valid-input design
//! (spec §1 Non-goals).

use crate::token::{Arena, TokenId, TokenKind};

pub fn bind(arena: &mut Arena, tokens: Vec<TokenId>) -> Vec<TokenId> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0usize;
    while i < tokens.len() {
        let id = tokens[i];
        if arena.kind(id) == TokenKind::FunctionName && i + 1 < tokens.len() {
            let paren = tokens[i + 1];
            arena.push_child(id, paren);
            out.push(id);
            i += 2;
        } else {
            out.push(id);
            i += 1;
        }
    }
    out
}
