//! Pass 7 (spec §4.4.7): every `EndStatement` token becomes the last child
//! of the sibling before it, turning the remaining flat list into one
//! tree per statement.

use crate::token::{Arena, TokenId, TokenKind};

pub fn attach(arena: &mut Arena, tokens: Vec<TokenId>) -> Vec<TokenId> {
    let mut out: Vec<TokenId> = Vec::with_capacity(tokens.len());
    for id in tokens {
        if arena.kind(id) == TokenKind::EndStatement {
            if let Some(&prev) = out.last() {
                arena.push_child(prev, id);
                arena.resort_children(prev);
                continue;
            }
        }
        out.push(id);
    }
    out
}
