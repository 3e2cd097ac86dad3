//! Pass 3 (spec §4.4.3): every `Separator` absorbs the run of tokens that
//! follows it, up to the next separator sibling or the final sibling (the
//! enclosing close bracket, which a separator never absorbs).

use crate::token::{Arena, TokenId, TokenKind};

pub fn group(arena: &mut Arena, tokens: Vec<TokenId>) -> Vec<TokenId> {
    let mut out = Vec::with_capacity(tokens.len());
    let len = tokens.len();
    let mut i = 0usize;
    while i < len {
        let id = tokens[i];
        if arena.kind(id) == TokenKind::Separator {
            let mut j = i + 1;
            while j < len && j != len - 1 && arena.kind(tokens[j]) != TokenKind::Separator {
                j += 1;
            }
            let absorbed = tokens[i + 1..j].to_vec();
            let mut children = arena.children(id).to_vec();
            children.extend(absorbed);
            arena.set_children(id, children);
            out.push(id);
            i = j;
        } else {
            out.push(id);
            i += 1;
        }
    }
    out
}
