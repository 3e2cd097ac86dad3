//! Pass 8 (spec §4.4.8): inside a `{` block, a newline separating two
//! inner statements was tokenized as plain `NewLine` (bracket depth was
//! nonzero), not `EndStatement`; this retroactively promotes it once the
//! block's own statement boundaries are known.

use crate::token::{Arena, TokenId, TokenKind};

pub fn promote(arena: &mut Arena, brace_id: TokenId) {
    let children = arena.children(brace_id).to_vec();
    if children.len() < 2 {
        return;
    }
    for i in 1..children.len() {
        let child = children[i];
        let Some(&leading) = arena.children(child).first() else {
            continue;
        };
        if arena.kind(leading) != TokenKind::Presentation {
            continue;
        }
        if !arena.lexeme(leading).contains(['\n', '\r']) {
            continue;
        }
        arena.remove_child(child, leading);
        arena.get_mut(leading).kind = TokenKind::EndStatement;
        let prev = children[i - 1];
        arena.push_child(prev, leading);
        arena.resort_children(prev);
    }
}
