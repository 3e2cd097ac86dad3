//! Pass 1 (spec §4.4.1): fold consecutive whitespace/comment/newline
//! tokens into a single synthetic `Presentation` token and attach it as
//! the leading child of whatever functional token follows.

use crate::token::{Arena, TokenData, TokenId, TokenKind};

pub fn attach(arena: &mut Arena, tokens: Vec<TokenId>) -> Vec<TokenId> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut run: Vec<TokenId> = Vec::new();

    for id in tokens {
        if arena.kind(id).is_presentation() {
            run.push(id);
            continue;
        }
        if !run.is_empty() {
            let presentation = merge(arena, &run);
            arena.insert_child(id, 0, presentation);
            run.clear();
        }
        out.push(id);
    }

    if !run.is_empty() {
        let presentation = merge(arena, &run);
        let pos = arena.script_pos(presentation);
        let empty = arena.alloc(TokenData::new(String::new(), pos, TokenKind::Empty));
        arena.push_child(empty, presentation);
        out.push(empty);
    }

    out
}

fn merge(arena: &mut Arena, run: &[TokenId]) -> TokenId {
    let pos = arena.script_pos(run[0]);
    let mut text = String::new();
    for &id in run {
        text.push_str(arena.lexeme(id));
    }
    arena.alloc(TokenData::new(text, pos, TokenKind::Presentation))
}
