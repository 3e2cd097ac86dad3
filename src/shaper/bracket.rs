//! Pass 2 (spec §4.4.2): nest every open bracket lexeme's following run,
//! up to and including its matching close, as its children.

use crate::lexeme;
use crate::token::{Arena, TokenId};

pub fn nest(arena: &mut Arena, tokens: Vec<TokenId>) -> Vec<TokenId> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0usize;
    while i < tokens.len() {
        let id = tokens[i];
        let text = arena.lexeme(id).to_string();
        if is_opener(&text) {
            let mut depth = 1i32;
            let mut j = i + 1;
            while j < tokens.len() && depth > 0 {
                let t = arena.lexeme(tokens[j]).to_string();
                if is_opener(&t) {
                    depth += 1;
                } else if is_closer(&t) {
                    depth -= 1;
                }
                j += 1;
            }
            let collected = tokens[i + 1..j].to_vec();
            let collected = nest(arena, collected);
            let mut children = arena.children(id).to_vec();
            children.extend(collected);
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

fn is_opener(text: &str) -> bool {
    lexeme::is_open_bracket(text)
}

fn is_closer(text: &str) -> bool {
    matches!(text, ")" | "}" | "]" | "]]")
}
