//! Shared recursion helper used by most shaper passes.
//!
//! Spec §4.4: "every pass recurses into already-formed subtrees". A pass's
//! actual restructuring logic only ever looks at one flat sibling list at a
//! time; this walks that same transform into every already-built child
//! list afterward.

use crate::token::{Arena, TokenId};

pub fn recurse_into_children<F>(arena: &mut Arena, list: Vec<TokenId>, transform: &F) -> Vec<TokenId>
where
    F: Fn(&mut Arena, Vec<TokenId>) -> Vec<TokenId>,
{
    let list = transform(arena, list);
    for &id in &list {
        let children = arena.children(id).to_vec();
        if !children.is_empty() {
            let new_children = recurse_into_children(arena, children, transform);
            arena.set_children(id, new_children);
        }
    }
    list
}

/// Walk every token reachable from `roots`, calling `visit` on each.
pub fn walk_all<F>(arena: &mut Arena, roots: &[TokenId], visit: &mut F)
where
    F: FnMut(&mut Arena, TokenId),
{
    for &id in roots {
        visit(arena, id);
        let children = arena.children(id).to_vec();
        walk_all(arena, &children, visit);
    }
}
