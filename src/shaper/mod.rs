//! The tree shaper: eight fixed-order structural passes (spec §4.4) that
//! turn a flat token list into one tree per top-level statement.
//!
//! Grounded on `rhai_rowan::parser::Parser`'s staged approach to building
//! structure out of a flat stream, generalized here into independently
//! testable passes over a `slotmap`-backed [`crate::token::Arena`] instead
//! of a single recursive-descent pass over a `rowan` builder.

mod bracket;
mod brace_block;
mod comma;
mod common;
mod end_statement;
mod function_call;
mod keyword;
mod operator_precedence;
mod presentation;

use crate::error::ParseError;
use crate::token::{Arena, TokenId, TokenKind};

/// Run all eight passes in order, producing one statement-tree root per
/// top-level statement.
pub fn shape(arena: &mut Arena, tokens: Vec<TokenId>) -> Result<Vec<TokenId>, ParseError> {
    let tokens = presentation::attach(arena, tokens);
    let tokens = bracket::nest(arena, tokens);
    let tokens = common::recurse_into_children(arena, tokens, &comma::group);
    let tokens = common::recurse_into_children(arena, tokens, &function_call::bind);
    let tokens = operator_precedence::apply(arena, tokens);
    let tokens = common::recurse_into_children(arena, tokens, &keyword::statement_binding);
    // Not run through `recurse_into_children`: a terminator belongs to the
    // statement root exactly once. Re-applying `attach` one level deeper
    // would re-home it onto whatever's now last in that child list instead,
    // cascading it down through the tree.
    let tokens = end_statement::attach(arena, tokens);

    common::walk_all(arena, &tokens, &mut |arena, id| {
        if arena.kind(id) == TokenKind::Bracket && arena.lexeme(id) == "{" {
            brace_block::promote(arena, id);
        }
    });

    crate::trace!(statements = tokens.len(), "shaped token stream");
    Ok(tokens)
}
