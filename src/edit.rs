//! The five structural edit primitives (spec §4.6), implemented as methods
//! on [`StatementView`].
//!
//! Four of the five re-parse a synthetic fragment and splice it in via
//! [`Arena::import_subtree`] (the same "parse-and-splice" idiom
//! `rhai_rowan` leans on for incremental edits over a `rowan` tree, adapted
//! here to our arena-of-handles). `remove_function_parameter` is the
//! exception: it mutates the existing tree directly, since the removed
//! span needs no re-interpretation, then calls [`Arena::renumber`] so later
//! position arithmetic on the same statement stays accurate.

use crate::error::EditError;
use crate::script::parse_pipeline;
use crate::statement::StatementView;
use crate::token::{Arena, TokenId, TokenKind};

impl<'a> StatementView<'a> {
    /// Update the value of the `param_index`-th argument of the
    /// `occurrence`-th call to `fn_name`. Returns `0` and leaves the tree
    /// unchanged if no such call exists (spec §7: update edits are
    /// tolerant of a missing target).
    pub fn update_function_argument_value(
        &mut self,
        fn_name: &str,
        param_index: usize,
        new_value: &str,
        quoted: bool,
    ) -> Result<isize, EditError> {
        self.update_function_argument_value_nth(fn_name, param_index, new_value, quoted, 0)
    }

    pub fn update_function_argument_value_nth(
        &mut self,
        fn_name: &str,
        param_index: usize,
        new_value: &str,
        quoted: bool,
        occurrence: usize,
    ) -> Result<isize, EditError> {
        let Some(fn_id) = find_function_name(self.arena, self.root, fn_name, occurrence) else {
            return Ok(0);
        };
        let Some(paren) = paren_of(self.arena, fn_id) else {
            return Ok(0);
        };
        let Some(slot_root) = nth_argument_slot_root(self.arena, paren, param_index) else {
            return Ok(0);
        };
        let target = value_target_of_slot(self.arena, slot_root);

        let replacement = if quoted {
            format!("\"{new_value}\"")
        } else {
            new_value.to_string()
        };
        let old_len = self.arena.lexeme(target).len();
        self.arena.get_mut(target).lexeme = replacement.clone();
        let delta = replacement.len() as isize - old_len as isize;
        let shift_from = self.arena.script_pos(target) + old_len;
        self.arena.shift_positions(self.root, delta, shift_from);
        Ok(delta)
    }

    /// Replace the `operand_index`-th operand of the `op_name` operator.
    /// Operand `0` is the first non-presentation child of the first match;
    /// operand `k >= 1` is the right-hand child of the `k`-th match (the
    /// last match if `k` exceeds the match count).
    pub fn update_operator_operand(
        &mut self,
        op_name: &str,
        operand_index: usize,
        new_script: &str,
    ) -> Result<isize, EditError> {
        let matches = find_operators(self.arena, self.root, op_name);
        if matches.is_empty() {
            return Err(EditError::EditTargetNotFound(format!(
                "operator `{op_name}`"
            )));
        }

        let target = if operand_index == 0 {
            first_non_presentation_child(self.arena, matches[0]).ok_or_else(|| {
                EditError::EditPreconditionViolated(format!("operator `{op_name}` has no operand"))
            })?
        } else {
            let occurrence = matches[(operand_index - 1).min(matches.len() - 1)];
            let operands = operand_children(self.arena, occurrence);
            if operands.len() < 2 {
                return Err(EditError::EditPreconditionViolated(format!(
                    "operator `{op_name}` is not binary at this occurrence"
                )));
            }
            *operands.last().unwrap()
        };

        let start = value_start(self.arena, target);
        let end = self.arena.end_of(target);
        self.reparse_and_install(start, end, new_script)
    }

    /// Add a new parameter to the `occurrence`-th call of `fn_name` at
    /// `insert_index` among its existing parameters.
    pub fn add_function_parameter(
        &mut self,
        fn_name: &str,
        param_name: Option<&str>,
        param_value: &str,
        insert_index: usize,
        quoted: bool,
    ) -> Result<isize, EditError> {
        self.add_function_parameter_nth(fn_name, param_name, param_value, insert_index, quoted, 0)
    }

    pub fn add_function_parameter_nth(
        &mut self,
        fn_name: &str,
        param_name: Option<&str>,
        param_value: &str,
        insert_index: usize,
        quoted: bool,
        occurrence: usize,
    ) -> Result<isize, EditError> {
        let Some(fn_id) = find_function_name(self.arena, self.root, fn_name, occurrence) else {
            return Err(EditError::EditTargetNotFound(format!(
                "call to `{fn_name}`"
            )));
        };
        let Some(paren) = paren_of(self.arena, fn_id) else {
            return Err(EditError::EditPreconditionViolated(format!(
                "`{fn_name}` has no argument list"
            )));
        };

        let value = if quoted {
            format!("\"{param_value}\"")
        } else {
            param_value.to_string()
        };
        let piece = match param_name {
            Some(name) => format!("{name}={value}"),
            None => value,
        };

        let slots = argument_slot_roots(self.arena, paren);

        let (pos, text) = if slots.is_empty() {
            // `paren` is the `(` token itself here; the insertion point is
            // right after its own single-character lexeme.
            let at = self.arena.script_pos(paren) + self.arena.lexeme(paren).len();
            (at, piece)
        } else if insert_index == 0 {
            (value_start(self.arena, slots[0]), format!("{piece}, "))
        } else {
            let prev = slots[insert_index.min(slots.len()) - 1];
            (self.arena.end_of(prev), format!(", {piece}"))
        };

        self.reparse_and_install(pos, pos, &text)
    }

    /// Remove the named argument `param_name` from the `occurrence`-th call
    /// to `fn_name`, in place.
    pub fn remove_function_parameter(&mut self, fn_name: &str, param_name: &str) -> Result<isize, EditError> {
        self.remove_function_parameter_nth(fn_name, param_name, 0)
    }

    pub fn remove_function_parameter_nth(
        &mut self,
        fn_name: &str,
        param_name: &str,
        occurrence: usize,
    ) -> Result<isize, EditError> {
        let Some(fn_id) = find_function_name(self.arena, self.root, fn_name, occurrence) else {
            return Err(EditError::EditTargetNotFound(format!(
                "call to `{fn_name}`"
            )));
        };
        let Some(paren) = paren_of(self.arena, fn_id) else {
            return Err(EditError::EditPreconditionViolated(format!(
                "`{fn_name}` has no argument list"
            )));
        };

        let slots = argument_slot_roots(self.arena, paren);
        let Some(slot_index) = slots.iter().position(|&slot| {
            slot_assignment(self.arena, slot)
                .map(|(left, _)| self.arena.lexeme(left) == param_name)
                .unwrap_or(false)
        }) else {
            return Err(EditError::EditTargetNotFound(format!(
                "parameter `{param_name}` on `{fn_name}`"
            )));
        };

        let before = self.text();
        let mut paren_children = self.arena.children(paren).to_vec();

        if slot_index == 0 {
            let removed = slots[0];
            paren_children.retain(|&c| c != removed);
            if let Some(&next_sep) = slots.get(1) {
                paren_children.retain(|&c| c != next_sep);
                let promoted = non_presentation_children(self.arena, next_sep)
                    .into_iter()
                    .next();
                if let Some(promoted) = promoted {
                    // The comma's own subtree is already gone; the space
                    // between it and this value belongs to the value's own
                    // leftmost descendant, so it survives unless stripped
                    // explicitly (spec §9: removing the first parameter
                    // also drops the new first parameter's leading
                    // whitespace and the comma that used to separate it).
                    strip_leading_presentation(self.arena, promoted);
                    // Child list order doesn't matter: `text_of`/`renumber`
                    // both sort by `script_pos`, not by `children` order.
                    paren_children.push(promoted);
                }
            }
        } else {
            let removed = slots[slot_index];
            paren_children.retain(|&c| c != removed);
        }

        self.arena.set_children(paren, paren_children);

        let base = self.start_pos();
        let mut cursor = base;
        let root = self.root;
        self.arena.renumber(root, &mut cursor);

        let after = self.text();
        Ok(after.len() as isize - before.len() as isize)
    }

    /// Splice a new operand into the `op_name` chain: prepend before the
    /// first occurrence when `operand_index == 0`, otherwise append after
    /// the right edge of the `operand_index`-th occurrence.
    pub fn add_operator_operand(
        &mut self,
        op_name: &str,
        operand_index: usize,
        new_script: &str,
    ) -> Result<isize, EditError> {
        let matches = find_operators(self.arena, self.root, op_name);
        if matches.is_empty() {
            return Err(EditError::EditTargetNotFound(format!(
                "operator `{op_name}`"
            )));
        }

        let (pos, text) = if operand_index == 0 {
            let occurrence = matches[0];
            let at = value_start(self.arena, occurrence);
            (at, format!("{new_script} {op_name} "))
        } else {
            let occurrence = matches[(operand_index - 1).min(matches.len() - 1)];
            let operands = operand_children(self.arena, occurrence);
            let at = operands
                .last()
                .map_or_else(|| self.arena.end_of(occurrence), |&last| self.arena.end_of(last));
            (at, format!(" {op_name} {new_script}"))
        };

        self.reparse_and_install(pos, pos, &text)
    }

    /// Replace the source span `[abs_start, abs_end)` with `replacement`,
    /// re-parse the resulting statement text, and install the fresh tree
    /// as this view's root. Shared by every primitive that needs a
    /// re-parse rather than an in-tree splice.
    fn reparse_and_install(
        &mut self,
        abs_start: usize,
        abs_end: usize,
        replacement: &str,
    ) -> Result<isize, EditError> {
        let old = self.text();
        let base = self.start_pos();
        let rel_start = abs_start.saturating_sub(base);
        let rel_end = abs_end.saturating_sub(base);
        if rel_start > old.len() || rel_end > old.len() || rel_start > rel_end {
            return Err(EditError::EditPreconditionViolated(
                "edit span out of bounds".to_string(),
            ));
        }

        let mut new_source = String::with_capacity(old.len() + replacement.len());
        new_source.push_str(&old[..rel_start]);
        new_source.push_str(replacement);
        new_source.push_str(&old[rel_end..]);

        let (frag_arena, mut frag_roots) = parse_pipeline(&new_source)
            .map_err(|e| EditError::EditPreconditionViolated(e.to_string()))?;

        if frag_roots.len() == 2 {
            let trailing = frag_roots[1];
            if frag_arena.kind(trailing) != TokenKind::Empty {
                return Err(EditError::EditPreconditionViolated(
                    "edit produced more than one statement".to_string(),
                ));
            }
            frag_roots.pop();
        } else if frag_roots.len() > 2 {
            return Err(EditError::EditPreconditionViolated(
                "edit produced more than one statement".to_string(),
            ));
        }

        let Some(&frag_root) = frag_roots.first() else {
            return Err(EditError::EditPreconditionViolated(
                "edit produced no statement".to_string(),
            ));
        };

        let new_root = self.arena.import_subtree(&frag_arena, frag_root, base as isize);
        self.root = new_root;

        Ok(new_source.len() as isize - old.len() as isize)
    }
}

/// The `(`-bracket child of a `FunctionName` token, if the function-call
/// bind pass (spec §4.4.4) attached one.
fn paren_of(arena: &Arena, fn_id: TokenId) -> Option<TokenId> {
    arena
        .children(fn_id)
        .iter()
        .copied()
        .find(|&c| arena.kind(c) == TokenKind::Bracket && arena.lexeme(c) == "(")
}

/// Every `Separator` child of `paren` in script order, representing
/// parameters 1.. (parameter 0, if present, has no `Separator` of its
/// own and is handled separately by callers).
fn separator_children(arena: &Arena, paren: TokenId) -> Vec<TokenId> {
    let mut seps: Vec<TokenId> = arena
        .children(paren)
        .iter()
        .copied()
        .filter(|&c| arena.kind(c) == TokenKind::Separator)
        .collect();
    seps.sort_by_key(|&c| arena.script_pos(c));
    seps
}

fn first_non_presentation_child(arena: &Arena, id: TokenId) -> Option<TokenId> {
    non_presentation_children(arena, id).into_iter().next()
}

fn non_presentation_children(arena: &Arena, id: TokenId) -> Vec<TokenId> {
    let mut children: Vec<TokenId> = arena
        .children(id)
        .iter()
        .copied()
        .filter(|&c| !arena.is_presentation(c) && arena.kind(c) != TokenKind::Empty)
        .collect();
    children.sort_by_key(|&c| arena.script_pos(c));
    children
}

/// `non_presentation_children`, further excluding a trailing
/// `EndStatement` (pass 7 appends one to whatever token is the statement's
/// root, which is not an operand of that token).
fn operand_children(arena: &Arena, id: TokenId) -> Vec<TokenId> {
    non_presentation_children(arena, id)
        .into_iter()
        .filter(|&c| arena.kind(c) != TokenKind::EndStatement)
        .collect()
}

/// The "slot roots" for every parameter of a call: parameter 0's own
/// value/name-assignment root (if the call has any arguments at all),
/// followed by each subsequent `Separator`.
fn argument_slot_roots(arena: &Arena, paren: TokenId) -> Vec<TokenId> {
    let mut slots = Vec::new();
    let close = arena
        .children(paren)
        .iter()
        .copied()
        .find(|&c| matches!(arena.kind(c), TokenKind::Bracket) && arena.lexeme(c) == ")");
    if let Some(arg0) = non_presentation_children(arena, paren)
        .into_iter()
        .find(|&c| Some(c) != close && arena.kind(c) != TokenKind::Separator)
    {
        slots.push(arg0);
    }
    slots.extend(separator_children(arena, paren));
    slots
}

fn nth_argument_slot_root(arena: &Arena, paren: TokenId, index: usize) -> Option<TokenId> {
    argument_slot_roots(arena, paren).into_iter().nth(index)
}

/// A slot's raw value root: a `Separator`'s sole adopted child, or the slot
/// root itself for parameter 0.
fn slot_candidate(arena: &Arena, slot_root: TokenId) -> TokenId {
    if arena.kind(slot_root) == TokenKind::Separator {
        first_non_presentation_child(arena, slot_root).unwrap_or(slot_root)
    } else {
        slot_root
    }
}

/// If `slot` is a `name = value` argument, its left (name) and right
/// (value) operands.
fn slot_assignment(arena: &Arena, slot_root: TokenId) -> Option<(TokenId, TokenId)> {
    let candidate = slot_candidate(arena, slot_root);
    if arena.kind(candidate) != TokenKind::OperatorBinary || arena.lexeme(candidate) != "=" {
        return None;
    }
    let children = non_presentation_children(arena, candidate);
    if children.len() != 2 {
        return None;
    }
    Some((children[0], children[1]))
}

/// For a named (`name = value`) slot, the right-hand operand of the `=`;
/// for a positional slot, the slot's own value root.
fn value_target_of_slot(arena: &Arena, slot_root: TokenId) -> TokenId {
    match slot_assignment(arena, slot_root) {
        Some((_, right)) => right,
        None => slot_candidate(arena, slot_root),
    }
}

/// The position a span for `id` should start at when replacing it as an
/// operand: `id`'s own subtree start, skipping a leading `Presentation`
/// child so the operator/operand's surrounding whitespace is preserved.
fn value_start(arena: &Arena, id: TokenId) -> usize {
    if let Some(&first) = arena.children(id).first() {
        if arena.kind(first) == TokenKind::Presentation {
            return arena.end_of(first);
        }
    }
    arena.start_of(id)
}

/// Find the `occurrence`-th `FunctionName` token (in script order) under
/// `root` whose lexeme is `name`.
fn find_function_name(arena: &Arena, root: TokenId, name: &str, occurrence: usize) -> Option<TokenId> {
    let mut matches: Vec<TokenId> = Vec::new();
    collect_all(arena, root, &mut |id| {
        if arena.kind(id) == TokenKind::FunctionName && arena.lexeme(id) == name {
            matches.push(id);
        }
    });
    matches.sort_by_key(|&id| arena.start_of(id));
    matches.into_iter().nth(occurrence)
}

/// Find every operator token (any of the four operator kinds) under `root`
/// whose lexeme is `op_name`, in script order.
fn find_operators(arena: &Arena, root: TokenId, op_name: &str) -> Vec<TokenId> {
    let mut matches: Vec<TokenId> = Vec::new();
    collect_all(arena, root, &mut |id| {
        let kind = arena.kind(id);
        let is_operator = matches!(
            kind,
            TokenKind::OperatorBinary
                | TokenKind::OperatorUnaryLeft
                | TokenKind::OperatorUnaryRight
                | TokenKind::OperatorBracket
        );
        if is_operator && arena.lexeme(id) == op_name {
            matches.push(id);
        }
    });
    matches.sort_by_key(|&id| arena.start_of(id));
    matches
}

/// Drop the `Presentation` child that sits leftmost (by position) anywhere
/// along `id`'s leftmost descendant chain, if any.
fn strip_leading_presentation(arena: &mut Arena, id: TokenId) {
    let children = arena.children(id).to_vec();
    if children.is_empty() {
        return;
    }
    let first = children
        .iter()
        .copied()
        .min_by_key(|&c| arena.script_pos(c))
        .unwrap();
    if arena.kind(first) == TokenKind::Presentation {
        arena.remove_child(id, first);
    } else {
        strip_leading_presentation(arena, first);
    }
}

fn collect_all(arena: &Arena, id: TokenId, visit: &mut impl FnMut(TokenId)) {
    visit(id);
    for &child in arena.children(id) {
        collect_all(arena, child, visit);
    }
}
