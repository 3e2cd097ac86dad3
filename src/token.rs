//! The token arena: a `slotmap`-backed handle graph, adapted from the
//! arena-of-symbols idiom `rhai_hir::Hir` uses for its scopes and symbols
//! (`slotmap::new_key_type! { pub struct Symbol; }` +
//! `SlotMap<Symbol, SymbolData>`). Here the keyed values are syntax tokens
//! instead of HIR symbols, which lets every shaper pass in
//! [`crate::shaper`] re-parent already-allocated tokens in place (`Vec::push`
//! onto a child list) instead of cloning subtrees.

use slotmap::SlotMap;

fn apply_delta(pos: usize, delta: isize) -> usize {
    (pos as isize + delta).max(0) as usize
}

slotmap::new_key_type! {
    /// A stable handle to a token in an [`Arena`]. Handles remain valid
    /// across shaper passes and edits; they are only invalidated by the
    /// (rare) explicit removal path used by
    /// [`crate::edit::remove_function_parameter`].
    pub struct TokenId;
}

/// The closed set of token kinds from spec §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    Bracket,
    Comment,
    ConstantString,
    Empty,
    EndStatement,
    FunctionName,
    KeyWord,
    NewLine,
    OperatorBinary,
    OperatorBracket,
    OperatorUnaryLeft,
    OperatorUnaryRight,
    Presentation,
    Separator,
    Space,
    SyntacticName,
}

impl TokenKind {
    /// Whether a token of this kind is "presentation": whitespace, a
    /// comment, or a non-terminating newline (spec §3).
    #[must_use]
    pub fn is_presentation(self) -> bool {
        matches!(
            self,
            TokenKind::Presentation | TokenKind::Space | TokenKind::Comment | TokenKind::NewLine
        )
    }
}

/// One node in the tree: a lexeme, its absolute source position, its kind,
/// and its ordered children.
#[derive(Debug, Clone)]
pub struct TokenData {
    pub lexeme: String,
    pub script_pos: usize,
    pub kind: TokenKind,
    pub children: Vec<TokenId>,
}

impl TokenData {
    #[must_use]
    pub fn new(lexeme: impl Into<String>, script_pos: usize, kind: TokenKind) -> Self {
        Self {
            lexeme: lexeme.into(),
            script_pos,
            kind,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_presentation(&self) -> bool {
        self.kind.is_presentation()
    }
}

/// The owning arena for every token produced while parsing one [`crate::Script`].
#[derive(Debug, Default, Clone)]
pub struct Arena {
    nodes: SlotMap<TokenId, TokenData>,
}

impl Arena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, data: TokenData) -> TokenId {
        self.nodes.insert(data)
    }

    #[must_use]
    pub fn get(&self, id: TokenId) -> &TokenData {
        &self.nodes[id]
    }

    pub fn get_mut(&mut self, id: TokenId) -> &mut TokenData {
        &mut self.nodes[id]
    }

    #[must_use]
    pub fn contains(&self, id: TokenId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn remove(&mut self, id: TokenId) -> Option<TokenData> {
        self.nodes.remove(id)
    }

    #[must_use]
    pub fn children(&self, id: TokenId) -> &[TokenId] {
        &self.nodes[id].children
    }

    pub fn push_child(&mut self, parent: TokenId, child: TokenId) {
        self.nodes[parent].children.push(child);
    }

    /// Insert `child` at `index` among `parent`'s children.
    pub fn insert_child(&mut self, parent: TokenId, index: usize, child: TokenId) {
        self.nodes[parent].children.insert(index, child);
    }

    /// Replace `id`'s entire children list.
    pub fn set_children(&mut self, id: TokenId, children: Vec<TokenId>) {
        self.nodes[id].children = children;
    }

    /// Remove the first occurrence of `child` from `parent`'s children.
    pub fn remove_child(&mut self, parent: TokenId, child: TokenId) {
        self.nodes[parent].children.retain(|&c| c != child);
    }

    #[must_use]
    pub fn kind(&self, id: TokenId) -> TokenKind {
        self.nodes[id].kind
    }

    #[must_use]
    pub fn lexeme(&self, id: TokenId) -> &str {
        &self.nodes[id].lexeme
    }

    #[must_use]
    pub fn script_pos(&self, id: TokenId) -> usize {
        self.nodes[id].script_pos
    }

    #[must_use]
    pub fn is_presentation(&self, id: TokenId) -> bool {
        self.nodes[id].is_presentation()
    }

    /// The minimum `script_pos` over `id`'s whole subtree (spec §3:
    /// `script_pos_start_statement`).
    #[must_use]
    pub fn start_of(&self, id: TokenId) -> usize {
        let mut min = self.nodes[id].script_pos;
        for &child in &self.nodes[id].children {
            min = min.min(self.start_of(child));
        }
        min
    }

    /// The maximum `script_pos + len(lexeme)` over `id`'s whole subtree
    /// (spec §3: `script_pos_end_statement`).
    #[must_use]
    pub fn end_of(&self, id: TokenId) -> usize {
        let node = &self.nodes[id];
        let mut max = node.script_pos + node.lexeme.len();
        for &child in &node.children {
            max = max.max(self.end_of(child));
        }
        max
    }

    /// In-order concatenation of every descendant token's lexeme
    /// (including `id` itself), which is lossless by construction: every
    /// pass preserves child order as script-position order.
    #[must_use]
    pub fn text_of(&self, id: TokenId) -> String {
        let mut out = String::new();
        self.write_text(id, &mut out);
        out
    }

    fn write_text(&self, id: TokenId, out: &mut String) {
        let node = &self.nodes[id];
        if node.children.is_empty() {
            out.push_str(&node.lexeme);
            return;
        }
        // A structured token's own lexeme, if non-empty, is a separately
        // recorded leaf elsewhere in the subtree only for synthesized
        // wrapper kinds (Presentation, Empty); ordinary operator/keyword
        // tokens keep their own lexeme plus children, and children always
        // sort after the leading presentation child, so we must weave the
        // node's own text in at its script position.
        let mut pieces: Vec<(usize, &TokenId)> = node
            .children
            .iter()
            .map(|c| (self.nodes[*c].script_pos, c))
            .collect();
        pieces.sort_by_key(|(pos, _)| *pos);

        let mut emitted_self = node.lexeme.is_empty();
        for (pos, child) in pieces {
            if !emitted_self && pos >= node.script_pos {
                out.push_str(&node.lexeme);
                emitted_self = true;
            }
            self.write_text(*child, out);
        }
        if !emitted_self {
            out.push_str(&node.lexeme);
        }
    }

    /// Add `delta` to `script_pos` of every token in `id`'s subtree whose
    /// `script_pos >= min_pos` (spec §4.5 `adjust_start_pos`).
    pub fn shift_positions(&mut self, id: TokenId, delta: isize, min_pos: usize) {
        let pos = self.nodes[id].script_pos;
        if pos >= min_pos {
            self.nodes[id].script_pos = apply_delta(pos, delta);
        }
        for child in self.nodes[id].children.clone() {
            self.shift_positions(child, delta, min_pos);
        }
    }

    /// Recursively copy `other_root`'s subtree from `other` into `self`,
    /// shifting every copied position by `pos_shift`. Used to splice a
    /// freshly re-parsed fragment (its own standalone [`Arena`]) into the
    /// tree being edited.
    pub fn import_subtree(&mut self, other: &Arena, other_root: TokenId, pos_shift: isize) -> TokenId {
        let src = other.get(other_root);
        let children: Vec<TokenId> = src
            .children
            .iter()
            .map(|&c| self.import_subtree(other, c, pos_shift))
            .collect();
        let pos = apply_delta(src.script_pos, pos_shift);
        let mut data = TokenData::new(src.lexeme.clone(), pos, src.kind);
        data.children = children;
        self.alloc(data)
    }

    /// Reassign contiguous `script_pos` values across `id`'s subtree,
    /// starting at `*cursor` and advancing it past the subtree, preserving
    /// each node's relative order from its *old* position. Used after an
    /// in-tree structural edit ([`crate::edit`]'s parameter removal) so
    /// later position-based arithmetic on this statement stays accurate.
    pub fn renumber(&mut self, id: TokenId, cursor: &mut usize) {
        let node_old_pos = self.nodes[id].script_pos;
        let mut children = self.nodes[id].children.clone();
        if children.is_empty() {
            self.nodes[id].script_pos = *cursor;
            *cursor += self.nodes[id].lexeme.len();
            return;
        }
        children.sort_by_key(|&c| self.nodes[c].script_pos);

        let lexeme_empty = self.nodes[id].lexeme.is_empty();
        let mut emitted = lexeme_empty;
        let mut assigned_self_pos = None;
        for &child in &children {
            let child_old_pos = self.nodes[child].script_pos;
            if !emitted && child_old_pos >= node_old_pos {
                assigned_self_pos = Some(*cursor);
                *cursor += self.nodes[id].lexeme.len();
                emitted = true;
            }
            self.renumber(child, cursor);
        }
        if !emitted {
            assigned_self_pos = Some(*cursor);
            *cursor += self.nodes[id].lexeme.len();
        }
        if let Some(pos) = assigned_self_pos {
            self.nodes[id].script_pos = pos;
        }
        self.nodes[id].children = children;
    }

    /// Re-establish child order by `script_pos` after an edit. Spec §3:
    /// "after any edit, ordering is re-established".
    pub fn resort_children(&mut self, id: TokenId) {
        let mut children = std::mem::take(&mut self.nodes[id].children);
        children.sort_by_key(|c| self.nodes[*c].script_pos);
        self.nodes[id].children = children;
    }
}
