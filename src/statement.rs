//! The per-statement view (spec §4.5): lossless text, a formatting-
//! stripped canonical form, and the position bookkeeping edits rely on.

use crate::token::{Arena, TokenId, TokenKind};

const ASSIGNMENT_OPERATORS: &[&str] = &["->", "->>", "<-", "<<-", "="];
const SPACED_KEYWORDS: &[&str] = &["else", "in", "repeat"];

/// A borrowed view over one statement-tree root.
pub struct StatementView<'a> {
    pub(crate) arena: &'a mut Arena,
    pub(crate) root: TokenId,
}

impl<'a> StatementView<'a> {
    pub fn new(arena: &'a mut Arena, root: TokenId) -> Self {
        Self { arena, root }
    }

    #[must_use]
    pub fn root(&self) -> TokenId {
        self.root
    }

    #[must_use]
    pub fn start_pos(&self) -> usize {
        self.arena.start_of(self.root)
    }

    #[must_use]
    pub fn end_pos(&self) -> usize {
        self.arena.end_of(self.root)
    }

    #[must_use]
    pub fn is_assignment(&self) -> bool {
        self.arena.kind(self.root) == TokenKind::OperatorBinary
            && ASSIGNMENT_OPERATORS.contains(&self.arena.lexeme(self.root))
    }

    /// Lossless reconstruction: every descendant lexeme, in position order.
    #[must_use]
    pub fn text(&self) -> String {
        self.arena.text_of(self.root)
    }

    /// Formatting-stripped canonical form (spec §4.5): no presentation, `;`
    /// as the only separator, `else`/`in`/`repeat` spaced, no trailing `;`.
    #[must_use]
    pub fn text_no_formatting(&self) -> String {
        let mut out = String::new();
        collect_no_formatting(self.arena, self.root, &mut out);
        if out.ends_with(';') {
            out.pop();
        }
        out
    }

    /// Add `delta` to `script_pos` of every token at or after `min_pos`,
    /// within `subtree_root` if given, else the whole statement.
    pub fn adjust_start_pos(&mut self, delta: isize, min_pos: usize, subtree_root: Option<TokenId>) {
        let root = subtree_root.unwrap_or(self.root);
        self.arena.shift_positions(root, delta, min_pos);
    }
}

fn collect_no_formatting(arena: &Arena, id: TokenId, out: &mut String) {
    let kind = arena.kind(id);
    if kind == TokenKind::Empty || kind.is_presentation() {
        return;
    }

    let children: Vec<(usize, TokenId)> = arena
        .children(id)
        .iter()
        .copied()
        .filter(|&c| !(arena.kind(c) == TokenKind::Empty || arena.kind(c).is_presentation()))
        .map(|c| (arena.script_pos(c), c))
        .collect();

    if children.is_empty() {
        push_self(arena, id, out);
        return;
    }

    let mut sorted = children;
    sorted.sort_by_key(|(pos, _)| *pos);

    let mut emitted_self = arena.lexeme(id).is_empty();
    for (pos, child) in sorted {
        if !emitted_self && pos >= arena.script_pos(id) {
            push_self(arena, id, out);
            emitted_self = true;
        }
        collect_no_formatting(arena, child, out);
    }
    if !emitted_self {
        push_self(arena, id, out);
    }
}

fn push_self(arena: &Arena, id: TokenId, out: &mut String) {
    let kind = arena.kind(id);
    if kind == TokenKind::EndStatement {
        out.push(';');
        return;
    }
    let lexeme = arena.lexeme(id);
    if kind == TokenKind::KeyWord && SPACED_KEYWORDS.contains(&lexeme) {
        out.push(' ');
        out.push_str(lexeme);
        out.push(' ');
    } else {
        out.push_str(lexeme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_pipeline;

    fn single(source: &str) -> (Arena, TokenId) {
        let (arena, mut roots) = parse_pipeline(source).unwrap();
        (arena, roots.remove(0))
    }

    #[test]
    fn lossless_round_trip() {
        let src = "x <- 1 + 2\n";
        let (mut arena, root) = single(src);
        let view = StatementView::new(&mut arena, root);
        assert_eq!(view.text(), src);
    }

    #[test]
    fn canonical_form_strips_formatting() {
        let src = "# c1\na = b # c2\n";
        let (mut arena, root) = single(src);
        let view = StatementView::new(&mut arena, root);
        assert_eq!(view.text_no_formatting(), "a=b");
    }

    #[test]
    fn is_assignment_detects_root_operator() {
        let (mut arena, root) = single("x <- 1\n");
        let view = StatementView::new(&mut arena, root);
        assert!(view.is_assignment());
    }
}
