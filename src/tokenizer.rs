//! Single left-to-right classification pass over the lexeme stream (spec
//! §4.3), turning each [`crate::lexer::LexemeSpan`] into an arena-allocated,
//! still-flat [`TokenId`] with its final [`TokenKind`].
//!
//! Grounded on `rhai_rowan::parser::Parser`'s token-stream walk, which
//! keeps a `prev_token` and a bracket/paren depth counter to disambiguate
//! context-sensitive tokens; this cascade generalizes that to the fourteen
//! ordered rules spec §4.3 lays out.

use crate::error::ParseError;
use crate::lexeme;
use crate::lexer::LexemeSpan;
use crate::token::{Arena, TokenData, TokenId, TokenKind};

/// Run the classification cascade over every lexeme, allocating one
/// [`TokenId`] per lexeme in `arena` in source order.
pub fn tokenize(arena: &mut Arena, lexemes: &[LexemeSpan]) -> Result<Vec<TokenId>, ParseError> {
    let mut out = Vec::with_capacity(lexemes.len());

    let mut prev_element: Option<(String, usize)> = None;
    let mut current_line = 0usize;
    let mut bracket_depth: i32 = 0;
    let mut stmt_has_element = false;

    for (i, span) in lexemes.iter().enumerate() {
        let text = span.text.as_str();
        let line = current_line;

        let kind = classify(
            text,
            i,
            lexemes,
            prev_element.as_ref().map(|(t, l)| (t.as_str(), *l)),
            line,
            bracket_depth,
            stmt_has_element,
        )?;

        if lexeme::is_open_bracket(text) {
            bracket_depth += 1;
        } else if matches!(text, ")" | "}" | "]" | "]]") {
            bracket_depth -= 1;
        }

        if matches!(kind, TokenKind::EndStatement) {
            stmt_has_element = false;
        } else if !matches!(
            kind,
            TokenKind::Space | TokenKind::Comment | TokenKind::NewLine
        ) {
            stmt_has_element = true;
        }

        if lexeme::is_newline(text) {
            current_line += 1;
        }

        if !matches!(kind, TokenKind::Space | TokenKind::Comment | TokenKind::NewLine) {
            prev_element = Some((text.to_string(), line));
        }

        let id = arena.alloc(TokenData::new(text, span.start, kind));
        out.push(id);
    }

    crate::trace!(count = out.len(), "tokenized lexeme stream");
    Ok(out)
}

#[allow(clippy::too_many_arguments)]
fn classify(
    text: &str,
    index: usize,
    lexemes: &[LexemeSpan],
    prev_element: Option<(&str, usize)>,
    line: usize,
    bracket_depth: i32,
    stmt_has_element: bool,
) -> Result<TokenKind, ParseError> {
    // 1. Keyword.
    if lexeme::is_keyword(text) {
        return Ok(TokenKind::KeyWord);
    }

    // 2. Syntactic name: FunctionName iff `(` follows on the same line.
    if lexeme::is_syntactic_name(text) {
        return Ok(match next_element_same_line(lexemes, index + 1, line) {
            Some("(") => TokenKind::FunctionName,
            _ => TokenKind::SyntacticName,
        });
    }

    // 3. Comment.
    if lexeme::is_comment(text) {
        return Ok(TokenKind::Comment);
    }

    // 4. String literal.
    if lexeme::is_string_literal(text) {
        return Ok(TokenKind::ConstantString);
    }

    // 5. Newline.
    if lexeme::is_newline(text) {
        let prev_blocks_end = prev_element.is_some_and(|(t, _)| {
            t != "~" && (lexeme::is_user_defined_operator_complete(t) || lexeme::is_reserved_operator(t))
        });
        return Ok(if stmt_has_element && bracket_depth == 0 && !prev_blocks_end {
            TokenKind::EndStatement
        } else {
            TokenKind::NewLine
        });
    }

    // 6. `;`.
    if text == ";" {
        return Ok(TokenKind::EndStatement);
    }

    // 7. `,`.
    if text == "," {
        return Ok(TokenKind::Separator);
    }

    // 8. Pure-space lexeme.
    if lexeme::is_spaces(text) {
        return Ok(TokenKind::Space);
    }

    // 9. Round/curly bracket.
    if lexeme::is_bracket(text) {
        return Ok(TokenKind::Bracket);
    }

    // 10. Bracket operator.
    if lexeme::is_bracket_operator(text) {
        return Ok(TokenKind::OperatorBracket);
    }

    // 11. Unary-capable: OperatorUnaryRight if no usable left operand precedes
    // it on the same line.
    if lexeme::is_unary_capable(text) {
        let usable_left = prev_element
            .is_some_and(|(t, l)| l == line && lexeme::is_valid_binary_left_operand(t));
        if !usable_left {
            return Ok(TokenKind::OperatorUnaryRight);
        }

        // 12. `~` with a left operand but nothing valid to its right.
        if text == "~" {
            let has_right = next_element_same_line(lexemes, index + 1, line)
                .is_some_and(lexeme::is_valid_binary_right_operand);
            if !has_right {
                return Ok(TokenKind::OperatorUnaryLeft);
            }
        }
    }

    // 13. Reserved or complete user-defined operator.
    if lexeme::is_reserved_operator(text) || lexeme::is_user_defined_operator_complete(text) {
        return Ok(TokenKind::OperatorBinary);
    }

    // 14. Nothing matched.
    Err(ParseError::unexpected_token_shape(
        lexemes[index].start,
        text,
    ))
}

/// The text of the next lexeme after `from` that is neither `Space` nor a
/// comment, provided no newline lexeme is crossed first (i.e. it is on
/// `line`). Returns `None` past end-of-stream or once a newline intervenes.
fn next_element_same_line<'a>(
    lexemes: &'a [LexemeSpan],
    from: usize,
    _line: usize,
) -> Option<&'a str> {
    for span in &lexemes[from..] {
        let text = span.text.as_str();
        if lexeme::is_newline(text) {
            return None;
        }
        if lexeme::is_spaces(text) || lexeme::is_comment(text) {
            continue;
        }
        return Some(text);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize_lexemes;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let lexemes = tokenize_lexemes(src).unwrap();
        let mut arena = Arena::new();
        tokenize(&mut arena, &lexemes)
            .unwrap()
            .into_iter()
            .map(|id| arena.kind(id))
            .collect()
    }

    #[test]
    fn function_call_detection() {
        let ks = kinds("f(x)");
        assert_eq!(ks[0], TokenKind::FunctionName);
    }

    #[test]
    fn name_not_function_across_newline() {
        let ks = kinds("f\n(x)");
        assert_eq!(ks[0], TokenKind::SyntacticName);
    }

    #[test]
    fn unary_minus_at_start() {
        let ks = kinds("-a");
        assert_eq!(ks[0], TokenKind::OperatorUnaryRight);
    }

    #[test]
    fn binary_minus_between_names() {
        let ks = kinds("a - b");
        assert_eq!(ks[2], TokenKind::OperatorBinary);
    }

    #[test]
    fn newline_ends_statement_at_top_level() {
        let ks = kinds("a\nb");
        assert_eq!(ks[1], TokenKind::EndStatement);
    }

    #[test]
    fn newline_inside_brackets_is_not_end_statement() {
        let ks = kinds("f(a\n,b)");
        // f FunctionName, ( Bracket, a SyntacticName, \n NewLine, ...
        assert_eq!(ks[3], TokenKind::NewLine);
    }

    #[test]
    fn tilde_unary_left_without_right_operand() {
        let ks = kinds("a~");
        assert_eq!(ks[1], TokenKind::OperatorUnaryLeft);
    }

    #[test]
    fn tilde_binary_between_names() {
        let ks = kinds("a~b");
        assert_eq!(ks[1], TokenKind::OperatorBinary);
    }

    #[test]
    fn semicolon_and_comma() {
        let ks = kinds("a;b,c");
        assert_eq!(ks[1], TokenKind::EndStatement);
        assert_eq!(ks[3], TokenKind::Separator);
    }
}
