//! Longest-match segmentation of a source string into lexemes.
//!
//! Grounded on the teacher's own hand-written character-at-a-time lexer
//! (`rhai::token`'s `TokenIterator`, which keeps a growing buffer and
//! decides token boundaries one `char` at a time) rather than the
//! `logos`-generated DFA lexer in `rhai_rowan::syntax`: the bracket-depth
//! stack and the backtrack-free single/double-close disambiguation this
//! spec requires are not expressible as independent token regexes, so this
//! crate keeps the classic buffer-growing approach instead.

use crate::lexeme;

/// One lexeme: its text, and the absolute byte offset of its first
/// character in the original source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexemeSpan {
    pub text: String,
    pub start: usize,
}

/// The lexer's only failure mode (spec §7): an invalid terminal lexeme, or
/// an unmatched close bracket.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("malformed input at byte {pos}: {reason}")]
    MalformedInput { pos: usize, reason: String },
}

/// Segment `source` into an ordered sequence of lexemes.
pub fn tokenize_lexemes(source: &str) -> Result<Vec<LexemeSpan>, LexError> {
    let mut lexemes = Vec::new();
    let mut buffer = String::new();
    let mut buffer_start = 0usize;
    // true = innermost open bracket was single `[`, false = it was `[[`.
    let mut bracket_stack: Vec<bool> = Vec::new();

    for (pos, ch) in source.char_indices() {
        let mut candidate = buffer.clone();
        candidate.push(ch);

        let extends = lexeme::is_valid(&candidate) && !would_overclose(&candidate, &bracket_stack);

        if extends {
            buffer = candidate;
        } else {
            if !buffer.is_empty() {
                flush(&mut lexemes, &mut bracket_stack, buffer_start, &buffer)?;
            }
            buffer = ch.to_string();
            buffer_start = pos;
        }
    }

    if !buffer.is_empty() {
        if !lexeme::is_valid(&buffer) {
            return Err(LexError::MalformedInput {
                pos: buffer_start,
                reason: format!("{buffer:?} is not a valid lexeme"),
            });
        }
        flush(&mut lexemes, &mut bracket_stack, buffer_start, &buffer)?;
    }

    crate::trace!(count = lexemes.len(), "lexed source into lexemes");
    Ok(lexemes)
}

/// A buffer that has just become exactly `]]` must not be accepted while
/// the innermost open bracket expects a single `]` close — growing into
/// `]]` there would overclose and must instead flush at `]`.
fn would_overclose(candidate: &str, bracket_stack: &[bool]) -> bool {
    candidate == "]]" && matches!(bracket_stack.last(), Some(true))
}

fn flush(
    lexemes: &mut Vec<LexemeSpan>,
    bracket_stack: &mut Vec<bool>,
    start: usize,
    text: &str,
) -> Result<(), LexError> {
    match text {
        "[" => bracket_stack.push(true),
        "[[" => bracket_stack.push(false),
        "]" => {
            if bracket_stack.pop().is_none() {
                return Err(LexError::MalformedInput {
                    pos: start,
                    reason: "unmatched `]`".to_string(),
                });
            }
        }
        "]]" => {
            if bracket_stack.pop().is_none() {
                return Err(LexError::MalformedInput {
                    pos: start,
                    reason: "unmatched `]]`".to_string(),
                });
            }
        }
        _ => {}
    }
    lexemes.push(LexemeSpan {
        text: text.to_string(),
        start,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(src: &str) -> Vec<String> {
        tokenize_lexemes(src)
            .unwrap()
            .into_iter()
            .map(|l| l.text)
            .collect()
    }

    #[test]
    fn simple_assignment() {
        assert_eq!(
            texts("x <- 1 + 2\n"),
            vec!["x", " ", "<-", " ", "1", " ", "+", " ", "2", "\n"]
        );
    }

    #[test]
    fn left_shift_assign_is_one_lexeme() {
        assert_eq!(texts("x <<- 1"), vec!["x", " ", "<<-", " ", "1"]);
    }

    #[test]
    fn nested_brackets_disambiguate_close() {
        // k[[l[[m[6]]]]]
        let toks = texts("k[[l[[m[6]]]]]");
        assert_eq!(
            toks,
            vec![
                "k", "[[", "l", "[[", "m", "[", "6", "]", "]]", "]]"
            ]
        );
    }

    #[test]
    fn unmatched_close_bracket_errors() {
        assert!(tokenize_lexemes("]").is_err());
    }

    #[test]
    fn string_literal_as_one_lexeme() {
        assert_eq!(texts("\"a b\"+1"), vec!["\"a b\"", "+", "1"]);
    }

    #[test]
    fn comment_runs_to_newline() {
        assert_eq!(texts("# hi\nx"), vec!["# hi", "\n", "x"]);
    }

    #[test]
    fn user_defined_operator() {
        assert_eq!(texts("a%foo%b"), vec!["a", "%foo%", "b"]);
    }
}
