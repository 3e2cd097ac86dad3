//! Error types for the parsing and editing surfaces.
//!
//! `thiserror`-derived, in the same style as `rhai_rowan::parser::ParseErrorKind`
//! and `rhai_hir::error::Error`: flat enums with `#[error("...")]` display
//! strings carrying just enough position/context to act on, no `anyhow`-style
//! opaque boxes.

use crate::lexer::LexError;

/// Why [`crate::Script::parse`] failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("token at byte {pos} ({lexeme:?}) could not be assigned a shape")]
    UnexpectedTokenShape { pos: usize, lexeme: String },
}

/// A [`crate::Script::parse`] failure, with the byte offset it occurred at.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            kind: ParseErrorKind::Lex(err),
        }
    }
}

impl ParseError {
    #[must_use]
    pub fn unexpected_token_shape(pos: usize, lexeme: impl Into<String>) -> Self {
        ParseError {
            kind: ParseErrorKind::UnexpectedTokenShape {
                pos,
                lexeme: lexeme.into(),
            },
        }
    }
}

/// Why an [`crate::edit`] primitive refused to apply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("edit target not found: {0}")]
    EditTargetNotFound(String),

    #[error("edit precondition violated: {0}")]
    EditPreconditionViolated(String),
}
