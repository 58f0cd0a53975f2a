//! Lexer errors.

use thiserror::Error;
use weblang_ir::Position;

/// A lexing failure at a source position.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{kind} ({position})")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub position: Position,
}

impl LexError {
    pub fn new(kind: LexErrorKind, position: Position) -> Self {
        LexError { kind, position }
    }
}

/// What went wrong while lexing.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LexErrorKind {
    /// A character that starts no token.
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),

    /// End of input inside a string literal. Only reported by a strict lexer.
    #[error("unterminated string literal")]
    UnterminatedString,
}
