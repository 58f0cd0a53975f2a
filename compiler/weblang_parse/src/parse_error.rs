//! Parse errors.
//!
//! Parsing stops at the first error; there is no recovery.

use thiserror::Error;
use weblang_ir::Position;
use weblang_lexer::{LexError, LexErrorKind};

#[derive(Clone, Debug, PartialEq, Error)]
#[error("{kind} ({position})")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: Position,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: Position) -> Self {
        ParseError { kind, position }
    }
}

/// Lexing happens on demand, so lex failures surface here.
impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::new(ParseErrorKind::Lex(err.kind), err.position)
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    #[error("expected {expected}, found end of input")]
    UnexpectedEof { expected: String },

    /// Operator text with no infix meaning (`&`, `|`, `!`).
    #[error("unknown operator `{op}`")]
    UnknownOperator { op: String },

    /// `let f(a = 1) = ...`: only the loop form takes initial values.
    #[error("parameter `{name}` of a function definition cannot have a default value")]
    InitializerInDefinition { name: String },

    #[error("invalid number literal `{text}`")]
    InvalidNumber { text: String },

    #[error(transparent)]
    Lex(LexErrorKind),
}
