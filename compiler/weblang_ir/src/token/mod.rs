//! Token types produced by the lexer.
//!
//! Tokens keep their raw text; numeric conversion happens in the parser.

use std::fmt;

use crate::Position;

/// Classification of a token.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// Numeric literal: `42`, `1.5`
    Num,
    /// String literal, stored unquoted with escapes resolved
    Str,
    /// `true` or `false`
    Bool,
    /// `let`, `fn`, `if`, `else`, `then`, `lambda`, `λ`
    Keyword,
    /// Any other identifier
    Var,
    /// One of `" ' , . ; ( ) [ ] { }`
    Punctuation,
    /// Operator text such as `+` or `===`
    Operator,
    /// End of input
    Eof,
}

impl TokenKind {
    /// Name used in diagnostics and in `weblang lex` output.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Num => "num",
            TokenKind::Str => "str",
            TokenKind::Bool => "bool",
            TokenKind::Keyword => "kw",
            TokenKind::Var => "var",
            TokenKind::Punctuation => "punc",
            TokenKind::Operator => "op",
            TokenKind::Eof => "eof",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token with its raw text and the position of its first character.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, position: Position) -> Self {
        Token {
            kind,
            value: value.into(),
            position,
        }
    }

    pub fn eof(position: Position) -> Self {
        Token::new(TokenKind::Eof, "", position)
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Whether this token has the given kind and exact text.
    #[inline]
    pub fn is(&self, kind: TokenKind, value: &str) -> bool {
        self.kind == kind && self.value == value
    }

    #[inline]
    pub fn is_punc(&self, ch: char) -> bool {
        self.kind == TokenKind::Punctuation && self.value.chars().eq(std::iter::once(ch))
    }

    #[inline]
    pub fn is_keyword(&self, kw: &str) -> bool {
        self.is(TokenKind::Keyword, kw)
    }

    #[inline]
    pub fn is_op(&self, op: &str) -> bool {
        self.is(TokenKind::Operator, op)
    }
}

/// Renders the token the way a user would refer to it in a message.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => f.write_str("end of input"),
            TokenKind::Str => write!(f, "{} {:?}", self.kind, self.value),
            _ => write!(f, "{} `{}`", self.kind, self.value),
        }
    }
}

#[cfg(test)]
mod tests;
