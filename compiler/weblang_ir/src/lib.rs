//! Weblang IR - tokens, source positions and the syntax tree.
//!
//! This crate holds the data shared by every stage of the interpreter:
//! - [`Position`] for line/column source locations
//! - [`Token`] and [`TokenKind`] for lexer output
//! - [`Expr`] and [`ExprKind`] for parser output
//! - [`printer`] for rendering a tree back to source text
//!
//! # Design
//!
//! The tree is owned, boxed and immutable once built. Lambda definitions are
//! reference counted ([`LambdaDef`] behind an `Rc`) so that closures created
//! at runtime share the body with the tree instead of copying it.
//!
//! Equality on [`Expr`] ignores positions, so two parses of equivalent
//! source compare equal even when whitespace differs.

pub mod ast;
mod position;
pub mod printer;
mod token;

pub use ast::{BinaryOp, Expr, ExprKind, LambdaDef, LetBinding, ASSIGN_PRECEDENCE};
pub use position::Position;
pub use token::{Token, TokenKind};
