//! Syntax tree.
//!
//! One [`ExprKind`] variant per node kind. Everything in Weblang is an
//! expression, including `let`, `if` and blocks.

mod operators;

use std::rc::Rc;

use weblang_stack::ensure_sufficient_stack;

use crate::Position;

pub use operators::{BinaryOp, ASSIGN_PRECEDENCE};

/// An expression with the position of its first token.
///
/// Equality compares structure only; positions are ignored.
#[derive(Clone, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub position: Position,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, position: Position) -> Self {
        Expr { kind, position }
    }

    /// Build a node at [`Position::START`]; for tests and desugaring.
    pub fn synthetic(kind: ExprKind) -> Self {
        Expr::new(kind, Position::START)
    }

    /// The boolean-false literal, used wherever a value is absent.
    pub fn false_literal(position: Position) -> Self {
        Expr::new(ExprKind::Bool(false), position)
    }

    /// Take the node kind, leaving the position behind.
    #[must_use]
    pub fn into_kind(mut self) -> ExprKind {
        std::mem::replace(&mut self.kind, ExprKind::Bool(false))
    }
}

// Nesting in the source is nesting in the tree; releasing it recurses per level.
impl Drop for Expr {
    fn drop(&mut self) {
        let kind = std::mem::replace(&mut self.kind, ExprKind::Bool(false));
        ensure_sufficient_stack(move || drop(kind));
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

/// Expression kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Number(f64),
    Str(String),
    Bool(bool),
    Array(Vec<Expr>),
    Var(String),

    /// `let name` or `let name = init`, defined in the current scope.
    Let {
        name: String,
        init: Option<Box<Expr>>,
    },

    /// `let (a = 1, b) body`: each binding opens a scope visible to the
    /// following bindings and to `body`.
    LetIn {
        bindings: Vec<LetBinding>,
        body: Box<Expr>,
    },

    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },

    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    Lambda(Rc<LambdaDef>),

    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },

    /// `receiver.method(args)`; the result is stored back into `receiver`.
    MethodCall {
        receiver: String,
        method: String,
        args: Vec<Expr>,
    },

    If {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_if: Option<Box<Expr>>,
        else_branch: Option<Box<Expr>>,
    },

    Block(Vec<Expr>),
}

impl ExprKind {
    /// Short name of the node kind, for tracing and diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            ExprKind::Number(_) => "number",
            ExprKind::Str(_) => "string",
            ExprKind::Bool(_) => "bool",
            ExprKind::Array(_) => "array",
            ExprKind::Var(_) => "var",
            ExprKind::Let { .. } => "let",
            ExprKind::LetIn { .. } => "let-in",
            ExprKind::Assign { .. } => "assign",
            ExprKind::Binary { .. } => "binary",
            ExprKind::Lambda(_) => "lambda",
            ExprKind::Call { .. } => "call",
            ExprKind::MethodCall { .. } => "method-call",
            ExprKind::If { .. } => "if",
            ExprKind::Block(_) => "block",
        }
    }
}

/// A lambda definition shared between the tree and the closures made from it.
#[derive(Debug, PartialEq)]
pub struct LambdaDef {
    /// Name bound to the closure inside its own body, for recursion.
    pub name: Option<String>,
    pub params: Vec<String>,
    pub body: Expr,
}

/// One binding of a `let (...)` list.
#[derive(Clone, Debug, PartialEq)]
pub struct LetBinding {
    pub name: String,
    pub init: Option<Expr>,
}

#[cfg(test)]
mod tests;
