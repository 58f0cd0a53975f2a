//! Runtime errors and their constructors.
//!
//! Every error is fatal to the current evaluation. The evaluator attaches
//! the position of the innermost expression that failed, and each closure
//! frame the error unwinds through is recorded in the backtrace.

use std::fmt;

use thiserror::Error;
use weblang_ir::Position;

use crate::Value;

pub type EvalResult = Result<Value, EvalError>;

/// A runtime error.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Innermost expression being evaluated when the error was raised.
    pub position: Option<Position>,
    /// Closure frames unwound, innermost first.
    pub backtrace: Vec<Frame>,
}

/// One closure frame in a backtrace, located at the start of its body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub name: Option<String>,
    pub position: Position,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "in {name} ({})", self.position),
            None => write!(f, "in <anonymous fn> ({})", self.position),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    #[error("undefined variable `{name}`")]
    UndefinedVariable { name: String },

    /// Left side of `=` is not a bare variable.
    #[error("invalid assignment target: cannot assign to a {target} expression")]
    InvalidAssignTarget { target: &'static str },

    #[error("type error in `{context}`: expected {expected}, found {found}")]
    TypeError {
        context: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("division by zero")]
    DivideByZero,

    #[error("no method `{method}` on type {type_name}")]
    UnknownMethod {
        type_name: &'static str,
        method: String,
    },

    #[error("value of type {type_name} is not callable")]
    NotCallable { type_name: &'static str },

    #[error("maximum call depth of {depth} exceeded")]
    StackOverflow { depth: usize },
}

impl EvalError {
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            position: None,
            backtrace: Vec::new(),
        }
    }

    /// Attach a position unless a more precise one is already set.
    #[must_use]
    pub fn at(mut self, position: Position) -> Self {
        self.position.get_or_insert(position);
        self
    }

    /// Record that the error unwound through a closure frame.
    #[must_use]
    pub fn in_frame(mut self, frame: Frame) -> Self {
        self.backtrace.push(frame);
        self
    }
}

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_owned(),
    })
}

#[cold]
pub fn invalid_assign_target(target: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidAssignTarget { target })
}

/// `context` names the operator or builtin that rejected the value.
#[cold]
pub fn type_error(context: &str, expected: &'static str, found: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeError {
        context: context.to_owned(),
        expected,
        found: found.type_name(),
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivideByZero)
}

#[cold]
pub fn unknown_method(type_name: &'static str, method: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownMethod {
        type_name,
        method: method.to_owned(),
    })
}

#[cold]
pub fn not_callable(value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: value.type_name(),
    })
}

#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_keeps_innermost_position() {
        let err = division_by_zero()
            .at(Position::new(3, 7))
            .at(Position::new(1, 1));
        assert_eq!(err.position, Some(Position::new(3, 7)));
    }

    #[test]
    fn messages() {
        assert_eq!(undefined_variable("x").to_string(), "undefined variable `x`");
        assert_eq!(
            type_error("+", "number", &Value::string("a")).to_string(),
            "type error in `+`: expected number, found string"
        );
        assert_eq!(
            not_callable(&Value::Number(1.0)).to_string(),
            "value of type number is not callable"
        );
        assert_eq!(
            unknown_method("array", "push").to_string(),
            "no method `push` on type array"
        );
    }

    #[test]
    fn frames_accumulate_innermost_first() {
        let err = stack_overflow(10)
            .in_frame(Frame {
                name: Some("inner".into()),
                position: Position::new(2, 1),
            })
            .in_frame(Frame {
                name: None,
                position: Position::new(1, 1),
            });
        assert_eq!(err.backtrace.len(), 2);
        assert_eq!(err.backtrace[0].to_string(), "in inner (2:1)");
        assert_eq!(
            err.backtrace[1].to_string(),
            "in <anonymous fn> (1:1)"
        );
    }
}
