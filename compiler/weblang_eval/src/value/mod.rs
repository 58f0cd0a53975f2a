//! Runtime values.
//!
//! Numbers are `f64`. Strings and arrays are immutable and shared behind
//! `Rc`; array "mutation" through a method produces a new array that is
//! stored back into the receiver's binding.
//!
//! # Equality
//!
//! [`Value::loose_eq`] backs `==` and the `PartialEq` impl: values of
//! different types are never equal, arrays compare element-wise, functions
//! compare by identity. [`Value::strict_eq`] backs `===` and additionally
//! compares arrays by identity.

use std::fmt;
use std::rc::Rc;

use weblang_ir::LambdaDef;

use crate::{EvalResult, Environment, Interpreter};

/// Native function signature for builtins.
pub type BuiltinFn = fn(&Interpreter, &[Value]) -> EvalResult;

/// A Weblang value.
#[derive(Clone)]
pub enum Value {
    Number(f64),
    Str(Rc<str>),
    Bool(bool),
    Array(Rc<Vec<Value>>),
    Closure(Rc<Closure>),
    Builtin(Builtin),
}

/// A lambda together with the environment it was created in.
pub struct Closure {
    pub def: Rc<LambdaDef>,
    pub env: Environment,
}

/// A host function exposed under a name.
#[derive(Copy, Clone)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl Value {
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(items))
    }

    pub fn closure(def: Rc<LambdaDef>, env: Environment) -> Self {
        Value::Closure(Rc::new(Closure { def, env }))
    }

    pub const fn builtin(name: &'static str, func: BuiltinFn) -> Self {
        Value::Builtin(Builtin { name, func })
    }

    /// Runtime type tag, also the key into the method registry.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::Array(_) => "array",
            Value::Closure(_) | Value::Builtin(_) => "function",
        }
    }

    /// Only `false` is falsy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Bool(false))
    }

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => {
                Rc::ptr_eq(a, b)
                    || (a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.loose_eq(y)))
            }
            _ => self.strict_eq(other),
        }
    }

    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,
            _ => false,
        }
    }

    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{:?}", &**s),
            other => fmt::Display::fmt(other, f),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.loose_eq(other)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        // f64's Display already drops a zero fraction: 55.0 prints as 55.
        write!(f, "{n}")
    }
}

/// The form `print` writes: strings raw, nested strings quoted.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => fmt_number(*n, f),
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt_nested(f)?;
                }
                f.write_str("]")
            }
            Value::Closure(c) => match &c.def.name {
                Some(name) => write!(f, "<fn {name}>"),
                None => f.write_str("<fn>"),
            },
            Value::Builtin(b) => write!(f, "<builtin {}>", b.name),
        }
    }
}

// Closures can reach themselves through their environment, so Debug never
// descends into captured scopes.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Array(items) => f.debug_tuple("Array").field(items).finish(),
            Value::Closure(c) => fmt::Debug::fmt(&**c, f),
            Value::Builtin(b) => write!(f, "Builtin({})", b.name),
        }
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("name", &self.def.name)
            .field("params", &self.def.params)
            .finish_non_exhaustive()
    }
}
