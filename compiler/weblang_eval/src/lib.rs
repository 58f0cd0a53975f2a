//! Weblang Eval - tree-walking evaluator for Weblang programs.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Environment`: lexical scope chain of shared, mutable frames
//! - `Value`: dynamically typed runtime values; closures capture their
//!   defining environment by reference
//! - `evaluate_binary`: enum-based binary operator dispatch
//! - `TypeRegistry`: per-type method table for `receiver.method(...)` calls
//! - `PrintHandler`: output sink for the prelude builtins
//!
//! Evaluation is single-threaded. `Interpreter` carries all evaluation
//! state, so several interpreters can coexist in one process.

mod environment;
pub mod errors;
pub mod interpreter;
mod operators;
pub mod prelude;
mod print_handler;
mod type_registry;
mod value;

pub use environment::{Environment, LocalScope};
pub use errors::{EvalError, EvalErrorKind, EvalResult, Frame};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandler, SharedPrintHandler,
};
pub use type_registry::{MethodFn, TypeRegistry};
pub use value::{Builtin, BuiltinFn, Closure, Value};
