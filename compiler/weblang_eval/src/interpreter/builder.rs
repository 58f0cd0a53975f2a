//! `InterpreterBuilder` for configuring an [`Interpreter`].

use std::cell::Cell;

use super::Interpreter;
use crate::{prelude, stdout_handler, Environment, SharedPrintHandler, TypeRegistry};

/// Builder for [`Interpreter`].
///
/// Defaults: stdout output, prelude builtins defined, standard methods
/// registered, no call-depth limit.
pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    types: Option<TypeRegistry>,
    max_call_depth: Option<usize>,
    prelude: bool,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            print_handler: None,
            types: None,
            max_call_depth: None,
            prelude: true,
        }
    }

    /// Where `print`, `println` and `time` write.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Replace the standard method registry.
    #[must_use]
    pub fn types(mut self, types: TypeRegistry) -> Self {
        self.types = Some(types);
        self
    }

    /// Fail with a stack overflow error past `depth` nested closure calls.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    /// Start from an empty global environment instead of the prelude.
    #[must_use]
    pub fn without_prelude(mut self) -> Self {
        self.prelude = false;
        self
    }

    pub fn build(self) -> Interpreter {
        let global = Environment::global();
        if self.prelude {
            prelude::register(&global);
        }
        Interpreter {
            global,
            types: self.types.unwrap_or_else(TypeRegistry::with_defaults),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            max_call_depth: self.max_call_depth,
            call_depth: Cell::new(0),
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
