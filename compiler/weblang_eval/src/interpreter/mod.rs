//! Tree-walking interpreter.
//!
//! [`Interpreter`] is the evaluation context: it owns the global
//! environment, the method registry and the print handler, and is passed
//! by reference through every evaluation step and builtin call. There is
//! no global state.

mod builder;

use std::cell::Cell;
use std::rc::Rc;

use weblang_ir::{Expr, ExprKind, LetBinding};
use weblang_stack::ensure_sufficient_stack;

use crate::errors::{invalid_assign_target, not_callable, stack_overflow, Frame};
use crate::operators::evaluate_binary;
use crate::value::Closure;
use crate::{Environment, EvalResult, SharedPrintHandler, TypeRegistry, Value};

pub use builder::InterpreterBuilder;

pub struct Interpreter {
    global: Environment,
    types: TypeRegistry,
    print_handler: SharedPrintHandler,
    /// Closure call limit; `None` leaves only the memory bound.
    max_call_depth: Option<usize>,
    call_depth: Cell<usize>,
}

/// Decrements the call depth when a closure call returns or unwinds.
struct CallGuard<'a>(&'a Cell<usize>);

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

impl Interpreter {
    /// An interpreter with the prelude, default methods and stdout output.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub fn global(&self) -> &Environment {
        &self.global
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn types_mut(&mut self) -> &mut TypeRegistry {
        &mut self.types
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Evaluate a parsed program in the global environment.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn eval_program(&self, program: &Expr) -> EvalResult {
        self.evaluate(program, &self.global)
    }

    /// Evaluate `expr` in `env`.
    ///
    /// Errors carry the position of the innermost failing expression.
    pub fn evaluate(&self, expr: &Expr, env: &Environment) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(expr, env)).map_err(|err| err.at(expr.position))
    }

    fn eval_inner(&self, expr: &Expr, env: &Environment) -> EvalResult {
        match &expr.kind {
            ExprKind::Number(n) => Ok(Value::Number(*n)),
            ExprKind::Str(s) => Ok(Value::string(s.as_str())),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Array(items) => Ok(Value::array(self.eval_all(items, env)?)),
            ExprKind::Var(name) => env.get(name),

            ExprKind::Let { name, init } => {
                let value = self.eval_optional(init.as_deref(), env)?;
                env.define(name.as_str(), value.clone());
                Ok(value)
            }
            ExprKind::LetIn { bindings, body } => self.eval_let_in(bindings, body, env),

            ExprKind::Assign { target, value } => {
                let ExprKind::Var(name) = &target.kind else {
                    return Err(invalid_assign_target(target.kind.name()).at(target.position));
                };
                let value = self.evaluate(value, env)?;
                env.set(name, value)
            }

            ExprKind::Binary { op, left, right } => {
                let left = self.evaluate(left, env)?;
                let right = self.evaluate(right, env)?;
                evaluate_binary(*op, left, right)
            }

            ExprKind::Lambda(def) => Ok(Value::closure(Rc::clone(def), env.clone())),

            ExprKind::Call { callee, args } => {
                let callee = self.evaluate(callee, env)?;
                let args = self.eval_all(args, env)?;
                self.call(&callee, &args)
            }

            ExprKind::MethodCall {
                receiver,
                method,
                args,
            } => {
                let current = env.get(receiver)?;
                let args = self.eval_all(args, env)?;
                let updated = self.types.invoke(&current, method, &args)?;
                env.set(receiver, updated)
            }

            ExprKind::If {
                cond,
                then_branch,
                else_if,
                else_branch,
            } => {
                if self.evaluate(cond, env)?.is_truthy() {
                    self.evaluate(then_branch, env)
                } else if let Some(chained) = else_if {
                    self.evaluate(chained, env)
                } else if let Some(else_branch) = else_branch {
                    self.evaluate(else_branch, env)
                } else {
                    Ok(Value::Bool(false))
                }
            }

            ExprKind::Block(stmts) => {
                let mut last = Value::Bool(false);
                for stmt in stmts {
                    last = self.evaluate(stmt, env)?;
                }
                Ok(last)
            }
        }
    }

    fn eval_all(&self, exprs: &[Expr], env: &Environment) -> Result<Vec<Value>, crate::EvalError> {
        exprs.iter().map(|e| self.evaluate(e, env)).collect()
    }

    /// Evaluate an initializer, defaulting to `false`.
    fn eval_optional(&self, init: Option<&Expr>, env: &Environment) -> EvalResult {
        match init {
            Some(init) => self.evaluate(init, env),
            None => Ok(Value::Bool(false)),
        }
    }

    /// Each binding gets its own frame; its initializer sees the frames of
    /// the bindings before it.
    fn eval_let_in(&self, bindings: &[LetBinding], body: &Expr, env: &Environment) -> EvalResult {
        let mut scope = env.clone();
        for binding in bindings {
            let value = self.eval_optional(binding.init.as_ref(), &scope)?;
            scope = scope.extend();
            scope.define(binding.name.as_str(), value);
        }
        self.evaluate(body, &scope)
    }

    /// Call a function value with already-evaluated arguments.
    pub fn call(&self, callee: &Value, args: &[Value]) -> EvalResult {
        match callee {
            Value::Closure(closure) => self.call_closure(closure, args),
            Value::Builtin(builtin) => {
                tracing::trace!(name = builtin.name, args = args.len(), "builtin call");
                (builtin.func)(self, args)
            }
            other => Err(not_callable(other)),
        }
    }

    /// Missing arguments are `false`; extra arguments are ignored.
    ///
    /// A named lambda sees itself under its name in each invocation frame.
    /// Parameters are bound afterwards and shadow it.
    fn call_closure(&self, closure: &Rc<Closure>, args: &[Value]) -> EvalResult {
        let _guard = self.enter_call()?;
        let def = &closure.def;
        tracing::trace!(name = ?def.name, args = args.len(), "closure call");

        let frame = closure.env.extend();
        if let Some(name) = &def.name {
            frame.define(name.as_str(), Value::Closure(Rc::clone(closure)));
        }
        for (i, param) in def.params.iter().enumerate() {
            let arg = args.get(i).cloned().unwrap_or(Value::Bool(false));
            frame.define(param.as_str(), arg);
        }
        self.evaluate(&def.body, &frame).map_err(|err| {
            err.in_frame(Frame {
                name: def.name.clone(),
                position: def.body.position,
            })
        })
    }

    fn enter_call(&self) -> Result<CallGuard<'_>, crate::EvalError> {
        let depth = self.call_depth.get();
        if let Some(max) = self.max_call_depth {
            if depth >= max {
                return Err(stack_overflow(max));
            }
        }
        self.call_depth.set(depth + 1);
        Ok(CallGuard(&self.call_depth))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
