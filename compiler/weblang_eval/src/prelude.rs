//! Builtins defined in the global environment.
//!
//! | name | behavior |
//! |---|---|
//! | `print(v)` | write `v` with no newline |
//! | `println(v)` | write `v` and a newline |
//! | `time(thunk)` | call `thunk()`, write `Time: <ms>ms`, return its result |
//! | `fib(n)` | native recursive Fibonacci, for comparison with interpreted code |
//!
//! Missing arguments are `false`, as for closures.

use std::time::Instant;

use crate::errors::type_error;
use crate::{Environment, EvalResult, Interpreter, Value};

/// Name and entry point of every prelude builtin.
pub const BUILTINS: &[(&str, crate::BuiltinFn)] = &[
    ("print", print),
    ("println", println),
    ("time", time),
    ("fib", fib),
];

/// Define every prelude builtin in `env`.
pub fn register(env: &Environment) {
    for &(name, func) in BUILTINS {
        env.define(name, Value::builtin(name, func));
    }
}

fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or(Value::Bool(false))
}

fn print(interp: &Interpreter, args: &[Value]) -> EvalResult {
    interp.print_handler().print(&arg(args, 0).to_string());
    Ok(Value::Bool(false))
}

fn println(interp: &Interpreter, args: &[Value]) -> EvalResult {
    interp.print_handler().println(&arg(args, 0).to_string());
    Ok(Value::Bool(false))
}

fn time(interp: &Interpreter, args: &[Value]) -> EvalResult {
    let start = Instant::now();
    let result = interp.call(&arg(args, 0), &[])?;
    let elapsed = start.elapsed();
    tracing::debug!(?elapsed, "time");
    interp
        .print_handler()
        .println(&format!("Time: {}ms", elapsed.as_millis()));
    Ok(result)
}

fn fib(_interp: &Interpreter, args: &[Value]) -> EvalResult {
    fn fib_native(n: f64) -> f64 {
        if n < 2.0 {
            n
        } else {
            fib_native(n - 1.0) + fib_native(n - 2.0)
        }
    }

    let n = arg(args, 0);
    let n = n.as_number().ok_or_else(|| type_error("fib", "number", &n))?;
    Ok(Value::Number(fib_native(n)))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::{buffer_handler, errors::EvalErrorKind};

    fn interp() -> Interpreter {
        Interpreter::builder().print_handler(buffer_handler()).build()
    }

    fn call(interp: &Interpreter, name: &str, args: &[Value]) -> EvalResult {
        let func = interp.global().get(name).unwrap();
        interp.call(&func, args)
    }

    #[test]
    fn all_builtins_are_defined() {
        let interp = interp();
        for (name, _) in BUILTINS {
            assert_eq!(interp.global().get(name).unwrap().type_name(), "function");
        }
    }

    #[test]
    fn print_and_println() {
        let interp = interp();
        call(&interp, "print", &[Value::Number(1.0)]).unwrap();
        call(&interp, "print", &[Value::string(" and ")]).unwrap();
        let result = call(&interp, "println", &[Value::array(vec![Value::Bool(true)])]).unwrap();
        assert_eq!(result, Value::Bool(false));
        assert_eq!(interp.print_handler().output(), "1 and [true]\n");
    }

    #[test]
    fn println_without_argument_prints_false() {
        let interp = interp();
        call(&interp, "println", &[]).unwrap();
        assert_eq!(interp.print_handler().output(), "false\n");
    }

    #[test]
    fn time_returns_thunk_result() {
        let interp = interp();
        let thunk = Value::builtin("answer", |_, _| Ok(Value::Number(42.0)));
        let result = call(&interp, "time", &[thunk]).unwrap();
        assert_eq!(result, Value::Number(42.0));
        let output = interp.print_handler().output();
        assert!(output.starts_with("Time: "), "{output}");
        assert!(output.ends_with("ms\n"), "{output}");
    }

    #[test]
    fn time_requires_a_function() {
        let interp = interp();
        let err = call(&interp, "time", &[Value::Number(1.0)]).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::NotCallable { type_name: "number" });
    }

    #[test]
    fn fib_matches_sequence() {
        let interp = interp();
        let values: Vec<_> = (0..=10)
            .map(|n| call(&interp, "fib", &[Value::Number(f64::from(n))]).unwrap())
            .collect();
        let expected: Vec<_> = [0.0, 1.0, 1.0, 2.0, 3.0, 5.0, 8.0, 13.0, 21.0, 34.0, 55.0]
            .into_iter()
            .map(Value::Number)
            .collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn fib_rejects_non_numbers() {
        let interp = interp();
        let err = call(&interp, "fib", &[Value::string("ten")]).unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::TypeError { .. }));
    }
}
