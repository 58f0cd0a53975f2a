#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use weblang_parse::parse;

use super::*;
use crate::errors::EvalErrorKind;
use crate::{buffer_handler, EvalError};

fn interp() -> Interpreter {
    Interpreter::builder().print_handler(buffer_handler()).build()
}

fn eval_in(interp: &Interpreter, source: &str) -> EvalResult {
    let program = parse(source).unwrap();
    interp.eval_program(&program)
}

fn eval(source: &str) -> Value {
    eval_in(&interp(), source).unwrap()
}

fn eval_err(source: &str) -> EvalError {
    eval_in(&interp(), source).unwrap_err()
}

fn num(n: f64) -> Value {
    Value::Number(n)
}

#[test]
fn test_literals() {
    assert_eq!(eval("42"), num(42.0));
    assert_eq!(eval("\"hi\""), Value::string("hi"));
    assert_eq!(eval("true"), Value::Bool(true));
    assert_eq!(eval("[1, 2]"), Value::array(vec![num(1.0), num(2.0)]));
}

#[test]
fn test_empty_program_is_false() {
    assert_eq!(eval(""), Value::Bool(false));
    assert_eq!(eval("{}"), Value::Bool(false));
}

#[test]
fn test_block_yields_last_statement() {
    assert_eq!(eval("1; 2; 3"), num(3.0));
    assert_eq!(eval("{ 1; 2 }"), num(2.0));
}

#[test]
fn test_arithmetic_precedence() {
    assert_eq!(eval("1 + 2 * 3"), num(7.0));
    assert_eq!(eval("(1 + 2) * 3"), num(9.0));
    assert_eq!(eval("10 - 4 - 3"), num(3.0));
}

#[test]
fn test_let_returns_bound_value() {
    assert_eq!(eval("let x = 3"), num(3.0));
    assert_eq!(eval("let x"), Value::Bool(false));
    assert_eq!(eval("let x; x = 4"), num(4.0));
}

#[test]
fn test_let_in_sees_earlier_bindings() {
    assert_eq!(eval("let (a = 1, b = a + 1) b"), num(2.0));
    assert_eq!(eval("let (a) a"), Value::Bool(false));
}

#[test]
fn test_let_in_does_not_leak() {
    let err = eval_err("let (a = 1) a; a");
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable { name: "a".into() }
    );
}

#[test]
fn test_recursive_function_definition() {
    let source = "
        let fib(n) = if n < 2 then n else fib(n - 1) + fib(n - 2);
        fib(10)
    ";
    assert_eq!(eval(source), num(55.0));
}

#[test]
fn test_anonymous_lambda_is_named_by_let() {
    let source = "
        let count = fn(n) if n == 0 then 0 else 1 + count(n - 1);
        count(5)
    ";
    assert_eq!(eval(source), num(5.0));
}

#[test]
fn test_named_let_loop() {
    let source = "let loop(i = 0, acc = 0) if i < 5 then loop(i + 1, acc + i) else acc";
    assert_eq!(eval(source), num(10.0));
}

#[test]
fn test_named_lambda_calls_itself() {
    let source = "(fn down(n) if n == 0 then \"done\" else down(n - 1))(10)";
    assert_eq!(eval(source), Value::string("done"));
}

#[test]
fn test_param_shadows_lambda_name() {
    assert_eq!(eval("(fn f(f) f)(7)"), num(7.0));
}

#[test]
fn test_named_closure_freed_with_last_handle() {
    let interp = interp();
    let value = eval_in(&interp, "let make = fn() fn helper(x) x; make()").unwrap();
    let Value::Closure(closure) = value else {
        panic!("expected a closure");
    };
    assert_eq!(closure.def.name.as_deref(), Some("helper"));
    let weak = Rc::downgrade(&closure);
    drop(closure);
    assert!(weak.upgrade().is_none());
}

#[test]
fn test_named_let_loop_frees_its_closure() {
    let interp = interp();
    let value = eval_in(&interp, "let loop(i = 0) if i < 3 then loop(i + 1) else fn() i").unwrap();
    let Value::Closure(inner) = value else {
        panic!("expected a closure");
    };
    let weak = Rc::downgrade(&inner);
    drop(inner);
    assert!(weak.upgrade().is_none());
}

#[test]
fn test_else_if_chain() {
    let source = "let x = 5; if x < 3 then 1 else if x < 10 then 2 else 3";
    assert_eq!(eval(source), num(2.0));
    assert_eq!(eval("if false 1"), Value::Bool(false));
    assert_eq!(eval("if (0) \"zero is truthy\""), Value::string("zero is truthy"));
}

#[test]
fn test_assignment_requires_existing_binding() {
    let err = eval_err("x = 5");
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable { name: "x".into() }
    );
}

#[test]
fn test_assignment_updates_enclosing_scope() {
    let source = "let x = 1; let bump = fn() x = x + 1; bump(); bump(); x";
    assert_eq!(eval(source), num(3.0));
}

#[test]
fn test_invalid_assign_target() {
    let err = eval_err("1 = 2");
    assert_eq!(
        err.kind,
        EvalErrorKind::InvalidAssignTarget { target: "number" }
    );
}

#[test]
fn test_closures_capture_by_reference() {
    let source = "let x = 1; let get = fn() x; x = 2; get()";
    assert_eq!(eval(source), num(2.0));
}

#[test]
fn test_counter_closure_keeps_private_state() {
    let source = "
        let make = fn() { let n = 0; fn() n = n + 1 };
        let a = make();
        let b = make();
        a(); a(); b();
        [a(), b()]
    ";
    assert_eq!(eval(source), Value::array(vec![num(3.0), num(2.0)]));
}

#[test]
fn test_missing_arguments_are_false() {
    assert_eq!(eval("let f = fn(a, b) b; f(1)"), Value::Bool(false));
    assert_eq!(eval("let f = fn(a) a; f(1, 2, 3)"), num(1.0));
}

#[test]
fn test_method_call_rebinds_receiver() {
    assert_eq!(
        eval("let xs = [1]; xs.add(2, 3); xs"),
        Value::array(vec![num(1.0), num(2.0), num(3.0)])
    );
    assert_eq!(
        eval("let s = \"a\"; s.append(\"b\", 1)"),
        Value::string("ab1")
    );
}

#[test]
fn test_method_call_leaves_aliases_alone() {
    let source = "let xs = [1]; let ys = xs; xs.add(2); ys";
    assert_eq!(eval(source), Value::array(vec![num(1.0)]));
}

#[test]
fn test_unknown_method() {
    let err = eval_err("let n = 1; n.add(2)");
    assert_eq!(
        err.kind,
        EvalErrorKind::UnknownMethod {
            type_name: "number",
            method: "add".into()
        }
    );
}

#[test]
fn test_registered_method_is_dispatched() {
    fn double(receiver: &Value, _: &[Value]) -> EvalResult {
        Ok(Value::Number(receiver.as_number().unwrap_or(0.0) * 2.0))
    }
    let mut interp = interp();
    interp.types_mut().register_method("number", "double", double);
    assert_eq!(
        eval_in(&interp, "let n = 4; n.double(); n").unwrap(),
        num(8.0)
    );
}

#[test]
fn test_not_callable() {
    let err = eval_err("let n = 1; n(2)");
    assert_eq!(err.kind, EvalErrorKind::NotCallable { type_name: "number" });
}

#[test]
fn test_runtime_type_errors() {
    assert!(matches!(
        eval_err("\"a\" + 1").kind,
        EvalErrorKind::TypeError { .. }
    ));
    assert_eq!(eval_err("1 / 0").kind, EvalErrorKind::DivideByZero);
}

#[test]
fn test_equality() {
    assert_eq!(eval("[1, 2] == [1, 2]"), Value::Bool(true));
    assert_eq!(eval("[1] === [1]"), Value::Bool(false));
    assert_eq!(eval("let a = [1]; a === a"), Value::Bool(true));
    assert_eq!(eval("1 == \"1\""), Value::Bool(false));
}

#[test]
fn test_logical_operators_evaluate_both_sides() {
    let interp = interp();
    let result = eval_in(&interp, "false && println(\"side\")").unwrap();
    assert_eq!(result, Value::Bool(false));
    assert_eq!(interp.print_handler().output(), "side\n");
}

#[test]
fn test_println_writes_display_form() {
    let interp = interp();
    eval_in(&interp, "print(\"n = \"); println([1, \"a\", true])").unwrap();
    assert_eq!(interp.print_handler().output(), "n = [1, \"a\", true]\n");
}

#[test]
fn test_time_returns_result() {
    let interp = interp();
    assert_eq!(eval_in(&interp, "time(fn() 1 + 1)").unwrap(), num(2.0));
    assert!(interp.print_handler().output().starts_with("Time: "));
}

#[test]
fn test_globals_persist_between_programs() {
    let interp = interp();
    eval_in(&interp, "let x = 1").unwrap();
    assert_eq!(eval_in(&interp, "x + 1").unwrap(), num(2.0));
}

#[test]
fn test_interpreters_are_independent() {
    let a = interp();
    let b = interp();
    eval_in(&a, "let x = 1").unwrap();
    assert!(eval_in(&b, "x").is_err());
}

#[test]
fn test_without_prelude() {
    let interp = Interpreter::builder().without_prelude().build();
    let err = eval_in(&interp, "println(1)").unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "println".into()
        }
    );
}

#[test]
fn test_call_depth_limit() {
    let interp = Interpreter::builder()
        .print_handler(buffer_handler())
        .max_call_depth(50)
        .build();
    let err = eval_in(&interp, "let f = fn(n) f(n + 1); f(0)").unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 50 });
    assert_eq!(err.backtrace.len(), 50);

    // The depth counter unwinds with the error.
    let ok = eval_in(&interp, "let g = fn(n) if n == 0 then 0 else g(n - 1); g(40)");
    assert_eq!(ok.unwrap(), num(0.0));
}

#[test]
fn test_deep_recursion_without_limit() {
    let source = "let down(n = 5000) if n == 0 then \"done\" else down(n - 1)";
    assert_eq!(eval(source), Value::string("done"));
}

#[test]
fn test_error_position_and_backtrace() {
    let source = "let f = fn(x) {\n    x / 0\n};\nf(1)";
    let err = eval_err(source);
    assert_eq!(err.kind, EvalErrorKind::DivideByZero);
    assert_eq!(err.position.map(|p| p.line), Some(2));
    assert_eq!(err.backtrace.len(), 1);
    assert_eq!(err.backtrace[0].name.as_deref(), Some("f"));
    assert_eq!(err.backtrace[0].position.line, 2);
}

#[test]
fn test_top_level_error_has_no_backtrace() {
    let err = eval_err("let a = 1;\nlet b = a / 0");
    assert_eq!(err.position.map(|p| p.line), Some(2));
    assert!(err.backtrace.is_empty());
}
