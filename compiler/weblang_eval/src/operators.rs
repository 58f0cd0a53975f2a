//! Binary operator semantics.
//!
//! Both operands are already evaluated; `&&` and `||` do not short-circuit.
//! Arithmetic and ordering take numbers only, with no coercion.

use weblang_ir::BinaryOp;

use crate::errors::{division_by_zero, type_error, EvalError};
use crate::{EvalResult, Value};

pub fn evaluate_binary(op: BinaryOp, left: Value, right: Value) -> EvalResult {
    match op {
        BinaryOp::And => Ok(if left.is_truthy() {
            right
        } else {
            Value::Bool(false)
        }),
        BinaryOp::Or => Ok(if left.is_truthy() { left } else { right }),

        BinaryOp::Eq => Ok(Value::Bool(left.loose_eq(&right))),
        BinaryOp::NotEq => Ok(Value::Bool(!left.loose_eq(&right))),
        BinaryOp::StrictEq => Ok(Value::Bool(left.strict_eq(&right))),
        BinaryOp::StrictNotEq => Ok(Value::Bool(!left.strict_eq(&right))),

        BinaryOp::Lt => compare(op, &left, &right, |a, b| a < b),
        BinaryOp::Gt => compare(op, &left, &right, |a, b| a > b),
        BinaryOp::LtEq => compare(op, &left, &right, |a, b| a <= b),
        BinaryOp::GtEq => compare(op, &left, &right, |a, b| a >= b),

        BinaryOp::Add => arithmetic(op, &left, &right, |a, b| Ok(a + b)),
        BinaryOp::Sub => arithmetic(op, &left, &right, |a, b| Ok(a - b)),
        BinaryOp::Mul => arithmetic(op, &left, &right, |a, b| Ok(a * b)),
        BinaryOp::Div => arithmetic(op, &left, &right, |a, b| Ok(a / nonzero(b)?)),
        BinaryOp::Mod => arithmetic(op, &left, &right, |a, b| Ok(a % nonzero(b)?)),
    }
}

fn numbers(op: BinaryOp, left: &Value, right: &Value) -> Result<(f64, f64), EvalError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        (Value::Number(_), other) | (other, _) => {
            Err(type_error(op.as_symbol(), "number", other))
        }
    }
}

fn arithmetic(
    op: BinaryOp,
    left: &Value,
    right: &Value,
    f: impl FnOnce(f64, f64) -> Result<f64, EvalError>,
) -> EvalResult {
    let (a, b) = numbers(op, left, right)?;
    f(a, b).map(Value::Number)
}

fn compare(
    op: BinaryOp,
    left: &Value,
    right: &Value,
    f: impl FnOnce(f64, f64) -> bool,
) -> EvalResult {
    let (a, b) = numbers(op, left, right)?;
    Ok(Value::Bool(f(a, b)))
}

#[inline]
fn nonzero(b: f64) -> Result<f64, EvalError> {
    if b == 0.0 {
        Err(division_by_zero())
    } else {
        Ok(b)
    }
}
