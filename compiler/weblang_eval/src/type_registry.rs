//! Per-type method registry.
//!
//! Maps a runtime type tag (see [`Value::type_name`]) to its methods. A
//! method takes the receiver and arguments and returns the receiver's new
//! value; the evaluator stores that value back into the receiver variable.

use rustc_hash::FxHashMap;

use crate::errors::{type_error, unknown_method};
use crate::{EvalResult, Value};

/// Method implementation: `(receiver, args) -> new receiver value`.
pub type MethodFn = fn(&Value, &[Value]) -> EvalResult;

#[derive(Clone, Default)]
pub struct TypeRegistry {
    types: FxHashMap<&'static str, FxHashMap<String, MethodFn>>,
}

impl TypeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the standard methods:
    /// - `array.add(...items)` appends items
    /// - `array.pop()` drops the last element
    /// - `string.append(...parts)` appends the display form of each part
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_method("array", "add", array_add);
        registry.register_method("array", "pop", array_pop);
        registry.register_method("string", "append", string_append);
        registry
    }

    /// Register or replace a method.
    pub fn register_method(&mut self, type_name: &'static str, method: &str, func: MethodFn) {
        self.types
            .entry(type_name)
            .or_default()
            .insert(method.to_owned(), func);
    }

    pub fn has_method(&self, type_name: &str, method: &str) -> bool {
        self.lookup(type_name, method).is_some()
    }

    pub fn lookup(&self, type_name: &str, method: &str) -> Option<MethodFn> {
        self.types.get(type_name)?.get(method).copied()
    }

    /// Call `method` on `receiver`, dispatching on the receiver's type.
    pub fn invoke(&self, receiver: &Value, method: &str, args: &[Value]) -> EvalResult {
        let type_name = receiver.type_name();
        let func = self
            .lookup(type_name, method)
            .ok_or_else(|| unknown_method(type_name, method))?;
        tracing::debug!(type_name, method, args = args.len(), "method dispatch");
        func(receiver, args)
    }

    /// Sorted method names for a type.
    pub fn methods_of(&self, type_name: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .types
            .get(type_name)
            .map(|methods| methods.keys().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }
}

fn array_add(receiver: &Value, args: &[Value]) -> EvalResult {
    let Value::Array(items) = receiver else {
        return Err(type_error("add", "array", receiver));
    };
    let mut extended = Vec::with_capacity(items.len() + args.len());
    extended.extend(items.iter().cloned());
    extended.extend(args.iter().cloned());
    Ok(Value::array(extended))
}

fn array_pop(receiver: &Value, _args: &[Value]) -> EvalResult {
    let Value::Array(items) = receiver else {
        return Err(type_error("pop", "array", receiver));
    };
    let keep = items.len().saturating_sub(1);
    Ok(Value::array(items[..keep].to_vec()))
}

fn string_append(receiver: &Value, args: &[Value]) -> EvalResult {
    let Value::Str(s) = receiver else {
        return Err(type_error("append", "string", receiver));
    };
    let mut out = String::from(&**s);
    for arg in args {
        out.push_str(&arg.to_string());
    }
    Ok(Value::string(out))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::errors::EvalErrorKind;

    fn nums(ns: &[f64]) -> Value {
        Value::array(ns.iter().map(|n| Value::Number(*n)).collect())
    }

    #[test]
    fn defaults_are_registered() {
        let registry = TypeRegistry::with_defaults();
        assert!(registry.has_method("array", "add"));
        assert!(registry.has_method("string", "append"));
        assert!(!registry.has_method("number", "add"));
        assert_eq!(registry.methods_of("array"), vec!["add", "pop"]);
        assert!(registry.methods_of("bool").is_empty());
    }

    #[test]
    fn add_appends_without_touching_the_original() {
        let registry = TypeRegistry::with_defaults();
        let original = nums(&[1.0]);
        let result = registry
            .invoke(&original, "add", &[Value::Number(2.0), Value::Number(3.0)])
            .unwrap();
        assert_eq!(result, nums(&[1.0, 2.0, 3.0]));
        assert_eq!(original, nums(&[1.0]));
    }

    #[test]
    fn pop_on_empty_array_is_empty() {
        let registry = TypeRegistry::with_defaults();
        assert_eq!(registry.invoke(&nums(&[1.0, 2.0]), "pop", &[]).unwrap(), nums(&[1.0]));
        assert_eq!(registry.invoke(&nums(&[]), "pop", &[]).unwrap(), nums(&[]));
    }

    #[test]
    fn append_uses_display_form() {
        let registry = TypeRegistry::with_defaults();
        let result = registry
            .invoke(&Value::string("n="), "append", &[Value::Number(4.0)])
            .unwrap();
        assert_eq!(result, Value::string("n=4"));
    }

    #[test]
    fn unknown_method_reports_type() {
        let registry = TypeRegistry::with_defaults();
        let err = registry
            .invoke(&Value::Number(1.0), "add", &[])
            .unwrap_err();
        assert_eq!(
            err.kind,
            EvalErrorKind::UnknownMethod {
                type_name: "number",
                method: "add".into()
            }
        );
    }

    #[test]
    fn registration_replaces() {
        fn zero(_: &Value, _: &[Value]) -> EvalResult {
            Ok(Value::Number(0.0))
        }
        let mut registry = TypeRegistry::with_defaults();
        registry.register_method("array", "add", zero);
        registry.register_method("number", "reset", zero);
        assert_eq!(
            registry.invoke(&nums(&[1.0]), "add", &[]).unwrap(),
            Value::Number(0.0)
        );
        assert_eq!(
            registry.invoke(&Value::Number(9.0), "reset", &[]).unwrap(),
            Value::Number(0.0)
        );
    }
}
