//! Lexical scope chain.
//!
//! Each [`Environment`] is a shared handle to one [`Scope`] frame, which
//! points at its parent. Closures hold a handle to the frame they were
//! created in, so a frame lives as long as any closure or active call that
//! can still see it.
//!
//! `define` writes only to the current frame (shadowing). `get` and `set`
//! walk toward the root and act on the nearest frame that binds the name.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use weblang_stack::ensure_sufficient_stack;

use crate::errors::{undefined_variable, EvalError};
use crate::Value;

/// Single-threaded shared, mutable cell for scope frames.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    /// Whether both handles point at the same frame.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// One frame of bindings.
#[derive(Default)]
pub struct Scope {
    bindings: FxHashMap<String, Value>,
    parent: Option<Environment>,
}

// Frames chain through parents and through closures held in bindings, so
// releasing the last handle to a long chain recurses once per frame.
impl Drop for Scope {
    fn drop(&mut self) {
        let bindings = std::mem::take(&mut self.bindings);
        let parent = self.parent.take();
        ensure_sufficient_stack(move || drop((bindings, parent)));
    }
}

/// Handle to a scope frame.
#[derive(Clone)]
pub struct Environment(LocalScope<Scope>);

impl Environment {
    /// A root frame with no parent.
    pub fn global() -> Self {
        Environment(LocalScope::new(Scope::default()))
    }

    /// A new empty child frame.
    #[must_use]
    pub fn extend(&self) -> Self {
        Environment(LocalScope::new(Scope {
            bindings: FxHashMap::default(),
            parent: Some(self.clone()),
        }))
    }

    pub fn parent(&self) -> Option<Environment> {
        self.0.borrow().parent.clone()
    }

    /// Bind `name` in this frame, replacing any binding already here.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().bindings.insert(name.into(), value);
    }

    /// Nearest binding of `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let mut frame = self.clone();
        loop {
            let parent = {
                let scope = frame.0.borrow();
                if let Some(value) = scope.bindings.get(name) {
                    return Some(value.clone());
                }
                scope.parent.clone()
            };
            frame = parent?;
        }
    }

    pub fn get(&self, name: &str) -> Result<Value, EvalError> {
        self.lookup(name).ok_or_else(|| undefined_variable(name))
    }

    /// Overwrite the nearest binding of `name` and return the stored value.
    ///
    /// Fails if no frame in the chain binds `name`; assignment never
    /// creates a binding.
    pub fn set(&self, name: &str, value: Value) -> Result<Value, EvalError> {
        let mut frame = self.clone();
        loop {
            let parent = {
                let mut scope = frame.0.borrow_mut();
                if let Some(slot) = scope.bindings.get_mut(name) {
                    *slot = value.clone();
                    return Ok(value);
                }
                scope.parent.clone()
            };
            frame = parent.ok_or_else(|| undefined_variable(name))?;
        }
    }

    /// Whether this frame itself binds `name`.
    pub fn defines_locally(&self, name: &str) -> bool {
        self.0.borrow().bindings.contains_key(name)
    }

    /// Number of frames from here to the root, counting both ends.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut frame = self.parent();
        while let Some(env) = frame {
            depth += 1;
            frame = env.parent();
        }
        depth
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

// Bindings can hold closures that point back at this frame; print names only.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.0.borrow();
        let mut names: Vec<&str> = scope.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Environment")
            .field("bindings", &names)
            .field("depth", &self.depth())
            .finish()
    }
}
