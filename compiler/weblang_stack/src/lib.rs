//! Native stack growth for the recursive parts of Weblang.
//!
//! The parser descends once per nested expression and the evaluator once per
//! nested expression and per closure call, so a deeply recursive user program
//! maps directly onto the host call stack. Every recursive entry point runs
//! through [`ensure_sufficient_stack`], which grows the stack on demand and
//! turns the depth ceiling into a memory bound.
//!
//! On `wasm32` the wrapper is a plain call.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each freshly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if fewer than [`RED_ZONE`] bytes remain.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    enum Nested {
        Leaf(u64),
        Wrap(Box<Nested>),
    }

    fn build(depth: u64) -> Nested {
        let mut node = Nested::Leaf(depth);
        for _ in 0..depth {
            node = Nested::Wrap(Box::new(node));
        }
        node
    }

    fn depth_of(node: &Nested) -> u64 {
        ensure_sufficient_stack(|| match node {
            Nested::Leaf(_) => 0,
            Nested::Wrap(inner) => depth_of(inner) + 1,
        })
    }

    fn teardown(node: Nested) {
        // Iterative drop so the test itself does not recurse natively.
        let mut current = node;
        while let Nested::Wrap(inner) = current {
            current = *inner;
        }
    }

    #[test]
    fn walks_a_shallow_tree() {
        let tree = build(16);
        assert_eq!(depth_of(&tree), 16);
        teardown(tree);
    }

    #[test]
    fn walks_a_tree_deeper_than_the_default_stack() {
        let tree = build(200_000);
        assert_eq!(depth_of(&tree), 200_000);
        teardown(tree);
    }

    #[test]
    fn passes_results_through() {
        let result: Result<&str, u8> = ensure_sufficient_stack(|| Ok("done"));
        assert_eq!(result, Ok("done"));
    }
}
