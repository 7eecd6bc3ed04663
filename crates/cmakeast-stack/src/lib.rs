//! Stack growth for deep trees
//!
//! The parser, the traversal and JSON re-import each recurse once per
//! nesting level of the script. Wrapping every level in
//! [`ensure_sufficient_stack`] bounds the depth they accept by memory
//! rather than by the thread's stack size.

/// Grow when less than this much stack is left
const MIN_REMAINING: usize = 128 * 1024;

/// Size of each newly allocated stack segment
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f` on the current stack, or on a fresh segment when the current
/// one is nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(MIN_REMAINING, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
