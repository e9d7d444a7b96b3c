//! Stack safety for recursive walks over runtime value graphs.
//!
//! Deep copies, reference-type naming and similar traversals recurse once per
//! reference hop. User data can nest arbitrarily deep (a linked list built from
//! hash references is a common Perl idiom), so every such walk goes through
//! [`ensure_sufficient_stack`] instead of trusting the native stack.
//!
//! # Platform Support
//!
//! - **Native targets**: grows the stack on demand through `stacker`.
//! - **WASM targets**: plain call, the host manages the stack.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn copy_node(node: &Value, depth: usize) -> Value {
///     ensure_sufficient_stack(|| {
///         // recurse into the referent
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM version: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
