//! Evaluation context tag.

/// The caller's expected result shape.
///
/// Threaded explicitly into coercion and match operations; never read from
/// ambient state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Context {
    /// Result is discarded.
    Void,
    /// A single value is expected.
    #[default]
    Scalar,
    /// A sequence of values is expected.
    List,
}

impl Context {
    /// Returns `true` for list context.
    #[inline]
    pub fn is_list(self) -> bool {
        matches!(self, Context::List)
    }
}
