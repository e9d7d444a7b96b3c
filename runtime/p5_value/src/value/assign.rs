//! List assignment and `undef $x`.

use tracing::trace;

use super::{Coercible, Scalar, Value};
use crate::errors::{ValueError, ValueResult};
use crate::runtime::{Runtime, Warning};

impl Value {
    /// Assign a flattened list to this value and return how many elements
    /// were consumed.
    ///
    /// A scalar keeps the last element (undef for an empty list). An array
    /// is refilled with fresh element cells. A hash takes key/value pairs;
    /// an odd trailing key maps to undef. The list is read completely
    /// before the receiver changes, so `@a = (@a, 1)` sees the old content.
    pub fn assign_iter(
        &self,
        rt: &Runtime,
        items: impl IntoIterator<Item = Value>,
    ) -> ValueResult<usize> {
        let data: Vec<Scalar> = items.into_iter().map(|item| item.scalar_content()).collect();
        let consumed = data.len();
        trace!(kind = %self.kind(), consumed, "list assignment");

        match self {
            Value::Scalar(body) => {
                let last = data.into_iter().next_back().unwrap_or_default();
                body.borrow_mut().assign(last);
            }
            Value::Array(body) => {
                let cells = data.into_iter().map(Value::scalar).collect();
                body.borrow_mut().items = cells;
            }
            Value::Hash(body) => {
                if consumed % 2 == 1 {
                    rt.warn(Warning::OddHashAssignment);
                }
                let mut pairs = Vec::with_capacity(consumed / 2 + 1);
                let mut data = data.into_iter();
                while let Some(key) = data.next() {
                    let key = key.as_string(rt);
                    pairs.push((key, data.next().unwrap_or_default()));
                }
                let mut body = body.borrow_mut();
                body.entries.clear();
                for (key, datum) in pairs {
                    body.insert(key, datum);
                }
            }
            other => {
                return Err(ValueError::CannotAssignList {
                    found: other.kind(),
                })
            }
        }
        Ok(consumed)
    }

    /// Reset to the undefined scalar state.
    ///
    /// A scalar cell is cleared in place, so every alias observes the undef
    /// and the cell keeps its class. Any other kind is rebound to a fresh
    /// undefined scalar; its old body lives on wherever else it is held.
    pub fn undefine(&mut self) {
        match self {
            Value::Scalar(body) => body.borrow_mut().assign(Scalar::Undef),
            other => *other = Value::undef(),
        }
    }
}
