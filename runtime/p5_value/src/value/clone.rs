//! Depth-bounded copying.

use p5_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;
use tracing::trace;

use super::{ArrayBody, GlobBody, HashBody, Scalar, ScalarBody, Shared, Value};

/// Copies made so far in one `clone_depth` call, keyed by original identity.
type Visited = FxHashMap<usize, Value>;

impl Value {
    /// Copy this value, following at most `depth` reference hops.
    ///
    /// The receiver's own body is always copied, including the element cells
    /// of an array or hash. Each reference followed costs one level; once
    /// `depth` is spent the copy shares the referent with the original.
    /// `clone_depth(usize::MAX)` is a full deep copy.
    ///
    /// A body reached twice is copied once, so shared substructure stays
    /// shared and cyclic data terminates. Copies keep their class; match
    /// positions are not copied.
    pub fn clone_depth(&self, depth: usize) -> Value {
        let mut visited = Visited::default();
        copy_value(self, depth, &mut visited)
    }
}

fn copy_value(value: &Value, depth: usize, visited: &mut Visited) -> Value {
    if let Some(copy) = visited.get(&value.addr()) {
        return copy.clone();
    }
    trace!(kind = %value.kind(), depth, "clone visit");

    ensure_sufficient_stack(|| match value {
        Value::Scalar(body) => {
            let (datum, blessed) = {
                let body = body.borrow();
                (body.datum.clone(), body.blessed)
            };
            let copy_body = Shared::new(ScalarBody {
                datum: Scalar::Undef,
                blessed,
                pos: None,
            });
            let copy = register(value, Value::Scalar(copy_body.clone()), visited);
            let datum = match datum {
                Scalar::Ref(target) if depth > 0 => {
                    Scalar::Ref(copy_value(&target, depth - 1, visited))
                }
                other => other,
            };
            copy_body.borrow_mut().datum = datum;
            copy
        }
        Value::Array(body) => {
            let (cells, blessed) = {
                let body = body.borrow();
                (body.items.clone(), body.blessed)
            };
            let copy_body = Shared::new(ArrayBody {
                items: Vec::with_capacity(cells.len()),
                blessed,
            });
            let copy = register(value, Value::Array(copy_body.clone()), visited);
            let items = cells
                .iter()
                .map(|cell| copy_value(cell, depth, visited))
                .collect();
            copy_body.borrow_mut().items = items;
            copy
        }
        Value::Hash(body) => {
            let (entries, blessed) = {
                let body = body.borrow();
                let entries: Vec<(String, Value)> = body
                    .entries
                    .iter()
                    .map(|(key, cell)| (key.clone(), cell.clone()))
                    .collect();
                (entries, body.blessed)
            };
            let copy_body = Shared::new(HashBody {
                entries: FxHashMap::default(),
                blessed,
            });
            let copy = register(value, Value::Hash(copy_body.clone()), visited);
            for (key, cell) in entries {
                let cell = copy_value(&cell, depth, visited);
                copy_body.borrow_mut().entries.insert(key, cell);
            }
            copy
        }
        Value::Code(body) => {
            let copy = Value::Code(Shared::new(body.borrow().clone()));
            register(value, copy, visited)
        }
        Value::Glob(body) => {
            let copy = {
                let body = body.borrow();
                GlobBody {
                    package: body.package.clone(),
                    name: body.name.clone(),
                    slots: body.slots.clone(),
                    blessed: body.blessed,
                }
            };
            register(value, Value::Glob(Shared::new(copy)), visited)
        }
        Value::Handle(body) => {
            let copy = Value::Handle(Shared::new(body.borrow().clone()));
            register(value, copy, visited)
        }
        Value::Regex(body) => {
            let copy = Value::Regex(Shared::new(body.borrow().clone()));
            register(value, copy, visited)
        }
    })
}

fn register(original: &Value, copy: Value, visited: &mut Visited) -> Value {
    visited.insert(original.addr(), copy.clone());
    copy
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
