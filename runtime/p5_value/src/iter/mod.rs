//! Lazy traversal of container members.
//!
//! Arrays yield their element cells in index order, re-reading the length
//! on every step: growth during iteration is observed and shrinking ends it
//! early. Hashes yield key, value, key, value... over a snapshot of the keys
//! taken at creation; keys deleted mid-iteration are skipped and keys added
//! mid-iteration are not visited.

use std::vec;

use crate::errors::{ValueError, ValueResult};
use crate::value::{Kind, SharedArray, SharedHash, Value};

/// Forward-only, single-pass member sequence.
#[derive(Debug)]
pub enum Enumerator {
    Array {
        array: SharedArray,
        index: usize,
    },
    Hash {
        hash: SharedHash,
        keys: vec::IntoIter<String>,
        pending: Option<Value>,
    },
}

impl Iterator for Enumerator {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        match self {
            Enumerator::Array { array, index } => {
                let cell = array.borrow().get(*index)?;
                *index += 1;
                Some(cell)
            }
            Enumerator::Hash {
                hash,
                keys,
                pending,
            } => {
                if let Some(value) = pending.take() {
                    return Some(value);
                }
                let hash = hash.borrow();
                for key in keys.by_ref() {
                    if let Some(cell) = hash.get(&key) {
                        *pending = Some(cell);
                        return Some(Value::string(key));
                    }
                }
                None
            }
        }
    }
}

impl Value {
    /// Enumerate the members of an array or hash.
    pub fn members(&self) -> ValueResult<Enumerator> {
        match self {
            Value::Array(array) => Ok(Enumerator::Array {
                array: array.clone(),
                index: 0,
            }),
            Value::Hash(hash) => {
                let keys: Vec<String> = hash.borrow().entries.keys().cloned().collect();
                Ok(Enumerator::Hash {
                    hash: hash.clone(),
                    keys: keys.into_iter(),
                    pending: None,
                })
            }
            other => Err(ValueError::KindMismatch {
                wanted: Kind::Array,
                found: other.kind(),
            }),
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
