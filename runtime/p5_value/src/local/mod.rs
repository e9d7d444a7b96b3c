//! Dynamic scoping (`local`).
//!
//! Localizing a value takes a [`Snapshot`] of its current content and resets
//! it to empty. Restoring writes the saved content back into the same body,
//! so every alias of the localized value sees the restore. Snapshots are kept
//! per dynamic-scope frame and restored in reverse order when the frame
//! closes (see [`ScopedRuntime`](crate::ScopedRuntime)).

use std::mem;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::errors::{ValueError, ValueResult};
use crate::pattern::RegexBody;
use crate::value::{
    CodeBody, GlobSlots, HandleBody, Kind, Scalar, SharedArray, SharedCode, SharedGlob,
    SharedHandle, SharedHash, SharedRegex, SharedScalar, Value,
};

/// Saved state of one localized location.
#[derive(Debug)]
pub struct Snapshot {
    saved: Saved,
}

#[derive(Debug)]
enum Saved {
    Scalar {
        body: SharedScalar,
        datum: Scalar,
        pos: Option<usize>,
    },
    Array {
        body: SharedArray,
        items: Vec<Value>,
    },
    Hash {
        body: SharedHash,
        entries: FxHashMap<String, Value>,
    },
    Glob {
        body: SharedGlob,
        slots: GlobSlots,
    },
    Code {
        body: SharedCode,
        saved: CodeBody,
    },
    Handle {
        body: SharedHandle,
        saved: HandleBody,
    },
    Regex {
        body: SharedRegex,
        saved: RegexBody,
    },
    HashElement {
        hash: SharedHash,
        key: String,
        previous: Option<Value>,
    },
}

impl Snapshot {
    /// Write the saved state back.
    pub fn restore(self) {
        match self.saved {
            Saved::Scalar { body, datum, pos } => {
                let mut body = body.borrow_mut();
                body.datum = datum;
                body.pos = pos;
            }
            Saved::Array { body, items } => body.borrow_mut().items = items,
            Saved::Hash { body, entries } => body.borrow_mut().entries = entries,
            Saved::Glob { body, slots } => body.borrow_mut().slots = slots,
            Saved::Code { body, saved } => *body.borrow_mut() = saved,
            Saved::Handle { body, saved } => *body.borrow_mut() = saved,
            Saved::Regex { body, saved } => *body.borrow_mut() = saved,
            Saved::HashElement {
                hash,
                key,
                previous,
            } => {
                let mut hash = hash.borrow_mut();
                match previous {
                    Some(cell) => {
                        hash.entries.insert(key, cell);
                    }
                    None => {
                        hash.entries.remove(&key);
                    }
                }
            }
        }
    }

    /// Kind of the localized location.
    pub fn kind(&self) -> Kind {
        match &self.saved {
            Saved::Scalar { .. } | Saved::HashElement { .. } => Kind::Scalar,
            Saved::Array { .. } => Kind::Array,
            Saved::Hash { .. } => Kind::Hash,
            Saved::Glob { .. } => Kind::Glob,
            Saved::Code { .. } => Kind::Code,
            Saved::Handle { .. } => Kind::Handle,
            Saved::Regex { .. } => Kind::Regex,
        }
    }
}

/// Capability to save and reset a location for dynamic scoping.
///
/// Containers and scalars are emptied; code, handle and pattern bodies keep
/// their content until restored. Blessing is never touched.
pub trait Localizable {
    /// Save the current state and reset. Does not restore anything itself.
    fn localize(&self) -> Snapshot;
}

impl Localizable for SharedScalar {
    fn localize(&self) -> Snapshot {
        let mut body = self.borrow_mut();
        let datum = mem::take(&mut body.datum);
        let pos = body.pos.take();
        Snapshot {
            saved: Saved::Scalar {
                body: self.clone(),
                datum,
                pos,
            },
        }
    }
}

impl Localizable for SharedArray {
    fn localize(&self) -> Snapshot {
        let items = mem::take(&mut self.borrow_mut().items);
        Snapshot {
            saved: Saved::Array {
                body: self.clone(),
                items,
            },
        }
    }
}

impl Localizable for SharedHash {
    fn localize(&self) -> Snapshot {
        let entries = mem::take(&mut self.borrow_mut().entries);
        Snapshot {
            saved: Saved::Hash {
                body: self.clone(),
                entries,
            },
        }
    }
}

impl Localizable for SharedGlob {
    fn localize(&self) -> Snapshot {
        let slots = mem::take(&mut self.borrow_mut().slots);
        Snapshot {
            saved: Saved::Glob {
                body: self.clone(),
                slots,
            },
        }
    }
}

impl Localizable for SharedCode {
    fn localize(&self) -> Snapshot {
        let saved = self.borrow().clone();
        Snapshot {
            saved: Saved::Code {
                body: self.clone(),
                saved,
            },
        }
    }
}

impl Localizable for SharedHandle {
    fn localize(&self) -> Snapshot {
        let saved = self.borrow().clone();
        Snapshot {
            saved: Saved::Handle {
                body: self.clone(),
                saved,
            },
        }
    }
}

impl Localizable for SharedRegex {
    fn localize(&self) -> Snapshot {
        let saved = self.borrow().clone();
        Snapshot {
            saved: Saved::Regex {
                body: self.clone(),
                saved,
            },
        }
    }
}

impl Localizable for Value {
    fn localize(&self) -> Snapshot {
        each_body!(self, body => body.localize())
    }
}

/// Localize one hash element (`local $h{key}`).
///
/// The current cell is detached and replaced by a fresh undefined cell,
/// which is returned. Restoring puts the original cell back, or deletes the
/// key if it did not exist.
pub fn localize_hash_element(hash: &Value, key: &str) -> ValueResult<(Snapshot, Value)> {
    let Value::Hash(body) = hash else {
        return Err(ValueError::KindMismatch {
            wanted: Kind::Hash,
            found: hash.kind(),
        });
    };
    let cell = Value::undef();
    let previous = body
        .borrow_mut()
        .entries
        .insert(key.to_string(), cell.clone());
    let snapshot = Snapshot {
        saved: Saved::HashElement {
            hash: body.clone(),
            key: key.to_string(),
            previous,
        },
    };
    Ok((snapshot, cell))
}

/// Stack of open dynamic-scope frames.
#[derive(Debug, Default)]
pub(crate) struct DynamicScope {
    frames: Vec<Vec<Snapshot>>,
}

impl DynamicScope {
    pub(crate) fn push_frame(&mut self) {
        self.frames.push(Vec::new());
        debug!(depth = self.frames.len(), "local frame pushed");
    }

    /// Record a snapshot in the innermost frame.
    pub(crate) fn save(&mut self, snapshot: Snapshot) {
        if self.frames.is_empty() {
            self.frames.push(Vec::new());
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.push(snapshot);
        }
    }

    /// Close the innermost frame, restoring its snapshots newest first.
    pub(crate) fn pop_frame(&mut self) {
        if let Some(frame) = self.frames.pop() {
            debug!(
                depth = self.frames.len(),
                restored = frame.len(),
                "local frame popped"
            );
            for snapshot in frame.into_iter().rev() {
                snapshot.restore();
            }
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }
}
