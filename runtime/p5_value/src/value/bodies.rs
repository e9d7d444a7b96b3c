//! Container bodies for the non-scalar kinds.
//!
//! Array elements and hash values are scalar containers (`Value::Scalar`),
//! so a reference to an element aliases it and vivification through an
//! element mutates it in place.

use rustc_hash::FxHashMap;

use super::{
    Scalar, ScalarBody, Shared, SharedArray, SharedCode, SharedHandle, SharedHash, SharedScalar,
    Value,
};
use crate::errors::{ValueError, ValueResult};
use crate::runtime::Runtime;
use crate::stash::StashId;

/// Native implementation of a Code value.
pub type NativeFn = fn(&Runtime, &[Value]) -> ValueResult<Value>;

/// Ordered sequence of scalar containers.
#[derive(Debug, Default)]
pub struct ArrayBody {
    pub(crate) items: Vec<Value>,
    pub(crate) blessed: Option<StashId>,
}

impl ArrayBody {
    pub(crate) fn from_cells(items: Vec<Value>) -> Self {
        ArrayBody {
            items,
            blessed: None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The element container at `index`, aliased.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.items.get(index).cloned()
    }

    /// Element container used as an lvalue; grows the array with undefined
    /// elements when `index` is past the end.
    pub fn element(&mut self, index: usize) -> Value {
        while self.items.len() <= index {
            self.items.push(Value::undef());
        }
        self.items[index].clone()
    }

    /// Append a new element holding `datum`.
    pub fn push(&mut self, datum: impl Into<Scalar>) {
        self.items.push(Value::scalar(datum.into()));
    }

    /// Remove and return the last element container.
    pub fn pop(&mut self) -> Option<Value> {
        self.items.pop()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// All element containers in index order.
    #[inline]
    pub fn items(&self) -> &[Value] {
        &self.items
    }
}

/// String-keyed map of scalar containers.
///
/// Iteration order is unspecified but stable while the hash is not mutated.
#[derive(Debug, Default)]
pub struct HashBody {
    pub(crate) entries: FxHashMap<String, Value>,
    pub(crate) blessed: Option<StashId>,
}

impl HashBody {
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The value container under `key`, aliased.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    /// Value container used as an lvalue; creates an undefined entry.
    pub fn element(&mut self, key: &str) -> Value {
        self.entries
            .entry(key.to_string())
            .or_insert_with(Value::undef)
            .clone()
    }

    /// Store `datum` under `key` in a fresh container.
    pub fn insert(&mut self, key: impl Into<String>, datum: impl Into<Scalar>) {
        self.entries
            .insert(key.into(), Value::scalar(datum.into()));
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Subroutine body.
///
/// Compiled bodies belong to the executor; the core only carries a name and
/// an optional native implementation.
#[derive(Clone, Debug)]
pub struct CodeBody {
    pub(crate) name: String,
    pub(crate) native: Option<NativeFn>,
    pub(crate) blessed: Option<StashId>,
}

impl CodeBody {
    /// Fully qualified name (`Package::sub`, or `__ANON__`).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the sub has a body (declared-only subs do not).
    #[inline]
    pub fn is_defined(&self) -> bool {
        self.native.is_some()
    }

    /// Invoke the body.
    pub fn call(&self, rt: &Runtime, args: &[Value]) -> ValueResult<Value> {
        match self.native {
            Some(native) => native(rt, args),
            None => Err(ValueError::UndefinedSubroutine {
                name: self.name.clone(),
            }),
        }
    }
}

/// The per-name slots of a typeglob.
#[derive(Clone, Debug, Default)]
pub struct GlobSlots {
    pub scalar: Option<SharedScalar>,
    pub array: Option<SharedArray>,
    pub hash: Option<SharedHash>,
    pub code: Option<SharedCode>,
    pub handle: Option<SharedHandle>,
}

/// Typeglob: one symbol-table entry with a slot per kind.
#[derive(Debug, Default)]
pub struct GlobBody {
    pub(crate) package: String,
    pub(crate) name: String,
    pub(crate) slots: GlobSlots,
    pub(crate) blessed: Option<StashId>,
}

impl GlobBody {
    #[inline]
    pub fn package(&self) -> &str {
        &self.package
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `Package::name`.
    pub fn full_name(&self) -> String {
        format!("{}::{}", self.package, self.name)
    }

    #[inline]
    pub fn slots(&self) -> &GlobSlots {
        &self.slots
    }

    /// The scalar slot, created on first use.
    pub fn vivify_scalar(&mut self) -> SharedScalar {
        self.slots
            .scalar
            .get_or_insert_with(|| Shared::new(ScalarBody::default()))
            .clone()
    }

    /// The array slot, created on first use.
    pub fn vivify_array(&mut self) -> SharedArray {
        self.slots
            .array
            .get_or_insert_with(|| Shared::new(ArrayBody::default()))
            .clone()
    }

    /// The hash slot, created on first use.
    pub fn vivify_hash(&mut self) -> SharedHash {
        self.slots
            .hash
            .get_or_insert_with(|| Shared::new(HashBody::default()))
            .clone()
    }

    pub fn code(&self) -> Option<SharedCode> {
        self.slots.code.clone()
    }

    pub fn set_code(&mut self, code: SharedCode) {
        self.slots.code = Some(code);
    }

    pub fn handle(&self) -> Option<SharedHandle> {
        self.slots.handle.clone()
    }

    pub fn set_handle(&mut self, handle: SharedHandle) {
        self.slots.handle = Some(handle);
    }
}

/// I/O handle. Only its identity matters to the core.
#[derive(Clone, Debug, Default)]
pub struct HandleBody {
    pub(crate) name: String,
    pub(crate) blessed: Option<StashId>,
}

impl HandleBody {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}
