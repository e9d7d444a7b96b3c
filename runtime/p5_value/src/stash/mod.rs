//! Symbol tables (stashes) and method resolution.
//!
//! Stashes live in an arena owned by [`SymbolTable`] and refer to each other
//! by [`StashId`], so inheritance lists are plain index vectors and cycles
//! never become reference cycles.
//!
//! # Resolution Order
//!
//! Methods resolve depth-first, left to right: a stash with parents `[B, C]`
//! is searched as itself, then all of B's chain, then all of C's chain.
//! A stash reachable twice is searched once, at its first position.
//! When the walk fails the `UNIVERSAL` stash is searched last.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::errors::{ValueError, ValueResult};
use crate::value::{CodeBody, NativeFn, Shared, SharedCode};

/// Name of the implicit root class.
pub const UNIVERSAL: &str = "UNIVERSAL";

/// Index of a stash in its [`SymbolTable`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StashId(u32);

impl StashId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A package: method table plus ordered parent list.
#[derive(Debug)]
pub struct Stash {
    name: String,
    methods: FxHashMap<String, SharedCode>,
    isa: Vec<StashId>,
}

impl Stash {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parents in search order (`@ISA`).
    #[inline]
    pub fn isa(&self) -> &[StashId] {
        &self.isa
    }

    /// Names of the methods defined directly in this stash.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }
}

/// Registry of all stashes of one runtime.
#[derive(Debug)]
pub struct SymbolTable {
    stashes: Vec<Stash>,
    by_name: FxHashMap<String, StashId>,
    generation: u64,
    max_isa_depth: usize,
}

impl SymbolTable {
    /// An empty registry whose inheritance walks stop at `max_isa_depth`.
    pub fn new(max_isa_depth: usize) -> Self {
        SymbolTable {
            stashes: Vec::new(),
            by_name: FxHashMap::default(),
            generation: 0,
            max_isa_depth,
        }
    }

    /// The stash named `name`, created if absent.
    pub fn intern(&mut self, name: &str) -> ValueResult<StashId> {
        if let Some(&id) = self.by_name.get(name) {
            return Ok(id);
        }
        let id = u32::try_from(self.stashes.len())
            .map(StashId)
            .map_err(|_| ValueError::StashIdsExhausted)?;
        self.stashes.push(Stash {
            name: name.to_string(),
            methods: FxHashMap::default(),
            isa: Vec::new(),
        });
        self.by_name.insert(name.to_string(), id);
        self.bump();
        debug!(stash = name, id = id.0, "stash created");
        Ok(id)
    }

    /// The stash named `name`, if it exists.
    pub fn lookup(&self, name: &str) -> Option<StashId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: StashId) -> Option<&Stash> {
        self.stashes.get(id.index())
    }

    /// Class name of `id`; `__ANON__` for an id from another registry.
    pub fn name(&self, id: StashId) -> &str {
        self.get(id).map_or("__ANON__", Stash::name)
    }

    pub fn len(&self) -> usize {
        self.stashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stashes.is_empty()
    }

    /// Counter bumped by every mutation; external method caches key on it.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn bump(&mut self) {
        self.generation += 1;
    }

    /// Install `code` as method `name` of `id`, returning the previous one.
    pub fn define_method(
        &mut self,
        id: StashId,
        name: &str,
        code: SharedCode,
    ) -> Option<SharedCode> {
        let stash = self.stashes.get_mut(id.index())?;
        let previous = stash.methods.insert(name.to_string(), code);
        self.bump();
        previous
    }

    /// Install a native method named `Package::name` and return its body.
    pub fn define_native(&mut self, id: StashId, name: &str, native: NativeFn) -> SharedCode {
        let code = Shared::new(CodeBody {
            name: format!("{}::{name}", self.name(id)),
            native: Some(native),
            blessed: None,
        });
        self.define_method(id, name, code.clone());
        code
    }

    pub fn remove_method(&mut self, id: StashId, name: &str) -> Option<SharedCode> {
        let removed = self.stashes.get_mut(id.index())?.methods.remove(name);
        if removed.is_some() {
            self.bump();
        }
        removed
    }

    /// Method `name` defined directly in `id`, without inheritance.
    pub fn method(&self, id: StashId, name: &str) -> Option<SharedCode> {
        self.get(id)?.methods.get(name).cloned()
    }

    /// Parents of `id` in search order.
    pub fn isa(&self, id: StashId) -> &[StashId] {
        self.get(id).map_or(&[][..], Stash::isa)
    }

    /// Replace the parent list of `id`.
    ///
    /// Rejects ids this table never issued and lists that would make `id`
    /// its own ancestor.
    pub fn set_isa(&mut self, id: StashId, parents: Vec<StashId>) -> ValueResult<()> {
        if let Some(&unknown) = std::iter::once(&id)
            .chain(&parents)
            .find(|candidate| self.get(**candidate).is_none())
        {
            return Err(ValueError::UnknownStash { id: unknown.0 });
        }
        if parents
            .iter()
            .any(|&parent| parent == id || self.linearized_isa(parent).contains(&id))
        {
            return Err(ValueError::RecursiveInheritance {
                class: self.name(id).to_string(),
            });
        }
        let stash = self
            .stashes
            .get_mut(id.index())
            .ok_or(ValueError::UnknownStash { id: id.0 })?;
        stash.isa = parents;
        self.bump();
        debug!(stash = self.name(id), parents = ?self.isa(id), "isa updated");
        Ok(())
    }

    /// `id` followed by its ancestors in resolution order, each once.
    pub fn linearized_isa(&self, id: StashId) -> Vec<StashId> {
        let mut seen = FxHashSet::default();
        let mut order = Vec::new();
        self.walk(id, 0, &mut seen, &mut order);
        order
    }

    fn walk(
        &self,
        id: StashId,
        depth: usize,
        seen: &mut FxHashSet<StashId>,
        order: &mut Vec<StashId>,
    ) {
        if depth > self.max_isa_depth {
            debug!(stash = self.name(id), depth, "isa walk depth limit reached");
            return;
        }
        if !seen.insert(id) {
            return;
        }
        order.push(id);
        for &parent in self.isa(id) {
            self.walk(parent, depth + 1, seen, order);
        }
    }

    /// Whether `id` is `ancestor` or inherits from it. Every class is a
    /// `UNIVERSAL`.
    pub fn is_subclass(&self, id: StashId, ancestor: StashId) -> bool {
        self.name(ancestor) == UNIVERSAL || self.linearized_isa(id).contains(&ancestor)
    }

    /// Resolve `name` starting at `id`.
    ///
    /// Pure in the registry state; callers may cache results keyed on
    /// [`generation`](Self::generation).
    #[tracing::instrument(level = "trace", skip(self), fields(class = self.name(id)))]
    pub fn find_method(&self, id: StashId, name: &str) -> Option<SharedCode> {
        let order = self.linearized_isa(id);
        if let Some(code) = order.iter().find_map(|&stash| self.method(stash, name)) {
            return Some(code);
        }
        let found = self
            .lookup(UNIVERSAL)
            .filter(|universal| !order.contains(universal))
            .and_then(|universal| {
                self.linearized_isa(universal)
                    .into_iter()
                    .find_map(|stash| self.method(stash, name))
            });
        if found.is_none() {
            debug!(class = self.name(id), method = name, "method not found");
        }
        found
    }
}
