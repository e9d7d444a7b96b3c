//! RAII guard for dynamic scopes.
//!
//! [`ScopedRuntime`] opens a dynamic-scope frame and closes it on drop, so
//! every `local` taken inside the frame is restored on normal exit, on `?`
//! error propagation and during unwinding.
//!
//! # Usage
//!
//! ```text
//! {
//!     let mut scoped = rt.scoped();
//!     scoped.local(&global);
//!     global.set(Scalar::Int(1))?;
//!     run_body(&mut scoped)?;
//! } // global restored here, even on panic
//!
//! rt.with_local_scope(|scoped| {
//!     scoped.local(&global);
//!     run_body(scoped)
//! })
//! ```

use std::ops::{Deref, DerefMut};

use super::Runtime;
use crate::errors::ValueResult;
use crate::local::{localize_hash_element, Localizable};
use crate::value::Value;

/// Guard over an open dynamic-scope frame.
///
/// Dereferences to the [`Runtime`]. Dropping it restores every location
/// localized through it, newest first.
pub struct ScopedRuntime<'rt> {
    runtime: &'rt mut Runtime,
}

impl Drop for ScopedRuntime<'_> {
    fn drop(&mut self) {
        self.runtime.dynamic.pop_frame();
    }
}

impl Deref for ScopedRuntime<'_> {
    type Target = Runtime;

    fn deref(&self) -> &Self::Target {
        self.runtime
    }
}

impl DerefMut for ScopedRuntime<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.runtime
    }
}

impl ScopedRuntime<'_> {
    /// Localize `target` until this frame closes.
    pub fn local(&mut self, target: &impl Localizable) {
        let snapshot = target.localize();
        self.runtime.dynamic.save(snapshot);
    }

    /// Localize `$hash{key}` until this frame closes and return the fresh
    /// element cell.
    pub fn local_hash_element(&mut self, hash: &Value, key: &str) -> ValueResult<Value> {
        let (snapshot, cell) = localize_hash_element(hash, key)?;
        self.runtime.dynamic.save(snapshot);
        Ok(cell)
    }
}

impl Runtime {
    /// Open a dynamic-scope frame that closes when the guard drops.
    pub fn scoped(&mut self) -> ScopedRuntime<'_> {
        self.dynamic.push_frame();
        ScopedRuntime { runtime: self }
    }

    /// Run `f` inside a new dynamic-scope frame.
    pub fn with_local_scope<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut ScopedRuntime<'_>) -> T,
    {
        let mut scoped = self.scoped();
        f(&mut scoped)
    }
}
