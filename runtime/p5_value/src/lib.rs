//! P5 Value - the value core of a Perl-family runtime.
//!
//! This crate provides the contract every executable operation uses to
//! manipulate runtime data:
//! - Runtime values over seven kinds (`Value`, `Scalar`, the `*Body` records)
//! - Scalar coercion, undef, list assignment, depth-bounded cloning
//! - Reference layer: dereference and autovivification
//! - Identity layer: blessing, reference-type names, method resolution over
//!   an arena of symbol tables (`SymbolTable`, `StashId`)
//! - Iteration over container kinds (`Enumerator`)
//! - Dynamic scope save/restore (`Localizable`, `Snapshot`, `ScopedRuntime`)
//! - Match engine interface with caller-owned `MatchState`
//!
//! # Explicit Context
//!
//! Nothing here reads process-wide state. Every operation that can warn,
//! name a class or resolve a method takes the owning [`Runtime`] as an
//! argument, so independent runtimes never share mutable state.
//!
//! # Sharing
//!
//! Value bodies live behind `Shared<T>` (`Rc<RefCell<T>>`). Cloning a `Value`
//! aliases its body; `Value::clone_depth` makes independent copies.

/// Dispatch over the seven value kinds with the body handle bound to `$body`.
macro_rules! each_body {
    ($value:expr, $body:ident => $e:expr) => {
        match $value {
            $crate::Value::Scalar($body) => $e,
            $crate::Value::Array($body) => $e,
            $crate::Value::Hash($body) => $e,
            $crate::Value::Code($body) => $e,
            $crate::Value::Glob($body) => $e,
            $crate::Value::Handle($body) => $e,
            $crate::Value::Regex($body) => $e,
        }
    };
}

mod context;
mod errors;
mod identity;
mod iter;
mod local;
mod pattern;
mod reference;
mod runtime;
mod stash;
mod value;

pub use context::Context;
pub use errors::{ValueError, ValueResult};
pub use identity::Blessable;
pub use iter::Enumerator;
pub use local::{localize_hash_element, Localizable, Snapshot};
pub use pattern::{
    CompiledRegex, MatchOutcome, MatchState, MatchStatus, RegexBody, RegexFlags, Span,
};
pub use runtime::{
    BufferWarningSink, Runtime, RuntimeBuilder, RuntimeConfig, ScopedRuntime, Warning,
    WarningSink,
};
pub use stash::{Stash, StashId, SymbolTable, UNIVERSAL};
pub use value::{
    format_float, parse_numeric_prefix, ArrayBody, CodeBody, Coercible, GlobBody, GlobSlots,
    HandleBody, HashBody, Kind, NativeFn, Number, NumericPrefix, Scalar, ScalarBody, Shared,
    SharedArray, SharedCode, SharedGlob, SharedHandle, SharedHash, SharedRegex, SharedScalar,
    Value, POS_UNSET,
};
