//! Error types for value operations.
//!
//! Only contract violations are errors. Soft conditions (coercing undef,
//! non-numeric strings) become [`Warning`](crate::Warning)s and a default
//! value; negative outcomes (no method found, no match) are ordinary results.

use thiserror::Error;

use crate::value::Kind;

/// Result of a fallible value operation.
pub type ValueResult<T> = Result<T, ValueError>;

/// Fatal condition raised by a value operation.
///
/// Each variant is a distinct kind so the executor can branch on it without
/// parsing message text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValueError {
    /// A defined value that is not a reference was used as one.
    #[error("Can't use a non-reference value as {} ref", .wanted.with_article())]
    NotAReference { wanted: Kind },

    /// An undefined value was dereferenced.
    #[error("Can't use an undefined value as {} reference", .wanted.with_article())]
    UndefinedReference { wanted: Kind },

    /// The receiver or referent has a different kind than requested.
    #[error("Not {} reference (found {found})", .wanted.with_article())]
    KindMismatch { wanted: Kind, found: Kind },

    /// Only references (and containers) can carry a class.
    #[error("Can't bless non-reference value")]
    CannotBless,

    /// List assignment into a kind that has no list content.
    #[error("Can't assign a list to {}", .found.with_article())]
    CannotAssignList { found: Kind },

    /// A Code value without a body was called.
    #[error("Undefined subroutine &{name} called")]
    UndefinedSubroutine { name: String },

    /// An inheritance update would make a class its own ancestor.
    #[error("Recursive inheritance detected in package '{class}'")]
    RecursiveInheritance { class: String },

    /// A stash id that this symbol table never issued.
    #[error("No stash with id {id} in this symbol table")]
    UnknownStash { id: u32 },

    /// The symbol table has run out of stash ids.
    #[error("Too many packages: no stash ids left")]
    StashIdsExhausted,

    /// Failure reported by a native sub body.
    #[error("{message}")]
    Native { message: String },
}

impl ValueError {
    /// Build a native-sub error from any message.
    #[cold]
    pub fn native(message: impl Into<String>) -> Self {
        ValueError::Native {
            message: message.into(),
        }
    }

    /// Whether this is one of the kind-mismatch family of errors.
    pub fn is_kind_mismatch(&self) -> bool {
        matches!(
            self,
            ValueError::NotAReference { .. }
                | ValueError::UndefinedReference { .. }
                | ValueError::KindMismatch { .. }
                | ValueError::CannotBless
                | ValueError::CannotAssignList { .. }
        )
    }
}
