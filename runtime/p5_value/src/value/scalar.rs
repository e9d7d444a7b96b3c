//! Scalar datum and the scalar container body.

use std::fmt;

use super::Value;
use crate::stash::StashId;

/// Content of a scalar container.
///
/// Undefined is a state of the scalar kind, not a separate kind. A reference
/// is a scalar whose content points at exactly one other value.
#[derive(Clone, Default)]
pub enum Scalar {
    #[default]
    Undef,
    Int(i64),
    Float(f64),
    Str(String),
    Ref(Value),
}

impl Scalar {
    /// Returns `true` unless this is `Undef`.
    #[inline]
    pub fn is_defined(&self) -> bool {
        !matches!(self, Scalar::Undef)
    }

    /// The referent, if this scalar is a reference.
    #[inline]
    pub fn as_ref_target(&self) -> Option<&Value> {
        match self {
            Scalar::Ref(target) => Some(target),
            _ => None,
        }
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Scalar::Float(f)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Str(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Str(s)
    }
}

// References compare by referent identity.
impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Undef, Scalar::Undef) => true,
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => a == b,
            (Scalar::Str(a), Scalar::Str(b)) => a == b,
            (Scalar::Ref(a), Scalar::Ref(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

// A reference prints its referent's identity, never its content, so
// self-referential data cannot recurse.
impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Undef => write!(f, "Undef"),
            Scalar::Int(n) => write!(f, "Int({n})"),
            Scalar::Float(n) => write!(f, "Float({n})"),
            Scalar::Str(s) => write!(f, "Str({s:?})"),
            Scalar::Ref(target) => write!(f, "Ref({}@{:#x})", target.kind(), target.addr()),
        }
    }
}

/// Scalar container: datum, class identity and match position.
#[derive(Debug, Default)]
pub struct ScalarBody {
    pub(crate) datum: Scalar,
    pub(crate) blessed: Option<StashId>,
    pub(crate) pos: Option<usize>,
}

impl ScalarBody {
    pub(crate) fn new(datum: Scalar) -> Self {
        ScalarBody {
            datum,
            blessed: None,
            pos: None,
        }
    }

    /// Current content.
    #[inline]
    pub fn datum(&self) -> &Scalar {
        &self.datum
    }

    /// Replace the content. Assignment forgets the match position.
    pub fn assign(&mut self, datum: Scalar) {
        self.datum = datum;
        self.pos = None;
    }

    /// Match position in characters, `None` when never set.
    #[inline]
    pub fn pos(&self) -> Option<usize> {
        self.pos
    }

    /// Set or clear the match position.
    #[inline]
    pub fn set_pos(&mut self, pos: Option<usize>) {
        self.pos = pos;
    }
}
