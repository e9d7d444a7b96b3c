//! Runtime values.
//!
//! A [`Value`] has exactly one of seven kinds. Each variant holds a
//! [`Shared`] body; cloning a `Value` aliases that body, while
//! [`Value::clone_depth`] produces independent copies.

mod assign;
mod bodies;
mod clone;
mod coerce;
mod numeric;
mod scalar;
mod shared;

use std::fmt;

pub use bodies::{ArrayBody, CodeBody, GlobBody, GlobSlots, HandleBody, HashBody, NativeFn};
pub use coerce::Coercible;
pub use numeric::{format_float, parse_numeric_prefix, Number, NumericPrefix};
pub use scalar::{Scalar, ScalarBody};
pub use shared::Shared;

use crate::errors::{ValueError, ValueResult};
use crate::pattern::RegexBody;

pub type SharedScalar = Shared<ScalarBody>;
pub type SharedArray = Shared<ArrayBody>;
pub type SharedHash = Shared<HashBody>;
pub type SharedCode = Shared<CodeBody>;
pub type SharedGlob = Shared<GlobBody>;
pub type SharedHandle = Shared<HandleBody>;
pub type SharedRegex = Shared<RegexBody>;

/// Sentinel returned by [`Value::get_pos`] when no position was ever set.
pub const POS_UNSET: i64 = -1;

/// The seven value kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Scalar,
    Array,
    Hash,
    Code,
    Glob,
    Handle,
    Regex,
}

impl Kind {
    /// Canonical kind name as reported by `ref`.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Scalar => "SCALAR",
            Kind::Array => "ARRAY",
            Kind::Hash => "HASH",
            Kind::Code => "CODE",
            Kind::Glob => "GLOB",
            Kind::Handle => "IO",
            Kind::Regex => "Regexp",
        }
    }

    /// Name with its indefinite article, for diagnostics.
    pub fn with_article(self) -> String {
        let name = self.name();
        let article = if name.starts_with(['A', 'E', 'I', 'O', 'U']) {
            "an"
        } else {
            "a"
        };
        format!("{article} {name}")
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A runtime datum of one of the seven kinds.
#[derive(Clone)]
pub enum Value {
    Scalar(SharedScalar),
    Array(SharedArray),
    Hash(SharedHash),
    Code(SharedCode),
    Glob(SharedGlob),
    Handle(SharedHandle),
    Regex(SharedRegex),
}

impl Value {
    /// A fresh undefined scalar.
    pub fn undef() -> Self {
        Value::scalar(Scalar::Undef)
    }

    pub fn int(n: i64) -> Self {
        Value::scalar(Scalar::Int(n))
    }

    pub fn float(f: f64) -> Self {
        Value::scalar(Scalar::Float(f))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::scalar(Scalar::Str(s.into()))
    }

    /// A fresh scalar container holding `datum`.
    pub fn scalar(datum: Scalar) -> Self {
        Value::Scalar(Shared::new(ScalarBody::new(datum)))
    }

    /// A fresh scalar holding a reference to `target`.
    pub fn reference(target: &Value) -> Self {
        Value::scalar(Scalar::Ref(target.clone()))
    }

    /// A fresh array whose elements are new cells holding `items`.
    pub fn array(items: impl IntoIterator<Item = Scalar>) -> Self {
        let cells = items.into_iter().map(Value::scalar).collect();
        Value::Array(Shared::new(ArrayBody::from_cells(cells)))
    }

    pub fn empty_array() -> Self {
        Value::Array(Shared::new(ArrayBody::default()))
    }

    /// A fresh hash built from key/datum pairs. Later keys overwrite earlier ones.
    pub fn hash<K: Into<String>>(pairs: impl IntoIterator<Item = (K, Scalar)>) -> Self {
        let mut body = HashBody::default();
        for (key, datum) in pairs {
            body.insert(key, datum);
        }
        Value::Hash(Shared::new(body))
    }

    pub fn empty_hash() -> Self {
        Value::Hash(Shared::new(HashBody::default()))
    }

    /// A Code value with a native body.
    pub fn code(name: impl Into<String>, native: NativeFn) -> Self {
        Value::Code(Shared::new(CodeBody {
            name: name.into(),
            native: Some(native),
            blessed: None,
        }))
    }

    /// A declared but undefined sub.
    pub fn code_stub(name: impl Into<String>) -> Self {
        Value::Code(Shared::new(CodeBody {
            name: name.into(),
            native: None,
            blessed: None,
        }))
    }

    /// An empty typeglob `*package::name`.
    pub fn glob(package: impl Into<String>, name: impl Into<String>) -> Self {
        Value::Glob(Shared::new(GlobBody {
            package: package.into(),
            name: name.into(),
            slots: GlobSlots::default(),
            blessed: None,
        }))
    }

    pub fn handle(name: impl Into<String>) -> Self {
        Value::Handle(Shared::new(HandleBody {
            name: name.into(),
            blessed: None,
        }))
    }

    /// Wrap a compiled pattern.
    pub fn regex(body: RegexBody) -> Self {
        Value::Regex(Shared::new(body))
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        match self {
            Value::Scalar(_) => Kind::Scalar,
            Value::Array(_) => Kind::Array,
            Value::Hash(_) => Kind::Hash,
            Value::Code(_) => Kind::Code,
            Value::Glob(_) => Kind::Glob,
            Value::Handle(_) => Kind::Handle,
            Value::Regex(_) => Kind::Regex,
        }
    }

    /// Identity of the body.
    #[inline]
    pub fn addr(&self) -> usize {
        each_body!(self, body => body.addr())
    }

    /// Whether both values alias the same body.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        self.kind() == other.kind() && self.addr() == other.addr()
    }

    /// Every kind except an undefined scalar is defined.
    pub fn is_defined(&self) -> bool {
        match self {
            Value::Scalar(body) => body.borrow().datum.is_defined(),
            _ => true,
        }
    }

    pub fn is_reference(&self) -> bool {
        self.referent().is_some()
    }

    /// The referent when this is a scalar holding a reference.
    pub fn referent(&self) -> Option<Value> {
        match self {
            Value::Scalar(body) => body.borrow().datum.as_ref_target().cloned(),
            _ => None,
        }
    }

    /// A copy of the scalar content, or `None` for other kinds.
    pub fn datum(&self) -> Option<Scalar> {
        match self {
            Value::Scalar(body) => Some(body.borrow().datum.clone()),
            _ => None,
        }
    }

    /// Store `datum` in this scalar cell. All aliases observe the change.
    pub fn set(&self, datum: impl Into<Scalar>) -> ValueResult<()> {
        match self {
            Value::Scalar(body) => {
                body.borrow_mut().assign(datum.into());
                Ok(())
            }
            other => Err(ValueError::KindMismatch {
                wanted: Kind::Scalar,
                found: other.kind(),
            }),
        }
    }

    /// Match position in characters. Only scalars carry one.
    pub fn pos(&self) -> Option<usize> {
        match self {
            Value::Scalar(body) => body.borrow().pos,
            _ => None,
        }
    }

    /// Set or clear the match position; ignored on non-scalars.
    pub fn set_pos(&self, pos: Option<usize>) {
        if let Value::Scalar(body) = self {
            body.borrow_mut().pos = pos;
        }
    }

    /// Position marker, [`POS_UNSET`] when never set.
    pub fn get_pos(&self) -> i64 {
        self.get_pos_flagged().0
    }

    /// Position marker plus whether it was ever set, so that a position of
    /// zero is distinguishable from no position.
    pub fn get_pos_flagged(&self) -> (i64, bool) {
        match self.pos() {
            Some(pos) => (i64::try_from(pos).unwrap_or(i64::MAX), true),
            None => (POS_UNSET, false),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::undef()
    }
}

impl From<Scalar> for Value {
    fn from(datum: Scalar) -> Self {
        Value::scalar(datum)
    }
}

// Containers print identity only; a scalar prints its datum, which itself
// prints references by identity.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(body) => match body.try_borrow() {
                Ok(body) => write!(f, "Scalar({:?})", body.datum),
                Err(_) => write!(f, "Scalar(<borrowed>@{:#x})", self.addr()),
            },
            other => write!(f, "{}@{:#x}", other.kind(), other.addr()),
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
