//! Dereference and autovivification.
//!
//! Dereferencing never creates anything: an undefined receiver is an error.
//! Vivification is the only implicit way containers come into existence; it
//! turns an undefined scalar into a reference to a fresh empty container and
//! is idempotent once that has happened.

use tracing::trace;

use crate::errors::{ValueError, ValueResult};
use crate::value::{
    ArrayBody, HashBody, Kind, Scalar, ScalarBody, Shared, SharedArray, SharedCode, SharedGlob,
    SharedHandle, SharedHash, SharedRegex, SharedScalar, Value,
};

impl Value {
    /// The referent of this reference, checked against `wanted` only for
    /// the error message.
    fn ref_target(&self, wanted: Kind) -> ValueResult<Value> {
        let Value::Scalar(body) = self else {
            return Err(ValueError::NotAReference { wanted });
        };
        let body = body.borrow();
        match &body.datum {
            Scalar::Ref(target) => Ok(target.clone()),
            Scalar::Undef => Err(ValueError::UndefinedReference { wanted }),
            _ => Err(ValueError::NotAReference { wanted }),
        }
    }

    /// The referent, required to be of kind `wanted`.
    pub fn dereference(&self, wanted: Kind) -> ValueResult<Value> {
        if wanted == Kind::Handle {
            return self.deref_handle().map(Value::Handle);
        }
        let target = self.ref_target(wanted)?;
        if target.kind() == wanted {
            Ok(target)
        } else {
            Err(ValueError::KindMismatch {
                wanted,
                found: target.kind(),
            })
        }
    }

    pub fn deref_scalar(&self) -> ValueResult<SharedScalar> {
        match self.ref_target(Kind::Scalar)? {
            Value::Scalar(body) => Ok(body),
            other => Err(mismatch(Kind::Scalar, &other)),
        }
    }

    pub fn deref_array(&self) -> ValueResult<SharedArray> {
        match self.ref_target(Kind::Array)? {
            Value::Array(body) => Ok(body),
            other => Err(mismatch(Kind::Array, &other)),
        }
    }

    pub fn deref_hash(&self) -> ValueResult<SharedHash> {
        match self.ref_target(Kind::Hash)? {
            Value::Hash(body) => Ok(body),
            other => Err(mismatch(Kind::Hash, &other)),
        }
    }

    pub fn deref_glob(&self) -> ValueResult<SharedGlob> {
        match self.ref_target(Kind::Glob)? {
            Value::Glob(body) => Ok(body),
            other => Err(mismatch(Kind::Glob, &other)),
        }
    }

    pub fn deref_code(&self) -> ValueResult<SharedCode> {
        match self.ref_target(Kind::Code)? {
            Value::Code(body) => Ok(body),
            other => Err(mismatch(Kind::Code, &other)),
        }
    }

    /// A handle referent, or the handle slot of a referenced glob.
    pub fn deref_handle(&self) -> ValueResult<SharedHandle> {
        match self.ref_target(Kind::Handle)? {
            Value::Handle(body) => Ok(body),
            Value::Glob(glob) => {
                let handle = glob.borrow().handle();
                handle.ok_or(ValueError::KindMismatch {
                    wanted: Kind::Handle,
                    found: Kind::Glob,
                })
            }
            other => Err(mismatch(Kind::Handle, &other)),
        }
    }

    pub fn deref_regex(&self) -> ValueResult<SharedRegex> {
        match self.ref_target(Kind::Regex)? {
            Value::Regex(body) => Ok(body),
            other => Err(mismatch(Kind::Regex, &other)),
        }
    }

    /// `$$x` as an lvalue: creates the referenced scalar if `self` is undef.
    pub fn vivify_scalar(&self) -> ValueResult<SharedScalar> {
        if let Some(scalar) = self.vivify_with(Kind::Scalar, || {
            let body = Shared::new(ScalarBody::default());
            (Value::Scalar(body.clone()), body)
        }) {
            return Ok(scalar);
        }
        if let Value::Glob(glob) = self {
            return Ok(glob.borrow_mut().vivify_scalar());
        }
        self.deref_scalar()
    }

    /// `@$x` as an lvalue: creates the referenced array if `self` is undef.
    pub fn vivify_array(&self) -> ValueResult<SharedArray> {
        if let Some(array) = self.vivify_with(Kind::Array, || {
            let body = Shared::new(ArrayBody::default());
            (Value::Array(body.clone()), body)
        }) {
            return Ok(array);
        }
        if let Value::Glob(glob) = self {
            return Ok(glob.borrow_mut().vivify_array());
        }
        self.deref_array()
    }

    /// `%$x` as an lvalue: creates the referenced hash if `self` is undef.
    pub fn vivify_hash(&self) -> ValueResult<SharedHash> {
        if let Some(hash) = self.vivify_with(Kind::Hash, || {
            let body = Shared::new(HashBody::default());
            (Value::Hash(body.clone()), body)
        }) {
            return Ok(hash);
        }
        if let Value::Glob(glob) = self {
            return Ok(glob.borrow_mut().vivify_hash());
        }
        self.deref_hash()
    }

    /// If `self` is an undefined scalar, point it at a fresh container made
    /// by `make` and return the container.
    fn vivify_with<T>(&self, kind: Kind, make: impl FnOnce() -> (Value, T)) -> Option<T> {
        let Value::Scalar(body) = self else {
            return None;
        };
        let mut body = body.borrow_mut();
        if body.datum.is_defined() {
            return None;
        }
        let (container, handle) = make();
        trace!(kind = %kind, addr = container.addr(), "vivify");
        body.assign(Scalar::Ref(container));
        Some(handle)
    }
}

fn mismatch(wanted: Kind, found: &Value) -> ValueError {
    ValueError::KindMismatch {
        wanted,
        found: found.kind(),
    }
}
