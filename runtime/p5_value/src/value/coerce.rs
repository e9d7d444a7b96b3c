//! Scalar coercions: string, number and boolean views of every kind.
//!
//! Coercion never fails and never rewrites the stored content. Undefined
//! and non-numeric input produce a default plus a [`Warning`].

use super::numeric::{format_float, parse_numeric_prefix, Number};
use super::{Scalar, Value};
use crate::runtime::{Runtime, Warning};

/// Conversions every value supports.
pub trait Coercible {
    /// String form.
    fn as_string(&self, rt: &Runtime) -> String;

    /// Numeric form, integral when the content is.
    fn as_number(&self, rt: &Runtime) -> Number;

    /// Boolean form. False exactly for undef, the empty string and numeric zero.
    fn as_boolean(&self) -> bool;

    /// Length of the string form in characters. Undef has length zero and
    /// does not warn.
    fn string_length(&self, rt: &Runtime) -> usize;

    /// Integer form, truncated toward zero.
    fn as_integer(&self, rt: &Runtime) -> i64 {
        self.as_number(rt).as_i64()
    }

    fn as_float(&self, rt: &Runtime) -> f64 {
        self.as_number(rt).as_f64()
    }
}

fn addr_number(addr: usize) -> Number {
    Number::Int(i64::try_from(addr).unwrap_or(i64::MAX))
}

/// `Class=KIND(0xADDR)` form of a reference, or the pattern text for an
/// unblessed regex.
fn reference_string(rt: &Runtime, target: &Value) -> String {
    let blessed = target.own_blessing();
    if let (Value::Regex(body), None) = (target, blessed) {
        return body.borrow().compiled().to_string();
    }
    let kind = target.referent_kind_name();
    let addr = target.addr();
    match blessed {
        Some(id) => format!("{}={kind}({addr:#x})", rt.symbols().name(id)),
        None => format!("{kind}({addr:#x})"),
    }
}

impl Coercible for Scalar {
    fn as_string(&self, rt: &Runtime) -> String {
        match self {
            Scalar::Undef => {
                rt.warn(Warning::Uninitialized { op: "string" });
                String::new()
            }
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(f) => format_float(*f),
            Scalar::Str(s) => s.clone(),
            Scalar::Ref(target) => reference_string(rt, target),
        }
    }

    fn as_number(&self, rt: &Runtime) -> Number {
        match self {
            Scalar::Undef => {
                rt.warn(Warning::Uninitialized { op: "numeric" });
                Number::Int(0)
            }
            Scalar::Int(n) => Number::Int(*n),
            Scalar::Float(f) => Number::Float(*f),
            Scalar::Str(s) => {
                let prefix = parse_numeric_prefix(s);
                if prefix.is_lossy() {
                    rt.warn(Warning::NonNumeric { text: s.clone() });
                }
                prefix.number
            }
            Scalar::Ref(target) => addr_number(target.addr()),
        }
    }

    fn as_boolean(&self) -> bool {
        match self {
            Scalar::Undef => false,
            Scalar::Int(n) => *n != 0,
            Scalar::Float(f) => *f != 0.0,
            Scalar::Str(s) => !s.is_empty() && !parse_numeric_prefix(s).number.is_zero(),
            Scalar::Ref(_) => true,
        }
    }

    fn string_length(&self, rt: &Runtime) -> usize {
        match self {
            Scalar::Undef => 0,
            Scalar::Str(s) => s.chars().count(),
            other => other.as_string(rt).chars().count(),
        }
    }
}

impl Coercible for Value {
    fn as_string(&self, rt: &Runtime) -> String {
        match self {
            Value::Scalar(body) => body.borrow().datum.as_string(rt),
            Value::Array(body) => body.borrow().len().to_string(),
            Value::Hash(body) => body.borrow().len().to_string(),
            Value::Glob(body) => format!("*{}", body.borrow().full_name()),
            Value::Regex(body) => body.borrow().compiled().to_string(),
            Value::Code(_) | Value::Handle(_) => reference_string(rt, self),
        }
    }

    fn as_number(&self, rt: &Runtime) -> Number {
        match self {
            Value::Scalar(body) => body.borrow().datum.as_number(rt),
            Value::Array(body) => Number::Int(count(body.borrow().len())),
            Value::Hash(body) => Number::Int(count(body.borrow().len())),
            _ => addr_number(self.addr()),
        }
    }

    fn as_boolean(&self) -> bool {
        match self {
            Value::Scalar(body) => body.borrow().datum.as_boolean(),
            Value::Array(body) => !body.borrow().is_empty(),
            Value::Hash(body) => !body.borrow().is_empty(),
            _ => true,
        }
    }

    fn string_length(&self, rt: &Runtime) -> usize {
        match self {
            Value::Scalar(body) => body.borrow().datum.string_length(rt),
            other => other.as_string(rt).chars().count(),
        }
    }
}

impl Value {
    /// A fresh scalar holding this value's scalar-context content: a copy of
    /// a scalar's datum, the element count of a container, or a reference
    /// to any other kind.
    pub fn as_scalar(&self) -> Value {
        Value::scalar(self.scalar_content())
    }

    pub(crate) fn scalar_content(&self) -> Scalar {
        match self {
            Value::Scalar(body) => body.borrow().datum.clone(),
            Value::Array(body) => Scalar::Int(count(body.borrow().len())),
            Value::Hash(body) => Scalar::Int(count(body.borrow().len())),
            other => Scalar::Ref(other.clone()),
        }
    }

    /// The kind `ref` reports for a referent, distinguishing `REF` from
    /// `SCALAR`.
    pub(crate) fn referent_kind_name(&self) -> &'static str {
        match self {
            Value::Scalar(body) if matches!(body.borrow().datum, Scalar::Ref(_)) => "REF",
            other => other.kind().name(),
        }
    }
}

pub(crate) fn count(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}
