//! Class identity: blessing, `ref` names and method lookup.
//!
//! Identity operations use invocant semantics. A scalar holding a reference
//! acts on its referent (`bless $ref, 'C'`, `ref($ref)`); a container acts on
//! itself; a scalar holding a string names a class for class-method calls.

use tracing::debug;

use crate::errors::{ValueError, ValueResult};
use crate::pattern::RegexBody;
use crate::runtime::Runtime;
use crate::stash::StashId;
use crate::value::{
    ArrayBody, CodeBody, GlobBody, HandleBody, HashBody, Scalar, ScalarBody, SharedCode, Value,
};

/// Capability to carry a class association.
pub trait Blessable {
    fn blessed(&self) -> Option<StashId>;

    /// Replace the association. Blessing never stacks.
    fn set_blessed(&mut self, stash: Option<StashId>);
}

macro_rules! impl_blessable {
    ($($body:ty),* $(,)?) => {
        $(
            impl Blessable for $body {
                #[inline]
                fn blessed(&self) -> Option<StashId> {
                    self.blessed
                }

                #[inline]
                fn set_blessed(&mut self, stash: Option<StashId>) {
                    self.blessed = stash;
                }
            }
        )*
    };
}

impl_blessable!(ScalarBody, ArrayBody, HashBody, CodeBody, GlobBody, HandleBody, RegexBody);

impl Value {
    /// Blessing of this value's own body.
    pub(crate) fn own_blessing(&self) -> Option<StashId> {
        each_body!(self, body => body.borrow().blessed())
    }

    fn set_own_blessing(&self, stash: Option<StashId>) {
        each_body!(self, body => body.borrow_mut().set_blessed(stash));
    }

    /// The value identity operations act on, `None` for a plain scalar.
    fn invocant(&self) -> Option<Value> {
        match self {
            Value::Scalar(_) => self.referent(),
            other => Some(other.clone()),
        }
    }

    /// Associate the invocant with `stash`, replacing any prior class.
    pub fn bless(&self, stash: StashId) -> ValueResult<()> {
        let target = self.invocant().ok_or(ValueError::CannotBless)?;
        debug!(kind = %target.kind(), stash = ?stash, "bless");
        target.set_own_blessing(Some(stash));
        Ok(())
    }

    pub fn is_blessed(&self) -> bool {
        self.blessed().is_some()
    }

    /// Class of the invocant, if blessed.
    pub fn blessed(&self) -> Option<StashId> {
        match self.invocant() {
            Some(target) => target.own_blessing(),
            None => self.own_blessing(),
        }
    }

    /// Class name if blessed, otherwise the kind name of the invocant
    /// (`SCALAR`, `REF`, `ARRAY`, `HASH`, `CODE`, `GLOB`, `IO`, `Regexp`).
    pub fn reference_type_string(&self, rt: &Runtime) -> String {
        if let Some(id) = self.blessed() {
            return rt.symbols().name(id).to_string();
        }
        match self.invocant() {
            Some(target) => target.referent_kind_name().to_string(),
            None => self.kind().name().to_string(),
        }
    }

    /// Perl's `ref`: empty for anything that is not a reference.
    pub fn ref_name(&self, rt: &Runtime) -> String {
        match self {
            Value::Scalar(_) if !self.is_reference() => String::new(),
            _ => self.reference_type_string(rt),
        }
    }

    /// Class a method call on this value dispatches through: the invocant's
    /// blessing, or the stash named by a plain string.
    pub fn dispatch_class(&self, rt: &Runtime) -> Option<StashId> {
        if let Some(id) = self.blessed() {
            return Some(id);
        }
        let Value::Scalar(body) = self else {
            return None;
        };
        let body = body.borrow();
        match &body.datum {
            Scalar::Str(class) => rt.symbols().lookup(class),
            _ => None,
        }
    }

    /// Resolve method `name` for this invocant. `None` is an ordinary
    /// negative outcome.
    pub fn find_method(&self, rt: &Runtime, name: &str) -> Option<SharedCode> {
        let Some(class) = self.dispatch_class(rt) else {
            debug!(method = name, "method call on unblessed value");
            return None;
        };
        rt.symbols().find_method(class, name)
    }

    /// `UNIVERSAL::isa`: whether the invocant's class is `class` or derives
    /// from it.
    pub fn is_a(&self, rt: &Runtime, class: &str) -> bool {
        match (self.dispatch_class(rt), rt.symbols().lookup(class)) {
            (Some(own), Some(ancestor)) => rt.symbols().is_subclass(own, ancestor),
            (None, _) => self.is_reference() && self.reference_type_string(rt) == class,
            (Some(_), None) => false,
        }
    }
}
