//! Shared, interior-mutable storage for value bodies.

// Rc is the intentional implementation detail of Shared<T>
use std::cell::{BorrowError, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Reference-counted, single-threaded body handle.
///
/// Every `Value` variant holds one of these. Cloning the handle aliases the
/// body (the many-to-one relation between references and their referent);
/// the body lives as long as its longest-lived holder.
///
/// # Thread Safety
/// Not thread-safe. A value graph belongs to one `Runtime`, which runs on a
/// single thread of control.
///
/// # Construction
/// `Shared::new` is crate-private: bodies are created through the `Value`
/// factory methods so every body starts out in a valid state.
#[repr(transparent)]
pub struct Shared<T>(Rc<RefCell<T>>);

impl<T> Shared<T> {
    #[inline]
    pub(crate) fn new(value: T) -> Self {
        Shared(Rc::new(RefCell::new(value)))
    }

    /// Borrow the body immutably.
    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Borrow the body mutably.
    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Borrow without panicking if the body is currently borrowed mutably.
    #[inline]
    pub fn try_borrow(&self) -> Result<Ref<'_, T>, BorrowError> {
        self.0.try_borrow()
    }

    /// Whether two handles refer to the same body.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Identity of the body, stable for as long as it is alive.
    #[inline]
    pub fn addr(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
    }

    /// Number of live handles to this body.
    #[inline]
    pub fn holders(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

impl<T> Clone for Shared<T> {
    #[inline]
    fn clone(&self) -> Self {
        Shared(Rc::clone(&self.0))
    }
}

// Bodies can contain themselves; print identity only.
impl<T> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shared({:#x})", self.addr())
    }
}
