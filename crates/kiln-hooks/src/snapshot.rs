use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::shallow::ShallowClone;

/// Read-only view of a state value, handed out to a render.
///
/// A snapshot owns a shallow copy of the state it was built from and only
/// derefs immutably, so nothing written through it can reach that state. Code
/// that wants to edit takes a copy with [`Snapshot::to_owned_value`]; edits
/// to the copy stay local.
pub struct Snapshot<T>(Rc<T>);

impl<T: ShallowClone> Snapshot<T> {
    pub fn of(value: &T) -> Self {
        Snapshot(Rc::new(value.shallow_clone()))
    }

    /// A detached, editable copy of the viewed value.
    pub fn to_owned_value(&self) -> T {
        self.0.shallow_clone()
    }
}

impl<T> Snapshot<T> {
    /// Whether two snapshots are the same view (not just equal values).
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Snapshot(self.0.clone())
    }
}

impl<T> Deref for Snapshot<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> AsRef<T> for Snapshot<T> {
    fn as_ref(&self) -> &T {
        &self.0
    }
}

impl<T: PartialEq> PartialEq for Snapshot<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: fmt::Debug> fmt::Debug for Snapshot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl<T: fmt::Display> fmt::Display for Snapshot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}
