//! The shallow-merge state container.

use std::fmt;
use std::rc::Rc;

use kiln_core::{ByAddress, SlotSetter, memo, state_slot};

use crate::merge::{Merge, resolve};
use crate::snapshot::Snapshot;

type Compute<T> = Box<dyn FnOnce(&Snapshot<T>) -> Option<<T as Merge>::Patch>>;

/// A state change, as data.
pub enum Update<T: Merge> {
    /// Merge a partial value; `None` leaves the state untouched.
    Patch(Option<T::Patch>),
    /// Compute the patch from a snapshot of the latest state.
    Compute(Compute<T>),
}

/// Update entry point of a [`use_merge_state`] container.
///
/// Every handle for a container is `ptr_eq` to every other for as long as the
/// component instance lives, whatever the state goes through.
pub struct SetState<T: Merge> {
    slot: SlotSetter<T>,
}

impl<T: Merge> SetState<T> {
    /// Shallow-merges `patch` into the state.
    pub fn set(&self, patch: impl Into<Option<T::Patch>>) {
        let patch = patch.into();
        self.slot.enqueue(move |current| resolve(current, patch));
    }

    /// Computes a patch (or a full value) from the latest state when the
    /// update is applied, not when it is issued.
    pub fn update<P>(&self, f: impl FnOnce(&Snapshot<T>) -> P + 'static)
    where
        P: Into<Option<T::Patch>>,
    {
        self.slot.enqueue(move |current| {
            let patch = f(&Snapshot::of(&**current)).into();
            resolve(current, patch)
        });
    }

    pub fn dispatch(&self, update: Update<T>) {
        match update {
            Update::Patch(patch) => self.set(patch),
            Update::Compute(f) => self.update(f),
        }
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.slot.ptr_eq(&other.slot)
    }
}

impl<T: Merge> Clone for SetState<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T: Merge> PartialEq for SetState<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T: Merge> fmt::Debug for SetState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SetState").field(&self.slot).finish()
    }
}

/// State container with shallow-merge updates.
///
/// The first render stores a shallow copy of `initial`; later renders ignore
/// it. Returns a snapshot of the current state, memoized so it only changes
/// when the state does, and the stable update handle.
pub fn use_merge_state<T: Merge>(initial: T) -> (Snapshot<T>, SetState<T>) {
    use_merge_state_with(move || initial)
}

/// Like [`use_merge_state`], with the initial value computed on first render
/// only.
pub fn use_merge_state_with<T: Merge>(init: impl FnOnce() -> T) -> (Snapshot<T>, SetState<T>) {
    let slot = state_slot(|| init().shallow_clone());
    let current: Rc<T> = slot.current();
    let snapshot = memo(ByAddress(current), |value| Snapshot::of(&*value.0));
    let set_state = SetState {
        slot: slot.setter(),
    };
    (snapshot, set_state)
}
