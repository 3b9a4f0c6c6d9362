use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::instance::Invalidator;
use crate::runtime::{current_invalidator, remember};

type PendingUpdate<T> = Box<dyn FnOnce(&Rc<T>) -> Rc<T>>;

struct SlotCell<T: 'static> {
    value: RefCell<Rc<T>>,
    pending: RefCell<SmallVec<[PendingUpdate<T>; 2]>>,
    invalidator: Invalidator,
}

impl<T: 'static> SlotCell<T> {
    /// Applies queued updates in issue order. Each one sees the value the
    /// previous one produced; updates queued while draining are applied too.
    fn drain(&self) {
        loop {
            let batch = std::mem::take(&mut *self.pending.borrow_mut());
            if batch.is_empty() {
                break;
            }
            for update in batch {
                let current = self.value.borrow().clone();
                let next = update(&current);
                *self.value.borrow_mut() = next;
            }
        }
    }
}

/// A per-instance state slot holding an `Rc<T>`.
///
/// Reference identity of the held `Rc` is the slot's notion of "changed".
pub struct StateSlot<T: 'static> {
    cell: Rc<SlotCell<T>>,
}

/// Registers (first render) or looks up (later renders) a state slot.
pub fn state_slot<T: 'static>(init: impl FnOnce() -> T) -> StateSlot<T> {
    let invalidator = current_invalidator();
    let cell = remember(move || SlotCell {
        value: RefCell::new(Rc::new(init())),
        pending: RefCell::new(SmallVec::new()),
        invalidator,
    });
    StateSlot { cell }
}

impl<T: 'static> StateSlot<T> {
    /// Current value, after applying every update queued since the last read.
    pub fn current(&self) -> Rc<T> {
        self.cell.drain();
        self.cell.value.borrow().clone()
    }

    pub fn setter(&self) -> SlotSetter<T> {
        SlotSetter {
            cell: self.cell.clone(),
        }
    }
}

/// Update handle for a state slot. Every setter of a slot compares equal
/// under `ptr_eq`, for as long as the slot lives.
pub struct SlotSetter<T: 'static> {
    cell: Rc<SlotCell<T>>,
}

impl<T: 'static> SlotSetter<T> {
    /// Queues `update` and schedules a re-render of the owning instance.
    pub fn enqueue(&self, update: impl FnOnce(&Rc<T>) -> Rc<T> + 'static) {
        self.cell.pending.borrow_mut().push(Box::new(update));
        self.cell.invalidator.invalidate();
    }

    pub fn pending(&self) -> usize {
        self.cell.pending.borrow().len()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

impl<T: 'static> Clone for SlotSetter<T> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
        }
    }
}

impl<T: 'static> PartialEq for SlotSetter<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T: 'static> fmt::Debug for SlotSetter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SlotSetter")
            .field(&Rc::as_ptr(&self.cell))
            .finish()
    }
}
