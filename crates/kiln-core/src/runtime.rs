use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::instance::Invalidator;

thread_local! {
    static CURRENT: RefCell<Option<Rc<RefCell<Composer>>>> = const { RefCell::new(None) };
}

/// Slot table of one component instance.
pub struct Composer {
    pub slots: Vec<Box<dyn Any>>,
    pub cursor: usize,
    pub keyed_slots: HashMap<String, Box<dyn Any>>,
    invalidator: Invalidator,
}

impl Composer {
    pub fn new(invalidator: Invalidator) -> Self {
        Self {
            slots: Vec::new(),
            cursor: 0,
            keyed_slots: HashMap::new(),
            invalidator,
        }
    }

    pub fn invalidator(&self) -> &Invalidator {
        &self.invalidator
    }

    /// Drops every remembered value.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.keyed_slots.clear();
        self.cursor = 0;
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(Invalidator::detached())
    }
}

/// Installs a composer as the current one for the duration of a render pass.
/// The previously installed composer (if any) is restored on drop, so
/// instances may be mounted from inside another instance's render.
pub struct ComposeGuard {
    prev: Option<Rc<RefCell<Composer>>>,
}

impl ComposeGuard {
    pub fn begin(composer: Rc<RefCell<Composer>>) -> Self {
        composer.borrow_mut().cursor = 0;
        let prev = CURRENT.with(|c| c.replace(Some(composer)));
        ComposeGuard { prev }
    }
}

impl Drop for ComposeGuard {
    fn drop(&mut self) {
        let prev = self.prev.take();
        CURRENT.with(|c| {
            *c.borrow_mut() = prev;
        });
    }
}

pub fn is_composing() -> bool {
    CURRENT.with(|c| c.borrow().is_some())
}

/// Runs `f` against the composer of the instance currently rendering.
///
/// Panics when called outside a render pass: hooks have no slot table to
/// attach to there.
pub fn with_composer<R>(f: impl FnOnce(&mut Composer) -> R) -> R {
    let Some(composer) = CURRENT.with(|c| c.borrow().clone()) else {
        panic!("kiln: hooks can only be called while an Instance is rendering");
    };
    let mut c = composer.borrow_mut();
    f(&mut c)
}

pub(crate) fn current_invalidator() -> Invalidator {
    with_composer(|c| c.invalidator.clone())
}

/// Slot-based remember (sequential composition only).
///
/// `init` runs while the slot table is borrowed and must not call hooks.
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    with_composer(|c| {
        let cursor = c.cursor;
        c.cursor += 1;

        if cursor >= c.slots.len() {
            let rc: Rc<T> = Rc::new(init());
            c.slots.push(Box::new(rc.clone()));
            return rc;
        }

        if let Some(rc) = c.slots[cursor].downcast_ref::<Rc<T>>() {
            rc.clone()
        } else {
            log::warn!(
                "remember: slot {} type changed; replacing. \
                 If this is due to conditional composition, prefer remember_with_key.",
                cursor
            );
            let rc: Rc<T> = Rc::new(init());
            c.slots[cursor] = Box::new(rc.clone());
            rc
        }
    })
}

/// Key-based remember
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    with_composer(|c| {
        let key = key.into();

        if let Some(existing) = c.keyed_slots.get(&key) {
            if let Some(rc) = existing.downcast_ref::<Rc<T>>() {
                return rc.clone();
            }
            log::warn!(
                "remember_with_key: key '{}' reused with a different type; replacing.",
                key
            );
        }

        let rc: Rc<T> = Rc::new(init());
        c.keyed_slots.insert(key, Box::new(rc.clone()));
        rc
    })
}

pub fn remember_state<T: 'static>(init: impl FnOnce() -> T) -> Rc<RefCell<T>> {
    remember(|| RefCell::new(init()))
}

pub fn remember_state_with_key<T: 'static>(
    key: impl Into<String>,
    init: impl FnOnce() -> T,
) -> Rc<RefCell<T>> {
    remember_with_key(key, || RefCell::new(init()))
}
