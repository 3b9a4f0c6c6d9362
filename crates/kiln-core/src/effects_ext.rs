use std::cell::RefCell;

use crate::{Dispose, on_unmount, remember, scoped_effect};

/// Runs `effect` on first render and again whenever `key` changes, running
/// the previous cleanup first. The last cleanup runs on unmount.
pub fn disposable_effect<K: PartialEq + Clone + 'static>(
    key: K,
    effect: impl FnOnce() -> Dispose + 'static,
) {
    let last_key = remember(|| RefCell::new(None::<K>));
    let cleanup_slot = remember(|| RefCell::new(None::<Dispose>));
    let installed = remember(|| RefCell::new(false));

    // One unmount disposer per callsite.
    if !*installed.borrow() {
        *installed.borrow_mut() = true;
        let cleanup_slot = cleanup_slot.clone();
        scoped_effect(move || {
            on_unmount(move || {
                let cleanup = cleanup_slot.borrow_mut().take();
                if let Some(d) = cleanup {
                    d.run();
                }
            })
        });
    }

    let changed = last_key.borrow().as_ref() != Some(&key);
    if changed {
        *last_key.borrow_mut() = Some(key);

        let previous = cleanup_slot.borrow_mut().take();
        if let Some(d) = previous {
            d.run();
        }

        let d = effect();
        *cleanup_slot.borrow_mut() = Some(d);
    }
}
