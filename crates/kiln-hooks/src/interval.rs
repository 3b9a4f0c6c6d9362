use std::rc::Rc;

use kiln_core::{
    Dispose, clear_interval, disposable_effect, on_unmount, remember_state, set_interval,
};
use web_time::Duration;

/// Calls `callback` every `delay` while the instance is mounted.
///
/// The timer is only re-registered when `delay` changes. A new `callback` on
/// a later render replaces the old one in place, so the next tick calls it
/// without resetting the period. `None` pauses the timer.
pub fn use_interval(callback: impl Fn() + 'static, delay: Option<Duration>) {
    let saved = remember_state(|| None::<Rc<dyn Fn()>>);
    *saved.borrow_mut() = Some(Rc::new(callback));

    disposable_effect(delay, move || {
        let Some(period) = delay else {
            return Dispose::noop();
        };
        let id = set_interval(period, move || {
            let latest = saved.borrow().clone();
            if let Some(callback) = latest {
                callback();
            }
        });
        log::debug!("use_interval: registered {id:?} every {period:?}");
        on_unmount(move || {
            clear_interval(id);
        })
    });
}
