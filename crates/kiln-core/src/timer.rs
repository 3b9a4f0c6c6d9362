//! Host repeating timers.
//!
//! Intervals live in a per-thread table and fire from `advance_timers`, which
//! the platform loop (or a test) calls after time has moved on. Deadlines come
//! from the installed [`Clock`](crate::clock::Clock).

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};
use web_time::{Duration, Instant};

use crate::clock;

new_key_type! {
    pub struct TimerId;
}

/// Shortest period an interval may have.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

struct Interval {
    period: Duration,
    next_due: Instant,
    callback: Rc<dyn Fn()>,
}

thread_local! {
    static TIMERS: RefCell<SlotMap<TimerId, Interval>> = RefCell::new(SlotMap::with_key());
}

pub fn set_interval(period: Duration, callback: impl Fn() + 'static) -> TimerId {
    let period = period.max(MIN_PERIOD);
    let next_due = clock::now() + period;
    let id = TIMERS.with(|t| {
        t.borrow_mut().insert(Interval {
            period,
            next_due,
            callback: Rc::new(callback),
        })
    });
    log::trace!("set_interval {id:?} every {period:?}");
    id
}

/// Returns false if the timer was already cleared.
pub fn clear_interval(id: TimerId) -> bool {
    let removed = TIMERS.with(|t| t.borrow_mut().remove(id)).is_some();
    if removed {
        log::trace!("clear_interval {id:?}");
    }
    removed
}

pub fn active_timers() -> usize {
    TIMERS.with(|t| t.borrow().len())
}

/// Fires every interval whose deadline has passed, catching up on missed
/// periods in deadline order. Returns the number of callbacks run.
pub fn advance_timers() -> usize {
    let now = clock::now();
    let mut fired = 0;
    loop {
        let due = TIMERS.with(|t| {
            let mut t = t.borrow_mut();
            let (id, interval) = t
                .iter_mut()
                .filter(|(_, i)| i.next_due <= now)
                .min_by_key(|(_, i)| i.next_due)?;
            interval.next_due += interval.period;
            Some((id, interval.callback.clone()))
        });
        let Some((id, callback)) = due else {
            break;
        };
        log::trace!("interval {id:?} fired");
        callback();
        fired += 1;
    }
    fired
}
