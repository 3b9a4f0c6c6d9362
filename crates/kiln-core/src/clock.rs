use std::cell::{Cell, RefCell};
use std::rc::Rc;

use web_time::{Duration, Instant};

pub trait Clock: 'static {
    fn now(&self) -> Instant;
}

pub struct SystemClock;
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock you drive by hand. Clones share the same time.
#[derive(Clone)]
pub struct ManualClock {
    t: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(t: Instant) -> Self {
        Self {
            t: Rc::new(Cell::new(t)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.t.set(self.t.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.t.get()
    }
}

thread_local! {
    static CLOCK: RefCell<Rc<dyn Clock>> = RefCell::new(Rc::new(SystemClock));
}

/// Install the clock timers read on this thread. Defaults to `SystemClock`.
pub fn set_clock(clock: impl Clock) {
    CLOCK.with(|c| *c.borrow_mut() = Rc::new(clock));
}

pub fn now() -> Instant {
    let clock = CLOCK.with(|c| c.borrow().clone());
    clock.now()
}
