use std::rc::Rc;

use kiln_core::{Console, host_console};

/// Console that drops everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopConsole;

impl Console for NoopConsole {
    fn log(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

/// The host console, or a [`NoopConsole`] when the host installed none.
pub fn use_console() -> Rc<dyn Console> {
    host_console().unwrap_or_else(|| Rc::new(NoopConsole))
}
