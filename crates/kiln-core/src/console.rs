use std::cell::RefCell;
use std::rc::Rc;

/// Host logging object.
pub trait Console {
    fn log(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards to the `log` facade under the `console` target.
pub struct LogConsole;

impl Console for LogConsole {
    fn log(&self, message: &str) {
        log::info!(target: "console", "{message}");
    }

    fn warn(&self, message: &str) {
        log::warn!(target: "console", "{message}");
    }

    fn error(&self, message: &str) {
        log::error!(target: "console", "{message}");
    }
}

thread_local! {
    static HOST_CONSOLE: RefCell<Option<Rc<dyn Console>>> = const { RefCell::new(None) };
}

/// Installs the host console, returning the one it replaces.
pub fn install_console(console: Rc<dyn Console>) -> Option<Rc<dyn Console>> {
    HOST_CONSOLE.with(|c| c.replace(Some(console)))
}

pub fn uninstall_console() -> Option<Rc<dyn Console>> {
    HOST_CONSOLE.with(|c| c.borrow_mut().take())
}

pub fn host_console() -> Option<Rc<dyn Console>> {
    HOST_CONSOLE.with(|c| c.borrow().clone())
}
