use std::fmt;
use std::rc::Rc;

/// A shared, argument-less callback compared by identity.
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn()>);

impl Callback {
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self) {
        (self.0)()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Rc<dyn Fn()>> for Callback {
    fn from(f: Rc<dyn Fn()>) -> Self {
        Self(f)
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Rc::as_ptr(&self.0))
    }
}
