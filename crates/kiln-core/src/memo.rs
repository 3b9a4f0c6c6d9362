use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::runtime::remember;

/// Recomputes `compute` only when `deps` differs from the previous render's.
pub fn memo<D, T>(deps: D, compute: impl FnOnce(&D) -> T) -> T
where
    D: PartialEq + 'static,
    T: Clone + 'static,
{
    let cache = remember(|| RefCell::new(None::<(D, T)>));
    let mut cache = cache.borrow_mut();

    if let Some((prev, value)) = cache.as_ref()
        && *prev == deps
    {
        return value.clone();
    }

    let value = compute(&deps);
    *cache = Some((deps, value.clone()));
    value
}

/// Compares an `Rc` by address instead of by value, for use in `memo` deps.
pub struct ByAddress<T: ?Sized>(pub Rc<T>);

impl<T: ?Sized> Clone for ByAddress<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: ?Sized> PartialEq for ByAddress<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> Eq for ByAddress<T> {}

impl<T: ?Sized> fmt::Debug for ByAddress<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByAddress({:p})", Rc::as_ptr(&self.0))
    }
}
