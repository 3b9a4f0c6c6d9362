use std::rc::Rc;

use crate::value::Value;

/// One-level-deep copy.
///
/// The copy is a new top-level value; anything it contains by reference
/// (nested records, `Rc` fields) is shared with the original, not copied.
/// Primitives are returned as they are.
pub trait ShallowClone {
    fn shallow_clone(&self) -> Self;
}

impl ShallowClone for Value {
    fn shallow_clone(&self) -> Self {
        match self {
            Value::Sequence(items) => Value::Sequence(Rc::new(items.as_ref().clone())),
            Value::Record(map) => Value::Record(Rc::new(map.as_ref().clone())),
            primitive => primitive.clone(),
        }
    }
}

impl<T: Clone> ShallowClone for Vec<T> {
    fn shallow_clone(&self) -> Self {
        self.clone()
    }
}

impl<T: Clone> ShallowClone for Option<T> {
    fn shallow_clone(&self) -> Self {
        self.clone()
    }
}

macro_rules! primitive_shallow_clone {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ShallowClone for $ty {
                fn shallow_clone(&self) -> Self {
                    self.clone()
                }
            }
        )*
    };
}

primitive_shallow_clone!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &'static str,
    Rc<str>,
);
