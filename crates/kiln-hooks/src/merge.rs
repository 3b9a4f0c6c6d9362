use std::rc::Rc;

use crate::shallow::ShallowClone;
use crate::value::Value;

/// A state shape that knows how to fold a patch into itself.
pub trait Merge: ShallowClone + 'static {
    /// Partial value accepted by `merge`.
    type Patch: 'static;

    /// Next value from `self` and `patch`. Only top-level fields are merged;
    /// a nested value in the patch replaces the current one wholesale.
    fn merge(&self, patch: Self::Patch) -> Self;
}

/// Next internal value. `None` is "no patch" and keeps the current reference.
pub fn resolve<T: Merge>(current: &Rc<T>, patch: Option<T::Patch>) -> Rc<T> {
    match patch {
        None => current.clone(),
        Some(patch) => Rc::new(current.merge(patch)),
    }
}

impl Merge for Value {
    type Patch = Value;

    fn merge(&self, patch: Value) -> Value {
        match (self, patch) {
            (Value::Record(current), Value::Record(patch)) => {
                let mut next = current.as_ref().clone();
                next.extend(
                    patch
                        .iter()
                        .map(|(key, value)| (key.clone(), value.clone())),
                );
                Value::Record(Rc::new(next))
            }
            (_, replacement) => replacement,
        }
    }
}

impl<T: Clone + 'static> Merge for Vec<T> {
    type Patch = Vec<T>;

    fn merge(&self, patch: Vec<T>) -> Vec<T> {
        patch
    }
}

impl<T: Clone + 'static> Merge for Option<T> {
    type Patch = Option<T>;

    fn merge(&self, patch: Option<T>) -> Option<T> {
        patch
    }
}

macro_rules! replace_merge {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Merge for $ty {
                type Patch = $ty;

                fn merge(&self, patch: $ty) -> $ty {
                    patch
                }
            }
        )*
    };
}

replace_merge!(
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

/// Declares a record state type together with its patch type.
///
/// ```rust
/// use kiln_hooks::{Merge, record_state};
///
/// record_state! {
///     #[derive(Debug, PartialEq)]
///     pub struct Form => FormPatch {
///         pub name: String,
///         pub age: u32,
///     }
/// }
///
/// let form = Form { name: "Ada".into(), age: 36 };
/// let next = form.merge(FormPatch::default().age(37));
/// assert_eq!(next, Form { name: "Ada".into(), age: 37 });
/// ```
///
/// The patch has one `Option` field per record field (`None` keeps the
/// current field), a builder method per field, and `From<Record>` for full
/// replacement.
#[macro_export]
macro_rules! record_state {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident => $patch:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        #[derive(Clone, Default)]
        $vis struct $patch {
            $( $field_vis $field: ::core::option::Option<$ty>, )*
        }

        impl $patch {
            $(
                #[allow(dead_code)]
                pub fn $field(mut self, value: $ty) -> Self {
                    self.$field = ::core::option::Option::Some(value);
                    self
                }
            )*
        }

        impl ::core::convert::From<$name> for $patch {
            fn from(full: $name) -> Self {
                Self {
                    $( $field: ::core::option::Option::Some(full.$field), )*
                }
            }
        }

        impl $crate::ShallowClone for $name {
            fn shallow_clone(&self) -> Self {
                ::core::clone::Clone::clone(self)
            }
        }

        impl $crate::Merge for $name {
            type Patch = $patch;

            fn merge(&self, patch: $patch) -> Self {
                Self {
                    $(
                        $field: match patch.$field {
                            ::core::option::Option::Some(value) => value,
                            ::core::option::Option::None => {
                                ::core::clone::Clone::clone(&self.$field)
                            }
                        },
                    )*
                }
            }
        }
    };
}
