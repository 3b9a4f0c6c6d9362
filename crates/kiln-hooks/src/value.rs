//! Dynamically shaped state.
//!
//! `Value` covers the three shapes a merge state may take: primitives,
//! sequences and records. Sequences and records sit behind an `Rc`, so cloning
//! a `Value` shares its nested structure; `ptr_eq` tells whether two values
//! are the same reference rather than merely equal.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

pub type Record = BTreeMap<String, Value>;

#[derive(Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(Rc<str>),
    Sequence(Rc<Vec<Value>>),
    Record(Rc<Record>),
}

impl Value {
    pub fn record<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Record(Rc::new(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    pub fn empty_record() -> Self {
        Value::Record(Rc::new(Record::new()))
    }

    pub fn sequence<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Self {
        Value::Sequence(Rc::new(items.into_iter().map(Into::into).collect()))
    }

    /// Sequences and records; everything else is a primitive.
    pub fn is_object_like(&self) -> bool {
        matches!(self, Value::Sequence(_) | Value::Record(_))
    }

    /// Reference identity: containers compare by address, primitives by value.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Sequence(a), Value::Sequence(b)) => Rc::ptr_eq(a, b),
            (Value::Record(a), Value::Record(b)) => Rc::ptr_eq(a, b),
            (a, b) if !a.is_object_like() && !b.is_object_like() => a == b,
            _ => false,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Record(map) => map.get(key),
            _ => None,
        }
    }

    pub fn at(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Sequence(items) => items.get(index),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Value::Sequence(items) => items.len(),
            Value::Record(map) => map.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        let map = match self {
            Value::Record(map) => Some(map.keys()),
            _ => None,
        };
        map.into_iter().flatten().map(String::as_str)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    /// Writes a field of this record.
    ///
    /// Copy-on-write: if the record is shared (for instance with the state a
    /// snapshot was taken from) only this copy changes. Writing to a
    /// non-record is ignored. Returns whether the write landed.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        match self {
            Value::Record(map) => {
                Rc::make_mut(map).insert(key.into(), value.into());
                true
            }
            _ => false,
        }
    }

    /// Removes a field of this record, copy-on-write like [`Value::set`].
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        match self {
            Value::Record(map) if map.contains_key(key) => Rc::make_mut(map).remove(key),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s:?}"),
            Value::Sequence(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Record(map) => f.debug_map().entries(map.iter()).finish(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(Rc::new(items))
    }
}

impl From<Record> for Value {
    fn from(map: Record) -> Self {
        Value::Record(Rc::new(map))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Builds a record `Value`: `record! { "a" => 1, "b" => 2 }`.
#[macro_export]
macro_rules! record {
    () => {
        $crate::Value::empty_record()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Value::record([$(($key, $crate::Value::from($value))),+])
    };
}
