//! Dependency values.
//!
//! Effects gated on structural change take their dependencies as a [`Value`]:
//! a small tagged tree that separates absence, primitives, ordered sequences
//! and keyed records. Build one with `From`, with [`Value::from_serialize`],
//! or with the [`deps!`](crate::deps) macro:
//!
//! ```rust
//! use tether_core::*;
//!
//! let user_id = 7;
//! let filter = "open";
//! let d = deps![user_id, filter];
//! assert_eq!(d.len(), Some(2));
//! ```

use std::collections::{BTreeMap, HashMap};

#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Absent,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Record(BTreeMap<String, Value>),
}

impl Value {
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Value::List(_) | Value::Record(_))
    }

    /// Member count of a composite; `None` for primitives and `Absent`.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::List(items) => Some(items.len()),
            Value::Record(fields) => Some(fields.len()),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::Float(_) => "number",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }

    /// Builds a record from `(name, value)` pairs. Later duplicates win.
    pub fn record<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Record(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Converts anything serializable, going through `serde_json`.
    pub fn from_serialize<T: serde::Serialize + ?Sized>(v: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(v).map(Value::from)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match v {
            Json::Null => Value::Absent,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                // u64 above i64::MAX, or a float
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Value::Str(s),
            Json::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            Json::Object(fields) => {
                Value::Record(fields.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! int_into_value {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Int(n as i64)
            }
        }
    )*};
}

int_into_value!(i8, i16, i32, i64, u8, u16, u32, isize);

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::Float(n as f64),
        }
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::from(n as u64)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Absent, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Value>> From<&[T]> for Value {
    fn from(items: &[T]) -> Self {
        Value::List(items.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(fields: BTreeMap<String, T>) -> Self {
        Value::record(fields)
    }
}

impl<T: Into<Value>> From<HashMap<String, T>> for Value {
    fn from(fields: HashMap<String, T>) -> Self {
        Value::record(fields)
    }
}

// Unlinks nested children onto a heap work-list so dropping a deep tree
// does not recurse.
impl Drop for Value {
    fn drop(&mut self) {
        let mut pending: Vec<Value> = match self {
            Value::List(items) if items.iter().any(Value::is_composite) => std::mem::take(items),
            Value::Record(fields) if fields.values().any(Value::is_composite) => {
                std::mem::take(fields).into_values().collect()
            }
            _ => return,
        };
        while let Some(mut v) = pending.pop() {
            match &mut v {
                Value::List(items) => pending.append(items),
                Value::Record(fields) => pending.extend(std::mem::take(fields).into_values()),
                _ => {}
            }
        }
    }
}

/// Structural equality, see [`crate::deep_equal`].
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        crate::deep_equal(self, other)
    }
}

/// Builds a [`Value::List`] of dependencies.
#[macro_export]
macro_rules! deps {
    () => {
        $crate::Value::List(::std::vec::Vec::new())
    };
    ($($dep:expr),+ $(,)?) => {
        $crate::Value::List(::std::vec![$($crate::Value::from($dep)),+])
    };
}
