//! Dynamic field access for records whose shape is only known at call time.

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};

/// The value found under a field name.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// The record has no field with that name.
    Absent,
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// A nested array or object, held as its joined text form (`[1, 2]` is `"1,2"`).
    ///
    /// Always truthy, even when empty. Coerces like its text form, so `[7]` orders as 7.
    Compound(String),
}

impl FieldValue {
    /// Mirrors the truthiness rules of the display layer that feeds the ordering utility.
    ///
    /// `Absent`, `Null`, `false`, `0`, `-0`, `NaN` and `""` are falsy, everything else is truthy.
    /// Note that whitespace-only text is truthy.
    pub fn is_falsy(&self) -> bool {
        match self {
            FieldValue::Absent | FieldValue::Null => true,
            FieldValue::Bool(b) => !b,
            FieldValue::Number(n) => *n == 0.0 || n.is_nan(),
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Compound(_) => false,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Absent | FieldValue::Null)
    }
}

impl From<f64> for FieldValue {
    fn from(val: f64) -> Self {
        FieldValue::Number(val)
    }
}

impl From<i64> for FieldValue {
    fn from(val: i64) -> Self {
        FieldValue::Number(val as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(val: i32) -> Self {
        FieldValue::Number(val as f64)
    }
}

impl From<u32> for FieldValue {
    fn from(val: u32) -> Self {
        FieldValue::Number(val as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(val: bool) -> Self {
        FieldValue::Bool(val)
    }
}

impl From<&str> for FieldValue {
    fn from(val: &str) -> Self {
        FieldValue::Text(val.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(val: String) -> Self {
        FieldValue::Text(val)
    }
}

impl<T> From<Option<T>> for FieldValue
where
    T: Into<FieldValue>,
{
    fn from(val: Option<T>) -> Self {
        match val {
            Some(inner) => inner.into(),
            None => FieldValue::Null,
        }
    }
}

impl From<&Value> for FieldValue {
    fn from(val: &Value) -> Self {
        match val {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(*b),
            // Every JSON number is representable as f64, possibly with precision loss for
            // very large integers.
            Value::Number(n) => FieldValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => FieldValue::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => FieldValue::Compound(joined_text(val)),
        }
    }
}

fn joined_text(val: &Value) -> String {
    match val {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string()),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(joined_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_owned(),
    }
}

impl From<Value> for FieldValue {
    fn from(val: Value) -> Self {
        FieldValue::from(&val)
    }
}

/// Capability of looking up a field by name at runtime.
///
/// Implement this for any record type that should be ordered by `order::order_by_field`.
/// Plain structs can use the [`field_access!`](crate::field_access) macro.
pub trait FieldAccess {
    fn field_value(&self, name: &str) -> FieldValue;
}

impl<R: FieldAccess + ?Sized> FieldAccess for &R {
    fn field_value(&self, name: &str) -> FieldValue {
        (**self).field_value(name)
    }
}

impl<R: FieldAccess + ?Sized> FieldAccess for Box<R> {
    fn field_value(&self, name: &str) -> FieldValue {
        (**self).field_value(name)
    }
}

impl FieldAccess for Map<String, Value> {
    fn field_value(&self, name: &str) -> FieldValue {
        self.get(name).map_or(FieldValue::Absent, FieldValue::from)
    }
}

impl FieldAccess for Value {
    fn field_value(&self, name: &str) -> FieldValue {
        match self {
            Value::Object(map) => map.field_value(name),
            _ => FieldValue::Absent,
        }
    }
}

impl<V> FieldAccess for HashMap<String, V>
where
    V: Clone + Into<FieldValue>,
{
    fn field_value(&self, name: &str) -> FieldValue {
        self.get(name)
            .map_or(FieldValue::Absent, |val| val.clone().into())
    }
}

impl<V> FieldAccess for BTreeMap<String, V>
where
    V: Clone + Into<FieldValue>,
{
    fn field_value(&self, name: &str) -> FieldValue {
        self.get(name)
            .map_or(FieldValue::Absent, |val| val.clone().into())
    }
}

/// Implements [`FieldAccess`] for a struct by listing the fields that may be looked up by name.
///
/// ```ignore
/// struct MenuEntry { id: String, priority: Option<u32> }
/// field_order::field_access!(MenuEntry { id, priority });
/// ```
///
/// Every listed field type must implement `Clone + Into<FieldValue>`. Unlisted names resolve to
/// `FieldValue::Absent`.
#[macro_export]
macro_rules! field_access {
    ($record:ty { $($field:ident),* $(,)? }) => {
        impl $crate::record::FieldAccess for $record {
            fn field_value(&self, name: &str) -> $crate::record::FieldValue {
                match name {
                    $(
                        stringify!($field) => {
                            $crate::record::FieldValue::from(self.$field.clone())
                        }
                    )*
                    _ => $crate::record::FieldValue::Absent,
                }
            }
        }
    };
}
