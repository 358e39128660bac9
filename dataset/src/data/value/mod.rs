//! Dynamic values for records stored in a [`DataSet`](crate::set::DataSet).

mod map;
pub use map::ValueMap;

mod de;
#[cfg(feature = "json")]
pub use de::{from_value, ValueDeserializeError};

mod ser;
#[cfg(feature = "json")]
pub use ser::{to_value, ValueSerializeError};

use std::collections::{BTreeMap, HashMap};

use anyhow::bail;
use ordered_float::OrderedFloat;

use super::ValueType;

/// Generic value type that can represent any record held by a set.
///
/// The derived [`PartialEq`] is strict: `Int(1)` and `UInt(1)` differ.
/// Membership checks go through [`Value::deep_eq`] instead, which compares
/// numbers by value.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Debug)]
pub enum Value {
    Unit,

    Bool(bool),
    UInt(u64),
    Int(i64),
    Float(OrderedFloat<f64>),
    String(String),
    Bytes(Vec<u8>),

    List(Vec<Self>),
    Map(ValueMap<String>),
}

impl Default for Value {
    fn default() -> Self {
        Self::Unit
    }
}

/// Error for failed value coercions.
#[derive(Debug)]
pub struct ValueCoercionError {
    pub(crate) expected_type: ValueType,
    pub(crate) actual_type: ValueType,
}

impl ValueCoercionError {
    pub fn new(expected_type: ValueType, actual_type: ValueType) -> Self {
        Self {
            expected_type,
            actual_type,
        }
    }

    pub fn expected_type(&self) -> ValueType {
        self.expected_type
    }

    pub fn actual_type(&self) -> ValueType {
        self.actual_type
    }
}

impl std::fmt::Display for ValueCoercionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Value coercion failed: expected {}, got {}",
            self.expected_type, self.actual_type
        )
    }
}

impl std::error::Error for ValueCoercionError {}

impl Value {
    /// Compute the value type of this value.
    pub fn value_type(&self) -> ValueType {
        ValueType::for_value(self)
    }

    /// Build a new [`Value::List`] from an iterator.
    pub fn new_list<V: Into<Self>, I: IntoIterator<Item = V>>(items: I) -> Self {
        Self::List(items.into_iter().map(|v| v.into()).collect())
    }

    /// Look up a field.
    ///
    /// Maps are indexed by key, lists by a decimal position. Scalars have no
    /// fields.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Map(map) => map.get(key),
            Self::List(items) => key.parse::<usize>().ok().and_then(|idx| items.get(idx)),
            _ => None,
        }
    }

    /// Recursive structural equality.
    ///
    /// Maps are compared independent of key order, lists element by element.
    /// Numbers are compared by numeric value, so `Int(1)`, `UInt(1)` and
    /// `Float(1.0)` are all equal.
    pub fn deep_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.deep_eq(y))
            }
            (Self::Map(a), Self::Map(b)) => a.deep_eq(b),
            _ => numeric_eq(self, other).unwrap_or_else(|| self == other),
        }
    }

    /// Returns `true` if the value is [`Value::Unit`].
    pub fn is_unit(&self) -> bool {
        matches!(self, Self::Unit)
    }

    /// Returns `true` for lists and maps.
    pub fn is_container(&self) -> bool {
        !self.value_type().is_scalar()
    }

    /// Returns `true` if the value is [`Value::Bool`].
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(..))
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let Self::Bool(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        if let Self::UInt(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        if let Self::Int(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        if let Self::Float(v) = self {
            Some(**v)
        } else {
            None
        }
    }

    /// Returns `true` if the value is [`Value::String`].
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        if let Self::List(items) = self {
            Some(items)
        } else {
            None
        }
    }

    pub fn as_map(&self) -> Option<&ValueMap<String>> {
        if let Self::Map(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut ValueMap<String>> {
        if let Self::Map(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn try_into_list<T>(self) -> Result<Vec<T>, anyhow::Error>
    where
        T: TryFrom<Value>,
        T::Error: std::error::Error + Send + Sync + 'static,
    {
        if let Self::List(items) = self {
            items
                .into_iter()
                .map(|x| T::try_from(x).map_err(anyhow::Error::from))
                .collect()
        } else {
            bail!("expected list, got {}", self.value_type());
        }
    }
}

/// Compares two numeric values of different representations.
///
/// Returns `None` unless both sides are numbers of different variants.
fn numeric_eq(lhs: &Value, rhs: &Value) -> Option<bool> {
    let eq = match (lhs, rhs) {
        (Value::Int(i), Value::UInt(u)) | (Value::UInt(u), Value::Int(i)) => {
            u64::try_from(*i).map_or(false, |i| i == *u)
        }
        (Value::Float(f), Value::Int(i)) | (Value::Int(i), Value::Float(f)) => {
            float_eq_int(f.into_inner(), i128::from(*i))
        }
        (Value::Float(f), Value::UInt(u)) | (Value::UInt(u), Value::Float(f)) => {
            float_eq_int(f.into_inner(), i128::from(*u))
        }
        _ => return None,
    };
    Some(eq)
}

/// Exact comparison of a float with an integer from the `i64`/`u64` range.
///
/// Only whole floats inside that range can match, so the integer is never
/// rounded to the nearest representable float.
pub(crate) fn float_eq_int(f: f64, n: i128) -> bool {
    const MIN: f64 = -9_223_372_036_854_775_808.0; // -2^63
    const MAX: f64 = 18_446_744_073_709_551_616.0; // 2^64

    f.fract() == 0.0 && (MIN..MAX).contains(&f) && f as i128 == n
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Self::UInt(v.into())
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Self::UInt(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::UInt(v.into())
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Self::Int(v.into())
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Self::Int(v.into())
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float((v as f64).into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v.into())
    }
}

impl<'a> From<&'a str> for Value {
    fn from(v: &'a str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl<'a> From<&'a [u8]> for Value {
    fn from(v: &'a [u8]) -> Self {
        Self::Bytes(v.into())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        let items = v.into_iter().map(Into::into).collect();
        Self::List(items)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Unit,
        }
    }
}

impl From<ValueMap<String>> for Value {
    fn from(v: ValueMap<String>) -> Self {
        Self::Map(v)
    }
}

impl<K, V> From<HashMap<K, V>> for Value
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(v: HashMap<K, V>) -> Self {
        Self::Map(
            v.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<K, V> From<BTreeMap<K, V>> for Value
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(v: BTreeMap<K, V>) -> Self {
        Self::Map(
            v.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl TryFrom<Value> for bool {
    type Error = ValueCoercionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(x) => Ok(x),
            other => Err(ValueCoercionError::new(ValueType::Bool, other.value_type())),
        }
    }
}

impl TryFrom<Value> for u64 {
    type Error = ValueCoercionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::UInt(x) => Ok(x),
            Value::Int(x) if x >= 0 => Ok(x as u64),
            other => Err(ValueCoercionError::new(ValueType::UInt, other.value_type())),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = ValueCoercionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(x) => Ok(x),
            Value::UInt(x) if x <= i64::MAX as u64 => Ok(x as i64),
            other => Err(ValueCoercionError::new(ValueType::Int, other.value_type())),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = ValueCoercionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Float(x) => Ok(x.into_inner()),
            Value::Int(x) => Ok(x as f64),
            Value::UInt(x) => Ok(x as f64),
            other => Err(ValueCoercionError::new(ValueType::Float, other.value_type())),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = ValueCoercionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(v) => Ok(v),
            other => Err(ValueCoercionError::new(
                ValueType::String,
                other.value_type(),
            )),
        }
    }
}
