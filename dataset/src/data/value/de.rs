use serde::de;
use std::{collections::BTreeMap, fmt};

use super::Value;

pub struct ValueVisitor;

impl<'de> de::Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str("any value")
    }

    fn visit_bool<E>(self, value: bool) -> Result<Value, E> {
        Ok(Value::Bool(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Value, E> {
        Ok(Value::Int(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Value, E> {
        Ok(Value::UInt(value))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Value, E> {
        Ok(Value::Float(value.into()))
    }

    fn visit_char<E>(self, value: char) -> Result<Value, E> {
        Ok(Value::String(value.into()))
    }

    fn visit_str<E>(self, value: &str) -> Result<Value, E> {
        Ok(Value::String(value.to_string()))
    }

    fn visit_string<E>(self, value: String) -> Result<Value, E> {
        Ok(Value::String(value))
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Unit)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Unit)
    }

    fn visit_some<D: de::Deserializer<'de>>(self, d: D) -> Result<Value, D::Error> {
        d.deserialize_any(ValueVisitor)
    }

    fn visit_newtype_struct<D: de::Deserializer<'de>>(self, d: D) -> Result<Value, D::Error> {
        d.deserialize_any(ValueVisitor)
    }

    fn visit_seq<V: de::SeqAccess<'de>>(self, mut visitor: V) -> Result<Value, V::Error> {
        let mut values = Vec::with_capacity(visitor.size_hint().unwrap_or_default());
        while let Some(elem) = visitor.next_element()? {
            values.push(elem);
        }
        Ok(Value::List(values))
    }

    fn visit_map<V: de::MapAccess<'de>>(self, mut visitor: V) -> Result<Value, V::Error> {
        let mut values = BTreeMap::new();
        while let Some((key, value)) = visitor.next_entry::<String, Value>()? {
            values.insert(key, value);
        }
        Ok(Value::Map(values.into()))
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Value, E> {
        Ok(Value::Bytes(v.into()))
    }

    fn visit_byte_buf<E>(self, v: Vec<u8>) -> Result<Value, E> {
        Ok(Value::Bytes(v))
    }
}

impl<'de> de::Deserialize<'de> for Value {
    fn deserialize<D: de::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_any(ValueVisitor)
    }
}

/// Convert a [`Value`] into any deserializable type.
#[cfg(feature = "json")]
pub fn from_value<T: de::DeserializeOwned>(value: Value) -> Result<T, ValueDeserializeError> {
    let json = serde_json::Value::from(value);
    serde_json::from_value(json).map_err(ValueDeserializeError::from)
}

#[cfg(feature = "json")]
#[derive(Debug)]
pub struct ValueDeserializeError {
    message: String,
}

#[cfg(feature = "json")]
impl ValueDeserializeError {
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(feature = "json")]
impl de::Error for ValueDeserializeError {
    fn custom<T>(msg: T) -> Self
    where
        T: fmt::Display,
    {
        Self {
            message: msg.to_string(),
        }
    }
}

#[cfg(feature = "json")]
impl std::error::Error for ValueDeserializeError {}

#[cfg(feature = "json")]
impl fmt::Display for ValueDeserializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value deserialization failed: {}", self.message)
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for ValueDeserializeError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}
