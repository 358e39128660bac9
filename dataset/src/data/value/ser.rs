use super::Value;

impl serde::Serialize for Value {
    #[inline]
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match *self {
            Value::Unit => s.serialize_unit(),
            Value::Bool(v) => s.serialize_bool(v),
            Value::UInt(v) => s.serialize_u64(v),
            Value::Int(v) => s.serialize_i64(v),
            Value::Float(v) => s.serialize_f64(v.into_inner()),
            Value::String(ref v) => s.serialize_str(v),
            Value::Bytes(ref v) => s.serialize_bytes(v.as_slice()),
            Value::List(ref v) => v.serialize(s),
            Value::Map(ref v) => v.serialize(s),
        }
    }
}

#[cfg(feature = "json")]
#[derive(Debug)]
pub struct ValueSerializeError {
    message: String,
}

#[cfg(feature = "json")]
impl std::fmt::Display for ValueSerializeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(feature = "json")]
impl std::error::Error for ValueSerializeError {}

#[cfg(feature = "json")]
impl serde::ser::Error for ValueSerializeError {
    fn custom<T>(msg: T) -> Self
    where
        T: std::fmt::Display,
    {
        Self {
            message: msg.to_string(),
        }
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for ValueSerializeError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// Convert any serializable type into a [`Value`].
///
/// Structs and maps become [`Value::Map`], sequences [`Value::List`].
#[cfg(feature = "json")]
pub fn to_value<T: serde::Serialize>(value: T) -> Result<Value, ValueSerializeError> {
    let json = serde_json::to_value(value)?;
    Ok(json.into())
}

#[cfg(feature = "json")]
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Unit,
            serde_json::Value::Bool(value) => Value::Bool(value),
            serde_json::Value::Number(num) => {
                if let Some(v) = num.as_u64() {
                    Value::UInt(v)
                } else if let Some(v) = num.as_i64() {
                    Value::Int(v)
                } else {
                    // Without arbitrary precision every number is one of the three.
                    Value::Float(num.as_f64().unwrap_or(f64::NAN).into())
                }
            }
            serde_json::Value::String(v) => Value::String(v),
            serde_json::Value::Array(values) => {
                Value::List(values.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

#[cfg(feature = "json")]
impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Unit => serde_json::Value::Null,
            Value::Bool(v) => serde_json::Value::Bool(v),
            Value::UInt(v) => v.into(),
            Value::Int(v) => v.into(),
            // Non-finite floats have no JSON representation and map to null.
            Value::Float(v) => v.into_inner().into(),
            Value::String(v) => serde_json::Value::String(v),
            Value::Bytes(v) => v.into(),
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Map(map) => serde_json::Value::Object(
                map.into_inner()
                    .into_iter()
                    .map(|(key, value)| (key, value.into()))
                    .collect(),
            ),
        }
    }
}
