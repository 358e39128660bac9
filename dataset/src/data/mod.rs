pub mod value;
pub use value::{Value, ValueCoercionError, ValueMap};

#[cfg(feature = "json")]
pub use value::{from_value, to_value, ValueDeserializeError, ValueSerializeError};

mod value_type;
pub use value_type::ValueType;

/// A record: string keys mapped to values.
pub type DataMap = ValueMap<String>;

/// Build a [`DataMap`] from `"key": value` pairs.
#[macro_export]
macro_rules! map {
    {
        $( $key:literal : $value:expr  ),* $(,)?
    } => {
        {
            #[allow(unused_mut)]
            let mut map = $crate::data::DataMap::new();
            $(
                {
                    let key = $key.to_string();
                    map.insert(key, $value.into());
                }

            )*

            map
        }

    };
}
