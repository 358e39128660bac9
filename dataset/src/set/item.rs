use ordered_float::OrderedFloat;

use crate::data::Value;
#[cfg(feature = "json")]
use crate::data::value::float_eq_int;

/// Element types a [`DataSet`](super::DataSet) can hold.
///
/// The set distinguishes composite items (records and lists), which are
/// matched through a [`Comparator`](super::Comparator), from scalars, which
/// are always matched by exact value.
pub trait SetItem: PartialEq {
    /// Records and lists.
    fn is_composite(&self) -> bool;

    /// The null value. Absent items are never inserted.
    fn is_absent(&self) -> bool {
        false
    }

    /// Field lookup used by [`Comparator::Key`](super::Comparator::Key).
    fn field(&self, key: &str) -> Option<&Self>;

    /// Deep structural equality.
    fn deep_eq(&self, other: &Self) -> bool {
        self == other
    }

    /// Split a sequence-typed item into its elements.
    ///
    /// Non-sequences are handed back unchanged in `Err`.
    fn into_items(self) -> Result<Vec<Self>, Self>
    where
        Self: Sized,
    {
        Err(self)
    }
}

impl SetItem for Value {
    fn is_composite(&self) -> bool {
        self.is_container()
    }

    fn is_absent(&self) -> bool {
        self.is_unit()
    }

    fn field(&self, key: &str) -> Option<&Self> {
        self.get(key)
    }

    fn deep_eq(&self, other: &Self) -> bool {
        Value::deep_eq(self, other)
    }

    fn into_items(self) -> Result<Vec<Self>, Self> {
        match self {
            Value::List(items) => Ok(items),
            other => Err(other),
        }
    }
}

#[cfg(feature = "json")]
impl SetItem for serde_json::Value {
    fn is_composite(&self) -> bool {
        self.is_object() || self.is_array()
    }

    fn is_absent(&self) -> bool {
        self.is_null()
    }

    fn field(&self, key: &str) -> Option<&Self> {
        match self {
            serde_json::Value::Object(map) => map.get(key),
            serde_json::Value::Array(items) => {
                key.parse::<usize>().ok().and_then(|idx| items.get(idx))
            }
            _ => None,
        }
    }

    fn deep_eq(&self, other: &Self) -> bool {
        use serde_json::Value as Json;

        match (self, other) {
            (Json::Array(a), Json::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.deep_eq(y))
            }
            (Json::Object(a), Json::Object(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .all(|(key, value)| b.get(key).map_or(false, |v| value.deep_eq(v)))
            }
            // `1` and `1.0` are distinct json numbers but the same value.
            (Json::Number(a), Json::Number(b)) => a == b || json_number_eq(a, b),
            _ => self == other,
        }
    }

    fn into_items(self) -> Result<Vec<Self>, Self> {
        match self {
            serde_json::Value::Array(items) => Ok(items),
            other => Err(other),
        }
    }
}

/// Integers compare exactly; a float only matches an integer it represents
/// without rounding.
#[cfg(feature = "json")]
fn json_number_eq(a: &serde_json::Number, b: &serde_json::Number) -> bool {
    let int = |n: &serde_json::Number| {
        n.as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from))
    };

    match (int(a), int(b)) {
        (Some(x), Some(y)) => x == y,
        (Some(n), None) => b.as_f64().map_or(false, |f| float_eq_int(f, n)),
        (None, Some(n)) => a.as_f64().map_or(false, |f| float_eq_int(f, n)),
        (None, None) => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
    }
}

macro_rules! scalar_set_item {
    // Floats match the way `Value::Float` does: `NaN` equals `NaN`.
    ( @float $( $ty:ty ),* $(,)? ) => {
        $(
            impl SetItem for $ty {
                #[inline]
                fn is_composite(&self) -> bool {
                    false
                }

                #[inline]
                fn field(&self, _key: &str) -> Option<&Self> {
                    None
                }

                #[inline]
                fn deep_eq(&self, other: &Self) -> bool {
                    OrderedFloat(*self) == OrderedFloat(*other)
                }
            }
        )*
    };
    ( $( $ty:ty ),* $(,)? ) => {
        $(
            impl SetItem for $ty {
                #[inline]
                fn is_composite(&self) -> bool {
                    false
                }

                #[inline]
                fn field(&self, _key: &str) -> Option<&Self> {
                    None
                }
            }
        )*
    };
}

scalar_set_item!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, String, &str,
);
scalar_set_item!(@float f32, f64);
