pub use crate::{
    data::{DataMap, Value, ValueMap, ValueType},
    set::{AddOutcome, Comparator, DataSet, SetItem},
};

#[cfg(feature = "json")]
pub use crate::data::{from_value, to_value};
