//! Errors raised when converting between [`Value`](crate::data::Value) and
//! other types.
//!
//! Set operations themselves never fail.

pub use crate::data::ValueCoercionError;

#[cfg(feature = "json")]
pub use crate::data::{ValueDeserializeError, ValueSerializeError};
