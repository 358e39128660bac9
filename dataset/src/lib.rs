//! Insertion-ordered sequences with set semantics.
//!
//! A [`DataSet`](set::DataSet) behaves like a vector whose insert operations
//! skip items that are already present. What "already present" means is
//! decided per call by a [`Comparator`](set::Comparator): deep structural
//! equality, equality of a single field, or a custom predicate.
//!
//! ```
//! use dataset::{map, prelude::*};
//!
//! let mut people = DataSet::new();
//! assert!(people.add_one(Value::from(map! { "id": 1, "name": "jimmy" }), Comparator::Deep));
//! assert!(!people.add_one(Value::from(map! { "id": 1, "name": "erin" }), Comparator::key("id")));
//! assert_eq!(people.len(), 1);
//! ```

pub type AnyError = anyhow::Error;

#[macro_use]
pub mod data;
pub mod error;
pub mod set;

pub mod prelude;
