//! An insertion-ordered sequence with set semantics.
//!
//! [`DataSet`] wraps a vector and adds operations that only insert an item if
//! no equal item is present yet. Equality is chosen per call through a
//! [`Comparator`], so the uniqueness guarantee only holds relative to the
//! comparator each insertion used.
//!
//! Lookups are linear scans.

mod comparator;
pub use comparator::Comparator;

mod item;
pub use item::SetItem;

use std::ops::RangeBounds;

use crate::data::{Value, ValueCoercionError, ValueType};

/// Result of [`DataSet::add_to_set`].
///
/// Sequence-typed items are inserted element by element and report one
/// outcome per element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Single(bool),
    Each(Vec<AddOutcome>),
}

impl AddOutcome {
    pub fn as_single(&self) -> Option<bool> {
        if let Self::Single(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn as_each(&self) -> Option<&[AddOutcome]> {
        if let Self::Each(v) = self {
            Some(v)
        } else {
            None
        }
    }

    /// Number of items that were inserted, including nested outcomes.
    pub fn added_count(&self) -> usize {
        match self {
            Self::Single(added) => usize::from(*added),
            Self::Each(items) => items.iter().map(Self::added_count).sum(),
        }
    }
}

/// A vector that only accepts items not already present.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DataSet<T> {
    items: Vec<T>,
}

impl<T> Default for DataSet<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> DataSet<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Append without checking for duplicates.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Insert at `index` without checking for duplicates.
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, item: T) {
        self.items.insert(index, item);
    }

    /// Remove the element at `index`.
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> T {
        self.items.remove(index)
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.items.retain(f);
    }

    /// Replace `range` with `replace_with` and return the removed elements.
    ///
    /// The replacement is not checked for duplicates.
    pub fn splice<R, I>(&mut self, range: R, replace_with: I) -> Vec<T>
    where
        R: RangeBounds<usize>,
        I: IntoIterator<Item = T>,
    {
        self.items.splice(range, replace_with).collect()
    }

    /// Remove all elements.
    pub fn clear(&mut self) {
        let removed = self.items.len();
        self.items.clear();
        tracing::trace!(removed, "cleared set");
    }
}

impl<T: SetItem> DataSet<T> {
    /// Check if an equal item is present.
    ///
    /// Composite items are compared with `comparator`. Scalars are matched
    /// by value and ignore it.
    pub fn has_item(&self, item: &T, comparator: Comparator<'_, T>) -> bool {
        if item.is_composite() {
            self.items
                .iter()
                .any(|existing| comparator.equal(existing, item))
        } else {
            self.items.iter().any(|existing| existing.deep_eq(item))
        }
    }

    /// [`Self::has_item`] with deep equality.
    pub fn contains(&self, item: &T) -> bool {
        self.has_item(item, Comparator::Deep)
    }

    /// Append `item` unless an equal item is already present.
    ///
    /// Returns `true` if the item was inserted. Absent items are ignored.
    pub fn add_one(&mut self, item: T, comparator: Comparator<'_, T>) -> bool {
        if item.is_absent() || self.has_item(&item, comparator) {
            tracing::trace!(added = false, len = self.items.len(), "add_one");
            return false;
        }
        self.items.push(item);
        tracing::trace!(added = true, len = self.items.len(), "add_one");
        true
    }

    /// [`Self::add_one`] for each item, in order.
    ///
    /// Every item is checked against the current contents, so duplicates
    /// within `items` are only inserted once.
    pub fn add_many<I>(&mut self, items: I, comparator: Comparator<'_, T>) -> Vec<bool>
    where
        I: IntoIterator<Item = T>,
    {
        items
            .into_iter()
            .map(|item| self.add_one(item, comparator))
            .collect()
    }

    /// Insert an item, expanding sequence-typed items.
    ///
    /// A sequence (eg a [`Value::List`]) is not inserted as a whole. Its
    /// elements go through [`Self::add_each_to_set`] instead and the result
    /// is [`AddOutcome::Each`]. Anything else behaves like [`Self::add_one`].
    pub fn add_to_set(&mut self, item: T, comparator: Comparator<'_, T>) -> AddOutcome {
        if item.is_absent() {
            return AddOutcome::Single(false);
        }
        match item.into_items() {
            Ok(items) => AddOutcome::Each(self.add_each_to_set(items, comparator)),
            Err(item) => AddOutcome::Single(self.add_one(item, comparator)),
        }
    }

    /// [`Self::add_to_set`] for each item, in order.
    pub fn add_each_to_set<I>(
        &mut self,
        items: I,
        comparator: Comparator<'_, T>,
    ) -> Vec<AddOutcome>
    where
        I: IntoIterator<Item = T>,
    {
        items
            .into_iter()
            .map(|item| self.add_to_set(item, comparator))
            .collect()
    }

    /// Remove a single matching item and return it.
    ///
    /// For composite items every element is compared and the last match is
    /// removed. Scalars remove their first occurrence.
    pub fn pull(&mut self, item: &T, comparator: Comparator<'_, T>) -> Option<T> {
        let index = if item.is_composite() {
            self.items
                .iter()
                .enumerate()
                .filter(|(_, existing)| comparator.equal(existing, item))
                .map(|(index, _)| index)
                .last()
        } else {
            self.items.iter().position(|existing| existing.deep_eq(item))
        };

        let index = index?;
        let removed = self.items.remove(index);
        tracing::trace!(index, len = self.items.len(), "pulled item from set");
        Some(removed)
    }
}

impl<T> std::ops::Deref for DataSet<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T> std::ops::DerefMut for DataSet<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.items
    }
}

impl<T> AsRef<[T]> for DataSet<T> {
    fn as_ref(&self) -> &[T] {
        &self.items
    }
}

impl<T: SetItem> FromIterator<T> for DataSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.add_many(iter, Comparator::Deep);
        set
    }
}

impl<T: SetItem> Extend<T> for DataSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_many(iter, Comparator::Deep);
    }
}

impl<T> IntoIterator for DataSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a DataSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DataSet<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}

impl<T> From<DataSet<T>> for Vec<T> {
    fn from(set: DataSet<T>) -> Self {
        set.items
    }
}

impl From<DataSet<Value>> for Value {
    fn from(set: DataSet<Value>) -> Self {
        Value::List(set.items)
    }
}

impl TryFrom<Value> for DataSet<Value> {
    type Error = ValueCoercionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::List(items) => Ok(items.into_iter().collect()),
            other => Err(ValueCoercionError::new(ValueType::List, other.value_type())),
        }
    }
}

impl<T: serde::Serialize> serde::Serialize for DataSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.items.serialize(serializer)
    }
}

impl<'de, T> serde::Deserialize<'de> for DataSet<T>
where
    T: SetItem + serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let items = Vec::<T>::deserialize(deserializer)?;
        Ok(items.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::map;

    fn record(id: i64, name: &str) -> Value {
        Value::from(map! { "id": id, "name": name })
    }

    #[test]
    fn test_add_one_is_idempotent() {
        let mut set = DataSet::new();
        let item = record(1, "a");

        assert!(set.add_one(item.clone(), Comparator::Deep));
        assert!(!set.add_one(item.clone(), Comparator::Deep));
        assert_eq!(set.as_slice(), &[item]);
    }

    #[test]
    fn test_add_one_ignores_absent_items() {
        let mut set = DataSet::<Value>::new();
        assert!(!set.add_one(Value::Unit, Comparator::Deep));
        assert_eq!(
            set.add_to_set(Value::Unit, Comparator::Deep),
            AddOutcome::Single(false)
        );
        assert!(set.is_empty());
    }

    #[test]
    fn test_add_many_preserves_order_and_dedups() {
        let mut set = DataSet::new();
        let added = set.add_many(
            vec![record(1, "a"), record(2, "b"), record(1, "a"), record(3, "c")],
            Comparator::Deep,
        );

        assert_eq!(added, vec![true, true, false, true]);
        assert_eq!(
            set.into_vec(),
            vec![record(1, "a"), record(2, "b"), record(3, "c")]
        );
    }

    #[test]
    fn test_add_many_keeps_nested_lists_whole() {
        let mut set = DataSet::new();
        let pair = Value::new_list([1, 2]);

        assert_eq!(
            set.add_many(vec![pair.clone(), pair.clone()], Comparator::Deep),
            vec![true, false]
        );
        assert_eq!(set.as_slice(), &[pair]);
    }

    #[test]
    fn test_add_to_set_expands_lists() {
        let mut set = DataSet::new();
        set.add_one(Value::from(1), Comparator::Deep);

        let outcome = set.add_to_set(
            Value::List(vec![
                Value::from(1),
                Value::from(2),
                Value::new_list([Value::from(2), Value::from(3)]),
            ]),
            Comparator::Deep,
        );

        assert_eq!(
            outcome,
            AddOutcome::Each(vec![
                AddOutcome::Single(false),
                AddOutcome::Single(true),
                AddOutcome::Each(vec![AddOutcome::Single(false), AddOutcome::Single(true)]),
            ])
        );
        assert_eq!(outcome.added_count(), 2);
        assert_eq!(outcome.as_single(), None);
        assert_eq!(outcome.as_each().map(<[AddOutcome]>::len), Some(3));
        assert_eq!(set.as_slice(), &[Value::from(1), Value::from(2), Value::from(3)]);

        assert_eq!(
            set.add_to_set(Value::from(4), Comparator::Deep).as_single(),
            Some(true)
        );
        assert_eq!(
            set.add_to_set(Value::List(vec![]), Comparator::Deep),
            AddOutcome::Each(vec![])
        );
    }

    #[test]
    fn test_key_comparator_rejects_same_key() {
        let mut set = DataSet::new();
        let first = record(1, "a");
        let second = record(1, "b");

        assert!(set.add_one(first.clone(), Comparator::key("id")));
        assert!(set.has_item(&second, Comparator::key("id")));
        assert!(!set.add_one(second.clone(), Comparator::key("id")));
        assert_eq!(set.len(), 1);

        let mut set = DataSet::new();
        assert!(set.add_one(first, Comparator::Deep));
        assert!(!set.has_item(&second, Comparator::Deep));
        assert!(set.add_one(second, Comparator::Deep));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_uniqueness_is_relative_to_comparator() {
        let mut set = DataSet::new();
        set.add_one(record(1, "a"), Comparator::Deep);
        set.add_one(record(1, "b"), Comparator::Deep);

        // Both are present even though they collide under the key comparator.
        assert_eq!(set.len(), 2);
        assert!(!set.add_one(record(1, "c"), Comparator::key("id")));
    }

    #[test]
    fn test_predicate_comparator() {
        let same_len = |a: &Value, b: &Value| {
            a.as_list().map(<[Value]>::len) == b.as_list().map(<[Value]>::len)
        };

        let mut set = DataSet::new();
        assert!(set.add_one(Value::new_list([1, 2]), Comparator::predicate(&same_len)));
        assert!(!set.add_one(Value::new_list([3, 4]), Comparator::predicate(&same_len)));
        assert!(set.add_one(Value::new_list([5]), Comparator::predicate(&same_len)));
    }

    #[test]
    fn test_scalars_ignore_comparator() {
        let never = |_: &Value, _: &Value| false;

        let mut set = DataSet::new();
        assert!(set.add_one(Value::from("a"), Comparator::Deep));
        assert!(set.has_item(&Value::from("a"), Comparator::predicate(&never)));
        assert!(!set.add_one(Value::from("a"), Comparator::key("id")));

        // Numbers are matched by value across representations.
        set.add_one(Value::UInt(1), Comparator::Deep);
        assert!(set.contains(&Value::Int(1)));
    }

    #[test]
    fn test_plain_scalars() {
        let mut set = DataSet::new();
        assert_eq!(
            set.add_many(["a", "b", "a"], Comparator::Deep),
            vec![true, true, false]
        );
        assert_eq!(set.pull(&"a", Comparator::Deep), Some("a"));
        assert_eq!(set.as_slice(), &["b"]);

        let numbers: DataSet<u32> = vec![3, 1, 3, 2, 1].into_iter().collect();
        assert_eq!(numbers.into_vec(), vec![3, 1, 2]);
    }

    #[test]
    fn test_float_scalars_collapse_nan() {
        let mut set = DataSet::new();
        assert_eq!(
            set.add_many([f64::NAN, 1.0, f64::NAN], Comparator::Deep),
            vec![true, true, false]
        );
        assert_eq!(set.len(), 2);
        assert!(set.has_item(&f64::NAN, Comparator::Deep));
    }

    #[test]
    fn test_large_ids_stay_distinct() {
        let two_53 = 9_007_199_254_740_992i64;

        let mut set = DataSet::new();
        assert!(set.add_one(Value::from(two_53 as f64), Comparator::Deep));
        assert!(set.add_one(Value::Int(two_53 + 1), Comparator::Deep));
        assert!(!set.add_one(Value::Int(two_53), Comparator::Deep));
        assert_eq!(set.len(), 2);

        let mut records = DataSet::new();
        assert!(records.add_one(record(two_53, "a"), Comparator::key("id")));
        assert!(records.add_one(record(two_53 + 1, "b"), Comparator::key("id")));
        assert!(!records.add_one(
            Value::from(map! { "id": two_53 as f64, "name": "c" }),
            Comparator::key("id")
        ));
    }

    #[test]
    fn test_pull_removes_last_composite_match() {
        let mut set = DataSet::new();
        set.push(record(1, "a"));
        set.push(record(2, "b"));
        set.push(record(1, "c"));

        let removed = set.pull(&record(1, "z"), Comparator::key("id"));
        assert_eq!(removed, Some(record(1, "c")));
        assert_eq!(set.as_slice(), &[record(1, "a"), record(2, "b")]);
    }

    #[test]
    fn test_pull_removes_first_scalar_match() {
        let mut set = DataSet::new();
        set.push(Value::from(1));
        set.push(Value::from(2));
        set.push(Value::from(1));

        assert_eq!(set.pull(&Value::from(1), Comparator::Deep), Some(Value::from(1)));
        assert_eq!(set.as_slice(), &[Value::from(2), Value::from(1)]);
    }

    #[test]
    fn test_pull_at_index_zero() {
        let mut set = DataSet::new();
        set.add_one(record(1, "a"), Comparator::Deep);
        set.add_one(record(2, "b"), Comparator::Deep);

        assert!(set.pull(&record(1, "a"), Comparator::Deep).is_some());
        assert_eq!(set.as_slice(), &[record(2, "b")]);
    }

    #[test]
    fn test_pull_missing_is_noop() {
        let mut set = DataSet::new();
        assert_eq!(set.pull(&record(1, "a"), Comparator::Deep), None);

        set.add_one(record(1, "a"), Comparator::Deep);
        assert_eq!(set.pull(&record(2, "a"), Comparator::Deep), None);
        assert_eq!(set.pull(&Value::from("a"), Comparator::Deep), None);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut set: DataSet<Value> = vec![record(1, "a"), record(2, "b")].into_iter().collect();
        set.clear();
        assert!(set.is_empty());

        set.clear();
        assert_eq!(set.len(), 0);
        assert!(!set.has_item(&record(1, "a"), Comparator::Deep));
    }

    #[test]
    fn test_sequence_surface() {
        let mut set: DataSet<Value> = (1..=4).map(Value::from).collect();

        assert_eq!(set[0], Value::from(1));
        assert_eq!(set.first(), Some(&Value::from(1)));

        let removed = set.splice(1..3, vec![Value::from(9)]);
        assert_eq!(removed, vec![Value::from(2), Value::from(3)]);
        assert_eq!(set.as_slice(), &[Value::from(1), Value::from(9), Value::from(4)]);

        set.insert(0, Value::from(0));
        assert_eq!(set.remove(1), Value::from(1));
        set.retain(|v| v != &Value::from(9));
        set.truncate(1);
        assert_eq!(set.pop(), Some(Value::from(0)));
        assert!(set.is_empty());
    }

    #[test]
    fn test_value_conversions() {
        let list = Value::from(vec![1, 2, 2, 3]);
        let set = DataSet::<Value>::try_from(list).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(Value::from(set), Value::from(vec![1, 2, 3]));

        let err = DataSet::<Value>::try_from(Value::from("x")).unwrap_err();
        assert_eq!(err.actual_type(), ValueType::String);
    }
}
