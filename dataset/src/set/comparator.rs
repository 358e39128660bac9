use super::SetItem;

/// Decides when two composite items count as the same element.
///
/// Scalars ignore the comparator and are always matched by exact value.
pub enum Comparator<'a, T> {
    /// Deep structural equality, see [`SetItem::deep_eq`].
    Deep,
    /// Items are equal if both carry the field and the field values are
    /// deeply equal.
    ///
    /// A field missing on either side never matches.
    Key(&'a str),
    /// Custom equality.
    Predicate(&'a dyn Fn(&T, &T) -> bool),
}

impl<'a, T> Comparator<'a, T> {
    pub fn key(name: &'a str) -> Self {
        Self::Key(name)
    }

    pub fn predicate<F>(f: &'a F) -> Self
    where
        F: Fn(&T, &T) -> bool,
    {
        Self::Predicate(f)
    }
}

impl<'a, T: SetItem> Comparator<'a, T> {
    /// Compare two items under this comparator.
    pub fn equal(&self, lhs: &T, rhs: &T) -> bool {
        match self {
            Self::Deep => lhs.deep_eq(rhs),
            Self::Key(key) => match (lhs.field(key), rhs.field(key)) {
                (Some(a), Some(b)) => a.deep_eq(b),
                _ => false,
            },
            Self::Predicate(f) => f(lhs, rhs),
        }
    }
}

impl<'a, T> Default for Comparator<'a, T> {
    fn default() -> Self {
        Self::Deep
    }
}

impl<'a, T> Clone for Comparator<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Comparator<'a, T> {}

impl<'a, T> From<&'a str> for Comparator<'a, T> {
    fn from(key: &'a str) -> Self {
        Self::Key(key)
    }
}

impl<'a, T> std::fmt::Debug for Comparator<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deep => f.write_str("Deep"),
            Self::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}
