//! A list that always holds at least one element.

use std::fmt;

/// A sequence guaranteed non-empty by construction.
///
/// Used to carry accumulated failures, so "no failures" is `Ok` and can
/// never be confused with an empty failure list.
///
/// The items live on the heap, so a failure type may hold a
/// `NonEmptyList` of itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyList<A> {
    // never empty
    items: Vec<A>,
}

impl<A> NonEmptyList<A> {
    pub fn new(head: A) -> Self {
        Self { items: vec![head] }
    }

    pub fn of(head: A, tail: impl IntoIterator<Item = A>) -> Self {
        let mut items = vec![head];
        items.extend(tail);
        Self { items }
    }

    /// Returns `None` for an empty vector.
    pub fn from_vec(items: Vec<A>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self { items })
        }
    }

    pub fn head(&self) -> &A {
        &self.items[0]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false. Present for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn push(&mut self, item: A) {
        self.items.push(item);
    }

    /// Append every element of `other`, keeping order.
    pub fn append(&mut self, other: NonEmptyList<A>) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> impl Iterator<Item = &A> {
        self.items.iter()
    }

    pub fn map<B>(self, f: impl FnMut(A) -> B) -> NonEmptyList<B> {
        NonEmptyList {
            items: self.items.into_iter().map(f).collect(),
        }
    }

    pub fn into_vec(self) -> Vec<A> {
        self.items
    }
}

impl<A> IntoIterator for NonEmptyList<A> {
    type Item = A;
    type IntoIter = std::vec::IntoIter<A>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<A> From<A> for NonEmptyList<A> {
    fn from(head: A) -> Self {
        Self::new(head)
    }
}

impl<A: fmt::Display> fmt::Display for NonEmptyList<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}
