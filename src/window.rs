use std::{fmt, ops::Index, rc::Rc, slice};

use itertools::Itertools;
use serde::{Serialize, Serializer};

/// A fixed group of consecutive elements pulled from a source.
///
/// Elements are held through [`Rc`] so that overlapping windows (see
/// [`crate::slices`]) share them instead of cloning. An element is dropped as
/// soon as the last window (or iterator buffer) holding it goes away.
#[derive(PartialEq, Eq, Hash)]
pub struct Window<T> {
    items: Vec<Rc<T>>,
}

pub type Iter<'a, T> = std::iter::Map<slice::Iter<'a, Rc<T>>, fn(&Rc<T>) -> &T>;

fn shared_value<T>(item: &Rc<T>) -> &T {
    item
}

impl<T> Window<T> {
    pub(crate) fn from_shared(items: Vec<Rc<T>>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index).map(shared_value)
    }

    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last().map(shared_value)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.items.iter().map(shared_value as fn(&Rc<T>) -> &T)
    }

    /// The shared handles, for callers that want to keep single elements alive.
    pub fn shared(&self) -> &[Rc<T>] {
        &self.items
    }

    pub fn into_shared(self) -> Vec<Rc<T>> {
        self.items
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Unwraps every element, cloning only those still shared elsewhere.
    pub fn into_values(self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.into_iter().map(Rc::unwrap_or_clone).collect()
    }
}

impl<T> Clone for Window<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<T> Index<usize> for Window<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IntoIterator for Window<T> {
    type Item = Rc<T>;
    type IntoIter = std::vec::IntoIter<Rc<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Window<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for Window<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<T: PartialEq> PartialEq<[T]> for Window<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for Window<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.iter().eq(other.iter())
    }
}

// single element windows keep the trailing comma: `(1,)`
fn trailing_comma(len: usize) -> &'static str {
    if len == 1 { "," } else { "" }
}

impl<T: fmt::Debug> fmt::Debug for Window<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:?}{})",
            self.iter().format(", "),
            trailing_comma(self.len())
        )
    }
}

impl<T: fmt::Display> fmt::Display for Window<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}{})",
            self.iter().format(", "),
            trailing_comma(self.len())
        )
    }
}

impl<T: Serialize> Serialize for Window<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
