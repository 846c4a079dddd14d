//! Generic collection view over tree-backed containers.

use tracing::trace;

use crate::error::TreeError;
use crate::node::{Aggregate, Count};
use crate::order_statistics::{unsupported, IndexedList};
use crate::ordered::OrderedTree;
use crate::red_black::Iter;

/// Collection operations shared by every tree-backed container, independent
/// of how the container orders its elements.
///
/// Value lookups return `Result` because containers without an ordering
/// reject them instead of scanning.
pub trait TreeCollection<T> {
    type Iter<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;

    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn iter(&self) -> Self::Iter<'_>;

    /// Adds `value`; returns whether the collection changed.
    fn add(&mut self, value: T) -> bool;

    /// Removes one element equal to `value`; returns whether it was present.
    fn remove(&mut self, value: &T) -> Result<bool, TreeError>;

    fn contains(&self, value: &T) -> Result<bool, TreeError>;

    fn clear(&mut self);

    fn add_all<I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = T>,
        Self: Sized,
    {
        let mut changed = false;
        for value in values {
            changed |= self.add(value);
        }
        changed
    }

    fn remove_all<'v, I>(&mut self, values: I) -> Result<bool, TreeError>
    where
        I: IntoIterator<Item = &'v T>,
        T: 'v,
        Self: Sized,
    {
        let mut changed = false;
        for value in values {
            changed |= self.remove(value)?;
        }
        Ok(changed)
    }

    fn contains_all<'v, I>(&self, values: I) -> Result<bool, TreeError>
    where
        I: IntoIterator<Item = &'v T>,
        T: 'v,
        Self: Sized,
    {
        for value in values {
            if !self.contains(value)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Always rejected: keeping only matching elements is a full scan.
    fn retain_all<'v, I>(&mut self, _values: I) -> Result<bool, TreeError>
    where
        I: IntoIterator<Item = &'v T>,
        T: 'v,
        Self: Sized,
    {
        Err(unsupported("retain_all"))
    }

    fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let out: Vec<T> = self.iter().cloned().collect();
        trace!(len = out.len(), "to_vec");
        out
    }
}

impl<T, C, A> TreeCollection<T> for OrderedTree<T, C, A>
where
    C: Fn(&T, &T) -> i32,
    A: Aggregate,
{
    type Iter<'a>
        = Iter<'a, T, A>
    where
        Self: 'a,
        T: 'a;

    fn size(&self) -> usize {
        OrderedTree::len(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        OrderedTree::iter(self)
    }

    fn add(&mut self, value: T) -> bool {
        OrderedTree::add(self, value)
    }

    fn remove(&mut self, value: &T) -> Result<bool, TreeError> {
        Ok(OrderedTree::remove(self, value).is_some())
    }

    fn contains(&self, value: &T) -> Result<bool, TreeError> {
        Ok(OrderedTree::contains(self, value))
    }

    fn clear(&mut self) {
        OrderedTree::clear(self)
    }
}

impl<T> TreeCollection<T> for IndexedList<T> {
    type Iter<'a>
        = Iter<'a, T, Count>
    where
        Self: 'a,
        T: 'a;

    fn size(&self) -> usize {
        IndexedList::len(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        IndexedList::iter(self)
    }

    fn add(&mut self, value: T) -> bool {
        self.push(value);
        true
    }

    fn remove(&mut self, _value: &T) -> Result<bool, TreeError> {
        Err(unsupported("remove"))
    }

    fn contains(&self, value: &T) -> Result<bool, TreeError> {
        IndexedList::contains(self, value)
    }

    fn clear(&mut self) {
        IndexedList::clear(self)
    }
}
