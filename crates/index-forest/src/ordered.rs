//! Comparator-ordered collections on top of the [`RbTree`] engine.

use std::fmt::Debug;

use crate::error::{InvariantError, TreeError};
use crate::node::{Aggregate, NodeRef};
use crate::red_black::{Iter, RbTree};
use crate::types::default_comparator;
use crate::util::{next, prev};

/// Red-black tree kept in strictly ascending comparator order.
///
/// `A` selects the per-node aggregate; see [`SortedSet`] and
/// [`SortedList`](crate::SortedList).
#[derive(Clone)]
pub struct OrderedTree<T, C = fn(&T, &T) -> i32, A = ()>
where
    C: Fn(&T, &T) -> i32,
{
    pub(crate) tree: RbTree<T, A>,
    comparator: C,
}

/// Ordered set without rank support.
pub type SortedSet<T, C = fn(&T, &T) -> i32> = OrderedTree<T, C, ()>;

impl<T, A> OrderedTree<T, fn(&T, &T) -> i32, A>
where
    T: PartialOrd,
    A: Aggregate,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<T>)
    }

    /// Builds from values that are already strictly ascending.
    pub fn from_sorted<I>(values: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = Self::new();
        tree.add_all_sorted(values)?;
        Ok(tree)
    }
}

impl<T, A> Default for OrderedTree<T, fn(&T, &T) -> i32, A>
where
    T: PartialOrd,
    A: Aggregate,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C, A> OrderedTree<T, C, A>
where
    C: Fn(&T, &T) -> i32,
    A: Aggregate,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            tree: RbTree::new(),
            comparator,
        }
    }

    #[inline]
    fn compare(&self, a: &T, b: &T) -> i32 {
        (self.comparator)(a, b)
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Read-only access to the underlying engine.
    pub fn tree(&self) -> &RbTree<T, A> {
        &self.tree
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub(crate) fn closest_index(&self, value: &T) -> Option<(u32, i32)> {
        self.tree.closest_index(|probe| self.compare(value, probe.value))
    }

    /// Node where a search for `value` ends and the comparison there.
    pub fn closest(&self, value: &T) -> Option<(NodeRef, i32)> {
        self.closest_index(value).map(|(i, c)| (self.tree.handle(i), c))
    }

    pub fn find(&self, value: &T) -> Option<NodeRef> {
        match self.closest(value) {
            Some((node, 0)) => Some(node),
            _ => None,
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    pub fn get(&self, node: NodeRef) -> Result<&T, TreeError> {
        self.tree.get(node)
    }

    /// Inserts `value` unless an equal element is present.
    pub fn add(&mut self, value: T) -> bool {
        self.insert(value).is_ok()
    }

    /// Inserts `value`, returning its handle, or gives the value back when an
    /// equal element is present.
    pub fn insert(&mut self, value: T) -> Result<NodeRef, T> {
        match self.closest_index(&value) {
            Some((_, 0)) => Err(value),
            Some((i, cmp)) => {
                let idx = self.tree.insert_at_index(Some(i), cmp > 0, value);
                Ok(self.tree.handle(idx))
            }
            None => {
                let idx = self.tree.insert_at_index(None, true, value);
                Ok(self.tree.handle(idx))
            }
        }
    }

    /// Positional insert next to `location`. The value must fit between the
    /// new neighbors; this is checked in debug builds and with the
    /// `strict-checks` feature.
    pub fn insert_at(
        &mut self,
        location: Option<NodeRef>,
        prefer_right: bool,
        value: T,
    ) -> Result<NodeRef, TreeError> {
        let node = self.tree.insert_at(location, prefer_right, value)?;
        self.check_order(node.index);
        Ok(node)
    }

    pub(crate) fn check_order(&self, idx: u32) {
        if !cfg!(any(debug_assertions, feature = "strict-checks")) {
            return;
        }
        let arena = self.tree.arena();
        let value = self.tree.value_at(idx);
        if let Some(p) = prev(arena, idx) {
            assert!(
                self.compare(self.tree.value_at(p), value) < 0,
                "order violated: predecessor does not compare less than inserted value"
            );
        }
        if let Some(n) = next(arena, idx) {
            assert!(
                self.compare(value, self.tree.value_at(n)) < 0,
                "order violated: successor does not compare greater than inserted value"
            );
        }
    }

    /// Inserts ascending values, using O(n) bulk construction when the tree is
    /// empty. Returns how many values were inserted.
    ///
    /// Into an empty tree the input must be strictly ascending. Otherwise each
    /// value is placed next to the previous one when it fits there, and
    /// searched for when it does not; duplicates are skipped.
    pub fn add_all_sorted<I>(&mut self, values: I) -> Result<usize, TreeError>
    where
        I: IntoIterator<Item = T>,
    {
        if self.tree.is_empty() {
            let values: Vec<T> = values.into_iter().collect();
            if values.windows(2).any(|w| self.compare(&w[0], &w[1]) >= 0) {
                return Err(TreeError::OrderViolated);
            }
            let n = values.len();
            self.tree.build_from(values)?;
            return Ok(n);
        }

        let mut hint: Option<u32> = None;
        let mut inserted = 0;
        for value in values {
            let fits = hint.is_some_and(|h| {
                self.compare(self.tree.value_at(h), &value) < 0
                    && next(self.tree.arena(), h)
                        .map_or(true, |n| self.compare(&value, self.tree.value_at(n)) < 0)
            });
            if let (true, Some(h)) = (fits, hint) {
                hint = Some(self.tree.insert_at_index(Some(h), true, value));
                inserted += 1;
                continue;
            }
            if let Ok(node) = self.insert(value) {
                hint = Some(node.index);
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    pub fn remove(&mut self, value: &T) -> Option<T> {
        let idx = self.find(value)?.index;
        Some(self.tree.remove_index(idx).0)
    }

    pub fn remove_node(&mut self, node: NodeRef) -> Result<T, TreeError> {
        Ok(self.tree.remove(node)?.value)
    }

    pub fn first(&self) -> Option<&T> {
        self.tree.first().map(|n| self.tree.value_at(n.index))
    }

    pub fn last(&self) -> Option<&T> {
        self.tree.last().map(|n| self.tree.value_at(n.index))
    }

    pub fn pop_first(&mut self) -> Option<T> {
        let node = self.tree.first()?;
        Some(self.tree.remove_index(node.index).0)
    }

    pub fn pop_last(&mut self) -> Option<T> {
        let node = self.tree.last()?;
        Some(self.tree.remove_index(node.index).0)
    }

    /// First element that is not less than `value`.
    pub fn lower_bound(&self, value: &T) -> Option<NodeRef> {
        let (i, cmp) = self.closest_index(value)?;
        if cmp <= 0 {
            Some(self.tree.handle(i))
        } else {
            next(self.tree.arena(), i).map(|n| self.tree.handle(n))
        }
    }

    /// First element greater than `value`.
    pub fn upper_bound(&self, value: &T) -> Option<NodeRef> {
        let (i, cmp) = self.closest_index(value)?;
        if cmp < 0 {
            Some(self.tree.handle(i))
        } else {
            next(self.tree.arena(), i).map(|n| self.tree.handle(n))
        }
    }

    /// Last element that is not greater than `value`.
    pub fn floor(&self, value: &T) -> Option<NodeRef> {
        let (i, cmp) = self.closest_index(value)?;
        if cmp >= 0 {
            Some(self.tree.handle(i))
        } else {
            prev(self.tree.arena(), i).map(|p| self.tree.handle(p))
        }
    }

    pub fn clear(&mut self) {
        self.tree.clear()
    }

    pub fn iter(&self) -> Iter<'_, T, A> {
        self.tree.iter()
    }

    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        self.tree.assert_valid_with(&self.comparator)
    }
}

impl<T: Debug, C, A> Debug for OrderedTree<T, C, A>
where
    C: Fn(&T, &T) -> i32,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.tree, f)
    }
}

impl<'a, T, C, A> IntoIterator for &'a OrderedTree<T, C, A>
where
    C: Fn(&T, &T) -> i32,
    A: Aggregate,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
