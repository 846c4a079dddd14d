//! Rank/select on trees augmented with subtree [`Count`]s.
//!
//! Two flavors share the same engine: [`SortedList`] keeps values in
//! comparator order and adds rank queries; [`IndexedList`] has no ordering
//! at all and is addressed purely by position.

use std::fmt::Debug;

use tracing::debug;

use crate::error::{InvariantError, TreeError};
use crate::node::{Count, NodeRef};
use crate::ordered::OrderedTree;
use crate::red_black::{Cursor, Iter, RbTree};

/// Value-ordered list with O(log n) positional access.
pub type SortedList<T, C = fn(&T, &T) -> i32> = OrderedTree<T, C, Count>;

#[inline]
fn count(a: Option<&Count>) -> usize {
    a.map_or(0, |c| c.0)
}

impl<T> RbTree<T, Count> {
    pub(crate) fn index_at(&self, index: usize) -> Option<u32> {
        if index >= self.len() {
            return None;
        }
        let mut remaining = index;
        self.find_index(|probe| {
            let left = count(probe.left);
            if remaining < left {
                -1
            } else if remaining == left {
                0
            } else {
                remaining -= left + 1;
                1
            }
        })
    }

    /// Handle of the element at in-order position `index`.
    pub fn node_at(&self, index: usize) -> Option<NodeRef> {
        self.index_at(index).map(|i| self.handle(i))
    }

    pub(crate) fn rank_of(&self, idx: u32) -> usize {
        let arena = self.arena();
        let mut index = count(arena[idx as usize].l.map(|l| self.aggregate_at(l)));
        let mut curr = idx;
        while let Some(p) = arena[curr as usize].p {
            if arena[p as usize].r == Some(curr) {
                index += count(arena[p as usize].l.map(|l| self.aggregate_at(l))) + 1;
            }
            curr = p;
        }
        index
    }

    /// In-order position of `node`.
    pub fn index_of_node(&self, node: NodeRef) -> Result<usize, TreeError> {
        let idx = self.resolve(node)?;
        Ok(self.rank_of(idx))
    }
}

impl<T, C> OrderedTree<T, C, Count>
where
    C: Fn(&T, &T) -> i32,
{
    /// Element at in-order position `index`.
    pub fn get_at(&self, index: usize) -> Option<&T> {
        self.tree.index_at(index).map(|i| self.tree.value_at(i))
    }

    pub fn node_at(&self, index: usize) -> Option<NodeRef> {
        self.tree.node_at(index)
    }

    pub fn index_of_node(&self, node: NodeRef) -> Result<usize, TreeError> {
        self.tree.index_of_node(node)
    }

    /// Replaces the element at `index`, returning the previous one. The new
    /// value must sort into the same position; this is checked like
    /// [`insert_at`](OrderedTree::insert_at).
    pub fn set_at(&mut self, index: usize, value: T) -> Result<T, TreeError> {
        let idx = self.tree.index_at(index).ok_or(TreeError::IndexOutOfBounds {
            index,
            len: self.len(),
        })?;
        let (idx, prev) = self.tree.replace_index(idx, value);
        self.check_order(idx);
        Ok(prev)
    }

    /// Inserts `value` so that it ends up at position `index`. The value must
    /// fit between its new neighbors.
    pub fn insert_at_index(&mut self, index: usize, value: T) -> Result<NodeRef, TreeError> {
        let len = self.len();
        let idx = match index {
            i if i == len => self.tree.insert_at_index(None, true, value),
            i if i < len => {
                let at = self
                    .tree
                    .index_at(i)
                    .ok_or(TreeError::IndexOutOfBounds { index, len })?;
                self.tree.insert_at_index(Some(at), false, value)
            }
            _ => return Err(TreeError::IndexOutOfBounds { index, len }),
        };
        self.check_order(idx);
        Ok(self.tree.handle(idx))
    }

    pub fn remove_at(&mut self, index: usize) -> Result<T, TreeError> {
        let idx = self.tree.index_at(index).ok_or(TreeError::IndexOutOfBounds {
            index,
            len: self.len(),
        })?;
        Ok(self.tree.remove_index(idx).0)
    }

    /// Position of `value`, if present.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        let node = self.find(value)?;
        Some(self.tree.rank_of(node.index))
    }

    /// Number of elements strictly less than `value`.
    pub fn rank(&self, value: &T) -> usize {
        let mut rank = 0;
        let comparator = self.comparator();
        self.tree.closest_index(|probe| {
            if comparator(value, probe.value) > 0 {
                rank += count(probe.left) + 1;
                1
            } else {
                -1
            }
        });
        rank
    }
}

/// List addressed only by position, with O(log n) insert and remove at any
/// index.
///
/// There is no ordering between elements, so value lookups would have to scan
/// the whole list; they are rejected with [`TreeError::Unsupported`].
#[derive(Clone)]
pub struct IndexedList<T> {
    tree: RbTree<T, Count>,
}

impl<T> Default for IndexedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IndexedList<T> {
    pub fn new() -> Self {
        Self {
            tree: RbTree::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: RbTree::with_capacity(capacity),
        }
    }

    /// Read-only access to the underlying engine.
    pub fn tree(&self) -> &RbTree<T, Count> {
        &self.tree
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    fn locate(&self, index: usize) -> Result<u32, TreeError> {
        self.tree.index_at(index).ok_or(TreeError::IndexOutOfBounds {
            index,
            len: self.len(),
        })
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.tree.index_at(index).map(|i| self.tree.value_at(i))
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let node = self.tree.node_at(index)?;
        self.tree.get_mut(node).ok()
    }

    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    pub fn last(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Replaces the element at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, TreeError> {
        let idx = self.locate(index)?;
        Ok(self.tree.replace_index(idx, value).1)
    }

    /// Inserts `value` so that it ends up at position `index`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<NodeRef, TreeError> {
        let len = self.len();
        let idx = match index {
            i if i == len => self.tree.insert_at_index(None, true, value),
            i if i < len => {
                let at = self.locate(i)?;
                self.tree.insert_at_index(Some(at), false, value)
            }
            _ => return Err(TreeError::IndexOutOfBounds { index, len }),
        };
        Ok(self.tree.handle(idx))
    }

    /// Inserts a run of values starting at position `index`.
    pub fn insert_all<I>(&mut self, index: usize, values: I) -> Result<(), TreeError>
    where
        I: IntoIterator<Item = T>,
    {
        let len = self.len();
        if index > len {
            return Err(TreeError::IndexOutOfBounds { index, len });
        }
        let location = self.tree.node_at(index);
        let prefer_right = location.is_none();
        self.tree.insert_range(location, prefer_right, values)?;
        Ok(())
    }

    pub fn push(&mut self, value: T) -> NodeRef {
        let idx = self.tree.insert_at_index(None, true, value);
        self.tree.handle(idx)
    }

    pub fn pop(&mut self) -> Option<T> {
        let node = self.tree.last()?;
        Some(self.tree.remove_index(node.index).0)
    }

    pub fn remove(&mut self, index: usize) -> Result<T, TreeError> {
        let idx = self.locate(index)?;
        Ok(self.tree.remove_index(idx).0)
    }

    /// Removes up to `count` elements starting at `index`.
    pub fn remove_range(&mut self, index: usize, count: usize) -> Result<Vec<T>, TreeError> {
        if count == 0 && index <= self.len() {
            return Ok(Vec::new());
        }
        let idx = self.locate(index)?;
        let first = self.tree.handle(idx);
        self.tree.remove_range(first, count)
    }

    pub fn node_at(&self, index: usize) -> Option<NodeRef> {
        self.tree.node_at(index)
    }

    pub fn index_of_node(&self, node: NodeRef) -> Result<usize, TreeError> {
        self.tree.index_of_node(node)
    }

    pub fn contains(&self, _value: &T) -> Result<bool, TreeError> {
        Err(unsupported("contains"))
    }

    pub fn index_of(&self, _value: &T) -> Result<usize, TreeError> {
        Err(unsupported("index_of"))
    }

    pub fn last_index_of(&self, _value: &T) -> Result<usize, TreeError> {
        Err(unsupported("last_index_of"))
    }

    pub fn clear(&mut self) {
        self.tree.clear()
    }

    pub fn iter(&self) -> Iter<'_, T, Count> {
        self.tree.iter()
    }

    pub fn cursor(&self) -> Cursor {
        self.tree.cursor()
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.tree.to_vec()
    }

    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        self.tree.assert_valid()
    }
}

pub(crate) fn unsupported(op: &'static str) -> TreeError {
    debug!(op, "rejected linear-time operation");
    TreeError::Unsupported(op)
}

impl<T> FromIterator<T> for IndexedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.tree
            .build_from(iter)
            .expect("a fresh list is always empty");
        list
    }
}

impl<T> Extend<T> for IndexedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: Debug> Debug for IndexedList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.tree, f)
    }
}

impl<'a, T> IntoIterator for &'a IndexedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, Count>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
