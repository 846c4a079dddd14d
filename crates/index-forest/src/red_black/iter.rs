use std::iter::FusedIterator;

use crate::error::TreeError;
use crate::node::{Aggregate, NodeRef};
use crate::util::{first, last, next, prev};

use super::tree::RbTree;

/// In-order iterator over values.
pub struct Iter<'a, T, A> {
    tree: &'a RbTree<T, A>,
    front: Option<u32>,
    back: Option<u32>,
    remaining: usize,
}

impl<'a, T, A: Aggregate> Iter<'a, T, A> {
    pub(crate) fn new(tree: &'a RbTree<T, A>) -> Self {
        Self {
            tree,
            front: first(tree.arena(), tree.root_index()),
            back: last(tree.arena(), tree.root_index()),
            remaining: tree.len(),
        }
    }
}

impl<'a, T, A: Aggregate> Iterator for Iter<'a, T, A> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let i = self.front?;
        self.remaining -= 1;
        self.front = next(self.tree.arena(), i);
        Some(self.tree.value_at(i))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, A: Aggregate> DoubleEndedIterator for Iter<'a, T, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let i = self.back?;
        self.remaining -= 1;
        self.back = prev(self.tree.arena(), i);
        Some(self.tree.value_at(i))
    }
}

impl<T, A: Aggregate> ExactSizeIterator for Iter<'_, T, A> {}

impl<T, A: Aggregate> FusedIterator for Iter<'_, T, A> {}

/// Iteration state that does not borrow the tree.
///
/// The cursor remembers the tree's modification counter when it was
/// created; stepping it after any structural change fails with
/// [`TreeError::ConcurrentModification`]. Its position is a [`NodeRef`], so
/// stepping it against a tree whose slots it cannot resolve fails the same
/// way instead of reading a foreign slot.
#[derive(Clone, Debug)]
pub struct Cursor {
    curr: Option<NodeRef>,
    expected_mod_count: u64,
}

impl Cursor {
    pub(crate) fn new(curr: Option<NodeRef>, expected_mod_count: u64) -> Self {
        Self {
            curr,
            expected_mod_count,
        }
    }

    fn locate<T, A: Aggregate>(&self, tree: &RbTree<T, A>) -> Result<Option<u32>, TreeError> {
        if tree.mod_count() != self.expected_mod_count {
            return Err(TreeError::ConcurrentModification);
        }
        match self.curr {
            None => Ok(None),
            Some(node) => tree
                .resolve(node)
                .map(Some)
                .map_err(|_| TreeError::ConcurrentModification),
        }
    }

    /// Handle of the element the cursor currently points at.
    pub fn current<T, A: Aggregate>(
        &self,
        tree: &RbTree<T, A>,
    ) -> Result<Option<NodeRef>, TreeError> {
        Ok(self.locate(tree)?.map(|i| tree.handle(i)))
    }

    /// Yields the current value and advances.
    #[allow(clippy::should_implement_trait)]
    pub fn next<'a, T, A: Aggregate>(
        &mut self,
        tree: &'a RbTree<T, A>,
    ) -> Result<Option<&'a T>, TreeError> {
        let Some(i) = self.locate(tree)? else {
            return Ok(None);
        };
        self.curr = next(tree.arena(), i).map(|n| tree.handle(n));
        Ok(Some(tree.value_at(i)))
    }
}
