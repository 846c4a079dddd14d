use std::fmt::Debug;

use tracing::{debug, trace};

use crate::error::{InvariantError, TreeError};
use crate::node::{on_children_changed, propagate, Aggregate, NodeRef, Probe, RbNode};
use crate::types::Node;
use crate::util::{self, assign, first, last, most_left, most_right, next, prev, relink_parent};

use super::iter::{Cursor, Iter};
use super::util::{fix_insertion, fix_removal};
use super::{print, validate};

/// Outcome of removing a single node.
#[derive(Debug)]
pub struct Removed<T> {
    pub value: T,
    /// In-order successor of the removed value, at its current position.
    ///
    /// When the removed node had two children the successor's value is moved
    /// into the removed slot, so this handle differs from any handle issued
    /// for the successor before the removal.
    pub next: Option<NodeRef>,
}

/// Arena-backed red-black tree engine.
///
/// The engine knows nothing about ordering: callers pick positions through
/// [`closest`](Self::closest) probes or neighbor handles and insert with
/// [`insert_at`](Self::insert_at). `A` is recomputed bottom-up after every
/// structural change.
#[derive(Clone)]
pub struct RbTree<T, A = ()> {
    arena: Vec<RbNode<T, A>>,
    free: Vec<u32>,
    root: Option<u32>,
    len: usize,
    mod_count: u64,
}

impl<T, A: Aggregate> Default for RbTree<T, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: Aggregate> RbTree<T, A> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Vec::with_capacity(capacity),
            free: Vec::new(),
            root: None,
            len: 0,
            mod_count: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Structural modification counter.
    pub fn mod_count(&self) -> u64 {
        self.mod_count
    }

    pub fn arena(&self) -> &[RbNode<T, A>] {
        &self.arena
    }

    pub fn root(&self) -> Option<NodeRef> {
        self.root.map(|i| self.handle(i))
    }

    pub fn root_aggregate(&self) -> Option<&A> {
        self.root.map(|i| &self.arena[i as usize].a)
    }

    pub fn height(&self) -> usize {
        util::height(&self.arena, self.root)
    }

    pub(crate) fn root_index(&self) -> Option<u32> {
        self.root
    }

    #[inline]
    pub(crate) fn handle(&self, idx: u32) -> NodeRef {
        NodeRef {
            index: idx,
            generation: self.arena[idx as usize].g,
        }
    }

    /// Resolves a handle to a live arena index.
    pub(crate) fn resolve(&self, node: NodeRef) -> Result<u32, TreeError> {
        match self.arena.get(node.index as usize) {
            Some(n) if n.g == node.generation && n.is_live() => Ok(node.index),
            _ => {
                debug!(index = node.index, "rejected stale node handle");
                Err(TreeError::UseAfterFree)
            }
        }
    }

    /// Value stored at a live arena index.
    #[inline]
    pub(crate) fn value_at(&self, idx: u32) -> &T {
        self.arena[idx as usize]
            .v
            .as_ref()
            .expect("reachable node holds a value")
    }

    #[inline]
    pub(crate) fn aggregate_at(&self, idx: u32) -> &A {
        &self.arena[idx as usize].a
    }

    pub fn get(&self, node: NodeRef) -> Result<&T, TreeError> {
        let idx = self.resolve(node)?;
        Ok(self.value_at(idx))
    }

    /// Mutable access to a value. Changing how the value orders is the
    /// caller's responsibility.
    pub fn get_mut(&mut self, node: NodeRef) -> Result<&mut T, TreeError> {
        let idx = self.resolve(node)?;
        Ok(self.arena[idx as usize]
            .v
            .as_mut()
            .expect("resolved node holds a value"))
    }

    pub fn aggregate(&self, node: NodeRef) -> Result<&A, TreeError> {
        let idx = self.resolve(node)?;
        Ok(self.aggregate_at(idx))
    }

    pub fn first(&self) -> Option<NodeRef> {
        first(&self.arena, self.root).map(|i| self.handle(i))
    }

    pub fn last(&self) -> Option<NodeRef> {
        last(&self.arena, self.root).map(|i| self.handle(i))
    }

    pub fn next(&self, node: NodeRef) -> Result<Option<NodeRef>, TreeError> {
        let idx = self.resolve(node)?;
        Ok(next(&self.arena, idx).map(|i| self.handle(i)))
    }

    pub fn prev(&self, node: NodeRef) -> Result<Option<NodeRef>, TreeError> {
        let idx = self.resolve(node)?;
        Ok(prev(&self.arena, idx).map(|i| self.handle(i)))
    }

    fn alloc(&mut self, value: T) -> u32 {
        match self.free.pop() {
            Some(idx) => {
                let g = self.arena[idx as usize].g;
                self.arena[idx as usize] = RbNode::new(value, g);
                idx
            }
            None => {
                self.arena.push(RbNode::new(value, 0));
                (self.arena.len() - 1) as u32
            }
        }
    }

    /// Detaches a slot from the arena's live set, returning its value.
    fn release(&mut self, idx: u32) -> Option<T> {
        let n = &mut self.arena[idx as usize];
        n.p = None;
        n.l = None;
        n.r = None;
        n.g = n.g.wrapping_add(1);
        let value = n.v.take();
        self.free.push(idx);
        value
    }

    /// Walks from the root following `probe`, returning the last node
    /// visited and the probe result there.
    ///
    /// A negative result means the target lies left of the node, positive
    /// means right, zero stops the walk.
    pub fn closest<F>(&self, probe: F) -> Option<(NodeRef, i32)>
    where
        F: FnMut(Probe<'_, T, A>) -> i32,
    {
        self.closest_index(probe).map(|(i, c)| (self.handle(i), c))
    }

    /// [`closest`](Self::closest) filtered to an exact hit.
    pub fn find<F>(&self, probe: F) -> Option<NodeRef>
    where
        F: FnMut(Probe<'_, T, A>) -> i32,
    {
        self.find_index(probe).map(|i| self.handle(i))
    }

    pub(crate) fn closest_index<F>(&self, mut probe: F) -> Option<(u32, i32)>
    where
        F: FnMut(Probe<'_, T, A>) -> i32,
    {
        let mut curr = self.root?;
        loop {
            let n = &self.arena[curr as usize];
            let cmp = probe(Probe {
                value: self.value_at(curr),
                aggregate: &n.a,
                left: n.l.map(|l| &self.arena[l as usize].a),
                right: n.r.map(|r| &self.arena[r as usize].a),
            });
            let step = match cmp {
                0 => None,
                c if c < 0 => n.l,
                _ => n.r,
            };
            match step {
                Some(s) => curr = s,
                None => return Some((curr, cmp)),
            }
        }
    }

    pub(crate) fn find_index<F>(&self, probe: F) -> Option<u32>
    where
        F: FnMut(Probe<'_, T, A>) -> i32,
    {
        match self.closest_index(probe) {
            Some((i, 0)) => Some(i),
            _ => None,
        }
    }

    /// Inserts `value` immediately after (`prefer_right`) or before
    /// `location` in in-order sequence.
    ///
    /// With no location the value becomes the root of an empty tree, or the
    /// new last (`prefer_right`) or first element.
    pub fn insert_at(
        &mut self,
        location: Option<NodeRef>,
        prefer_right: bool,
        value: T,
    ) -> Result<NodeRef, TreeError> {
        let location = location.map(|l| self.resolve(l)).transpose()?;
        let idx = self.insert_at_index(location, prefer_right, value);
        Ok(self.handle(idx))
    }

    pub(crate) fn insert_at_index(
        &mut self,
        location: Option<u32>,
        prefer_right: bool,
        value: T,
    ) -> u32 {
        let idx = self.alloc(value);
        self.len += 1;
        self.mod_count += 1;

        let (parent, right) = match (location, self.root) {
            (_, None) => {
                self.arena[idx as usize].b = true;
                self.root = Some(idx);
                return idx;
            }
            (None, Some(root)) if prefer_right => (most_right(&self.arena, root), true),
            (None, Some(root)) => (most_left(&self.arena, root), false),
            (Some(loc), Some(_)) => match self.arena[loc as usize].child(prefer_right) {
                None => (loc, prefer_right),
                Some(c) if prefer_right => (most_left(&self.arena, c), false),
                Some(c) => (most_right(&self.arena, c), true),
            },
        };

        assign(&mut self.arena, parent, right, Some(idx));
        propagate(&mut self.arena, Some(parent));
        self.root = fix_insertion(&mut self.arena, self.root, idx);
        idx
    }

    /// Inserts a run of values contiguously after (`prefer_right`) or before
    /// `location`, keeping their iteration order. Returns the handle of the
    /// last inserted value.
    pub fn insert_range<I>(
        &mut self,
        location: Option<NodeRef>,
        prefer_right: bool,
        values: I,
    ) -> Result<Option<NodeRef>, TreeError>
    where
        I: IntoIterator<Item = T>,
    {
        let location = location.map(|l| self.resolve(l)).transpose()?;
        if self.root.is_none() {
            self.build_from(values)?;
            return Ok(self.last());
        }

        let mut values = values.into_iter();
        let Some(head) = values.next() else {
            return Ok(None);
        };
        let mut curr = self.insert_at_index(location, prefer_right, head);
        let mut count = 1usize;
        for value in values {
            curr = self.insert_at_index(Some(curr), true, value);
            count += 1;
        }
        trace!(count, "insert_range");
        Ok(Some(self.handle(curr)))
    }

    /// Removes the node at `node`.
    pub fn remove(&mut self, node: NodeRef) -> Result<Removed<T>, TreeError> {
        let idx = self.resolve(node)?;
        let (value, next) = self.remove_index(idx);
        Ok(Removed {
            value,
            next: next.map(|i| self.handle(i)),
        })
    }

    /// Removes `count` consecutive values starting at `first`, stopping early
    /// at the end of the tree.
    pub fn remove_range(&mut self, first: NodeRef, count: usize) -> Result<Vec<T>, TreeError> {
        let mut curr = Some(self.resolve(first)?);
        let mut out = Vec::with_capacity(count.min(self.len));
        while let Some(idx) = curr {
            if out.len() == count {
                break;
            }
            let (value, next) = self.remove_index(idx);
            out.push(value);
            curr = next;
        }
        trace!(count = out.len(), "remove_range");
        Ok(out)
    }

    /// Returns the removed value and the arena index now holding its
    /// in-order successor.
    pub(crate) fn remove_index(&mut self, z: u32) -> (T, Option<u32>) {
        self.len -= 1;
        self.mod_count += 1;

        let z_node = &self.arena[z as usize];
        let (y, value, successor) = match (z_node.l, z_node.r) {
            (Some(_), Some(r)) => {
                // Move the successor's value up; only its slot is spliced out.
                let y = most_left(&self.arena, r);
                let moved = self.arena[y as usize].v.take();
                let zn = &mut self.arena[z as usize];
                let value = std::mem::replace(&mut zn.v, moved);
                zn.g = zn.g.wrapping_add(1);
                (y, value, Some(z))
            }
            _ => {
                let successor = next(&self.arena, z);
                (z, self.arena[z as usize].v.take(), successor)
            }
        };

        let y_node = &self.arena[y as usize];
        let x = y_node.l.or(y_node.r);
        let y_black = y_node.b;
        let p = y_node.p;
        let y_right = util::side(&self.arena, y);

        relink_parent(&mut self.arena, &mut self.root, y, x);
        propagate(&mut self.arena, p);

        if y_black {
            match (x, p) {
                (Some(x), _) if !self.arena[x as usize].b => self.arena[x as usize].b = true,
                (_, Some(p)) => self.root = fix_removal(&mut self.arena, self.root, p, y_right),
                _ => {}
            }
        }

        self.release(y);
        (value.expect("removed node holds a value"), successor)
    }

    /// Substitutes a fresh node holding `value` for the node at `location`,
    /// keeping its position and color. The old handle becomes stale.
    ///
    /// Does not rebalance; the caller guarantees `value` orders the same way.
    pub fn replace(&mut self, location: NodeRef, value: T) -> Result<(NodeRef, T), TreeError> {
        let old = self.resolve(location)?;
        let (idx, prev) = self.replace_index(old, value);
        Ok((self.handle(idx), prev))
    }

    pub(crate) fn replace_index(&mut self, old: u32, value: T) -> (u32, T) {
        self.mod_count += 1;
        let idx = self.alloc(value);
        let (l, r, b) = {
            let o = &self.arena[old as usize];
            (o.l, o.r, o.b)
        };
        relink_parent(&mut self.arena, &mut self.root, old, Some(idx));
        assign(&mut self.arena, idx, false, l);
        assign(&mut self.arena, idx, true, r);
        self.arena[idx as usize].b = b;
        on_children_changed(&mut self.arena, idx);
        let p = self.arena[idx as usize].p;
        propagate(&mut self.arena, p);

        let value = self.release(old).expect("replaced node holds a value");
        (idx, value)
    }

    /// Builds a balanced tree from values already in in-order sequence, in
    /// O(n) and without any fix-up pass.
    pub fn build_from<I>(&mut self, values: I) -> Result<(), TreeError>
    where
        I: IntoIterator<Item = T>,
    {
        if self.root.is_some() {
            return Err(TreeError::NotEmpty);
        }
        let ids: Vec<u32> = values.into_iter().map(|v| self.alloc(v)).collect();
        let n = ids.len();
        // Smallest black height that fits n + 1 leaves.
        let bh = (n + 1).ilog2();
        self.root = build(&mut self.arena, &ids, bh, None);
        self.len = n;
        self.mod_count += 1;
        trace!(len = n, black_height = bh, "build_from");
        Ok(())
    }

    pub fn clear(&mut self) {
        for idx in 0..self.arena.len() as u32 {
            if self.arena[idx as usize].is_live() {
                self.release(idx);
            }
        }
        trace!(len = self.len, "clear");
        self.root = None;
        self.len = 0;
        self.mod_count += 1;
    }

    pub fn iter(&self) -> Iter<'_, T, A> {
        Iter::new(self)
    }

    /// Detached cursor at the first element; see [`Cursor`].
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.first(), self.mod_count)
    }

    /// Values in in-order sequence.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        validate::assert_red_black_tree::<T, A, fn(&T, &T) -> i32>(
            &self.arena,
            self.root,
            self.len,
            None,
        )
    }

    /// Like [`assert_valid`](Self::assert_valid), also requiring strictly
    /// ascending values under `comparator`.
    pub fn assert_valid_with<C>(&self, comparator: &C) -> Result<(), InvariantError>
    where
        C: Fn(&T, &T) -> i32,
    {
        validate::assert_red_black_tree(&self.arena, self.root, self.len, Some(comparator))
    }

    pub fn print(&self) -> String
    where
        T: Debug,
        A: Debug,
    {
        print::print(&self.arena, self.root, "")
    }
}

fn build<T, A: Aggregate>(
    arena: &mut [RbNode<T, A>],
    ids: &[u32],
    bh: u32,
    parent: Option<u32>,
) -> Option<u32> {
    if ids.is_empty() {
        return None;
    }
    let mid = ids.len() / 2;
    let n = ids[mid];
    let child_bh = bh.saturating_sub(1);
    let l = build(arena, &ids[..mid], child_bh, Some(n));
    let r = build(arena, &ids[mid + 1..], child_bh, Some(n));
    let node = &mut arena[n as usize];
    node.p = parent;
    node.l = l;
    node.r = r;
    node.b = bh > 0;
    on_children_changed(arena, n);
    Some(n)
}

impl<T: Debug, A> Debug for RbTree<T, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        let mut curr = first(&self.arena, self.root);
        while let Some(i) = curr {
            if let Some(v) = &self.arena[i as usize].v {
                list.entry(v);
            }
            curr = next(&self.arena, i);
        }
        list.finish()
    }
}

impl<'a, T, A: Aggregate> IntoIterator for &'a RbTree<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
