//! Structural navigation over arena-backed binary trees.
//!
//! Every function takes the arena slice and a node index; none of them look
//! at colors or values, so they work for any [`Node`] layout.

use crate::types::Node;

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

/// Whether `idx` is its parent's right child. `false` for the root.
#[inline]
pub fn side<N: Node>(arena: &[N], idx: u32) -> bool {
    get_p(arena, idx).is_some_and(|p| get_r(arena, p) == Some(idx))
}

/// The other child of `idx`'s parent.
pub fn sibling<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    let p = get_p(arena, idx)?;
    arena[p as usize].child(!side(arena, idx))
}

/// Leftmost node of the subtree rooted at `idx`.
pub fn most_left<N: Node>(arena: &[N], mut idx: u32) -> u32 {
    while let Some(l) = get_l(arena, idx) {
        idx = l;
    }
    idx
}

/// Rightmost node of the subtree rooted at `idx`.
pub fn most_right<N: Node>(arena: &[N], mut idx: u32) -> u32 {
    while let Some(r) = get_r(arena, idx) {
        idx = r;
    }
    idx
}

/// Leftmost node in the tree.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    root.map(|r| most_left(arena, r))
}

/// Rightmost node in the tree.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    root.map(|r| most_right(arena, r))
}

/// In-order successor.
pub fn next<N: Node>(arena: &[N], node: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, node) {
        return Some(most_left(arena, r));
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor.
pub fn prev<N: Node>(arena: &[N], node: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, node) {
        return Some(most_right(arena, l));
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// Attaches `child` on the given side of `parent` and points the child back
/// at its new parent.
pub fn assign<N: Node>(arena: &mut [N], parent: u32, right: bool, child: Option<u32>) {
    arena[parent as usize].set_child(right, child);
    if let Some(c) = child {
        set_p(arena, c, Some(parent));
    }
}

/// Makes whatever pointed at `old` (its parent, or the root slot) point at
/// `new` instead, and gives `new` the old parent.
pub(crate) fn relink_parent<N: Node>(
    arena: &mut [N],
    root: &mut Option<u32>,
    old: u32,
    new: Option<u32>,
) {
    let p = get_p(arena, old);
    match p {
        Some(p) => {
            let right = get_r(arena, p) == Some(old);
            arena[p as usize].set_child(right, new);
        }
        None => *root = new,
    }
    if let Some(n) = new {
        set_p(arena, n, p);
    }
}

fn size_inner<N: Node>(arena: &[N], root: u32) -> usize {
    1 + get_l(arena, root).map_or(0, |l| size_inner(arena, l))
        + get_r(arena, root).map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes under `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes on the longest root-to-leaf path.
pub fn height<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    match root {
        None => 0,
        Some(r) => 1 + height(arena, get_l(arena, r)).max(height(arena, get_r(arena, r))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct N {
        p: Option<u32>,
        l: Option<u32>,
        r: Option<u32>,
    }

    impl Node for N {
        fn p(&self) -> Option<u32> {
            self.p
        }
        fn l(&self) -> Option<u32> {
            self.l
        }
        fn r(&self) -> Option<u32> {
            self.r
        }
        fn set_p(&mut self, v: Option<u32>) {
            self.p = v;
        }
        fn set_l(&mut self, v: Option<u32>) {
            self.l = v;
        }
        fn set_r(&mut self, v: Option<u32>) {
            self.r = v;
        }
    }

    //       1
    //     /   \
    //    0     3
    //         / \
    //        2   4
    fn sample() -> Vec<N> {
        let mut arena: Vec<N> = (0..5).map(|_| N::default()).collect();
        assign(&mut arena, 1, false, Some(0));
        assign(&mut arena, 1, true, Some(3));
        assign(&mut arena, 3, false, Some(2));
        assign(&mut arena, 3, true, Some(4));
        arena
    }

    #[test]
    fn walks_in_order_both_ways() {
        let arena = sample();
        let mut forward = Vec::new();
        let mut curr = first(&arena, Some(1));
        while let Some(i) = curr {
            forward.push(i);
            curr = next(&arena, i);
        }
        assert_eq!(forward, vec![0, 1, 2, 3, 4]);

        let mut backward = Vec::new();
        let mut curr = last(&arena, Some(1));
        while let Some(i) = curr {
            backward.push(i);
            curr = prev(&arena, i);
        }
        assert_eq!(backward, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn side_and_sibling() {
        let arena = sample();
        assert!(!side(&arena, 1));
        assert!(!side(&arena, 0));
        assert!(side(&arena, 3));
        assert_eq!(sibling(&arena, 2), Some(4));
        assert_eq!(sibling(&arena, 3), Some(0));
        assert_eq!(sibling(&arena, 1), None);
        assert_eq!(size(&arena, Some(1)), 5);
        assert_eq!(height(&arena, Some(1)), 3);
    }

    #[test]
    fn relink_parent_replaces_root_and_children() {
        let mut arena = sample();
        let mut root = Some(1);
        relink_parent(&mut arena, &mut root, 3, Some(4));
        assert_eq!(arena[1].r, Some(4));
        assert_eq!(arena[4].p, Some(1));

        relink_parent(&mut arena, &mut root, 1, Some(0));
        assert_eq!(root, Some(0));
        assert_eq!(arena[0].p, None);
    }
}
