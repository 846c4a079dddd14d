use crate::node::{on_children_changed, Aggregate, RbNode};
use crate::types::{Node, RbNodeLike};
use crate::util::{assign, get_p, relink_parent, side};

#[inline]
fn is_red<T, A>(arena: &[RbNode<T, A>], i: Option<u32>) -> bool {
    i.is_some_and(|i| !arena[i as usize].is_black())
}

#[inline]
fn set_black<T, A>(arena: &mut [RbNode<T, A>], i: u32, black: bool) {
    arena[i as usize].set_black(black);
}

/// Single rotation around `n`.
///
/// `rotate_right` promotes the left child, otherwise the right child is
/// promoted. Colors are swapped between `n` and the promoted child, so a
/// rotation never changes the black count along the rotated edge. Returns
/// the new root.
pub(crate) fn rotate<T, A: Aggregate>(
    arena: &mut [RbNode<T, A>],
    mut root: Option<u32>,
    n: u32,
    rotate_right: bool,
) -> Option<u32> {
    let c = arena[n as usize]
        .child(!rotate_right)
        .expect("rotation needs a child on the promoted side");
    let inner = arena[c as usize].child(rotate_right);

    relink_parent(arena, &mut root, n, Some(c));
    assign(arena, n, !rotate_right, inner);
    assign(arena, c, rotate_right, Some(n));

    let (nb, cb) = (arena[n as usize].b, arena[c as usize].b);
    if nb != cb {
        set_black(arena, n, cb);
        set_black(arena, c, nb);
    }

    on_children_changed(arena, n);
    on_children_changed(arena, c);
    root
}

/// Restores the red-black invariants after `n` was attached as a red leaf.
pub(crate) fn fix_insertion<T, A: Aggregate>(
    arena: &mut [RbNode<T, A>],
    mut root: Option<u32>,
    mut n: u32,
) -> Option<u32> {
    loop {
        let Some(p) = get_p(arena, n) else {
            set_black(arena, n, true);
            return root;
        };
        if arena[p as usize].b {
            return root;
        }
        let Some(g) = get_p(arena, p) else {
            // Red root.
            set_black(arena, p, true);
            return root;
        };

        let p_right = side(arena, p);
        let u = arena[g as usize].child(!p_right);
        if let Some(u) = u.filter(|&u| !arena[u as usize].b) {
            set_black(arena, p, true);
            set_black(arena, u, true);
            set_black(arena, g, false);
            n = g;
            continue;
        }

        if side(arena, n) != p_right {
            root = rotate(arena, root, p, p_right);
        }
        return rotate(arena, root, g, !p_right);
    }
}

/// Resolves a double-black deficiency on `short_right` side of `p`.
pub(crate) fn fix_removal<T, A: Aggregate>(
    arena: &mut [RbNode<T, A>],
    mut root: Option<u32>,
    mut p: u32,
    mut short_right: bool,
) -> Option<u32> {
    loop {
        let mut s = arena[p as usize]
            .child(!short_right)
            .expect("long side of a double-black parent is never empty");

        if !arena[s as usize].b {
            root = rotate(arena, root, p, short_right);
            s = arena[p as usize]
                .child(!short_right)
                .expect("red sibling always has black children");
        }

        let inner = arena[s as usize].child(short_right);
        let outer = arena[s as usize].child(!short_right);

        if !is_red(arena, inner) && !is_red(arena, outer) {
            set_black(arena, s, false);
            if !arena[p as usize].b {
                set_black(arena, p, true);
                return root;
            }
            match get_p(arena, p) {
                Some(pp) => {
                    short_right = side(arena, p);
                    p = pp;
                    continue;
                }
                None => return root,
            }
        }

        if !is_red(arena, outer) {
            root = rotate(arena, root, s, !short_right);
            s = arena[p as usize]
                .child(!short_right)
                .expect("inner nephew took the sibling position");
        }

        let outer = arena[s as usize]
            .child(!short_right)
            .expect("outer nephew is red here");
        root = rotate(arena, root, p, short_right);
        set_black(arena, outer, true);
        return root;
    }
}
