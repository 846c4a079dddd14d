use crate::error::InvariantError;
use crate::node::{Aggregate, RbNode};
use crate::util::{first, next};

/// Checks every red-black, parent-link and aggregate invariant of the tree
/// rooted at `root`, plus strict ordering when a comparator is given.
pub fn assert_red_black_tree<T, A, C>(
    arena: &[RbNode<T, A>],
    root: Option<u32>,
    len: usize,
    comparator: Option<&C>,
) -> Result<(), InvariantError>
where
    A: Aggregate,
    C: Fn(&T, &T) -> i32,
{
    let Some(root) = root else {
        return if len == 0 {
            Ok(())
        } else {
            Err(InvariantError::LengthMismatch {
                tracked: len,
                reachable: 0,
            })
        };
    };

    if arena[root as usize].p.is_some() {
        return Err(InvariantError::RootHasParent);
    }
    if !arena[root as usize].b {
        return Err(InvariantError::RootNotBlack);
    }

    fn black_height<T, A: Aggregate>(
        arena: &[RbNode<T, A>],
        node: Option<u32>,
        reachable: &mut usize,
    ) -> Result<usize, InvariantError> {
        let Some(node) = node else {
            return Ok(0);
        };
        let n = &arena[node as usize];
        if !n.is_live() {
            return Err(InvariantError::FreedNodeReachable(node));
        }
        *reachable += 1;

        for child in [n.l, n.r].into_iter().flatten() {
            let c = &arena[child as usize];
            if c.p != Some(node) {
                return Err(InvariantError::BrokenParentLink(child));
            }
            if !n.b && !c.b {
                return Err(InvariantError::RedRed(node));
            }
        }

        let lh = black_height(arena, n.l, reachable)?;
        let rh = black_height(arena, n.r, reachable)?;
        if lh != rh {
            return Err(InvariantError::BlackHeightMismatch(node));
        }

        let expected = A::recompute(
            n.l.map(|l| &arena[l as usize].a),
            n.r.map(|r| &arena[r as usize].a),
        );
        if expected != n.a {
            return Err(InvariantError::AggregateMismatch(node));
        }

        Ok(lh + usize::from(n.b))
    }

    let mut reachable = 0;
    black_height(arena, Some(root), &mut reachable)?;
    if reachable != len {
        return Err(InvariantError::LengthMismatch {
            tracked: len,
            reachable,
        });
    }

    if let Some(comparator) = comparator {
        let mut curr = first(arena, Some(root));
        let mut prev_node: Option<u32> = None;
        while let Some(i) = curr {
            if let Some(prev) = prev_node {
                let (a, b) = (&arena[prev as usize].v, &arena[i as usize].v);
                if let (Some(a), Some(b)) = (a, b) {
                    if comparator(a, b) >= 0 {
                        return Err(InvariantError::OrderViolated(i));
                    }
                }
            }
            prev_node = Some(i);
            curr = next(arena, i);
        }
    }

    Ok(())
}
