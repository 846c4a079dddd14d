use crate::types::{Node, RbNodeLike};

/// Per-node summary recomputed from a node's children.
///
/// The engine calls [`Aggregate::recompute`] on every node whose children
/// changed and keeps climbing while the stored value changes. The unit type
/// never changes, so plain trees pay nothing for the hook.
pub trait Aggregate: Clone + PartialEq {
    fn recompute(left: Option<&Self>, right: Option<&Self>) -> Self;
}

impl Aggregate for () {
    #[inline]
    fn recompute(_left: Option<&Self>, _right: Option<&Self>) -> Self {}
}

/// Subtree element count, used for rank/select queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Count(pub usize);

impl Aggregate for Count {
    #[inline]
    fn recompute(left: Option<&Self>, right: Option<&Self>) -> Self {
        Count(1 + left.map_or(0, |c| c.0) + right.map_or(0, |c| c.0))
    }
}

/// Arena-resident red-black tree node.
#[derive(Clone, Debug)]
pub struct RbNode<T, A = ()> {
    pub(crate) p: Option<u32>,
    pub(crate) l: Option<u32>,
    pub(crate) r: Option<u32>,
    // `None` once the slot has been freed.
    pub(crate) v: Option<T>,
    pub(crate) a: A,
    /// Node color: `true` = black, `false` = red.
    pub(crate) b: bool,
    /// Bumped every time the slot's value is freed or relocated.
    pub(crate) g: u32,
}

impl<T, A: Aggregate> RbNode<T, A> {
    pub(crate) fn new(v: T, g: u32) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            v: Some(v),
            a: A::recompute(None, None),
            b: false,
            g,
        }
    }
}

impl<T, A> RbNode<T, A> {
    pub fn value(&self) -> Option<&T> {
        self.v.as_ref()
    }

    pub fn aggregate(&self) -> &A {
        &self.a
    }

    pub fn is_live(&self) -> bool {
        self.v.is_some()
    }
}

impl<T, A> Node for RbNode<T, A> {
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

impl<T, A> RbNodeLike for RbNode<T, A> {
    fn is_black(&self) -> bool {
        self.b
    }

    fn set_black(&mut self, black: bool) {
        self.b = black;
    }
}

/// Stable handle to a tree position.
///
/// A handle names an arena slot and the generation it was issued for. Once
/// the slot is freed, or its value is relocated by a removal, the handle is
/// stale and every lookup through it fails with
/// [`TreeError::UseAfterFree`](crate::TreeError::UseAfterFree).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeRef {
    /// Raw arena slot. Stays stable across unrelated mutations; it is only
    /// invalidated when this slot is freed or its value is relocated, at
    /// which point the handle's generation no longer matches.
    pub fn index(&self) -> u32 {
        self.index
    }
}

/// What a directional search probe sees at each visited node.
#[derive(Debug)]
pub struct Probe<'a, T, A> {
    pub value: &'a T,
    pub aggregate: &'a A,
    pub left: Option<&'a A>,
    pub right: Option<&'a A>,
}

/// Recomputes the aggregate of `idx` from its children.
///
/// Returns `true` if the stored aggregate changed.
pub(crate) fn on_children_changed<T, A: Aggregate>(arena: &mut [RbNode<T, A>], idx: u32) -> bool {
    let n = &arena[idx as usize];
    let next = A::recompute(
        n.l.map(|l| &arena[l as usize].a),
        n.r.map(|r| &arena[r as usize].a),
    );
    let n = &mut arena[idx as usize];
    if n.a == next {
        false
    } else {
        n.a = next;
        true
    }
}

/// Runs [`on_children_changed`] from `from` towards the root until a node's
/// aggregate stops changing.
pub(crate) fn propagate<T, A: Aggregate>(arena: &mut [RbNode<T, A>], from: Option<u32>) {
    let mut curr = from;
    while let Some(i) = curr {
        if !on_children_changed(arena, i) {
            break;
        }
        curr = arena[i as usize].p;
    }
}
