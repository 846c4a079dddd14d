//! Node trait definitions.
//!
//! Nodes live in a [`Vec`]-backed arena owned by the tree. Each "pointer" is
//! an `Option<u32>` index into that arena, so all tree-manipulation
//! functions take the arena slice and work with indices.

/// Tree links (`p`, `l`, `r`).
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);

    /// Child on the given side: `true` = right, `false` = left.
    #[inline]
    fn child(&self, right: bool) -> Option<u32> {
        if right {
            self.r()
        } else {
            self.l()
        }
    }

    #[inline]
    fn set_child(&mut self, right: bool, v: Option<u32>) {
        if right {
            self.set_r(v)
        } else {
            self.set_l(v)
        }
    }
}

/// Red-black specific node behavior.
pub trait RbNodeLike: Node {
    fn is_black(&self) -> bool;
    fn set_black(&mut self, black: bool);
}

/// Comparator used by ordered structures.
///
/// Returns a negative number when `a < b`, zero when equal, positive when
/// `a > b`.
pub type Comparator<T> = dyn Fn(&T, &T) -> i32;

/// Natural ordering for `PartialOrd` values.
pub fn default_comparator<T: PartialOrd>(a: &T, b: &T) -> i32 {
    if a == b {
        0
    } else if a < b {
        -1
    } else {
        1
    }
}
