use std::fmt::Debug;

use crate::node::RbNode;
use crate::types::RbNodeLike;

/// Debug printer for red-black trees.
pub fn print<T, A>(arena: &[RbNode<T, A>], node: Option<u32>, tab: &str) -> String
where
    T: Debug,
    A: Debug,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let color = if n.is_black() { "black" } else { "red" };
            let left = print(arena, n.l, &format!("{tab}  "));
            let right = print(arena, n.r, &format!("{tab}  "));
            format!(
                "Node[{i}] {color} {{ {:?} }} {:?}\n{tab}L={left}\n{tab}R={right}",
                n.v, n.a
            )
        }
    }
}
