//! Red-black tree engine: positional insertion, removal with successor
//! relocation, rotations, both fix-ups and O(n) bulk construction.

pub mod iter;
pub mod print;
pub mod tree;
pub(crate) mod util;
pub mod validate;

pub use iter::{Cursor, Iter};
pub use print::print;
pub use tree::{RbTree, Removed};
pub use validate::assert_red_black_tree;
