//! Arena-based augmented red-black trees.
//!
//! One balancing engine, [`RbTree`], backs a family of collections:
//!
//! - [`SortedSet`] / [`OrderedTree`]: values kept in comparator order.
//! - [`SortedList`]: ordered, plus O(log n) positional access and rank.
//! - [`IndexedList`]: no ordering, addressed purely by position.
//!
//! Instead of raw pointers, all links are `Option<u32>` indices into a
//! `Vec`-backed arena owned by the tree. Public APIs hand out [`NodeRef`]
//! handles that carry a generation, so a handle to a removed element fails
//! with [`TreeError::UseAfterFree`] instead of reading a recycled slot.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] / [`RbNodeLike`] link traits, comparator helpers |
//! [`node`] | [`RbNode`], the [`Aggregate`] hook, [`Count`], [`NodeRef`] |
//! [`util`] | navigation: `next`, `prev`, `most_left`, `side`, `sibling` … |
//! [`red_black`] | the engine: insertion, removal, fix-ups, `build_from` |
//! [`ordered`] | comparator-ordered adapter |
//! [`order_statistics`] | rank/select, [`SortedList`], [`IndexedList`] |
//! [`collection`] | [`TreeCollection`], a collection view over all of them |

pub mod collection;
pub mod error;
pub mod node;
pub mod order_statistics;
pub mod ordered;
pub mod red_black;
pub mod types;
pub mod util;

pub use collection::TreeCollection;
pub use error::{InvariantError, TreeError};
pub use node::{Aggregate, Count, NodeRef, Probe, RbNode};
pub use order_statistics::{IndexedList, SortedList};
pub use ordered::{OrderedTree, SortedSet};
pub use red_black::{Cursor, Iter, RbTree, Removed};
pub use types::{default_comparator, Comparator, Node, RbNodeLike};
