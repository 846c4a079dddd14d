use thiserror::Error;

/// Errors returned by tree and list operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The handle points at a slot that was freed or whose value moved.
    #[error("USE_AFTER_FREE")]
    UseAfterFree,
    /// A cursor was stepped after the tree was structurally modified.
    #[error("CONCURRENT_MODIFICATION")]
    ConcurrentModification,
    #[error("{0} is not supported for performance reasons")]
    Unsupported(&'static str),
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    /// Bulk construction requires an empty tree.
    #[error("NOT_EMPTY")]
    NotEmpty,
    /// Bulk input was not strictly ascending.
    #[error("ORDER_VIOLATED")]
    OrderViolated,
}

/// Structural invariant violations found by `assert_valid`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("Root has parent")]
    RootHasParent,
    #[error("Root is not black")]
    RootNotBlack,
    #[error("Broken parent link at node {0}")]
    BrokenParentLink(u32),
    #[error("Red node {0} has red child")]
    RedRed(u32),
    #[error("Black height mismatch at node {0}")]
    BlackHeightMismatch(u32),
    #[error("Node order violated at node {0}")]
    OrderViolated(u32),
    #[error("Aggregate out of date at node {0}")]
    AggregateMismatch(u32),
    #[error("Freed slot {0} is reachable")]
    FreedNodeReachable(u32),
    #[error("Length mismatch: tracked {tracked}, reachable {reachable}")]
    LengthMismatch { tracked: usize, reachable: usize },
}
