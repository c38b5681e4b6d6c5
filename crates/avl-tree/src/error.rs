use thiserror::Error;

/// Errors reported by [`crate::AvlTree`] and the validation helpers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AvlError {
    #[error("DUPLICATE_KEY")]
    DuplicateKey,
    #[error("Root has parent")]
    RootHasParent,
    #[error("Broken parent link on node {node}")]
    BrokenParentLink { node: u32 },
    #[error("Height mismatch on node {node}: expected {expected}, got {actual}")]
    HeightMismatch { node: u32, expected: i32, actual: i32 },
    #[error("AVL balance violated on node {node} (diff {diff})")]
    Unbalanced { node: u32, diff: i32 },
    #[error("{reachable} of {stored} nodes reachable from root")]
    UnreachableNodes { reachable: usize, stored: usize },
    #[error("Arena full: node index would exceed u32::MAX")]
    CapacityExceeded,
    #[error("Node order violated at node {node}")]
    OrderViolated { node: u32 },
    #[error("Invalid config: {0}")]
    Config(String),
}
