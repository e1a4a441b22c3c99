use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    #[error("Key not found in the tree")]
    KeyNotFound,
}

/// A broken red-black or search-tree invariant, reported by validation.
///
/// Mutations never produce these; seeing one means a rebalancing bug.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("root {0} has a parent")]
    RootHasParent(u32),
    #[error("root {0} is not black")]
    RedRoot(u32),
    #[error("red node {parent} has red child {child}")]
    RedRed { parent: u32, child: u32 },
    #[error("black height mismatch under node {node}: left {left}, right {right}")]
    BlackHeight { node: u32, left: usize, right: usize },
    #[error("node {child} does not link back to parent {parent}")]
    BrokenParentLink { parent: u32, child: u32 },
    #[error("node {0} is out of order")]
    Order(u32),
    #[error("{reachable} nodes reachable from root, {stored} stored")]
    SizeMismatch { reachable: usize, stored: usize },
}
