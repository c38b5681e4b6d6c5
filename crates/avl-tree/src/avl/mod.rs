//! AVL tree: node type, arena algorithms and the owning tree.

#[path = "AvlTree.rs"]
pub mod avl_tree;
pub mod types;
pub mod util;

pub use avl_tree::{AvlTree, Iter};
pub use types::AvlNode;
