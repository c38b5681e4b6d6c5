//! Arena-based AVL tree.
//!
//! Nodes live in a `Vec` owned by [`AvlTree`]; every "pointer" (parent,
//! left, right) is an `Option<u32>` index into that arena, so rotations only
//! rewrite indices and never move ownership around.
//!
//! After each insertion the tree walks from the new leaf up to the root,
//! refreshing cached heights and rotating wherever the height difference of
//! two siblings exceeds one.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | [`Node`] and [`HeightNode`] link traits |
//! | [`util`] | `first`, `next`, `last`, `size` over parent-linked arenas |
//! | [`avl::util`] | rotations, BST insert, rebalance walk, search, validation, dump |
//! | [`avl`] | [`AvlNode`] and the owning [`AvlTree`] |
//! | [`config`] | [`AvlConfig`] and [`DuplicatePolicy`] |
//! | [`error`] | [`AvlError`] |

pub mod avl;
pub mod config;
pub mod error;
pub mod types;
pub mod util;

pub use avl::{AvlNode, AvlTree, Iter};
pub use config::{AvlConfig, DuplicatePolicy};
pub use error::AvlError;
pub use types::{HeightNode, Node, EMPTY_HEIGHT};
