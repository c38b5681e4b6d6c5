//! Node trait definitions.
//!
//! Each "pointer" is an `Option<u32>` index into a [`Vec`]-backed arena.
//! All tree-manipulation functions take the arena as `&[N]` / `&mut [N]`
//! and work with indices.

/// Height reported for an absent subtree.
pub const EMPTY_HEIGHT: i32 = -1;

/// Structural links (`p`, `l`, `r`).
///
/// `p` is a non-owning back-reference: it must always name the node whose
/// `l` or `r` holds this node, and be `None` for the root.
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// A keyed node carrying its cached subtree height.
///
/// A leaf has height 0.
pub trait HeightNode: Node {
    type Key;

    fn key(&self) -> &Self::Key;
    fn height(&self) -> i32;
    fn set_height(&mut self, height: i32);
}
