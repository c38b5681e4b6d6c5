//! Arena-level AVL algorithms.
//!
//! Every function here works on a caller-owned slice of nodes and a root
//! index; none of them allocate. [`crate::AvlTree`] composes them:
//! [`bst_insert`] attaches a leaf, then [`rebalance`] walks from that leaf
//! to the root.

use std::cmp::Ordering;
use std::fmt::{Display, Write};

use tracing::trace;

use crate::error::AvlError;
use crate::types::{HeightNode, EMPTY_HEIGHT};
use crate::util::{first, get_l, get_p, get_r, next, set_l, set_p, set_r};

/// Cached height of `node`, [`EMPTY_HEIGHT`] when absent.
#[inline]
pub fn height<N: HeightNode>(arena: &[N], node: Option<u32>) -> i32 {
    node.map_or(EMPTY_HEIGHT, |i| arena[i as usize].height())
}

/// Recomputes the height of `n` from its current children.
pub fn update_height<N: HeightNode>(arena: &mut [N], n: u32) -> i32 {
    let lh = height(arena, get_l(arena, n));
    let rh = height(arena, get_r(arena, n));
    let h = 1 + lh.max(rh);
    arena[n as usize].set_height(h);
    h
}

/// `height(left) - height(right)` from the cached child heights.
#[inline]
pub fn balance_factor<N: HeightNode>(arena: &[N], n: u32) -> i32 {
    height(arena, get_l(arena, n)) - height(arena, get_r(arena, n))
}

/// Rotates the subtree rooted at `n` to the left and returns its new root
/// (the former right child).
///
/// ```text
///     n                r
///    / \              / \
///   a   r     =>     n   d
///      / \          / \
///     c   d        a   c
/// ```
///
/// The returned node has no parent; the caller re-links it. If `n` has no
/// right child nothing changes and `n` is returned.
pub fn rotate_left<N: HeightNode>(arena: &mut [N], n: u32) -> u32 {
    let Some(r) = get_r(arena, n) else {
        return n;
    };
    let c = get_l(arena, r);

    set_r(arena, n, c);
    if let Some(c) = c {
        set_p(arena, c, Some(n));
    }
    set_l(arena, r, Some(n));
    set_p(arena, n, Some(r));
    set_p(arena, r, None);

    // `n` is now the lower node.
    update_height(arena, n);
    update_height(arena, r);
    trace!(node = n, new_root = r, "rotate left");
    r
}

/// Mirror image of [`rotate_left`]: the former left child becomes the
/// subtree root.
pub fn rotate_right<N: HeightNode>(arena: &mut [N], n: u32) -> u32 {
    let Some(l) = get_l(arena, n) else {
        return n;
    };
    let b = get_r(arena, l);

    set_l(arena, n, b);
    if let Some(b) = b {
        set_p(arena, b, Some(n));
    }
    set_r(arena, l, Some(n));
    set_p(arena, n, Some(l));
    set_p(arena, l, None);

    update_height(arena, n);
    update_height(arena, l);
    trace!(node = n, new_root = l, "rotate right");
    l
}

/// Attaches the detached node `n` as a leaf under `root`.
///
/// Descends left while the visited key is greater than the new key and
/// right otherwise, so keys equal to an existing one go right. No rotation
/// happens here. When `root` is `None` the tree is empty and `n` is simply
/// returned; the caller makes it the root.
pub fn bst_insert<N, C>(arena: &mut [N], root: Option<u32>, n: u32, comparator: &C) -> u32
where
    N: HeightNode,
    C: Fn(&N::Key, &N::Key) -> Ordering,
{
    let Some(mut curr) = root else {
        return n;
    };

    loop {
        let go_left =
            comparator(arena[n as usize].key(), arena[curr as usize].key()) == Ordering::Less;
        let child = if go_left {
            get_l(arena, curr)
        } else {
            get_r(arena, curr)
        };
        match child {
            Some(child) => curr = child,
            None => {
                if go_left {
                    set_l(arena, curr, Some(n));
                } else {
                    set_r(arena, curr, Some(n));
                }
                set_p(arena, n, Some(curr));
                return n;
            }
        }
    }
}

/// Left-left or left-right imbalance at `n`; returns the new subtree root.
fn fix_left_heavy<N: HeightNode>(arena: &mut [N], n: u32) -> u32 {
    if let Some(l) = get_l(arena, n) {
        if height(arena, get_l(arena, l)) < height(arena, get_r(arena, l)) {
            let l = rotate_left(arena, l);
            set_l(arena, n, Some(l));
            set_p(arena, l, Some(n));
        }
    }
    rotate_right(arena, n)
}

/// Right-right or right-left imbalance at `n`; returns the new subtree root.
fn fix_right_heavy<N: HeightNode>(arena: &mut [N], n: u32) -> u32 {
    if let Some(r) = get_r(arena, n) {
        if height(arena, get_l(arena, r)) > height(arena, get_r(arena, r)) {
            let r = rotate_right(arena, r);
            set_r(arena, n, Some(r));
            set_p(arena, r, Some(n));
        }
    }
    rotate_left(arena, n)
}

/// Walks from `start` up to the root, refreshing heights and rotating every
/// node whose children differ in height by more than one. Returns the
/// (possibly new) root.
///
/// Every ancestor is visited even after a rotation, so all heights on the
/// path are current when the walk ends.
pub fn rebalance<N: HeightNode>(arena: &mut [N], root: Option<u32>, start: u32) -> Option<u32> {
    let mut root = root;
    let mut curr = Some(start);

    while let Some(n) = curr {
        let hdiff = balance_factor(arena, n);
        trace!(node = n, hdiff, "rebalance step");
        update_height(arena, n);

        // Captured before any rotation rewrites the links of `n`.
        let parent = get_p(arena, n);
        let was_left = parent.is_some_and(|p| get_l(arena, p) == Some(n));

        let sub = if hdiff > 1 {
            Some(fix_left_heavy(arena, n))
        } else if hdiff < -1 {
            Some(fix_right_heavy(arena, n))
        } else {
            None
        };

        if let Some(sub) = sub {
            trace!(node = n, new_root = sub, hdiff, "rebalanced");
            set_p(arena, sub, parent);
            match parent {
                Some(p) if was_left => set_l(arena, p, Some(sub)),
                Some(p) => set_r(arena, p, Some(sub)),
                None => root = Some(sub),
            }
        }

        curr = parent;
    }

    root
}

/// Order-walk search for `key`. Returns the first node on the path whose
/// key compares equal.
pub fn find<N, C>(arena: &[N], root: Option<u32>, key: &N::Key, comparator: &C) -> Option<u32>
where
    N: HeightNode,
    C: Fn(&N::Key, &N::Key) -> Ordering,
{
    let mut curr = root;
    while let Some(i) = curr {
        curr = match comparator(key, arena[i as usize].key()) {
            Ordering::Less => get_l(arena, i),
            Ordering::Greater => get_r(arena, i),
            Ordering::Equal => return Some(i),
        };
    }
    None
}

fn validate_links_and_heights<N: HeightNode>(arena: &[N], node: u32) -> Result<i32, AvlError> {
    let l = get_l(arena, node);
    let r = get_r(arena, node);

    let mut lh = EMPTY_HEIGHT;
    if let Some(l) = l {
        if get_p(arena, l) != Some(node) {
            return Err(AvlError::BrokenParentLink { node: l });
        }
        lh = validate_links_and_heights(arena, l)?;
    }
    let mut rh = EMPTY_HEIGHT;
    if let Some(r) = r {
        if get_p(arena, r) != Some(node) {
            return Err(AvlError::BrokenParentLink { node: r });
        }
        rh = validate_links_and_heights(arena, r)?;
    }

    let expected = 1 + lh.max(rh);
    let actual = arena[node as usize].height();
    if actual != expected {
        return Err(AvlError::HeightMismatch {
            node,
            expected,
            actual,
        });
    }
    let diff = lh - rh;
    if !(-1..=1).contains(&diff) {
        return Err(AvlError::Unbalanced { node, diff });
    }

    Ok(expected)
}

/// Checks parent links, cached heights, the AVL balance bound and that the
/// in-order sequence never decreases.
pub fn assert_avl_tree<N, C>(arena: &[N], root: Option<u32>, comparator: &C) -> Result<(), AvlError>
where
    N: HeightNode,
    C: Fn(&N::Key, &N::Key) -> Ordering,
{
    let Some(root) = root else {
        return Ok(());
    };

    if get_p(arena, root).is_some() {
        return Err(AvlError::RootHasParent);
    }

    validate_links_and_heights(arena, root)?;

    let mut curr = first(arena, Some(root));
    let mut prev: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev {
            if comparator(arena[prev as usize].key(), arena[i as usize].key()) == Ordering::Greater
            {
                return Err(AvlError::OrderViolated { node: i });
            }
        }
        prev = Some(i);
        curr = next(arena, i);
    }

    Ok(())
}

fn print_inner<N>(arena: &[N], node: Option<u32>, indent: &str, out: &mut String)
where
    N: HeightNode,
    N::Key: Display,
{
    match node {
        None => {
            let _ = writeln!(out, "{indent}x:{EMPTY_HEIGHT}");
        }
        Some(i) => {
            let n = &arena[i as usize];
            let _ = writeln!(out, "{indent}{}:{}", n.key(), n.height());
            let child_indent = format!("{indent}    ");
            print_inner(arena, get_l(arena, i), &child_indent, out);
            print_inner(arena, get_r(arena, i), &child_indent, out);
        }
    }
}

/// Pre-order structural dump, one `key:height` line per node, children
/// indented by four spaces and absent children shown as `x:-1`.
pub fn print<N>(arena: &[N], root: Option<u32>) -> String
where
    N: HeightNode,
    N::Key: Display,
{
    let mut out = String::new();
    print_inner(arena, root, "", &mut out);
    out
}
