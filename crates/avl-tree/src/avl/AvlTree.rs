use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, warn};

use crate::config::{AvlConfig, DuplicatePolicy};
use crate::error::AvlError;
use crate::util::{first, last, next, size};

use super::types::AvlNode;
use super::util::{assert_avl_tree, bst_insert, find, height, print, rebalance};

fn default_comparator<K: Ord>(a: &K, b: &K) -> Ordering {
    a.cmp(b)
}

/// Arena index for the node pushed after `len` existing ones.
fn next_index(len: usize) -> Result<u32, AvlError> {
    u32::try_from(len)
        .ok()
        .filter(|&n| n != u32::MAX)
        .ok_or(AvlError::CapacityExceeded)
}

/// AVL tree owning its nodes in an index arena.
///
/// Nodes are never removed, so an arena index handed out by
/// [`AvlTree::try_insert`] stays valid for the lifetime of the tree. Indices
/// are `u32`; once `u32::MAX` nodes are stored further inserts fail with
/// [`AvlError::CapacityExceeded`].
///
/// The comparator must be a total order. Keys without one (floats) can be
/// stored through a total comparator such as [`f64::total_cmp`]:
///
/// ```
/// use avl_tree::AvlTree;
///
/// let mut tree = AvlTree::with_comparator(f64::total_cmp);
/// tree.insert(2.5);
/// tree.insert(-1.0);
/// assert!(tree.contains(&2.5));
/// assert!(!tree.contains(&f64::NAN));
/// ```
#[derive(Clone)]
pub struct AvlTree<K, C = fn(&K, &K) -> Ordering>
where
    C: Fn(&K, &K) -> Ordering,
{
    nodes: Vec<AvlNode<K>>,
    root: Option<u32>,
    comparator: C,
    config: AvlConfig,
}

impl<K: Ord> AvlTree<K, fn(&K, &K) -> Ordering> {
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }

    pub fn with_config(config: AvlConfig) -> Self {
        Self::with_comparator_and_config(default_comparator::<K>, config)
    }
}

impl<K: Ord> Default for AvlTree<K, fn(&K, &K) -> Ordering> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> AvlTree<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_comparator_and_config(comparator, AvlConfig::default())
    }

    pub fn with_comparator_and_config(comparator: C, config: AvlConfig) -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            comparator,
            config,
        }
    }

    pub fn config(&self) -> &AvlConfig {
        &self.config
    }

    /// Inserts `value` and rebalances. Duplicates are handled according to
    /// [`AvlConfig::duplicates`]; a rejected duplicate is dropped, as is a
    /// value arriving after the arena is full.
    pub fn insert(&mut self, value: K) {
        match self.try_insert(value) {
            Ok(_) => {}
            Err(AvlError::DuplicateKey) => debug!("duplicate key rejected"),
            Err(err) => warn!(%err, "insert dropped value"),
        }
    }

    /// Inserts `value` and returns the arena index of the node holding it.
    ///
    /// Under [`DuplicatePolicy::Ignore`] an existing equal key's index is
    /// returned and nothing is allocated.
    pub fn try_insert(&mut self, value: K) -> Result<u32, AvlError> {
        match self.config.duplicates {
            DuplicatePolicy::Keep => {}
            DuplicatePolicy::Ignore => {
                if let Some(existing) = self.find(&value) {
                    debug!(node = existing, "duplicate key ignored");
                    return Ok(existing);
                }
            }
            DuplicatePolicy::Reject => {
                if self.find(&value).is_some() {
                    return Err(AvlError::DuplicateKey);
                }
            }
        }

        let n = next_index(self.nodes.len())?;
        self.nodes.push(AvlNode::new(value));
        let leaf = bst_insert(&mut self.nodes, self.root, n, &self.comparator);
        let root = *self.root.get_or_insert(leaf);
        self.root = rebalance(&mut self.nodes, Some(root), leaf);
        Ok(n)
    }

    pub fn contains(&self, value: &K) -> bool {
        self.find(value).is_some()
    }

    /// Arena index of a node whose key equals `value`.
    pub fn find(&self, value: &K) -> Option<u32> {
        find(&self.nodes, self.root, value, &self.comparator)
    }

    pub fn key(&self, idx: u32) -> &K {
        &self.nodes[idx as usize].k
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the whole tree, `-1` when empty.
    pub fn height(&self) -> i32 {
        height(&self.nodes, self.root)
    }

    pub fn root(&self) -> Option<&K> {
        self.root.map(|i| self.key(i))
    }

    pub fn root_index(&self) -> Option<u32> {
        self.root
    }

    pub fn nodes(&self) -> &[AvlNode<K>] {
        &self.nodes
    }

    pub fn first(&self) -> Option<&K> {
        first(&self.nodes, self.root).map(|i| self.key(i))
    }

    pub fn last(&self) -> Option<&K> {
        last(&self.nodes, self.root).map(|i| self.key(i))
    }

    /// Keys in comparator order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            nodes: &self.nodes,
            curr: first(&self.nodes, self.root),
        }
    }

    /// Checks the AVL invariants and that every stored node is reachable
    /// from the root.
    pub fn assert_valid(&self) -> Result<(), AvlError> {
        assert_avl_tree(&self.nodes, self.root, &self.comparator)?;
        let reachable = size(&self.nodes, self.root);
        if reachable != self.nodes.len() {
            return Err(AvlError::UnreachableNodes {
                reachable,
                stored: self.nodes.len(),
            });
        }
        Ok(())
    }

    /// Pre-order `key:height` dump, see [`super::util::print`].
    pub fn traverse(&self) -> String
    where
        K: fmt::Display,
    {
        print(&self.nodes, self.root)
    }
}

/// In-order iterator over the keys of an [`AvlTree`].
pub struct Iter<'a, K> {
    nodes: &'a [AvlNode<K>],
    curr: Option<u32>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.curr?;
        self.curr = next(self.nodes, i);
        Some(&self.nodes[i as usize].k)
    }
}

impl<'a, K, C> IntoIterator for &'a AvlTree<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, C> Extend<K> for AvlTree<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<K: Ord> FromIterator<K> for AvlTree<K, fn(&K, &K) -> Ordering> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: fmt::Display, C> fmt::Display for AvlTree<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.traverse())
    }
}

impl<K: fmt::Debug, C> fmt::Debug for AvlTree<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvlTree")
            .field("len", &self.len())
            .field("height", &self.height())
            .field("root", &self.root())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_index_follows_arena_length() {
        assert_eq!(next_index(0), Ok(0));
        assert_eq!(next_index(41), Ok(41));
        assert_eq!(next_index(u32::MAX as usize - 1), Ok(u32::MAX - 1));
    }

    #[test]
    fn next_index_refuses_to_wrap() {
        assert_eq!(next_index(u32::MAX as usize), Err(AvlError::CapacityExceeded));
        #[cfg(target_pointer_width = "64")]
        assert_eq!(
            next_index(u32::MAX as usize + 1),
            Err(AvlError::CapacityExceeded)
        );
    }

    #[test]
    fn assert_valid_reports_detached_node() {
        let mut tree: AvlTree<i32> = [2, 1, 3].into_iter().collect();
        tree.assert_valid().unwrap();

        // Leaf 3 is dropped from the structure but stays in the arena.
        let root = tree.root.unwrap();
        tree.nodes[root as usize].r = None;
        tree.nodes[root as usize].height = 1;
        tree.nodes[2].p = None;
        assert_eq!(
            tree.assert_valid(),
            Err(AvlError::UnreachableNodes {
                reachable: 2,
                stored: 3
            })
        );
    }
}
