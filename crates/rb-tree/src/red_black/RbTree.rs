use std::fmt;
use std::iter::FusedIterator;

use tracing::{debug, trace};

use crate::error::{InvariantViolation, TreeError};
use crate::types::RbNode;
use crate::util::{first, last, next, size};

use super::util;

/// Red-black tree over a single ordered key type.
///
/// Duplicate keys are kept; each lands to the right of its equals. Nodes are
/// stored in an arena that always holds exactly [`len`](Self::len) nodes.
#[derive(Clone)]
pub struct RbTree<T> {
    arena: Vec<RbNode<T>>,
    root: Option<u32>,
}

impl<T> Default for RbTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RbTree<T> {
    pub fn new() -> Self {
        Self {
            arena: Vec::new(),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    pub fn root_index(&self) -> Option<u32> {
        self.root
    }

    pub fn arena(&self) -> &[RbNode<T>] {
        &self.arena
    }

    pub fn node(&self, idx: u32) -> &RbNode<T> {
        &self.arena[idx as usize]
    }

    /// Smallest key.
    pub fn min(&self) -> Option<&T> {
        first(&self.arena, self.root).map(|i| self.node(i).key())
    }

    /// Largest key.
    pub fn max(&self) -> Option<&T> {
        last(&self.arena, self.root).map(|i| self.node(i).key())
    }

    /// Keys in ascending order. Each call starts a fresh walk.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            arena: &self.arena,
            curr: first(&self.arena, self.root),
            remaining: self.arena.len(),
        }
    }

    /// Nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        crate::util::height(&self.arena, self.root)
    }

    /// Black nodes on the leftmost root-to-leaf path.
    pub fn black_height(&self) -> usize {
        let mut count = 0;
        let mut curr = self.root;
        while let Some(i) = curr {
            let n = self.node(i);
            count += usize::from(n.is_black());
            curr = n.l;
        }
        count
    }
}

impl<T: Ord> RbTree<T> {
    pub fn insert(&mut self, key: T) {
        debug_assert!(self.arena.len() < u32::MAX as usize);
        self.arena.push(RbNode::new(key));
        let idx = (self.arena.len() - 1) as u32;
        self.root = util::insert(&mut self.arena, self.root, idx);
        trace!(index = idx, len = self.arena.len(), "inserted");
    }

    /// Whether some node holds a key equal to `key`.
    pub fn search(&self, key: &T) -> bool {
        let mut curr = self.root;
        while let Some(i) = curr {
            let n = self.node(i);
            if n.k == *key {
                return true;
            }
            curr = if *key < n.k { n.l } else { n.r };
        }
        false
    }

    pub fn contains(&self, key: &T) -> bool {
        self.search(key)
    }

    /// Removes one node holding `key` and returns its key.
    ///
    /// The descent keeps going right on a match and removes the last matching
    /// node on its path, so among duplicates the deepest right one goes first.
    pub fn remove(&mut self, key: &T) -> Result<T, TreeError> {
        let Some(z) = self.find_for_removal(key) else {
            debug!(len = self.arena.len(), "remove: key not found");
            return Err(TreeError::KeyNotFound);
        };

        self.root = util::remove(&mut self.arena, self.root, z);
        let (node, root) = util::free_slot(&mut self.arena, self.root, z);
        self.root = root;
        trace!(index = z, len = self.arena.len(), "removed");
        Ok(node.k)
    }

    fn find_for_removal(&self, key: &T) -> Option<u32> {
        let mut found = None;
        let mut curr = self.root;
        while let Some(i) = curr {
            let n = self.node(i);
            if n.k == *key {
                found = Some(i);
            }
            curr = if n.k <= *key { n.r } else { n.l };
        }
        found
    }

    /// Checks every red-black invariant plus ordering and arena bookkeeping.
    ///
    /// Returns the tree's black height.
    pub fn validate(&self) -> Result<usize, InvariantViolation> {
        let height = util::assert_red_black_tree(&self.arena, self.root)?;
        let reachable = size(&self.arena, self.root);
        if reachable != self.arena.len() {
            return Err(InvariantViolation::SizeMismatch {
                reachable,
                stored: self.arena.len(),
            });
        }
        Ok(height)
    }
}

impl<T: fmt::Display> RbTree<T> {
    /// Tree-art rendering with node colors; `Tree is empty.` for no nodes.
    pub fn print(&self) -> String {
        util::print(&self.arena, self.root)
    }
}

impl<T: fmt::Display> fmt::Display for RbTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.print())
    }
}

impl<T: fmt::Debug> fmt::Debug for RbTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for RbTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for RbTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, T> IntoIterator for &'a RbTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order walk over a tree's keys, following parent links.
pub struct Iter<'a, T> {
    arena: &'a [RbNode<T>],
    curr: Option<u32>,
    remaining: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            curr: self.curr,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        let i = self.curr?;
        self.curr = next(arena, i);
        self.remaining -= 1;
        Some(arena[i as usize].key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
