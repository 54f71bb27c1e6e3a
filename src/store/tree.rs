//! Unbalanced binary search tree with arena-backed nodes.
//!
//! Nodes live in a `Vec` owned by the tree and reference their children by
//! index. Every node except the root is referenced by exactly one parent
//! edge, so each subtree has a single owner. No parent links are stored.
//!
//! All walks (traversal, height, invariant checking) use explicit stacks.
//! Measurement files are usually sorted by timestamp, which turns the tree
//! into a near-linear chain; recursion over such a chain would be bounded by
//! the call stack rather than by memory.

use std::cmp::Ordering;

type NodeId = usize;

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl<T> Node<T> {
    fn leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }
}

/// An ordered set of values stored as an unbalanced binary search tree.
///
/// Inserting a value equal to one already present is a no-op: the existing
/// value is kept and the new one is dropped.
///
/// `Clone` produces a deep copy with its own node storage, so inserting into
/// the copy never affects the original.
#[derive(Debug, Clone)]
pub struct OrderedTree<T> {
    root: Option<NodeId>,
    nodes: Vec<Node<T>>,
}

impl<T> Default for OrderedTree<T> {
    fn default() -> Self {
        Self {
            root: None,
            nodes: Vec::new(),
        }
    }
}

impl<T> OrderedTree<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of stored values. Nodes are never removed, so this is the
    /// arena length.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges on the longest root-to-leaf path.
    ///
    /// An empty tree has height −1 and a single node has height 0.
    pub fn height(&self) -> isize {
        let mut level: Vec<NodeId> = self.root.into_iter().collect();
        let mut height = -1;
        while !level.is_empty() {
            height += 1;
            level = level
                .iter()
                .flat_map(|&id| {
                    let node = &self.nodes[id];
                    node.left.into_iter().chain(node.right)
                })
                .collect();
        }
        height
    }

    /// Borrowing iterator in ascending (in-order) sequence.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Visits every value once in (left, node, right) order.
    pub fn in_order<F>(&self, mut visit: F)
    where
        F: FnMut(&T),
    {
        for value in self.iter() {
            visit(value);
        }
    }

    /// In-order traversal that threads a caller-owned accumulator through
    /// each visit.
    pub fn in_order_with<C, F>(&self, context: &mut C, mut visit: F)
    where
        F: FnMut(&T, &mut C),
    {
        for value in self.iter() {
            visit(value, context);
        }
    }

    /// Visits every value once in (node, left, right) order.
    pub fn pre_order<F>(&self, mut visit: F)
    where
        F: FnMut(&T),
    {
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            visit(&node.value);
            // right first so the left subtree is popped first
            stack.extend(node.right);
            stack.extend(node.left);
        }
    }

    /// Visits every value once in (left, right, node) order.
    pub fn post_order<F>(&self, mut visit: F)
    where
        F: FnMut(&T),
    {
        // (node, right, left) reversed is (left, right, node)
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(id) = stack.pop() {
            order.push(id);
            let node = &self.nodes[id];
            stack.extend(node.left);
            stack.extend(node.right);
        }
        for id in order.into_iter().rev() {
            visit(&self.nodes[id].value);
        }
    }
}

impl<T: Ord> OrderedTree<T> {
    /// Inserts `value`, returning `false` if an equal value was already
    /// present (in which case the tree is unchanged).
    pub fn insert(&mut self, value: T) -> bool {
        let Some(mut current) = self.root else {
            self.root = Some(self.nodes.len());
            self.nodes.push(Node::leaf(value));
            return true;
        };

        loop {
            let next_id = self.nodes.len();
            let node = &mut self.nodes[current];
            let slot = match value.cmp(&node.value) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return false,
            };
            let child = *slot;
            match child {
                Some(child) => current = child,
                None => {
                    *slot = Some(next_id);
                    self.nodes.push(Node::leaf(value));
                    return true;
                }
            }
        }
    }

    /// Returns the stored value equal to `value`, if any.
    pub fn search(&self, value: &T) -> Option<&T> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(&node.value),
            };
        }
        None
    }

    pub fn contains(&self, value: &T) -> bool {
        self.search(value).is_some()
    }

    /// Verifies the search-tree ordering and single-ownership invariants.
    ///
    /// Each subtree is checked against an open interval inherited from its
    /// ancestors; `None` means unbounded on that side. Also fails if any node
    /// is reachable twice or not at all.
    pub fn check_invariant(&self) -> bool {
        let mut visited = vec![false; self.nodes.len()];
        let mut reached = 0;
        let mut stack: Vec<(NodeId, Option<&T>, Option<&T>)> =
            self.root.map(|id| (id, None, None)).into_iter().collect();

        while let Some((id, low, high)) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                return false;
            };
            if std::mem::replace(&mut visited[id], true) {
                return false;
            }
            reached += 1;

            let value = &node.value;
            if low.is_some_and(|low| value <= low) || high.is_some_and(|high| value >= high) {
                return false;
            }
            if let Some(left) = node.left {
                stack.push((left, low, Some(value)));
            }
            if let Some(right) = node.right {
                stack.push((right, Some(value), high));
            }
        }

        reached == self.nodes.len()
    }
}

impl<T: Ord> Extend<T> for OrderedTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for OrderedTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T> IntoIterator for &'a OrderedTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over an [`OrderedTree`].
pub struct Iter<'a, T> {
    tree: &'a OrderedTree<T>,
    stack: Vec<NodeId>,
}

impl<'a, T> Iter<'a, T> {
    fn new(tree: &'a OrderedTree<T>) -> Self {
        let mut iter = Self {
            tree,
            stack: Vec::new(),
        };
        iter.push_left_spine(tree.root);
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<NodeId>) {
        while let Some(id) = current {
            self.stack.push(id);
            current = self.tree.nodes[id].left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let id = self.stack.pop()?;
        let tree = self.tree;
        let node = &tree.nodes[id];
        self.push_left_spine(node.right);
        Some(&node.value)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
