//! Lazy iterators over trees.
//!
//! Every iterator here borrows the tree and owns only its cursor state, so
//! cloning an iterator before it is consumed restarts the walk from the same
//! point.

use crate::algos::{ParentLookup, TreeAlgos};

/// Pre-order depth-first walk: a node is yielded before its children, and
/// children are visited left to right.
pub struct DfsInfix<'a, T: TreeAlgos> {
    tree: &'a T,
    stack: Vec<T::Node>,
}

impl<'a, T: TreeAlgos> DfsInfix<'a, T> {
    pub(crate) fn new(tree: &'a T, root: T::Node) -> Self {
        Self {
            tree,
            stack: vec![root],
        }
    }
}

impl<T: TreeAlgos> Clone for DfsInfix<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            stack: self.stack.clone(),
        }
    }
}

impl<T: TreeAlgos> Iterator for DfsInfix<'_, T> {
    type Item = T::Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children reversed so the leftmost child is popped first.
        let start = self.stack.len();
        self.stack.extend(self.tree.child_nodes(node));
        self.stack[start..].reverse();
        Some(node)
    }
}

/// Leaves of a subtree in left-to-right order. A leaf root yields itself.
pub struct Leaves<'a, T: TreeAlgos> {
    dfs: DfsInfix<'a, T>,
}

impl<'a, T: TreeAlgos> Leaves<'a, T> {
    pub(crate) fn new(tree: &'a T, root: T::Node) -> Self {
        Self {
            dfs: DfsInfix::new(tree, root),
        }
    }
}

impl<T: TreeAlgos> Clone for Leaves<'_, T> {
    fn clone(&self) -> Self {
        Self {
            dfs: self.dfs.clone(),
        }
    }
}

impl<T: TreeAlgos> Iterator for Leaves<'_, T> {
    type Item = T::Node;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.dfs.tree;
        self.dfs.by_ref().find(|&node| tree.is_leaf(node))
    }
}

/// Walk from a node up through its ancestors, ending with the root.
pub struct PathToParent<'a, T: TreeAlgos> {
    tree: &'a T,
    current: Option<T::Node>,
}

impl<'a, T: TreeAlgos> PathToParent<'a, T> {
    pub(crate) fn new(tree: &'a T, node: T::Node) -> Self {
        Self {
            tree,
            current: Some(node),
        }
    }
}

impl<T: TreeAlgos> Clone for PathToParent<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            current: self.current,
        }
    }
}

impl<T: TreeAlgos> Iterator for PathToParent<'_, T> {
    type Item = T::Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current?;
        self.current = match self.tree.parent_node(node) {
            ParentLookup::Supported(parent) => parent,
            ParentLookup::Unsupported => None,
        };
        Some(node)
    }
}
