//! The `TreeAlgos` capability trait and the algorithms built on it.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{TreeError, TreeResult};
use crate::iter::{DfsInfix, Leaves, PathToParent};

/// Child indices leading from an ancestor down to one of its descendants.
///
/// The empty path addresses the ancestor itself.
pub type IndexPath = Vec<usize>;

/// Result of asking a tree for a node's parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentLookup<N> {
    /// The tree tracks parents. `None` means the node is a root.
    Supported(Option<N>),
    /// The tree cannot answer parent queries.
    Unsupported,
}

impl<N> ParentLookup<N> {
    /// Unwrap a supported lookup, or fail naming the operation that needed it.
    pub fn require(self, operation: &'static str) -> TreeResult<Option<N>> {
        match self {
            Self::Supported(parent) => Ok(parent),
            Self::Unsupported => Err(TreeError::UnsupportedOperation(operation)),
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Supported(_))
    }
}

/// Tree algorithms parameterized only by how to reach a node's children and,
/// optionally, its parent.
///
/// Implementors supply `child_nodes`. Supplying `parent_node` turns several
/// O(tree size) scans into O(depth) walks and unlocks the operations that
/// cannot be answered without it (`least_common_ancestor`, `path_to_parent`,
/// adjacent-leaf navigation).
///
/// Nodes are handles: cheap to copy and compared by identity.
pub trait TreeAlgos: Sized {
    type Node: Copy + Eq + Hash + Debug;

    /// Children of `node`, left to right.
    fn child_nodes(&self, node: Self::Node) -> impl Iterator<Item = Self::Node> + '_;

    /// Parent of `node`. Trees without parent links keep the default.
    fn parent_node(&self, _node: Self::Node) -> ParentLookup<Self::Node> {
        ParentLookup::Unsupported
    }

    fn is_leaf(&self, node: Self::Node) -> bool {
        self.child_nodes(node).next().is_none()
    }

    /// Pre-order walk of the subtree rooted at `root`.
    fn dfs_infix(&self, root: Self::Node) -> DfsInfix<'_, Self> {
        DfsInfix::new(self, root)
    }

    /// Leaves of the subtree rooted at `root`, left to right.
    fn leaves(&self, root: Self::Node) -> Leaves<'_, Self> {
        Leaves::new(self, root)
    }

    /// First node in pre-order that matches `predicate`.
    fn find<P>(&self, root: Self::Node, mut predicate: P) -> Option<Self::Node>
    where
        P: FnMut(Self::Node) -> bool,
    {
        self.dfs_infix(root).find(|&node| predicate(node))
    }

    /// True if `descendant` is `ancestor` or lies somewhere beneath it.
    fn contains_node(&self, ancestor: Self::Node, descendant: Self::Node) -> bool {
        if ancestor == descendant {
            return true;
        }

        let mut next = match self.parent_node(descendant) {
            ParentLookup::Supported(parent) => parent,
            ParentLookup::Unsupported => {
                return self.dfs_infix(ancestor).any(|node| node == descendant);
            }
        };

        while let Some(node) = next {
            if node == ancestor {
                return true;
            }
            next = match self.parent_node(node) {
                ParentLookup::Supported(parent) => parent,
                ParentLookup::Unsupported => {
                    return self.dfs_infix(ancestor).any(|node| node == descendant);
                }
            };
        }
        false
    }

    /// Walk from `node` up to the root, inclusive on both ends.
    fn path_to_parent(&self, node: Self::Node) -> TreeResult<PathToParent<'_, Self>> {
        self.parent_node(node).require("path_to_parent")?;
        Ok(PathToParent::new(self, node))
    }

    /// Deepest node that is an ancestor of both `a` and `b`.
    ///
    /// Returns `None` when the nodes live in disjoint trees.
    fn least_common_ancestor(
        &self,
        a: Self::Node,
        b: Self::Node,
    ) -> TreeResult<Option<Self::Node>> {
        if a == b {
            return Ok(Some(a));
        }

        let mut a_path: Vec<_> = self.path_to_parent(a)?.collect();
        let mut b_path: Vec<_> = self.path_to_parent(b)?.collect();
        a_path.reverse();
        b_path.reverse();

        let common = a_path
            .iter()
            .zip(b_path.iter())
            .take_while(|(x, y)| x == y)
            .last()
            .map(|(x, _)| *x);
        Ok(common)
    }

    /// Nodes from `ancestor` down to `descendant`, root first, inclusive.
    fn path_to_child(
        &self,
        ancestor: Self::Node,
        descendant: Self::Node,
    ) -> TreeResult<Vec<Self::Node>> {
        if !self.parent_node(descendant).is_supported() {
            return path_to_child_using_children(self, ancestor, descendant);
        }

        let mut path = Vec::new();
        let mut found = false;
        for node in self.path_to_parent(descendant)? {
            path.push(node);
            if node == ancestor {
                found = true;
                break;
            }
        }
        if !found {
            return Err(TreeError::PathNotFound);
        }
        path.reverse();
        Ok(path)
    }

    /// Child indices leading from `from` down to `to`.
    fn index_path_to_node(&self, from: Self::Node, to: Self::Node) -> TreeResult<IndexPath> {
        let path = self.path_to_child(from, to)?;
        path.windows(2)
            .map(|pair| {
                let (parent, child) = (pair[0], pair[1]);
                self.child_nodes(parent)
                    .position(|node| node == child)
                    .ok_or_else(|| {
                        TreeError::corruption(format!(
                            "{child:?} lists {parent:?} as its parent, but is not among its children"
                        ))
                    })
            })
            .collect()
    }

    /// Resolve an index path relative to `from`.
    fn node_at_index_path(&self, from: Self::Node, path: &[usize]) -> TreeResult<Self::Node> {
        let mut node = from;
        for (depth, &index) in path.iter().enumerate() {
            node = match self.child_nodes(node).nth(index) {
                Some(child) => child,
                None => {
                    return Err(TreeError::IndexOutOfRange {
                        index,
                        depth,
                        len: self.child_nodes(node).count(),
                    });
                }
            };
        }
        Ok(node)
    }

    /// Leaf that follows `leaf` in document order, if any.
    ///
    /// ```text
    ///            *
    ///       ----------
    ///       |        |
    ///     -----    -----
    ///     |   |    |   |
    ///    (A) (B)  (C) (D)
    /// ```
    ///
    /// The next leaf of A is B, of B is C, and D has none.
    fn next_adjacent_leaf(&self, leaf: Self::Node) -> TreeResult<Option<Self::Node>> {
        if !self.is_leaf(leaf) {
            return Err(TreeError::NotALeaf);
        }

        let mut child = leaf;
        let mut parent = self.parent_node(leaf).require("next_adjacent_leaf")?;
        let mut explore = None;

        while let Some(current) = parent {
            let mut siblings = self.child_nodes(current);
            if !siblings.any(|node| node == child) {
                return Err(disagreeing_links(current, child));
            }
            if let Some(next) = siblings.next() {
                explore = Some(next);
                break;
            }
            child = current;
            parent = self.parent_node(current).require("next_adjacent_leaf")?;
        }

        // Descend to the leftmost leaf of the sibling we found.
        Ok(explore.map(|mut node| {
            while let Some(first) = self.child_nodes(node).next() {
                node = first;
            }
            node
        }))
    }

    /// Leaf that precedes `leaf` in document order, if any.
    fn prev_adjacent_leaf(&self, leaf: Self::Node) -> TreeResult<Option<Self::Node>> {
        if !self.is_leaf(leaf) {
            return Err(TreeError::NotALeaf);
        }

        let mut child = leaf;
        let mut parent = self.parent_node(leaf).require("prev_adjacent_leaf")?;
        let mut explore = None;

        while let Some(current) = parent {
            let mut prev = None;
            let mut found = false;
            for node in self.child_nodes(current) {
                if node == child {
                    found = true;
                    break;
                }
                prev = Some(node);
            }
            if !found {
                return Err(disagreeing_links(current, child));
            }
            if prev.is_some() {
                explore = prev;
                break;
            }
            child = current;
            parent = self.parent_node(current).require("prev_adjacent_leaf")?;
        }

        // Descend to the rightmost leaf of the sibling we found.
        Ok(explore.map(|mut node| {
            while let Some(last) = self.child_nodes(node).last() {
                node = last;
            }
            node
        }))
    }
}

/// Path search for trees without parent links.
///
/// Pre-order guarantees a node's parent is visited before the node itself, so
/// the child-to-parent map is always complete for the nodes seen so far.
fn path_to_child_using_children<T: TreeAlgos>(
    tree: &T,
    ancestor: T::Node,
    descendant: T::Node,
) -> TreeResult<Vec<T::Node>> {
    let mut parents: HashMap<T::Node, T::Node> = HashMap::new();
    let mut found = false;

    for node in tree.dfs_infix(ancestor) {
        if node == descendant {
            found = true;
            break;
        }
        for child in tree.child_nodes(node) {
            parents.insert(child, node);
        }
    }
    if !found {
        return Err(TreeError::PathNotFound);
    }

    let mut path = vec![descendant];
    let mut current = descendant;
    while current != ancestor {
        current = *parents.get(&current).ok_or_else(|| {
            TreeError::corruption(format!("lost track of the parent of {current:?}"))
        })?;
        path.push(current);
    }
    path.reverse();
    tracing::trace!(len = path.len(), "path_to_child: resolved without parent links");
    Ok(path)
}

fn disagreeing_links<N: Debug>(parent: N, child: N) -> TreeError {
    TreeError::corruption(format!(
        "{child:?} lists {parent:?} as its parent, but is not among its children"
    ))
}
