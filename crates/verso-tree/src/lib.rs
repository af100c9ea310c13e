//! verso-tree: tree algorithms that make no assumptions about node layout.
//!
//! This crate provides:
//! - `TreeAlgos` trait - a tree is anything that can list a node's children,
//!   and optionally name its parent
//! - Pre-order and leaf iterators over any subtree
//! - Ancestry queries: containment, least common ancestor, paths and index paths
//! - Adjacent-leaf navigation used for cursor movement

pub mod algos;
pub mod error;
pub mod iter;

pub use algos::{IndexPath, ParentLookup, TreeAlgos};
pub use error::{TreeError, TreeResult};
pub use iter::{DfsInfix, Leaves, PathToParent};
