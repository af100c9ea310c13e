use miette::Diagnostic;
use thiserror::Error;

/// Result alias for tree algorithm operations.
pub type TreeResult<T> = Result<T, TreeError>;

/// Errors raised by the generic tree algorithms.
///
/// Algorithms never try to recover from a malformed tree. If parent and child
/// links disagree the operation fails with `StructuralCorruption` rather than
/// returning an answer computed from inconsistent state.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum TreeError {
    #[error("tree structure is corrupt: {0}")]
    #[diagnostic(
        code(verso::tree::structural_corruption),
        help("parent and child links disagree; the tree was mutated inconsistently")
    )]
    StructuralCorruption(String),

    #[error("no path exists between the given nodes")]
    #[diagnostic(code(verso::tree::path_not_found))]
    PathNotFound,

    #[error("index {index} at depth {depth} is out of range (node has {len} children)")]
    #[diagnostic(code(verso::tree::index_out_of_range))]
    IndexOutOfRange {
        index: usize,
        depth: usize,
        len: usize,
    },

    #[error("expected a leaf node")]
    #[diagnostic(code(verso::tree::not_a_leaf))]
    NotALeaf,

    #[error("`{0}` requires parent lookup, which this tree does not provide")]
    #[diagnostic(code(verso::tree::unsupported_operation))]
    UnsupportedOperation(&'static str),
}

impl TreeError {
    pub fn corruption(message: impl Into<String>) -> Self {
        Self::StructuralCorruption(message.into())
    }
}
