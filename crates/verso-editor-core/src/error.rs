use miette::Diagnostic;
use thiserror::Error;
use verso_tree::TreeError;

use crate::platform::PlatformError;

/// Result alias used throughout the editor core.
pub type EditorResult<T> = Result<T, EditorError>;

/// Everything that can go wrong while resolving, normalizing or mutating
/// editor state.
///
/// Errors are raised at the point of violation. Nothing here clamps an offset
/// or repairs a tree on the caller's behalf.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum EditorError {
    #[error("invalid document: {0}")]
    #[diagnostic(code(verso::editor::invalid_document))]
    InvalidDocument(String),

    #[error("selection endpoints belong to different documents")]
    #[diagnostic(
        code(verso::editor::cross_document_selection),
        help("re-derive the selection from the snapshot it is applied to")
    )]
    CrossDocumentSelection,

    #[error("offset {offset} is out of range for a node of length {len}")]
    #[diagnostic(code(verso::editor::offset_out_of_range))]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("moved past the edge of the document")]
    #[diagnostic(code(verso::editor::out_of_range))]
    OutOfRange,

    #[error("invalid argument: {0}")]
    #[diagnostic(code(verso::editor::invalid_argument))]
    InvalidArgument(String),

    #[error("unsupported selection: {0}")]
    #[diagnostic(code(verso::editor::unsupported_selection))]
    UnsupportedSelection(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Tree(#[from] TreeError),

    #[error("render surface error: {0}")]
    #[diagnostic(code(verso::editor::platform))]
    Platform(#[from] PlatformError),
}

impl EditorError {
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument(message.into())
    }

    pub fn unsupported_selection(message: impl Into<String>) -> Self {
        Self::UnsupportedSelection(message.into())
    }

    pub(crate) fn corruption(message: impl Into<String>) -> Self {
        Self::Tree(TreeError::corruption(message))
    }
}
