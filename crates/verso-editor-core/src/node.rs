//! Node kinds and handles for the document arena.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use smol_str::SmolStr;

/// The closed set of node kinds a document can hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Document root. Exactly one per tree, never nested.
    Doc,
    H1,
    H2,
    H3,
    P,
    CodeBlock,
    Bold,
    Italic,
    Underline,
    /// Leaf carrying a text payload.
    Text(SmolStr),
}

impl NodeKind {
    pub fn text(text: impl Into<SmolStr>) -> Self {
        Self::Text(text.into())
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    pub fn is_block(&self) -> bool {
        matches!(self, Self::H1 | Self::H2 | Self::H3 | Self::P | Self::CodeBlock)
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, Self::Bold | Self::Italic | Self::Underline)
    }

    /// Short tag name, as rendered by a surface.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Doc => "doc",
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::P => "p",
            Self::CodeBlock => "codeblock",
            Self::Bold => "b",
            Self::Italic => "i",
            Self::Underline => "u",
            Self::Text(_) => "text",
        }
    }
}

/// Handle to a node inside one `Document` arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Handle for arena slot `index`, or `None` when it does not fit in 32
    /// bits.
    pub fn try_from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(Self)
    }

    /// Handle for arena slot `index`. Indices past `u32::MAX` saturate to
    /// `u32::MAX`, a slot no document allocates (see [`MAX_NODES`]), so the
    /// handle never resolves.
    pub fn from_index(index: usize) -> Self {
        Self::try_from_index(index).unwrap_or(Self(u32::MAX))
    }
}

/// Most nodes one document can hold. Slots run from 0 to `u32::MAX - 1`.
pub const MAX_NODES: usize = u32::MAX as usize;

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

static NEXT_DOCUMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Generation id of a document. Every construction and every clone gets a
/// fresh one, so a selection taken against one snapshot can never resolve
/// silently against another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(u64);

impl DocumentId {
    pub(crate) fn fresh() -> Self {
        Self(NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A node qualified by the document it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub document: DocumentId,
    pub node: NodeId,
}

impl NodeRef {
    pub fn new(document: DocumentId, node: NodeId) -> Self {
        Self { document, node }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_from_oversized_index_saturates() {
        assert_eq!(NodeId::from_index(7).index(), 7);
        assert_eq!(NodeId::try_from_index(MAX_NODES - 1), Some(NodeId(u32::MAX - 1)));
        #[cfg(target_pointer_width = "64")]
        {
            let oversized = MAX_NODES + 5;
            assert_eq!(NodeId::try_from_index(oversized), None);
            assert_eq!(NodeId::from_index(oversized), NodeId(u32::MAX));
            // Truncation would have aliased slot 4.
            assert_ne!(NodeId::from_index(oversized), NodeId::from_index(4));
        }
    }

    #[test]
    fn test_document_ids_are_unique() {
        let a = DocumentId::fresh();
        let b = DocumentId::fresh();
        assert_ne!(a, b);
    }

    #[test]
    fn test_kind_classes() {
        assert!(NodeKind::text("x").is_text());
        assert!(NodeKind::CodeBlock.is_block());
        assert!(NodeKind::Underline.is_inline());
        assert!(!NodeKind::Doc.is_block());
        assert_eq!(NodeKind::Bold.tag(), "b");
    }
}
