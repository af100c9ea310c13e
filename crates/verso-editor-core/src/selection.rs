//! Anchor/focus selections over a [`Document`], and their normal form.
//!
//! An endpoint is a node plus an offset into it: a child index on containers,
//! a character index on `text` leaves. Many endpoints describe the same caret
//! position, so most queries first reduce a selection to its normal form,
//! where both endpoints sit on leaves and an offset at the very end of a leaf
//! is moved to the start of the next one. The last leaf of the document is
//! the one exception: its end has nowhere to move and stays as it is.
//!
//! Every operation takes the document the selection is resolved against and
//! fails with [`EditorError::CrossDocumentSelection`] when an endpoint was
//! taken from a different snapshot.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use verso_tree::TreeAlgos;

use crate::document::Document;
use crate::error::{EditorError, EditorResult};
use crate::node::{NodeId, NodeKind, NodeRef};

/// One end of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub target: NodeRef,
    /// Child index for containers, character index for text.
    pub offset: usize,
}

impl Endpoint {
    pub fn new(target: NodeRef, offset: usize) -> Self {
        Self { target, offset }
    }

    pub fn node(&self) -> NodeId {
        self.target.node
    }

    /// The node this endpoint points at, if it belongs to `doc`.
    fn resolve(&self, doc: &Document) -> EditorResult<NodeId> {
        if self.target.document != doc.id() {
            return Err(EditorError::CrossDocumentSelection);
        }
        if !doc.has_node(self.target.node) {
            return Err(EditorError::corruption(format!(
                "{} is not part of this document",
                self.target.node
            )));
        }
        Ok(self.target.node)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.target.node, self.offset)
    }
}

/// Which endpoint [`Selection::collapse`] keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapseTo {
    Anchor,
    Focus,
}

impl FromStr for CollapseTo {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "to-anchor" => Ok(Self::Anchor),
            "to-focus" => Ok(Self::Focus),
            other => Err(EditorError::InvalidArgument(format!(
                "expected `to-anchor` or `to-focus`, got `{other}`"
            ))),
        }
    }
}

/// How much of a subtree a selection covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStatus {
    NotSelected,
    PartiallySelected,
    FullySelected,
}

/// A pair of endpoints. The anchor is where the selection started, the focus
/// is where it currently ends; either may come first in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    pub anchor: Endpoint,
    pub focus: Endpoint,
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.anchor, self.focus)
    }
}

impl Selection {
    pub fn new(anchor: Endpoint, focus: Endpoint) -> Self {
        Self { anchor, focus }
    }

    /// A caret: both endpoints at `point`.
    pub fn caret(point: Endpoint) -> Self {
        Self::new(point, point)
    }

    /// Caret at offset 0 of `node`. The node does not need to be a leaf;
    /// normalization descends to the first leaf.
    pub fn cursor_at_start(doc: &Document, node: NodeId) -> Self {
        Self::caret(doc.point(node, 0))
    }

    /// Both endpoints resolve in `doc`, share a root and have offsets within
    /// their node's length.
    pub fn validate(&self, doc: &Document) -> EditorResult<()> {
        let anchor = self.anchor.resolve(doc)?;
        let focus = self.focus.resolve(doc)?;
        if doc.document_node(anchor)? != doc.document_node(focus)? {
            return Err(EditorError::CrossDocumentSelection);
        }
        for (node, offset) in [(anchor, self.anchor.offset), (focus, self.focus.offset)] {
            let len = doc.len(node)?;
            if offset > len {
                return Err(EditorError::OffsetOutOfRange { offset, len });
            }
        }
        Ok(())
    }

    pub fn is_norm(&self, doc: &Document) -> EditorResult<bool> {
        Ok(is_norm_endpoint(doc, &self.anchor)? && is_norm_endpoint(doc, &self.focus)?)
    }

    /// Normal form of this selection. Borrows `self` when it already is one.
    pub fn norm(&self, doc: &Document) -> EditorResult<Cow<'_, Selection>> {
        self.validate(doc)?;
        if self.is_norm(doc)? {
            return Ok(Cow::Borrowed(self));
        }
        let normed = Selection::new(
            norm_endpoint(doc, &self.anchor)?,
            norm_endpoint(doc, &self.focus)?,
        );
        tracing::trace!(from = %self, to = %normed, "normalized selection");
        Ok(Cow::Owned(normed))
    }

    /// Equal as positions, not as raw endpoints.
    pub fn is_equal(&self, other: &Selection, doc: &Document) -> EditorResult<bool> {
        Ok(self.norm(doc)? == other.norm(doc)?)
    }

    pub fn is_collapsed(&self, doc: &Document) -> EditorResult<bool> {
        let normed = self.norm(doc)?;
        Ok(normed.anchor == normed.focus)
    }

    pub fn collapse(&self, to: CollapseTo) -> Selection {
        match to {
            CollapseTo::Anchor => Self::caret(self.anchor),
            CollapseTo::Focus => Self::caret(self.focus),
        }
    }

    /// True when the focus comes before the anchor in document order.
    pub fn is_backward(&self, doc: &Document) -> EditorResult<bool> {
        let normed = self.norm(doc)?;
        let (anchor, focus) = (normed.anchor, normed.focus);
        if anchor.node() == focus.node() {
            return Ok(anchor.offset > focus.offset);
        }

        let lca = doc
            .least_common_ancestor(anchor.node(), focus.node())?
            .ok_or(EditorError::CrossDocumentSelection)?;
        for child in doc.child_nodes(lca) {
            if doc.contains_node(child, focus.node()) {
                return Ok(true);
            }
            if doc.contains_node(child, anchor.node()) {
                return Ok(false);
            }
        }
        Err(EditorError::corruption(format!(
            "neither {anchor} nor {focus} lies under their common ancestor {lca}"
        )))
    }

    /// Endpoints as a user would place them: one already on a `text` leaf is
    /// kept as is, even at the end of that leaf, and any other is normalized.
    ///
    /// The end of one leaf and the start of the next are the same position
    /// to [`Selection::norm`], but not to someone typing or looking at the
    /// caret.
    pub fn text_points(&self, doc: &Document) -> EditorResult<Selection> {
        self.validate(doc)?;
        Ok(Selection::new(
            text_endpoint(doc, &self.anchor)?,
            text_endpoint(doc, &self.focus)?,
        ))
    }

    /// Normalized endpoints in document order.
    pub fn ordered(&self, doc: &Document) -> EditorResult<(Endpoint, Endpoint)> {
        let normed = self.norm(doc)?;
        if normed.is_backward(doc)? {
            Ok((normed.focus, normed.anchor))
        } else {
            Ok((normed.anchor, normed.focus))
        }
    }

    /// Move both endpoints by `n` characters, crossing leaves as needed.
    /// Negative `n` moves backward.
    pub fn shift_char(&self, doc: &Document, n: isize) -> EditorResult<Selection> {
        let normed = self.norm(doc)?;
        let shifted = Selection::new(
            shift_endpoint(doc, &normed.anchor, n)?,
            shift_endpoint(doc, &normed.focus, n)?,
        );
        Ok(shifted.norm(doc)?.into_owned())
    }

    /// Classify how much of the subtree at `node` lies inside `[start, end)`.
    pub fn selection_status(&self, doc: &Document, node: NodeId) -> EditorResult<SelectionStatus> {
        if !doc.has_node(node) {
            return Err(EditorError::corruption(format!(
                "{node} is not part of this document"
            )));
        }
        let (start, end) = self.ordered(doc)?;
        if start == end {
            return Ok(SelectionStatus::NotSelected);
        }

        let root = doc.root();
        let start_path = doc.index_path_to_node(root, start.node())?;
        let end_path = doc.index_path_to_node(root, end.node())?;

        let mut saw_selected = false;
        let mut saw_unselected = false;
        for leaf in doc.leaves(node) {
            let len = doc.len(leaf)?;
            let status = if leaf == start.node() && leaf == end.node() {
                if start.offset == 0 && end.offset == len {
                    SelectionStatus::FullySelected
                } else {
                    SelectionStatus::PartiallySelected
                }
            } else if leaf == start.node() {
                if start.offset == 0 {
                    SelectionStatus::FullySelected
                } else {
                    SelectionStatus::PartiallySelected
                }
            } else if leaf == end.node() {
                match end.offset {
                    0 => SelectionStatus::NotSelected,
                    offset if offset == len => SelectionStatus::FullySelected,
                    _ => SelectionStatus::PartiallySelected,
                }
            } else {
                let path = doc.index_path_to_node(root, leaf)?;
                let after_start = path.cmp(&start_path) == Ordering::Greater;
                let before_end = path.cmp(&end_path) == Ordering::Less;
                if after_start && before_end {
                    SelectionStatus::FullySelected
                } else {
                    SelectionStatus::NotSelected
                }
            };

            match status {
                SelectionStatus::PartiallySelected => return Ok(status),
                SelectionStatus::FullySelected => saw_selected = true,
                SelectionStatus::NotSelected => saw_unselected = true,
            }
            if saw_selected && saw_unselected {
                return Ok(SelectionStatus::PartiallySelected);
            }
        }

        Ok(if saw_selected {
            SelectionStatus::FullySelected
        } else {
            SelectionStatus::NotSelected
        })
    }
}

fn is_norm_endpoint(doc: &Document, point: &Endpoint) -> EditorResult<bool> {
    let node = point.resolve(doc)?;
    if !doc.is_leaf(node) {
        return Ok(false);
    }
    // Only text leaves have room before their end.
    let len = doc.len(node)?;
    if point.offset < len {
        return Ok(true);
    }
    // End of the last leaf is the one place an offset may equal the length,
    // whatever kind of leaf it is.
    Ok(point.offset == len && doc.next_adjacent_leaf(node)?.is_none())
}

fn text_endpoint(doc: &Document, point: &Endpoint) -> EditorResult<Endpoint> {
    match doc.kind(point.resolve(doc)?)? {
        NodeKind::Text(_) => Ok(*point),
        _ => norm_endpoint(doc, point),
    }
}

fn norm_endpoint(doc: &Document, point: &Endpoint) -> EditorResult<Endpoint> {
    let mut node = point.resolve(doc)?;
    let mut offset = point.offset;

    // Descend to a leaf.
    while let Some(&last) = doc.children(node)?.last() {
        let children = doc.children(node)?;
        match children.get(offset) {
            Some(&child) => {
                node = child;
                offset = 0;
            }
            None => {
                node = last;
                offset = doc.len(last)?;
            }
        }
    }

    // End of a leaf is the start of the next one. Empty leaves are skipped
    // the same way, so the walk may take several steps.
    while offset >= doc.len(node)? {
        match doc.next_adjacent_leaf(node)? {
            Some(next) => {
                node = next;
                offset = 0;
            }
            None => break,
        }
    }

    Ok(doc.point(node, offset))
}

fn shift_endpoint(doc: &Document, point: &Endpoint, n: isize) -> EditorResult<Endpoint> {
    let mut node = point.node();
    let mut offset = point.offset;
    let mut remaining = n.unsigned_abs();

    if n >= 0 {
        loop {
            let room = doc.len(node)?.saturating_sub(offset);
            if remaining <= room {
                offset += remaining;
                break;
            }
            remaining -= room;
            node = doc
                .next_adjacent_leaf(node)?
                .ok_or(EditorError::OutOfRange)?;
            offset = 0;
        }
    } else {
        loop {
            if remaining <= offset {
                offset -= remaining;
                break;
            }
            remaining -= offset;
            node = doc
                .prev_adjacent_leaf(node)?
                .ok_or(EditorError::OutOfRange)?;
            offset = doc.len(node)?;
        }
    }

    Ok(doc.point(node, offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use verso_tree::TreeError;

    struct Tree1 {
        doc: Document,
        h1: NodeId,
        header1: NodeId,
        header2: NodeId,
        paragraph: NodeId,
    }

    /// `doc[h1["Header 1"], h2["Header 2"], p["paragraph"]]`
    fn tree1() -> Tree1 {
        let mut doc = Document::new();
        let root = doc.root();
        let h1 = doc.append(root, NodeKind::H1).unwrap();
        let header1 = doc.append_text(h1, "Header 1").unwrap();
        let h2 = doc.append(root, NodeKind::H2).unwrap();
        let header2 = doc.append_text(h2, "Header 2").unwrap();
        let p = doc.append(root, NodeKind::P).unwrap();
        let paragraph = doc.append_text(p, "paragraph").unwrap();
        Tree1 {
            doc,
            h1,
            header1,
            header2,
            paragraph,
        }
    }

    fn range(doc: &Document, a: (NodeId, usize), f: (NodeId, usize)) -> Selection {
        Selection::new(doc.point(a.0, a.1), doc.point(f.0, f.1))
    }

    #[test]
    fn test_norm_descends_from_root_start() {
        let t = tree1();
        let sel = Selection::cursor_at_start(&t.doc, t.doc.root());
        let normed = sel.norm(&t.doc).unwrap();
        assert_eq!(normed.anchor, t.doc.point(t.header1, 0));
        assert_eq!(normed.focus, t.doc.point(t.header1, 0));
    }

    #[test]
    fn test_norm_full_document_keeps_terminal_offset() {
        let t = tree1();
        let root = t.doc.root();
        let sel = range(&t.doc, (root, 0), (root, 3));
        let normed = sel.norm(&t.doc).unwrap();
        assert_eq!(normed.anchor, t.doc.point(t.header1, 0));
        assert_eq!(normed.focus, t.doc.point(t.paragraph, 9));
    }

    #[test]
    fn test_norm_migrates_end_of_leaf() {
        let t = tree1();
        let sel = Selection::caret(t.doc.point(t.header1, 8));
        assert!(!sel.is_norm(&t.doc).unwrap());
        let normed = sel.norm(&t.doc).unwrap();
        assert_eq!(normed.focus, t.doc.point(t.header2, 0));

        // Past the end of a container lands on the end of its last leaf.
        let sel = Selection::caret(t.doc.point(t.h1, 1));
        assert_eq!(
            sel.norm(&t.doc).unwrap().anchor,
            t.doc.point(t.header2, 0)
        );
    }

    #[test]
    fn test_norm_is_idempotent_and_borrows() {
        let t = tree1();
        let root = t.doc.root();
        for sel in [
            range(&t.doc, (root, 0), (root, 3)),
            range(&t.doc, (t.header1, 8), (t.h1, 0)),
            Selection::caret(t.doc.point(t.paragraph, 4)),
        ] {
            let once = sel.norm(&t.doc).unwrap().into_owned();
            let twice = once.norm(&t.doc).unwrap();
            assert!(matches!(twice, Cow::Borrowed(_)));
            assert_eq!(*twice, once);
        }
    }

    #[test]
    fn test_norm_skips_empty_leaves() {
        let mut doc = Document::new();
        let root = doc.root();
        let p1 = doc.append(root, NodeKind::P).unwrap();
        let a = doc.append_text(p1, "ab").unwrap();
        let p2 = doc.append(root, NodeKind::P).unwrap();
        doc.append_text(p2, "").unwrap();
        let p3 = doc.append(root, NodeKind::P).unwrap();
        let c = doc.append_text(p3, "c").unwrap();

        let normed = Selection::caret(doc.point(a, 2)).norm(&doc).unwrap().into_owned();
        assert_eq!(normed.anchor, doc.point(c, 0));
    }

    #[test]
    fn test_empty_last_block_is_terminal() {
        // doc[p["ab"], p[]]
        let mut doc = Document::new();
        let root = doc.root();
        let p1 = doc.append(root, NodeKind::P).unwrap();
        let ab = doc.append_text(p1, "ab").unwrap();
        let p2 = doc.append(root, NodeKind::P).unwrap();

        let once = Selection::caret(doc.point(ab, 2)).norm(&doc).unwrap().into_owned();
        assert_eq!(once.focus, doc.point(p2, 0));
        assert!(once.is_norm(&doc).unwrap());
        assert!(matches!(once.norm(&doc).unwrap(), Cow::Borrowed(_)));

        // The same empty block is not terminal once something follows it.
        let p3 = doc.append(root, NodeKind::P).unwrap();
        let c = doc.append_text(p3, "c").unwrap();
        assert!(!Selection::caret(doc.point(p2, 0)).is_norm(&doc).unwrap());
        assert_eq!(
            Selection::caret(doc.point(p2, 0)).norm(&doc).unwrap().focus,
            doc.point(c, 0)
        );
    }

    #[test]
    fn test_text_points_keep_end_of_leaf() {
        let t = tree1();
        let end_of_header = Selection::caret(t.doc.point(t.header1, 8));
        assert_eq!(end_of_header.text_points(&t.doc).unwrap(), end_of_header);

        // Container endpoints still resolve to a leaf.
        let root = t.doc.root();
        let whole = range(&t.doc, (root, 0), (t.h1, 1));
        let points = whole.text_points(&t.doc).unwrap();
        assert_eq!(points.anchor, t.doc.point(t.header1, 0));
        assert_eq!(points.focus, t.doc.point(t.header2, 0));

        let past_end = Selection::caret(t.doc.point(t.header1, 9));
        assert!(past_end.text_points(&t.doc).is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_offset() {
        let t = tree1();
        let sel = Selection::caret(t.doc.point(t.header1, 9));
        assert_eq!(
            sel.validate(&t.doc),
            Err(EditorError::OffsetOutOfRange { offset: 9, len: 8 })
        );
        assert!(sel.norm(&t.doc).is_err());
    }

    #[test]
    fn test_selection_from_another_snapshot_fails_fast() {
        let t = tree1();
        let clone = t.doc.clone_document().unwrap();
        let sel = Selection::cursor_at_start(&t.doc, t.doc.root());
        assert_eq!(sel.validate(&clone), Err(EditorError::CrossDocumentSelection));
        assert_eq!(sel.norm(&clone).unwrap_err(), EditorError::CrossDocumentSelection);
    }

    #[test]
    fn test_is_equal_uses_normal_form() {
        let t = tree1();
        let a = Selection::caret(t.doc.point(t.header1, 8));
        let b = Selection::caret(t.doc.point(t.header2, 0));
        let c = Selection::caret(t.doc.point(t.doc.root(), 1));
        assert!(a.is_equal(&b, &t.doc).unwrap());
        assert!(b.is_equal(&c, &t.doc).unwrap());
        assert!(a.is_equal(&c, &t.doc).unwrap());
        assert!(!a.is_equal(&Selection::caret(t.doc.point(t.header1, 0)), &t.doc).unwrap());
    }

    #[test]
    fn test_is_collapsed() {
        let t = tree1();
        let same_spot = range(&t.doc, (t.header1, 8), (t.header2, 0));
        assert!(same_spot.is_collapsed(&t.doc).unwrap());
        let real = range(&t.doc, (t.header1, 0), (t.header2, 0));
        assert!(!real.is_collapsed(&t.doc).unwrap());
    }

    #[test]
    fn test_collapse() {
        let t = tree1();
        let sel = range(&t.doc, (t.header1, 2), (t.paragraph, 4));
        let to_anchor = sel.collapse(CollapseTo::Anchor);
        let to_focus = sel.collapse("to-focus".parse().unwrap());
        assert!(to_anchor.is_collapsed(&t.doc).unwrap());
        assert!(to_focus.is_collapsed(&t.doc).unwrap());
        assert_eq!(to_anchor.focus, t.doc.point(t.header1, 2));
        assert_eq!(to_focus.anchor, t.doc.point(t.paragraph, 4));
    }

    #[test]
    fn test_collapse_to_parses_only_known_values() {
        assert_eq!("to-anchor".parse::<CollapseTo>().unwrap(), CollapseTo::Anchor);
        assert!(matches!(
            "to-middle".parse::<CollapseTo>(),
            Err(EditorError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_is_backward() {
        let t = tree1();
        let forward = range(&t.doc, (t.header1, 1), (t.paragraph, 2));
        let backward = range(&t.doc, (t.paragraph, 2), (t.header1, 1));
        let same_leaf = range(&t.doc, (t.header2, 5), (t.header2, 1));
        assert!(!forward.is_backward(&t.doc).unwrap());
        assert!(backward.is_backward(&t.doc).unwrap());
        assert!(same_leaf.is_backward(&t.doc).unwrap());
        assert!(
            !Selection::caret(t.doc.point(t.header2, 3))
                .is_backward(&t.doc)
                .unwrap()
        );
    }

    #[test]
    fn test_ordered() {
        let t = tree1();
        let backward = range(&t.doc, (t.paragraph, 2), (t.header1, 1));
        let (start, end) = backward.ordered(&t.doc).unwrap();
        assert_eq!(start, t.doc.point(t.header1, 1));
        assert_eq!(end, t.doc.point(t.paragraph, 2));
    }

    #[test]
    fn test_shift_char_within_and_across_leaves() {
        let t = tree1();
        let caret = Selection::caret(t.doc.point(t.header1, 6));
        let moved = caret.shift_char(&t.doc, 1).unwrap();
        assert_eq!(moved.focus, t.doc.point(t.header1, 7));

        // Two steps from offset 6 reach the end of "Header 1", which is the
        // start of "Header 2".
        let moved = caret.shift_char(&t.doc, 2).unwrap();
        assert_eq!(moved.focus, t.doc.point(t.header2, 0));

        let moved = caret.shift_char(&t.doc, 5).unwrap();
        assert_eq!(moved.focus, t.doc.point(t.header2, 3));

        let back = Selection::caret(t.doc.point(t.header2, 1))
            .shift_char(&t.doc, -2)
            .unwrap();
        assert_eq!(back.anchor, t.doc.point(t.header1, 7));
    }

    #[test]
    fn test_shift_char_to_document_edges() {
        let t = tree1();
        let start = Selection::caret(t.doc.point(t.header1, 0));
        assert_eq!(start.shift_char(&t.doc, -1), Err(EditorError::OutOfRange));

        let near_end = Selection::caret(t.doc.point(t.paragraph, 8));
        let end = near_end.shift_char(&t.doc, 1).unwrap();
        assert_eq!(end.focus, t.doc.point(t.paragraph, 9));
        assert_eq!(end.shift_char(&t.doc, 1), Err(EditorError::OutOfRange));
    }

    #[test]
    fn test_shift_char_moves_both_endpoints() {
        let t = tree1();
        let sel = range(&t.doc, (t.header1, 0), (t.header1, 3));
        let moved = sel.shift_char(&t.doc, 2).unwrap();
        assert_eq!(moved.anchor, t.doc.point(t.header1, 2));
        assert_eq!(moved.focus, t.doc.point(t.header1, 5));
    }

    #[test]
    fn test_selection_status_collapsed_is_never_selected() {
        let t = tree1();
        let caret = Selection::caret(t.doc.point(t.header2, 3));
        for node in t.doc.dfs_infix(t.doc.root()) {
            assert_eq!(
                caret.selection_status(&t.doc, node).unwrap(),
                SelectionStatus::NotSelected
            );
        }
    }

    #[test]
    fn test_selection_status_over_range() {
        let t = tree1();
        // From the middle of "Header 1" to the start of "paragraph".
        let sel = range(&t.doc, (t.paragraph, 0), (t.header1, 3));
        let status = |node| sel.selection_status(&t.doc, node).unwrap();

        assert_eq!(status(t.header1), SelectionStatus::PartiallySelected);
        assert_eq!(status(t.h1), SelectionStatus::PartiallySelected);
        assert_eq!(status(t.header2), SelectionStatus::FullySelected);
        assert_eq!(status(t.paragraph), SelectionStatus::NotSelected);
        assert_eq!(status(t.doc.root()), SelectionStatus::PartiallySelected);
    }

    #[test]
    fn test_selection_status_whole_document() {
        let t = tree1();
        let root = t.doc.root();
        let sel = range(&t.doc, (root, 0), (root, 3));
        assert_eq!(
            sel.selection_status(&t.doc, root).unwrap(),
            SelectionStatus::FullySelected
        );
        assert_eq!(
            sel.selection_status(&t.doc, t.paragraph).unwrap(),
            SelectionStatus::FullySelected
        );
    }

    #[test]
    fn test_selection_status_end_of_leaf_counts_as_selected() {
        let t = tree1();
        // Ends exactly at the end of "Header 2", which normalizes to the start
        // of "paragraph".
        let sel = range(&t.doc, (t.header2, 0), (t.header2, 8));
        assert_eq!(
            sel.selection_status(&t.doc, t.header2).unwrap(),
            SelectionStatus::FullySelected
        );
        assert_eq!(
            sel.selection_status(&t.doc, t.paragraph).unwrap(),
            SelectionStatus::NotSelected
        );
        assert_eq!(
            sel.selection_status(&t.doc, t.header1).unwrap(),
            SelectionStatus::NotSelected
        );
    }

    #[test]
    fn test_is_backward_with_corrupt_lca() {
        // Parent table says both leaves hang off the root, but the root
        // lists neither of them.
        use crate::document::NodeData;
        let nodes = vec![
            NodeData::new(NodeKind::Doc),
            NodeData::new(NodeKind::text("a")),
            NodeData::new(NodeKind::text("b")),
        ];
        let parents = vec![None, Some(NodeId(0)), Some(NodeId(0))];
        let doc = Document::from_raw_parts(NodeId(0), nodes, parents);
        let sel = Selection::new(doc.point(NodeId(1), 0), doc.point(NodeId(2), 0));
        assert!(matches!(
            sel.is_backward(&doc),
            Err(EditorError::Tree(TreeError::StructuralCorruption(_)))
        ));
    }
}
