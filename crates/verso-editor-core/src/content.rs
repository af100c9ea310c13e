//! Immutable document + selection snapshots.
//!
//! Every edit clones the tree, changes the clone, and returns a new
//! `Content`. Earlier snapshots keep their own tree and stay valid.

use std::sync::Arc;

use verso_tree::TreeAlgos;

use crate::document::Document;
use crate::error::{EditorError, EditorResult};
use crate::node::NodeId;
use crate::selection::Selection;

/// A document paired with a selection into it.
#[derive(Debug, Clone)]
pub struct Content {
    document: Arc<Document>,
    selection: Selection,
}

impl Content {
    /// `doc[p[text ""]]` with the cursor at the start.
    pub fn create_empty() -> Self {
        let document = Document::empty_paragraph();
        let selection = Selection::cursor_at_start(&document, document.root());
        Self {
            document: Arc::new(document),
            selection,
        }
    }

    /// Pair a document with a selection, checking both.
    pub fn new(document: Document, selection: Selection) -> EditorResult<Self> {
        document.validate()?;
        selection.validate(&document)?;
        Ok(Self {
            document: Arc::new(document),
            selection,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn shared_document(&self) -> Arc<Document> {
        Arc::clone(&self.document)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Same tree, different selection.
    pub fn with_selection(&self, selection: Selection) -> EditorResult<Self> {
        selection.validate(&self.document)?;
        Ok(Self {
            document: Arc::clone(&self.document),
            selection,
        })
    }

    /// True when both snapshots share one tree and hold the same raw selection.
    pub fn is_same_snapshot(&self, other: &Content) -> bool {
        Arc::ptr_eq(&self.document, &other.document) && self.selection == other.selection
    }

    /// Insert `text` at the cursor.
    ///
    /// Only a collapsed selection on a `text` leaf is supported; ranges must be
    /// removed first with [`Content::remove_selection`]. A caret at the end of
    /// a leaf types into that leaf, not into the one after it.
    pub fn add_text(&self, text: &str) -> EditorResult<Self> {
        let doc = self.document();
        if !self.selection.is_collapsed(doc)? {
            return Err(EditorError::unsupported_selection(
                "text can only be inserted at a collapsed selection",
            ));
        }
        let cursor = self.selection.text_points(doc)?.focus;
        let Some(current) = doc.text(cursor.node()) else {
            return Err(EditorError::unsupported_selection(format!(
                "cursor sits on {}, which is not a text node",
                cursor.node()
            )));
        };

        let path = doc.index_path_to_node(doc.root(), cursor.node())?;
        let mut next = doc.clone_document()?;
        let target = next.node_at_index_path(next.root(), &path)?;
        next.set_text(target, splice(current, cursor.offset, cursor.offset, text))?;

        let offset = cursor.offset + text.chars().count();
        let selection = Selection::caret(next.point(target, offset));
        tracing::debug!(
            inserted = text.chars().count(),
            offset,
            "inserted text"
        );
        Ok(Self {
            document: Arc::new(next),
            selection,
        })
    }

    /// Delete the selected text and collapse to where it started.
    ///
    /// A collapsed selection returns this same snapshot. Leaves strictly
    /// between the endpoints are emptied but kept, so the tree shape does not
    /// change.
    pub fn remove_selection(&self) -> EditorResult<Self> {
        let doc = self.document();
        if self.selection.is_collapsed(doc)? {
            return Ok(self.clone());
        }
        let (start, end) = self.selection.ordered(doc)?;
        let (mut next, map) = doc.clone_with_map()?;

        if start.node() == end.node() {
            cut_text(&mut next, map.require(start.node())?, start.offset, Some(end.offset))?;
        } else {
            cut_text(&mut next, map.require(start.node())?, start.offset, None)?;
            let mut leaf = doc.next_adjacent_leaf(start.node())?;
            while let Some(current) = leaf {
                if current == end.node() {
                    break;
                }
                if doc.text(current).is_some() {
                    next.set_text(map.require(current)?, "")?;
                }
                leaf = doc.next_adjacent_leaf(current)?;
            }
            if leaf.is_none() {
                return Err(EditorError::corruption(format!(
                    "selection end {end} does not follow its start {start}"
                )));
            }
            cut_text(&mut next, map.require(end.node())?, 0, Some(end.offset))?;
        }

        let selection = Selection::caret(next.point(map.require(start.node())?, start.offset));
        tracing::debug!(from = %start, to = %end, "removed selection");
        Ok(Self {
            document: Arc::new(next),
            selection,
        })
    }
}

/// Remove the characters in `[from, to)` from a text node of the clone.
/// `None` cuts to the end. Non-text leaves are left alone.
fn cut_text(clone: &mut Document, target: NodeId, from: usize, to: Option<usize>) -> EditorResult<()> {
    let Some(text) = clone.text(target) else {
        return Ok(());
    };
    let to = to.unwrap_or_else(|| text.chars().count());
    let cut = splice(text, from, to, "");
    clone.set_text(target, cut)
}

/// Replace chars `[from, to)` of `text` with `insert`.
fn splice(text: &str, from: usize, to: usize, insert: &str) -> String {
    let byte = |offset: usize| {
        text.char_indices()
            .nth(offset)
            .map_or(text.len(), |(index, _)| index)
    };
    let (from, to) = (byte(from), byte(to));
    let mut out = String::with_capacity(text.len() - (to - from) + insert.len());
    out.push_str(&text[..from]);
    out.push_str(insert);
    out.push_str(&text[to..]);
    out
}
