//! Arena-backed document tree.
//!
//! Nodes are stored in a flat table and addressed by `NodeId`. Each node owns
//! an ordered list of child handles; parent lookup is a second table indexed
//! by the same handles and kept in step with the children lists. Nothing
//! holds a pointer back into the tree, so a `Document` is a plain value that
//! can be shared behind an `Arc`.

use std::collections::HashMap;

use smol_str::SmolStr;
use verso_tree::{ParentLookup, TreeAlgos};

use crate::error::{EditorError, EditorResult};
use crate::node::{DocumentId, MAX_NODES, NodeId, NodeKind, NodeRef};
use crate::selection::Endpoint;

/// One slot of the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub kind: NodeKind,
    pub children: Vec<NodeId>,
}

impl NodeData {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(kind: NodeKind, children: Vec<NodeId>) -> Self {
        Self { kind, children }
    }
}

/// A rich-text document tree.
///
/// Cloning is explicit through [`Document::clone_document`] so that every
/// copy gets its own [`DocumentId`].
#[derive(Debug)]
pub struct Document {
    id: DocumentId,
    root: NodeId,
    nodes: Vec<NodeData>,
    parents: Vec<Option<NodeId>>,
}

/// Original-to-clone handle correspondence produced by
/// [`Document::clone_with_map`].
#[derive(Debug, Clone, Default)]
pub struct CloneMap {
    map: HashMap<NodeId, NodeId>,
}

impl CloneMap {
    pub fn get(&self, original: NodeId) -> Option<NodeId> {
        self.map.get(&original).copied()
    }

    /// Like `get`, but a missing entry is structural corruption.
    pub fn require(&self, original: NodeId) -> EditorResult<NodeId> {
        self.get(original)
            .ok_or_else(|| EditorError::corruption(format!("{original} has no clone")))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A document holding only its `doc` root.
    pub fn new() -> Self {
        Self {
            id: DocumentId::fresh(),
            root: NodeId(0),
            nodes: vec![NodeData::new(NodeKind::Doc)],
            parents: vec![None],
        }
    }

    /// The smallest document a cursor can sit in: `doc[p[text ""]]`.
    pub fn empty_paragraph() -> Self {
        let mut doc = Self::new();
        let p = doc.push(doc.root, NodeKind::P);
        doc.push(p, NodeKind::text(""));
        doc
    }

    /// Assemble a document from raw tables without any checks.
    ///
    /// Intended for importing trees built elsewhere. Call [`Document::validate`]
    /// before trusting the result.
    pub fn from_raw_parts(root: NodeId, nodes: Vec<NodeData>, parents: Vec<Option<NodeId>>) -> Self {
        Self {
            id: DocumentId::fresh(),
            root,
            nodes,
            parents,
        }
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn has_node(&self, node: NodeId) -> bool {
        node.index() < self.nodes.len()
    }

    pub fn get(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node.index())
    }

    fn data(&self, node: NodeId) -> EditorResult<&NodeData> {
        self.get(node)
            .ok_or_else(|| EditorError::corruption(format!("{node} is not part of this document")))
    }

    pub fn kind(&self, node: NodeId) -> EditorResult<&NodeKind> {
        Ok(&self.data(node)?.kind)
    }

    pub fn children(&self, node: NodeId) -> EditorResult<&[NodeId]> {
        Ok(&self.data(node)?.children)
    }

    pub fn parent(&self, node: NodeId) -> EditorResult<Option<NodeId>> {
        self.data(node)?;
        Ok(self.parents.get(node.index()).copied().flatten())
    }

    /// Text payload of a `text` node. `None` for any other node.
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match self.get(node).map(|data| &data.kind) {
            Some(NodeKind::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Length used for offsets: characters for `text`, child count otherwise.
    pub fn len(&self, node: NodeId) -> EditorResult<usize> {
        let data = self.data(node)?;
        Ok(match &data.kind {
            NodeKind::Text(text) => text.chars().count(),
            _ => data.children.len(),
        })
    }

    pub fn node_ref(&self, node: NodeId) -> NodeRef {
        NodeRef::new(self.id, node)
    }

    /// Selection endpoint inside this document.
    pub fn point(&self, node: NodeId, offset: usize) -> Endpoint {
        Endpoint::new(self.node_ref(node), offset)
    }

    /// Append a child of `kind` under `parent`.
    pub fn append(&mut self, parent: NodeId, kind: NodeKind) -> EditorResult<NodeId> {
        match self.get(parent).map(|data| &data.kind) {
            None => {
                return Err(EditorError::invalid_document(format!(
                    "cannot append to unknown node {parent}"
                )));
            }
            Some(NodeKind::Text(_)) => {
                return Err(EditorError::invalid_document(format!(
                    "text node {parent} cannot have children"
                )));
            }
            Some(_) => {}
        }
        if kind == NodeKind::Doc {
            return Err(EditorError::invalid_document("doc nodes cannot be nested"));
        }
        if self.nodes.len() >= MAX_NODES {
            return Err(EditorError::invalid_document(format!(
                "document already holds the maximum of {MAX_NODES} nodes"
            )));
        }
        Ok(self.push(parent, kind))
    }

    pub fn append_text(&mut self, parent: NodeId, text: impl Into<SmolStr>) -> EditorResult<NodeId> {
        self.append(parent, NodeKind::Text(text.into()))
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(NodeData::new(kind));
        self.parents.push(Some(parent));
        if let Some(data) = self.nodes.get_mut(parent.index()) {
            data.children.push(id);
        }
        id
    }

    /// Replace the payload of a `text` node in place. Only used on fresh clones.
    pub(crate) fn set_text(&mut self, node: NodeId, text: impl Into<SmolStr>) -> EditorResult<()> {
        match self.nodes.get_mut(node.index()).map(|data| &mut data.kind) {
            Some(NodeKind::Text(slot)) => {
                *slot = text.into();
                Ok(())
            }
            Some(_) => Err(EditorError::unsupported_selection(format!(
                "{node} is not a text node"
            ))),
            None => Err(EditorError::corruption(format!(
                "{node} is not part of this document"
            ))),
        }
    }

    /// Check every structural rule of a document tree.
    ///
    /// Safe to call at any time, not only after construction.
    pub fn validate(&self) -> EditorResult<()> {
        if self.parents.len() != self.nodes.len() {
            return Err(EditorError::invalid_document(format!(
                "parent table has {} entries for {} nodes",
                self.parents.len(),
                self.nodes.len()
            )));
        }
        let root = self.data(self.root).map_err(|_| {
            EditorError::invalid_document(format!("root {} does not exist", self.root))
        })?;
        if let Some(parent) = self.parents[self.root.index()] {
            return Err(EditorError::invalid_document(format!(
                "root {} has parent {parent}",
                self.root
            )));
        }
        if root.kind != NodeKind::Doc {
            return Err(EditorError::invalid_document(format!(
                "root {} is a `{}` node, not `doc`",
                self.root,
                root.kind.tag()
            )));
        }

        let mut visited = vec![false; self.nodes.len()];
        visited[self.root.index()] = true;
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            let data = &self.nodes[node.index()];
            if data.kind.is_text() && !data.children.is_empty() {
                return Err(EditorError::invalid_document(format!(
                    "text node {node} has children"
                )));
            }
            for &child in &data.children {
                let Some(child_data) = self.get(child) else {
                    return Err(EditorError::invalid_document(format!(
                        "{node} lists unknown child {child}"
                    )));
                };
                if visited[child.index()] {
                    return Err(EditorError::invalid_document(format!(
                        "{child} is reachable more than once"
                    )));
                }
                visited[child.index()] = true;
                if child_data.kind == NodeKind::Doc {
                    return Err(EditorError::invalid_document(format!(
                        "doc node {child} is nested under {node}"
                    )));
                }
                match self.parents[child.index()] {
                    Some(parent) if parent == node => {}
                    Some(parent) => {
                        return Err(EditorError::invalid_document(format!(
                            "{child} records parent {parent} but is held by {node}"
                        )));
                    }
                    None => {
                        return Err(EditorError::invalid_document(format!(
                            "{child} is held by {node} but records no parent"
                        )));
                    }
                }
                stack.push(child);
            }
        }

        // A node claiming a reachable parent must be among that parent's children.
        for (index, parent) in self.parents.iter().enumerate() {
            let Some(parent) = parent else { continue };
            if visited.get(parent.index()).copied().unwrap_or(false) && !visited[index] {
                return Err(EditorError::invalid_document(format!(
                    "{} records parent {parent} but is not among its children",
                    NodeId::from_index(index)
                )));
            }
        }
        Ok(())
    }

    /// Structural equality of the subtree at `node` with the subtree at
    /// `other_node` in `other`. Compares kinds and text payloads in pre-order.
    pub fn is_equal(&self, node: NodeId, other: &Document, other_node: NodeId) -> bool {
        let mut ours = self.dfs_infix(node);
        let mut theirs = other.dfs_infix(other_node);
        loop {
            match (ours.next(), theirs.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) => {
                    let same = match (self.get(a), other.get(b)) {
                        (Some(a), Some(b)) => a.kind == b.kind,
                        _ => false,
                    };
                    if !same {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }

    /// Deep copy with a fresh `DocumentId`.
    pub fn clone_document(&self) -> EditorResult<Document> {
        self.clone_with_map().map(|(doc, _)| doc)
    }

    /// Deep copy that also reports which clone handle each original maps to.
    ///
    /// The walk is pre-order, so a node's clone always exists before its
    /// children are attached to it.
    pub fn clone_with_map(&self) -> EditorResult<(Document, CloneMap)> {
        let root = self.data(self.root)?;
        let mut clone = Document {
            id: DocumentId::fresh(),
            root: NodeId(0),
            nodes: vec![NodeData::new(root.kind.clone())],
            parents: vec![None],
        };
        let mut map = CloneMap::default();
        map.map.insert(self.root, clone.root);

        let mut stack = vec![(self.root, clone.root)];
        while let Some((original, copy)) = stack.pop() {
            let children = self.children(original)?;
            let mut copies = Vec::with_capacity(children.len());
            for &child in children {
                if self.parent(child)? != Some(original) {
                    return Err(EditorError::corruption(format!(
                        "{original} lists {child}, which records a different parent"
                    )));
                }
                if map.map.contains_key(&child) {
                    return Err(EditorError::corruption(format!(
                        "{child} is reachable more than once"
                    )));
                }
                let kind = self.kind(child)?.clone();
                let child_copy = NodeId::from_index(clone.nodes.len());
                clone.nodes.push(NodeData::new(kind));
                clone.parents.push(Some(copy));
                map.map.insert(child, child_copy);
                copies.push(child_copy);
            }
            for (&child, &child_copy) in children.iter().zip(&copies).rev() {
                stack.push((child, child_copy));
            }
            clone.nodes[copy.index()].children = copies;
        }

        tracing::trace!(nodes = map.len(), "cloned document");
        Ok((clone, map))
    }

    /// The `doc` node that `node` belongs to.
    pub fn document_node(&self, node: NodeId) -> EditorResult<NodeId> {
        let mut current = node;
        // Any walk longer than the arena is a parent cycle.
        for _ in 0..=self.nodes.len() {
            if *self.kind(current)? == NodeKind::Doc {
                return Ok(current);
            }
            current = self.parent(current)?.ok_or_else(|| {
                EditorError::corruption(format!("{node} is not attached to a doc node"))
            })?;
        }
        Err(EditorError::corruption(format!(
            "parent links above {node} form a cycle"
        )))
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(self.root, other, other.root)
    }
}

impl TreeAlgos for Document {
    type Node = NodeId;

    fn child_nodes(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.get(node)
            .map(|data| data.children.as_slice())
            .unwrap_or_default()
            .iter()
            .copied()
    }

    fn parent_node(&self, node: NodeId) -> ParentLookup<NodeId> {
        ParentLookup::Supported(self.parents.get(node.index()).copied().flatten())
    }
}
