//! Headless in-memory render surface.
//!
//! `MirrorSurface` keeps one element per document node and patches itself in
//! place on reconcile, touching only elements whose tag or text changed. It
//! backs tests, and hosts that need editor state without a display.

use std::fmt::Write as _;

use smol_str::SmolStr;
use verso_tree::TreeAlgos;

use crate::document::Document;
use crate::node::{NodeId, NodeKind};
use crate::platform::{PlatformError, RenderSurface, SurfacePoint, SurfaceSelection};

/// One rendered element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorElement {
    pub tag: &'static str,
    pub text: Option<SmolStr>,
    pub children: Vec<MirrorElement>,
}

impl MirrorElement {
    fn from_kind(kind: &NodeKind) -> Self {
        Self {
            tag: kind.tag(),
            text: match kind {
                NodeKind::Text(text) => Some(text.clone()),
                _ => None,
            },
            children: Vec::new(),
        }
    }

    /// Offsets inside an element follow the document's rules.
    fn len(&self) -> usize {
        match &self.text {
            Some(text) => text.chars().count(),
            None => self.children.len(),
        }
    }

    fn at_path(&self, path: &[usize]) -> Option<&MirrorElement> {
        path.iter()
            .try_fold(self, |element, &index| element.children.get(index))
    }
}

#[derive(Debug, Default)]
pub struct MirrorSurface {
    root: Option<MirrorElement>,
    selection: Option<SurfaceSelection>,
    patched: usize,
}

impl MirrorSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<&MirrorElement> {
        self.root.as_ref()
    }

    pub fn selection(&self) -> Option<&SurfaceSelection> {
        self.selection.as_ref()
    }

    /// Elements created or rewritten by the last reconcile.
    pub fn patched(&self) -> usize {
        self.patched
    }

    /// Simulate the user moving the native selection.
    pub fn select(&mut self, selection: SurfaceSelection) -> Result<(), PlatformError> {
        self.check(&selection)?;
        self.selection = Some(selection);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Indented outline of the surface. Text elements are quoted and carry
    /// `|` at the anchor and focus offsets.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        if let Some(root) = &self.root {
            self.write_element(&mut out, root, &mut Vec::new());
        }
        out
    }

    fn write_element(&self, out: &mut String, element: &MirrorElement, path: &mut Vec<usize>) {
        let indent = "  ".repeat(path.len());
        match &element.text {
            Some(text) => {
                let _ = writeln!(out, "{indent}\"{}\"", self.marked(text, path));
            }
            None => {
                let _ = writeln!(out, "{indent}{}", element.tag);
            }
        }
        for (index, child) in element.children.iter().enumerate() {
            path.push(index);
            self.write_element(out, child, path);
            path.pop();
        }
    }

    fn marked(&self, text: &str, path: &[usize]) -> String {
        let mut marks: Vec<usize> = self
            .selection
            .iter()
            .flat_map(|selection| [&selection.anchor, &selection.focus])
            .filter(|point| point.path == path)
            .map(|point| point.offset)
            .collect();
        marks.sort_unstable();
        marks.dedup();

        let mut out = String::with_capacity(text.len() + marks.len());
        for (offset, c) in text.chars().enumerate() {
            if marks.contains(&offset) {
                out.push('|');
            }
            out.push(c);
        }
        if marks.contains(&text.chars().count()) {
            out.push('|');
        }
        out
    }

    fn check(&self, selection: &SurfaceSelection) -> Result<(), PlatformError> {
        let root = self
            .root
            .as_ref()
            .ok_or_else(|| PlatformError::new("surface has not been reconciled"))?;
        for point in [&selection.anchor, &selection.focus] {
            check_point(root, point)?;
        }
        Ok(())
    }

    fn patch(&mut self, document: &Document, node: NodeId) -> Result<MirrorElement, PlatformError> {
        let kind = document
            .kind(node)
            .map_err(|err| PlatformError(err.to_string()))?;
        self.patched += 1;
        let mut element = MirrorElement::from_kind(kind);
        for child in document.child_nodes(node) {
            element.children.push(self.patch(document, child)?);
        }
        Ok(element)
    }

    fn reconcile_element(
        &mut self,
        element: &mut MirrorElement,
        document: &Document,
        node: NodeId,
    ) -> Result<(), PlatformError> {
        let kind = document
            .kind(node)
            .map_err(|err| PlatformError(err.to_string()))?;
        let fresh = MirrorElement::from_kind(kind);
        if element.tag != fresh.tag || element.text != fresh.text {
            element.tag = fresh.tag;
            element.text = fresh.text;
            self.patched += 1;
        }

        let children: Vec<NodeId> = document.child_nodes(node).collect();
        element.children.truncate(children.len());
        for (index, child) in children.into_iter().enumerate() {
            match element.children.get_mut(index) {
                Some(existing) => self.reconcile_element(existing, document, child)?,
                None => {
                    let created = self.patch(document, child)?;
                    element.children.push(created);
                }
            }
        }
        Ok(())
    }
}

fn check_point(root: &MirrorElement, point: &SurfacePoint) -> Result<(), PlatformError> {
    let element = root
        .at_path(&point.path)
        .ok_or_else(|| PlatformError(format!("no element at {:?}", point.path)))?;
    if point.offset > element.len() {
        return Err(PlatformError(format!(
            "offset {} is past the end of the element at {:?}",
            point.offset, point.path
        )));
    }
    Ok(())
}

impl RenderSurface for MirrorSurface {
    fn reconcile(&mut self, document: &Document) -> Result<(), PlatformError> {
        self.patched = 0;
        let root = match self.root.take() {
            Some(mut existing) => {
                self.reconcile_element(&mut existing, document, document.root())?;
                existing
            }
            None => self.patch(document, document.root())?,
        };
        self.root = Some(root);
        tracing::trace!(patched = self.patched, "reconciled mirror surface");

        // A selection that no longer fits the tree is dropped, as a browser would.
        if self
            .selection
            .as_ref()
            .is_some_and(|selection| self.check(selection).is_err())
        {
            self.selection = None;
        }
        Ok(())
    }

    fn place_selection(&mut self, selection: &SurfaceSelection) -> Result<(), PlatformError> {
        self.select(selection.clone())
    }

    fn read_selection(&self) -> Option<SurfaceSelection> {
        self.selection.clone()
    }
}
