//! Boundary between editor state and whatever displays it.
//!
//! A render surface mirrors the document tree one element per node, so any
//! node can be located on the surface by the same index path that locates it
//! in the document. Selections cross the boundary as index paths plus
//! offsets and never as node handles.

use miette::Diagnostic;
use thiserror::Error;
use verso_tree::{IndexPath, TreeAlgos, TreeError};

use crate::content::Content;
use crate::document::Document;
use crate::error::{EditorError, EditorResult};
use crate::selection::{Endpoint, Selection};

/// Error reported by a render surface.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{0}")]
#[diagnostic(code(verso::editor::surface))]
pub struct PlatformError(pub String);

impl PlatformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A position on the surface: the element reached by `path` from the
/// surface root, and an offset inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfacePoint {
    pub path: IndexPath,
    pub offset: usize,
}

impl SurfacePoint {
    pub fn new(path: IndexPath, offset: usize) -> Self {
        Self { path, offset }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceSelection {
    pub anchor: SurfacePoint,
    pub focus: SurfacePoint,
}

/// Something that can display a document and host a native selection.
///
/// Implementations handle the actual UI work. The editor only ever asks a
/// surface to match a tree, to place a selection, or to report the selection
/// the user made.
pub trait RenderSurface {
    /// Bring the displayed tree in line with `document`.
    fn reconcile(&mut self, document: &Document) -> Result<(), PlatformError>;

    /// Position the native cursor or range.
    fn place_selection(&mut self, selection: &SurfaceSelection) -> Result<(), PlatformError>;

    /// Current native selection, if it lies inside the surface.
    fn read_selection(&self) -> Option<SurfaceSelection>;
}

/// Render `content` onto `surface`: reconcile the tree, then place the
/// selection. Endpoints on `text` leaves are drawn where they are; the rest
/// are normalized onto a leaf first.
pub fn paint<S: RenderSurface + ?Sized>(surface: &mut S, content: &Content) -> EditorResult<()> {
    let doc = content.document();
    surface.reconcile(doc)?;

    let selection = content.selection().text_points(doc)?;
    let mapped = SurfaceSelection {
        anchor: to_surface(doc, &selection.anchor)?,
        focus: to_surface(doc, &selection.focus)?,
    };
    tracing::trace!(?mapped, "placing selection on surface");
    surface.place_selection(&mapped)?;
    Ok(())
}

/// Read the surface's native selection back as a selection into `content`.
///
/// Returns `Ok(None)` when the surface has no selection or reports one that
/// does not land on any node of the document.
pub fn selection_from_surface<S: RenderSurface + ?Sized>(
    surface: &S,
    content: &Content,
) -> EditorResult<Option<Selection>> {
    let Some(native) = surface.read_selection() else {
        return Ok(None);
    };
    let doc = content.document();
    let (anchor, focus) = match (
        from_surface(doc, &native.anchor),
        from_surface(doc, &native.focus),
    ) {
        (Ok(anchor), Ok(focus)) => (anchor, focus),
        (Err(EditorError::Tree(TreeError::IndexOutOfRange { .. })), _)
        | (_, Err(EditorError::Tree(TreeError::IndexOutOfRange { .. }))) => {
            tracing::warn!(?native, "surface selection does not map onto the document");
            return Ok(None);
        }
        (Err(err), _) | (_, Err(err)) => return Err(err),
    };
    let selection = Selection::new(anchor, focus);
    selection.validate(doc)?;
    Ok(Some(selection))
}

fn to_surface(doc: &Document, point: &Endpoint) -> EditorResult<SurfacePoint> {
    let path = doc.index_path_to_node(doc.root(), point.node())?;
    Ok(SurfacePoint::new(path, point.offset))
}

fn from_surface(doc: &Document, point: &SurfacePoint) -> EditorResult<Endpoint> {
    let node = doc.node_at_index_path(doc.root(), &point.path)?;
    Ok(doc.point(node, point.offset))
}
