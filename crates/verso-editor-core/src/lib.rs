//! verso-editor-core: document, selection and editing logic for a rich-text
//! editor, with no rendering dependencies.
//!
//! This crate provides:
//! - `Document` - arena-backed node tree implementing `TreeAlgos`
//! - `Selection` - anchor/focus endpoints with a canonical normal form
//! - `Content` - immutable document + selection snapshots and the edits on them
//! - `EditorSession` - applies a stream of `EditorAction`s to a `Content`
//! - `RenderSurface` - the boundary a display implements, plus `MirrorSurface`

pub mod actions;
pub mod config;
pub mod content;
pub mod document;
pub mod error;
pub mod execute;
pub mod mirror;
pub mod node;
pub mod platform;
pub mod selection;

pub use actions::{EditorAction, KeyCommand, KeyPattern, keycode};
pub use config::EditorConfig;
pub use content::Content;
pub use document::{CloneMap, Document, NodeData};
pub use error::{EditorError, EditorResult};
pub use execute::EditorSession;
pub use mirror::{MirrorElement, MirrorSurface};
pub use node::{DocumentId, MAX_NODES, NodeId, NodeKind, NodeRef};
pub use platform::{
    PlatformError, RenderSurface, SurfacePoint, SurfaceSelection, paint, selection_from_surface,
};
pub use selection::{CollapseTo, Endpoint, Selection, SelectionStatus};
pub use smol_str::SmolStr;
pub use verso_tree::{IndexPath, TreeAlgos, TreeError};
