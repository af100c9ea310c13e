//! Action execution against a content snapshot.
//!
//! `EditorSession` is the logic layer between a render surface and the
//! snapshot model: it consumes `EditorAction`s one at a time and replaces its
//! `Content` with whatever each action produces.

use crate::actions::{EditorAction, KeyCommand};
use crate::config::EditorConfig;
use crate::content::Content;
use crate::error::{EditorError, EditorResult};
use crate::selection::{CollapseTo, Selection};

/// Direction of a one-character step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Back,
    Forward,
}

impl Step {
    fn chars(self) -> isize {
        match self {
            Self::Back => -1,
            Self::Forward => 1,
        }
    }
}

/// Editor state driven by a stream of actions.
#[derive(Debug, Clone)]
pub struct EditorSession {
    config: EditorConfig,
    content: Content,
    focused: bool,
}

impl EditorSession {
    /// Start a blurred session over `content`.
    pub fn new(config: EditorConfig, content: Content) -> Self {
        Self {
            config,
            content,
            focused: false,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn into_content(self) -> Content {
        self.content
    }

    /// Apply one action. Returns `true` when the content snapshot changed.
    pub fn apply(&mut self, action: &EditorAction) -> EditorResult<bool> {
        match action {
            EditorAction::Focus => {
                self.focused = true;
                Ok(false)
            }
            EditorAction::Blur => {
                self.focused = false;
                Ok(false)
            }
            EditorAction::ChangeSelection(None) => {
                tracing::debug!("surface reported no selection, keeping current one");
                Ok(false)
            }
            EditorAction::ChangeSelection(Some(selection)) => {
                let next = self.content.with_selection(*selection)?;
                Ok(self.replace(next))
            }
            EditorAction::EnterKeyPattern(pattern) => {
                if self.config.require_focus && !self.focused {
                    tracing::trace!(?pattern, "ignoring key while blurred");
                    return Ok(false);
                }
                match KeyCommand::from_pattern(pattern) {
                    Some(command) => self.execute(command),
                    None => Ok(false),
                }
            }
        }
    }

    /// Run a key command directly, bypassing the focus check.
    pub fn execute(&mut self, command: KeyCommand) -> EditorResult<bool> {
        if command.is_edit() && self.config.read_only {
            tracing::debug!(?command, "read-only editor, ignoring edit");
            return Ok(false);
        }
        tracing::debug!(?command, "executing");

        let next = match command {
            KeyCommand::InsertChar(c) => {
                let mut buf = [0u8; 4];
                let cleared = self.content.remove_selection()?;
                Some(cleared.add_text(c.encode_utf8(&mut buf))?)
            }
            KeyCommand::DeleteBackward => self.delete(Step::Back)?,
            KeyCommand::DeleteForward => self.delete(Step::Forward)?,
            KeyCommand::MoveLeft => self.move_caret(Step::Back)?,
            KeyCommand::MoveRight => self.move_caret(Step::Forward)?,
            KeyCommand::ExtendLeft => self.extend(Step::Back)?,
            KeyCommand::ExtendRight => self.extend(Step::Forward)?,
        };
        Ok(next.is_some_and(|next| self.replace(next)))
    }

    fn replace(&mut self, next: Content) -> bool {
        let changed = !next.is_same_snapshot(&self.content);
        self.content = next;
        changed
    }

    /// Delete the selection, or one character next to a caret.
    fn delete(&self, step: Step) -> EditorResult<Option<Content>> {
        let doc = self.content.document();
        let selection = self.content.selection();
        if !selection.is_collapsed(doc)? {
            return self.content.remove_selection().map(Some);
        }
        let Some(moved) = edge_checked(selection.shift_char(doc, step.chars()))? else {
            return Ok(None);
        };
        let span = Selection::new(moved.focus, selection.focus);
        self.content.with_selection(span)?.remove_selection().map(Some)
    }

    /// Move a caret by one character. A range collapses to its start or end
    /// instead of moving.
    fn move_caret(&self, step: Step) -> EditorResult<Option<Content>> {
        let doc = self.content.document();
        let selection = self.content.selection();
        if !selection.is_collapsed(doc)? {
            let (start, end) = selection.ordered(doc)?;
            let edge = match step {
                Step::Back => start,
                Step::Forward => end,
            };
            return self.content.with_selection(Selection::caret(edge)).map(Some);
        }
        let Some(moved) = edge_checked(selection.shift_char(doc, step.chars()))? else {
            return Ok(None);
        };
        self.content.with_selection(moved).map(Some)
    }

    /// Move only the focus by one character.
    fn extend(&self, step: Step) -> EditorResult<Option<Content>> {
        let doc = self.content.document();
        let selection = self.content.selection();
        let focus = selection.collapse(CollapseTo::Focus);
        let Some(moved) = edge_checked(focus.shift_char(doc, step.chars()))? else {
            return Ok(None);
        };
        let anchor = selection.norm(doc)?.anchor;
        self.content
            .with_selection(Selection::new(anchor, moved.focus))
            .map(Some)
    }
}

/// Running into either end of the document is not an error for the user;
/// the key press just does nothing.
fn edge_checked(result: EditorResult<Selection>) -> EditorResult<Option<Selection>> {
    match result {
        Ok(selection) => Ok(Some(selection)),
        Err(EditorError::OutOfRange) => {
            tracing::trace!("movement stopped at the document edge");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
