//! Editor actions delivered by the rendering layer.
//!
//! A host pushes an ordered stream of `EditorAction`s: focus changes, native
//! selection changes, and raw key patterns. `KeyCommand` is the semantic
//! reading of a key pattern that the executor acts on.

use serde::{Deserialize, Serialize};

use crate::selection::Selection;

/// Key codes the executor understands.
pub mod keycode {
    pub const BACKSPACE: u32 = 8;
    pub const SPACE: u32 = 32;
    pub const ARROW_LEFT: u32 = 37;
    pub const ARROW_RIGHT: u32 = 39;
    pub const DELETE: u32 = 46;
    pub const DIGIT_0: u32 = 48;
    pub const DIGIT_9: u32 = 57;
    pub const KEY_A: u32 = 65;
    pub const KEY_Z: u32 = 90;
}

/// A key press with its modifier state, as reported by the host.
///
/// Field names follow the browser's `KeyboardEvent`, so a host can forward
/// the event object as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyPattern {
    pub alt_key: bool,
    pub ctrl_key: bool,
    pub key_code: u32,
    pub meta_key: bool,
    pub shift_key: bool,
}

impl KeyPattern {
    /// An unmodified press of `key_code`.
    pub fn key(key_code: u32) -> Self {
        Self {
            key_code,
            ..Self::default()
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift_key = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl_key = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta_key = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt_key = true;
        self
    }

    /// Any modifier other than shift is held.
    pub fn has_command_modifier(&self) -> bool {
        self.alt_key || self.ctrl_key || self.meta_key
    }
}

/// Input events the rendering layer delivers to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    Focus,
    Blur,
    /// The native selection moved. `None` when the surface has no selection
    /// inside the editor.
    ChangeSelection(Option<Selection>),
    EnterKeyPattern(KeyPattern),
}

/// What a key pattern asks the editor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    InsertChar(char),
    DeleteBackward,
    DeleteForward,
    MoveLeft,
    MoveRight,
    /// Move only the focus, growing or shrinking the selection.
    ExtendLeft,
    ExtendRight,
}

impl KeyCommand {
    /// Read a key pattern. Patterns with ctrl, meta or alt held map to
    /// nothing, as do keys the editor has no use for.
    pub fn from_pattern(pattern: &KeyPattern) -> Option<Self> {
        if pattern.has_command_modifier() {
            return None;
        }
        let shift = pattern.shift_key;
        match pattern.key_code {
            keycode::BACKSPACE => Some(Self::DeleteBackward),
            keycode::DELETE => Some(Self::DeleteForward),
            keycode::ARROW_LEFT if shift => Some(Self::ExtendLeft),
            keycode::ARROW_LEFT => Some(Self::MoveLeft),
            keycode::ARROW_RIGHT if shift => Some(Self::ExtendRight),
            keycode::ARROW_RIGHT => Some(Self::MoveRight),
            keycode::SPACE => Some(Self::InsertChar(' ')),
            code @ keycode::KEY_A..=keycode::KEY_Z => {
                let c = char::from_u32(code)?;
                Some(Self::InsertChar(if shift { c } else { c.to_ascii_lowercase() }))
            }
            code @ keycode::DIGIT_0..=keycode::DIGIT_9 if !shift => {
                char::from_u32(code).map(Self::InsertChar)
            }
            _ => None,
        }
    }

    /// Commands that change the document rather than only the selection.
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Self::InsertChar(_) | Self::DeleteBackward | Self::DeleteForward
        )
    }
}
