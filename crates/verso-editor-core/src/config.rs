use serde::{Deserialize, Serialize};

/// Behaviour switches for an [`EditorSession`](crate::execute::EditorSession).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Refuse edits. Selection changes and cursor movement still apply.
    pub read_only: bool,
    /// Ignore key patterns while the editor is blurred.
    pub require_focus: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            read_only: false,
            require_focus: true,
        }
    }
}

impl EditorConfig {
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }
}
