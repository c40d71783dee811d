use slides_core::SlideId;

use crate::config::EditMode;

/// An edit request against the editor's forest. All mutation goes through
/// [`SlideEditor::dispatch`](crate::SlideEditor::dispatch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace a slide's text.
    EditText { id: SlideId, text: String },
    /// Append a new empty child to `parent`.
    AddChild { parent: SlideId },
    /// Add a new empty sibling next to `anchor` (top level if `anchor` is top level).
    AddSibling { anchor: SlideId },
    /// Delete a slide.
    Delete { id: SlideId },
    /// Switch between editing and viewing.
    ToggleMode,
}

impl Command {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::EditText { .. } => "edit_text",
            Self::AddChild { .. } => "add_child",
            Self::AddSibling { .. } => "add_sibling",
            Self::Delete { .. } => "delete",
            Self::ToggleMode => "toggle_mode",
        }
    }
}

/// What a successful command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    TextUpdated(SlideId),
    /// A slide was created; it is now the last added and selected slide.
    Added(SlideId),
    Deleted(SlideId),
    ModeChanged(EditMode),
}
