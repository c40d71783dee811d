use slides_core::SlideId;

/// Whether the outline accepts edits or is locked for viewing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Editing,
    Viewing,
}

impl EditMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Editing => Self::Viewing,
            Self::Viewing => Self::Editing,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Editing => "EDIT",
            Self::Viewing => "VIEW",
        }
    }
}

/// Settings for a new [`SlideEditor`](crate::SlideEditor).
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Id of the seeded top-level slide.
    pub root_id: SlideId,
    /// Text of the seeded top-level slide.
    pub root_text: String,
    /// Mode the editor starts in.
    pub start_mode: EditMode,
    /// Allow deleting slides that still have children (the whole subtree goes).
    /// Off by default: only leaves can be deleted from the editor.
    pub allow_subtree_delete: bool,
    /// Height of the visible outline in rows; half-page jumps move half of it.
    pub visible_lines: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            root_id: SlideId::from("root"),
            root_text: "Your first slide!".to_string(),
            start_mode: EditMode::Editing,
            allow_subtree_delete: false,
            visible_lines: 20,
        }
    }
}
