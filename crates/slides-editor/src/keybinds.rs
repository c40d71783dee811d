use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keyboard input modes, modeled after vim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Navigation and outline actions via keybinds.
    #[default]
    Normal,
    /// Typing into the selected slide's text. Exited with `Esc` or `Enter`.
    Insert,
}

impl InputMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Insert => "INSERT",
        }
    }
}

/// Actions that can result from processing a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The key was consumed but nothing happens.
    None,
    /// Quit the editor.
    Quit,
    /// Move selection down by N rows.
    MoveDown(usize),
    /// Move selection up by N rows.
    MoveUp(usize),
    GotoTop,
    GotoBottom,
    HalfPageDown,
    HalfPageUp,
    /// Append a child to the selected slide.
    AddChild,
    /// Add a sibling of the selected slide.
    AddSibling,
    /// Delete the selected slide.
    Delete,
    /// Start typing into the selected slide.
    EditText,
    /// Switch between edit and view mode.
    ToggleLock,
    /// Switch to a specific input mode.
    SetMode(InputMode),
}

/// Pending key state for two-key sequences like `gg` and `dd`.
#[derive(Debug, Default, Clone)]
pub struct KeyState {
    pub pending_key: Option<char>,
}

impl KeyState {
    pub fn reset(&mut self) {
        self.pending_key = None;
    }
}

/// Process a key event in Normal mode, accounting for two-key sequences.
pub fn process_normal_key(key: KeyEvent, state: &mut KeyState) -> Action {
    if let Some(pending) = state.pending_key.take() {
        return match (pending, key.code) {
            ('g', KeyCode::Char('g')) => Action::GotoTop,
            ('d', KeyCode::Char('d')) => Action::Delete,
            _ => Action::None, // Invalid sequence, ignore
        };
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown(1),
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp(1),
        KeyCode::Char('G') => Action::GotoBottom,
        KeyCode::Char('g') => {
            state.pending_key = Some('g');
            Action::None
        }
        KeyCode::Char('d') if key.modifiers == KeyModifiers::CONTROL => Action::HalfPageDown,
        KeyCode::Char('u') if key.modifiers == KeyModifiers::CONTROL => Action::HalfPageUp,
        KeyCode::Char('d') => {
            state.pending_key = Some('d');
            Action::None
        }
        KeyCode::Char('a') => Action::AddChild,
        KeyCode::Char('o') => Action::AddSibling,
        KeyCode::Char('i') | KeyCode::Char('e') | KeyCode::Enter => Action::EditText,
        KeyCode::Char('v') | KeyCode::Tab => Action::ToggleLock,
        KeyCode::Char('q') => Action::Quit,
        _ => Action::None,
    }
}
