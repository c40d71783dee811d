use crossterm::event::{KeyCode, KeyEvent};
use slides_core::ops::{self, SiblingLevel};
use slides_core::tree::{self, find_slide};
use slides_core::{IdSource, LastAdded, Slide, SlideId, UuidIds};

use crate::command::{Applied, Command};
use crate::config::{EditMode, EditorConfig};
use crate::error::EditError;
use crate::keybinds::{Action, InputMode, KeyState, process_normal_key};
use crate::outline::Outline;

/// Sole owner of the slide forest and the last-added marker.
///
/// Every change goes through [`SlideEditor::dispatch`]; key handling only
/// translates keys into commands.
pub struct SlideEditor<I: IdSource = UuidIds> {
    slides: Vec<Slide>,
    last_added: LastAdded,
    mode: EditMode,
    allow_subtree_delete: bool,
    ids: I,
    /// Flattened view of `slides` with the selection cursor.
    outline: Outline,
    input_mode: InputMode,
    key_state: KeyState,
    /// Text buffer while typing into a slide.
    input: String,
    /// Cursor position (byte offset) in the input buffer.
    input_cursor: usize,
    /// The slide being typed into, if in Insert mode.
    editing: Option<SlideId>,
    /// Visible outline height, for half-page jumps.
    visible_lines: usize,
    /// Rejection of the last key-driven command, cleared on the next key.
    last_error: Option<EditError>,
}

impl SlideEditor<UuidIds> {
    /// An editor seeded with the default root slide and random ids.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default(), UuidIds)
    }
}

impl Default for SlideEditor<UuidIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IdSource> SlideEditor<I> {
    /// An editor seeded with a single root slide taken from `config`.
    pub fn with_config(config: EditorConfig, ids: I) -> Self {
        let root = Slide::root(config.root_id.clone(), config.root_text.clone());
        Self::build(vec![root], &config, ids)
    }

    /// Adopt an existing forest, checking its invariants first.
    pub fn from_forest(
        slides: Vec<Slide>,
        config: EditorConfig,
        ids: I,
    ) -> Result<Self, EditError> {
        tree::validate(&slides)?;
        Ok(Self::build(slides, &config, ids))
    }

    fn build(slides: Vec<Slide>, config: &EditorConfig, ids: I) -> Self {
        let mut editor = Self {
            slides,
            last_added: LastAdded::new(),
            mode: config.start_mode,
            allow_subtree_delete: config.allow_subtree_delete,
            ids,
            outline: Outline::new(),
            input_mode: InputMode::Normal,
            key_state: KeyState::default(),
            input: String::new(),
            input_cursor: 0,
            editing: None,
            visible_lines: config.visible_lines,
            last_error: None,
        };
        editor.outline.rebuild(&editor.slides, &editor.last_added);
        editor
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn last_added(&self) -> Option<&SlideId> {
        self.last_added.get()
    }

    /// Forget the last added slide (e.g. once the host has moved focus).
    pub fn clear_last_added(&mut self) {
        self.last_added.clear();
        self.refresh_outline();
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    /// The text being typed, while in Insert mode.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_cursor(&self) -> usize {
        self.input_cursor
    }

    pub fn editing(&self) -> Option<&SlideId> {
        self.editing.as_ref()
    }

    /// Why the last key did nothing, if it triggered a rejected command.
    pub fn last_error(&self) -> Option<&EditError> {
        self.last_error.as_ref()
    }

    /// Update the visible outline height (e.g. after a terminal resize).
    pub fn set_visible_lines(&mut self, lines: usize) {
        self.visible_lines = lines;
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    /// Apply a command to the forest.
    pub fn dispatch(&mut self, command: Command) -> Result<Applied, EditError> {
        let name = command.name();
        let result = self.apply(command);
        match &result {
            Ok(applied) => tracing::debug!(command = name, ?applied, "command applied"),
            Err(err) => tracing::debug!(command = name, error = %err, "command rejected"),
        }
        result
    }

    fn apply(&mut self, command: Command) -> Result<Applied, EditError> {
        if self.mode == EditMode::Viewing && command != Command::ToggleMode {
            return Err(EditError::Locked);
        }

        match command {
            Command::ToggleMode => {
                self.mode = self.mode.toggled();
                if self.mode == EditMode::Viewing {
                    self.finish_edit();
                }
                Ok(Applied::ModeChanged(self.mode))
            }
            Command::EditText { id, text } => {
                let slides = ops::try_update_text(&self.slides, &id, &text)
                    .ok_or_else(|| EditError::UnknownSlide(id.clone()))?;
                self.commit(slides);
                Ok(Applied::TextUpdated(id))
            }
            Command::AddChild { parent } => {
                let new_id = self.ids.next_id();
                let mut added = None;
                let record = |id: &SlideId| added = Some(id.clone());
                let slides = ops::insert_child(&self.slides, &parent, new_id, record);
                let id = added.ok_or(EditError::UnknownSlide(parent))?;
                Ok(self.commit_added(slides, id))
            }
            Command::AddSibling { anchor } => {
                // The anchor's own parent link decides between top level and nested
                let level = match find_slide(&self.slides, &anchor) {
                    Some(slide) => SiblingLevel::of(slide),
                    None => return Err(EditError::UnknownSlide(anchor)),
                };
                let new_id = self.ids.next_id();
                let mut added = None;
                let record = |id: &SlideId| added = Some(id.clone());
                let slides = ops::insert_sibling(&self.slides, &anchor, new_id, level, record);
                let id = added.ok_or(EditError::UnknownSlide(anchor))?;
                Ok(self.commit_added(slides, id))
            }
            Command::Delete { id } => {
                let slide = find_slide(&self.slides, &id)
                    .ok_or_else(|| EditError::UnknownSlide(id.clone()))?;
                if !slide.is_leaf() && !self.allow_subtree_delete {
                    return Err(EditError::HasChildren(id));
                }
                let slides = ops::try_delete_slide(&self.slides, &id)
                    .ok_or_else(|| EditError::UnknownSlide(id.clone()))?;
                self.commit(slides);

                let last_gone = self
                    .last_added
                    .get()
                    .is_some_and(|last| !tree::contains(&self.slides, last));
                if last_gone {
                    self.last_added.clear();
                    self.refresh_outline();
                }
                let editing_gone = self
                    .editing
                    .as_ref()
                    .is_some_and(|editing| !tree::contains(&self.slides, editing));
                if editing_gone {
                    self.finish_edit();
                }
                Ok(Applied::Deleted(id))
            }
        }
    }

    fn commit(&mut self, slides: Vec<Slide>) {
        self.slides = slides;
        self.refresh_outline();
    }

    /// Store a forest that gained slide `id`: it becomes last added and selected.
    fn commit_added(&mut self, slides: Vec<Slide>, id: SlideId) -> Applied {
        self.last_added.record(&id);
        self.commit(slides);
        self.outline.select(&id);
        Applied::Added(id)
    }

    fn refresh_outline(&mut self) {
        self.outline.rebuild(&self.slides, &self.last_added);
    }

    // ── Keyboard ─────────────────────────────────────────────────────

    /// Handle a key event. Returns `Quit` or a mode switch for the host to act
    /// on, `Action::None` otherwise. A rejected command shows up in
    /// [`SlideEditor::last_error`].
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        self.last_error = None;
        match self.input_mode {
            InputMode::Insert => self.handle_insert_key(key),
            InputMode::Normal => {
                let action = process_normal_key(key, &mut self.key_state);
                self.handle_normal_action(action)
            }
        }
    }

    fn handle_normal_action(&mut self, action: Action) -> Action {
        match action {
            Action::MoveDown(n) => self.outline.move_down(n),
            Action::MoveUp(n) => self.outline.move_up(n),
            Action::GotoTop => self.outline.goto_top(),
            Action::GotoBottom => self.outline.goto_bottom(),
            Action::HalfPageDown => self.outline.half_page_down(self.visible_lines),
            Action::HalfPageUp => self.outline.half_page_up(self.visible_lines),
            Action::AddChild => {
                if let Some(parent) = self.outline.selected_id().cloned() {
                    self.dispatch_and_focus(Command::AddChild { parent });
                }
            }
            Action::AddSibling => {
                if let Some(anchor) = self.outline.selected_id().cloned() {
                    self.dispatch_and_focus(Command::AddSibling { anchor });
                }
            }
            Action::Delete => {
                if let Some(id) = self.outline.selected_id().cloned() {
                    self.dispatch_key_command(Command::Delete { id });
                }
            }
            Action::EditText => self.start_edit(),
            Action::ToggleLock => {
                self.dispatch_key_command(Command::ToggleMode);
            }
            Action::Quit => return Action::Quit,
            Action::SetMode(_) | Action::None => {}
        }
        Action::None
    }

    /// Dispatch a command on behalf of a key, keeping a rejection for the host.
    fn dispatch_key_command(&mut self, command: Command) -> Option<Applied> {
        match self.dispatch(command) {
            Ok(applied) => Some(applied),
            Err(err) => {
                self.last_error = Some(err);
                None
            }
        }
    }

    /// Dispatch an insert and move input focus onto the new slide.
    fn dispatch_and_focus(&mut self, command: Command) {
        if let Some(Applied::Added(_)) = self.dispatch_key_command(command) {
            self.start_edit();
        }
    }

    /// Start typing into the selected slide. Ignored while viewing.
    fn start_edit(&mut self) {
        if self.mode == EditMode::Viewing {
            return;
        }
        let Some(row) = self.outline.selected_row() else {
            return;
        };
        self.editing = Some(row.id.clone());
        self.input = row.text.clone();
        self.input_cursor = self.input.len();
        self.input_mode = InputMode::Insert;
    }

    fn finish_edit(&mut self) {
        self.editing = None;
        self.input.clear();
        self.input_cursor = 0;
        self.input_mode = InputMode::Normal;
        self.key_state.reset();
    }

    /// Push the input buffer into the slide being edited.
    fn sync_input(&mut self) {
        if let Some(id) = self.editing.clone() {
            let text = self.input.clone();
            if self.dispatch_key_command(Command::EditText { id, text }).is_none() {
                self.finish_edit();
            }
        }
    }

    fn handle_insert_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.finish_edit();
                Action::SetMode(InputMode::Normal)
            }
            KeyCode::Char(c) => {
                self.input.insert(self.input_cursor, c);
                self.input_cursor += c.len_utf8();
                self.sync_input();
                Action::None
            }
            KeyCode::Backspace => {
                if self.input_cursor > 0 {
                    let prev = self.input[..self.input_cursor]
                        .char_indices()
                        .next_back()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                    self.input.drain(prev..self.input_cursor);
                    self.input_cursor = prev;
                    self.sync_input();
                }
                Action::None
            }
            KeyCode::Left => {
                if self.input_cursor > 0 {
                    self.input_cursor = self.input[..self.input_cursor]
                        .char_indices()
                        .next_back()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                }
                Action::None
            }
            KeyCode::Right => {
                if self.input_cursor < self.input.len() {
                    self.input_cursor = self.input[self.input_cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.input_cursor + i)
                        .unwrap_or(self.input.len());
                }
                Action::None
            }
            _ => Action::None,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use slides_core::SequentialIds;

    type Editor = SlideEditor<SequentialIds>;

    fn id(s: &str) -> SlideId {
        SlideId::from(s)
    }

    fn editor() -> Editor {
        SlideEditor::with_config(EditorConfig::default(), SequentialIds::new("n"))
    }

    fn add_child(editor: &mut Editor, parent: &str) -> Result<Applied, EditError> {
        editor.dispatch(Command::AddChild { parent: id(parent) })
    }

    fn add_sibling(editor: &mut Editor, anchor: &str) -> Result<Applied, EditError> {
        editor.dispatch(Command::AddSibling { anchor: id(anchor) })
    }

    fn delete(editor: &mut Editor, target: &str) -> Result<Applied, EditError> {
        editor.dispatch(Command::Delete { id: id(target) })
    }

    fn text_of(editor: &Editor, target: &str) -> String {
        find_slide(editor.slides(), &id(target)).unwrap().text.clone()
    }

    fn press(editor: &mut Editor, code: KeyCode) -> Action {
        editor.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(editor: &mut Editor, text: &str) {
        for c in text.chars() {
            press(editor, KeyCode::Char(c));
        }
    }

    fn child_ids(editor: &Editor, parent: &str) -> Vec<String> {
        find_slide(editor.slides(), &id(parent))
            .unwrap()
            .children
            .iter()
            .map(|c| c.id.to_string())
            .collect()
    }

    #[test]
    fn test_seeded_root() {
        let editor = editor();
        assert_eq!(editor.slides().len(), 1);
        assert_eq!(editor.slides()[0].id, id("root"));
        assert_eq!(editor.slides()[0].text, "Your first slide!");
        assert_eq!(editor.mode(), EditMode::Editing);
        assert!(editor.last_added().is_none());
        assert!(editor.last_error().is_none());
        assert_eq!(editor.outline().selected_id(), Some(&id("root")));
    }

    #[test]
    fn test_dispatch_add_child_records_last_added() {
        let mut editor = editor();
        let applied = add_child(&mut editor, "root").unwrap();
        assert_eq!(applied, Applied::Added(id("n-1")));
        assert_eq!(editor.last_added(), Some(&id("n-1")));
        assert_eq!(editor.outline().selected_id(), Some(&id("n-1")));
        assert!(editor.outline().selected_row().unwrap().is_last_added);
        assert_eq!(child_ids(&editor, "root"), vec!["n-1"]);
    }

    #[test]
    fn test_dispatch_add_sibling_nested_and_root() {
        let mut editor = editor();
        add_child(&mut editor, "root").unwrap();

        let applied = add_sibling(&mut editor, "n-1").unwrap();
        assert_eq!(applied, Applied::Added(id("n-2")));
        assert_eq!(child_ids(&editor, "root"), vec!["n-1", "n-2"]);

        let applied = add_sibling(&mut editor, "root").unwrap();
        assert_eq!(applied, Applied::Added(id("n-3")));
        assert_eq!(editor.slides().len(), 2);
        assert!(editor.slides()[1].is_root());
        assert_eq!(editor.last_added(), Some(&id("n-3")));
    }

    #[test]
    fn test_dispatch_unknown_ids() {
        let mut editor = editor();
        let before = editor.slides().to_vec();
        let unknown = Err(EditError::UnknownSlide(id("ghost")));
        assert_eq!(add_child(&mut editor, "ghost"), unknown);
        assert_eq!(add_sibling(&mut editor, "ghost"), unknown);
        let edit = Command::EditText {
            id: id("ghost"),
            text: "x".to_string(),
        };
        assert_eq!(editor.dispatch(edit), unknown);
        assert_eq!(delete(&mut editor, "ghost"), unknown);
        assert_eq!(editor.slides(), &before[..]);
        assert!(editor.last_added().is_none());
    }

    #[test]
    fn test_delete_only_leaves_by_default() {
        let mut editor = editor();
        add_child(&mut editor, "root").unwrap();
        let refused = Err(EditError::HasChildren(id("root")));
        assert_eq!(delete(&mut editor, "root"), refused);

        delete(&mut editor, "n-1").unwrap();
        assert!(child_ids(&editor, "root").is_empty());
        // The deleted slide no longer counts as last added
        assert!(editor.last_added().is_none());
    }

    #[test]
    fn test_delete_subtree_when_allowed() {
        let config = EditorConfig {
            allow_subtree_delete: true,
            ..EditorConfig::default()
        };
        let mut editor = SlideEditor::with_config(config, SequentialIds::new("n"));
        add_child(&mut editor, "root").unwrap();
        delete(&mut editor, "root").unwrap();
        assert!(editor.slides().is_empty());
        assert!(editor.outline().is_empty());
    }

    #[test]
    fn test_view_mode_locks_edits() {
        let mut editor = editor();
        let viewing = Ok(Applied::ModeChanged(EditMode::Viewing));
        assert_eq!(editor.dispatch(Command::ToggleMode), viewing);
        assert_eq!(add_child(&mut editor, "root"), Err(EditError::Locked));

        let editing = Ok(Applied::ModeChanged(EditMode::Editing));
        assert_eq!(editor.dispatch(Command::ToggleMode), editing);
        assert!(add_child(&mut editor, "root").is_ok());
    }

    #[test]
    fn test_from_forest_validates() {
        let good = vec![Slide::root("a", "A")];
        let ids = SequentialIds::new("n");
        let adopted = SlideEditor::from_forest(good, EditorConfig::default(), ids);
        assert!(adopted.is_ok());

        let bad = vec![Slide::root("a", "A"), Slide::root("a", "again")];
        let ids = SequentialIds::new("n");
        assert!(matches!(
            SlideEditor::from_forest(bad, EditorConfig::default(), ids),
            Err(EditError::InvalidForest(_))
        ));
    }

    #[test]
    fn test_clear_last_added() {
        let mut editor = editor();
        add_child(&mut editor, "root").unwrap();
        editor.clear_last_added();
        assert!(editor.last_added().is_none());
        assert!(editor.outline().rows().iter().all(|r| !r.is_last_added));
    }

    #[test]
    fn test_keyboard_add_child_focuses_new_slide() {
        let mut editor = editor();
        press(&mut editor, KeyCode::Char('a'));

        assert_eq!(editor.input_mode(), InputMode::Insert);
        assert_eq!(editor.editing(), Some(&id("n-1")));
        assert_eq!(editor.input(), "");

        type_text(&mut editor, "Intro");
        // Every keystroke lands in the forest
        assert_eq!(text_of(&editor, "n-1"), "Intro");

        press(&mut editor, KeyCode::Esc);
        assert_eq!(editor.input_mode(), InputMode::Normal);
        assert!(editor.editing().is_none());
    }

    #[test]
    fn test_keyboard_sibling_then_delete() {
        let mut editor = editor();
        press(&mut editor, KeyCode::Char('a'));
        press(&mut editor, KeyCode::Esc);
        press(&mut editor, KeyCode::Char('o'));
        press(&mut editor, KeyCode::Esc);
        assert_eq!(child_ids(&editor, "root"), vec!["n-1", "n-2"]);
        assert_eq!(editor.outline().selected_id(), Some(&id("n-2")));

        press(&mut editor, KeyCode::Char('k'));
        press(&mut editor, KeyCode::Char('d'));
        press(&mut editor, KeyCode::Char('d'));
        assert_eq!(child_ids(&editor, "root"), vec!["n-2"]);
        assert!(editor.last_error().is_none());
    }

    #[test]
    fn test_keyboard_delete_refusal_is_kept() {
        let mut editor = editor();
        press(&mut editor, KeyCode::Char('a'));
        press(&mut editor, KeyCode::Esc);
        press(&mut editor, KeyCode::Char('g'));
        press(&mut editor, KeyCode::Char('g'));
        assert_eq!(editor.outline().selected_id(), Some(&id("root")));

        press(&mut editor, KeyCode::Char('d'));
        assert_eq!(press(&mut editor, KeyCode::Char('d')), Action::None);
        let refused = EditError::HasChildren(id("root"));
        assert_eq!(editor.last_error(), Some(&refused));
        assert_eq!(child_ids(&editor, "root"), vec!["n-1"]);

        // The next key starts from a clean slate
        press(&mut editor, KeyCode::Char('j'));
        assert!(editor.last_error().is_none());
    }

    #[test]
    fn test_keyboard_add_while_viewing_is_kept() {
        let mut editor = editor();
        press(&mut editor, KeyCode::Tab);
        press(&mut editor, KeyCode::Char('a'));
        assert_eq!(editor.last_error(), Some(&EditError::Locked));
    }

    #[test]
    fn test_keyboard_edit_existing_text() {
        let mut editor = editor();
        press(&mut editor, KeyCode::Char('e'));
        assert_eq!(editor.input(), "Your first slide!");
        assert_eq!(editor.input_cursor(), "Your first slide!".len());

        press(&mut editor, KeyCode::Backspace);
        press(&mut editor, KeyCode::Left);
        type_text(&mut editor, "X");
        press(&mut editor, KeyCode::Right);
        press(&mut editor, KeyCode::Enter);
        assert_eq!(editor.slides()[0].text, "Your first slidXe");
    }

    #[test]
    fn test_keyboard_locked_ignores_edits() {
        let mut editor = editor();
        press(&mut editor, KeyCode::Tab);
        assert_eq!(editor.mode(), EditMode::Viewing);

        press(&mut editor, KeyCode::Char('a'));
        press(&mut editor, KeyCode::Char('i'));
        assert_eq!(editor.input_mode(), InputMode::Normal);
        assert!(child_ids(&editor, "root").is_empty());

        press(&mut editor, KeyCode::Char('v'));
        assert_eq!(editor.mode(), EditMode::Editing);
    }

    #[test]
    fn test_half_page_uses_visible_lines() {
        let config = EditorConfig {
            visible_lines: 4,
            ..EditorConfig::default()
        };
        let mut editor = SlideEditor::with_config(config, SequentialIds::new("n"));
        for _ in 0..5 {
            add_child(&mut editor, "root").unwrap();
        }
        press(&mut editor, KeyCode::Char('g'));
        press(&mut editor, KeyCode::Char('g'));

        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        editor.handle_key(ctrl_d);
        assert_eq!(editor.outline().selected_index(), 2);

        editor.set_visible_lines(2);
        editor.handle_key(ctrl_d);
        assert_eq!(editor.outline().selected_index(), 3);

        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        editor.handle_key(ctrl_u);
        assert_eq!(editor.outline().selected_index(), 2);
    }

    #[test]
    fn test_keyboard_quit() {
        let mut editor = editor();
        assert_eq!(press(&mut editor, KeyCode::Char('q')), Action::Quit);
        assert_eq!(press(&mut editor, KeyCode::Char('j')), Action::None);
    }
}
