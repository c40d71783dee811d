use slides_core::{LastAdded, Slide, SlideId};

// ── OutlineRow ───────────────────────────────────────────────────────

/// One visible line of the outline: a slide flattened out of the forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineRow {
    pub id: SlideId,
    pub depth: usize,
    pub text: String,
    pub has_children: bool,
    /// Whether this is the most recently created slide (drives focus).
    pub is_last_added: bool,
}

impl OutlineRow {
    /// Only leaves offer delete in the outline.
    pub fn can_delete(&self) -> bool {
        !self.has_children
    }
}

// ── Outline ──────────────────────────────────────────────────────────

/// Pre-order projection of the slide forest plus a selection cursor.
#[derive(Debug, Clone, Default)]
pub struct Outline {
    rows: Vec<OutlineRow>,
    selected: usize,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild rows from the forest, keeping the selection on the same slide
    /// if it still exists.
    pub fn rebuild(&mut self, slides: &[Slide], last_added: &LastAdded) {
        let old_id = self.selected_id().cloned();
        self.rows.clear();
        flatten(slides, 0, last_added, &mut self.rows);

        if let Some(id) = old_id {
            if self.select(&id) {
                return;
            }
        }

        // Clamp selection
        if self.selected >= self.rows.len() {
            self.selected = self.rows.len().saturating_sub(1);
        }
    }

    pub fn rows(&self) -> &[OutlineRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&OutlineRow> {
        self.rows.get(self.selected)
    }

    pub fn selected_id(&self) -> Option<&SlideId> {
        self.selected_row().map(|row| &row.id)
    }

    /// Select the row for `id`. Returns false if it is not in the outline.
    pub fn select(&mut self, id: &SlideId) -> bool {
        match self.rows.iter().position(|row| &row.id == id) {
            Some(pos) => {
                self.selected = pos;
                true
            }
            None => false,
        }
    }

    pub fn move_down(&mut self, n: usize) {
        let last = self.rows.len().saturating_sub(1);
        self.selected = (self.selected + n).min(last);
    }

    pub fn move_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn goto_top(&mut self) {
        self.selected = 0;
    }

    pub fn goto_bottom(&mut self) {
        self.selected = self.rows.len().saturating_sub(1);
    }

    pub fn half_page_down(&mut self, visible_lines: usize) {
        self.move_down(visible_lines / 2);
    }

    pub fn half_page_up(&mut self, visible_lines: usize) {
        self.move_up(visible_lines / 2);
    }
}

fn flatten(slides: &[Slide], depth: usize, last_added: &LastAdded, out: &mut Vec<OutlineRow>) {
    for slide in slides {
        out.push(OutlineRow {
            id: slide.id.clone(),
            depth,
            text: slide.text.clone(),
            has_children: !slide.is_leaf(),
            is_last_added: last_added.is(&slide.id),
        });
        flatten(&slide.children, depth + 1, last_added, out);
    }
}

// ── Tests ────────────────────────────────────────────────────────────
