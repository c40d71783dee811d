//! Pure edit operations over a slide forest.
//!
//! Every operation takes the current forest by reference and builds a new one;
//! the input is never touched. A target that is not in the forest is a silent
//! no-op. The `try_*` forms report that case as `None`, the plain forms hand
//! back an unchanged copy, and the insert forms only invoke `on_added` when a
//! slide was actually created.

use crate::slide::{Slide, SlideId};
use crate::tree::rewrite_first;

/// Where a new sibling goes, decided by the caller from the anchor's `parent_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingLevel {
    /// The anchor is a top-level slide: append a new top-level slide.
    Root,
    /// The anchor is nested: append to the anchor's parent.
    Nested,
}

impl SiblingLevel {
    /// Level for a sibling of `anchor`, from its recorded `parent_id`.
    pub fn of(anchor: &Slide) -> Self {
        if anchor.is_root() {
            SiblingLevel::Root
        } else {
            SiblingLevel::Nested
        }
    }
}

// ── Update text ──────────────────────────────────────────────────────

/// Replace the text of slide `target_id`, keeping its id, parent and children.
pub fn try_update_text(slides: &[Slide], target_id: &SlideId, text: &str) -> Option<Vec<Slide>> {
    rewrite_first(
        slides,
        &|s: &Slide| &s.id == target_id,
        |s: &Slide| Slide {
            text: text.to_string(),
            ..s.clone()
        },
    )
    .ok()
    .or_else(|| missed("update_text", target_id))
}

pub fn update_text(slides: &[Slide], target_id: &SlideId, text: &str) -> Vec<Slide> {
    try_update_text(slides, target_id, text).unwrap_or_else(|| slides.to_vec())
}

// ── Insert child ─────────────────────────────────────────────────────

/// Append an empty slide `new_id` to the end of `parent_id`'s children.
pub fn try_insert_child(
    slides: &[Slide],
    parent_id: &SlideId,
    new_id: SlideId,
) -> Option<Vec<Slide>> {
    rewrite_first(
        slides,
        &|s: &Slide| &s.id == parent_id,
        |s: &Slide| {
            let mut children = s.children.clone();
            children.push(Slide::child_of(new_id, s.id.clone()));
            s.with_children(children)
        },
    )
    .ok()
    .or_else(|| missed("insert_child", parent_id))
}

/// [`try_insert_child`], reporting the new slide's id to `on_added` exactly
/// once when the parent was found.
pub fn insert_child<F>(
    slides: &[Slide],
    parent_id: &SlideId,
    new_id: SlideId,
    on_added: F,
) -> Vec<Slide>
where
    F: FnOnce(&SlideId),
{
    let reported = new_id.clone();
    match try_insert_child(slides, parent_id, new_id) {
        Some(updated) => {
            on_added(&reported);
            updated
        }
        None => slides.to_vec(),
    }
}

// ── Insert sibling ───────────────────────────────────────────────────

/// Add an empty slide `new_id` as a sibling of `anchor_id`.
///
/// With [`SiblingLevel::Root`] the slide is appended to the top level and the
/// anchor is not looked at. With [`SiblingLevel::Nested`] it is appended to the
/// end of the anchor's parent's children (not directly after the anchor); an
/// anchor that is missing or sits at the top level leaves the forest as-is.
pub fn try_insert_sibling(
    slides: &[Slide],
    anchor_id: &SlideId,
    new_id: SlideId,
    level: SiblingLevel,
) -> Option<Vec<Slide>> {
    match level {
        SiblingLevel::Root => {
            let mut out = slides.to_vec();
            out.push(Slide::root(new_id, String::new()));
            Some(out)
        }
        SiblingLevel::Nested => rewrite_first(
            slides,
            &|s: &Slide| s.children.iter().any(|child| &child.id == anchor_id),
            |parent: &Slide| {
                let mut children = parent.children.clone();
                children.push(Slide::child_of(new_id, parent.id.clone()));
                parent.with_children(children)
            },
        )
        .ok()
        .or_else(|| missed("insert_sibling", anchor_id)),
    }
}

/// [`try_insert_sibling`], reporting the new slide's id to `on_added` exactly
/// once when the sibling was placed.
pub fn insert_sibling<F>(
    slides: &[Slide],
    anchor_id: &SlideId,
    new_id: SlideId,
    level: SiblingLevel,
    on_added: F,
) -> Vec<Slide>
where
    F: FnOnce(&SlideId),
{
    let reported = new_id.clone();
    match try_insert_sibling(slides, anchor_id, new_id, level) {
        Some(updated) => {
            on_added(&reported);
            updated
        }
        None => slides.to_vec(),
    }
}

// ── Delete ───────────────────────────────────────────────────────────

/// Remove slide `target_id` and its whole subtree, wherever it sits.
/// Deleting the last top-level slide leaves an empty forest.
pub fn try_delete_slide(slides: &[Slide], target_id: &SlideId) -> Option<Vec<Slide>> {
    if let Some(pos) = slides.iter().position(|s| &s.id == target_id) {
        let mut out = slides.to_vec();
        out.remove(pos);
        return Some(out);
    }

    rewrite_first(
        slides,
        &|s: &Slide| s.children.iter().any(|child| &child.id == target_id),
        |parent: &Slide| {
            let children = parent
                .children
                .iter()
                .filter(|child| &child.id != target_id)
                .cloned()
                .collect();
            parent.with_children(children)
        },
    )
    .ok()
    .or_else(|| missed("delete_slide", target_id))
}

pub fn delete_slide(slides: &[Slide], target_id: &SlideId) -> Vec<Slide> {
    try_delete_slide(slides, target_id).unwrap_or_else(|| slides.to_vec())
}

fn missed(op: &'static str, id: &SlideId) -> Option<Vec<Slide>> {
    tracing::trace!(op, id = %id, "target not found, forest unchanged");
    None
}

// ── Tests ────────────────────────────────────────────────────────────
