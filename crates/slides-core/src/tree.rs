use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::slide::{Slide, SlideId};

// ── Lookup ───────────────────────────────────────────────────────────

/// Find a slide by ID (pre-order).
pub fn find_slide<'a>(slides: &'a [Slide], id: &SlideId) -> Option<&'a Slide> {
    for slide in slides {
        if &slide.id == id {
            return Some(slide);
        }
        if let Some(found) = find_slide(&slide.children, id) {
            return Some(found);
        }
    }
    None
}

/// Find the ID of the slide whose `children` contain `target_id`.
/// Top-level slides and unknown IDs yield `None`.
pub fn find_parent_id<'a>(slides: &'a [Slide], target_id: &SlideId) -> Option<&'a SlideId> {
    for slide in slides {
        if slide.children.iter().any(|child| &child.id == target_id) {
            return Some(&slide.id);
        }
        if let Some(found) = find_parent_id(&slide.children, target_id) {
            return Some(found);
        }
    }
    None
}

pub fn contains(slides: &[Slide], id: &SlideId) -> bool {
    find_slide(slides, id).is_some()
}

/// Ancestor IDs from the top level down to (but not including) the target.
/// Empty for top-level and unknown slides.
pub fn ancestors(slides: &[Slide], target_id: &SlideId) -> Vec<SlideId> {
    fn find_path(slides: &[Slide], target_id: &SlideId, path: &mut Vec<SlideId>) -> bool {
        for slide in slides {
            if &slide.id == target_id {
                return true;
            }
            path.push(slide.id.clone());
            if find_path(&slide.children, target_id, path) {
                return true;
            }
            path.pop();
        }
        false
    }
    let mut path = Vec::new();
    if find_path(slides, target_id, &mut path) {
        path
    } else {
        Vec::new()
    }
}

/// Pre-order iterator over every slide in the forest.
pub fn preorder(slides: &[Slide]) -> Preorder<'_> {
    Preorder {
        stack: slides.iter().rev().collect(),
    }
}

pub struct Preorder<'a> {
    stack: Vec<&'a Slide>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Slide;

    fn next(&mut self) -> Option<Self::Item> {
        let slide = self.stack.pop()?;
        self.stack.extend(slide.children.iter().rev());
        Some(slide)
    }
}

/// Total number of slides in the forest.
pub fn count(slides: &[Slide]) -> usize {
    preorder(slides).count()
}

// ── Find-and-transform ───────────────────────────────────────────────

/// Rebuild `slides` with `apply` run on the first slide (pre-order) that
/// satisfies `hit`. Untouched branches are copied as-is.
///
/// On a miss the closure is handed back in `Err`, so the caller knows nothing
/// matched and sibling branches can keep trying with the same closure.
pub(crate) fn rewrite_first<H, F>(slides: &[Slide], hit: &H, apply: F) -> Result<Vec<Slide>, F>
where
    H: Fn(&Slide) -> bool,
    F: FnOnce(&Slide) -> Slide,
{
    let mut apply = apply;
    for (idx, slide) in slides.iter().enumerate() {
        let replacement = if hit(slide) {
            apply(slide)
        } else {
            match rewrite_first(&slide.children, hit, apply) {
                Ok(children) => slide.with_children(children),
                Err(unused) => {
                    apply = unused;
                    continue;
                }
            }
        };

        let mut out = Vec::with_capacity(slides.len());
        out.extend_from_slice(&slides[..idx]);
        out.push(replacement);
        out.extend_from_slice(&slides[idx + 1..]);
        return Ok(out);
    }
    Err(apply)
}

// ── SlideIndex ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
struct IndexEntry {
    parent_id: Option<SlideId>,
    depth: usize,
}

/// Auxiliary id → (parent, depth) index, built on demand from a forest
/// snapshot. It is not kept in sync with later edits; rebuild it instead.
#[derive(Debug, Clone, Default)]
pub struct SlideIndex {
    entries: HashMap<SlideId, IndexEntry>,
}

impl SlideIndex {
    pub fn build(slides: &[Slide]) -> Self {
        fn walk(
            slides: &[Slide],
            parent_id: Option<&SlideId>,
            depth: usize,
            entries: &mut HashMap<SlideId, IndexEntry>,
        ) {
            for slide in slides {
                entries.insert(
                    slide.id.clone(),
                    IndexEntry {
                        parent_id: parent_id.cloned(),
                        depth,
                    },
                );
                walk(&slide.children, Some(&slide.id), depth + 1, entries);
            }
        }

        let mut entries = HashMap::new();
        walk(slides, None, 0, &mut entries);
        Self { entries }
    }

    pub fn contains(&self, id: &SlideId) -> bool {
        self.entries.contains_key(id)
    }

    /// Structural parent of `id`. `None` both for unknown IDs and top-level
    /// slides; use [`SlideIndex::contains`] to tell them apart.
    pub fn parent_of(&self, id: &SlideId) -> Option<&SlideId> {
        self.entries.get(id)?.parent_id.as_ref()
    }

    pub fn depth_of(&self, id: &SlideId) -> Option<usize> {
        self.entries.get(id).map(|e| e.depth)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Validation ───────────────────────────────────────────────────────

/// A forest that breaks the slide invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForestError {
    #[error("duplicate slide id: {0}")]
    DuplicateId(SlideId),

    #[error("slide {id} records parent {recorded:?} but is nested under {actual:?}")]
    ParentMismatch {
        id: SlideId,
        recorded: Option<SlideId>,
        actual: Option<SlideId>,
    },
}

/// Check id uniqueness and `parent_id` linkage across the whole forest.
///
/// The edit operations assume these hold and never call this themselves.
pub fn validate(slides: &[Slide]) -> Result<(), ForestError> {
    fn walk(
        slides: &[Slide],
        parent_id: Option<&SlideId>,
        seen: &mut HashSet<SlideId>,
    ) -> Result<(), ForestError> {
        for slide in slides {
            if !seen.insert(slide.id.clone()) {
                return Err(ForestError::DuplicateId(slide.id.clone()));
            }
            if slide.parent_id.as_ref() != parent_id {
                return Err(ForestError::ParentMismatch {
                    id: slide.id.clone(),
                    recorded: slide.parent_id.clone(),
                    actual: parent_id.cloned(),
                });
            }
            walk(&slide.children, Some(&slide.id), seen)?;
        }
        Ok(())
    }

    walk(slides, None, &mut HashSet::new())
}

// ── Tests ────────────────────────────────────────────────────────────
