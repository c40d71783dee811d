use std::fmt;

// ── Identifiers ──────────────────────────────────────────────────────

/// Opaque, unique identifier of a slide. Assigned once at creation and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlideId(String);

impl SlideId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SlideId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SlideId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ── Slide ────────────────────────────────────────────────────────────

/// A node of the slide forest.
///
/// `parent_id` is `None` for top-level slides. It mirrors the nesting and is
/// never a reference to the parent value itself; parents are resolved by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub id: SlideId,
    pub text: String,
    pub parent_id: Option<SlideId>,
    pub children: Vec<Slide>,
}

impl Slide {
    /// A top-level slide with no children.
    pub fn root(id: impl Into<SlideId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            parent_id: None,
            children: Vec::new(),
        }
    }

    /// A fresh, empty slide nested under `parent_id`.
    pub fn child_of(id: impl Into<SlideId>, parent_id: impl Into<SlideId>) -> Self {
        Self {
            id: id.into(),
            text: String::new(),
            parent_id: Some(parent_id.into()),
            children: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Copy of this slide's own fields with `children` replaced.
    pub(crate) fn with_children(&self, children: Vec<Slide>) -> Self {
        Self {
            id: self.id.clone(),
            text: self.text.clone(),
            parent_id: self.parent_id.clone(),
            children,
        }
    }
}
