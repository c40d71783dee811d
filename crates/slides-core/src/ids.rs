use uuid::Uuid;

use crate::slide::SlideId;

/// Source of fresh slide identifiers.
///
/// Every id handed out must differ from every id the source produced before.
/// The edit operations never mint ids themselves; hosts draw one per insert.
pub trait IdSource {
    fn next_id(&mut self) -> SlideId;
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> SlideId {
        SlideId::new(Uuid::new_v4().to_string())
    }
}

/// Deterministic `prefix-1`, `prefix-2`, ... ids.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("slide")
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> SlideId {
        let id = SlideId::new(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

impl<T: IdSource + ?Sized> IdSource for &mut T {
    fn next_id(&mut self) -> SlideId {
        (**self).next_id()
    }
}
