use crate::slide::SlideId;

/// The most recently created slide, used by hosts to move focus.
///
/// Purely advisory: nothing in the forest depends on it, and only a
/// successful insert should record into it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LastAdded(Option<SlideId>);

impl LastAdded {
    pub fn new() -> Self {
        Self(None)
    }

    pub fn record(&mut self, id: &SlideId) {
        self.0 = Some(id.clone());
    }

    pub fn get(&self) -> Option<&SlideId> {
        self.0.as_ref()
    }

    /// Whether `id` is the last added slide.
    pub fn is(&self, id: &SlideId) -> bool {
        self.0.as_ref() == Some(id)
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    pub fn take(&mut self) -> Option<SlideId> {
        self.0.take()
    }
}
