use slides_core::{ForestError, SlideId};
use thiserror::Error;

/// Why the editor refused a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("slides are locked in view mode")]
    Locked,

    #[error("no slide with id {0}")]
    UnknownSlide(SlideId),

    #[error("slide {0} still has children")]
    HasChildren(SlideId),

    #[error("invalid slide forest: {0}")]
    InvalidForest(#[from] ForestError),
}
